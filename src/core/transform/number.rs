//! Number column transforms
//!
//! - Identifier: deterministic hash of the string form
//! - Insensitive: pass through unchanged
//! - Quasi-identifier: generalize into one of 5 equal-width bins, replacing
//!   each value with its bin's interval label
//! - Sensitive: perturb with independent Gaussian noise (mean 0, std dev 1)

use super::hash::hash_column;
use crate::domain::column::SensitivityType;
use crate::domain::errors::ShroudError;
use crate::domain::records::CellValue;
use crate::domain::result::Result;
use rand_distr::{Distribution, Normal};

/// Number of equal-width bins used for quasi-identifier generalization
pub const BIN_COUNT: usize = 5;

/// Apply the number transform family for the given sensitivity
pub fn transform(values: &[CellValue], sensitivity: SensitivityType) -> Result<Vec<CellValue>> {
    match sensitivity {
        SensitivityType::Identifier => Ok(hash_column(values)),
        SensitivityType::Insensitive => Ok(values.to_vec()),
        SensitivityType::QuasiIdentifier => bin_into_intervals(values),
        SensitivityType::Sensitive => add_gaussian_noise(values),
    }
}

/// Extract typed numbers, rejecting cells of any other type and non-finite values
fn as_numbers(values: &[CellValue]) -> Result<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(row, value)| match value {
            CellValue::Number(n) if n.is_finite() => Ok(*n),
            CellValue::Number(n) => Err(ShroudError::Transform(format!(
                "row {row} is not a finite number: {n}"
            ))),
            other => Err(ShroudError::Validation(format!(
                "row {row} is not a number: '{other}'"
            ))),
        })
        .collect()
}

/// Replace each value with the interval label of its equal-width bin
///
/// Bin edges are computed once from the column's own min/max. An empty
/// column or a zero-variance range (min == max) has no usable bin width
/// and fails rather than producing wrong bins.
fn bin_into_intervals(values: &[CellValue]) -> Result<Vec<CellValue>> {
    let numbers = as_numbers(values)?;
    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if numbers.is_empty() {
        return Err(ShroudError::Transform(
            "cannot bin an empty number column".into(),
        ));
    }
    let width = (max - min) / BIN_COUNT as f64;
    if !(width > 0.0) {
        return Err(ShroudError::Transform(format!(
            "cannot bin a zero-variance number column (all values equal {min})"
        )));
    }

    let labels: Vec<String> = (0..BIN_COUNT)
        .map(|i| {
            let lo = min + width * i as f64;
            let hi = min + width * (i + 1) as f64;
            if i + 1 == BIN_COUNT {
                format!("[{lo:.2}, {hi:.2}]")
            } else {
                format!("[{lo:.2}, {hi:.2})")
            }
        })
        .collect();

    Ok(numbers
        .iter()
        .map(|n| {
            let index = (((n - min) / width) as usize).min(BIN_COUNT - 1);
            CellValue::Text(labels[index].clone())
        })
        .collect())
}

/// Add independent Gaussian noise (mean 0, standard deviation 1) to each value
fn add_gaussian_noise(values: &[CellValue]) -> Result<Vec<CellValue>> {
    let numbers = as_numbers(values)?;
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ShroudError::Transform(format!("invalid noise distribution: {e}")))?;
    let mut rng = rand::thread_rng();

    Ok(numbers
        .iter()
        .map(|n| CellValue::Number(n + normal.sample(&mut rng)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn numbers(values: &[f64]) -> Vec<CellValue> {
        values.iter().map(|n| CellValue::Number(*n)).collect()
    }

    #[test]
    fn test_insensitive_passes_through() {
        let values = numbers(&[1.0, 2.5, -3.0]);
        let result = transform(&values, SensitivityType::Insensitive).unwrap();
        assert_eq!(result, values);
    }

    #[test]
    fn test_identifier_hashes_string_form() {
        let values = numbers(&[42.0]);
        let result = transform(&values, SensitivityType::Identifier).unwrap();
        let expected = super::super::hash::sha256_hex("42");
        assert_eq!(result[0], CellValue::Text(expected));
    }

    #[test]
    fn test_binning_produces_at_most_five_labels() {
        let values = numbers(&[1.0, 5.0, 12.0, 20.0, 33.0, 47.0, 50.0, 8.0, 41.0]);
        let result = transform(&values, SensitivityType::QuasiIdentifier).unwrap();
        let labels: HashSet<String> = result
            .iter()
            .map(|cell| match cell {
                CellValue::Text(s) => s.clone(),
                other => panic!("expected interval label, got {other:?}"),
            })
            .collect();
        assert!(labels.len() <= BIN_COUNT);
    }

    #[test]
    fn test_binning_maps_values_to_containing_interval() {
        // Range [0, 50], width 10: 15.0 falls in the second bin
        let values = numbers(&[0.0, 15.0, 50.0]);
        let result = transform(&values, SensitivityType::QuasiIdentifier).unwrap();
        assert_eq!(result[0], CellValue::Text("[0.00, 10.00)".into()));
        assert_eq!(result[1], CellValue::Text("[10.00, 20.00)".into()));
        // Max lands in the final, closed bin
        assert_eq!(result[2], CellValue::Text("[40.00, 50.00]".into()));
    }

    #[test]
    fn test_binning_zero_variance_fails() {
        let values = numbers(&[7.0, 7.0, 7.0]);
        let result = transform(&values, SensitivityType::QuasiIdentifier);
        assert!(matches!(result, Err(ShroudError::Transform(_))));
    }

    #[test]
    fn test_binning_empty_column_fails() {
        let result = transform(&[], SensitivityType::QuasiIdentifier);
        assert!(result.is_err());
    }

    #[test]
    fn test_binning_rejects_nan() {
        let values = numbers(&[1.0, f64::NAN, 3.0]);
        let result = transform(&values, SensitivityType::QuasiIdentifier);
        assert!(matches!(result, Err(ShroudError::Transform(_))));
    }

    #[test]
    fn test_noise_mean_is_approximately_zero() {
        let input: Vec<f64> = (0..5000).map(|i| i as f64).collect();
        let values = numbers(&input);
        let result = transform(&values, SensitivityType::Sensitive).unwrap();

        let mean_delta: f64 = result
            .iter()
            .zip(&input)
            .map(|(cell, original)| match cell {
                CellValue::Number(n) => n - original,
                other => panic!("expected number cell, got {other:?}"),
            })
            .sum::<f64>()
            / input.len() as f64;

        // std dev of the mean over 5000 draws is ~0.014; 0.1 is 7 sigma
        assert!(mean_delta.abs() < 0.1, "mean delta was {mean_delta}");
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let values = vec![CellValue::Text("forty-two".into())];
        let result = transform(&values, SensitivityType::Sensitive);
        assert!(matches!(result, Err(ShroudError::Validation(_))));
    }
}
