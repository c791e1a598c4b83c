//! Date column transforms
//!
//! - Identifier: deterministic hash of the ISO string form
//! - Insensitive: pass through unchanged
//! - Quasi-identifier: generalize by truncating to the first day of the month
//! - Sensitive: replace with a date drawn uniformly at random between the
//!   column's observed minimum and maximum, re-sampled per row

use super::hash::hash_column;
use crate::domain::column::SensitivityType;
use crate::domain::errors::ShroudError;
use crate::domain::records::CellValue;
use crate::domain::result::Result;
use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;

/// Apply the date transform family for the given sensitivity
pub fn transform(values: &[CellValue], sensitivity: SensitivityType) -> Result<Vec<CellValue>> {
    match sensitivity {
        SensitivityType::Identifier => Ok(hash_column(values)),
        SensitivityType::Insensitive => Ok(values.to_vec()),
        SensitivityType::QuasiIdentifier => truncate_to_month(values),
        SensitivityType::Sensitive => randomize_within_range(values),
    }
}

/// Extract typed dates, rejecting cells of any other type
fn as_dates(values: &[CellValue]) -> Result<Vec<NaiveDate>> {
    values
        .iter()
        .enumerate()
        .map(|(row, value)| match value {
            CellValue::Date(d) => Ok(*d),
            other => Err(ShroudError::Validation(format!(
                "row {row} is not a date: '{other}'"
            ))),
        })
        .collect()
}

/// Generalize each date to the first day of its month
fn truncate_to_month(values: &[CellValue]) -> Result<Vec<CellValue>> {
    as_dates(values)?
        .into_iter()
        .map(|date| {
            date.with_day(1)
                .map(CellValue::Date)
                .ok_or_else(|| ShroudError::Transform(format!("cannot truncate date {date}")))
        })
        .collect()
}

/// Replace each date with a uniform random draw from [min, max)
///
/// The range is computed from the column's own values. A single-date range
/// has exactly one possible draw, so the value is returned as-is; an empty
/// column has no range at all and fails.
fn randomize_within_range(values: &[CellValue]) -> Result<Vec<CellValue>> {
    let dates = as_dates(values)?;
    let min = *dates
        .iter()
        .min()
        .ok_or_else(|| ShroudError::Transform("cannot randomize an empty date column".into()))?;
    let max = *dates.iter().max().unwrap_or(&min);
    let span_days = (max - min).num_days();

    let mut rng = rand::thread_rng();
    Ok(dates
        .iter()
        .map(|_| {
            let date = if span_days == 0 {
                min
            } else {
                min + Duration::days(rng.gen_range(0..span_days))
            };
            CellValue::Date(date)
        })
        .collect())
}
