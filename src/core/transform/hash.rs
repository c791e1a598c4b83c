//! Deterministic one-way hashing for identifier columns
//!
//! Identifier values are replaced with the SHA-256 digest of their canonical
//! string form. Hashing is unsalted so the same input always maps to the same
//! digest within and across requests, giving consistent pseudonymization.

use crate::domain::records::CellValue;
use sha2::{Digest, Sha256};

/// SHA-256 digest of a string, as a lowercase 64-character hex string
///
/// # Examples
///
/// ```
/// use shroud::core::transform::hash::sha256_hex;
///
/// let digest = sha256_hex("alice@example.com");
/// assert_eq!(digest.len(), 64);
/// assert_eq!(digest, sha256_hex("alice@example.com"));
/// ```
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Hash every value of a column into a fixed-length hex text cell
pub fn hash_column(values: &[CellValue]) -> Vec<CellValue> {
    values
        .iter()
        .map(|value| CellValue::Text(sha256_hex(&value.canonical_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(sha256_hex("123-45-6789"), sha256_hex("123-45-6789"));
    }

    #[test]
    fn test_distinct_inputs_hash_differently() {
        assert_ne!(sha256_hex("alice"), sha256_hex("bob"));
    }

    #[test]
    fn test_known_digest() {
        // SHA-256 of the empty string
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_column_produces_fixed_length_text() {
        let values = vec![
            CellValue::Text("123-45-6789".into()),
            CellValue::Number(42.0),
            CellValue::Date(NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()),
        ];
        let hashed = hash_column(&values);
        assert_eq!(hashed.len(), 3);
        for cell in &hashed {
            match cell {
                CellValue::Text(s) => assert_eq!(s.len(), 64),
                other => panic!("expected text cell, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_hash_column_date_uses_iso_form() {
        let date = CellValue::Date(NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
        let hashed = hash_column(&[date]);
        assert_eq!(hashed[0], CellValue::Text(sha256_hex("1990-05-17")));
    }
}
