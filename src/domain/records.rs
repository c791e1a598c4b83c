//! Record-set model
//!
//! A [`RecordSet`] is an ordered sequence of rows, stored column-oriented
//! because transforms operate on whole columns at a time (binning and date
//! randomization need the full column's values up front). Column names never
//! change during anonymization, only values.

use crate::domain::errors::ShroudError;
use crate::domain::result::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// A single typed cell value
///
/// Columns are homogeneously typed per the declared [`DataType`]. Serialized
/// untagged in responses: dates as ISO `YYYY-MM-DD` strings, numbers as JSON
/// numbers, text as strings.
///
/// [`DataType`]: crate::domain::column::DataType
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Date(NaiveDate),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Canonical string form of the value, used for hashing
    ///
    /// Dates render as ISO `YYYY-MM-DD`, numbers via their `Display` form,
    /// text as-is. Stable across requests so identical inputs always hash
    /// to identical digests.
    pub fn canonical_string(&self) -> String {
        match self {
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}

/// Column-oriented record set with stable header order
///
/// # Examples
///
/// ```
/// use shroud::domain::records::{CellValue, RecordSet};
///
/// let records = RecordSet::from_columns(vec![
///     ("name".to_string(), vec![CellValue::Text("Alice".into())]),
///     ("age".to_string(), vec![CellValue::Number(34.0)]),
/// ]).unwrap();
///
/// assert_eq!(records.row_count(), 1);
/// assert!(records.contains_column("age"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    headers: Vec<String>,
    columns: HashMap<String, Vec<CellValue>>,
}

impl RecordSet {
    /// Build a record set from named columns
    ///
    /// # Errors
    ///
    /// Returns a validation error on duplicate column names or when columns
    /// have differing lengths.
    pub fn from_columns(named: Vec<(String, Vec<CellValue>)>) -> Result<Self> {
        let mut headers = Vec::with_capacity(named.len());
        let mut columns = HashMap::with_capacity(named.len());
        let mut row_count: Option<usize> = None;

        for (name, values) in named {
            if columns.contains_key(&name) {
                return Err(ShroudError::Validation(format!(
                    "Duplicate column name '{name}'"
                )));
            }
            match row_count {
                None => row_count = Some(values.len()),
                Some(expected) if expected != values.len() => {
                    return Err(ShroudError::Validation(format!(
                        "Column '{}' has {} rows, expected {}",
                        name,
                        values.len(),
                        expected
                    )));
                }
                Some(_) => {}
            }
            headers.push(name.clone());
            columns.insert(name, values);
        }

        Ok(Self { headers, columns })
    }

    /// Column names in their original order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.headers
            .first()
            .and_then(|h| self.columns.get(h))
            .map_or(0, Vec::len)
    }

    /// Whether the set has no rows
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Whether a column with the given name exists (case-sensitive)
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Values of a named column
    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Replace the values of an existing column
    ///
    /// # Errors
    ///
    /// Returns a validation error if the column does not exist or the
    /// replacement has a different row count.
    pub fn replace_column(&mut self, name: &str, values: Vec<CellValue>) -> Result<()> {
        let existing = self.columns.get_mut(name).ok_or_else(|| {
            ShroudError::Validation(format!("Column '{name}' not found in the record set"))
        })?;
        if existing.len() != values.len() {
            return Err(ShroudError::Validation(format!(
                "Replacement for column '{}' has {} rows, expected {}",
                name,
                values.len(),
                existing.len()
            )));
        }
        *existing = values;
        Ok(())
    }

    /// Row-oriented view for response serialization
    ///
    /// Each row is a JSON object mapping column name to value, columns in
    /// header order.
    pub fn to_rows(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        let mut rows = vec![serde_json::Map::new(); self.row_count()];
        for header in &self.headers {
            if let Some(values) = self.columns.get(header) {
                for (row, value) in rows.iter_mut().zip(values) {
                    let json = serde_json::to_value(value)
                        .unwrap_or_else(|_| serde_json::Value::Null);
                    row.insert(header.clone(), json);
                }
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        RecordSet::from_columns(vec![
            (
                "name".to_string(),
                vec![
                    CellValue::Text("Alice".into()),
                    CellValue::Text("Bob".into()),
                ],
            ),
            (
                "age".to_string(),
                vec![CellValue::Number(34.0), CellValue::Number(29.0)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_columns_preserves_header_order() {
        let records = sample();
        assert_eq!(records.headers(), &["name".to_string(), "age".to_string()]);
        assert_eq!(records.row_count(), 2);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = RecordSet::from_columns(vec![
            ("a".to_string(), vec![]),
            ("a".to_string(), vec![]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let result = RecordSet::from_columns(vec![
            ("a".to_string(), vec![CellValue::Number(1.0)]),
            ("b".to_string(), vec![]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_replace_column() {
        let mut records = sample();
        records
            .replace_column(
                "age",
                vec![
                    CellValue::Text("[20, 30)".into()),
                    CellValue::Text("[30, 40)".into()),
                ],
            )
            .unwrap();
        assert_eq!(
            records.column("age").unwrap()[0],
            CellValue::Text("[20, 30)".into())
        );
    }

    #[test]
    fn test_replace_unknown_column_fails() {
        let mut records = sample();
        let result = records.replace_column("missing", vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_replace_wrong_length_fails() {
        let mut records = sample();
        let result = records.replace_column("age", vec![CellValue::Number(1.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_to_rows() {
        let records = sample();
        let rows = records.to_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], serde_json::json!("Alice"));
        assert_eq!(rows[1]["age"], serde_json::json!(29.0));
    }

    #[test]
    fn test_cell_value_canonical_string() {
        let date = CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(date.canonical_string(), "2024-03-15");
        assert_eq!(CellValue::Number(42.5).canonical_string(), "42.5");
        assert_eq!(CellValue::Text("x".into()).canonical_string(), "x");
    }
}
