//! CSV record-set adapter
//!
//! Reads an uploaded CSV into a typed [`RecordSet`], parsing columns
//! declared `date` or `number` in the request metadata into their typed
//! form. Columns with an empty header name (index artifacts of spreadsheet
//! exports) are dropped.

use crate::domain::column::{ColumnMetadata, DataType};
use crate::domain::errors::ShroudError;
use crate::domain::records::{CellValue, RecordSet};
use crate::domain::result::Result;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Date formats accepted for columns declared `date`
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse CSV bytes into a typed record set
///
/// The first record is treated as the header row. Cell typing follows the
/// declared metadata: `date` columns parse to `NaiveDate`, `number` columns
/// to `f64`, everything else stays text.
///
/// # Errors
///
/// Returns a CSV error for malformed input and a validation error naming
/// column and row for cells that don't parse as their declared type.
pub fn read_records(data: &[u8], metadata: &[ColumnMetadata]) -> Result<RecordSet> {
    let mut reader = csv::Reader::from_reader(data);
    let headers = reader.headers()?.clone();

    let declared: HashMap<&str, DataType> = metadata
        .iter()
        .map(|m| (m.name.as_str(), m.data_type))
        .collect();

    // Keep (source index, name) for every non-empty header
    let kept: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.trim().is_empty())
        .map(|(index, name)| (index, name.to_string()))
        .collect();

    let mut columns: Vec<(String, Vec<CellValue>)> = kept
        .iter()
        .map(|(_, name)| (name.clone(), Vec::new()))
        .collect();

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        for (slot, (index, name)) in kept.iter().enumerate() {
            let raw = record.get(*index).unwrap_or("");
            let value = parse_cell(raw, declared.get(name.as_str()).copied(), name, row)?;
            columns[slot].1.push(value);
        }
    }

    RecordSet::from_columns(columns)
}

/// Parse a single cell according to its column's declared type
fn parse_cell(
    raw: &str,
    declared: Option<DataType>,
    column: &str,
    row: usize,
) -> Result<CellValue> {
    match declared {
        Some(DataType::Date) => parse_date(raw).ok_or_else(|| {
            ShroudError::Validation(format!(
                "column '{column}' row {row}: '{raw}' is not a valid date"
            ))
        }),
        Some(DataType::Number) => raw.trim().parse::<f64>().map(CellValue::Number).map_err(|_| {
            ShroudError::Validation(format!(
                "column '{column}' row {row}: '{raw}' is not a valid number"
            ))
        }),
        Some(DataType::String) | None => Ok(CellValue::Text(raw.to_string())),
    }
}

fn parse_date(raw: &str) -> Option<CellValue> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(CellValue::Date)
}
