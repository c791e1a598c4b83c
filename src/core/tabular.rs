//! Tabular anonymization orchestrator
//!
//! Validates that every requested column exists, then applies the column
//! transform engine per column in the caller-supplied metadata order. The
//! transformed record set is committed all-or-nothing: a failure on any
//! column discards the whole result, so partially anonymized data is never
//! returned.

use crate::core::transform::ColumnTransformer;
use crate::domain::column::ColumnMetadata;
use crate::domain::errors::ShroudError;
use crate::domain::records::RecordSet;
use crate::domain::result::Result;

/// Tabular anonymization orchestrator
pub struct TabularAnonymizer {
    transformer: ColumnTransformer,
}

impl TabularAnonymizer {
    /// Create a new orchestrator over the given transform engine
    pub fn new(transformer: ColumnTransformer) -> Self {
        Self { transformer }
    }

    /// Anonymize a record set according to the given column metadata
    ///
    /// Columns are processed in metadata order; each transform reads and
    /// writes only its own column.
    ///
    /// # Errors
    ///
    /// Fails fast with a validation error naming the first metadata entry
    /// whose column is absent from the record set, before any transformation
    /// runs. Transform failures abort the request; the input record set is
    /// never partially modified.
    pub async fn anonymize(
        &self,
        records: &RecordSet,
        metadata: &[ColumnMetadata],
    ) -> Result<RecordSet> {
        // Validate every referenced column up front
        for column in metadata {
            if !records.contains_column(&column.name) {
                return Err(ShroudError::Validation(format!(
                    "Column '{}' not found in the CSV file",
                    column.name
                )));
            }
        }

        tracing::info!(
            columns = metadata.len(),
            rows = records.row_count(),
            "Anonymizing record set"
        );

        let mut anonymized = records.clone();
        for column in metadata {
            let values = anonymized.column(&column.name).ok_or_else(|| {
                ShroudError::Validation(format!(
                    "Column '{}' not found in the CSV file",
                    column.name
                ))
            })?;

            let transformed = self
                .transformer
                .transform(values, column.data_type, column.sensitivity_type)
                .await
                .map_err(|e| contextualize(column, e))?;

            anonymized.replace_column(&column.name, transformed)?;
            tracing::debug!(column = %column, "Column transformed");
        }

        Ok(anonymized)
    }
}

/// Prefix transform/validation failures with the failing column's name
fn contextualize(column: &ColumnMetadata, error: ShroudError) -> ShroudError {
    match error {
        ShroudError::Transform(msg) => {
            ShroudError::Transform(format!("column '{}': {}", column.name, msg))
        }
        ShroudError::Validation(msg) => {
            ShroudError::Validation(format!("column '{}': {}", column.name, msg))
        }
        other => other,
    }
}
