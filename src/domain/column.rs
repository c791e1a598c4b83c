//! Column classification model
//!
//! Value objects describing a record-set column: its name, data type, and
//! sensitivity class. Metadata is supplied per anonymization request as JSON
//! and is immutable once parsed; unknown enum values fail at parse time
//! because both enums are closed.

use serde::{Deserialize, Serialize};

/// Data type of a record-set column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Calendar dates (parsed to `NaiveDate`)
    Date,
    /// Numeric values (parsed to `f64`)
    Number,
    /// Free-form text
    String,
}

/// Sensitivity classification of a column
///
/// Determines which transform family is applied to the column's values:
///
/// - `Identifier` - directly identifies an individual; always irreversibly hashed
/// - `Insensitive` - no privacy risk; passed through unchanged
/// - `QuasiIdentifier` - identifying in combination with others; generalized
/// - `Sensitive` - confidential value; perturbed or masked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SensitivityType {
    Identifier,
    Insensitive,
    QuasiIdentifier,
    Sensitive,
}

/// Per-column anonymization metadata
///
/// Parsed from the `column_metadata` JSON array of an anonymization request:
///
/// ```json
/// {"name": "ssn", "dataType": "string", "sensitivityType": "identifier"}
/// ```
///
/// The name must match an existing record-set column (case-sensitive); this
/// is validated by the tabular orchestrator before any transformation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColumnMetadata {
    /// Column name, case-sensitive
    pub name: String,
    /// Declared data type of the column's values
    pub data_type: DataType,
    /// Sensitivity classification driving the transform choice
    pub sensitivity_type: SensitivityType,
}

impl ColumnMetadata {
    /// Create new column metadata
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        sensitivity_type: SensitivityType,
    ) -> Self {
        Self {
            name: name.into(),
            data_type,
            sensitivity_type,
        }
    }
}

impl std::fmt::Display for ColumnMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:?}/{:?})",
            self.name, self.data_type, self.sensitivity_type
        )
    }
}
