//! Column transform engine
//!
//! Maps a (data type, sensitivity) pair to a concrete transformation over a
//! whole column of values. Dispatch is an exhaustive match over the two
//! closed enums, so an unsupported combination cannot exist at runtime.
//!
//! | data type | identifier | insensitive | quasi-identifier | sensitive |
//! |-----------|------------|-------------|------------------|-----------|
//! | date      | hash       | unchanged   | first of month   | random in range |
//! | number    | hash       | unchanged   | 5 equal-width bins | Gaussian noise |
//! | string    | hash       | unchanged   | entity generalization | mask |

pub mod date;
pub mod hash;
pub mod number;
pub mod text;

use crate::core::text::AnalysisEngine;
use crate::domain::column::{DataType, SensitivityType};
use crate::domain::records::CellValue;
use crate::domain::result::Result;
use std::sync::Arc;

/// Column transform engine
///
/// String generalization runs named-entity tokenization, so the transformer
/// holds a shared handle to the analysis engine; every other transform is a
/// pure function of the column's own values.
pub struct ColumnTransformer {
    analysis: Arc<AnalysisEngine>,
}

impl ColumnTransformer {
    /// Create a transformer sharing the given analysis engine
    pub fn new(analysis: Arc<AnalysisEngine>) -> Self {
        Self { analysis }
    }

    /// Transform a whole column of values
    ///
    /// Transforms operate on whole columns rather than row-by-row because
    /// binning and date randomization need the column's full value range up
    /// front.
    pub async fn transform(
        &self,
        values: &[CellValue],
        data_type: DataType,
        sensitivity: SensitivityType,
    ) -> Result<Vec<CellValue>> {
        match data_type {
            DataType::Date => date::transform(values, sensitivity),
            DataType::Number => number::transform(values, sensitivity),
            DataType::String => text::transform(values, sensitivity, &self.analysis).await,
        }
    }
}
