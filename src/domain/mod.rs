//! Domain models and types for Shroud.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Column classification** ([`ColumnMetadata`], [`DataType`], [`SensitivityType`])
//! - **Record sets** ([`RecordSet`], [`CellValue`])
//! - **Entity spans** ([`EntitySpan`], [`EntityCategory`])
//! - **Error types** ([`ShroudError`], [`InferenceError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ShroudError>`]:
//!
//! ```rust
//! use shroud::domain::{Result, ShroudError};
//!
//! fn example(text: &str) -> Result<()> {
//!     if text.trim().is_empty() {
//!         return Err(ShroudError::Validation("Text cannot be empty".into()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod column;
pub mod entity;
pub mod errors;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use column::{ColumnMetadata, DataType, SensitivityType};
pub use entity::{DetectionSource, EntityCategory, EntitySpan};
pub use errors::{InferenceError, ShroudError};
pub use records::{CellValue, RecordSet};
pub use result::Result;
