// Shroud - Privacy Anonymization Service
// Copyright (c) 2026 Shroud Contributors
// Licensed under the MIT License

//! # Shroud - Privacy Anonymization Service
//!
//! Shroud anonymizes tabular (CSV) and free-text data by classifying each
//! field's sensitivity and applying a transformation appropriate to that
//! sensitivity level.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Classifying** columns by data type and sensitivity
//! - **Transforming** column values (hash, generalize, perturb, mask)
//! - **Detecting** entity spans in free text via patterns and an NER model
//! - **Redacting** detected spans with category markers
//!
//! ## Architecture
//!
//! Shroud follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (column transforms, tabular and text orchestration)
//! - [`adapters`] - External integrations (CSV I/O, NER inference)
//! - [`server`] - HTTP transport (axum routes over the core engines)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shroud::config::ShroudConfig;
//! use shroud::server::AppState;
//! use shroud::domain::{ColumnMetadata, DataType, SensitivityType};
//! use shroud::adapters::csv::read_records;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ShroudConfig::default();
//! let state = AppState::from_config(&config)?;
//!
//! let metadata = vec![
//!     ColumnMetadata::new("ssn", DataType::String, SensitivityType::Identifier),
//! ];
//! let records = read_records(b"ssn\n123-45-6789\n", &metadata)?;
//!
//! let anonymized = state.tabular.anonymize(&records, &metadata).await?;
//! println!("{} rows anonymized", anonymized.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Transform Policy
//!
//! The transform applied to a column is a pure function of its declared
//! data type and sensitivity:
//!
//! | data type | identifier | insensitive | quasi-identifier | sensitive |
//! |-----------|------------|-------------|------------------|-----------|
//! | date      | SHA-256    | unchanged   | first of month   | random in range |
//! | number    | SHA-256    | unchanged   | 5 equal-width bins | Gaussian noise |
//! | string    | SHA-256    | unchanged   | entity generalization | mask |
//!
//! ## Error Handling
//!
//! Shroud uses the [`domain::ShroudError`] type for all errors:
//!
//! ```rust,no_run
//! use shroud::domain::{Result, ShroudError};
//!
//! fn example() -> Result<()> {
//!     let config = shroud::config::load_config("shroud.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Shroud uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting service");
//! warn!(column = "ssn", "Column has no metadata");
//! error!(error = "timeout", "Inference call failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
