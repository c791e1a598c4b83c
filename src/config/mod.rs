//! Configuration management for Shroud.
//!
//! TOML-based configuration loading, parsing, and validation with support
//! for environment variable substitution (`${VAR_NAME}`) and `SHROUD_*`
//! overrides.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! name = "shroud"
//! log_level = "info"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [ner]
//! enabled = true
//! endpoint = "https://api-inference.huggingface.co/models/dslim/bert-base-NER"
//! api_token = "${SHROUD_NER_API_TOKEN}"
//! timeout_seconds = 30
//!
//! [analysis]
//! score_threshold = 0.4
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    AnalysisConfig, ApplicationConfig, LoggingConfig, NerConfig, ServerConfig, ShroudConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
