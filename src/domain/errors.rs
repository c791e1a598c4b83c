//! Domain error types
//!
//! This module defines the error hierarchy for Shroud. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Shroud error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ShroudError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input validation errors (bad metadata, unknown columns, empty text)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Column transform errors
    #[error("Transform error: {0}")]
    Transform(String),

    /// CSV parsing/serialization errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// NER inference errors
    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// NER inference-specific errors
///
/// Errors that occur when calling the token-classification model.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the inference endpoint
    #[error("Failed to connect to inference endpoint: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response from the model
    #[error("Invalid response from model: {0}")]
    InvalidResponse(String),

    /// Request timeout
    #[error("Inference request timeout: {0}")]
    Timeout(String),

    /// Server error (5xx)
    #[error("Inference server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Inference client error: {status} - {message}")]
    ClientError { status: u16, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for ShroudError {
    fn from(err: std::io::Error) -> Self {
        ShroudError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ShroudError {
    fn from(err: serde_json::Error) -> Self {
        ShroudError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ShroudError {
    fn from(err: toml::de::Error) -> Self {
        ShroudError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv errors
impl From<csv::Error> for ShroudError {
    fn from(err: csv::Error) -> Self {
        ShroudError::Csv(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shroud_error_display() {
        let err = ShroudError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ShroudError::Validation("Column 'ssn' not found".to_string());
        assert_eq!(err.to_string(), "Validation error: Column 'ssn' not found");
    }

    #[test]
    fn test_inference_error_conversion() {
        let inference_err = InferenceError::ConnectionFailed("Network error".to_string());
        let shroud_err: ShroudError = inference_err.into();
        assert!(matches!(shroud_err, ShroudError::Inference(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let shroud_err: ShroudError = io_err.into();
        assert!(matches!(shroud_err, ShroudError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let shroud_err: ShroudError = json_err.into();
        assert!(matches!(shroud_err, ShroudError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let shroud_err: ShroudError = toml_err.into();
        assert!(matches!(shroud_err, ShroudError::Configuration(_)));
        assert!(shroud_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_shroud_error_implements_std_error() {
        let err = ShroudError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_inference_error_implements_std_error() {
        let err = InferenceError::Timeout("30s elapsed".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
