//! Configuration schema types
//!
//! This module defines the configuration structure mapped from the TOML
//! file. Every section is optional and falls back to its defaults, so a
//! minimal deployment can run from an empty file.

use crate::config::secret::SecretString;
use crate::domain::entity::EntityCategory;
use crate::domain::errors::ShroudError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main Shroud configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShroudConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// NER inference settings
    #[serde(default)]
    pub ner: NerConfig,

    /// Entity analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShroudConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.ner.validate()?;
        self.analysis.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name used in logs
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ShroudError::Configuration(
                "server.host must not be empty".into(),
            ));
        }
        if self.port == 0 {
            return Err(ShroudError::Configuration(
                "server.port must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// NER inference settings
///
/// When disabled, the service runs with the pattern recognizer only; no
/// model calls are made. This is the development/test default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerConfig {
    /// Enable the NER-model-backed recognizer
    #[serde(default)]
    pub enabled: bool,

    /// Token-classification inference endpoint URL
    #[serde(default)]
    pub endpoint: String,

    /// Optional bearer token for the inference endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_ner_timeout")]
    pub timeout_seconds: u64,

    /// Model label to entity category mapping; defaults to PER/LOC when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_map: Option<HashMap<String, String>>,
}

impl NerConfig {
    fn validate(&self) -> Result<()> {
        if self.enabled {
            if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
                return Err(ShroudError::Configuration(format!(
                    "ner.endpoint must be an http(s) URL, got '{}'",
                    self.endpoint
                )));
            }
            if self.timeout_seconds == 0 {
                return Err(ShroudError::Configuration(
                    "ner.timeout_seconds must be non-zero".into(),
                ));
            }
        }
        // Label map targets must be allow-listed categories
        self.category_label_map()?;
        Ok(())
    }

    /// Resolve the configured label map into typed categories
    ///
    /// Returns `None` when no map is configured, leaving the recognizer on
    /// its built-in defaults.
    pub fn category_label_map(&self) -> Result<Option<HashMap<String, EntityCategory>>> {
        let Some(ref raw) = self.label_map else {
            return Ok(None);
        };

        let mut resolved = HashMap::with_capacity(raw.len());
        for (label, category) in raw {
            let category = EntityCategory::from_label(category).ok_or_else(|| {
                ShroudError::Configuration(format!(
                    "ner.label_map: '{category}' is not an allow-listed entity category"
                ))
            })?;
            resolved.insert(label.clone(), category);
        }
        Ok(Some(resolved))
    }
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            api_token: None,
            timeout_seconds: default_ner_timeout(),
            label_map: None,
        }
    }
}

/// Entity analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum confidence score for a span to survive detection
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f32,

    /// Path to a custom pattern library TOML file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_library: Option<PathBuf>,
}

impl AnalysisConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.score_threshold) {
            return Err(ShroudError::Configuration(format!(
                "analysis.score_threshold must be within [0, 1], got {}",
                self.score_threshold
            )));
        }
        if let Some(ref path) = self.pattern_library {
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(ShroudError::Configuration(format!(
                    "analysis.pattern_library must be a TOML file: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            score_threshold: default_score_threshold(),
            pattern_library: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Log file path
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: daily, hourly, or never
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        match self.local_rotation.as_str() {
            "daily" | "hourly" | "never" => Ok(()),
            other => Err(ShroudError::Configuration(format!(
                "logging.local_rotation must be daily, hourly or never, got '{other}'"
            ))),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

fn default_app_name() -> String {
    "shroud".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_ner_timeout() -> u64 {
    30
}

fn default_score_threshold() -> f32 {
    0.4
}

fn default_log_path() -> String {
    "logs/shroud.log".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = ShroudConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.application.log_level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ShroudConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.ner.enabled);
    }

    #[test]
    fn test_enabled_ner_requires_endpoint() {
        let config: ShroudConfig = toml::from_str(
            r#"
            [ner]
            enabled = true
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let config: ShroudConfig = toml::from_str(
            r#"
            [server]
            port = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_score_threshold_bounds() {
        let config: ShroudConfig = toml::from_str(
            r#"
            [analysis]
            score_threshold = 1.5
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_label_map_resolution() {
        let config: ShroudConfig = toml::from_str(
            r#"
            [ner.label_map]
            PER = "PERSON"
            LOC = "LOCATION"
            "#,
        )
        .unwrap();
        let resolved = config.ner.category_label_map().unwrap().unwrap();
        assert_eq!(resolved["PER"], EntityCategory::Person);
        assert_eq!(resolved["LOC"], EntityCategory::Location);
    }

    #[test]
    fn test_label_map_rejects_unknown_category() {
        let config: ShroudConfig = toml::from_str(
            r#"
            [ner.label_map]
            ORG = "ORGANIZATION"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_rotation_rejected() {
        let config: ShroudConfig = toml::from_str(
            r#"
            [logging]
            local_rotation = "weekly"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
