//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ShroudConfig;
use crate::config::secret::secret_string;
use crate::domain::errors::ShroudError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ShroudConfig`]
/// 4. Applies environment variable overrides (`SHROUD_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use shroud::config::load_config;
///
/// let config = load_config("shroud.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ShroudConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ShroudError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ShroudError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ShroudConfig = toml::from_str(&contents)
        .map_err(|e| ShroudError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate()?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched so commented-out placeholders don't
/// require the variable to be set.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ShroudError::Configuration(e.to_string()))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let substituted = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            match std::env::var(name) {
                Ok(value) => value,
                Err(_) => {
                    missing_vars.push(name.to_string());
                    String::new()
                }
            }
        });
        result.push_str(&substituted);
        result.push('\n');
    }

    if missing_vars.is_empty() {
        Ok(result)
    } else {
        Err(ShroudError::Configuration(format!(
            "Missing environment variables: {}",
            missing_vars.join(", ")
        )))
    }
}

/// Applies `SHROUD_*` environment variable overrides to a parsed config
fn apply_env_overrides(config: &mut ShroudConfig) -> Result<()> {
    if let Ok(val) = std::env::var("SHROUD_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("SHROUD_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("SHROUD_SERVER_PORT") {
        config.server.port = val.parse().map_err(|_| {
            ShroudError::Configuration(format!("Invalid SHROUD_SERVER_PORT value: {val}"))
        })?;
    }
    if let Ok(val) = std::env::var("SHROUD_NER_ENABLED") {
        config.ner.enabled = val.parse().map_err(|_| {
            ShroudError::Configuration(format!("Invalid SHROUD_NER_ENABLED value: {val}"))
        })?;
    }
    if let Ok(val) = std::env::var("SHROUD_NER_ENDPOINT") {
        config.ner.endpoint = val;
    }
    if let Ok(val) = std::env::var("SHROUD_NER_API_TOKEN") {
        config.ner.api_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SHROUD_ANALYSIS_SCORE_THRESHOLD") {
        config.analysis.score_threshold = val.parse().map_err(|_| {
            ShroudError::Configuration(format!(
                "Invalid SHROUD_ANALYSIS_SCORE_THRESHOLD value: {val}"
            ))
        })?;
    }
    Ok(())
}
