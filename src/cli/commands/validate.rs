//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Shroud configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Application: {}", config.application.name);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Bind Address: {}:{}", config.server.host, config.server.port);
        if config.ner.enabled {
            println!("  NER Inference: enabled ({})", config.ner.endpoint);
            println!("  Inference Timeout: {}s", config.ner.timeout_seconds);
        } else {
            println!("  NER Inference: disabled (pattern recognition only)");
        }
        println!("  Score Threshold: {}", config.analysis.score_threshold);
        match config.analysis.pattern_library {
            Some(ref path) => println!("  Pattern Library: {}", path.display()),
            None => println!("  Pattern Library: built-in"),
        }

        Ok(0)
    }
}
