//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "shroud.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Shroud configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point ner.endpoint at a token-classification inference service");
                println!("  3. Set SHROUD_NER_API_TOKEN if the endpoint requires auth");
                println!("  4. Validate configuration: shroud validate-config");
                println!("  5. Start the service: shroud serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the starter configuration
    fn generate_config() -> String {
        r#"# Shroud Configuration File
# Privacy anonymization service for tabular and free-text data

[application]
name = "shroud"
log_level = "info"

[server]
host = "0.0.0.0"
port = 8000

[ner]
# Enable the NER-model-backed recognizer. When disabled, only the regex
# pattern recognizer runs (no model calls).
enabled = true
endpoint = "https://api-inference.huggingface.co/models/dslim/bert-base-NER"
# api_token = "${SHROUD_NER_API_TOKEN}"
timeout_seconds = 30

# Model label to entity category mapping. Labels without a mapping are
# discarded.
[ner.label_map]
PER = "PERSON"
LOC = "LOCATION"

[analysis]
# Spans scoring below the threshold are dropped.
score_threshold = 0.4
# pattern_library = "patterns/entity_patterns.toml"

[logging]
local_enabled = false
local_path = "logs/shroud.log"
local_rotation = "daily"
"#
        .to_string()
    }
}
