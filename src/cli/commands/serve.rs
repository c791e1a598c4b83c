//! Serve command implementation
//!
//! Runs the anonymization HTTP service until a shutdown signal arrives.

use crate::config::load_config;
use crate::server;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the configured bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the configured bind port
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        tracing::info!(
            host = %config.server.host,
            port = config.server.port,
            ner_enabled = config.ner.enabled,
            "Starting anonymization service"
        );

        let shutdown = async move {
            // Wait for the signal handler to flip the flag
            while shutdown_signal.changed().await.is_ok() {
                if *shutdown_signal.borrow() {
                    break;
                }
            }
            tracing::info!("Shutdown signal received, draining connections");
        };

        server::serve(&config, shutdown).await?;

        tracing::info!("Service stopped");
        Ok(0)
    }
}
