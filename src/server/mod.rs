//! HTTP transport layer
//!
//! Thin axum wiring over the core anonymization engines. All policy lives in
//! [`crate::core`]; this module only parses requests, shapes responses, and
//! holds the process-wide engine state.

pub mod routes;

use crate::adapters::HttpTokenClassifier;
use crate::config::ShroudConfig;
use crate::core::text::{
    AnalysisEngine, NerRecognizer, PatternRecognizer, PatternRegistry, Recognizer,
};
use crate::core::transform::ColumnTransformer;
use crate::core::{TabularAnonymizer, TextAnonymizer};
use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
///
/// The engines are expensive to initialize (pattern compilation, model
/// client setup) and are created exactly once per process, then shared
/// read-only across concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub tabular: Arc<TabularAnonymizer>,
    pub text: Arc<TextAnonymizer>,
}

impl AppState {
    /// Assemble the engine state from configuration
    ///
    /// Builds the pattern recognizer (custom library or built-in patterns),
    /// the NER-model recognizer when enabled, and the orchestrators sharing
    /// one analysis engine.
    pub fn from_config(config: &ShroudConfig) -> Result<Self> {
        let pattern: Arc<dyn Recognizer> =
            if let Some(ref pattern_path) = config.analysis.pattern_library {
                let registry = PatternRegistry::from_file(pattern_path)?;
                Arc::new(PatternRecognizer::with_registry(registry))
            } else {
                Arc::new(PatternRecognizer::new()?)
            };

        let mut recognizers: Vec<Arc<dyn Recognizer>> = vec![pattern];

        if config.ner.enabled {
            let classifier = Arc::new(
                HttpTokenClassifier::new(&config.ner)
                    .context("Failed to initialize NER inference client")?,
            );
            let recognizer = match config.ner.category_label_map()? {
                Some(label_map) => NerRecognizer::with_label_map(classifier, label_map),
                None => NerRecognizer::new(classifier),
            };
            recognizers.push(Arc::new(recognizer));
        } else {
            tracing::warn!("NER inference disabled, running with pattern recognition only");
        }

        let analysis = Arc::new(
            AnalysisEngine::new(recognizers)
                .with_score_threshold(config.analysis.score_threshold),
        );

        Ok(Self {
            tabular: Arc::new(TabularAnonymizer::new(ColumnTransformer::new(
                Arc::clone(&analysis),
            ))),
            text: Arc::new(TextAnonymizer::new(analysis)),
        })
    }
}

/// Build the application router
///
/// CORS is deliberately permissive (all origins, methods and headers); this
/// is a deployment choice preserved from the service's public-frontend
/// setup.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(routes::liveness))
        .route("/anonymize/csv", post(routes::anonymize_csv))
        .route("/anonymize/text", post(routes::anonymize_text))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

/// Run the HTTP server until the shutdown future resolves
pub async fn serve(
    config: &ShroudConfig,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state);

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    tracing::info!(address = %address, "Shroud API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server terminated abnormally")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_default_config() {
        let config = ShroudConfig::default();
        assert!(AppState::from_config(&config).is_ok());
    }

    #[test]
    fn test_state_with_ner_enabled() {
        let mut config = ShroudConfig::default();
        config.ner.enabled = true;
        config.ner.endpoint = "https://inference.example.com/models/ner".to_string();
        assert!(AppState::from_config(&config).is_ok());
    }

    #[test]
    fn test_router_builds() {
        let state = AppState::from_config(&ShroudConfig::default()).unwrap();
        let _app = router(state);
    }
}
