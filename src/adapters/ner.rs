//! HTTP NER inference adapter
//!
//! Implements the [`TokenClassifier`] capability against a remote
//! token-classification inference endpoint (HuggingFace-style API:
//! `{"inputs": text}` in, aggregated entity groups out). The model itself is
//! opaque to the core; this adapter only translates the wire format and
//! classifies transport failures into domain errors.

use crate::config::schema::NerConfig;
use crate::config::SecretString;
use crate::core::text::{TokenClassifier, TokenSpan};
use crate::domain::errors::InferenceError;
use crate::domain::result::Result as ShroudResult;
use anyhow::{Context, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;

/// Raw span as returned by the inference endpoint
#[derive(Debug, Deserialize)]
struct RawTokenSpan {
    entity_group: String,
    score: f32,
    start: usize,
    end: usize,
}

/// Token classifier backed by a remote inference service
///
/// Constructed once at startup; the underlying `reqwest::Client` is safe for
/// concurrent use, so no additional locking is needed around inference
/// calls.
pub struct HttpTokenClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<SecretString>,
}

impl HttpTokenClassifier {
    /// Create a classifier from configuration
    pub fn new(config: &NerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build inference HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
        })
    }

    fn classify_send_error(&self, err: reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            InferenceError::Timeout(err.to_string())
        } else {
            InferenceError::ConnectionFailed(err.to_string())
        }
    }
}

#[async_trait]
impl TokenClassifier for HttpTokenClassifier {
    async fn classify(&self, text: &str) -> ShroudResult<Vec<TokenSpan>> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }));

        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(InferenceError::AuthenticationFailed(format!(
                "inference endpoint returned {status}"
            ))
            .into());
        }
        if status.is_server_error() {
            return Err(InferenceError::ServerError {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }
            .into());
        }
        if status.is_client_error() {
            return Err(InferenceError::ClientError {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }
            .into());
        }

        let raw: Vec<RawTokenSpan> = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        Ok(raw
            .into_iter()
            .map(|span| TokenSpan {
                label: span.entity_group,
                start: span.start,
                end: span.end,
                score: span.score,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: String) -> NerConfig {
        NerConfig {
            enabled: true,
            endpoint,
            api_token: None,
            timeout_seconds: 5,
            label_map: None,
        }
    }

    #[tokio::test]
    async fn test_classify_parses_entity_groups() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/ner")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"entity_group": "PER", "score": 0.998, "word": "John", "start": 0, "end": 4},
                    {"entity_group": "LOC", "score": 0.991, "word": "Berlin", "start": 14, "end": 20}
                ]"#,
            )
            .create_async()
            .await;

        let classifier =
            HttpTokenClassifier::new(&config(format!("{}/models/ner", server.url()))).unwrap();
        let spans = classifier.classify("John lives in Berlin").await.unwrap();

        mock.assert_async().await;
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].label, "PER");
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].end, 4);
        assert_eq!(spans[1].label, "LOC");
    }

    #[tokio::test]
    async fn test_classify_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/ner")
            .with_status(503)
            .with_body("model loading")
            .create_async()
            .await;

        let classifier =
            HttpTokenClassifier::new(&config(format!("{}/models/ner", server.url()))).unwrap();
        let error = classifier.classify("text").await.unwrap_err();
        assert!(error.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_classify_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/ner")
            .with_status(401)
            .create_async()
            .await;

        let classifier =
            HttpTokenClassifier::new(&config(format!("{}/models/ner", server.url()))).unwrap();
        let error = classifier.classify("text").await.unwrap_err();
        assert!(error.to_string().contains("Authentication failed"));
    }

    #[tokio::test]
    async fn test_classify_invalid_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/ner")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let classifier =
            HttpTokenClassifier::new(&config(format!("{}/models/ner", server.url()))).unwrap();
        let error = classifier.classify("text").await.unwrap_err();
        assert!(error.to_string().contains("Invalid response"));
    }
}
