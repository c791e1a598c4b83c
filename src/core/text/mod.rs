//! Free-text entity anonymization
//!
//! Detection merges two recognizers against the allow-listed category set: a
//! regex pattern recognizer for structured identifiers and an
//! NER-model-backed recognizer for natural-language entities. Redaction
//! replaces the surviving spans with category markers.

pub mod engine;
pub mod patterns;
pub mod recognizer;
pub mod redaction;

pub use engine::AnalysisEngine;
pub use patterns::{PatternRecognizer, PatternRegistry};
pub use recognizer::{NerRecognizer, Recognizer, TokenClassifier, TokenSpan};
pub use redaction::RedactionEngine;

use crate::domain::entity::EntitySpan;
use crate::domain::result::Result;
use std::sync::Arc;

/// Text anonymization orchestrator
///
/// Runs entity detection over free text and delegates span replacement to
/// the redaction engine. Constructed once at startup and shared read-only
/// across requests.
pub struct TextAnonymizer {
    analysis: Arc<AnalysisEngine>,
    redaction: RedactionEngine,
}

impl TextAnonymizer {
    /// Create a new text anonymizer over the given analysis engine
    pub fn new(analysis: Arc<AnalysisEngine>) -> Self {
        Self {
            analysis,
            redaction: RedactionEngine::new(),
        }
    }

    /// Detect allow-listed entity spans in the given text
    pub async fn detect(&self, text: &str) -> Result<Vec<EntitySpan>> {
        self.analysis.detect(text).await
    }

    /// Anonymize the given text
    ///
    /// Detection followed by redaction. Text with no detectable entities is
    /// returned unchanged.
    pub async fn anonymize(&self, text: &str) -> Result<String> {
        let spans = self.analysis.detect(text).await?;
        if spans.is_empty() {
            tracing::debug!("No entities detected, returning text unchanged");
            return Ok(text.to_string());
        }

        tracing::info!(spans = spans.len(), "Redacting detected entity spans");
        self.redaction.redact(text, &spans)
    }
}
