//! Entity recognizers
//!
//! Provides the trait-based recognition interface plus the NER-model-backed
//! recognizer. The model itself is an opaque capability behind the
//! [`TokenClassifier`] trait; production code wires in the HTTP inference
//! adapter, tests substitute an in-memory double.

use crate::domain::entity::{DetectionSource, EntityCategory, EntitySpan};
use crate::domain::result::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Trait for entity recognition implementations
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Detect entity spans in free text
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>>;
}

/// A raw labeled span as produced by the token-classification model
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan {
    /// Model-specific label (e.g. `PER`, `LOC`, `ORG`, `MISC`)
    pub label: String,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Model confidence (0.0 - 1.0)
    pub score: f32,
}

/// Opaque token-classification capability
///
/// Implementations are expected to be expensive to initialize and are
/// constructed once per process; they must be safe for concurrent read-only
/// use (`Send + Sync`). Implementations that wrap a model which is not safe
/// for concurrent invocation must serialize access internally.
#[async_trait]
pub trait TokenClassifier: Send + Sync {
    /// Classify token spans in the given text
    async fn classify(&self, text: &str) -> Result<Vec<TokenSpan>>;
}

/// NER-model-backed recognizer
///
/// Maps model-specific labels to allow-listed entity categories. Spans whose
/// label has no mapping are discarded, as are spans tagged with one of the
/// ignore labels (`O` and `MISC` by default).
pub struct NerRecognizer {
    classifier: Arc<dyn TokenClassifier>,
    label_map: HashMap<String, EntityCategory>,
    ignore_labels: HashSet<String>,
}

impl NerRecognizer {
    /// Create a recognizer with the default label mapping
    ///
    /// Defaults map the aggregated labels of common token-classification
    /// models: `PER` to PERSON and `LOC` to LOCATION. `ORG` has no
    /// allow-list counterpart and is dropped by the no-mapping rule.
    pub fn new(classifier: Arc<dyn TokenClassifier>) -> Self {
        let label_map = HashMap::from([
            ("PER".to_string(), EntityCategory::Person),
            ("LOC".to_string(), EntityCategory::Location),
        ]);
        Self::with_label_map(classifier, label_map)
    }

    /// Create a recognizer with a custom label mapping
    pub fn with_label_map(
        classifier: Arc<dyn TokenClassifier>,
        label_map: HashMap<String, EntityCategory>,
    ) -> Self {
        Self {
            classifier,
            label_map,
            ignore_labels: HashSet::from(["O".to_string(), "MISC".to_string()]),
        }
    }
}

#[async_trait]
impl Recognizer for NerRecognizer {
    fn name(&self) -> &'static str {
        "ner_model"
    }

    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>> {
        let predicted = self.classifier.classify(text).await?;

        let spans = predicted
            .into_iter()
            .filter(|token| !self.ignore_labels.contains(&token.label))
            .filter_map(|token| {
                self.label_map.get(&token.label).map(|category| {
                    EntitySpan::new(
                        *category,
                        token.start,
                        token.end,
                        token.score,
                        DetectionSource::NerModel,
                    )
                })
            })
            .collect();

        Ok(spans)
    }
}
