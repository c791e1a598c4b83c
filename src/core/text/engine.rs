//! Entity analysis engine
//!
//! Merges the results of all configured recognizers into a single span list:
//! low-score spans are dropped, categories are filtered against the
//! allow-list, and overlapping spans are resolved so redaction sees a
//! non-overlapping, start-ordered sequence.

use crate::core::text::recognizer::Recognizer;
use crate::domain::entity::{EntityCategory, EntitySpan};
use crate::domain::result::Result;
use std::collections::HashSet;
use std::sync::Arc;

/// Combined entity detection over multiple recognizers
///
/// # Thread Safety
///
/// The engine is constructed once at startup and shared read-only across
/// requests via `Arc`; recognizers are `Send + Sync`.
pub struct AnalysisEngine {
    recognizers: Vec<Arc<dyn Recognizer>>,
    allowed: HashSet<EntityCategory>,
    score_threshold: f32,
}

impl AnalysisEngine {
    /// Create an engine over the given recognizers
    ///
    /// Defaults to the full category allow-list and no score threshold.
    pub fn new(recognizers: Vec<Arc<dyn Recognizer>>) -> Self {
        Self {
            recognizers,
            allowed: EntityCategory::ALL.into_iter().collect(),
            score_threshold: 0.0,
        }
    }

    /// Restrict detection to a subset of the allow-list
    pub fn with_allowed_categories(mut self, categories: &[EntityCategory]) -> Self {
        self.allowed = categories.iter().copied().collect();
        self
    }

    /// Drop spans scoring below the threshold
    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Detect entity spans in the given text
    ///
    /// Runs every recognizer, filters to allow-listed categories at or above
    /// the score threshold, and resolves overlaps (higher score wins; ties go
    /// to the earlier, then longer, span). The returned spans are sorted by
    /// start offset and never overlap.
    pub async fn detect(&self, text: &str) -> Result<Vec<EntitySpan>> {
        let mut spans = Vec::new();

        for recognizer in &self.recognizers {
            let detected = recognizer.recognize(text).await?;
            tracing::debug!(
                recognizer = recognizer.name(),
                count = detected.len(),
                "Recognizer finished"
            );
            spans.extend(detected);
        }

        spans.retain(|span| {
            !span.is_empty()
                && span.score >= self.score_threshold
                && self.allowed.contains(&span.category)
        });

        Ok(resolve_overlaps(spans))
    }
}

/// Keep the best span from each overlapping group
fn resolve_overlaps(mut spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
    spans.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.start.cmp(&b.start))
            .then(b.len().cmp(&a.len()))
    });

    let mut kept: Vec<EntitySpan> = Vec::with_capacity(spans.len());
    for span in spans {
        if !kept.iter().any(|existing| existing.overlaps(&span)) {
            kept.push(span);
        }
    }

    kept.sort_by_key(|span| span.start);
    kept
}
