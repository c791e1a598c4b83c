//! Span redaction
//!
//! Replaces detected entity spans with `[CATEGORY]` markers. Replacements are
//! applied back-to-front so earlier offsets stay valid as the text shrinks
//! or grows.

use crate::domain::entity::EntitySpan;
use crate::domain::errors::ShroudError;
use crate::domain::result::Result;

/// Redaction engine replacing entity spans with category markers
pub struct RedactionEngine;

impl RedactionEngine {
    /// Create a new redaction engine
    pub fn new() -> Self {
        Self
    }

    /// Replace each span in `text` with its category marker
    ///
    /// Expects spans sorted by start offset and non-overlapping, as produced
    /// by the analysis engine.
    ///
    /// # Errors
    ///
    /// Returns a transform error if a span is out of bounds or does not fall
    /// on UTF-8 character boundaries.
    pub fn redact(&self, text: &str, spans: &[EntitySpan]) -> Result<String> {
        let mut result = text.to_string();

        for span in spans.iter().rev() {
            if span.end > text.len()
                || !text.is_char_boundary(span.start)
                || !text.is_char_boundary(span.end)
            {
                return Err(ShroudError::Transform(format!(
                    "span {}..{} is not a valid range of the input text",
                    span.start, span.end
                )));
            }
            result.replace_range(span.start..span.end, &format!("[{}]", span.category.label()));
        }

        Ok(result)
    }
}

impl Default for RedactionEngine {
    fn default() -> Self {
        Self::new()
    }
}
