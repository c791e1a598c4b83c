//! Pattern library for regex-based entity recognition

use crate::core::text::recognizer::Recognizer;
use crate::domain::entity::{DetectionSource, EntityCategory, EntitySpan};
use crate::domain::result::Result as ShroudResult;
use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Regex patterns for this category
    pub patterns: Vec<String>,
    /// Confidence score (0.0 - 1.0)
    pub score: f32,
    /// Entity category label
    pub category: String,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Compiled regex
    pub regex: Regex,
    /// Entity category
    pub category: EntityCategory,
    /// Confidence score
    pub score: f32,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: HashMap<String, PatternDefinition>,
}

/// Compiled registry of entity patterns
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut patterns = Vec::new();

        for (name, def) in library.patterns {
            let category = EntityCategory::from_label(&def.category).with_context(|| {
                format!("Unknown category in pattern '{}': {}", name, def.category)
            })?;

            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str)
                    .with_context(|| format!("Invalid regex in pattern '{name}': {pattern_str}"))?;

                patterns.push(CompiledPattern {
                    regex,
                    category,
                    score: def.score,
                });
            }
        }

        Ok(Self { patterns })
    }

    /// Create the default registry with built-in patterns
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../patterns/entity_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Get all compiled patterns
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }
}

/// Regex-based entity recognizer
///
/// Plays the role of a general-purpose analyzer for structured categories
/// (email addresses, SSNs, credit cards, ...) that regular expressions can
/// detect without a model.
pub struct PatternRecognizer {
    registry: Arc<PatternRegistry>,
}

impl PatternRecognizer {
    /// Create a recognizer with the built-in pattern library
    pub fn new() -> Result<Self> {
        Ok(Self {
            registry: Arc::new(PatternRegistry::default_patterns()?),
        })
    }

    /// Create a recognizer with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

#[async_trait]
impl Recognizer for PatternRecognizer {
    fn name(&self) -> &'static str {
        "pattern"
    }

    async fn recognize(&self, text: &str) -> ShroudResult<Vec<EntitySpan>> {
        let mut spans = Vec::new();

        for pattern in self.registry.all_patterns() {
            for matched in pattern.regex.find_iter(text) {
                spans.push(EntitySpan::new(
                    pattern.category,
                    matched.start(),
                    matched.end(),
                    pattern.score,
                    DetectionSource::Pattern,
                ));
            }
        }

        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_detect_email() {
        let recognizer = PatternRecognizer::new().unwrap();
        let spans = recognizer
            .recognize("Contact: john.doe@example.com")
            .await
            .unwrap();

        assert!(spans
            .iter()
            .any(|s| s.category == EntityCategory::EmailAddress));
    }

    #[tokio::test]
    async fn test_detect_ssn() {
        let recognizer = PatternRecognizer::new().unwrap();
        let spans = recognizer.recognize("SSN: 123-45-6789").await.unwrap();

        let ssn = spans
            .iter()
            .find(|s| s.category == EntityCategory::UsSsn)
            .expect("SSN span");
        assert_eq!(&"SSN: 123-45-6789"[ssn.start..ssn.end], "123-45-6789");
    }

    #[tokio::test]
    async fn test_detect_phone() {
        let recognizer = PatternRecognizer::new().unwrap();
        let spans = recognizer.recognize("Call (555) 123-4567").await.unwrap();

        assert!(spans
            .iter()
            .any(|s| s.category == EntityCategory::PhoneNumber));
    }

    #[tokio::test]
    async fn test_no_match_in_plain_text() {
        let recognizer = PatternRecognizer::new().unwrap();
        let spans = recognizer.recognize("hello world").await.unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let toml = r#"
            [patterns.bad]
            category = "NOT_A_CATEGORY"
            score = 0.5
            patterns = ['x']
        "#;
        assert!(PatternRegistry::from_toml(toml).is_err());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let toml = r#"
            [patterns.bad]
            category = "URL"
            score = 0.5
            patterns = ['[']
        "#;
        assert!(PatternRegistry::from_toml(toml).is_err());
    }
}
