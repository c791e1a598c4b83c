//! String column transforms
//!
//! - Identifier: deterministic hash of the UTF-8 bytes
//! - Insensitive: pass through unchanged
//! - Quasi-identifier: generalize via entity tokenization - every token
//!   covered by a detected entity span is replaced with the span's category
//!   label, other tokens keep their text, joined with single spaces
//! - Sensitive: mask - keep the first character, replace the rest with `*`;
//!   strings of length <= 1 are returned unchanged

use super::hash::hash_column;
use crate::core::text::AnalysisEngine;
use crate::domain::column::SensitivityType;
use crate::domain::errors::ShroudError;
use crate::domain::records::CellValue;
use crate::domain::result::Result;

/// Apply the string transform family for the given sensitivity
pub async fn transform(
    values: &[CellValue],
    sensitivity: SensitivityType,
    analysis: &AnalysisEngine,
) -> Result<Vec<CellValue>> {
    match sensitivity {
        SensitivityType::Identifier => Ok(hash_column(values)),
        SensitivityType::Insensitive => Ok(values.to_vec()),
        SensitivityType::QuasiIdentifier => generalize_column(values, analysis).await,
        SensitivityType::Sensitive => mask_column(values),
    }
}

/// Extract typed text cells, rejecting cells of any other type
fn as_text(values: &[CellValue]) -> Result<Vec<&str>> {
    values
        .iter()
        .enumerate()
        .map(|(row, value)| match value {
            CellValue::Text(s) => Ok(s.as_str()),
            other => Err(ShroudError::Validation(format!(
                "row {row} is not a string: '{other}'"
            ))),
        })
        .collect()
}

/// Whitespace tokens with their byte offsets
fn tokens_with_offsets(text: &str) -> Vec<(usize, usize)> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (index, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push((s, index));
            }
        } else if start.is_none() {
            start = Some(index);
        }
    }
    if let Some(s) = start {
        tokens.push((s, text.len()));
    }

    tokens
}

/// Generalize one text value by replacing entity-labeled tokens
async fn generalize(text: &str, analysis: &AnalysisEngine) -> Result<String> {
    let spans = analysis.detect(text).await?;

    let parts: Vec<&str> = tokens_with_offsets(text)
        .into_iter()
        .map(|(start, end)| {
            spans
                .iter()
                .find(|span| span.start < end && start < span.end)
                .map(|span| span.category.label())
                .unwrap_or(&text[start..end])
        })
        .collect();

    Ok(parts.join(" "))
}

async fn generalize_column(
    values: &[CellValue],
    analysis: &AnalysisEngine,
) -> Result<Vec<CellValue>> {
    let mut generalized = Vec::with_capacity(values.len());
    for text in as_text(values)? {
        generalized.push(CellValue::Text(generalize(text, analysis).await?));
    }
    Ok(generalized)
}

/// Mask one text value, keeping only the first character
fn mask(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let rest = chars.count();
            if rest == 0 {
                text.to_string()
            } else {
                let mut masked = String::with_capacity(text.len());
                masked.push(first);
                masked.extend(std::iter::repeat('*').take(rest));
                masked
            }
        }
    }
}

fn mask_column(values: &[CellValue]) -> Result<Vec<CellValue>> {
    Ok(as_text(values)?
        .into_iter()
        .map(|text| CellValue::Text(mask(text)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::text::PatternRecognizer;
    use std::sync::Arc;

    fn texts(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|s| CellValue::Text(s.to_string())).collect()
    }

    fn pattern_engine() -> AnalysisEngine {
        AnalysisEngine::new(vec![Arc::new(PatternRecognizer::new().unwrap())])
    }

    #[tokio::test]
    async fn test_insensitive_passes_through() {
        let values = texts(&["alpha", "beta"]);
        let result = transform(&values, SensitivityType::Insensitive, &pattern_engine())
            .await
            .unwrap();
        assert_eq!(result, values);
    }

    #[tokio::test]
    async fn test_identifier_hashes_utf8_bytes() {
        let values = texts(&["Alice"]);
        let result = transform(&values, SensitivityType::Identifier, &pattern_engine())
            .await
            .unwrap();
        let expected = super::super::hash::sha256_hex("Alice");
        assert_eq!(result[0], CellValue::Text(expected));
    }

    #[tokio::test]
    async fn test_mask_keeps_first_char() {
        let values = texts(&["Alice"]);
        let result = transform(&values, SensitivityType::Sensitive, &pattern_engine())
            .await
            .unwrap();
        assert_eq!(result[0], CellValue::Text("A****".into()));
    }

    #[tokio::test]
    async fn test_mask_short_strings_unchanged() {
        let values = texts(&["", "x"]);
        let result = transform(&values, SensitivityType::Sensitive, &pattern_engine())
            .await
            .unwrap();
        assert_eq!(result, values);
    }

    #[test]
    fn test_mask_counts_chars_not_bytes() {
        assert_eq!(mask("été"), "é**");
    }

    #[tokio::test]
    async fn test_generalize_replaces_entity_tokens() {
        let values = texts(&["wrote to a@b.com yesterday"]);
        let result = transform(&values, SensitivityType::QuasiIdentifier, &pattern_engine())
            .await
            .unwrap();
        assert_eq!(
            result[0],
            CellValue::Text("wrote to EMAIL_ADDRESS yesterday".into())
        );
    }

    #[tokio::test]
    async fn test_generalize_without_entities_keeps_tokens() {
        let values = texts(&["plain   text  here"]);
        let result = transform(&values, SensitivityType::QuasiIdentifier, &pattern_engine())
            .await
            .unwrap();
        // Tokens are re-joined with single spaces
        assert_eq!(result[0], CellValue::Text("plain text here".into()));
    }

    #[tokio::test]
    async fn test_type_mismatch_rejected() {
        let values = vec![CellValue::Number(5.0)];
        let result = transform(&values, SensitivityType::Sensitive, &pattern_engine()).await;
        assert!(matches!(result, Err(ShroudError::Validation(_))));
    }

    #[test]
    fn test_tokens_with_offsets() {
        let tokens = tokens_with_offsets("  a bc  d");
        assert_eq!(tokens, vec![(2, 3), (4, 6), (8, 9)]);
    }
}
