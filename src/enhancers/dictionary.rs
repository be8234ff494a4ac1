//! Literal term lookup.
//!
//! Settings: `terms` (list of strings, required), `label` (defaults to
//! `ENTITY`) and `case_sensitive` (defaults to false). Every occurrence of a
//! term is reported with confidence 1.0.

use regex::RegexBuilder;

use super::{Enhancer, EnhancerConfig, EnhancerSpan};
use crate::error::EnhancerError;

const DEFAULT_LABEL: &str = "ENTITY";

pub struct DictionaryEnhancer;

impl Enhancer for DictionaryEnhancer {
    fn name(&self) -> &str {
        "dictionary"
    }

    fn detect(
        &self,
        text: &str,
        config: &EnhancerConfig,
    ) -> Result<Vec<EnhancerSpan>, EnhancerError> {
        let mut terms: Vec<String> = config
            .string_list("terms")
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .collect();
        if terms.is_empty() {
            return Err(EnhancerError::Failed {
                name: self.name().to_string(),
                reason: "no terms configured".to_string(),
            });
        }

        // Longest first so "Acme Corp" beats "Acme" at the same position
        terms.sort_by_key(|t| std::cmp::Reverse(t.len()));
        let alternation = terms
            .iter()
            .map(|t| bounded(t))
            .collect::<Vec<_>>()
            .join("|");

        let case_sensitive = config
            .settings
            .get("case_sensitive")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let matcher = RegexBuilder::new(&format!("(?:{})", alternation))
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| EnhancerError::Failed {
                name: self.name().to_string(),
                reason: e.to_string(),
            })?;

        let label = config.string("label").unwrap_or(DEFAULT_LABEL).to_string();

        Ok(matcher
            .find_iter(text)
            .map(|m| EnhancerSpan {
                start: m.start(),
                end: m.end(),
                label: label.clone(),
                confidence: 1.0,
                value: m.as_str().to_string(),
            })
            .collect())
    }
}

/// Escaped term, word-bounded only on sides that end in a word character
fn bounded(term: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let left = if term.starts_with(is_word) { r"\b" } else { "" };
    let right = if term.ends_with(is_word) { r"\b" } else { "" };
    format!("{}{}{}", left, regex::escape(term), right)
}
