use cortex_core::constants::{CHARS_PER_TOKEN, ELLIPSIS};
use cortex_core::errors::CortexResult;
use serde::Serialize;

/// Token estimator using a fixed characters-per-token ratio.
///
/// Counts Unicode scalar values, not bytes, and rounds up: 0 chars is
/// 0 tokens, 1..=4 chars is 1 token.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCounter;

impl TokenCounter {
    pub fn new() -> Self {
        Self
    }

    /// Estimate tokens in `text`.
    pub fn estimate(&self, text: &str) -> usize {
        text.chars().count().div_ceil(CHARS_PER_TOKEN)
    }

    /// Estimate tokens of `value` rendered as compact JSON.
    pub fn estimate_structured<T: Serialize + ?Sized>(&self, value: &T) -> CortexResult<usize> {
        let rendered = serde_json::to_string(value)?;
        Ok(self.estimate(&rendered))
    }

    /// Whether `text` fits in `budget` tokens. Nothing fits a zero budget.
    pub fn fits_in_budget(&self, text: &str, budget: usize) -> bool {
        budget > 0 && self.estimate(text) <= budget
    }

    /// Shorten `text` to at most `budget * 4` characters.
    ///
    /// Truncated output ends with `...`. A whitespace boundary is preferred
    /// when it keeps at least half of the available prefix.
    pub fn truncate_to_fit(&self, text: &str, budget: usize) -> String {
        if budget == 0 {
            return String::new();
        }
        let max_chars = budget.saturating_mul(CHARS_PER_TOKEN);
        if text.chars().count() <= max_chars {
            return text.to_string();
        }

        let ellipsis_chars = ELLIPSIS.chars().count();
        if max_chars <= ellipsis_chars {
            return text.chars().take(max_chars).collect();
        }

        let prefix: String = text.chars().take(max_chars - ellipsis_chars).collect();
        let cut = match prefix.rfind(char::is_whitespace) {
            Some(idx) if idx >= prefix.len() / 2 => prefix[..idx].trim_end(),
            _ => prefix.as_str(),
        };
        let cut = if cut.is_empty() { prefix.as_str() } else { cut };
        format!("{cut}{ELLIPSIS}")
    }
}
