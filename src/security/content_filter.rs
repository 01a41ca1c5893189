//! Request body rejection filter.
//!
//! # Modes
//! - `contains`: reject when the phrase occurs anywhere in the body
//! - `exact`: reject only when the phrase is delimited by a space or a double
//!   quote on each side, so `bad_message` does not match `bad_messages`
//!
//! A phrase at the very start or end of the body with no delimiter is not an
//! exact match.

use crate::config::{FilterConfig, MatchMode};
use crate::error::ProxyError;

/// Content filter built from [`FilterConfig`].
#[derive(Debug, Clone)]
pub struct ContentFilter {
    phrase: String,
    mode: MatchMode,
    case_insensitive: bool,
}

impl ContentFilter {
    pub fn new(phrase: impl Into<String>, mode: MatchMode, case_insensitive: bool) -> Self {
        Self {
            phrase: phrase.into(),
            mode,
            case_insensitive,
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.reject_with.clone(), config.match_mode, config.case_insensitive)
    }

    /// An empty phrase disables the filter.
    pub fn is_enabled(&self) -> bool {
        !self.phrase.is_empty()
    }

    /// Check the body text, returning the rejection if the phrase is present.
    pub fn check(&self, body: &str) -> Result<(), ProxyError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let (body, phrase) = if self.case_insensitive {
            (fold_case(body), fold_case(&self.phrase))
        } else {
            (body.to_string(), self.phrase.clone())
        };

        let found = match self.mode {
            MatchMode::Contains => body.contains(&phrase),
            MatchMode::Exact => token_patterns(&phrase)
                .iter()
                .any(|pattern| body.contains(pattern.as_str())),
        };

        if found {
            return Err(ProxyError::ContentRejected { phrase });
        }
        Ok(())
    }
}

/// Simple per-character lowercase mapping. `str::to_lowercase` applies the
/// full mapping instead: `İ` becomes `i\u{307}` and a word-final `Σ` becomes `ς`.
fn fold_case(s: &str) -> String {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn token_patterns(phrase: &str) -> [String; 4] {
    [
        format!(" {phrase} "),
        format!("\"{phrase}\""),
        format!(" {phrase}\""),
        format!("\"{phrase} "),
    ]
}
