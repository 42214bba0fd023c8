//! Sound-alike comparison of the whole name against the blocklist.

use async_trait::async_trait;
use std::sync::Arc;

use crate::core::{Check, CheckScope, Rule, ValidationIssue};
use crate::sources::PhoneticEncoder;

/// Compares the sound of the whole name against each blocklist term.
///
/// Catches respellings such as "Hud" for "hood" that substring matching
/// misses. Advisory only. Text the encoder cannot handle yields no finding.
#[derive(Debug, Clone)]
pub struct PhoneticCheck {
    encoder: Arc<dyn PhoneticEncoder>,
    blocklist: Vec<(String, Option<String>)>,
}

impl PhoneticCheck {
    pub fn new(encoder: Arc<dyn PhoneticEncoder>, blocklist: &[String]) -> Self {
        let blocklist = blocklist
            .iter()
            .filter(|term| !term.trim().is_empty())
            .map(|term| {
                let term = term.to_lowercase();
                let code = encoder.encode(&term);
                (term, code)
            })
            .collect();
        Self { encoder, blocklist }
    }

    /// Whether `word` and `blocked` share a phonetic code.
    pub fn is_phonetically_similar(&self, word: &str, blocked: &str) -> bool {
        match (
            self.encoder.encode(&word.to_lowercase()),
            self.encoder.encode(&blocked.to_lowercase()),
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

#[async_trait]
impl Check for PhoneticCheck {
    fn name(&self) -> &str {
        "phonetic"
    }

    fn scope(&self) -> CheckScope {
        CheckScope::FullName
    }

    async fn evaluate(&self, input: &str) -> Vec<ValidationIssue> {
        let Some(code) = self.encoder.encode(&input.to_lowercase()) else {
            return Vec::new();
        };
        self.blocklist
            .iter()
            .filter(|(_, term_code)| term_code.as_deref() == Some(code.as_str()))
            .map(|(term, _)| {
                ValidationIssue::new(
                    self.name(),
                    Rule::Phonetic,
                    input,
                    format!("Phonetically similar to inappropriate term: '{term}'"),
                )
            })
            .collect()
    }
}
