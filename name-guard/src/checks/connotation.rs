//! Negative-connotation screening against dictionary definitions.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::core::{Check, CheckScope, Rule, ValidationIssue};
use crate::logging::LogConfig;
use crate::sources::{guarded, LexicalLookup};

/// Warns when a dictionary definition of a unit reads as negative.
///
/// A definition is negative when it contains one of the configured
/// connotation terms. Advisory only.
#[derive(Debug, Clone)]
pub struct ConnotationCheck {
    lexicon: Arc<dyn LexicalLookup>,
    terms: Vec<String>,
    timeout: Duration,
    log: LogConfig,
}

impl ConnotationCheck {
    pub fn new(
        lexicon: Arc<dyn LexicalLookup>,
        terms: Vec<String>,
        timeout: Duration,
        log: LogConfig,
    ) -> Self {
        Self {
            lexicon,
            terms: terms
                .into_iter()
                .map(|t| t.to_lowercase())
                .filter(|t| !t.trim().is_empty())
                .collect(),
            timeout,
            log,
        }
    }
}

#[async_trait]
impl Check for ConnotationCheck {
    fn name(&self) -> &str {
        "connotation"
    }

    fn scope(&self) -> CheckScope {
        CheckScope::EachUnit
    }

    async fn evaluate(&self, input: &str) -> Vec<ValidationIssue> {
        if input.trim().is_empty() {
            return Vec::new();
        }
        let senses = guarded(
            "dictionary",
            input,
            self.timeout,
            &self.log,
            self.lexicon.senses(input),
        )
        .await;

        senses
            .into_iter()
            .filter(|sense| {
                let lowered = sense.definition.to_lowercase();
                self.terms.iter().any(|t| lowered.contains(t.as_str()))
            })
            .map(|sense| {
                ValidationIssue::new(
                    self.name(),
                    Rule::Connotation,
                    input,
                    format!("'{input}' may have negative connotation: {}", sense.definition),
                )
            })
            .collect()
    }
}
