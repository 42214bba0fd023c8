//! Culturally and historically sensitive terms.

use async_trait::async_trait;

use crate::config::CulturalTermEntry;
use crate::core::{Check, CheckScope, Rule, ValidationIssue};

/// Flags culturally or historically loaded terms anywhere in the name.
#[derive(Debug, Clone)]
pub struct CulturalCheck {
    table: Vec<CulturalTermEntry>,
}

impl CulturalCheck {
    /// Entries with a blank term are dropped.
    pub fn new(table: Vec<CulturalTermEntry>) -> Self {
        let table = table
            .into_iter()
            .filter(|entry| !entry.term.trim().is_empty())
            .collect();
        Self { table }
    }

    /// Warning messages for every table term contained in `name`.
    pub fn check_cultural_sensitivity(&self, name: &str) -> Vec<String> {
        let lowered = name.to_lowercase();
        self.table
            .iter()
            .filter(|entry| lowered.contains(entry.term.as_str()))
            .map(|entry| {
                format!(
                    "Potentially sensitive term '{}': {}",
                    entry.term, entry.explanation
                )
            })
            .collect()
    }
}

#[async_trait]
impl Check for CulturalCheck {
    fn name(&self) -> &str {
        "cultural"
    }

    fn scope(&self) -> CheckScope {
        CheckScope::FullName
    }

    async fn evaluate(&self, input: &str) -> Vec<ValidationIssue> {
        self.check_cultural_sensitivity(input)
            .into_iter()
            .map(|message| ValidationIssue::new(self.name(), Rule::Cultural, input, message))
            .collect()
    }
}
