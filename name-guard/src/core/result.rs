//! Validation result types.

use super::{Level, Rule};
use serde::{Deserialize, Serialize};

/// A single finding produced by a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// The name of the check that produced the finding
    pub check_name: String,
    /// The rule that fired
    pub rule: Rule,
    /// The severity level, taken from the rule
    pub level: Level,
    /// The token, name or term the finding is about
    pub subject: String,
    /// The human-readable warning text
    pub message: String,
}

impl ValidationIssue {
    /// Creates an issue whose level is the rule's declared level.
    pub fn new(
        check_name: impl Into<String>,
        rule: Rule,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check_name: check_name.into(),
            rule,
            level: rule.level(),
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// The verdict for one candidate name.
///
/// `is_valid` is false as soon as any invalidating issue was recorded.
/// Warnings keep the order in which checks produced them, and
/// `suggestions` is only populated when the name is invalid or warned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the name is acceptable
    pub is_valid: bool,
    /// Warning messages in check order
    pub warnings: Vec<String>,
    /// Alternative names, at most five, all distinct
    pub suggestions: Vec<String>,
    /// Structured form of `warnings`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    /// Creates a valid result with no findings.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            warnings: Vec::new(),
            suggestions: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Records an issue, updating validity and warnings.
    pub fn record(&mut self, issue: ValidationIssue) {
        if issue.level.invalidates() {
            self.is_valid = false;
        }
        self.warnings.push(issue.message.clone());
        self.issues.push(issue);
    }

    /// Whether suggestions should be generated for this result.
    pub fn needs_suggestions(&self) -> bool {
        !self.is_valid || !self.warnings.is_empty()
    }

    /// Returns true if there are any error-level issues.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|issue| issue.level == Level::Error)
    }

    /// Gets all issues raised by a specific rule.
    pub fn issues_by_rule(&self, rule: Rule) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|issue| issue.rule == rule).collect()
    }
}
