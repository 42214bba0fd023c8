//! The check trait implemented by every stage of the validation pipeline.

use super::ValidationIssue;
use async_trait::async_trait;
use std::fmt::Debug;

/// What a check is run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckScope {
    /// Run once per lowercased word and once more for the lowercased full name
    EachUnit,
    /// Run once against the name as submitted
    FullName,
}

/// A screening rule that can be evaluated against part of a name.
///
/// Implementations never fail: lookup errors are absorbed inside the check
/// and simply produce no issues. Checks are stateless across calls and are
/// shared between concurrent validations.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use name_guard::core::{Check, CheckScope, Rule, ValidationIssue};
///
/// #[derive(Debug)]
/// struct NoDigits;
///
/// #[async_trait]
/// impl Check for NoDigits {
///     fn name(&self) -> &str {
///         "no_digits"
///     }
///
///     fn scope(&self) -> CheckScope {
///         CheckScope::FullName
///     }
///
///     async fn evaluate(&self, input: &str) -> Vec<ValidationIssue> {
///         if input.chars().any(|c| c.is_ascii_digit()) {
///             vec![ValidationIssue::new(self.name(), Rule::Cultural, input, "Name contains digits")]
///         } else {
///             Vec::new()
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Check: Debug + Send + Sync {
    /// Returns the name of the check.
    fn name(&self) -> &str;

    /// Returns what the check runs against.
    fn scope(&self) -> CheckScope;

    /// Evaluates the check against one unit (or the full name).
    async fn evaluate(&self, input: &str) -> Vec<ValidationIssue>;
}
