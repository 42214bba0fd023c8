//! Slang popularity and slang-meaning screening.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::SlangPolicy;
use crate::core::{Check, CheckScope, Rule, ValidationIssue};
use crate::logging::LogConfig;
use crate::sources::{guarded, SlangDefinition, SlangLookup};

/// Looks each unit up in a slang dictionary.
///
/// Two findings are possible per unit:
///
/// - summed popularity above `usage_threshold` produces a
///   [`Rule::SlangUsage`] warning;
/// - the most popular definition that exceeds `meaning_threshold` and
///   mentions a negative theme produces a [`Rule::SlangMeaning`] error
///   quoting the start of its lowercased text.
#[derive(Debug, Clone)]
pub struct SlangCheck {
    lookup: Arc<dyn SlangLookup>,
    policy: SlangPolicy,
    timeout: Duration,
    log: LogConfig,
}

impl SlangCheck {
    pub fn new(
        lookup: Arc<dyn SlangLookup>,
        mut policy: SlangPolicy,
        timeout: Duration,
        log: LogConfig,
    ) -> Self {
        policy.negative_themes = policy
            .negative_themes
            .iter()
            .map(|theme| theme.to_lowercase())
            .filter(|theme| !theme.trim().is_empty())
            .collect();
        Self {
            lookup,
            policy,
            timeout,
            log,
        }
    }

    fn is_negative(&self, lowered: &str) -> bool {
        self.policy
            .negative_themes
            .iter()
            .any(|theme| lowered.contains(theme.as_str()))
    }

    /// The first of the most popular negative definitions.
    fn worst_definition<'a>(
        &self,
        definitions: &'a [SlangDefinition],
    ) -> Option<(&'a SlangDefinition, String)> {
        definitions
            .iter()
            .filter(|d| d.popularity > self.policy.meaning_threshold)
            .map(|d| (d, d.text.to_lowercase()))
            .filter(|(_, lowered)| self.is_negative(lowered))
            .fold(None, |best, candidate| match best {
                Some(best) if best.0.popularity >= candidate.0.popularity => Some(best),
                _ => Some(candidate),
            })
    }
}

#[async_trait]
impl Check for SlangCheck {
    fn name(&self) -> &str {
        "slang"
    }

    fn scope(&self) -> CheckScope {
        CheckScope::EachUnit
    }

    async fn evaluate(&self, input: &str) -> Vec<ValidationIssue> {
        if input.trim().is_empty() {
            return Vec::new();
        }
        let definitions = guarded(
            "urban_dictionary",
            input,
            self.timeout,
            &self.log,
            self.lookup.define(input),
        )
        .await;

        let mut issues = Vec::new();
        let total = definitions
            .iter()
            .fold(0u64, |sum, d| sum.saturating_add(d.popularity));
        if total > self.policy.usage_threshold {
            issues.push(ValidationIssue::new(
                self.name(),
                Rule::SlangUsage,
                input,
                format!("'{input}' has significant slang usage ({total} upvotes)"),
            ));
        }

        if let Some((_, lowered)) = self.worst_definition(&definitions) {
            let excerpt: String = lowered.chars().take(self.policy.excerpt_chars).collect();
            issues.push(ValidationIssue::new(
                self.name(),
                Rule::SlangMeaning,
                input,
                format!("'{input}' has inappropriate slang meaning: {excerpt}..."),
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::InMemorySlangDictionary;

    fn check(dictionary: InMemorySlangDictionary) -> SlangCheck {
        SlangCheck::new(
            Arc::new(dictionary),
            SlangPolicy::default(),
            Duration::from_secs(1),
            LogConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_significant_usage_only_warns() {
        let dictionary = InMemorySlangDictionary::new()
            .with_definition("lit", "Something exciting", 2500)
            .with_definition("lit", "Brightly illuminated", 900);
        let issues = check(dictionary).evaluate("lit").await;

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, Rule::SlangUsage);
        assert_eq!(issues[0].message, "'lit' has significant slang usage (3400 upvotes)");
        assert!(!issues[0].level.invalidates());
    }

    #[tokio::test]
    async fn test_negative_meaning_quotes_most_popular_definition() {
        let dictionary = InMemorySlangDictionary::new()
            .with_definition("peach", "A Drug reference used in clubs", 1500)
            .with_definition("peach", "An EXPLICIT term for something else", 2200)
            .with_definition("peach", "A fruit", 5000);
        let issues = check(dictionary).evaluate("peach").await;

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].rule, Rule::SlangUsage);
        assert_eq!(issues[1].rule, Rule::SlangMeaning);
        assert_eq!(
            issues[1].message,
            "'peach' has inappropriate slang meaning: an explicit term for something else..."
        );
        assert!(issues[1].level.invalidates());
    }

    #[tokio::test]
    async fn test_themes_match_regardless_of_case() {
        let policy = SlangPolicy {
            negative_themes: vec!["Drug".to_string(), " ".to_string()],
            ..SlangPolicy::default()
        };
        let dictionary =
            InMemorySlangDictionary::new().with_definition("peach", "a drug reference", 2000);
        let check = SlangCheck::new(
            Arc::new(dictionary),
            policy,
            Duration::from_secs(1),
            LogConfig::default(),
        );

        let issues = check.evaluate("peach").await;
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, Rule::SlangMeaning);

        // the blank theme matches nothing
        assert!(check.evaluate("plum").await.is_empty());
    }

    #[tokio::test]
    async fn test_unpopular_negative_meaning_is_ignored() {
        let dictionary =
            InMemorySlangDictionary::new().with_definition("maple", "an offensive joke", 1000);
        assert!(check(dictionary).evaluate("maple").await.is_empty());
    }

    #[tokio::test]
    async fn test_excerpt_is_truncated_to_policy_length() {
        let long_text = format!("vulgar {}", "é".repeat(300));
        let dictionary = InMemorySlangDictionary::new().with_definition("word", &long_text, 1200);
        let issues = check(dictionary).evaluate("word").await;

        let excerpt = issues[0]
            .message
            .trim_start_matches("'word' has inappropriate slang meaning: ")
            .trim_end_matches("...");
        assert_eq!(excerpt.chars().count(), 100);
    }

    #[tokio::test]
    async fn test_empty_unit_skips_lookup() {
        let dictionary = InMemorySlangDictionary::new().with_definition("", "vulgar", 99_999);
        assert!(check(dictionary).evaluate("  ").await.is_empty());
    }
}
