//! Alternative-name generation by synonym substitution.

use futures::future::join_all;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::SuggestionPolicy;
use crate::logging::LogConfig;
use crate::sources::{guarded, LexicalLookup};

/// Builds alternative names by replacing one word at a time with a synonym.
///
/// Output is deterministic: synonyms and candidates are sorted and
/// deduplicated before the per-word and total limits are applied.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    lexicon: Arc<dyn LexicalLookup>,
    policy: SuggestionPolicy,
    timeout: Duration,
    log: LogConfig,
}

impl SuggestionGenerator {
    pub fn new(
        lexicon: Arc<dyn LexicalLookup>,
        policy: SuggestionPolicy,
        timeout: Duration,
        log: LogConfig,
    ) -> Self {
        Self {
            lexicon,
            policy,
            timeout,
            log,
        }
    }

    /// At most `max_total` distinct alternatives for `name`.
    pub async fn generate(&self, name: &str) -> Vec<String> {
        let words: Vec<&str> = name.split_whitespace().collect();

        let lookups = words.iter().map(|word| {
            let key = word.to_lowercase();
            async move {
                guarded(
                    "dictionary",
                    &key,
                    self.timeout,
                    &self.log,
                    self.lexicon.senses(&key),
                )
                .await
            }
        });
        let senses_per_word = join_all(lookups).await;

        let mut candidates = BTreeSet::new();
        for (index, (word, senses)) in words.iter().zip(senses_per_word).enumerate() {
            let lowered = word.to_lowercase();
            let synonyms: BTreeSet<String> = senses
                .into_iter()
                .flat_map(|sense| sense.synonyms)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty() && s.to_lowercase() != lowered)
                .collect();

            for synonym in synonyms.iter().take(self.policy.per_word) {
                let mut replaced: Vec<String> = words.iter().map(|w| w.to_string()).collect();
                replaced[index] = title_case(synonym);
                candidates.insert(replaced.join(" "));
            }
        }

        let suggestions: Vec<String> = candidates.into_iter().take(self.policy.max_total).collect();
        debug!(count = suggestions.len(), "suggestions generated");
        suggestions
    }
}

/// Capitalises the first letter of every word; underscores become spaces.
///
/// ```rust
/// use name_guard::checks::title_case;
///
/// assert_eq!(title_case("bad_lands"), "Bad Lands");
/// assert_eq!(title_case("o'NEIL"), "O'Neil");
/// ```
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}
