//! Profanity and blocklist matching.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::config::GuardConfig;
use crate::core::{Check, CheckScope, Rule, ValidationIssue};

/// Built-in profanity list. Entries match whole words (or whole-word
/// phrases), never fragments of longer words.
static DEFAULT_PROFANITY: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // General profanity
        "fuck", "fucking", "fucker", "fucked", "motherfucker",
        "shit", "shitty", "bullshit", "shithole",
        "ass", "asshole", "dumbass", "jackass", "arse", "arsehole",
        "bitch", "bitches", "bastard", "damn", "goddamn",
        "crap", "crappy", "piss", "pissed",
        "dick", "dickhead", "cock", "prick", "twat", "wanker", "bollocks",
        "cunt", "pussy", "whore", "slut", "skank", "hoe",
        // Sexual content
        "porn", "porno", "xxx", "sex", "sexy", "nude", "nudes", "horny",
        "cum", "jizz", "orgasm", "dildo", "blowjob", "handjob", "boobs", "tits",
        "milf", "hooker", "brothel", "strip club",
        // Slurs
        "nigger", "nigga", "faggot", "fag", "retard", "retarded", "spic", "chink",
        "kike", "gook", "wetback", "beaner", "coon", "dyke", "tranny", "raghead",
        "towelhead", "camel jockey", "redneck", "white trash", "trailer trash",
        // Drugs
        "meth", "crack house", "trap house", "crackhead", "junkie",
    ]
});

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
}

/// Case-insensitive profanity and blocklist matcher.
///
/// Profanity entries match whole words; custom blocklist terms match
/// anywhere in the text, so "ghettofabulous" is caught by "ghetto".
///
/// # Examples
///
/// ```rust
/// use name_guard::checks::ProfanityFilter;
/// use name_guard::config::GuardConfig;
///
/// let filter = ProfanityFilter::from_config(&GuardConfig::default());
/// assert!(filter.contains_profanity("Ghetto Gardens"));
/// assert!(filter.contains_profanity("the HOODlum lofts"));
/// assert!(!filter.contains_profanity("Grassy Meadows"));
/// ```
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    words: HashSet<String>,
    phrases: Vec<String>,
    blocklist: Vec<String>,
}

impl ProfanityFilter {
    /// Builds the filter from the built-in list (if enabled), the configured
    /// extra words and the custom blocklist.
    pub fn from_config(config: &GuardConfig) -> Self {
        let builtin = config
            .use_default_profanity
            .then(|| DEFAULT_PROFANITY.iter().map(|w| w.to_string()))
            .into_iter()
            .flatten();

        let mut words = HashSet::new();
        let mut phrases = Vec::new();
        for entry in builtin.chain(config.extra_profanity.iter().cloned()) {
            let normalized = tokens(&entry.to_lowercase()).collect::<Vec<_>>().join(" ");
            if normalized.is_empty() {
                continue;
            }
            if normalized.contains(' ') {
                phrases.push(normalized);
            } else {
                words.insert(normalized);
            }
        }

        Self {
            words,
            phrases,
            blocklist: config
                .blocklist
                .iter()
                .map(|t| t.to_lowercase())
                .filter(|t| !t.trim().is_empty())
                .collect(),
        }
    }

    /// Returns the first listed term found in `text`, if any.
    pub fn offending_term(&self, text: &str) -> Option<String> {
        let lowered = text.to_lowercase();

        if let Some(term) = self.blocklist.iter().find(|t| lowered.contains(t.as_str())) {
            return Some(term.clone());
        }

        let token_list: Vec<&str> = tokens(&lowered).collect();
        if let Some(word) = token_list.iter().find(|t| self.words.contains(**t)) {
            return Some((*word).to_string());
        }

        let padded = format!(" {} ", token_list.join(" "));
        self.phrases
            .iter()
            .find(|phrase| padded.contains(&format!(" {phrase} ")))
            .cloned()
    }

    /// Whether `text` contains a listed term.
    pub fn contains_profanity(&self, text: &str) -> bool {
        self.offending_term(text).is_some()
    }
}

/// Flags units containing profanity or blocklisted terms. Invalidating.
#[derive(Debug, Clone)]
pub struct LexicalCheck {
    filter: ProfanityFilter,
}

impl LexicalCheck {
    pub fn new(filter: ProfanityFilter) -> Self {
        Self { filter }
    }
}

#[async_trait]
impl Check for LexicalCheck {
    fn name(&self) -> &str {
        "lexical"
    }

    fn scope(&self) -> CheckScope {
        CheckScope::EachUnit
    }

    async fn evaluate(&self, input: &str) -> Vec<ValidationIssue> {
        match self.filter.offending_term(input) {
            Some(_) => vec![ValidationIssue::new(
                self.name(),
                Rule::Profanity,
                input,
                format!("Contains inappropriate language: '{input}'"),
            )],
            None => Vec::new(),
        }
    }
}
