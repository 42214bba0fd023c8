//! Configuration for the validator and its external services.
//!
//! [`GuardConfig`] is the screening policy: word lists, tables and
//! thresholds. It is built once at start-up and shared read-only through an
//! `Arc`. [`ServiceConfig`] describes where the external services live.

use crate::error::{GuardError, Result};
use crate::security::SecureString;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 10_000;

/// A culturally or historically loaded term and why it is flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CulturalTermEntry {
    /// Lowercase term matched as a substring of the name
    pub term: String,
    /// One-line explanation shown in the warning
    pub explanation: String,
}

impl CulturalTermEntry {
    /// Creates a new table entry.
    pub fn new(term: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            term: term.into().to_lowercase(),
            explanation: explanation.into(),
        }
    }
}

/// Thresholds and vocabulary for the slang check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlangPolicy {
    /// Summed popularity above which a "significant slang usage" warning fires
    pub usage_threshold: u64,
    /// Popularity a single negative definition must exceed to invalidate
    pub meaning_threshold: u64,
    /// Substrings that mark a definition as negative
    pub negative_themes: Vec<String>,
    /// Characters of the offending definition quoted in the warning
    pub excerpt_chars: usize,
}

impl Default for SlangPolicy {
    fn default() -> Self {
        Self {
            usage_threshold: 3000,
            meaning_threshold: 1000,
            negative_themes: [
                "drug",
                "sexual",
                "offensive",
                "racist",
                "vulgar",
                "slur",
                "explicit",
                "nsfw",
                "derogatory",
                "inappropriate",
                "adult",
                "porn",
                "fetish",
                "sex",
                "butt",
                "ass",
                "penis",
                "vagina",
                "dick",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            excerpt_chars: 100,
        }
    }
}

/// Limits for alternative-name generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionPolicy {
    /// Synonyms tried per word
    pub per_word: usize,
    /// Suggestions returned in total
    pub max_total: usize,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            per_word: 3,
            max_total: 5,
        }
    }
}

/// Screening policy shared by every check.
///
/// # Examples
///
/// ```rust
/// use name_guard::config::GuardConfig;
///
/// let config = GuardConfig::default().with_blocklist_terms(["shady"]);
/// assert!(config.blocklist.iter().any(|t| t == "ghetto"));
/// assert!(config.blocklist.iter().any(|t| t == "shady"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Terms inappropriate for property names, matched as substrings
    pub blocklist: Vec<String>,
    /// Whether the built-in profanity word list is loaded
    pub use_default_profanity: bool,
    /// Additional whole-word profanity entries
    pub extra_profanity: Vec<String>,
    /// Culturally sensitive terms, checked in order
    pub cultural_terms: Vec<CulturalTermEntry>,
    /// Dictionary definition markers for the connotation check
    pub connotation_terms: Vec<String>,
    /// Slang check policy
    pub slang: SlangPolicy,
    /// Suggestion limits
    pub suggestions: SuggestionPolicy,
    /// Upper bound for each external lookup, in milliseconds
    pub lookup_timeout_ms: u64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            blocklist: vec!["ghetto".into(), "hood".into(), "sketchy".into()],
            use_default_profanity: true,
            extra_profanity: Vec::new(),
            cultural_terms: vec![
                CulturalTermEntry::new("plantation", "Historical connection to slavery"),
                CulturalTermEntry::new("colonial", "Historical connection to colonialism"),
                CulturalTermEntry::new("savage", "Derogatory term with racist history"),
            ],
            connotation_terms: ["offensive", "derogatory", "inappropriate", "slur"]
                .into_iter()
                .map(String::from)
                .collect(),
            slang: SlangPolicy::default(),
            suggestions: SuggestionPolicy::default(),
            lookup_timeout_ms: DEFAULT_LOOKUP_TIMEOUT_MS,
        }
    }
}

impl GuardConfig {
    /// Parses a JSON policy document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config.normalized())
    }

    /// Loads a JSON policy document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            GuardError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    /// Adds custom blocklist terms. Blank terms are skipped.
    pub fn with_blocklist_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocklist.extend(
            terms
                .into_iter()
                .map(|t| t.into().to_lowercase())
                .filter(|t| !t.trim().is_empty()),
        );
        self
    }

    /// Adds whole-word profanity entries.
    pub fn with_profanity_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_profanity
            .extend(words.into_iter().map(|w| w.into().to_lowercase()));
        self
    }

    /// Adds a cultural-sensitivity table entry. A blank term is skipped.
    pub fn with_cultural_term(
        mut self,
        term: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        let entry = CulturalTermEntry::new(term, explanation);
        if !entry.term.trim().is_empty() {
            self.cultural_terms.push(entry);
        }
        self
    }

    /// Sets the per-lookup timeout. A zero duration is ignored.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        if millis > 0 {
            self.lookup_timeout_ms = millis;
        }
        self
    }

    /// Returns the per-lookup timeout, falling back to ten seconds when the
    /// configured value is zero.
    pub fn lookup_timeout(&self) -> Duration {
        match self.lookup_timeout_ms {
            0 => Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
            millis => Duration::from_millis(millis),
        }
    }

    /// Rejects policies that cannot produce meaningful output.
    pub fn validate(&self) -> Result<()> {
        if self.blocklist.iter().any(|t| t.trim().is_empty()) {
            return Err(GuardError::Configuration(
                "blocklist terms cannot be empty".to_string(),
            ));
        }
        if self.cultural_terms.iter().any(|e| e.term.trim().is_empty()) {
            return Err(GuardError::Configuration(
                "cultural terms cannot be empty".to_string(),
            ));
        }
        if self.lookup_timeout_ms == 0 {
            return Err(GuardError::Configuration(
                "lookup_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        for term in &mut self.blocklist {
            *term = term.to_lowercase();
        }
        for word in &mut self.extra_profanity {
            *word = word.to_lowercase();
        }
        for entry in &mut self.cultural_terms {
            entry.term = entry.term.to_lowercase();
        }
        for term in &mut self.connotation_terms {
            *term = term.to_lowercase();
        }
        for theme in &mut self.slang.negative_themes {
            *theme = theme.to_lowercase();
        }
        self
    }
}

/// Endpoints and credentials for the external services.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    slang_endpoint: String,
    dictionary_endpoint: String,
    google_endpoint: String,
    nominatim_endpoint: String,
    api_key: Option<SecureString>,
    timeout: Duration,
    user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            slang_endpoint: "https://api.urbandictionary.com".to_string(),
            dictionary_endpoint: "https://api.dictionaryapi.dev".to_string(),
            google_endpoint: "https://maps.googleapis.com".to_string(),
            nominatim_endpoint: "https://nominatim.openstreetmap.org".to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
            user_agent: "property_validator".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Creates a configuration with the given Google Maps API key.
    pub fn new(api_key: impl Into<SecureString>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// `GOOGLE_MAPS_API_KEY` supplies the key; `NAME_GUARD_SLANG_ENDPOINT`,
    /// `NAME_GUARD_DICTIONARY_ENDPOINT`, `NAME_GUARD_GOOGLE_ENDPOINT`,
    /// `NAME_GUARD_NOMINATIM_ENDPOINT` and `NAME_GUARD_HTTP_TIMEOUT_SECS`
    /// override the defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(key) = env_var("GOOGLE_MAPS_API_KEY") {
            config.api_key = Some(SecureString::new(key));
        }
        if let Some(endpoint) = env_var("NAME_GUARD_SLANG_ENDPOINT") {
            config = config.with_slang_endpoint(endpoint);
        }
        if let Some(endpoint) = env_var("NAME_GUARD_DICTIONARY_ENDPOINT") {
            config = config.with_dictionary_endpoint(endpoint);
        }
        if let Some(endpoint) = env_var("NAME_GUARD_GOOGLE_ENDPOINT") {
            config = config.with_google_endpoint(endpoint);
        }
        if let Some(endpoint) = env_var("NAME_GUARD_NOMINATIM_ENDPOINT") {
            config = config.with_nominatim_endpoint(endpoint);
        }
        if let Some(secs) = env_var("NAME_GUARD_HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                GuardError::Configuration(format!(
                    "NAME_GUARD_HTTP_TIMEOUT_SECS must be an integer, got '{secs}'"
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Overrides the slang dictionary endpoint.
    pub fn with_slang_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.slang_endpoint = trim_endpoint(endpoint.into());
        self
    }

    /// Overrides the lexical dictionary endpoint.
    pub fn with_dictionary_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.dictionary_endpoint = trim_endpoint(endpoint.into());
        self
    }

    /// Overrides the Google Maps endpoint (geocoding and places).
    pub fn with_google_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.google_endpoint = trim_endpoint(endpoint.into());
        self
    }

    /// Overrides the Nominatim endpoint.
    pub fn with_nominatim_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.nominatim_endpoint = trim_endpoint(endpoint.into());
        self
    }

    /// Sets the HTTP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent sent to Nominatim.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn slang_endpoint(&self) -> &str {
        &self.slang_endpoint
    }

    pub fn dictionary_endpoint(&self) -> &str {
        &self.dictionary_endpoint
    }

    pub fn google_endpoint(&self) -> &str {
        &self.google_endpoint
    }

    pub fn nominatim_endpoint(&self) -> &str {
        &self.nominatim_endpoint
    }

    /// The Google Maps API key, if one was configured.
    pub fn api_key(&self) -> Option<&SecureString> {
        self.api_key.as_ref()
    }

    /// The Google Maps API key, or a configuration error naming the variable.
    pub fn require_api_key(&self) -> Result<&SecureString> {
        self.api_key.as_ref().ok_or_else(|| {
            GuardError::Configuration("GOOGLE_MAPS_API_KEY is not set".to_string())
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn trim_endpoint(endpoint: String) -> String {
    endpoint.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_policy() {
        let config = GuardConfig::default();
        assert_eq!(config.blocklist, vec!["ghetto", "hood", "sketchy"]);
        assert_eq!(config.slang.usage_threshold, 3000);
        assert_eq!(config.slang.meaning_threshold, 1000);
        assert_eq!(config.suggestions.max_total, 5);
        assert_eq!(config.cultural_terms.len(), 3);
        assert_eq!(config.lookup_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GuardConfig::from_json_str(
            r#"{"blocklist": ["Ghetto", "Slum"], "slang": {"usage_threshold": 10}}"#,
        )
        .unwrap();
        assert_eq!(config.blocklist, vec!["ghetto", "slum"]);
        assert_eq!(config.slang.usage_threshold, 10);
        assert_eq!(config.slang.meaning_threshold, 1000);
        assert!(config.use_default_profanity);
    }

    #[test]
    fn test_rejects_empty_blocklist_term() {
        let err = GuardConfig::from_json_str(r#"{"blocklist": ["  "]}"#).unwrap_err();
        assert!(matches!(err, GuardError::Configuration(_)));
    }

    #[test]
    fn test_policy_vocabulary_is_lowercased() {
        let config = GuardConfig::from_json_str(
            r#"{"slang": {"negative_themes": ["Drug", "NSFW"]}, "connotation_terms": ["Slur"]}"#,
        )
        .unwrap();
        assert_eq!(config.slang.negative_themes, vec!["drug", "nsfw"]);
        assert_eq!(config.connotation_terms, vec!["slur"]);
    }

    #[test]
    fn test_builders_skip_unusable_values() {
        let config = GuardConfig::default()
            .with_blocklist_terms(["", "  ", "Shady"])
            .with_cultural_term(" ", "blank")
            .with_lookup_timeout(Duration::ZERO);
        assert_eq!(config.blocklist, vec!["ghetto", "hood", "sketchy", "shady"]);
        assert_eq!(config.cultural_terms.len(), 3);
        assert_eq!(config.lookup_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let config = GuardConfig {
            lookup_timeout_ms: 0,
            ..GuardConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.lookup_timeout(), Duration::from_secs(10));
        assert_eq!(
            GuardConfig::default()
                .with_lookup_timeout(Duration::from_millis(250))
                .lookup_timeout(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GuardConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, GuardError::Serialization(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"extra_profanity": ["Dump"]}}"#).unwrap();
        let config = GuardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.extra_profanity, vec!["dump"]);
    }

    #[test]
    fn test_missing_file() {
        let err = GuardConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, GuardError::Configuration(_)));
    }

    #[test]
    fn test_service_config_endpoints() {
        let config = ServiceConfig::new("key")
            .with_google_endpoint("http://localhost:1234/")
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.google_endpoint(), "http://localhost:1234");
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.api_key().unwrap().expose(), "key");
        assert_eq!(config.user_agent(), "property_validator");
    }

    #[test]
    fn test_require_api_key() {
        assert!(ServiceConfig::default().require_api_key().is_err());
        assert!(ServiceConfig::new("k").require_api_key().is_ok());
    }
}
