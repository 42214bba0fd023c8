//! The validation orchestrator.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{Check, CheckScope, ValidationResult};
use crate::checks::{
    ConnotationCheck, CulturalCheck, LexicalCheck, PhoneticCheck, ProfanityFilter, SlangCheck,
    SuggestionGenerator,
};
use crate::config::{GuardConfig, ServiceConfig};
use crate::error::{GuardError, Result};
use crate::logging::{truncate_field, LogConfig};
use crate::sources::{
    DoubleMetaphoneEncoder, FreeDictionaryClient, InMemoryLexicon, InMemorySlangDictionary,
    LexicalLookup, PhoneticEncoder, SlangLookup, UrbanDictionaryClient,
};

/// Screens candidate property names.
///
/// A run lowercases the name and splits it into words. Every
/// [`CheckScope::EachUnit`] check is evaluated against each word and then
/// against the whole lowercased name, so a name of N words yields N+1 units.
/// [`CheckScope::FullName`] checks follow, once each. No check short-circuits
/// the others. When anything was found, alternative names are suggested.
///
/// Lookups for all units run concurrently; findings are recorded unit by
/// unit in check order, so the warning order never depends on which lookup
/// answered first.
///
/// # Examples
///
/// ```rust
/// use name_guard::core::NameValidator;
///
/// # async fn example() {
/// let validator = NameValidator::default();
///
/// let result = validator.validate_property_name("Ghetto Gardens").await;
/// assert!(!result.is_valid);
/// assert_eq!(result.warnings[0], "Contains inappropriate language: 'ghetto'");
///
/// let result = validator.validate_property_name("Pleasant Valley").await;
/// assert!(result.is_valid && result.warnings.is_empty());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NameValidator {
    config: Arc<GuardConfig>,
    checks: Vec<Arc<dyn Check>>,
    suggestions: SuggestionGenerator,
    log: LogConfig,
}

impl Default for NameValidator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl NameValidator {
    /// Creates a builder with the default policy and offline lookups.
    pub fn builder() -> NameValidatorBuilder {
        NameValidatorBuilder::new()
    }

    /// A validator backed by the public slang and dictionary services.
    pub fn from_services(config: GuardConfig, services: Arc<ServiceConfig>) -> Result<Self> {
        let slang = UrbanDictionaryClient::new(services.clone())
            .map_err(|e| GuardError::service("urban_dictionary", e))?;
        let lexicon = FreeDictionaryClient::new(services)
            .map_err(|e| GuardError::service("dictionary", e))?;
        Ok(Self::builder()
            .config(config)
            .slang_lookup(Arc::new(slang))
            .lexical_lookup(Arc::new(lexicon))
            .build())
    }

    /// Returns the screening policy.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Returns the checks in evaluation order.
    pub fn checks(&self) -> &[Arc<dyn Check>] {
        &self.checks
    }

    /// Validates a candidate name. Never fails.
    #[instrument(skip(self), fields(checks = self.checks.len()))]
    pub async fn validate_property_name(&self, name: &str) -> ValidationResult {
        let lowered = name.to_lowercase();
        let mut units: Vec<&str> = lowered.split_whitespace().collect();
        units.push(&lowered);

        let unit_checks: Vec<&Arc<dyn Check>> = self
            .checks
            .iter()
            .filter(|c| c.scope() == CheckScope::EachUnit)
            .collect();
        let name_checks: Vec<&Arc<dyn Check>> = self
            .checks
            .iter()
            .filter(|c| c.scope() == CheckScope::FullName)
            .collect();

        let unit_findings = join_all(
            units
                .iter()
                .flat_map(|unit| unit_checks.iter().map(move |check| check.evaluate(unit))),
        )
        .await;
        let name_findings = join_all(name_checks.iter().map(|check| check.evaluate(name))).await;

        let mut result = ValidationResult::new();
        for issue in unit_findings.into_iter().chain(name_findings).flatten() {
            crate::log_check!(
                self.log,
                check = %issue.check_name,
                rule = %issue.rule,
                level = %issue.level,
                subject = %truncate_field(&issue.subject, self.log.max_field_length),
                "finding recorded"
            );
            result.record(issue);
        }

        if result.needs_suggestions() {
            result.suggestions = self.suggestions.generate(name).await;
        }

        info!(
            is_valid = result.is_valid,
            warnings = result.warnings.len(),
            suggestions = result.suggestions.len(),
            "validation complete"
        );
        result
    }

    /// Alternative names for `name`, regardless of whether it is valid.
    pub async fn generate_alternative_suggestions(&self, name: &str) -> Vec<String> {
        self.suggestions.generate(name).await
    }
}

/// Builder for [`NameValidator`].
///
/// Without explicit lookups the validator runs offline: slang and
/// dictionary lookups return nothing, phonetic matching uses Double
/// Metaphone.
///
/// # Examples
///
/// ```rust
/// use name_guard::config::GuardConfig;
/// use name_guard::core::NameValidator;
/// use name_guard::sources::InMemorySlangDictionary;
/// use std::sync::Arc;
///
/// let slang = InMemorySlangDictionary::new().with_definition("lit", "exciting", 5000);
/// let validator = NameValidator::builder()
///     .config(GuardConfig::default().with_blocklist_terms(["shady"]))
///     .slang_lookup(Arc::new(slang))
///     .build();
/// assert_eq!(validator.checks().len(), 5);
/// ```
#[derive(Debug)]
pub struct NameValidatorBuilder {
    config: Arc<GuardConfig>,
    slang: Option<Arc<dyn SlangLookup>>,
    lexicon: Option<Arc<dyn LexicalLookup>>,
    encoder: Option<Arc<dyn PhoneticEncoder>>,
    extra_checks: Vec<Arc<dyn Check>>,
    log: LogConfig,
}

impl Default for NameValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NameValidatorBuilder {
    pub fn new() -> Self {
        Self {
            config: Arc::new(GuardConfig::default()),
            slang: None,
            lexicon: None,
            encoder: None,
            extra_checks: Vec::new(),
            log: LogConfig::default(),
        }
    }

    /// Sets the screening policy.
    pub fn config(mut self, config: GuardConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Shares an existing policy.
    pub fn shared_config(mut self, config: Arc<GuardConfig>) -> Self {
        self.config = config;
        self
    }

    pub fn slang_lookup(mut self, lookup: Arc<dyn SlangLookup>) -> Self {
        self.slang = Some(lookup);
        self
    }

    /// Sets the dictionary used for connotations and suggestions.
    pub fn lexical_lookup(mut self, lookup: Arc<dyn LexicalLookup>) -> Self {
        self.lexicon = Some(lookup);
        self
    }

    pub fn phonetic_encoder(mut self, encoder: Arc<dyn PhoneticEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Appends a custom check after the built-in ones of the same scope.
    pub fn check(mut self, check: Arc<dyn Check>) -> Self {
        self.extra_checks.push(check);
        self
    }

    pub fn log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Builds the validator.
    ///
    /// Blank blocklist, cultural and vocabulary entries are ignored and a
    /// zero lookup timeout falls back to the default.
    pub fn build(self) -> NameValidator {
        let config = self.config;
        if let Err(e) = config.validate() {
            warn!(error = %e, "ignoring unusable policy entries");
        }
        let timeout = config.lookup_timeout();
        let slang = self
            .slang
            .unwrap_or_else(|| Arc::new(InMemorySlangDictionary::new()));
        let lexicon = self
            .lexicon
            .unwrap_or_else(|| Arc::new(InMemoryLexicon::new()));
        let encoder = self
            .encoder
            .unwrap_or_else(|| Arc::new(DoubleMetaphoneEncoder::default()));

        let mut checks: Vec<Arc<dyn Check>> = vec![
            Arc::new(LexicalCheck::new(ProfanityFilter::from_config(&config))),
            Arc::new(SlangCheck::new(
                slang,
                config.slang.clone(),
                timeout,
                self.log.clone(),
            )),
            Arc::new(ConnotationCheck::new(
                lexicon.clone(),
                config.connotation_terms.clone(),
                timeout,
                self.log.clone(),
            )),
            Arc::new(PhoneticCheck::new(encoder, &config.blocklist)),
            Arc::new(CulturalCheck::new(config.cultural_terms.clone())),
        ];
        checks.extend(self.extra_checks);
        debug!(checks = checks.len(), "validator built");

        let suggestions = SuggestionGenerator::new(
            lexicon,
            config.suggestions.clone(),
            timeout,
            self.log.clone(),
        );

        NameValidator {
            config,
            checks,
            suggestions,
            log: self.log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rule, ValidationIssue};
    use crate::sources::{InMemoryLexicon, SlangDefinition, SourceResult};
    use async_trait::async_trait;
    use std::time::Duration;

    #[derive(Debug)]
    struct LongName;

    #[async_trait]
    impl Check for LongName {
        fn name(&self) -> &str {
            "long_name"
        }

        fn scope(&self) -> CheckScope {
            CheckScope::FullName
        }

        async fn evaluate(&self, input: &str) -> Vec<ValidationIssue> {
            if input.len() > 20 {
                vec![ValidationIssue::new(self.name(), Rule::Cultural, input, "Name is long")]
            } else {
                Vec::new()
            }
        }
    }

    #[tokio::test]
    async fn test_each_word_and_full_name_are_checked() {
        let validator = NameValidator::default();
        let result = validator.validate_property_name("Crap Corner").await;

        // once for the word, once for the full name
        assert_eq!(
            result.warnings,
            vec![
                "Contains inappropriate language: 'crap'",
                "Contains inappropriate language: 'crap corner'",
            ]
        );
        assert!(!result.is_valid);
    }

    /// Answers after a short delay, so a zero timeout would drop it.
    #[derive(Debug)]
    struct SlowSlang;

    #[async_trait]
    impl SlangLookup for SlowSlang {
        async fn define(&self, term: &str) -> SourceResult<Vec<SlangDefinition>> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(match term {
                "lit" => vec![SlangDefinition::new("exciting", 5000)],
                _ => Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_unusable_policy_entries_are_ignored() {
        let config = GuardConfig {
            blocklist: vec![String::new(), "  ".to_string(), "hood".to_string()],
            lookup_timeout_ms: 0,
            ..GuardConfig::default()
        };
        let validator = NameValidator::builder()
            .config(config)
            .slang_lookup(Arc::new(SlowSlang))
            .build();

        let clean = validator.validate_property_name("Pleasant Valley").await;
        assert!(clean.is_valid);
        assert!(clean.warnings.is_empty());

        let lit = validator.validate_property_name("Lit").await;
        assert!(lit.is_valid);
        assert_eq!(lit.warnings[0], "'lit' has significant slang usage (5000 upvotes)");

        let hood = validator.validate_property_name("Hood").await;
        assert!(!hood.is_valid);
    }

    #[tokio::test]
    async fn test_all_checks_run_after_invalidation() {
        let validator = NameValidator::default();
        let result = validator.validate_property_name("Ghetto Plantation").await;

        assert!(!result.is_valid);
        assert_eq!(result.issues_by_rule(Rule::Profanity).len(), 2);
        assert_eq!(result.issues_by_rule(Rule::Cultural).len(), 1);
        assert_eq!(
            result.warnings.last().map(String::as_str),
            Some("Potentially sensitive term 'plantation': Historical connection to slavery")
        );
    }

    #[tokio::test]
    async fn test_suggestions_only_when_something_fired() {
        let lexicon = InMemoryLexicon::new()
            .with_sense("valley", "low land", ["dale", "vale"])
            .with_sense("colonial", "of a colony", ["provincial"]);
        let validator = NameValidator::builder()
            .lexical_lookup(Arc::new(lexicon))
            .build();

        let clean = validator.validate_property_name("Pleasant Valley").await;
        assert!(clean.suggestions.is_empty());

        let warned = validator.validate_property_name("Colonial Valley").await;
        assert!(warned.is_valid);
        assert_eq!(
            warned.suggestions,
            vec!["Colonial Dale", "Colonial Vale", "Provincial Valley"]
        );

        let standalone = validator
            .generate_alternative_suggestions("Pleasant Valley")
            .await;
        assert_eq!(standalone, vec!["Pleasant Dale", "Pleasant Vale"]);
    }

    #[tokio::test]
    async fn test_custom_check_runs_last() {
        let validator = NameValidator::builder()
            .check(Arc::new(LongName))
            .build();
        assert_eq!(validator.checks().len(), 6);

        let result = validator
            .validate_property_name("The Colonial Residences at Main")
            .await;
        assert_eq!(result.warnings.last().map(String::as_str), Some("Name is long"));
    }

    #[tokio::test]
    async fn test_empty_name_is_valid() {
        let result = NameValidator::default().validate_property_name("").await;
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }
}
