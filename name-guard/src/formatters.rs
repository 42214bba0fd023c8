//! Result formatting for validation verdicts and conflict searches.
//!
//! # Examples
//!
//! ```rust
//! use name_guard::core::ValidationResult;
//! use name_guard::formatters::{FormatterConfig, HumanFormatter, ResultFormatter};
//!
//! let formatter = HumanFormatter::with_config(FormatterConfig::minimal());
//! let output = formatter.format(&ValidationResult::new()).unwrap();
//! assert!(output.contains("Name is valid"));
//! ```

use serde::Serialize;
use std::fmt::{self, Write};

use crate::core::{Level, ValidationResult};
use crate::error::{GuardError, Result};
use crate::search::{Conflict, SearchResponse, SearchSummary};

/// Configuration options for formatting results.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include the structured issue list (rule and level of each warning)
    pub include_issues: bool,
    /// Include alternative-name suggestions
    pub include_suggestions: bool,
    /// Maximum number of warnings to display (-1 for all)
    pub max_warnings: i32,
    /// Whether to use colorized output (for human formatter)
    pub use_colors: bool,
    /// Whether to include timestamps in output
    pub include_timestamps: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_issues: true,
            include_suggestions: true,
            max_warnings: -1,
            use_colors: true,
            include_timestamps: true,
        }
    }
}

impl FormatterConfig {
    /// Creates a minimal configuration showing only the verdict and warnings.
    pub fn minimal() -> Self {
        Self {
            include_issues: false,
            include_suggestions: false,
            max_warnings: -1,
            use_colors: false,
            include_timestamps: false,
        }
    }

    /// Creates a detailed configuration showing everything.
    pub fn detailed() -> Self {
        Self::default()
    }

    /// Creates a configuration suitable for CI/CD environments.
    pub fn ci() -> Self {
        Self {
            include_issues: true,
            include_suggestions: true,
            max_warnings: 50,
            use_colors: false,
            include_timestamps: true,
        }
    }

    pub fn with_issues(mut self, include: bool) -> Self {
        self.include_issues = include;
        self
    }

    pub fn with_suggestions(mut self, include: bool) -> Self {
        self.include_suggestions = include;
        self
    }

    /// Sets the maximum number of warnings to display.
    pub fn with_max_warnings(mut self, max: i32) -> Self {
        self.max_warnings = max;
        self
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn warning_limit(&self, available: usize) -> usize {
        if self.max_warnings < 0 {
            available
        } else {
            available.min(self.max_warnings as usize)
        }
    }
}

/// Converts results into an output format.
pub trait ResultFormatter {
    /// Formats a validation verdict.
    fn format(&self, result: &ValidationResult) -> Result<String>;

    /// Formats the outcome of a conflict search.
    fn format_search(&self, response: &SearchResponse) -> Result<String>;
}

fn render_error(err: fmt::Error) -> GuardError {
    GuardError::Internal(format!("Failed to render output: {err}"))
}

fn filtered(result: &ValidationResult, config: &FormatterConfig) -> ValidationResult {
    let mut filtered = result.clone();
    let keep = config.warning_limit(filtered.warnings.len());
    filtered.warnings.truncate(keep);
    if config.include_issues {
        filtered.issues.truncate(keep);
    } else {
        filtered.issues.clear();
    }
    if !config.include_suggestions {
        filtered.suggestions.clear();
    }
    filtered
}

/// Formats results as JSON.
///
/// ```rust
/// use name_guard::core::ValidationResult;
/// use name_guard::formatters::{JsonFormatter, ResultFormatter};
///
/// let json = JsonFormatter::new().with_pretty(false).format(&ValidationResult::new()).unwrap();
/// assert_eq!(json, r#"{"is_valid":true,"warnings":[],"suggestions":[]}"#);
/// ```
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

#[derive(Serialize)]
struct SearchReport {
    #[serde(flatten)]
    response: SearchResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SearchSummary>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map_err(|e| GuardError::Internal(format!("Failed to serialize result to JSON: {e}")))
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, result: &ValidationResult) -> Result<String> {
        self.to_json(&filtered(result, &self.config))
    }

    fn format_search(&self, response: &SearchResponse) -> Result<String> {
        let mut response = response.clone();
        response.validation_results = filtered(&response.validation_results, &self.config);
        let summary = (self.config.include_timestamps && !response.is_error())
            .then(|| response.summary());
        self.to_json(&SearchReport { response, summary })
    }
}

/// Formats results for a terminal.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.config.use_colors {
            format!("\x1b[{color}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn write_validation(&self, out: &mut String, result: &ValidationResult) -> fmt::Result {
        if result.is_valid {
            writeln!(out, "✅ {}", self.paint("Name is valid", "32"))?;
        } else {
            writeln!(out, "❌ {}", self.paint("Name is invalid", "31"))?;
        }

        let shown = self.config.warning_limit(result.warnings.len());
        if shown > 0 {
            writeln!(out)?;
            writeln!(out, "Warnings:")?;
            for (index, warning) in result.warnings.iter().take(shown).enumerate() {
                let issue = result.issues.get(index).filter(|_| self.config.include_issues);
                match issue {
                    Some(issue) if issue.level == Level::Error => {
                        writeln!(out, "   🚨 {} [{}]", self.paint(warning, "31"), issue.rule)?
                    }
                    Some(issue) => {
                        writeln!(out, "   ⚠️  {} [{}]", self.paint(warning, "33"), issue.rule)?
                    }
                    None => writeln!(out, "   ⚠️  {warning}")?,
                }
            }
            if shown < result.warnings.len() {
                writeln!(out, "   ... and {} more", result.warnings.len() - shown)?;
            }
        }

        if self.config.include_suggestions && !result.suggestions.is_empty() {
            writeln!(out)?;
            writeln!(out, "💡 Suggestions:")?;
            for suggestion in &result.suggestions {
                writeln!(out, "   • {suggestion}")?;
            }
        }
        Ok(())
    }

    fn write_conflict(&self, out: &mut String, conflict: &Conflict) -> fmt::Result {
        writeln!(
            out,
            "• {} ({} miles away)",
            self.paint(&conflict.name, "1"),
            conflict.distance_miles
        )?;
        writeln!(out, "  Type: {}", conflict.business_type())?;
        writeln!(out, "  Address: {}", conflict.address)?;
        if let Some(rating) = conflict.rating {
            let stars = "⭐".repeat(rating.round().max(0.0) as usize);
            writeln!(out, "  Rating: {stars} ({rating})")?;
        }
        if let Some(website) = &conflict.website {
            writeln!(out, "  Website: {website}")?;
        }
        if let Some(url) = &conflict.maps_url {
            writeln!(out, "  Google Maps: {url}")?;
        }
        writeln!(out, "  Source: {}", conflict.source)
    }

    fn write_search(&self, out: &mut String, response: &SearchResponse) -> fmt::Result {
        if let Some(error) = &response.error {
            writeln!(out, "⚠️  {}", self.paint(&format!("Error: {error}"), "31"))?;
            writeln!(out)?;
            return self.write_validation(out, &response.validation_results);
        }

        if response.potential_conflicts.is_empty() {
            writeln!(out, "✅ {}", self.paint("Valid: no conflicts found", "32"))?;
        } else {
            writeln!(
                out,
                "⚠️  {}",
                self.paint(
                    &format!("Found {} conflicts", response.potential_conflicts.len()),
                    "33"
                )
            )?;
        }
        if self.config.include_timestamps {
            if let Some(timestamp) = response.timestamp {
                writeln!(out, "Searched: {}", timestamp.to_rfc3339())?;
            }
        }
        for conflict in &response.potential_conflicts {
            writeln!(out)?;
            self.write_conflict(out, conflict)?;
        }

        if !response.validation_results.warnings.is_empty() {
            writeln!(out)?;
            self.write_validation(out, &response.validation_results)?;
        }
        Ok(())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for HumanFormatter {
    fn format(&self, result: &ValidationResult) -> Result<String> {
        let mut out = String::new();
        self.write_validation(&mut out, result).map_err(render_error)?;
        Ok(out)
    }

    fn format_search(&self, response: &SearchResponse) -> Result<String> {
        let mut out = String::new();
        self.write_search(&mut out, response).map_err(render_error)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rule, ValidationIssue};

    fn flagged() -> ValidationResult {
        let mut result = ValidationResult::new();
        result.record(ValidationIssue::new(
            "lexical",
            Rule::Profanity,
            "ghetto",
            "Contains inappropriate language: 'ghetto'",
        ));
        result.record(ValidationIssue::new(
            "cultural",
            Rule::Cultural,
            "ghetto colonial",
            "Potentially sensitive term 'colonial': Historical connection to colonialism",
        ));
        result.suggestions = vec!["Slum Colonial".to_string()];
        result
    }

    fn conflict() -> Conflict {
        Conflict {
            name: "Sunset Gardens Apartments".to_string(),
            address: "1 Sunset Rd".to_string(),
            distance_miles: 1.25,
            rating: Some(4.4),
            website: Some("https://sunset.example".to_string()),
            maps_url: None,
            types: vec!["apartment".to_string()],
            source: "Google Places".to_string(),
        }
    }

    #[test]
    fn test_human_validation_output() {
        let formatter = HumanFormatter::with_config(FormatterConfig::default().with_colors(false));
        let output = formatter.format(&flagged()).unwrap();

        assert!(output.contains("❌ Name is invalid"));
        assert!(output.contains("🚨 Contains inappropriate language: 'ghetto' [profanity]"));
        assert!(output.contains("[cultural]"));
        assert!(output.contains("• Slum Colonial"));
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_human_respects_warning_limit() {
        let formatter = HumanFormatter::with_config(FormatterConfig::minimal().with_max_warnings(1));
        let output = formatter.format(&flagged()).unwrap();
        assert!(output.contains("... and 1 more"));
        assert!(!output.contains("Suggestions"));
    }

    #[test]
    fn test_human_search_output() {
        let formatter = HumanFormatter::with_config(FormatterConfig::minimal());
        let response = SearchResponse::completed(vec![conflict()], ValidationResult::new());
        let output = formatter.format_search(&response).unwrap();

        assert!(output.contains("Found 1 conflicts"));
        assert!(output.contains("• Sunset Gardens Apartments (1.25 miles away)"));
        assert!(output.contains("Type: Apartment Complex"));
        assert!(output.contains("Rating: ⭐⭐⭐⭐ (4.4)"));
    }

    #[test]
    fn test_human_search_error() {
        let formatter = HumanFormatter::with_config(FormatterConfig::minimal());
        let response = SearchResponse::failed("Invalid property name", flagged());
        let output = formatter.format_search(&response).unwrap();
        assert!(output.contains("Error: Invalid property name"));
        assert!(output.contains("Name is invalid"));
    }

    #[test]
    fn test_json_minimal_drops_issues_and_suggestions() {
        let formatter = JsonFormatter::with_config(FormatterConfig::minimal());
        let value: serde_json::Value =
            serde_json::from_str(&formatter.format(&flagged()).unwrap()).unwrap();
        assert_eq!(value["is_valid"], false);
        assert_eq!(value["warnings"].as_array().unwrap().len(), 2);
        assert!(value.get("issues").is_none());
        assert!(value["suggestions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_json_search_includes_summary() {
        let formatter = JsonFormatter::new().with_pretty(false);
        let response = SearchResponse::completed(vec![conflict()], ValidationResult::new());
        let value: serde_json::Value =
            serde_json::from_str(&formatter.format_search(&response).unwrap()).unwrap();

        assert_eq!(value["total_results"], 1);
        assert_eq!(value["summary"]["total_conflicts"], 1);
        assert_eq!(
            value["summary"]["closest_match"]["name"],
            "Sunset Gardens Apartments"
        );
    }
}
