//! Severity levels and the per-rule severity table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity level of a finding.
///
/// Levels are ordered by severity: `Error > Warning`. Only `Error` findings
/// make a name invalid; `Warning` findings are surfaced for human review.
///
/// # Examples
///
/// ```rust
/// use name_guard::core::Level;
///
/// assert!(Level::Error > Level::Warning);
/// assert!(Level::Error.invalidates());
/// assert!(!Level::Warning.invalidates());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Flag for review; the name stays valid
    #[default]
    Warning = 1,
    /// Reject the name outright
    Error = 2,
}

impl Level {
    /// Returns the string representation of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    /// Whether a finding at this level sets `is_valid = false`.
    pub fn invalidates(&self) -> bool {
        matches!(self, Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The individual rule that produced a finding.
///
/// Each rule carries a fixed severity. Vocabulary hits and popular explicit
/// slang reject a name; sound-alikes, dictionary connotations and cultural
/// associations only warn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Token or name matched the profanity list or the custom blocklist
    Profanity,
    /// Summed slang popularity above the usage threshold
    SlangUsage,
    /// A popular slang definition carries a negative theme
    SlangMeaning,
    /// A dictionary definition is marked offensive or derogatory
    Connotation,
    /// Full name sounds like a blocklisted term
    Phonetic,
    /// Name contains a historically or culturally loaded term
    Cultural,
}

impl Rule {
    /// The declared severity of this rule.
    pub const fn level(&self) -> Level {
        match self {
            Rule::Profanity | Rule::SlangMeaning => Level::Error,
            Rule::SlangUsage | Rule::Connotation | Rule::Phonetic | Rule::Cultural => {
                Level::Warning
            }
        }
    }

    /// Shorthand for `self.level().invalidates()`.
    pub fn invalidates(&self) -> bool {
        self.level().invalidates()
    }

    /// Returns the string representation of the rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Profanity => "profanity",
            Rule::SlangUsage => "slang_usage",
            Rule::SlangMeaning => "slang_meaning",
            Rule::Connotation => "connotation",
            Rule::Phonetic => "phonetic",
            Rule::Cultural => "cultural",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
