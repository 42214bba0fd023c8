//! Prelude for commonly used types and traits in name-guard.

pub use crate::config::{GuardConfig, ServiceConfig};
pub use crate::core::{Check, Level, NameValidator, Rule, ValidationResult};
pub use crate::error::{ErrorContext, GuardError, Result};
pub use crate::formatters::{FormatterConfig, ResultFormatter};
pub use crate::logging::LogConfig;
pub use crate::search::{ConflictSearch, SearchResponse};
