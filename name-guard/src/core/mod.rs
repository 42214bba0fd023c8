//! Core validation types and the orchestrator.

mod check;
mod level;
mod result;
mod validator;

pub use check::{Check, CheckScope};
pub use level::{Level, Rule};
pub use result::{ValidationIssue, ValidationResult};
pub use validator::{NameValidator, NameValidatorBuilder};
