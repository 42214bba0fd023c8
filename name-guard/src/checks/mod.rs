//! The screening checks run by [`NameValidator`](crate::core::NameValidator).
//!
//! | Check | Scope | Rule | Invalidates |
//! |-------|-------|------|-------------|
//! | [`LexicalCheck`] | each unit | profanity | yes |
//! | [`SlangCheck`] | each unit | slang usage / slang meaning | meaning only |
//! | [`ConnotationCheck`] | each unit | connotation | no |
//! | [`PhoneticCheck`] | full name | phonetic | no |
//! | [`CulturalCheck`] | full name | cultural | no |
//!
//! [`SuggestionGenerator`] is not a check; the validator calls it when a
//! run produced any finding.

mod connotation;
mod cultural;
mod lexical;
mod phonetic;
mod slang;
mod suggestions;

pub use connotation::ConnotationCheck;
pub use cultural::CulturalCheck;
pub use lexical::{LexicalCheck, ProfanityFilter};
pub use phonetic::PhoneticCheck;
pub use slang::SlangCheck;
pub use suggestions::{title_case, SuggestionGenerator};
