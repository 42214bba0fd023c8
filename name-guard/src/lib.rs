//! # Name Guard - Property Name Screening
//!
//! Name Guard screens proposed property names (apartment complexes,
//! developments, buildings) before they go to marketing, then looks for
//! existing businesses nearby that already use the name.
//!
//! ## Quick Start
//!
//! ```rust
//! use name_guard::prelude::*;
//!
//! # async fn example() {
//! let validator = NameValidator::default();
//!
//! let result = validator.validate_property_name("Colonial Heights").await;
//! assert!(result.is_valid);
//! assert_eq!(
//!     result.warnings,
//!     vec!["Potentially sensitive term 'colonial': Historical connection to colonialism"]
//! );
//! # }
//! ```
//!
//! ## How a name is screened
//!
//! The name is lowercased and split into words. Every word, and then the
//! whole name, goes through:
//!
//! - **Lexical filter**: built-in profanity list plus a custom blocklist
//! - **Slang lookup**: popularity and negative meanings in a slang dictionary
//! - **Connotation lookup**: negative wording in dictionary definitions
//!
//! The whole name is then compared by sound against the blocklist
//! (**phonetic check**) and searched for historically loaded terms
//! (**cultural check**).
//!
//! Every rule has a fixed severity ([`core::Rule::level`]). Profanity and
//! popular explicit slang make a name invalid; the other findings are
//! warnings for a human to review. Whenever anything is found, up to five
//! alternative names are suggested by swapping words for synonyms.
//!
//! External lookups are best-effort: an unreachable or slow service simply
//! contributes nothing to the verdict.
//!
//! ## Conflict search
//!
//! [`search::ConflictSearch`] validates the name, geocodes an address and
//! lists businesses within a radius whose names contain the candidate name,
//! nearest first. Invalid names never reach the geocoder.
//!
//! ## Crate layout
//!
//! - [`core`]: result types, the [`core::Check`] trait and [`core::NameValidator`]
//! - [`checks`]: the individual screening checks and the suggestion generator
//! - [`sources`]: slang, dictionary, phonetic, geocoding and places backends
//! - [`search`]: geodesic distance and the conflict search
//! - [`config`], [`error`], [`logging`], [`security`], [`formatters`], [`command`]

pub mod checks;
pub mod command;
pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod search;
pub mod security;
pub mod sources;
