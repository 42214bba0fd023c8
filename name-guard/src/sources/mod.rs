//! External services the validator and the conflict search depend on.
//!
//! Every service is reached through a capability trait so the pipeline can
//! run against HTTP clients in production and in-memory tables in tests:
//!
//! - [`SlangLookup`]: popular slang definitions for a term
//! - [`LexicalLookup`]: dictionary senses (definition plus synonyms)
//! - [`PhoneticEncoder`]: sound-based code for a piece of text
//! - [`Geocoder`]: address to coordinates
//! - [`PlaceSearch`]: businesses near a point
//!
//! Lookups made during validation go through [`guarded`], which turns any
//! failure or timeout into an empty result.

mod dictionary;
mod error;
mod geocode;
mod http;
mod memory;
mod phonetic;
mod places;
mod urban;

pub use dictionary::FreeDictionaryClient;
pub use error::{SourceError, SourceResult};
pub use geocode::{FallbackGeocoder, Geocoder, GoogleGeocoder, NominatimGeocoder};
pub use memory::{InMemoryLexicon, InMemorySlangDictionary, StaticGeocoder, StaticPlaces};
pub use phonetic::DoubleMetaphoneEncoder;
pub use places::{GooglePlacesClient, NearbyRequest, PlaceCandidate, PlaceDetails, PlaceSearch};
pub use urban::UrbanDictionaryClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use crate::logging::LogConfig;

/// One slang definition with its popularity signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlangDefinition {
    /// Definition text as published
    pub text: String,
    /// Up-votes or equivalent popularity score
    pub popularity: u64,
}

impl SlangDefinition {
    pub fn new(text: impl Into<String>, popularity: u64) -> Self {
        Self {
            text: text.into(),
            popularity,
        }
    }
}

/// One dictionary sense of a word.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sense {
    /// Definition text
    pub definition: String,
    /// Words or phrases with the same meaning
    pub synonyms: Vec<String>,
}

impl Sense {
    pub fn new<I, S>(definition: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            definition: definition.into(),
            synonyms: synonyms.into_iter().map(Into::into).collect(),
        }
    }
}

/// Looks up slang definitions for a term.
#[async_trait]
pub trait SlangLookup: Debug + Send + Sync {
    /// Returns every known definition; an unknown term yields an empty list.
    async fn define(&self, term: &str) -> SourceResult<Vec<SlangDefinition>>;
}

/// Looks up dictionary senses for a word.
#[async_trait]
pub trait LexicalLookup: Debug + Send + Sync {
    /// Returns every sense; an unknown word yields an empty list.
    async fn senses(&self, word: &str) -> SourceResult<Vec<Sense>>;
}

/// Encodes text into a phonetic code.
///
/// Encoding is a pure function of the input. `None` means the text has no
/// encodable content.
pub trait PhoneticEncoder: Debug + Send + Sync {
    fn encode(&self, text: &str) -> Option<String>;
}

/// Runs a lookup under a timeout, converting any failure into "no signal".
///
/// This is the single error boundary of the validation pipeline: a failed
/// or slow call for one term never affects the rest of the run.
pub async fn guarded<T, F>(
    service: &str,
    subject: &str,
    timeout: Duration,
    log: &LogConfig,
    lookup: F,
) -> Vec<T>
where
    F: Future<Output = SourceResult<Vec<T>>>,
{
    match tokio::time::timeout(timeout, lookup).await {
        Ok(Ok(values)) => values,
        Ok(Err(err)) => {
            crate::log_lookup!(log, service, subject, error = %err, "lookup failed, ignoring");
            Vec::new()
        }
        Err(_) => {
            crate::log_lookup!(
                log,
                service,
                subject,
                timeout_ms = timeout.as_millis() as u64,
                "lookup timed out, ignoring"
            );
            Vec::new()
        }
    }
}
