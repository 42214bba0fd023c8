//! In-memory implementations of the source traits.
//!
//! They back offline runs (`name-guard --offline`), tests and benchmarks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{
    Geocoder, LexicalLookup, NearbyRequest, PlaceCandidate, PlaceDetails, PlaceSearch, Sense,
    SlangDefinition, SlangLookup, SourceError, SourceResult,
};
use crate::search::Coordinates;

/// Slang definitions held in a map keyed by lowercase term.
#[derive(Debug, Default, Clone)]
pub struct InMemorySlangDictionary {
    terms: HashMap<String, Vec<SlangDefinition>>,
}

impl InMemorySlangDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one definition for a term.
    pub fn with_definition(mut self, term: &str, text: &str, popularity: u64) -> Self {
        self.terms
            .entry(term.to_lowercase())
            .or_default()
            .push(SlangDefinition::new(text, popularity));
        self
    }
}

#[async_trait]
impl SlangLookup for InMemorySlangDictionary {
    async fn define(&self, term: &str) -> SourceResult<Vec<SlangDefinition>> {
        Ok(self
            .terms
            .get(&term.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

/// Dictionary senses held in a map keyed by lowercase word.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLexicon {
    words: HashMap<String, Vec<Sense>>,
}

impl InMemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one sense for a word.
    pub fn with_sense<I, S>(mut self, word: &str, definition: &str, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words
            .entry(word.to_lowercase())
            .or_default()
            .push(Sense::new(definition, synonyms));
        self
    }
}

#[async_trait]
impl LexicalLookup for InMemoryLexicon {
    async fn senses(&self, word: &str) -> SourceResult<Vec<Sense>> {
        Ok(self
            .words
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

/// A geocoder that always answers the same way and counts its calls.
#[derive(Debug)]
pub struct StaticGeocoder {
    answer: Option<Coordinates>,
    fail: bool,
    calls: AtomicUsize,
}

impl StaticGeocoder {
    /// Always resolves to `coords`.
    pub fn new(coords: Coordinates) -> Self {
        Self {
            answer: Some(coords),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Never finds a match.
    pub fn empty() -> Self {
        Self {
            answer: None,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails with a network error.
    pub fn failing() -> Self {
        Self {
            answer: None,
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `geocode` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, _address: &str) -> SourceResult<Option<Coordinates>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SourceError::Network {
                message: "static geocoder configured to fail".to_string(),
            });
        }
        Ok(self.answer)
    }
}

/// A fixed business directory that counts its calls.
#[derive(Debug, Default)]
pub struct StaticPlaces {
    candidates: Vec<PlaceCandidate>,
    details: HashMap<String, PlaceDetails>,
    fail_nearby: bool,
    nearby_calls: AtomicUsize,
    last_radius_meters: std::sync::Mutex<Option<f64>>,
}

impl StaticPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a place returned by every nearby search.
    pub fn with_place(mut self, candidate: PlaceCandidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// Adds details for a place; places without details fail the lookup.
    pub fn with_details(mut self, place_id: &str, details: PlaceDetails) -> Self {
        self.details.insert(place_id.to_string(), details);
        self
    }

    /// Makes every nearby search fail.
    pub fn failing() -> Self {
        Self {
            fail_nearby: true,
            ..Self::default()
        }
    }

    /// Number of `nearby` calls received.
    pub fn nearby_calls(&self) -> usize {
        self.nearby_calls.load(Ordering::SeqCst)
    }

    /// Radius of the most recent nearby search, in meters.
    pub fn last_radius_meters(&self) -> Option<f64> {
        self.last_radius_meters
            .lock()
            .map(|guard| *guard)
            .unwrap_or(None)
    }
}

#[async_trait]
impl PlaceSearch for StaticPlaces {
    async fn nearby(&self, request: &NearbyRequest) -> SourceResult<Vec<PlaceCandidate>> {
        self.nearby_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_radius_meters.lock() {
            *last = Some(request.radius_meters);
        }
        if self.fail_nearby {
            return Err(SourceError::ServerError {
                status: 500,
                message: "static directory configured to fail".to_string(),
            });
        }
        Ok(self.candidates.clone())
    }

    async fn details(&self, place_id: &str) -> SourceResult<PlaceDetails> {
        self.details
            .get(place_id)
            .cloned()
            .ok_or_else(|| SourceError::ServerError {
                status: 404,
                message: format!("no details for place {place_id}"),
            })
    }

    fn source_name(&self) -> &str {
        "Google Places"
    }
}
