//! Address geocoding through Google with a Nominatim fallback.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, warn};

use super::http::{build_client, handle_response};
use super::{SourceError, SourceResult};
use crate::config::ServiceConfig;
use crate::search::Coordinates;

/// Resolves a free-form address to coordinates.
#[async_trait]
pub trait Geocoder: Debug + Send + Sync {
    /// Returns `Ok(None)` when the service knows no match for the address.
    async fn geocode(&self, address: &str) -> SourceResult<Option<Coordinates>>;
}

/// Google Geocoding API client.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    config: Arc<ServiceConfig>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct GoogleGeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleGeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleGeocodeResult {
    geometry: GoogleGeometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleGeometry {
    pub(crate) location: GoogleLatLng,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleLatLng {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

impl GoogleGeocoder {
    /// Create a new client. Fails when no API key is configured.
    pub fn new(config: Arc<ServiceConfig>) -> SourceResult<Self> {
        if config.api_key().is_none() {
            return Err(SourceError::Configuration {
                message: "Google geocoding requires GOOGLE_MAPS_API_KEY".to_string(),
            });
        }
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }
}

/// Maps a Google API `status` field to an error, `Ok(false)` for no results.
pub(crate) fn check_google_status(status: &str, message: Option<String>) -> SourceResult<bool> {
    let message = message.unwrap_or_else(|| status.to_string());
    match status {
        "OK" => Ok(true),
        "ZERO_RESULTS" | "NOT_FOUND" => Ok(false),
        "REQUEST_DENIED" => Err(SourceError::Authentication { message }),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(SourceError::RateLimited {
            retry_after_secs: None,
        }),
        "INVALID_REQUEST" => Err(SourceError::InvalidRequest { message }),
        _ => Err(SourceError::ServerError {
            status: 200,
            message,
        }),
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> SourceResult<Option<Coordinates>> {
        let url = format!("{}/maps/api/geocode/json", self.config.google_endpoint());
        let key = self
            .config
            .api_key()
            .map(|k| k.expose())
            .unwrap_or_default();

        let response = self
            .client
            .get(&url)
            .query(&[("address", address), ("key", key)])
            .send()
            .await?;
        let body: GoogleGeocodeResponse = handle_response(response).await?;

        if !check_google_status(&body.status, body.error_message)? {
            return Ok(None);
        }
        Ok(body.results.first().map(|r| {
            Coordinates::new(r.geometry.location.lat, r.geometry.location.lng)
        }))
    }
}

/// OpenStreetMap Nominatim search client.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    config: Arc<ServiceConfig>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    /// Create a new client with the given configuration.
    pub fn new(config: Arc<ServiceConfig>) -> SourceResult<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> SourceResult<Option<Coordinates>> {
        let url = format!("{}/search", self.config.nominatim_endpoint());

        let response = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await?;
        let places: Vec<NominatimPlace> = handle_response(response).await?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };
        let parse = |value: &str| {
            value.parse::<f64>().map_err(|e| SourceError::Serialization {
                message: format!("bad coordinate '{value}': {e}"),
            })
        };
        Ok(Some(Coordinates::new(parse(&place.lat)?, parse(&place.lon)?)))
    }
}

/// Tries each geocoder in turn and returns the first match.
///
/// A geocoder that errors is logged and skipped; the chain only reports
/// `Ok(None)` when nobody produced coordinates.
#[derive(Debug, Clone)]
pub struct FallbackGeocoder {
    chain: Vec<Arc<dyn Geocoder>>,
}

impl FallbackGeocoder {
    pub fn new(chain: Vec<Arc<dyn Geocoder>>) -> Self {
        Self { chain }
    }

    /// Google first, Nominatim second. Without an API key only Nominatim is used.
    pub fn from_config(config: Arc<ServiceConfig>) -> SourceResult<Self> {
        let mut chain: Vec<Arc<dyn Geocoder>> = Vec::new();
        if config.api_key().is_some() {
            chain.push(Arc::new(GoogleGeocoder::new(config.clone())?));
        }
        chain.push(Arc::new(NominatimGeocoder::new(config)?));
        Ok(Self { chain })
    }
}

#[async_trait]
impl Geocoder for FallbackGeocoder {
    async fn geocode(&self, address: &str) -> SourceResult<Option<Coordinates>> {
        for (position, geocoder) in self.chain.iter().enumerate() {
            match geocoder.geocode(address).await {
                Ok(Some(coords)) => return Ok(Some(coords)),
                Ok(None) => debug!(position, "geocoder found no match, trying next"),
                Err(err) => warn!(position, error = %err, "geocoder failed, trying next"),
            }
        }
        Ok(None)
    }
}
