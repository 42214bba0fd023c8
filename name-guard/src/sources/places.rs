//! Google Places nearby search and place details.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

use super::geocode::{check_google_status, GoogleGeometry};
use super::http::{build_client, handle_response};
use super::{SourceError, SourceResult};
use crate::config::ServiceConfig;
use crate::search::Coordinates;

/// Largest radius the Places nearby search accepts, in meters.
pub const MAX_PLACES_RADIUS_METERS: f64 = 50_000.0;

/// A nearby-search request.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRequest {
    /// Search center
    pub location: Coordinates,
    /// Search radius in meters
    pub radius_meters: f64,
    /// Keyword the business name should relate to
    pub keyword: String,
}

/// A business returned by a nearby search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub place_id: String,
    pub name: String,
    pub location: Coordinates,
    /// Short address ("vicinity") returned by nearby search
    pub vicinity: Option<String>,
    pub types: Vec<String>,
}

/// Extra information fetched for a single place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    pub website: Option<String>,
    pub url: Option<String>,
    pub types: Vec<String>,
    pub business_status: Option<String>,
}

/// Searches a business directory around a point.
#[async_trait]
pub trait PlaceSearch: Debug + Send + Sync {
    /// Businesses near the request location matching its keyword.
    async fn nearby(&self, request: &NearbyRequest) -> SourceResult<Vec<PlaceCandidate>>;

    /// Details for one place returned by [`PlaceSearch::nearby`].
    async fn details(&self, place_id: &str) -> SourceResult<PlaceDetails>;

    /// Label recorded as the `source` of every conflict.
    fn source_name(&self) -> &str;
}

/// Google Places API client.
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    config: Arc<ServiceConfig>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: String,
    name: String,
    geometry: GoogleGeometry,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<DetailsResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    business_status: Option<String>,
}

impl GooglePlacesClient {
    /// Create a new client. Fails when no API key is configured.
    pub fn new(config: Arc<ServiceConfig>) -> SourceResult<Self> {
        if config.api_key().is_none() {
            return Err(SourceError::Configuration {
                message: "Google Places requires GOOGLE_MAPS_API_KEY".to_string(),
            });
        }
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    fn key(&self) -> &str {
        self.config
            .api_key()
            .map(|k| k.expose())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PlaceSearch for GooglePlacesClient {
    async fn nearby(&self, request: &NearbyRequest) -> SourceResult<Vec<PlaceCandidate>> {
        let url = format!(
            "{}/maps/api/place/nearbysearch/json",
            self.config.google_endpoint()
        );
        if request.radius_meters > MAX_PLACES_RADIUS_METERS {
            debug!(
                requested = request.radius_meters,
                "clamping nearby-search radius to the API maximum"
            );
        }
        let radius = format!("{:.0}", request.radius_meters.min(MAX_PLACES_RADIUS_METERS));
        let location = format!("{},{}", request.location.lat, request.location.lng);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("keyword", request.keyword.as_str()),
                ("type", "establishment"),
                ("key", self.key()),
            ])
            .send()
            .await?;
        let body: NearbyResponse = handle_response(response).await?;

        if !check_google_status(&body.status, body.error_message)? {
            return Ok(Vec::new());
        }
        Ok(body
            .results
            .into_iter()
            .map(|r| PlaceCandidate {
                place_id: r.place_id,
                name: r.name,
                location: Coordinates::new(r.geometry.location.lat, r.geometry.location.lng),
                vicinity: r.vicinity,
                types: r.types,
            })
            .collect())
    }

    async fn details(&self, place_id: &str) -> SourceResult<PlaceDetails> {
        let url = format!(
            "{}/maps/api/place/details/json",
            self.config.google_endpoint()
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("place_id", place_id),
                (
                    "fields",
                    "name,formatted_address,rating,website,types,url,business_status",
                ),
                ("key", self.key()),
            ])
            .send()
            .await?;
        let body: DetailsResponse = handle_response(response).await?;

        if !check_google_status(&body.status, body.error_message)? {
            return Err(SourceError::ServerError {
                status: 404,
                message: format!("no details for place {place_id}"),
            });
        }
        let result = body.result.ok_or_else(|| SourceError::Serialization {
            message: "details response without result".to_string(),
        })?;
        Ok(PlaceDetails {
            formatted_address: result.formatted_address,
            rating: result.rating,
            website: result.website,
            url: result.url,
            types: result.types,
            business_status: result.business_status,
        })
    }

    fn source_name(&self) -> &str {
        "Google Places"
    }
}
