//! Geographic conflict search.
//!
//! [`ConflictSearch`] looks for existing businesses near an address whose
//! names contain the candidate property name. The name is validated first
//! and an invalid name never reaches the geocoder or the business directory.
//!
//! ```rust,no_run
//! use name_guard::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> name_guard::error::Result<()> {
//! let services = Arc::new(ServiceConfig::from_env()?);
//! let search = ConflictSearch::from_services(Arc::new(NameValidator::default()), services)?;
//!
//! let response = search
//!     .search_property_name("Sunset Gardens", "123 Main St, Austin, TX", 5.0)
//!     .await;
//! for conflict in &response.potential_conflicts {
//!     println!("{} ({} miles)", conflict.name, conflict.distance_miles);
//! }
//! # Ok(())
//! # }
//! ```

mod conflict;
mod geo;

pub use conflict::{Conflict, SearchResponse, SearchSummary};
pub use geo::{geodesic_miles, is_within_radius, round_miles, Coordinates, METERS_PER_MILE};

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::ServiceConfig;
use crate::core::NameValidator;
use crate::error::{GuardError, Result};
use crate::sources::{
    FallbackGeocoder, Geocoder, GooglePlacesClient, NearbyRequest, PlaceCandidate, PlaceSearch,
};

/// Validates a name, then searches around an address for businesses using it.
#[derive(Debug, Clone)]
pub struct ConflictSearch {
    validator: Arc<NameValidator>,
    geocoder: Arc<dyn Geocoder>,
    places: Arc<dyn PlaceSearch>,
}

impl ConflictSearch {
    pub fn new(
        validator: Arc<NameValidator>,
        geocoder: Arc<dyn Geocoder>,
        places: Arc<dyn PlaceSearch>,
    ) -> Self {
        Self {
            validator,
            geocoder,
            places,
        }
    }

    /// Wires the Google/Nominatim geocoding chain and Google Places.
    ///
    /// Fails when no Google Maps API key is configured.
    pub fn from_services(
        validator: Arc<NameValidator>,
        services: Arc<ServiceConfig>,
    ) -> Result<Self> {
        services.require_api_key()?;
        let geocoder = FallbackGeocoder::from_config(services.clone())
            .map_err(|e| GuardError::service("geocoding", e))?;
        let places =
            GooglePlacesClient::new(services).map_err(|e| GuardError::service("places", e))?;
        Ok(Self::new(validator, Arc::new(geocoder), Arc::new(places)))
    }

    /// Validates `name` and lists nearby businesses whose names contain it.
    ///
    /// Never fails: problems are reported through [`SearchResponse::error`].
    #[instrument(skip(self))]
    pub async fn search_property_name(
        &self,
        name: &str,
        address: &str,
        radius_miles: f64,
    ) -> SearchResponse {
        let validation = self.validator.validate_property_name(name).await;
        if !validation.is_valid {
            info!("name failed validation, skipping search");
            return SearchResponse::failed("Invalid property name", validation);
        }

        let center = match self.geocoder.geocode(address).await {
            Ok(Some(center)) => center,
            Ok(None) => {
                return SearchResponse::failed(
                    "Could not get coordinates for provided address",
                    validation,
                )
            }
            Err(err) => {
                warn!(error = %err, "geocoding failed");
                return SearchResponse::failed(
                    "Could not get coordinates for provided address",
                    validation,
                );
            }
        };
        debug!(%center, "address resolved");

        let request = NearbyRequest {
            location: center,
            radius_meters: radius_miles * METERS_PER_MILE,
            keyword: name.to_string(),
        };
        let candidates = match self.places.nearby(&request).await {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, "nearby search failed");
                return SearchResponse::failed(
                    format!("Error searching for properties: {err}"),
                    validation,
                );
            }
        };

        let needle = name.to_lowercase();
        let mut conflicts = Vec::new();
        for candidate in candidates
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
        {
            let distance = geodesic_miles(center, candidate.location);
            if !is_within_radius(distance, radius_miles) {
                debug!(place = %candidate.name, distance, "outside radius");
                continue;
            }
            conflicts.push(self.describe(candidate, distance).await);
        }

        info!(conflicts = conflicts.len(), "search complete");
        SearchResponse::completed(conflicts, validation)
    }

    async fn describe(&self, candidate: PlaceCandidate, distance: f64) -> Conflict {
        let source = self.places.source_name().to_string();
        let distance_miles = round_miles(distance);
        match self.places.details(&candidate.place_id).await {
            Ok(details) => Conflict {
                address: details
                    .formatted_address
                    .or(candidate.vicinity)
                    .unwrap_or_else(|| "Address not available".to_string()),
                distance_miles,
                rating: details.rating,
                website: details.website,
                maps_url: details.url,
                types: if details.types.is_empty() {
                    candidate.types
                } else {
                    details.types
                },
                source,
                name: candidate.name,
            },
            Err(err) => {
                debug!(
                    place = %candidate.name,
                    error = %err,
                    "details unavailable, using basic info"
                );
                Conflict {
                    address: candidate
                        .vicinity
                        .unwrap_or_else(|| "Address not available".to_string()),
                    distance_miles,
                    rating: None,
                    website: None,
                    maps_url: None,
                    types: candidate.types,
                    source,
                    name: candidate.name,
                }
            }
        }
    }
}
