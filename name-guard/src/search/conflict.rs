//! Conflict records and the search response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::ValidationResult;
use crate::error::{ErrorContext, Result};

/// Readable labels for business-directory place types, in lookup order.
const BUSINESS_TYPES: &[(&str, &str)] = &[
    ("apartment", "Apartment Complex"),
    ("doctor", "Medical Practice"),
    ("restaurant", "Restaurant"),
    ("store", "Retail Store"),
    ("insurance_agency", "Insurance Agency"),
    ("lawyer", "Law Office"),
    ("real_estate_agency", "Real Estate Office"),
    ("shopping_mall", "Mall"),
    ("parking", "Parking Facility"),
    ("furniture_store", "Furniture Store"),
    ("book_store", "Book Store"),
    ("clothing_store", "Clothing Store"),
    ("bar", "Bar/Nightclub"),
    ("medical_lab", "Medical Lab"),
    ("dental_clinic", "Dental Office"),
    ("hotel", "Hotel"),
    ("cafe", "Café"),
    ("bakery", "Bakery"),
    ("bank", "Bank"),
    ("beauty_salon", "Beauty Salon"),
    ("gym", "Fitness Center"),
    ("hospital", "Hospital"),
    ("health", "Healthcare"),
    ("local_government_office", "Government Office"),
    ("real_estate", "Real Estate"),
];

/// An existing business whose name overlaps the candidate name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub name: String,
    pub address: String,
    /// Geodesic distance from the searched address, rounded to 2 decimals
    pub distance_miles: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub source: String,
}

impl Conflict {
    /// Readable label for the first recognised place type, `"Business"` otherwise.
    pub fn business_type(&self) -> &'static str {
        self.types
            .iter()
            .find_map(|t| {
                BUSINESS_TYPES
                    .iter()
                    .find(|(key, _)| key == t)
                    .map(|(_, label)| *label)
            })
            .unwrap_or("Business")
    }
}

/// Outcome of a conflict search.
///
/// `error` is set when the search stopped early; the validation result is
/// always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub total_results: usize,
    pub potential_conflicts: Vec<Conflict>,
    pub validation_results: ValidationResult,
}

/// Headline figures of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub total_conflicts: usize,
    pub closest_match: Option<Conflict>,
    pub search_timestamp: DateTime<Utc>,
}

impl SearchResponse {
    /// A response that stopped with `error`.
    pub fn failed(error: impl Into<String>, validation_results: ValidationResult) -> Self {
        Self {
            error: Some(error.into()),
            timestamp: None,
            total_results: 0,
            potential_conflicts: Vec::new(),
            validation_results,
        }
    }

    /// A completed search; conflicts are sorted by ascending distance.
    pub fn completed(mut conflicts: Vec<Conflict>, validation_results: ValidationResult) -> Self {
        conflicts.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
        Self {
            error: None,
            timestamp: Some(Utc::now()),
            total_results: conflicts.len(),
            potential_conflicts: conflicts,
            validation_results,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn summary(&self) -> SearchSummary {
        SearchSummary {
            total_conflicts: self.potential_conflicts.len(),
            closest_match: self.potential_conflicts.first().cloned(),
            search_timestamp: self.timestamp.unwrap_or_else(Utc::now),
        }
    }

    /// Writes the conflicts as pretty JSON.
    pub fn save_conflicts(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.potential_conflicts)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conflict(name: &str, distance: f64, types: &[&str]) -> Conflict {
        Conflict {
            name: name.to_string(),
            address: "1 Main St".to_string(),
            distance_miles: distance,
            rating: None,
            website: None,
            maps_url: None,
            types: types.iter().map(|t| t.to_string()).collect(),
            source: "Google Places".to_string(),
        }
    }

    #[test]
    fn test_business_type_uses_first_known_type() {
        assert_eq!(
            conflict("a", 1.0, &["point_of_interest", "restaurant", "bar"]).business_type(),
            "Restaurant"
        );
        assert_eq!(conflict("a", 1.0, &["shopping_mall"]).business_type(), "Mall");
        assert_eq!(conflict("a", 1.0, &["establishment"]).business_type(), "Business");
        assert_eq!(conflict("a", 1.0, &[]).business_type(), "Business");
    }

    #[test]
    fn test_completed_sorts_by_distance() {
        let response = SearchResponse::completed(
            vec![conflict("far", 3.2, &[]), conflict("near", 0.4, &[]), conflict("mid", 1.0, &[])],
            ValidationResult::new(),
        );
        let names: Vec<_> = response
            .potential_conflicts
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["near", "mid", "far"]);
        assert_eq!(response.total_results, 3);
        assert_eq!(
            response.summary().closest_match.map(|c| c.name),
            Some("near".to_string())
        );
    }

    #[test]
    fn test_failed_response_serialization() {
        let response = SearchResponse::failed("Invalid property name", ValidationResult::new());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "Invalid property name");
        assert!(json.get("timestamp").is_none());
        assert_eq!(json["validation_results"]["is_valid"], true);
        assert_eq!(response.summary().total_conflicts, 0);
    }

    #[test]
    fn test_save_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conflicts.json");
        let response =
            SearchResponse::completed(vec![conflict("a", 1.5, &["bank"])], ValidationResult::new());
        response.save_conflicts(&path).unwrap();

        let saved: Vec<Conflict> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, response.potential_conflicts);
    }
}
