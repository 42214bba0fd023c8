//! The HTTP-backed pipeline against mock slang, dictionary and maps servers.

use mockito::Matcher;
use name_guard::config::{GuardConfig, ServiceConfig};
use name_guard::core::{NameValidator, Rule};
use name_guard::search::ConflictSearch;
use std::sync::Arc;

const GROVE: &str = r#"[{
    "word": "grove",
    "meanings": [{
        "partOfSpeech": "noun",
        "definitions": [{"definition": "A small wood or stand of trees.", "synonyms": ["copse"]}],
        "synonyms": ["orchard"]
    }]
}]"#;

const NEARBY: &str = r#"{"status": "OK", "results": [
    {
        "place_id": "far",
        "name": "Sunset Gardens Townhomes",
        "geometry": {"location": {"lat": 30.2900, "lng": -97.7431}},
        "vicinity": "9 Far Rd",
        "types": ["establishment"]
    },
    {
        "place_id": "near",
        "name": "Sunset Gardens Apartments",
        "geometry": {"location": {"lat": 30.2700, "lng": -97.7431}},
        "vicinity": "1 Sunset Rd",
        "types": ["establishment"]
    },
    {
        "place_id": "other",
        "name": "Lakeside Storage",
        "geometry": {"location": {"lat": 30.2680, "lng": -97.7431}},
        "types": ["storage"]
    }
]}"#;

fn conflict_search(services: Arc<ServiceConfig>) -> ConflictSearch {
    ConflictSearch::from_services(Arc::new(NameValidator::default()), services).unwrap()
}

#[tokio::test]
async fn test_validator_against_remote_dictionaries() {
    let mut server = mockito::Server::new_async().await;
    let slang = server
        .mock("GET", "/v0/define")
        .match_query(Matcher::UrlEncoded("term".into(), "peach".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"list": [{"definition": "Explicit slang", "thumbs_up": 4000}]}"#)
        .expect(1)
        .create_async()
        .await;
    let dictionary = server
        .mock("GET", "/api/v2/entries/en/grove")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GROVE)
        .expect(2)
        .create_async()
        .await;
    // everything else gets mockito's 501, which the pipeline ignores

    let services = Arc::new(
        ServiceConfig::default()
            .with_slang_endpoint(server.url())
            .with_dictionary_endpoint(server.url()),
    );
    let validator = NameValidator::from_services(GuardConfig::default(), services).unwrap();

    let result = validator.validate_property_name("Peach Grove").await;

    slang.assert_async().await;
    dictionary.assert_async().await;
    assert!(!result.is_valid);
    assert_eq!(
        result.warnings[..2],
        [
            "'peach' has significant slang usage (4000 upvotes)",
            "'peach' has inappropriate slang meaning: explicit slang...",
        ]
    );
    assert_eq!(result.issues_by_rule(Rule::SlangMeaning).len(), 1);
    assert_eq!(result.suggestions, vec!["Peach Copse", "Peach Orchard"]);
}

#[tokio::test]
async fn test_unreachable_dictionaries_leave_a_clean_name_valid() {
    let services = Arc::new(
        ServiceConfig::default()
            .with_slang_endpoint("http://127.0.0.1:9")
            .with_dictionary_endpoint("http://127.0.0.1:9"),
    );
    let validator = NameValidator::from_services(GuardConfig::default(), services).unwrap();

    let result = validator.validate_property_name("Pleasant Valley").await;

    assert!(result.is_valid);
    assert!(result.warnings.is_empty());
}

#[tokio::test]
async fn test_conflict_search_against_google() {
    let mut server = mockito::Server::new_async().await;
    let geocode = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("address".into(), "123 Main St, Austin, TX".into()),
            Matcher::UrlEncoded("key".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"status": "OK", "results": [{"geometry": {"location": {"lat": 30.2672, "lng": -97.7431}}}]}"#,
        )
        .create_async()
        .await;
    let nearby = server
        .mock("GET", "/maps/api/place/nearbysearch/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("keyword".into(), "Sunset Gardens".into()),
            Matcher::UrlEncoded("radius".into(), "4828".into()),
        ]))
        .with_status(200)
        .with_body(NEARBY)
        .create_async()
        .await;
    let _details = server
        .mock("GET", "/maps/api/place/details/json")
        .match_query(Matcher::UrlEncoded("place_id".into(), "near".into()))
        .with_status(200)
        .with_body(
            r#"{"status": "OK", "result": {
                "formatted_address": "1 Sunset Rd, Austin, TX 78701",
                "rating": 4.2,
                "website": "https://sunset.example",
                "url": "https://maps.google.com/?cid=7",
                "types": ["apartment", "establishment"]
            }}"#,
        )
        .create_async()
        .await;

    let services = Arc::new(ServiceConfig::new("test-key").with_google_endpoint(server.url()));
    let search = conflict_search(services);

    let response = search
        .search_property_name("Sunset Gardens", "123 Main St, Austin, TX", 3.0)
        .await;

    geocode.assert_async().await;
    nearby.assert_async().await;
    assert!(response.error.is_none(), "{:?}", response.error);
    assert_eq!(response.total_results, 2);

    let near = &response.potential_conflicts[0];
    assert_eq!(near.name, "Sunset Gardens Apartments");
    assert_eq!(near.address, "1 Sunset Rd, Austin, TX 78701");
    assert_eq!(near.rating, Some(4.2));
    assert_eq!(near.maps_url.as_deref(), Some("https://maps.google.com/?cid=7"));
    assert_eq!(near.source, "Google Places");

    // details for "far" are not mocked, so the nearby record is used as is
    let far = &response.potential_conflicts[1];
    assert_eq!(far.name, "Sunset Gardens Townhomes");
    assert_eq!(far.address, "9 Far Rd");
    assert_eq!(far.website, None);
}

#[tokio::test]
async fn test_geocoding_falls_back_to_nominatim() {
    let mut server = mockito::Server::new_async().await;
    let _google = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status": "REQUEST_DENIED", "error_message": "key rejected"}"#)
        .create_async()
        .await;
    let nominatim = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("q".into(), "1 Elm St".into()))
        .with_status(200)
        .with_body(r#"[{"lat": "30.2672", "lon": "-97.7431", "display_name": "1 Elm St"}]"#)
        .create_async()
        .await;
    let _nearby = server
        .mock("GET", "/maps/api/place/nearbysearch/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status": "ZERO_RESULTS", "results": []}"#)
        .create_async()
        .await;

    let services = Arc::new(
        ServiceConfig::new("test-key")
            .with_google_endpoint(server.url())
            .with_nominatim_endpoint(server.url()),
    );
    let search = conflict_search(services);

    let response = search.search_property_name("Elm Court", "1 Elm St", 1.0).await;

    nominatim.assert_async().await;
    assert!(response.error.is_none(), "{:?}", response.error);
    assert_eq!(response.total_results, 0);
    assert!(response.potential_conflicts.is_empty());
}

#[tokio::test]
async fn test_unknown_address_everywhere() {
    let mut server = mockito::Server::new_async().await;
    let _google = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status": "ZERO_RESULTS", "results": []}"#)
        .create_async()
        .await;
    let _nominatim = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let nearby = server
        .mock("GET", "/maps/api/place/nearbysearch/json")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let services = Arc::new(
        ServiceConfig::new("test-key")
            .with_google_endpoint(server.url())
            .with_nominatim_endpoint(server.url()),
    );
    let search = conflict_search(services);

    let response = search
        .search_property_name("Elm Court", "Nowhere Lane", 1.0)
        .await;

    nearby.assert_async().await;
    assert_eq!(
        response.error.as_deref(),
        Some("Could not get coordinates for provided address")
    );
}

#[test]
fn test_search_requires_api_key() {
    let result = ConflictSearch::from_services(
        Arc::new(NameValidator::default()),
        Arc::new(ServiceConfig::default()),
    );
    assert!(result.is_err());
}
