//! Integration tests for the places client (wiremock-based)

use domain::{AreaConstraint, Coordinate, PlaceSearchRequest, PriceLevel, SearchBoundary};
use wiremock::matchers::{body_partial_json, header, headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_places::{
    DETAILS_FIELD_MASK, GooglePlacesClient, PlacesClient, PlacesConfig, PlacesError,
    SEARCH_FIELD_MASK,
};

fn config_for_mock(base_url: &str) -> PlacesConfig {
    PlacesConfig {
        base_url: format!("{base_url}/v1"),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
        max_result_count: 10,
        ..PlacesConfig::default()
    }
}

fn louvre_boundary() -> SearchBoundary {
    SearchBoundary::new(Coordinate::new_unchecked(48.8606, 2.3376), 1_000.0).unwrap()
}

const fn sample_places_json() -> &'static str {
    r#"{
        "places": [
            {
                "id": "ChIJ-angelina",
                "displayName": { "text": "Angelina" },
                "formattedAddress": "226 Rue de Rivoli, 75001 Paris",
                "location": { "latitude": 48.8652, "longitude": 2.3284 },
                "rating": 4.3,
                "userRatingCount": 18000,
                "types": ["cafe", "bakery"],
                "priceLevel": "PRICE_LEVEL_MODERATE",
                "businessStatus": "OPERATIONAL"
            },
            {
                "id": "ChIJ-versailles",
                "displayName": { "text": "Café at Versailles" },
                "location": { "latitude": 48.8049, "longitude": 2.1204 },
                "rating": 3.9
            }
        ]
    }"#
}

#[tokio::test]
async fn test_search_text_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(header("X-Goog-Api-Key", "test-key"))
        .and(headers("X-Goog-FieldMask", SEARCH_FIELD_MASK.split(',').collect()))
        .and(body_partial_json(serde_json::json!({
            "textQuery": "hot chocolate",
            "maxResultCount": 10,
            "locationBias": { "circle": { "radius": 1000.0 } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_places_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let places = client
        .search_text(&PlaceSearchRequest::text("hot chocolate", louvre_boundary()))
        .await
        .unwrap();

    // The client itself does not enforce the radius
    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Angelina");
    assert_eq!(places[0].price_level, Some(PriceLevel::Moderate));
    assert!(places.iter().all(|p| p.distance_from_center_meters.is_none()));
}

#[tokio::test]
async fn test_search_text_with_restriction() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(body_partial_json(serde_json::json!({
            "textQuery": "museum",
            "openNow": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{ "places": [] }"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let request = PlaceSearchRequest::text("museum", louvre_boundary())
        .with_constraint(AreaConstraint::Restriction)
        .with_open_now(true);
    let places = client.search_text(&request).await.unwrap();

    assert!(places.is_empty());
}

#[tokio::test]
async fn test_search_nearby_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .and(body_partial_json(serde_json::json!({
            "includedTypes": ["cafe"],
            "locationRestriction": { "circle": { "radius": 1000.0 } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_places_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let places = client
        .search_nearby(&PlaceSearchRequest::nearby(["cafe"], louvre_boundary()))
        .await
        .unwrap();

    assert_eq!(places.len(), 2);
}

#[tokio::test]
async fn test_invalid_request_makes_no_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .search_text(&PlaceSearchRequest::text("   ", louvre_boundary()))
        .await;

    assert!(matches!(result, Err(PlacesError::Domain(_))));
}

#[tokio::test]
async fn test_place_details_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/places/ChIJ-angelina"))
        .and(headers("X-Goog-FieldMask", DETAILS_FIELD_MASK.split(',').collect()))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "id": "ChIJ-angelina",
                "displayName": { "text": "Angelina" },
                "location": { "latitude": 48.8652, "longitude": 2.3284 },
                "websiteUri": "https://www.angelina-paris.fr/"
            }"#,
        ))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let details = client.place_details("ChIJ-angelina").await.unwrap();

    assert_eq!(details.place.id, "ChIJ-angelina");
    assert_eq!(
        details.website_uri.as_deref(),
        Some("https://www.angelina-paris.fr/")
    );
    assert!(details.opening_hours.is_empty());
}

#[tokio::test]
async fn test_place_details_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/places/unknown"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client.place_details("unknown").await;

    assert!(matches!(result, Err(PlacesError::NotFound(id)) if id == "unknown"));
}

#[tokio::test]
async fn test_search_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "12"))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .search_text(&PlaceSearchRequest::text("crêpes", louvre_boundary()))
        .await;

    match result {
        Err(PlacesError::RateLimitExceeded { retry_after_secs }) => {
            assert_eq!(retry_after_secs, Some(12));
        },
        other => panic!("Expected RateLimitExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .search_nearby(&PlaceSearchRequest::nearby(["bar"], louvre_boundary()))
        .await;

    assert!(matches!(result, Err(PlacesError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn test_search_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    let result = client
        .search_text(&PlaceSearchRequest::text("crêpes", louvre_boundary()))
        .await;

    assert!(matches!(result, Err(PlacesError::RequestFailed(_))));
}

#[tokio::test]
async fn test_is_healthy() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = GooglePlacesClient::new(&config_for_mock(&server.uri())).unwrap();
    assert!(client.is_healthy().await);

    let unreachable = GooglePlacesClient::new(&config_for_mock("http://127.0.0.1:1")).unwrap();
    assert!(!unreachable.is_healthy().await);
}
