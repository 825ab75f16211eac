mod common;

use common::{gemini_text, Reply, StubBackends};
use roam_core::{HotelClass, HotelSearch, ImageSearch, ItineraryGenerator, ProviderError};
use roam_providers::{ProviderConfig, ProviderSet};
use serde_json::json;

async fn providers_for(stub: &StubBackends) -> ProviderSet {
    let config = stub.spawn_config().await;
    ProviderSet::from_config(&config).expect("providers should build")
}

#[tokio::test]
async fn hotel_search_sends_filters_and_credential_as_query() {
    let stub = StubBackends::healthy();
    let providers = providers_for(&stub).await;

    let hotels = providers
        .hotels
        .search_hotels(20_000.0, "Goa", HotelClass::ThreeStar)
        .await;

    assert_eq!(hotels.len(), 2);
    assert_eq!(hotels[1].name, "Palm Grove");
    assert_eq!(hotels[1].price_per_night, 2_750.0);

    let calls = stub.calls_to("/v1/hotels");
    assert_eq!(calls.len(), 1);
    let query = &calls[0].query;
    assert!(query.contains("destination=Goa"));
    assert!(query.contains("hotel_type=3-Star"));
    assert!(query.contains("budget=20000"));
    assert!(query.contains("api_key=test-hotel-key"));
}

#[tokio::test]
async fn hotel_search_server_error_looks_like_no_hotels() {
    let mut failing = StubBackends::healthy();
    failing.hotels = Reply::Status(500);
    let mut empty = StubBackends::healthy();
    empty.hotels = Reply::Json(json!({ "data": [] }));

    let from_error = providers_for(&failing)
        .await
        .hotels
        .search_hotels(20_000.0, "Goa", HotelClass::Budget)
        .await;
    let from_empty = providers_for(&empty)
        .await
        .hotels
        .search_hotels(20_000.0, "Goa", HotelClass::Budget)
        .await;

    assert!(from_error.is_empty());
    assert_eq!(from_error, from_empty);
}

#[tokio::test]
async fn hotel_search_without_data_field_is_empty() {
    let mut stub = StubBackends::healthy();
    stub.hotels = Reply::Json(json!({ "status": "ok" }));
    let hotels = providers_for(&stub)
        .await
        .hotels
        .search_hotels(5_000.0, "Leh", HotelClass::FiveStar)
        .await;
    assert!(hotels.is_empty());
}

#[tokio::test]
async fn image_search_requests_two_and_keeps_two() {
    let stub = StubBackends::healthy();
    let providers = providers_for(&stub).await;

    let images = providers.images.search_images("Goa").await;

    assert_eq!(
        images,
        vec![
            "https://images.example/goa-1.jpg",
            "https://images.example/goa-2.jpg"
        ]
    );
    let calls = stub.calls_to("/search/photos");
    assert!(calls[0].query.contains("query=Goa"));
    assert!(calls[0].query.contains("per_page=2"));
    assert!(calls[0].query.contains("client_id=test-unsplash-key"));
}

#[tokio::test]
async fn image_search_with_zero_results_is_empty() {
    let mut stub = StubBackends::healthy();
    stub.images = Reply::Json(json!({ "total": 0, "results": [] }));
    let images = providers_for(&stub).await.images.search_images("Nowhere").await;
    assert!(images.is_empty());
}

#[tokio::test]
async fn image_search_failure_is_empty() {
    let mut stub = StubBackends::healthy();
    stub.images = Reply::Status(401);
    let images = providers_for(&stub).await.images.search_images("Goa").await;
    assert!(images.is_empty());
}

#[tokio::test]
async fn generator_posts_prompt_with_header_credential() {
    let stub = StubBackends::healthy();
    let providers = providers_for(&stub).await;

    let text = providers
        .generator
        .generate_plan(50_000.0, "Goa", 2, "Pune")
        .await
        .expect("generator should answer");

    assert_eq!(text.as_deref(), Some("Day 1: land in Goa and relax."));
    let calls = stub.calls_to(":generateContent");
    assert_eq!(calls.len(), 1);
    assert!(calls[0].path.contains("gemini-2.0-flash"));
    assert_eq!(calls[0].goog_api_key.as_deref(), Some("test-gemini-key"));
    assert!(calls[0].query.is_empty());
    assert!(calls[0]
        .body
        .contains("Create a travel plan for 2 people travelling from Pune to Goa with a budget of 50000 INR."));
}

#[tokio::test]
async fn generator_error_status_is_reported() {
    let mut stub = StubBackends::healthy();
    stub.generator = Reply::Status(500);
    let result = providers_for(&stub)
        .await
        .generator
        .generate_plan(50_000.0, "Goa", 2, "Pune")
        .await;
    assert!(matches!(result, Err(ProviderError::Status { status: 500, .. })));
}

#[tokio::test]
async fn suggestion_is_trimmed() {
    let mut stub = StubBackends::healthy();
    stub.generator = Reply::Json(gemini_text("  Hampi\n"));
    let suggestion = providers_for(&stub)
        .await
        .generator
        .suggest_destination(15_000.0)
        .await
        .expect("generator should answer");
    assert_eq!(suggestion.as_deref(), Some("Hampi"));
}

#[tokio::test]
async fn missing_credentials_make_no_requests() {
    let stub = StubBackends::healthy();
    let mut config: ProviderConfig = stub.spawn_config().await;
    config.gemini.api_key = None;
    config.hotels.api_key = None;
    config.images.access_key = None;
    let providers = ProviderSet::from_config(&config).expect("providers should build");

    let generated = providers.generator.suggest_destination(10_000.0).await;
    let hotels = providers
        .hotels
        .search_hotels(4_000.0, "Goa", HotelClass::Budget)
        .await;
    let images = providers.images.search_images("Goa").await;

    assert!(matches!(generated, Err(ProviderError::NotConfigured { .. })));
    assert!(hotels.is_empty());
    assert!(images.is_empty());
    assert!(stub.calls().is_empty());
}
