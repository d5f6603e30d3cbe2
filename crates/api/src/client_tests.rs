use std::time::Duration;

use plantdex_core::PlantId;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::PerenualClient;
use crate::error::ApiError;
use crate::traits::PlantApi;

async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

fn client_for(server: &MockServer) -> PerenualClient {
    PerenualClient::new("test-key".to_owned(), server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_search_sends_key_and_query() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/species-list"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "rose"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{
                "id": 1,
                "common_name": "Rose",
                "scientific_name": ["Rosa"],
                "sunlight": ["full_sun"],
                "watering": "Frequent"
            }],
            "current_page": 1,
            "last_page": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.search_species("rose").await.unwrap();
    assert_eq!(response.len(), 1);
    assert_eq!(response.items()[0].common_name.as_deref(), Some("Rose"));
    assert!(response.has_pagination());
}

#[tokio::test]
async fn test_search_encodes_reserved_characters() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/species-list"))
        .and(query_param("q", "rose&key=x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.search_species("rose&key=x").await.unwrap();
    assert!(response.is_empty());
}

#[tokio::test]
async fn test_search_passes_empty_query_through() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/species-list"))
        .and(query_param("q", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.search_species("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_non_success_status() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/species-list"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.search_species("fir").await.unwrap_err();
    assert_eq!(err.status_code(), Some(429));
    assert_eq!(err.to_string(), "Network response was not ok: Too Many Requests");
    let ApiError::HttpStatus { body, .. } = err else { panic!("unexpected error") };
    assert_eq!(body, "Rate limit exceeded");
}

#[tokio::test]
async fn test_search_does_not_retry() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/species-list"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.search_species("fir").await.is_err());
}

#[tokio::test]
async fn test_search_unparseable_body() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/species-list"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.search_species("fir").await.unwrap_err();
    assert!(matches!(err, ApiError::JsonParse { .. }));
    assert!(err.to_string().contains("species-list response"));
}

#[tokio::test]
async fn test_search_transport_error() {
    // nothing listens on port 1
    let client = PerenualClient::new(
        "test-key".to_owned(),
        "http://127.0.0.1:1".to_owned(),
        Duration::from_secs(5),
    )
    .unwrap();
    let err = client.search_species("fir").await.unwrap_err();
    assert!(matches!(err, ApiError::HttpRequest(_)));
}

#[tokio::test]
async fn test_details_success() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/species/details/1"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "common_name": "European Silver Fir",
            "scientific_name": ["Abies alba"],
            "family": "Pinaceae",
            "care_level": "Medium",
            "cycle": "Perennial",
            "description": "Tall conifer."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let detail = client.species_details(PlantId(1)).await.unwrap().unwrap();
    assert_eq!(detail.family.as_deref(), Some("Pinaceae"));
    assert_eq!(detail.id, Some(PlantId(1)));
}

#[tokio::test]
async fn test_details_empty_object_is_none() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/species/details/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    assert!(client.species_details(PlantId(9)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_details_null_is_none() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/species/details/9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    assert!(client.species_details(PlantId(9)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_details_not_found() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/species/details/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.species_details(PlantId(404)).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_trait_object_dispatch() {
    let server = setup_mock_server().await;
    let api: Box<dyn PlantApi> = Box::new(client_for(&server));

    Mock::given(method("GET"))
        .and(path("/species-list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "id": 3 }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/species/details/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "common_name": "Lavender"
        })))
        .mount(&server)
        .await;

    let found = api.search("lavender").await.unwrap();
    let id = found.items()[0].id;
    let detail = api.details(id).await.unwrap().unwrap();
    assert_eq!(detail.common_name.as_deref(), Some("Lavender"));
}
