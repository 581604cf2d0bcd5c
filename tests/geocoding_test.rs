use books4all::domain::{DistanceProvider, DomainError};
use books4all::modules::integrations::{NominatimClient, NominatimDistance};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_place(server: &MockServer, q: &str, lat: &str, lon: &str, hits: u64) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", q))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "lat": lat, "lon": lon, "display_name": q }
        ])))
        .expect(hits)
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> NominatimClient {
    NominatimClient::new(&server.uri(), "books4all-tests").expect("client")
}

#[tokio::test]
async fn test_geocode_first_hit() {
    let server = MockServer::start().await;
    mount_place(&server, "Paris", "48.8566", "2.3522", 1).await;

    let coords = client(&server).geocode("Paris").await.unwrap().unwrap();
    assert!((coords.lat - 48.8566).abs() < 1e-9);
    assert!((coords.lon - 2.3522).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_no_hit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert_eq!(client(&server).geocode("Atlantis").await.unwrap(), None);
}

#[tokio::test]
async fn test_distance_uses_cache() {
    let server = MockServer::start().await;
    // Each address is looked up once even though distance is asked twice
    mount_place(&server, "Paris", "48.8566", "2.3522", 1).await;
    mount_place(&server, "London", "51.5074", "-0.1278", 1).await;

    let provider = NominatimDistance::new(client(&server));
    let first = provider.distance_km("Paris", "London").await.unwrap();
    let second = provider.distance_km("  paris ", "London").await.unwrap();

    assert!((first - 343.5).abs() < 1.0, "got {}", first);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_address_is_validation_error() {
    let server = MockServer::start().await;
    mount_place(&server, "Paris", "48.8566", "2.3522", 1).await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let provider = NominatimDistance::new(client(&server));
    for _ in 0..2 {
        let err = provider.distance_km("Paris", "Atlantis").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}

#[tokio::test]
async fn test_server_error_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let provider = NominatimDistance::new(client(&server));
    for _ in 0..2 {
        let err = provider.distance_km("Paris", "London").await.unwrap_err();
        assert!(matches!(err, DomainError::External(_)));
    }
}
