//! IP-geolocation behavior against a mock endpoint.

use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast_core::locate::{IpLocator, LocateError, Locator};

fn locator_for(server: &MockServer) -> IpLocator {
    IpLocator::new().expect("locator builds").with_endpoint(format!("{}/json", server.uri()))
}

#[tokio::test]
async fn success_resolves_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "lat": 5.56,
            "lon": -0.2,
            "city": "Accra"
        })))
        .mount(&server)
        .await;

    let position = locator_for(&server).locate().await.expect("locate succeeds");
    assert_eq!(position.lat, 5.56);
    assert_eq!(position.lon, -0.2);
}

#[tokio::test]
async fn fail_status_carries_the_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail",
            "message": "reserved range"
        })))
        .mount(&server)
        .await;

    let err = locator_for(&server).locate().await.unwrap_err();
    match err {
        LocateError::Other(reason) => assert!(reason.contains("reserved range")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn http_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = locator_for(&server).locate().await.unwrap_err();
    assert!(matches!(err, LocateError::Unavailable));
}
