//! Domain and client errors map to the documented HTTP statuses.

use axum::http::StatusCode;
use axum::response::IntoResponse;

use seatwise_api::ApiError;
use seatwise_api::error::status_for;
use seatwise_core::Error;

#[test]
fn test_unknown_standard_is_bad_request() {
    let err = "GB27887".parse::<seatwise_core::StandardId>().unwrap_err();
    assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);
}

#[test]
fn test_serialization_is_server_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert_eq!(
        status_for(&Error::from(json_err)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_client_stream_error_is_bad_gateway() {
    let err: ApiError = seatwise_client::Error::Stream("reset".to_string()).into();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(err.message(), "Upstream service failed");
}

#[test]
fn test_client_mock_error_is_bad_gateway() {
    let err: ApiError = seatwise_client::Error::Mock("boom".to_string()).into();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn test_server_errors_hide_internals_in_message() {
    let err: ApiError = Error::data_load("data/dummies.json", "permission denied").into();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message(), "Internal server error");
}

#[tokio::test]
async fn test_details_only_for_server_side_failures() {
    let client: ApiError = Error::validation("bad").into();
    let bytes = axum::body::to_bytes(client.into_response().into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["details"].is_null());

    let server: ApiError = Error::upstream("down").into();
    let bytes = axum::body::to_bytes(server.into_response().into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["details"], "Upstream error: down");
}
