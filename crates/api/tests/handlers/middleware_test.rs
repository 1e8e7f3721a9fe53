use attendance_api::middleware::error_handling::AppError;
use attendance_core::errors::AttendanceError;
use axum::{http::StatusCode, response::IntoResponse};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::test_utils::TestContext;

#[rstest]
#[case(AttendanceError::NotFound("Room not found".into()), StatusCode::NOT_FOUND)]
#[case(AttendanceError::Validation("bad input".into()), StatusCode::BAD_REQUEST)]
#[case(AttendanceError::Authentication("Missing user identity".into()), StatusCode::UNAUTHORIZED)]
#[case(AttendanceError::Forbidden("not yours".into()), StatusCode::FORBIDDEN)]
#[case(AttendanceError::Conflict("twice".into()), StatusCode::BAD_REQUEST)]
#[case(AttendanceError::Timeout("slow".into()), StatusCode::SERVICE_UNAVAILABLE)]
#[case(AttendanceError::Database(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
fn errors_map_to_status_codes(#[case] error: AttendanceError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).into_response().status(), expected);
}

#[test]
fn internal_errors_map_to_server_error() {
    let error = AttendanceError::Internal(Box::new(std::io::Error::other("disk full")));
    assert_eq!(AppError(error).into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn missing_identity_is_rejected_with_envelope() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/statistic/history-me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["statusCode"], 401);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing user identity");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn malformed_identity_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/statistic/history-me")
        .add_header(
            axum::http::HeaderName::from_static("x-user-id"),
            axum::http::HeaderValue::from_static("not-a-uuid"),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_reports_ok() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["timezone"], "UTC");
}
