//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("failed to save RSVP")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"cause": "relation \"rsvps\" does not exist"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("raced"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("later"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn response_json(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace header is ascii").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, trace, body)
}

#[rstest]
#[actix_web::test]
async fn invalid_request_keeps_message_and_details() {
    let error = Error::invalid_request("invalid email format")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "email", "code": "invalid_email"}));

    let (status, trace, body) = response_json(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(trace.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "invalid email format",
            "code": "invalid_request",
            "traceId": TRACE_ID,
            "details": {"field": "email", "code": "invalid_email"},
        })
    );
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header_and_field() {
    let (_, trace, body) = response_json(&Error::unauthorized("unauthorized")).await;

    assert!(trace.is_none());
    assert!(body.get("traceId").is_none());
    assert!(body.get("details").is_none());
}

#[rstest]
fn internal_errors_keep_message_but_drop_details(internal_error: Error) {
    let body = error_body(&internal_error, false);

    assert_eq!(body.error, "failed to save RSVP");
    assert_eq!(body.code, ErrorCode::InternalError);
    assert_eq!(body.trace_id, Some(TRACE_ID));
    assert!(body.details.is_none());
}

#[rstest]
fn diagnostic_mode_exposes_internal_errors(internal_error: Error) {
    let body = error_body(&internal_error, true);

    assert_eq!(body.error, "failed to save RSVP");
    assert!(body.details.is_some());
}

#[rstest]
#[actix_web::test]
async fn internal_response_omits_cause_text(internal_error: Error) {
    let (status, _, body) = response_json(&internal_error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "failed to save RSVP");
    assert!(body.get("details").is_none());
    assert!(!body.to_string().contains("relation"));
}

#[rstest]
fn service_unavailable_is_never_redacted() {
    let error = Error::service_unavailable("failed to save RSVP")
        .with_details(json!({"code": "code_space_exhausted"}));
    let body = error_body(&error, false);

    assert_eq!(body.error, "failed to save RSVP");
    assert_eq!(body.details, Some(&json!({"code": "code_space_exhausted"})));
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}
