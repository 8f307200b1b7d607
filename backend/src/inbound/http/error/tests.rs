//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("busy"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("storage down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn response_payload(error: Error, expected_trace_id: Option<&str>) -> Error {
    let response = ResponseError::error_response(&error);
    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is ASCII");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("storage path /var/lib/cafe leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));
    let redacted = response_payload(error, Some(expected_trace_id.as_str())).await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_their_details(expected_trace_id: String) {
    let error = Error::invalid_request("rating must be between 1 and 5, got 9")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "rating"}));
    let payload = response_payload(error, Some(expected_trace_id.as_str())).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.details(), Some(&json!({"field": "rating"})));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let payload = response_payload(Error::not_found("no such place"), None).await;
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[derive(serde::Deserialize)]
struct Payload {
    #[expect(dead_code, reason = "only the extractor outcome matters")]
    text: String,
}

#[actix_web::post("/echo")]
async fn echo(_payload: actix_web::web::Json<Payload>) -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[rstest]
#[actix_web::test]
async fn malformed_bodies_use_the_error_payload() {
    use actix_web::{App, test as actix_test, web};

    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(echo),
    )
    .await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/echo")
            .set_json(json!({ "body": "wrong field" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Error = actix_test::read_body_json(response).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.details(), Some(&json!({ "code": "malformed_body" })));
}
