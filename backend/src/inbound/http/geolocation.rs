//! Geolocation endpoints: static helpers plus the client's "locate me"
//! request, which allows one request in flight at a time.
//!
//! ```text
//! GET  /api/v1/geolocation/options
//! GET  /api/v1/geolocation/failures/{code}
//! GET  /api/v1/location
//! POST /api/v1/location/request
//! PUT  /api/v1/location
//! POST /api/v1/location/failure
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Coordinates, GeolocationFailure, LOCATION_REQUEST_OPTIONS, LocationRequestOptions,
    LocationTracker,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::{per_client, static_lookup};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::validate_coordinates;

/// Options to pass to the client's geolocation API.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationOptionsResponse {
    /// Request GPS-grade accuracy.
    pub enable_high_accuracy: bool,
    /// Timeout in milliseconds.
    #[schema(example = 10_000)]
    pub timeout: u32,
    /// Maximum cached position age in milliseconds.
    #[schema(example = 0)]
    pub maximum_age: u32,
}

/// User-facing message for a geolocation failure.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GeolocationFailureResponse {
    /// Code as reported by the client.
    #[schema(example = 1)]
    pub code: u16,
    /// Failure kind.
    #[schema(example = "permissionDenied")]
    pub kind: String,
    /// Hebrew message.
    pub message: String,
}

/// Code 0 stands for "no geolocation support"; the rest follow the W3C
/// codes.
const fn failure_for(code: u16) -> GeolocationFailure {
    match code {
        0 => GeolocationFailure::Unsupported,
        _ => GeolocationFailure::from_code(code),
    }
}

fn failure_kind(failure: GeolocationFailure) -> String {
    serde_json::to_value(failure)
        .ok()
        .and_then(|value| value.as_str().map(str::to_owned))
        .unwrap_or_default()
}

impl From<LocationRequestOptions> for LocationOptionsResponse {
    fn from(options: LocationRequestOptions) -> Self {
        Self {
            enable_high_accuracy: options.enable_high_accuracy,
            timeout: options.timeout,
            maximum_age: options.maximum_age,
        }
    }
}

/// A position reported by the client.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PositionRequest {
    /// Latitude.
    #[schema(example = 32.0809)]
    pub lat: f64,
    /// Longitude.
    #[schema(example = 34.7806)]
    pub lng: f64,
}

/// A failure reported by the client.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FailureRequest {
    /// `GeolocationPositionError.code`; 0 means unsupported.
    #[schema(example = 1)]
    pub code: u16,
}

/// State of the "locate me" button.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationStateResponse {
    /// A request is in flight.
    pub loading: bool,
    /// Last known latitude.
    pub lat: Option<f64>,
    /// Last known longitude.
    pub lng: Option<f64>,
    /// Kind of the last failure, cleared by the next request.
    #[schema(example = "timeout")]
    pub error: Option<String>,
    /// Hebrew message for the last failure.
    pub message: Option<String>,
    /// Increments on every fix; pass it to the guide as `flyKey`.
    pub fly_key: u64,
}

impl From<&LocationTracker> for LocationStateResponse {
    fn from(tracker: &LocationTracker) -> Self {
        let location = tracker.location();
        Self {
            loading: tracker.is_loading(),
            lat: location.map(|c| c.latitude),
            lng: location.map(|c| c.longitude),
            error: tracker.error().map(failure_kind),
            message: tracker.error().map(GeolocationFailure::message),
            fly_key: tracker.fly_key(),
        }
    }
}

impl GeolocationFailureResponse {
    fn new(code: u16) -> Self {
        let failure = failure_for(code);
        let kind = failure_kind(failure);
        Self {
            code,
            kind,
            message: failure.message(),
        }
    }
}

/// Geolocation request options.
#[utoipa::path(
    get,
    path = "/api/v1/geolocation/options",
    responses((status = 200, description = "Request options", body = LocationOptionsResponse)),
    tags = ["geolocation"],
    operation_id = "geolocationOptions"
)]
#[get("/geolocation/options")]
pub async fn location_options() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(static_lookup())
        .json(LocationOptionsResponse::from(LOCATION_REQUEST_OPTIONS))
}

/// Message for a client-reported geolocation error code.
#[utoipa::path(
    get,
    path = "/api/v1/geolocation/failures/{code}",
    params(("code" = u16, Path, description = "GeolocationPositionError code; 0 means unsupported")),
    responses((status = 200, description = "Failure message", body = GeolocationFailureResponse)),
    tags = ["geolocation"],
    operation_id = "geolocationFailure"
)]
#[get("/geolocation/failures/{code}")]
pub async fn describe_failure(path: web::Path<u16>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(static_lookup())
        .json(GeolocationFailureResponse::new(path.into_inner()))
}

/// Current "locate me" state.
#[utoipa::path(
    get,
    path = "/api/v1/location",
    responses(
        (status = 200, description = "Location state", body = LocationStateResponse),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["geolocation"],
    operation_id = "getLocation"
)]
#[get("/location")]
pub async fn get_location(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let namespace = session.namespace_or_issue()?;
    let tracker = state.map_session.location(&namespace).await?;
    Ok(HttpResponse::Ok()
        .insert_header(per_client())
        .json(LocationStateResponse::from(&tracker)))
}

/// Start a location request.
#[utoipa::path(
    post,
    path = "/api/v1/location/request",
    responses(
        (status = 200, description = "Options to pass to the geolocation API", body = LocationOptionsResponse),
        (status = 409, description = "A request is already in flight", body = ErrorSchema),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["geolocation"],
    operation_id = "requestLocation"
)]
#[post("/location/request")]
pub async fn request_location(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<LocationOptionsResponse>> {
    let namespace = session.namespace_or_issue()?;
    let options = state.map_session.begin_locate(&namespace).await?;
    Ok(web::Json(options.into()))
}

/// Record the position the client obtained.
#[utoipa::path(
    put,
    path = "/api/v1/location",
    request_body = PositionRequest,
    responses(
        (status = 200, description = "Location state after the fix", body = LocationStateResponse),
        (status = 400, description = "Invalid position", body = ErrorSchema),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["geolocation"],
    operation_id = "recordLocation"
)]
#[put("/location")]
pub async fn record_location(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PositionRequest>,
) -> ApiResult<web::Json<LocationStateResponse>> {
    let PositionRequest { lat, lng } = payload.into_inner();
    let location = validate_coordinates(Coordinates::new(lat, lng))?;
    let namespace = session.namespace_or_issue()?;
    let tracker = state.map_session.complete_locate(&namespace, location).await?;
    Ok(web::Json(LocationStateResponse::from(&tracker)))
}

/// Record a failed location request.
#[utoipa::path(
    post,
    path = "/api/v1/location/failure",
    request_body = FailureRequest,
    responses(
        (status = 200, description = "Location state with the failure message", body = LocationStateResponse),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["geolocation"],
    operation_id = "recordLocationFailure"
)]
#[post("/location/failure")]
pub async fn record_location_failure(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FailureRequest>,
) -> ApiResult<web::Json<LocationStateResponse>> {
    let failure = failure_for(payload.code);
    let namespace = session.namespace_or_issue()?;
    let tracker = state.map_session.fail_locate(&namespace, failure).await?;
    Ok(web::Json(LocationStateResponse::from(&tracker)))
}
