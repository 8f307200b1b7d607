//! Map event HTTP handler.
//!
//! ```text
//! POST /api/v1/map/move-end
//! ```
//!
//! Clients report where the map settled; a view that left Israel gets one
//! correction back. The move caused by that correction is swallowed so the
//! client cannot bounce between the two.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Coordinates, MapCommand};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::validate_coordinates;

/// Where the map came to rest.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MoveEndRequest {
    /// Centre latitude.
    #[schema(example = 35.5)]
    pub lat: f64,
    /// Centre longitude.
    #[schema(example = 34.8)]
    pub lng: f64,
    /// Zoom level.
    #[schema(example = 9.0)]
    pub zoom: f64,
}

/// Correction for the client to apply, if any.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MoveEndResponse {
    /// A `setView` command, or `null` when the map may stay.
    #[schema(value_type = Option<Object>)]
    pub command: Option<MapCommand>,
}

/// Report the end of a map move.
#[utoipa::path(
    post,
    path = "/api/v1/map/move-end",
    request_body = MoveEndRequest,
    responses(
        (status = 200, description = "Optional correction", body = MoveEndResponse),
        (status = 400, description = "Invalid position", body = ErrorSchema),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["map"],
    operation_id = "mapMoveEnd"
)]
#[post("/map/move-end")]
pub async fn move_end(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MoveEndRequest>,
) -> ApiResult<web::Json<MoveEndResponse>> {
    let MoveEndRequest { lat, lng, zoom } = payload.into_inner();
    let center = validate_coordinates(Coordinates::new(lat, lng))?;
    let namespace = session.namespace_or_issue()?;
    let command = state.map_session.move_end(&namespace, center, zoom).await?;
    Ok(web::Json(MoveEndResponse { command }))
}
