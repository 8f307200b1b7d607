//! Mode HTTP handlers.
//!
//! ```text
//! GET  /api/v1/mode
//! PUT  /api/v1/mode
//! POST /api/v1/mode/toggle
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::AppMode;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_mode;

/// Request payload for selecting a mode.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ModeRequest {
    /// `coffee` or `matcha`.
    #[schema(example = "matcha")]
    pub mode: String,
}

/// The active mode.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ModeResponse {
    /// `coffee` or `matcha`.
    #[schema(example = "coffee")]
    pub mode: String,
}

impl From<AppMode> for ModeResponse {
    fn from(mode: AppMode) -> Self {
        Self {
            mode: mode.to_string(),
        }
    }
}

/// Read the active mode.
#[utoipa::path(
    get,
    path = "/api/v1/mode",
    responses(
        (status = 200, description = "Active mode", body = ModeResponse),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["mode"],
    operation_id = "getMode"
)]
#[get("/mode")]
pub async fn get_mode(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ModeResponse>> {
    let namespace = session.namespace_or_issue()?;
    let mode = state.modes.current(&namespace).await?;
    Ok(web::Json(mode.into()))
}

/// Select a mode.
#[utoipa::path(
    put,
    path = "/api/v1/mode",
    request_body = ModeRequest,
    responses(
        (status = 200, description = "Mode stored", body = ModeResponse),
        (status = 400, description = "Unknown mode", body = ErrorSchema),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["mode"],
    operation_id = "setMode"
)]
#[put("/mode")]
pub async fn set_mode(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ModeRequest>,
) -> ApiResult<web::Json<ModeResponse>> {
    let mode = parse_mode(&payload.mode)?;
    let namespace = session.namespace_or_issue()?;
    let stored = state.modes.set(&namespace, mode).await?;
    Ok(web::Json(stored.into()))
}

/// Flip between coffee and matcha.
#[utoipa::path(
    post,
    path = "/api/v1/mode/toggle",
    responses(
        (status = 200, description = "Mode after toggling", body = ModeResponse),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["mode"],
    operation_id = "toggleMode"
)]
#[post("/mode/toggle")]
pub async fn toggle_mode(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ModeResponse>> {
    let namespace = session.namespace_or_issue()?;
    let mode = state.modes.toggle(&namespace).await?;
    Ok(web::Json(mode.into()))
}
