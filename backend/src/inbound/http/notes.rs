//! Private notes HTTP handlers.
//!
//! ```text
//! GET /api/v1/notes
//! PUT /api/v1/notes/{id}
//! ```

use std::collections::BTreeMap;

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AppMode, Notes};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_place_id;

/// Request payload for a note; blank text deletes the note.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NoteRequest {
    /// Note text.
    #[schema(example = "לבקש את האתיופי")]
    pub text: String,
}

/// Notes of the active mode keyed by place id.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NotesResponse {
    /// Active mode.
    #[schema(example = "coffee")]
    pub mode: String,
    /// Place id to note text.
    pub notes: BTreeMap<String, String>,
}

impl NotesResponse {
    fn new(mode: AppMode, notes: &Notes) -> Self {
        Self {
            mode: mode.to_string(),
            notes: notes
                .entries()
                .iter()
                .map(|(id, text)| (id.to_string(), text.clone()))
                .collect(),
        }
    }
}

/// List notes for the active mode.
#[utoipa::path(
    get,
    path = "/api/v1/notes",
    responses(
        (status = 200, description = "Notes", body = NotesResponse),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<NotesResponse>> {
    let namespace = session.namespace_or_issue()?;
    let mode = state.modes.current(&namespace).await?;
    let notes = state.user_state.notes(&namespace, mode).await?;
    Ok(web::Json(NotesResponse::new(mode, &notes)))
}

/// Set or clear the note for a place.
#[utoipa::path(
    put,
    path = "/api/v1/notes/{id}",
    params(("id" = String, Path, description = "Place identifier")),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Notes after the update", body = NotesResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "setNote"
)]
#[put("/notes/{id}")]
pub async fn set_note(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<NoteRequest>,
) -> ApiResult<web::Json<NotesResponse>> {
    let id = parse_place_id(path.into_inner())?;
    let namespace = session.namespace_or_issue()?;
    let mode = state.modes.current(&namespace).await?;
    let notes = state
        .user_state
        .set_note(&namespace, mode, &id, &payload.text)
        .await?;
    Ok(web::Json(NotesResponse::new(mode, &notes)))
}
