//! Guide snapshot HTTP handler.
//!
//! ```text
//! GET /api/v1/guide?q=&brew=&lat=&lng=&selected=&flyKey=&width=
//! ```
//!
//! The browsing state is rebuilt from the query on every request. The mode,
//! the client's collections and the map bookkeeping are stored, so a fly key
//! the client has already been flown to is not flown to again.

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, GuideView, LocationTracker, Viewport};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::per_client;
use crate::inbound::http::places::{ActiveDataset, active_dataset};
use crate::inbound::http::schemas::{ErrorSchema, GuideSnapshotSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_brew_methods, parse_location, parse_place_id};

const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
const DEFAULT_VIEWPORT_HEIGHT: u32 = 800;

/// Query parameters for the guide snapshot.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GuideQuery {
    /// Free-text search over name and city.
    pub q: Option<String>,
    /// Comma-separated brew methods (Hebrew labels or `espresso`, `filter`,
    /// `cold-brew`).
    pub brew: Option<String>,
    /// User latitude.
    pub lat: Option<f64>,
    /// User longitude.
    pub lng: Option<f64>,
    /// Selected place id.
    pub selected: Option<String>,
    /// Increments on every fresh location fix; the map flies once per key.
    pub fly_key: Option<u64>,
    /// Viewport width in CSS pixels.
    pub width: Option<u32>,
    /// Viewport height in CSS pixels.
    pub height: Option<u32>,
}

/// Render the guide for the active mode.
#[utoipa::path(
    get,
    path = "/api/v1/guide",
    params(GuideQuery),
    responses(
        (status = 200, description = "Guide snapshot: results, markers, map commands and the selected place", body = GuideSnapshotSchema),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 404, description = "Selected place not in the active mode", body = ErrorSchema),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["guide"],
    operation_id = "getGuide"
)]
#[get("/guide")]
pub async fn get_guide(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<GuideQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    let brew_methods = parse_brew_methods(query.brew.as_deref())?;
    let location = parse_location(query.lat, query.lng)?;
    let selected = query.selected.map(parse_place_id).transpose()?;

    let ActiveDataset {
        namespace,
        mode,
        data,
    } = active_dataset(&state, &session).await?;
    if let Some(id) = selected.as_ref().filter(|id| data.find(id).is_none()) {
        return Err(Error::not_found(format!("place {id} not found")));
    }
    let located: Vec<_> = data.located().cloned().collect();
    let user_state = state.user_state.load(&namespace, mode, &data.places).await?;
    let map_session = state.map_session.map_session(&namespace).await?;

    let width = query.width.unwrap_or(DEFAULT_VIEWPORT_WIDTH);
    let mut view = GuideView::new(mode, &located, width);
    view.resume_map(map_session);
    view.set_query(query.q.unwrap_or_default());
    for method in brew_methods {
        view.toggle_brew_method(method);
    }
    *view.location_mut() = match location {
        Some(location) => LocationTracker::located(location, query.fly_key.unwrap_or_default()),
        None => state.map_session.location(&namespace).await?,
    };
    if let Some(id) = selected {
        let viewport = Viewport {
            width: f64::from(width),
            height: f64::from(query.height.unwrap_or(DEFAULT_VIEWPORT_HEIGHT)),
        };
        view.select_place(id, None, viewport);
    }

    let snapshot = view.snapshot(&located, &user_state);
    state
        .map_session
        .save_map_session(&namespace, map_session, view.map_session())
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(per_client())
        .json(snapshot))
}
