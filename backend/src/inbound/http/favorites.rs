//! Favourites HTTP handlers.
//!
//! ```text
//! GET  /api/v1/favorites
//! POST /api/v1/favorites/{id}/toggle
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AppMode, Favorites, PlaceId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_place_id;

/// Favourite place ids of the active mode.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    /// Active mode.
    #[schema(example = "coffee")]
    pub mode: String,
    /// Ids in the order they were added.
    pub ids: Vec<String>,
    /// After a toggle, whether the toggled place is now a favourite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl FavoritesResponse {
    fn new(mode: AppMode, favorites: &Favorites, toggled: Option<&PlaceId>) -> Self {
        Self {
            mode: mode.to_string(),
            ids: favorites.ids().iter().map(ToString::to_string).collect(),
            favorite: toggled.map(|id| favorites.contains(id)),
        }
    }
}

/// List favourites for the active mode.
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    responses(
        (status = 200, description = "Favourite ids", body = FavoritesResponse),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites"
)]
#[get("/favorites")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<FavoritesResponse>> {
    let namespace = session.namespace_or_issue()?;
    let mode = state.modes.current(&namespace).await?;
    let favorites = state.user_state.favorites(&namespace, mode).await?;
    Ok(web::Json(FavoritesResponse::new(mode, &favorites, None)))
}

/// Add or remove a favourite in the active mode.
#[utoipa::path(
    post,
    path = "/api/v1/favorites/{id}/toggle",
    params(("id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Favourites after toggling", body = FavoritesResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "toggleFavorite"
)]
#[post("/favorites/{id}/toggle")]
pub async fn toggle_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<FavoritesResponse>> {
    let id = parse_place_id(path.into_inner())?;
    let namespace = session.namespace_or_issue()?;
    let mode = state.modes.current(&namespace).await?;
    let favorites = state.user_state.toggle_favorite(&namespace, mode, &id).await?;
    Ok(web::Json(FavoritesResponse::new(mode, &favorites, Some(&id))))
}
