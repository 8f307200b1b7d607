//! Place listing HTTP handlers.
//!
//! ```text
//! GET /api/v1/places
//! GET /api/v1/places/{id}
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::StorageNamespace;
use crate::domain::{AppMode, BrewMethod, Error, Place, PlaceData, Review, display_brew_methods};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PlaceSchema, ReviewSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_place_id;

/// A place with the links and labels its card shows.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceView {
    /// The place.
    #[schema(value_type = PlaceSchema)]
    pub place: Place,
    /// Hero image, falling back to a stock photo.
    pub hero_image: String,
    /// Google Maps search link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps_url: Option<String>,
    /// Instagram profile link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    /// Canonical brew methods as Hebrew labels.
    pub brew_methods: Vec<String>,
}

impl From<&Place> for PlaceView {
    fn from(place: &Place) -> Self {
        Self {
            hero_image: place.hero_image_or_fallback().to_owned(),
            google_maps_url: place.google_maps_url(),
            instagram_url: place.instagram_url(),
            brew_methods: display_brew_methods(place.brew_methods())
                .into_iter()
                .map(|method: BrewMethod| method.label().to_owned())
                .collect(),
            place: place.clone(),
        }
    }
}

/// The active dataset.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacesResponse {
    /// Active mode.
    #[schema(example = "coffee")]
    pub mode: String,
    /// Places in catalog order.
    pub places: Vec<PlaceView>,
    /// `Failed to load data` when the dataset could not be produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One place with the client's reviews, note and favourite flag.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailResponse {
    /// Active mode.
    pub mode: String,
    /// The place.
    pub place: PlaceView,
    /// Reviews, newest first.
    #[schema(value_type = Vec<ReviewSchema>)]
    pub reviews: Vec<Review>,
    /// The client's note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Whether the client marked the place as favourite.
    pub favorite: bool,
}

/// Namespace, mode and dataset for the calling client.
pub(crate) struct ActiveDataset {
    pub(crate) namespace: StorageNamespace,
    pub(crate) mode: AppMode,
    pub(crate) data: PlaceData,
}

pub(crate) async fn active_dataset(
    state: &HttpState,
    session: &SessionContext,
) -> ApiResult<ActiveDataset> {
    let namespace = session.namespace_or_issue()?;
    let context = state.modes.context(&namespace).await?;
    Ok(ActiveDataset {
        namespace,
        mode: context.mode,
        data: context.data,
    })
}

pub(crate) fn find_place<'a>(data: &'a PlaceData, raw_id: String) -> ApiResult<&'a Place> {
    let id = parse_place_id(raw_id)?;
    data.find(&id)
        .ok_or_else(|| Error::not_found(format!("place {id} not found")))
}

/// List the active mode's places.
#[utoipa::path(
    get,
    path = "/api/v1/places",
    responses(
        (status = 200, description = "Active dataset", body = PlacesResponse),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "listPlaces"
)]
#[get("/places")]
pub async fn list_places(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<PlacesResponse>> {
    let ActiveDataset { mode, data, .. } = active_dataset(&state, &session).await?;
    Ok(web::Json(PlacesResponse {
        mode: mode.to_string(),
        places: data.places.iter().map(PlaceView::from).collect(),
        error: data.error,
    }))
}

/// Fetch one place of the active mode.
#[utoipa::path(
    get,
    path = "/api/v1/places/{id}",
    params(("id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Place detail", body = PlaceDetailResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such place in the active mode", body = ErrorSchema),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "getPlace"
)]
#[get("/places/{id}")]
pub async fn get_place(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PlaceDetailResponse>> {
    let active = active_dataset(&state, &session).await?;
    let place = find_place(&active.data, path.into_inner())?;
    let user_state = state
        .user_state
        .load(&active.namespace, active.mode, &active.data.places)
        .await?;
    Ok(web::Json(PlaceDetailResponse {
        mode: active.mode.to_string(),
        reviews: user_state.reviews.reviews_for(&place.id).to_vec(),
        note: user_state.notes.get(&place.id).map(str::to_owned),
        favorite: user_state.favorites.contains(&place.id),
        place: PlaceView::from(place),
    }))
}
