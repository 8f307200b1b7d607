//! Review HTTP handlers.
//!
//! ```text
//! GET  /api/v1/places/{id}/reviews
//! POST /api/v1/places/{id}/reviews
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Review, ReviewDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::places::{active_dataset, find_place};
use crate::inbound::http::schemas::{ErrorSchema, ReviewSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::review_error;

/// Request payload for a review.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReviewRequest {
    /// Reviewer display name.
    #[schema(example = "דנה")]
    pub author: String,
    /// Review body.
    #[schema(example = "אספרסו מצוין ואווירה נעימה")]
    pub text: String,
    /// Star rating, 1 to 5.
    #[schema(minimum = 1, maximum = 5, example = 4)]
    pub rating: u8,
}

/// Reviews for a place, newest first.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsResponse {
    /// Place identifier.
    pub place_id: String,
    /// Reviews.
    #[schema(value_type = Vec<ReviewSchema>)]
    pub reviews: Vec<Review>,
}

/// List reviews for a place in the active mode.
#[utoipa::path(
    get,
    path = "/api/v1/places/{id}/reviews",
    params(("id" = String, Path, description = "Place identifier")),
    responses(
        (status = 200, description = "Reviews", body = ReviewsResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "No such place in the active mode", body = ErrorSchema),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/places/{id}/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ReviewsResponse>> {
    let active = active_dataset(&state, &session).await?;
    let place = find_place(&active.data, path.into_inner())?;
    let book = state
        .user_state
        .reviews(&active.namespace, active.mode, &active.data.places)
        .await?;
    Ok(web::Json(ReviewsResponse {
        place_id: place.id.to_string(),
        reviews: book.reviews_for(&place.id).to_vec(),
    }))
}

/// Submit a review for a place in the active mode.
#[utoipa::path(
    post,
    path = "/api/v1/places/{id}/reviews",
    params(("id" = String, Path, description = "Place identifier")),
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review stored", body = ReviewSchema),
        (status = 400, description = "Invalid review", body = ErrorSchema),
        (status = 404, description = "No such place in the active mode", body = ErrorSchema),
        (status = 503, description = "Client storage unavailable", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "submitReview"
)]
#[post("/places/{id}/reviews")]
pub async fn submit_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReviewRequest>,
) -> ApiResult<HttpResponse> {
    let ReviewRequest {
        author,
        text,
        rating,
    } = payload.into_inner();
    let draft = ReviewDraft::new(&author, &text, rating).map_err(|err| review_error(&err))?;
    let active = active_dataset(&state, &session).await?;
    let place = find_place(&active.data, path.into_inner())?;
    let review = state
        .user_state
        .submit_review(
            &active.namespace,
            active.mode,
            &active.data.places,
            &place.id,
            draft,
        )
        .await?;
    Ok(HttpResponse::Created().json(review))
}
