//! Place suggestion HTTP handler.
//!
//! ```text
//! POST /api/v1/suggestions
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::PlaceSuggestion;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::suggestion_error;

/// Request payload for suggesting a place.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    /// Place name.
    #[schema(example = "Kalimera")]
    pub place_name: String,
    /// City.
    #[schema(example = "חיפה")]
    pub city: String,
    /// Instagram handle or website.
    #[serde(default)]
    pub instagram_or_website: Option<String>,
    /// Why the place belongs in the guide.
    #[schema(example = "פילטר מעולה")]
    pub why_add: String,
}

/// Acknowledgement returned once the form service accepted a suggestion.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SuggestionAccepted {
    /// Always `true`.
    pub accepted: bool,
}

/// Forward a suggestion to the hosted form service.
#[utoipa::path(
    post,
    path = "/api/v1/suggestions",
    request_body = SuggestionRequest,
    responses(
        (status = 202, description = "Suggestion forwarded", body = SuggestionAccepted),
        (status = 400, description = "Missing required field", body = ErrorSchema),
        (status = 503, description = "Form service unavailable or rejected the submission", body = ErrorSchema)
    ),
    tags = ["suggestions"],
    operation_id = "submitSuggestion"
)]
#[post("/suggestions")]
pub async fn submit_suggestion(
    state: web::Data<HttpState>,
    payload: web::Json<SuggestionRequest>,
) -> ApiResult<HttpResponse> {
    let suggestion = PlaceSuggestion::new(
        &payload.place_name,
        &payload.city,
        payload.instagram_or_website.as_deref(),
        &payload.why_add,
    )
    .map_err(|err| suggestion_error(&err))?;
    state.suggestions.submit(&suggestion).await?;
    Ok(HttpResponse::Accepted().json(SuggestionAccepted { accepted: true }))
}
