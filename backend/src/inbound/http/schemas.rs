//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their structure for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested place does not exist in the active mode.
    #[schema(rename = "not_found")]
    NotFound,
    /// A location request is already in progress.
    #[schema(rename = "conflict")]
    Conflict,
    /// Client storage or the form service is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "rating must be between 1 and 5, got 9")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "6f1c1a52-1111-4c2e-8d6a-1a2b3c4d5e6f")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Review`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Review)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ReviewSchema {
    /// `{placeId}-{unix millis}` for submitted reviews.
    #[schema(example = "-51-city-433hwy-1746086400000")]
    id: String,
    /// Reviewer display name.
    #[schema(example = "דנה")]
    author: String,
    /// Star rating.
    #[schema(minimum = 1, maximum = 5, example = 4)]
    rating: u8,
    /// Review body.
    text: String,
    /// Where the review came from.
    #[schema(example = "Google Maps + Ca Fe community")]
    source: Option<String>,
    /// ISO date.
    #[schema(example = "2025-05-01")]
    date: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Place`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Place)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PlaceSchema {
    /// Stable identifier.
    #[schema(example = "cafe-nahat-2-tel-aviv-yafo-qensz8")]
    id: String,
    /// Display name.
    name: String,
    /// City.
    city: Option<String>,
    /// Street address.
    address: Option<String>,
    /// Opening hours.
    opening_hours: Option<String>,
    /// Short description.
    description: String,
    /// Atmosphere tags.
    vibe_tags: Vec<String>,
    /// Instagram handle without `@`.
    instagram_handle: Option<String>,
    /// Website URL.
    website: Option<String>,
    /// `{ latitude, longitude }`.
    #[schema(value_type = Object)]
    coordinates: Option<serde_json::Value>,
    /// Hero image URL.
    hero_image: Option<String>,
    /// Curated reviews.
    reviews: Vec<ReviewSchema>,
    /// `{ kind: "coffee", brewMethods }` or
    /// `{ kind: "matcha", matchaOrigin, milkOptions }`.
    #[schema(value_type = Object)]
    specialty: serde_json::Value,
}

/// OpenAPI schema for [`crate::domain::GuideSnapshot`].
#[derive(ToSchema)]
#[schema(as = crate::domain::GuideSnapshot)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GuideSnapshotSchema {
    /// Active mode.
    #[schema(example = "coffee")]
    mode: String,
    /// Search text.
    query: String,
    /// Selected brew methods as slugs.
    #[schema(example = json!(["filter"]))]
    brew_methods: Vec<String>,
    /// `map` or `shops`.
    active_view: String,
    /// Sidebar state.
    sidebar_open: bool,
    /// Detail panel state.
    detail_open: bool,
    /// `{ x, y }` where the selection bubble opens.
    #[schema(value_type = Object)]
    bubble: Option<serde_json::Value>,
    /// `{ place, distanceKm?, brewMethods, favorite }` per filtered place.
    #[schema(value_type = Vec<Object>)]
    results: Vec<serde_json::Value>,
    /// `{ id, coordinates, icon }` per filtered place with coordinates.
    #[schema(value_type = Vec<Object>)]
    markers: Vec<serde_json::Value>,
    /// The user's marker.
    #[schema(value_type = Object)]
    user_marker: Option<serde_json::Value>,
    /// Favourites in this mode.
    favorites_count: u32,
    /// `setView`, `fitBounds` or `flyTo` commands in application order.
    #[schema(value_type = Vec<Object>)]
    commands: Vec<serde_json::Value>,
    /// `{ place, reviews, note?, favorite }`.
    #[schema(value_type = Object)]
    selected: Option<serde_json::Value>,
}
