//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint of the inbound layer
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`PlaceSchema`],
//!   [`ReviewSchema`], ...) that document the JSON without coupling domain
//!   types to utoipa
//! - **Security**: the session cookie carrying the client's storage namespace
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::favorites::FavoritesResponse;
use crate::inbound::http::geolocation::{
    FailureRequest, GeolocationFailureResponse, LocationOptionsResponse, LocationStateResponse,
    PositionRequest,
};
use crate::inbound::http::map::{MoveEndRequest, MoveEndResponse};
use crate::inbound::http::mode::{ModeRequest, ModeResponse};
use crate::inbound::http::notes::{NoteRequest, NotesResponse};
use crate::inbound::http::places::{PlaceDetailResponse, PlaceView, PlacesResponse};
use crate::inbound::http::reviews::{ReviewRequest, ReviewsResponse};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, GuideSnapshotSchema, PlaceSchema, ReviewSchema,
};
use crate::inbound::http::suggestions::{SuggestionAccepted, SuggestionRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie naming the client's storage namespace; issued on first request.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Ca Fe guide API",
        description = "Coffee and matcha venues in Israel: catalogs, search, map commands and per-client favourites, notes and reviews.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::mode::get_mode,
        crate::inbound::http::mode::set_mode,
        crate::inbound::http::mode::toggle_mode,
        crate::inbound::http::places::list_places,
        crate::inbound::http::places::get_place,
        crate::inbound::http::guide::get_guide,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::favorites::toggle_favorite,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::set_note,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::submit_review,
        crate::inbound::http::suggestions::submit_suggestion,
        crate::inbound::http::geolocation::location_options,
        crate::inbound::http::geolocation::describe_failure,
        crate::inbound::http::geolocation::get_location,
        crate::inbound::http::geolocation::request_location,
        crate::inbound::http::geolocation::record_location,
        crate::inbound::http::geolocation::record_location_failure,
        crate::inbound::http::map::move_end,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PlaceSchema,
        ReviewSchema,
        GuideSnapshotSchema,
        PlaceView,
        PlacesResponse,
        PlaceDetailResponse,
        ModeRequest,
        ModeResponse,
        FavoritesResponse,
        NoteRequest,
        NotesResponse,
        ReviewRequest,
        ReviewsResponse,
        SuggestionRequest,
        SuggestionAccepted,
        LocationOptionsResponse,
        GeolocationFailureResponse,
        PositionRequest,
        FailureRequest,
        LocationStateResponse,
        MoveEndRequest,
        MoveEndResponse,
    )),
    tags(
        (name = "mode", description = "Coffee or matcha"),
        (name = "places", description = "The active dataset"),
        (name = "guide", description = "Search results, markers and map commands"),
        (name = "favorites", description = "Per-mode favourite places"),
        (name = "notes", description = "Per-mode private notes"),
        (name = "reviews", description = "Curated and community reviews"),
        (name = "suggestions", description = "Suggest a missing place"),
        (name = "map", description = "Keeping the map inside Israel"),
        (name = "geolocation", description = "Locate-me requests and helpers"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    // utoipa replaces :: with . in schema names
    #[rstest]
    #[case("crate.domain.Error", "code")]
    #[case("crate.domain.Error", "message")]
    #[case("crate.domain.Review", "rating")]
    #[case("crate.domain.Place", "specialty")]
    fn domain_schemas_have_expected_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("ReviewsResponse", "placeId")]
    #[case("LocationStateResponse", "flyKey")]
    fn response_schemas_use_camel_case_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/v1/guide")]
    #[case("/api/v1/places/{id}/reviews")]
    #[case("/api/v1/favorites/{id}/toggle")]
    #[case("/api/v1/suggestions")]
    #[case("/api/v1/geolocation/failures/{code}")]
    #[case("/api/v1/map/move-end")]
    #[case("/api/v1/location/request")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
