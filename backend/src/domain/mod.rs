//! Domain primitives, aggregates and services.
//!
//! Purpose: model the guide independently of HTTP and storage. Adapters reach
//! the outside world through the traits in [`ports`]; everything else here is
//! plain data and synchronous state machines, plus the async services that
//! tie them to the ports.
//!
//! Public surface:
//! - [`Place`], [`Review`], [`AppMode`]: the browsed data.
//! - [`PlaceFilter`], [`MapController`], [`LocationTracker`], [`GuideView`]:
//!   browsing logic.
//! - [`Favorites`], [`Notes`], [`ReviewBook`]: per-client collections.
//! - [`ModeService`], [`PlaceDataService`], [`UserStateService`],
//!   [`MapSessionService`], [`SuggestionService`]: services used by the
//!   inbound adapter.
//! - [`Error`], [`ErrorCode`], [`TraceId`]: error payloads and correlation.

pub mod error;
pub mod geo;
pub mod geolocation;
pub mod guide;
pub mod links;
pub mod map_session_service;
pub mod map_view;
pub mod mode;
pub mod mode_service;
pub mod place;
pub mod place_data_service;
pub mod ports;
pub mod review;
pub mod search;
mod slug;
mod stored_value;
pub mod suggestion;
pub mod suggestion_service;
pub mod trace_id;
pub mod user_state;
pub mod user_state_service;

pub use self::error::{Error, ErrorCode};
pub use self::geo::{Coordinates, EARTH_RADIUS_KM, GeoBounds, ISRAEL_BOUNDS, JERUSALEM};
pub use self::geolocation::{
    GeolocationFailure, LOCATION_REQUEST_OPTIONS, LocationRequestOptions, LocationRequestPending,
    LocationTracker,
};
pub use self::guide::{
    ActiveView, GuideResult, GuideSnapshot, GuideView, Marker, SIDEBAR_BREAKPOINT_PX, ScreenPoint,
    SelectedPlace, Viewport,
};
pub use self::links::{FALLBACK_HERO_IMAGE, google_maps_url, instagram_url};
pub use self::map_session_service::MapSessionService;
pub use self::map_view::{
    MapCommand, MapController, MapSession, MarkerIcon, initial_center, marker_icon,
};
pub use self::mode::{AppMode, UnknownModeError};
pub use self::mode_service::{ModeContext, ModeService};
pub use self::place::{Place, PlaceConversionError, PlaceId, PlaceIdValidationError, PlaceSpecialty};
pub use self::place_data_service::{LOAD_FAILURE_MESSAGE, PlaceData, PlaceDataService};
pub use self::review::{COMMUNITY_REVIEW_SOURCE, Rating, Review, ReviewDraft, ReviewValidationError};
pub use self::search::{
    BrewMethod, PlaceFilter, PlaceMatch, UnknownBrewMethodError, display_brew_methods,
};
pub use self::suggestion::{PlaceSuggestion, SuggestionValidationError};
pub use self::suggestion_service::SuggestionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user_state::{Favorites, Notes, ReviewBook, UserState};
pub use self::user_state_service::UserStateService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use cafe_guide::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such place"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
