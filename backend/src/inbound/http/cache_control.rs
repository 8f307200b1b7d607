//! Cache-control policies for guide responses.
//!
//! Anything derived from the session's namespace is private to the client.
//! Static lookups, such as geolocation messages, may be shared by caches.

use actix_web::http::header::{CacheControl, CacheDirective};

/// How long shared caches may keep static lookups.
pub const STATIC_LOOKUP_MAX_AGE_SECS: u32 = 24 * 60 * 60;

/// Policy for responses built from a client's stored state.
pub fn per_client() -> CacheControl {
    CacheControl(vec![
        CacheDirective::Private,
        CacheDirective::NoCache,
        CacheDirective::MustRevalidate,
    ])
}

/// Policy for responses that are identical for every client.
pub fn static_lookup() -> CacheControl {
    CacheControl(vec![
        CacheDirective::Public,
        CacheDirective::MaxAge(STATIC_LOOKUP_MAX_AGE_SECS),
    ])
}
