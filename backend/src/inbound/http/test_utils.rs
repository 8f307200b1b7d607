//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;

use crate::domain::ports::FixtureSuggestionSubmitter;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::catalog::BundledPlaceCatalog;
use crate::outbound::storage::InMemoryKeyValueStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state over the bundled catalogs and an empty in-memory store.
pub fn bundled_http_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::new(HttpStatePorts {
        store: Arc::new(InMemoryKeyValueStore::default()),
        catalog: Arc::new(BundledPlaceCatalog::load().expect("bundled catalogs")),
        suggestions: Arc::new(FixtureSuggestionSubmitter),
        clock: Arc::new(mockable::DefaultClock),
    }))
}
