//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain services and stay testable with in-memory ports.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{KeyValueStore, PlaceCatalogSource, SuggestionSubmitter};
use crate::domain::{
    MapSessionService, ModeService, PlaceDataService, SuggestionService, UserStateService,
};

/// Parameter object bundling the driven ports the services need.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Per-client key-value storage.
    pub store: Arc<dyn KeyValueStore>,
    /// Venue catalogs.
    pub catalog: Arc<dyn PlaceCatalogSource>,
    /// Form service for suggestions.
    pub suggestions: Arc<dyn SuggestionSubmitter>,
    /// Clock stamping submitted reviews.
    pub clock: Arc<dyn Clock>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Mode context.
    pub modes: ModeService,
    /// Dataset loading.
    pub places: PlaceDataService,
    /// Favourites, notes and reviews.
    pub user_state: UserStateService,
    /// Map corrections and location requests.
    pub map_session: MapSessionService,
    /// Suggestion forwarding.
    pub suggestions: SuggestionService,
}

impl HttpState {
    /// Wire services over the given ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use cafe_guide::domain::ports::FixtureSuggestionSubmitter;
    /// use cafe_guide::inbound::http::state::{HttpState, HttpStatePorts};
    /// use cafe_guide::outbound::catalog::BundledPlaceCatalog;
    /// use cafe_guide::outbound::storage::InMemoryKeyValueStore;
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     store: Arc::new(InMemoryKeyValueStore::default()),
    ///     catalog: Arc::new(BundledPlaceCatalog::load().expect("bundled catalogs parse")),
    ///     suggestions: Arc::new(FixtureSuggestionSubmitter),
    ///     clock: Arc::new(mockable::DefaultClock),
    /// });
    /// let _modes = state.modes.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            store,
            catalog,
            suggestions,
            clock,
        } = ports;
        let places = PlaceDataService::new(catalog);
        Self {
            modes: ModeService::new(Arc::clone(&store), places.clone()),
            user_state: UserStateService::new(Arc::clone(&store), Arc::clone(&clock)),
            map_session: MapSessionService::new(store, clock),
            places,
            suggestions: SuggestionService::new(suggestions),
        }
    }
}
