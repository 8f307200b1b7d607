//! Loads the active dataset and converts it into unified places.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use super::ports::PlaceCatalogSource;
use super::{AppMode, Place, PlaceId};

/// Message reported when a dataset cannot be produced.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load data";

/// A mode's places plus the load error, if there was one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaceData {
    /// Unified places in catalog order.
    pub places: Vec<Place>,
    /// Set when loading failed; `places` is then empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlaceData {
    /// Places that can be shown on the map.
    pub fn located(&self) -> impl Iterator<Item = &Place> {
        self.places.iter().filter(|place| place.coordinates.is_some())
    }

    /// Look up a place by id.
    pub fn find(&self, id: &PlaceId) -> Option<&Place> {
        self.places.iter().find(|place| &place.id == id)
    }
}

/// Produces [`PlaceData`] for a mode.
#[derive(Clone)]
pub struct PlaceDataService {
    source: Arc<dyn PlaceCatalogSource>,
}

impl PlaceDataService {
    /// Create a service over a catalog source.
    pub fn new(source: Arc<dyn PlaceCatalogSource>) -> Self {
        Self { source }
    }

    /// Load a mode's places. Never fails; problems are logged and reported
    /// through [`PlaceData::error`].
    pub async fn load(&self, mode: AppMode) -> PlaceData {
        let venues = match self.source.venues(mode).await {
            Ok(venues) => venues,
            Err(err) => {
                error!(%mode, error = %err, "catalog source failed");
                return Self::failed();
            }
        };
        match venues
            .into_iter()
            .map(Place::try_from)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(places) => {
                debug!(%mode, count = places.len(), "loaded places");
                PlaceData {
                    places,
                    error: None,
                }
            }
            Err(err) => {
                error!(%mode, error = %err, "catalog venue failed conversion");
                Self::failed()
            }
        }
    }

    fn failed() -> PlaceData {
        PlaceData {
            places: Vec::new(),
            error: Some(LOAD_FAILURE_MESSAGE.to_owned()),
        }
    }
}
