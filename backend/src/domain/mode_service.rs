//! Mode context: which guide a client is browsing.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::ports::{KeyValueStore, StorageKey, StorageNamespace};
use super::stored_value::map_store_error;
use super::{AppMode, Error, PlaceData, PlaceDataService};

/// The active mode together with its dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeContext {
    /// Active mode.
    pub mode: AppMode,
    /// The mode's places.
    #[serde(flatten)]
    pub data: PlaceData,
}

/// Reads and persists the selected mode.
#[derive(Clone)]
pub struct ModeService {
    store: Arc<dyn KeyValueStore>,
    places: PlaceDataService,
}

impl ModeService {
    /// Create a service over a store and the place data service.
    pub fn new(store: Arc<dyn KeyValueStore>, places: PlaceDataService) -> Self {
        Self { store, places }
    }

    /// Stored mode; absent or unrecognised values read as coffee.
    pub async fn current(&self, namespace: &StorageNamespace) -> Result<AppMode, Error> {
        let stored = self
            .store
            .get(namespace, StorageKey::AppMode)
            .await
            .map_err(map_store_error)?;
        Ok(match stored {
            None => AppMode::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(error = %err, "unrecognised stored mode, using coffee");
                AppMode::default()
            }),
        })
    }

    /// Persist `mode`.
    pub async fn set(&self, namespace: &StorageNamespace, mode: AppMode) -> Result<AppMode, Error> {
        self.store
            .set(namespace, StorageKey::AppMode, mode.as_str().to_owned())
            .await
            .map_err(map_store_error)?;
        debug!(%mode, "mode changed");
        Ok(mode)
    }

    /// Flip and persist the mode.
    pub async fn toggle(&self, namespace: &StorageNamespace) -> Result<AppMode, Error> {
        let next = self.current(namespace).await?.toggled();
        self.set(namespace, next).await
    }

    /// Active mode with its dataset.
    pub async fn context(&self, namespace: &StorageNamespace) -> Result<ModeContext, Error> {
        let mode = self.current(namespace).await?;
        Ok(ModeContext {
            mode,
            data: self.places.load(mode).await,
        })
    }
}
