//! Driven port supplying the curated venue lists.

use async_trait::async_trait;
use venue_catalog::CatalogVenue;

use super::define_port_error;
use crate::domain::AppMode;

define_port_error! {
    /// Errors surfaced by catalog sources.
    pub enum PlaceCatalogSourceError {
        /// The catalog for a mode could not be produced.
        Unavailable { message: String } => "place catalog unavailable: {message}",
    }
}

/// Source of canonical venue records for a mode.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceCatalogSource: Send + Sync {
    /// Return the venues of the given mode in catalog order.
    async fn venues(&self, mode: AppMode) -> Result<Vec<CatalogVenue>, PlaceCatalogSourceError>;
}
