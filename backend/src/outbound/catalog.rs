//! Catalog source backed by the venue lists compiled into the binary.

use async_trait::async_trait;
use tracing::info;
use venue_catalog::{CatalogError, CatalogMode, CatalogVenue, VenueCatalog, bundled};

use crate::domain::AppMode;
use crate::domain::ports::{PlaceCatalogSource, PlaceCatalogSourceError};

/// Serves the bundled coffee and matcha catalogs.
///
/// Both documents are validated once at start-up; a malformed bundle stops
/// the server instead of surfacing per request.
#[derive(Debug, Clone)]
pub struct BundledPlaceCatalog {
    coffee: Vec<CatalogVenue>,
    matcha: Vec<CatalogVenue>,
}

impl BundledPlaceCatalog {
    /// Parse and validate both bundled catalogs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when either bundled document is invalid.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::outbound::catalog::BundledPlaceCatalog;
    ///
    /// let catalog = BundledPlaceCatalog::load().expect("bundled catalogs are valid");
    /// # let _ = catalog;
    /// ```
    pub fn load() -> Result<Self, CatalogError> {
        let catalog = Self::from_catalogs(bundled(CatalogMode::Coffee)?, bundled(CatalogMode::Matcha)?);
        info!(
            coffee = catalog.coffee.len(),
            matcha = catalog.matcha.len(),
            "loaded bundled catalogs"
        );
        Ok(catalog)
    }

    /// Serve already-parsed catalogs.
    #[must_use]
    pub fn from_catalogs(coffee: VenueCatalog, matcha: VenueCatalog) -> Self {
        Self {
            coffee: coffee.into_venues(),
            matcha: matcha.into_venues(),
        }
    }
}

#[async_trait]
impl PlaceCatalogSource for BundledPlaceCatalog {
    async fn venues(&self, mode: AppMode) -> Result<Vec<CatalogVenue>, PlaceCatalogSourceError> {
        let venues = match mode {
            AppMode::Coffee => &self.coffee,
            AppMode::Matcha => &self.matcha,
        };
        Ok(venues.clone())
    }
}
