//! Catalogs compiled into the binary.

use crate::catalog::{CatalogMode, VenueCatalog};
use crate::error::CatalogError;

const COFFEE_JSON: &str = include_str!("../data/coffee.json");
const MATCHA_JSON: &str = include_str!("../data/matcha.json");

/// Load the bundled catalog for a mode.
///
/// # Errors
///
/// Returns [`CatalogError`] if the bundled document fails validation or
/// declares a different mode than requested.
///
/// # Examples
/// ```
/// use venue_catalog::{CatalogMode, bundled};
///
/// let coffee = bundled(CatalogMode::Coffee).expect("bundled coffee catalog");
/// assert!(!coffee.venues().is_empty());
/// ```
pub fn bundled(mode: CatalogMode) -> Result<VenueCatalog, CatalogError> {
    let json = match mode {
        CatalogMode::Coffee => COFFEE_JSON,
        CatalogMode::Matcha => MATCHA_JSON,
    };
    let catalog = VenueCatalog::from_json(json)?;
    if catalog.mode() != mode {
        return Err(CatalogError::ModeMismatch {
            expected: mode.to_string(),
            actual: catalog.mode().to_string(),
        });
    }
    Ok(catalog)
}
