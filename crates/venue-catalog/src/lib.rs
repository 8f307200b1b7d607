//! Bundled venue catalogs for the Ca Fe guide.
//!
//! This crate owns the hand-curated coffee and matcha venue lists and the
//! transforms that turn their author-friendly JSON shape into canonical
//! records. It does not depend on the backend domain types; the
//! backend maps [`CatalogVenue`] values into its own `Place` aggregate.
//!
//! # Overview
//!
//! - Catalog documents are versioned JSON compiled into the binary.
//! - Every venue receives a deterministic identifier derived from its name
//!   and city, see [`derive_place_id`].
//! - Comma-separated author fields (brew methods, milk options, vibe tags)
//!   are split, trimmed and ordered.
//!
//! # Example
//!
//! ```
//! use venue_catalog::{CatalogMode, VenueCatalog};
//!
//! let json = r#"{
//!     "version": 1,
//!     "mode": "coffee",
//!     "venues": [{
//!         "name": "Cafe Nahat 2",
//!         "city": "Tel Aviv Yafo",
//!         "description": "Neighbourhood espresso bar",
//!         "brewMethods": "פילטר, אספרסו",
//!         "vibeTags": ["שכונתי"],
//!         "instagramHandle": "@nahat",
//!         "coordinates": { "lat": 32.07, "lng": 34.78 }
//!     }]
//! }"#;
//!
//! let catalog = VenueCatalog::from_json(json).expect("valid catalog");
//! assert_eq!(catalog.mode(), CatalogMode::Coffee);
//! let venue = &catalog.venues()[0];
//! assert_eq!(venue.id, "cafe-nahat-2-tel-aviv-yafo-qensz8");
//! assert_eq!(venue.instagram_handle.as_deref(), Some("nahat"));
//! ```

mod bundled;
mod catalog;
mod error;
mod normalize;
mod place_id;
mod raw;

pub use bundled::bundled;
pub use catalog::{CatalogMode, CatalogReview, CatalogVenue, Coordinates, VenueCatalog, VenueSpecialty};
pub use error::CatalogError;
pub use normalize::{
    BREW_METHOD_ORDER, clean_instagram_handle, non_blank, parse_brew_methods, parse_list,
};
pub use place_id::derive_place_id;
