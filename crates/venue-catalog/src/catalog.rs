//! Canonical catalog records and document validation.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::normalize::{clean_instagram_handle, non_blank, parse_brew_methods};
use crate::place_id::derive_place_id;
use crate::raw::{RawCatalog, RawCoordinates, RawVenue};

/// Current supported catalog document version.
const SUPPORTED_VERSION: u32 = 1;

/// Which of the two guides a catalog belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    /// Specialty coffee shops and roasteries.
    Coffee,
    /// Matcha bars and cafés serving matcha.
    Matcha,
}

impl CatalogMode {
    /// Lowercase name used in documents and storage keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coffee => "coffee",
            Self::Matcha => "matcha",
        }
    }
}

impl fmt::Display for CatalogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WGS84 position of a venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

/// A review shipped with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReview {
    /// Review identifier.
    pub id: String,
    /// Display name of the reviewer.
    pub author: String,
    /// Star rating; the backend enforces the 1–5 range.
    pub rating: u8,
    /// Review body.
    pub text: String,
    /// Where the review was collected.
    #[serde(default)]
    pub source: Option<String>,
    /// ISO date (`YYYY-MM-DD`) the review was written.
    #[serde(default)]
    pub date: Option<String>,
}

/// Mode-specific venue attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VenueSpecialty {
    /// Coffee venues list the brew methods they offer.
    Coffee {
        /// Brew methods, known methods first in canonical order.
        brew_methods: Vec<String>,
    },
    /// Matcha venues describe their tea and milk choices.
    Matcha {
        /// Region the matcha is sourced from.
        origin: Option<String>,
        /// Milk options offered with matcha drinks.
        milk_options: Vec<String>,
    },
}

/// A venue in canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogVenue {
    /// Deterministic identifier, see [`derive_place_id`].
    pub id: String,
    /// Venue name as shown to users.
    pub name: String,
    /// City, when known.
    pub city: Option<String>,
    /// Street address, when known.
    pub address: Option<String>,
    /// Free-text opening hours.
    pub opening_hours: Option<String>,
    /// Short description.
    pub description: String,
    /// Ordered short labels describing the atmosphere.
    pub vibe_tags: Vec<String>,
    /// Instagram handle without the leading `@`.
    pub instagram_handle: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// Map position; absent venues are not placed on the map.
    pub coordinates: Option<Coordinates>,
    /// Relative or absolute hero image URL.
    pub hero_image: Option<String>,
    /// Reviews bundled with the catalog.
    pub reviews: Vec<CatalogReview>,
    /// Coffee or matcha specific attributes.
    pub specialty: VenueSpecialty,
}

/// A validated catalog for one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueCatalog {
    mode: CatalogMode,
    venues: Vec<CatalogVenue>,
}

impl VenueCatalog {
    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if:
    /// - the JSON is malformed or misses required fields;
    /// - the version is unsupported;
    /// - the venue list is empty;
    /// - a venue name is blank;
    /// - two venues derive the same identifier.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog =
            serde_json::from_str(json).map_err(|e| CatalogError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawCatalog) -> Result<Self, CatalogError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }
        if raw.venues.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mode = raw.mode;
        let mut seen = HashSet::with_capacity(raw.venues.len());
        let mut venues = Vec::with_capacity(raw.venues.len());
        for (index, venue) in raw.venues.into_iter().enumerate() {
            if venue.name.trim().is_empty() {
                return Err(CatalogError::BlankName { index });
            }
            let normalized = normalize_venue(mode, venue);
            if !seen.insert(normalized.id.clone()) {
                return Err(CatalogError::DuplicateId {
                    id: normalized.id,
                    index,
                });
            }
            venues.push(normalized);
        }

        Ok(Self { mode, venues })
    }

    /// Mode declared by the document.
    #[must_use]
    pub const fn mode(&self) -> CatalogMode {
        self.mode
    }

    /// Venues in document order.
    #[must_use]
    pub fn venues(&self) -> &[CatalogVenue] {
        &self.venues
    }

    /// Consume the catalog, yielding its venues.
    #[must_use]
    pub fn into_venues(self) -> Vec<CatalogVenue> {
        self.venues
    }

    /// Look up a venue by identifier.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&CatalogVenue> {
        self.venues.iter().find(|venue| venue.id == id)
    }
}

fn normalize_venue(mode: CatalogMode, raw: RawVenue) -> CatalogVenue {
    let RawVenue {
        name,
        city,
        address,
        opening_hours,
        description,
        brew_methods,
        matcha_origin,
        milk_options,
        vibe_tags,
        instagram_handle,
        website,
        coordinates,
        hero_image,
        reviews,
    } = raw;

    let specialty = match mode {
        CatalogMode::Coffee => VenueSpecialty::Coffee {
            brew_methods: brew_methods
                .as_deref()
                .map(parse_brew_methods)
                .unwrap_or_default(),
        },
        CatalogMode::Matcha => VenueSpecialty::Matcha {
            origin: non_blank(matcha_origin),
            milk_options: milk_options.map(|list| list.into_items()).unwrap_or_default(),
        },
    };

    CatalogVenue {
        id: derive_place_id(&name, &city),
        city: non_blank(Some(city)),
        name,
        address: non_blank(address),
        opening_hours: non_blank(opening_hours),
        description,
        vibe_tags: vibe_tags.map(|list| list.into_items()).unwrap_or_default(),
        instagram_handle: instagram_handle.as_deref().and_then(clean_instagram_handle),
        website: non_blank(website),
        coordinates: coordinates.and_then(present_coordinates),
        hero_image: non_blank(hero_image),
        reviews,
        specialty,
    }
}

/// Zero stands in for "unknown" in the curated files.
fn present_coordinates(raw: RawCoordinates) -> Option<Coordinates> {
    let is_set = |value: f64| value != 0.0 && value.is_finite();
    (is_set(raw.lat) && is_set(raw.lng)).then_some(Coordinates {
        lat: raw.lat,
        lng: raw.lng,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MATCHA_JSON: &str = r#"{
        "version": 1,
        "mode": "matcha",
        "venues": [{
            "name": "Mix & Matcha",
            "city": "Tel Aviv",
            "description": "Ceremonial grade bar",
            "matchaOrigin": "Uji, Kyoto",
            "milkOptions": "Oat, Almond, Cow",
            "vibeTags": "שקט, איכותי",
            "instagramHandle": "@mixandmatcha",
            "website": "",
            "coordinates": { "lat": 32.07, "lng": 34.79 }
        }]
    }"#;

    #[rstest]
    fn matcha_lists_are_split_from_text() {
        let catalog = VenueCatalog::from_json(MATCHA_JSON).expect("valid catalog");
        let venue = catalog.venues().first().expect("one venue");

        assert_eq!(venue.vibe_tags, vec!["שקט", "איכותי"]);
        assert_eq!(
            venue.specialty,
            VenueSpecialty::Matcha {
                origin: Some("Uji, Kyoto".to_owned()),
                milk_options: vec!["Oat".to_owned(), "Almond".to_owned(), "Cow".to_owned()],
            }
        );
        assert!(venue.website.is_none());
        assert_eq!(venue.instagram_handle.as_deref(), Some("mixandmatcha"));
    }

    #[rstest]
    fn zero_coordinates_are_treated_as_missing() {
        let json = MATCHA_JSON.replace("32.07", "0");
        let catalog = VenueCatalog::from_json(&json).expect("valid catalog");
        assert!(catalog.venues().first().expect("venue").coordinates.is_none());
    }

    #[rstest]
    fn rejects_unsupported_version() {
        let json = MATCHA_JSON.replace("\"version\": 1", "\"version\": 2");
        let err = VenueCatalog::from_json(&json).expect_err("version 2 is unsupported");
        assert_eq!(
            err,
            CatalogError::UnsupportedVersion {
                expected: 1,
                actual: 2
            }
        );
    }

    #[rstest]
    fn rejects_duplicate_venues() {
        let json = r#"{
            "version": 1,
            "mode": "coffee",
            "venues": [
                { "name": "קפה מאה", "city": "תל אביב", "brewMethods": "אספרסו" },
                { "name": "קפה מאה", "city": "תל אביב", "brewMethods": "פילטר" }
            ]
        }"#;
        let err = VenueCatalog::from_json(json).expect_err("duplicate ids");
        assert!(matches!(err, CatalogError::DuplicateId { index: 1, .. }));
    }

    #[rstest]
    fn rejects_blank_names() {
        let json = r#"{ "version": 1, "mode": "coffee", "venues": [{ "name": "  " }] }"#;
        let err = VenueCatalog::from_json(json).expect_err("blank name");
        assert_eq!(err, CatalogError::BlankName { index: 0 });
    }

    #[rstest]
    fn rejects_empty_catalogs() {
        let json = r#"{ "version": 1, "mode": "coffee", "venues": [] }"#;
        let err = VenueCatalog::from_json(json).expect_err("empty");
        assert_eq!(err, CatalogError::EmptyCatalog);
    }
}
