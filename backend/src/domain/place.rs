//! The unified place aggregate shared by both modes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use venue_catalog::{CatalogVenue, VenueSpecialty};

use super::links::{FALLBACK_HERO_IMAGE, google_maps_url, instagram_url};
use super::review::{Review, ReviewValidationError};
use super::slug::is_valid_slug;
use super::Coordinates;

/// Stable place identifier, e.g. `cafe-nahat-2-tel-aviv-yafo-qensz8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceId(String);

/// Validation errors returned when constructing [`PlaceId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceIdValidationError {
    /// Identifier is empty, too long, or uses characters outside `[a-z0-9-]`.
    #[error("place id must be a lowercase slug of at most 64 characters")]
    InvalidShape,
}

impl PlaceId {
    /// Validate and wrap an identifier.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::domain::PlaceId;
    ///
    /// assert!(PlaceId::new("mix-matcha-tel-aviv-s7v6wq").is_ok());
    /// assert!(PlaceId::new("Mix Matcha").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, PlaceIdValidationError> {
        let raw = value.into();
        if !is_valid_slug(&raw) {
            return Err(PlaceIdValidationError::InvalidShape);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PlaceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for PlaceId {
    type Error = PlaceIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlaceId> for String {
    fn from(value: PlaceId) -> Self {
        value.0
    }
}

/// Mode-specific attributes of a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum PlaceSpecialty {
    /// Coffee shop or roastery.
    Coffee {
        /// Brew methods in canonical order, raw labels kept.
        brew_methods: Vec<String>,
    },
    /// Matcha venue.
    Matcha {
        /// Where the matcha is sourced.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matcha_origin: Option<String>,
        /// Milk choices offered.
        milk_options: Vec<String>,
    },
}

/// A venue in either dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Stable identifier.
    pub id: PlaceId,
    /// Display name.
    pub name: String,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Free-form opening hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    /// Short description.
    pub description: String,
    /// Atmosphere tags in authoring order.
    pub vibe_tags: Vec<String>,
    /// Instagram handle without `@`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_handle: Option<String>,
    /// Website URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Map position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Hero image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    /// Curated reviews bundled with the catalog.
    pub reviews: Vec<Review>,
    /// Mode-specific attributes.
    pub specialty: PlaceSpecialty,
}

/// Reasons a catalog venue cannot become a [`Place`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceConversionError {
    /// The derived identifier is not a valid slug.
    #[error("venue {name:?} has an invalid id: {source}")]
    InvalidId {
        /// Venue name.
        name: String,
        /// Underlying validation error.
        #[source]
        source: PlaceIdValidationError,
    },
    /// A bundled review failed validation.
    #[error("venue {name:?} has an invalid review: {source}")]
    InvalidReview {
        /// Venue name.
        name: String,
        /// Underlying validation error.
        #[source]
        source: ReviewValidationError,
    },
}

impl TryFrom<CatalogVenue> for Place {
    type Error = PlaceConversionError;

    fn try_from(venue: CatalogVenue) -> Result<Self, Self::Error> {
        let id = PlaceId::new(venue.id).map_err(|source| PlaceConversionError::InvalidId {
            name: venue.name.clone(),
            source,
        })?;
        let reviews = venue
            .reviews
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| PlaceConversionError::InvalidReview {
                name: venue.name.clone(),
                source,
            })?;
        let specialty = match venue.specialty {
            VenueSpecialty::Coffee { brew_methods } => PlaceSpecialty::Coffee { brew_methods },
            VenueSpecialty::Matcha {
                origin,
                milk_options,
            } => PlaceSpecialty::Matcha {
                matcha_origin: origin,
                milk_options,
            },
        };
        Ok(Self {
            id,
            name: venue.name,
            city: venue.city,
            address: venue.address,
            opening_hours: venue.opening_hours,
            description: venue.description,
            vibe_tags: venue.vibe_tags,
            instagram_handle: venue.instagram_handle,
            website: venue.website,
            coordinates: venue.coordinates.map(Coordinates::from),
            hero_image: venue.hero_image,
            reviews,
            specialty,
        })
    }
}

impl Place {
    /// Brew methods for coffee places; empty for matcha.
    pub fn brew_methods(&self) -> &[String] {
        match &self.specialty {
            PlaceSpecialty::Coffee { brew_methods } => brew_methods,
            PlaceSpecialty::Matcha { .. } => &[],
        }
    }

    /// Hero image, or the stock photo when none was curated.
    pub fn hero_image_or_fallback(&self) -> &str {
        self.hero_image.as_deref().unwrap_or(FALLBACK_HERO_IMAGE)
    }

    /// Google Maps link when the place has coordinates.
    pub fn google_maps_url(&self) -> Option<String> {
        self.coordinates.map(google_maps_url)
    }

    /// Instagram profile link when a handle is known.
    pub fn instagram_url(&self) -> Option<String> {
        self.instagram_handle.as_deref().map(instagram_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use venue_catalog::CatalogReview;

    #[fixture]
    fn venue() -> CatalogVenue {
        CatalogVenue {
            id: "cafe-nahat-2-tel-aviv-yafo-qensz8".to_owned(),
            name: "Cafe Nahat 2".to_owned(),
            city: Some("Tel Aviv Yafo".to_owned()),
            address: None,
            opening_hours: None,
            description: "Neighbourhood espresso bar".to_owned(),
            vibe_tags: vec!["שכונתי".to_owned()],
            instagram_handle: Some("nahat".to_owned()),
            website: None,
            coordinates: Some(venue_catalog::Coordinates {
                lat: 32.07,
                lng: 34.78,
            }),
            hero_image: None,
            reviews: vec![CatalogReview {
                id: "r1".to_owned(),
                author: "Yael".to_owned(),
                rating: 5,
                text: "Best cortado".to_owned(),
                source: None,
                date: None,
            }],
            specialty: VenueSpecialty::Coffee {
                brew_methods: vec!["אספרסו".to_owned(), "V60".to_owned()],
            },
        }
    }

    #[rstest]
    fn converts_catalog_venue(venue: CatalogVenue) {
        let place = Place::try_from(venue).expect("valid venue");
        assert_eq!(place.id.as_str(), "cafe-nahat-2-tel-aviv-yafo-qensz8");
        assert_eq!(place.brew_methods(), ["אספרסו", "V60"]);
        assert_eq!(place.reviews.len(), 1);
        assert_eq!(place.hero_image_or_fallback(), FALLBACK_HERO_IMAGE);
        assert_eq!(
            place.instagram_url().as_deref(),
            Some("https://instagram.com/nahat")
        );
        assert_eq!(
            place.google_maps_url().as_deref(),
            Some("https://www.google.com/maps/search/?api=1&query=32.07,34.78")
        );
    }

    #[rstest]
    fn rejects_out_of_range_review(mut venue: CatalogVenue) {
        if let Some(review) = venue.reviews.first_mut() {
            review.rating = 0;
        }
        let err = Place::try_from(venue).expect_err("rating 0 is invalid");
        assert!(matches!(err, PlaceConversionError::InvalidReview { .. }));
    }

    #[rstest]
    fn matcha_places_have_no_brew_methods(mut venue: CatalogVenue) {
        venue.specialty = VenueSpecialty::Matcha {
            origin: Some("Uji".to_owned()),
            milk_options: vec!["שיבולת שועל".to_owned()],
        };
        let place = Place::try_from(venue).expect("valid venue");
        assert!(place.brew_methods().is_empty());
        let json = serde_json::to_value(&place.specialty).expect("serialise");
        assert_eq!(json["kind"], "matcha");
        assert_eq!(json["matchaOrigin"], "Uji");
    }
}
