//! Reviews: bundled ones from the catalogs and ones submitted by visitors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PlaceId;

/// Source label stamped on reviews submitted through the guide.
pub const COMMUNITY_REVIEW_SOURCE: &str = "Google Maps + Ca Fe community";

/// Star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Validate a rating.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::domain::Rating;
    ///
    /// assert_eq!(Rating::new(4).expect("in range").value(), 4);
    /// assert!(Rating::new(0).is_err());
    /// assert!(Rating::new(6).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self, ReviewValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewValidationError::RatingOutOfRange { rating: value })
        }
    }

    /// Numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ReviewValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Validation failures for reviews and drafts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewValidationError {
    /// Rating outside 1..=5.
    #[error("rating must be between 1 and 5, got {rating}")]
    RatingOutOfRange {
        /// Offending value.
        rating: u8,
    },
    /// Author name is blank.
    #[error("review author must not be empty")]
    EmptyAuthor,
    /// Review text is blank.
    #[error("review text must not be empty")]
    EmptyText,
}

impl ReviewValidationError {
    /// Name of the request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::RatingOutOfRange { .. } => "rating",
            Self::EmptyAuthor => "author",
            Self::EmptyText => "text",
        }
    }
}

/// A stored review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique id; submitted reviews use `{placeId}-{unix millis}`.
    pub id: String,
    /// Reviewer display name.
    pub author: String,
    /// Star rating.
    pub rating: Rating,
    /// Review body.
    pub text: String,
    /// Where the review came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl TryFrom<venue_catalog::CatalogReview> for Review {
    type Error = ReviewValidationError;

    fn try_from(value: venue_catalog::CatalogReview) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            author: value.author,
            rating: Rating::new(value.rating)?,
            text: value.text,
            source: value.source,
            date: value.date,
        })
    }
}

/// A visitor's review before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    author: String,
    text: String,
    rating: Rating,
}

impl ReviewDraft {
    /// Validate a draft; author and text are trimmed and must be non-empty.
    pub fn new(
        author: &str,
        text: &str,
        rating: u8,
    ) -> Result<Self, ReviewValidationError> {
        let author = author.trim();
        if author.is_empty() {
            return Err(ReviewValidationError::EmptyAuthor);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ReviewValidationError::EmptyText);
        }
        Ok(Self {
            author: author.to_owned(),
            text: text.to_owned(),
            rating: Rating::new(rating)?,
        })
    }

    /// Turn the draft into a stored review for `place_id` at `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use cafe_guide::domain::{PlaceId, ReviewDraft};
    ///
    /// let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).single().expect("valid time");
    /// let place = PlaceId::new("-51-city-433hwy").expect("valid id");
    /// let review = ReviewDraft::new(" דנה ", "אספרסו מצוין", 4)
    ///     .expect("valid draft")
    ///     .submit(&place, now);
    /// assert_eq!(review.author, "דנה");
    /// assert_eq!(review.date.as_deref(), Some("2025-03-14"));
    /// assert_eq!(review.id, format!("-51-city-433hwy-{}", now.timestamp_millis()));
    /// ```
    #[must_use]
    pub fn submit(self, place_id: &PlaceId, now: DateTime<Utc>) -> Review {
        Review {
            id: format!("{place_id}-{}", now.timestamp_millis()),
            author: self.author,
            rating: self.rating,
            text: self.text,
            source: Some(COMMUNITY_REVIEW_SOURCE.to_owned()),
            date: Some(now.format("%Y-%m-%d").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "great", 5, ReviewValidationError::EmptyAuthor)]
    #[case("Noa", "   ", 5, ReviewValidationError::EmptyText)]
    #[case("Noa", "great", 0, ReviewValidationError::RatingOutOfRange { rating: 0 })]
    #[case("Noa", "great", 6, ReviewValidationError::RatingOutOfRange { rating: 6 })]
    fn drafts_are_validated(
        #[case] author: &str,
        #[case] text: &str,
        #[case] rating: u8,
        #[case] expected: ReviewValidationError,
    ) {
        assert_eq!(ReviewDraft::new(author, text, rating), Err(expected));
    }

    #[rstest]
    fn ratings_deserialise_only_in_range() {
        assert!(serde_json::from_str::<Rating>("3").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[rstest]
    fn catalog_reviews_with_bad_ratings_are_rejected() {
        let raw = venue_catalog::CatalogReview {
            id: "r1".to_owned(),
            author: "Omer".to_owned(),
            rating: 7,
            text: "Too good".to_owned(),
            source: None,
            date: None,
        };
        assert_eq!(
            Review::try_from(raw),
            Err(ReviewValidationError::RatingOutOfRange { rating: 7 })
        );
    }
}
