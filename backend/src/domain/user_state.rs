//! Per-client collections kept for each mode: favourites, notes, reviews.
//!
//! Each collection serialises to the JSON shape stored under its
//! [`StorageKey`](super::ports::StorageKey).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Place, PlaceId, Review};

/// Favourite place ids in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<PlaceId>);

impl Favorites {
    /// Add the id when absent, remove it when present. Returns whether the
    /// place is a favourite afterwards.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::domain::{Favorites, PlaceId};
    ///
    /// let id = PlaceId::new("mix-matcha-tel-aviv-s7v6wq").expect("valid id");
    /// let mut favorites = Favorites::default();
    /// assert!(favorites.toggle(&id));
    /// assert!(!favorites.toggle(&id));
    /// assert!(favorites.is_empty());
    /// ```
    pub fn toggle(&mut self, id: &PlaceId) -> bool {
        if let Some(index) = self.0.iter().position(|existing| existing == id) {
            self.0.remove(index);
            false
        } else {
            self.0.push(id.clone());
            true
        }
    }

    /// Whether `id` is a favourite.
    pub fn contains(&self, id: &PlaceId) -> bool {
        self.0.contains(id)
    }

    /// Favourite ids in insertion order.
    pub fn ids(&self) -> &[PlaceId] {
        &self.0
    }

    /// Number of favourites.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no favourites.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Private notes keyed by place id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notes(BTreeMap<PlaceId, String>);

impl Notes {
    /// Store `text`; blank text removes the note.
    pub fn set(&mut self, id: &PlaceId, text: &str) {
        if text.trim().is_empty() {
            self.0.remove(id);
        } else {
            self.0.insert(id.clone(), text.to_owned());
        }
    }

    /// Note for a place.
    pub fn get(&self, id: &PlaceId) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// All notes.
    pub fn entries(&self) -> &BTreeMap<PlaceId, String> {
        &self.0
    }
}

/// Review lists keyed by place id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewBook(BTreeMap<PlaceId, Vec<Review>>);

impl ReviewBook {
    /// Book seeded with the curated reviews of every place.
    #[must_use]
    pub fn seeded(places: &[Place]) -> Self {
        Self(
            places
                .iter()
                .map(|place| (place.id.clone(), place.reviews.clone()))
                .collect(),
        )
    }

    /// Reviews for a place, newest first.
    pub fn reviews_for(&self, id: &PlaceId) -> &[Review] {
        self.0.get(id).map_or(&[], Vec::as_slice)
    }

    /// Put `review` at the head of the place's list.
    pub fn prepend(&mut self, id: &PlaceId, review: Review) {
        self.0.entry(id.clone()).or_default().insert(0, review);
    }
}

/// Everything stored for one client and mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    /// Favourite places.
    pub favorites: Favorites,
    /// Private notes.
    pub notes: Notes,
    /// Reviews including submitted ones.
    pub reviews: ReviewBook,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rating;
    use rstest::rstest;

    fn id(raw: &str) -> PlaceId {
        PlaceId::new(raw).expect("valid id")
    }

    fn review(review_id: &str) -> Review {
        Review {
            id: review_id.to_owned(),
            author: "Noa".to_owned(),
            rating: Rating::new(5).expect("valid rating"),
            text: "Lovely".to_owned(),
            source: None,
            date: None,
        }
    }

    #[rstest]
    fn favorites_keep_insertion_order() {
        let mut favorites = Favorites::default();
        favorites.toggle(&id("b"));
        favorites.toggle(&id("a"));
        favorites.toggle(&id("c"));
        favorites.toggle(&id("a"));
        assert_eq!(favorites.ids(), [id("b"), id("c")]);
    }

    #[rstest]
    fn favorites_serialise_as_a_json_array() {
        let mut favorites = Favorites::default();
        favorites.toggle(&id("a"));
        assert_eq!(serde_json::to_string(&favorites).expect("serialise"), r#"["a"]"#);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_note_removes(#[case] blank: &str) {
        let mut notes = Notes::default();
        notes.set(&id("a"), "try the cortado");
        notes.set(&id("a"), blank);
        assert_eq!(notes.get(&id("a")), None);
    }

    #[rstest]
    fn prepend_keeps_earlier_order() {
        let mut book = ReviewBook::default();
        book.prepend(&id("a"), review("1"));
        book.prepend(&id("a"), review("2"));
        book.prepend(&id("a"), review("3"));
        let ids: Vec<_> = book.reviews_for(&id("a")).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);
        assert!(book.reviews_for(&id("b")).is_empty());
    }
}
