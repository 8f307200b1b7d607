//! Favourites, notes and reviews kept per client and mode.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::ports::{KeyValueStore, StorageKey, StorageNamespace};
use super::stored_value::{read_json, write_json};
use super::{
    AppMode, Error, Favorites, Notes, Place, PlaceId, Review, ReviewBook, ReviewDraft, UserState,
};

/// Reads and updates a client's stored collections.
#[derive(Clone)]
pub struct UserStateService {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl UserStateService {
    /// Create a service over a store and a clock used to stamp reviews.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Favourites for a mode.
    pub async fn favorites(
        &self,
        namespace: &StorageNamespace,
        mode: AppMode,
    ) -> Result<Favorites, Error> {
        Ok(read_json(self.store.as_ref(), namespace, StorageKey::Favorites(mode))
            .await?
            .unwrap_or_default())
    }

    /// Toggle a favourite and persist the list.
    pub async fn toggle_favorite(
        &self,
        namespace: &StorageNamespace,
        mode: AppMode,
        id: &PlaceId,
    ) -> Result<Favorites, Error> {
        let mut favorites = self.favorites(namespace, mode).await?;
        let now_favorite = favorites.toggle(id);
        write_json(self.store.as_ref(), namespace, StorageKey::Favorites(mode), &favorites).await?;
        info!(%mode, place = %id, favorite = now_favorite, "favourite toggled");
        Ok(favorites)
    }

    /// Notes for a mode.
    pub async fn notes(&self, namespace: &StorageNamespace, mode: AppMode) -> Result<Notes, Error> {
        Ok(read_json(self.store.as_ref(), namespace, StorageKey::Notes(mode))
            .await?
            .unwrap_or_default())
    }

    /// Set a note; blank text removes it.
    pub async fn set_note(
        &self,
        namespace: &StorageNamespace,
        mode: AppMode,
        id: &PlaceId,
        text: &str,
    ) -> Result<Notes, Error> {
        let mut notes = self.notes(namespace, mode).await?;
        notes.set(id, text);
        write_json(self.store.as_ref(), namespace, StorageKey::Notes(mode), &notes).await?;
        Ok(notes)
    }

    /// Reviews for a mode, seeded from `places` until the client submits one.
    pub async fn reviews(
        &self,
        namespace: &StorageNamespace,
        mode: AppMode,
        places: &[Place],
    ) -> Result<ReviewBook, Error> {
        Ok(read_json(self.store.as_ref(), namespace, StorageKey::Reviews(mode))
            .await?
            .unwrap_or_else(|| ReviewBook::seeded(places)))
    }

    /// Stamp `draft` for `place` and put it first in the place's list.
    pub async fn submit_review(
        &self,
        namespace: &StorageNamespace,
        mode: AppMode,
        places: &[Place],
        place: &PlaceId,
        draft: ReviewDraft,
    ) -> Result<Review, Error> {
        if !places.iter().any(|candidate| &candidate.id == place) {
            return Err(Error::not_found(format!("place {place} not found")));
        }
        let mut book = self.reviews(namespace, mode, places).await?;
        let review = draft.submit(place, self.clock.utc());
        book.prepend(place, review.clone());
        write_json(self.store.as_ref(), namespace, StorageKey::Reviews(mode), &book).await?;
        info!(%mode, place = %place, review = %review.id, "review submitted");
        Ok(review)
    }

    /// Everything stored for a mode.
    pub async fn load(
        &self,
        namespace: &StorageNamespace,
        mode: AppMode,
        places: &[Place],
    ) -> Result<UserState, Error> {
        Ok(UserState {
            favorites: self.favorites(namespace, mode).await?,
            notes: self.notes(namespace, mode).await?,
            reviews: self.reviews(namespace, mode, places).await?,
        })
    }
}
