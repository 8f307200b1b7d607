//! Addressing for the per-client key-value store.
//!
//! A [`StorageNamespace`] isolates one client's state; a [`StorageKey`]
//! names one value inside it. Key names match the ones browsers used to keep
//! in local storage so exported state stays interchangeable.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::AppMode;
use crate::domain::slug::is_valid_slug;

/// Opaque per-client namespace, normally a UUID minted on first visit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageNamespace(String);

/// Validation errors returned when constructing [`StorageNamespace`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageNamespaceValidationError {
    /// Namespace is empty, too long, or uses characters outside `[a-z0-9-]`.
    #[error("storage namespace must be a lowercase slug of at most 64 characters")]
    InvalidShape,
}

impl StorageNamespace {
    /// Validate and wrap a namespace.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::domain::ports::StorageNamespace;
    ///
    /// let ns = StorageNamespace::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid");
    /// assert_eq!(ns.as_str(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(StorageNamespace::new("../etc").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, StorageNamespaceValidationError> {
        let raw = value.into();
        if !is_valid_slug(&raw) {
            return Err(StorageNamespaceValidationError::InvalidShape);
        }
        Ok(Self(raw))
    }

    /// Mint a fresh random namespace.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the namespace as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StorageNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of one stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The selected mode, stored as a bare `coffee` / `matcha` string.
    AppMode,
    /// JSON array of favourite place ids.
    Favorites(AppMode),
    /// JSON object mapping place id to note text.
    Notes(AppMode),
    /// JSON object mapping place id to its review list.
    Reviews(AppMode),
    /// JSON map bookkeeping: pending correction and last flown key.
    MapState,
    /// JSON state of the "locate me" button.
    LocationState,
}

impl StorageKey {
    /// Key name as stored, e.g. `matchaFavorites`.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::domain::AppMode;
    /// use cafe_guide::domain::ports::StorageKey;
    ///
    /// assert_eq!(StorageKey::AppMode.name(), "appMode");
    /// assert_eq!(StorageKey::Notes(AppMode::Matcha).name(), "matchaNotes");
    /// ```
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::AppMode => "appMode".to_owned(),
            Self::Favorites(mode) => format!("{mode}Favorites"),
            Self::Notes(mode) => format!("{mode}Notes"),
            Self::Reviews(mode) => format!("{mode}Reviews"),
            Self::MapState => "mapState".to_owned(),
            Self::LocationState => "locationState".to_owned(),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StorageKey::AppMode, "appMode")]
    #[case(StorageKey::Favorites(AppMode::Coffee), "coffeeFavorites")]
    #[case(StorageKey::Notes(AppMode::Coffee), "coffeeNotes")]
    #[case(StorageKey::Reviews(AppMode::Coffee), "coffeeReviews")]
    #[case(StorageKey::Favorites(AppMode::Matcha), "matchaFavorites")]
    #[case(StorageKey::Notes(AppMode::Matcha), "matchaNotes")]
    #[case(StorageKey::Reviews(AppMode::Matcha), "matchaReviews")]
    #[case(StorageKey::MapState, "mapState")]
    #[case(StorageKey::LocationState, "locationState")]
    fn key_names_match_browser_storage(#[case] key: StorageKey, #[case] expected: &str) {
        assert_eq!(key.name(), expected);
    }

    #[rstest]
    fn random_namespaces_are_valid() {
        let ns = StorageNamespace::random();
        assert!(StorageNamespace::new(ns.as_str()).is_ok());
    }
}
