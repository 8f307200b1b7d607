//! Author-facing JSON shapes for catalog documents.
//!
//! Coffee and matcha lists were curated by hand in slightly different styles:
//! lists may be JSON arrays or comma-separated strings, and handles may carry
//! a leading `@`. These types accept both so the curated files stay easy to
//! edit.

use serde::Deserialize;

use crate::catalog::{CatalogMode, CatalogReview};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCatalog {
    pub(crate) version: u32,
    pub(crate) mode: CatalogMode,
    pub(crate) venues: Vec<RawVenue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawVenue {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) city: String,
    pub(crate) address: Option<String>,
    pub(crate) opening_hours: Option<String>,
    #[serde(default)]
    pub(crate) description: String,
    pub(crate) brew_methods: Option<String>,
    pub(crate) matcha_origin: Option<String>,
    pub(crate) milk_options: Option<ListField>,
    #[serde(default)]
    pub(crate) vibe_tags: Option<ListField>,
    pub(crate) instagram_handle: Option<String>,
    pub(crate) website: Option<String>,
    pub(crate) coordinates: Option<RawCoordinates>,
    pub(crate) hero_image: Option<String>,
    #[serde(default)]
    pub(crate) reviews: Vec<CatalogReview>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RawCoordinates {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

/// A list written either as a JSON array or as comma-separated text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListField {
    Items(Vec<String>),
    Text(String),
}

impl ListField {
    pub(crate) fn into_items(self) -> Vec<String> {
        match self {
            Self::Items(items) => items,
            Self::Text(text) => crate::normalize::parse_list(&text),
        }
    }
}
