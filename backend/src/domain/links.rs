//! Outbound links shown on place cards.

use super::Coordinates;

/// Stock photo shown for places without a hero image.
pub const FALLBACK_HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?w=800&auto=format&fit=crop";

/// Google Maps search link for a position.
///
/// # Examples
/// ```
/// use cafe_guide::domain::{Coordinates, google_maps_url};
///
/// assert_eq!(
///     google_maps_url(Coordinates::new(32.0853, 34.7818)),
///     "https://www.google.com/maps/search/?api=1&query=32.0853,34.7818"
/// );
/// ```
#[must_use]
pub fn google_maps_url(coordinates: Coordinates) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        coordinates.latitude, coordinates.longitude
    )
}

/// Instagram profile link; a leading `@` is dropped.
#[must_use]
pub fn instagram_url(handle: &str) -> String {
    let handle = handle.trim();
    let handle = handle.strip_prefix('@').unwrap_or(handle);
    format!("https://instagram.com/{handle}")
}
