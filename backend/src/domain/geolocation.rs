//! Tracking of the user's position as reported by the client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Coordinates;

/// Why a position could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
pub enum GeolocationFailure {
    /// The client has no geolocation support.
    #[error("הדפדפן שלך לא תומך במיקום גיאוגרפי")]
    Unsupported,
    /// Code 1.
    #[error("גישה למיקום נדחתה. אנא אפשר גישה למיקום בדפדפן.")]
    PermissionDenied,
    /// Code 2.
    #[error("מידע על המיקום לא זמין.")]
    PositionUnavailable,
    /// Code 3.
    #[error("בקשת המיקום פגה זמן.")]
    Timeout,
    /// Any other code.
    #[error("לא ניתן לקבל את המיקום שלך")]
    Unknown,
}

impl GeolocationFailure {
    /// Map a W3C `GeolocationPositionError.code`.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::domain::GeolocationFailure;
    ///
    /// assert_eq!(GeolocationFailure::from_code(1), GeolocationFailure::PermissionDenied);
    /// assert_eq!(GeolocationFailure::from_code(42), GeolocationFailure::Unknown);
    /// ```
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unknown,
        }
    }

    /// Hebrew message shown to the user.
    #[must_use]
    pub fn message(self) -> String {
        self.to_string()
    }
}

/// Options the client passes to its geolocation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequestOptions {
    /// Ask for GPS-grade accuracy.
    pub enable_high_accuracy: bool,
    /// Give up after this many milliseconds.
    pub timeout: u32,
    /// Never reuse a cached position.
    pub maximum_age: u32,
}

/// Options used for every request.
pub const LOCATION_REQUEST_OPTIONS: LocationRequestOptions = LocationRequestOptions {
    enable_high_accuracy: true,
    timeout: 10_000,
    maximum_age: 0,
};

/// Returned by [`LocationTracker::begin`] while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a location request is already in progress")]
pub struct LocationRequestPending;

/// Single-flight state of the "locate me" button.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationTracker {
    loading: bool,
    location: Option<Coordinates>,
    error: Option<GeolocationFailure>,
    fly_key: u64,
}

impl LocationTracker {
    /// Tracker that already knows the user's position, e.g. from a query.
    #[must_use]
    pub fn located(location: Coordinates, fly_key: u64) -> Self {
        Self {
            location: Some(location),
            fly_key,
            ..Self::default()
        }
    }

    /// Start a request; fails while one is in flight.
    pub fn begin(&mut self) -> Result<LocationRequestOptions, LocationRequestPending> {
        if self.loading {
            return Err(LocationRequestPending);
        }
        self.loading = true;
        self.error = None;
        Ok(LOCATION_REQUEST_OPTIONS)
    }

    /// Record a position; bumps the fly key so the map flies once.
    pub fn succeed(&mut self, location: Coordinates) {
        self.loading = false;
        self.location = Some(location);
        self.error = None;
        self.fly_key = self.fly_key.wrapping_add(1);
    }

    /// Record a failure and return the message to show.
    pub fn fail(&mut self, failure: GeolocationFailure) -> String {
        self.loading = false;
        self.error = Some(failure);
        failure.message()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last known position.
    #[must_use]
    pub const fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Last failure, cleared by the next request.
    #[must_use]
    pub const fn error(&self) -> Option<GeolocationFailure> {
        self.error
    }

    /// Increments on every successful fix.
    #[must_use]
    pub const fn fly_key(&self) -> u64 {
        self.fly_key
    }
}
