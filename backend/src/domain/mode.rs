//! Application mode: which of the two guides is active.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use venue_catalog::CatalogMode;

/// Active guide. Every per-client collection is kept separately per mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    /// Specialty coffee guide.
    #[default]
    Coffee,
    /// Matcha guide.
    Matcha,
}

impl AppMode {
    /// The other mode.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::domain::AppMode;
    ///
    /// assert_eq!(AppMode::Coffee.toggled(), AppMode::Matcha);
    /// assert_eq!(AppMode::Coffee.toggled().toggled(), AppMode::Coffee);
    /// ```
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Coffee => Self::Matcha,
            Self::Matcha => Self::Coffee,
        }
    }

    /// Lowercase name, also the prefix of the per-mode storage keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coffee => "coffee",
            Self::Matcha => "matcha",
        }
    }

    /// Catalog this mode browses.
    #[must_use]
    pub const fn catalog(self) -> CatalogMode {
        match self {
            Self::Coffee => CatalogMode::Coffee,
            Self::Matcha => CatalogMode::Matcha,
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or requested mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}', expected coffee or matcha")]
pub struct UnknownModeError(pub String);

impl FromStr for AppMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coffee" => Ok(Self::Coffee),
            "matcha" => Ok(Self::Matcha),
            other => Err(UnknownModeError(other.to_owned())),
        }
    }
}
