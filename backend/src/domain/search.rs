//! Free-text, brew-method and distance filtering over a dataset.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{AppMode, Coordinates, Place};

/// The three brew methods the guide filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrewMethod {
    /// אספרסו
    Espresso,
    /// פילטר, also listed as `V60`.
    Filter,
    /// קולד ברו, also listed as `חליטה קרה`.
    ColdBrew,
}

/// Raised when a brew method label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown brew method: {0}")]
pub struct UnknownBrewMethodError(pub String);

impl BrewMethod {
    /// All methods in display order.
    pub const ALL: [Self; 3] = [Self::Espresso, Self::Filter, Self::ColdBrew];

    /// Hebrew label shown on filter chips.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Espresso => "אספרסו",
            Self::Filter => "פילטר",
            Self::ColdBrew => "קולד ברו",
        }
    }

    /// English slug used in query strings.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Espresso => "espresso",
            Self::Filter => "filter",
            Self::ColdBrew => "cold-brew",
        }
    }

    /// Fold a raw catalog label onto a canonical method, if it is one.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::domain::BrewMethod;
    ///
    /// assert_eq!(BrewMethod::fold("V60"), Some(BrewMethod::Filter));
    /// assert_eq!(BrewMethod::fold("חליטה קרה"), Some(BrewMethod::ColdBrew));
    /// assert_eq!(BrewMethod::fold("כימקס"), None);
    /// ```
    #[must_use]
    pub fn fold(raw: &str) -> Option<Self> {
        match raw.trim() {
            "אספרסו" => Some(Self::Espresso),
            "פילטר" | "V60" => Some(Self::Filter),
            "קולד ברו" | "חליטה קרה" => Some(Self::ColdBrew),
            _ => None,
        }
    }

    /// Whether a place offering `raw` satisfies this method.
    #[must_use]
    pub fn matches(self, raw: &str) -> bool {
        Self::fold(raw) == Some(self)
    }
}

impl fmt::Display for BrewMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BrewMethod {
    type Err = UnknownBrewMethodError;

    /// Accepts Hebrew labels, their synonyms, and the English slugs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::fold(trimmed)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|method| method.slug().eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| UnknownBrewMethodError(s.to_owned()))
    }
}

/// Brew methods to show on a place card: canonical only, folded, deduped,
/// in display order.
///
/// # Examples
/// ```
/// use cafe_guide::domain::{BrewMethod, display_brew_methods};
///
/// let raw = ["V60", "כימקס", "אספרסו", "פילטר"].map(String::from);
/// assert_eq!(
///     display_brew_methods(&raw),
///     vec![BrewMethod::Espresso, BrewMethod::Filter]
/// );
/// ```
#[must_use]
pub fn display_brew_methods(raw: &[String]) -> Vec<BrewMethod> {
    let mut methods: Vec<BrewMethod> = raw.iter().filter_map(|m| BrewMethod::fold(m)).collect();
    methods.sort_unstable();
    methods.dedup();
    methods
}

/// A place that passed the filter, with its distance from the user.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceMatch<'a> {
    /// Matching place.
    pub place: &'a Place,
    /// Kilometres from the user, when both positions are known.
    pub distance_km: Option<f64>,
}

/// Query over a dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceFilter {
    query: String,
    brew_methods: Vec<BrewMethod>,
    user_location: Option<Coordinates>,
}

impl PlaceFilter {
    /// Filter matching everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring on name or city.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Brew methods; any one of them suffices.
    #[must_use]
    pub fn with_brew_methods(mut self, methods: impl IntoIterator<Item = BrewMethod>) -> Self {
        self.brew_methods = methods.into_iter().collect();
        self
    }

    /// Sort by distance from this position.
    #[must_use]
    pub fn with_user_location(mut self, location: Option<Coordinates>) -> Self {
        self.user_location = location;
        self
    }

    /// Run the filter. Brew methods only apply in coffee mode.
    ///
    /// With a user location the result is stably sorted by ascending
    /// distance and places without coordinates come last.
    #[must_use]
    pub fn apply<'a>(&self, mode: AppMode, places: &'a [Place]) -> Vec<PlaceMatch<'a>> {
        let needle = self.query.trim().to_lowercase();
        let mut matches: Vec<PlaceMatch<'a>> = places
            .iter()
            .filter(|place| matches_query(place, &needle))
            .filter(|place| mode == AppMode::Matcha || self.matches_brew(place))
            .map(|place| PlaceMatch {
                place,
                distance_km: self
                    .user_location
                    .zip(place.coordinates)
                    .map(|(user, at)| user.distance_km(at)),
            })
            .collect();
        if self.user_location.is_some() {
            matches.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
        }
        matches
    }

    fn matches_brew(&self, place: &Place) -> bool {
        self.brew_methods.is_empty()
            || self.brew_methods.iter().any(|wanted| {
                place.brew_methods().iter().any(|offered| wanted.matches(offered))
            })
    }
}

fn matches_query(place: &Place, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    place.name.to_lowercase().contains(needle)
        || place
            .city
            .as_deref()
            .is_some_and(|city| city.to_lowercase().contains(needle))
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
