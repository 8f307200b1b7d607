//! Map view controller.
//!
//! Rendering stays on the client. The controller only decides *what* the map
//! should do and emits [`MapCommand`]s: keep the view inside Israel, fit to
//! the visible markers, and fly to the user once per located position.

use serde::{Deserialize, Serialize};

use super::{AppMode, Coordinates, GeoBounds, ISRAEL_BOUNDS, JERUSALEM, Place, PlaceId};

/// Centre used when the map starts outside the allowed box.
pub const RECENTER_TARGET: Coordinates = Coordinates::new(31.5, 34.75);
/// Zoom used when the map starts outside the allowed box.
pub const RECENTER_ZOOM: f64 = 8.0;
/// Padding around fitted markers, in pixels.
pub const FIT_PADDING_PX: u32 = 50;
/// Maximum zoom when fitting to markers.
pub const FIT_MAX_ZOOM: f64 = 11.0;
/// Zoom when flying to the user.
pub const FLY_TO_ZOOM: f64 = 14.0;
/// Animation length when flying to the user.
pub const FLY_TO_DURATION_SECS: f64 = 1.5;
/// Zoom of a freshly opened map.
pub const DEFAULT_ZOOM: f64 = 8.0;

/// Identifier of the one roastery in the coffee catalog (קנופי קפה, ירושלים).
pub const ROASTERY_PLACE_ID: &str = "--city-yavbk8";

/// Instruction for the client-side map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MapCommand {
    /// Jump to a centre and zoom.
    SetView {
        /// New centre.
        center: Coordinates,
        /// New zoom.
        zoom: f64,
        /// Whether the client should animate the move.
        animate: bool,
    },
    /// Fit the viewport to a box.
    FitBounds {
        /// Box to show.
        bounds: GeoBounds,
        /// Padding in pixels.
        padding: u32,
        /// Upper zoom limit.
        max_zoom: f64,
    },
    /// Animate to a position.
    FlyTo {
        /// Target position.
        center: Coordinates,
        /// Target zoom.
        zoom: f64,
        /// Animation length in seconds.
        duration_secs: f64,
    },
}

/// Marker artwork category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerIcon {
    /// Coffee glass, the default coffee marker.
    Cafe,
    /// Roastery marker.
    Roastery,
    /// Matcha leaf.
    Matcha,
    /// The user's own position.
    UserLocation,
}

impl MarkerIcon {
    /// Asset path served by the client, when the icon is an image.
    #[must_use]
    pub const fn asset_path(self) -> Option<&'static str> {
        match self {
            Self::Cafe | Self::Roastery => Some("/images/Coffee Glass Blue.svg"),
            Self::Matcha => Some("/images/Matcha Leaf Green.svg"),
            Self::UserLocation => None,
        }
    }
}

/// Icon for a place marker.
///
/// # Examples
/// ```
/// use cafe_guide::domain::{AppMode, MarkerIcon, PlaceId, marker_icon};
///
/// let roastery = PlaceId::new("--city-yavbk8").expect("valid id");
/// assert_eq!(marker_icon(AppMode::Coffee, &roastery), MarkerIcon::Roastery);
/// assert_eq!(marker_icon(AppMode::Matcha, &roastery), MarkerIcon::Matcha);
/// ```
#[must_use]
pub fn marker_icon(mode: AppMode, id: &PlaceId) -> MarkerIcon {
    match mode {
        AppMode::Matcha => MarkerIcon::Matcha,
        AppMode::Coffee if id.as_str() == ROASTERY_PLACE_ID => MarkerIcon::Roastery,
        AppMode::Coffee => MarkerIcon::Cafe,
    }
}

/// Initial centre for a set of places: mean of their coordinates, Jerusalem
/// when none have any.
#[must_use]
pub fn initial_center(places: &[Place]) -> Coordinates {
    let points: Vec<Coordinates> = places.iter().filter_map(|p| p.coordinates).collect();
    Coordinates::mean(&points).unwrap_or(JERUSALEM)
}

/// Controller bookkeeping that outlives a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSession {
    /// A correction was sent and its own move-end has not arrived yet.
    #[serde(default)]
    pub programmatic_move: bool,
    /// Key of the last position flown to.
    #[serde(default)]
    pub last_fly_key: Option<u64>,
}

/// Keeps the map inside the allowed box and decides when to refit or fly.
#[derive(Debug, Clone, PartialEq)]
pub struct MapController {
    center: Coordinates,
    zoom: f64,
    bounds: GeoBounds,
    programmatic_move: bool,
    fit_enabled: bool,
    last_fly_key: Option<u64>,
}

impl MapController {
    /// Controller for a map opened at `center` and `zoom`.
    #[must_use]
    pub const fn new(center: Coordinates, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            bounds: ISRAEL_BOUNDS,
            programmatic_move: false,
            fit_enabled: true,
            last_fly_key: None,
        }
    }

    /// Continue from bookkeeping saved by an earlier request.
    #[must_use]
    pub const fn resume(mut self, session: MapSession) -> Self {
        self.programmatic_move = session.programmatic_move;
        self.last_fly_key = session.last_fly_key;
        self
    }

    /// Bookkeeping to persist for the next request.
    #[must_use]
    pub const fn session(&self) -> MapSession {
        MapSession {
            programmatic_move: self.programmatic_move,
            last_fly_key: self.last_fly_key,
        }
    }

    /// Current centre as last reported or commanded.
    #[must_use]
    pub const fn center(&self) -> Coordinates {
        self.center
    }

    /// Whether fitting to markers is currently enabled.
    #[must_use]
    pub const fn fit_enabled(&self) -> bool {
        self.fit_enabled
    }

    /// Command to issue once the map is ready.
    pub fn initial_command(&mut self) -> Option<MapCommand> {
        if self.bounds.contains(self.center) {
            return None;
        }
        self.center = RECENTER_TARGET;
        self.zoom = RECENTER_ZOOM;
        Some(MapCommand::SetView {
            center: RECENTER_TARGET,
            zoom: RECENTER_ZOOM,
            animate: true,
        })
    }

    /// Handle the client's "move ended" event.
    ///
    /// The event that follows a correction is swallowed so a correction
    /// never triggers another one.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::domain::{Coordinates, MapController};
    ///
    /// let mut map = MapController::new(Coordinates::new(32.0, 34.8), 8.0);
    /// let outside = Coordinates::new(35.5, 34.8);
    /// assert!(map.on_move_end(outside, 9.0).is_some());
    /// // The correction's own move-end is ignored.
    /// assert!(map.on_move_end(outside, 9.0).is_none());
    /// ```
    pub fn on_move_end(&mut self, center: Coordinates, zoom: f64) -> Option<MapCommand> {
        self.center = center;
        self.zoom = zoom;
        if self.programmatic_move {
            self.programmatic_move = false;
            return None;
        }
        if self.bounds.contains(center) {
            return None;
        }
        let corrected = self.bounds.center();
        self.programmatic_move = true;
        self.center = corrected;
        Some(MapCommand::SetView {
            center: corrected,
            zoom,
            animate: false,
        })
    }

    /// Fit the view to the markers, clipped to the allowed box.
    pub fn fit_to_markers(&self, points: &[Coordinates]) -> Option<MapCommand> {
        if !self.fit_enabled {
            return None;
        }
        let bounds = GeoBounds::enclosing(points)?.intersect(&self.bounds)?;
        Some(MapCommand::FitBounds {
            bounds,
            padding: FIT_PADDING_PX,
            max_zoom: FIT_MAX_ZOOM,
        })
    }

    /// Stop refitting, e.g. while a place is selected.
    pub fn suspend_fit(&mut self) {
        self.fit_enabled = false;
    }

    /// Resume refitting.
    pub fn resume_fit(&mut self) {
        self.fit_enabled = true;
    }

    /// Fly to a located user once per distinct `key`.
    pub fn fly_to(&mut self, location: Coordinates, key: u64) -> Option<MapCommand> {
        if self.last_fly_key == Some(key) {
            return None;
        }
        self.last_fly_key = Some(key);
        self.center = location;
        self.zoom = FLY_TO_ZOOM;
        Some(MapCommand::FlyTo {
            center: location,
            zoom: FLY_TO_ZOOM,
            duration_secs: FLY_TO_DURATION_SECS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const TEL_AVIV: Coordinates = Coordinates::new(32.0809, 34.7806);
    const ATHENS: Coordinates = Coordinates::new(37.98, 23.72);

    #[fixture]
    fn map() -> MapController {
        MapController::new(TEL_AVIV, DEFAULT_ZOOM)
    }

    #[rstest]
    fn initial_centre_inside_box_needs_no_command(mut map: MapController) {
        assert_eq!(map.initial_command(), None);
    }

    #[rstest]
    fn initial_centre_outside_box_recentres() {
        let mut map = MapController::new(ATHENS, 6.0);
        assert_eq!(
            map.initial_command(),
            Some(MapCommand::SetView {
                center: RECENTER_TARGET,
                zoom: RECENTER_ZOOM,
                animate: true,
            })
        );
        assert_eq!(map.center(), RECENTER_TARGET);
    }

    #[rstest]
    fn excursion_is_corrected_exactly_once(mut map: MapController) {
        let first = map.on_move_end(ATHENS, 7.0);
        assert!(matches!(
            first,
            Some(MapCommand::SetView { animate: false, .. })
        ));
        let commands: Vec<_> = (0..3)
            .filter_map(|_| map.on_move_end(map.center(), 7.0))
            .collect();
        assert!(commands.is_empty());
    }

    #[rstest]
    fn a_second_excursion_is_corrected_again(mut map: MapController) {
        assert!(map.on_move_end(ATHENS, 7.0).is_some());
        assert!(map.on_move_end(ISRAEL_BOUNDS.center(), 7.0).is_none());
        assert!(map.on_move_end(ATHENS, 7.0).is_some());
    }

    #[rstest]
    fn fit_clips_to_israel(map: MapController) {
        let command = map.fit_to_markers(&[TEL_AVIV, Coordinates::new(29.55, 34.95)]);
        assert_eq!(
            command,
            Some(MapCommand::FitBounds {
                bounds: GeoBounds::new(
                    Coordinates::new(30.0, 34.7806),
                    Coordinates::new(32.0809, 34.95),
                ),
                padding: FIT_PADDING_PX,
                max_zoom: FIT_MAX_ZOOM,
            })
        );
    }

    #[rstest]
    fn fit_skips_empty_or_disjoint_sets(mut map: MapController) {
        assert_eq!(map.fit_to_markers(&[]), None);
        assert_eq!(map.fit_to_markers(&[ATHENS]), None);
        map.suspend_fit();
        assert_eq!(map.fit_to_markers(&[TEL_AVIV]), None);
        map.resume_fit();
        assert!(map.fit_to_markers(&[TEL_AVIV]).is_some());
    }

    #[rstest]
    fn fly_to_fires_once_per_key(mut map: MapController) {
        assert!(map.fly_to(TEL_AVIV, 1).is_some());
        assert!(map.fly_to(TEL_AVIV, 1).is_none());
        assert!(map.fly_to(TEL_AVIV, 2).is_some());
    }

    #[rstest]
    fn resumed_controller_keeps_the_pending_correction(mut map: MapController) {
        assert!(map.on_move_end(ATHENS, 7.0).is_some());
        assert!(map.fly_to(TEL_AVIV, 4).is_some());
        let saved = map.session();
        assert_eq!(
            saved,
            MapSession {
                programmatic_move: true,
                last_fly_key: Some(4),
            }
        );

        let mut next = MapController::new(ATHENS, 7.0).resume(saved);
        assert_eq!(next.on_move_end(ATHENS, 7.0), None);
        assert_eq!(next.fly_to(TEL_AVIV, 4), None);
        assert_eq!(
            next.session(),
            MapSession {
                programmatic_move: false,
                last_fly_key: Some(4),
            }
        );
    }

    #[rstest]
    fn empty_dataset_centres_on_jerusalem() {
        assert_eq!(initial_center(&[]), JERUSALEM);
    }
}
