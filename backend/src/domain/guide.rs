//! Transient browsing state of the guide screen and the snapshot it renders.

use serde::{Deserialize, Serialize};

use super::map_view::{
    DEFAULT_ZOOM, MapCommand, MapController, MapSession, MarkerIcon, initial_center, marker_icon,
};
use super::{
    AppMode, BrewMethod, Coordinates, LocationTracker, Place, PlaceFilter, PlaceId, Review,
    UserState, display_brew_methods,
};

/// Viewport width from which the sidebar starts open.
pub const SIDEBAR_BREAKPOINT_PX: u32 = 768;

/// Which pane is in front on narrow screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    /// The map.
    #[default]
    Map,
    /// The shop list.
    Shops,
}

/// Position on screen in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Horizontal offset from the left edge.
    pub x: f64,
    /// Vertical offset from the top edge.
    pub y: f64,
}

/// Size of the client viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Viewport {
    /// Centre of the viewport.
    #[must_use]
    pub fn center(self) -> ScreenPoint {
        ScreenPoint {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }
}

/// Browsing state for one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideView {
    mode: AppMode,
    selected: Option<PlaceId>,
    detail_open: bool,
    active_view: ActiveView,
    bubble: Option<ScreenPoint>,
    sidebar_open: bool,
    query: String,
    brew_methods: Vec<BrewMethod>,
    map: MapController,
    location: LocationTracker,
}

impl GuideView {
    /// Fresh view over `places`, with the sidebar sized for `width`.
    #[must_use]
    pub fn new(mode: AppMode, places: &[Place], width: u32) -> Self {
        Self {
            mode,
            selected: None,
            detail_open: false,
            active_view: ActiveView::Map,
            bubble: None,
            sidebar_open: width >= SIDEBAR_BREAKPOINT_PX,
            query: String::new(),
            brew_methods: Vec::new(),
            map: MapController::new(initial_center(places), DEFAULT_ZOOM),
            location: LocationTracker::default(),
        }
    }

    /// Select a place: the bubble opens at the click or in the middle of the
    /// viewport, the map comes to the front and refitting pauses.
    pub fn select_place(&mut self, id: PlaceId, click: Option<ScreenPoint>, viewport: Viewport) {
        self.selected = Some(id);
        self.detail_open = false;
        self.active_view = ActiveView::Map;
        self.bubble = Some(click.unwrap_or_else(|| viewport.center()));
        self.map.suspend_fit();
    }

    /// Clear the selection and resume refitting.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.detail_open = false;
        self.bubble = None;
        self.map.resume_fit();
    }

    /// Open the detail panel for the selected place.
    pub fn open_detail(&mut self) {
        self.detail_open = self.selected.is_some();
    }

    /// Close the detail panel.
    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }

    /// Add or remove a brew method from the filter.
    pub fn toggle_brew_method(&mut self, method: BrewMethod) {
        if let Some(index) = self.brew_methods.iter().position(|m| *m == method) {
            self.brew_methods.remove(index);
        } else {
            self.brew_methods.push(method);
        }
    }

    /// Replace the search text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Switch dataset; selection is dropped and fitting resumes.
    pub fn switch_mode(&mut self, mode: AppMode) {
        self.mode = mode;
        self.clear_selection();
    }

    /// Bring a pane to the front.
    pub fn show(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    /// Track a viewport resize.
    pub fn resize(&mut self, width: u32) {
        self.sidebar_open = width >= SIDEBAR_BREAKPOINT_PX;
    }

    /// Carry on from map bookkeeping saved by an earlier request.
    pub fn resume_map(&mut self, session: MapSession) {
        self.map = self.map.clone().resume(session);
    }

    /// Map bookkeeping to save once the snapshot is rendered.
    #[must_use]
    pub const fn map_session(&self) -> MapSession {
        self.map.session()
    }

    /// Location tracker, for locate requests and their outcomes.
    pub fn location_mut(&mut self) -> &mut LocationTracker {
        &mut self.location
    }

    /// Active mode.
    #[must_use]
    pub const fn mode(&self) -> AppMode {
        self.mode
    }

    /// Selected place, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&PlaceId> {
        self.selected.as_ref()
    }

    /// Whether the detail panel is open.
    #[must_use]
    pub const fn detail_open(&self) -> bool {
        self.detail_open
    }

    /// Whether the sidebar is open.
    #[must_use]
    pub const fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Render the current state against a dataset and the client's stored
    /// collections. Map commands come out in the order the client should
    /// apply them.
    pub fn snapshot(&mut self, places: &[Place], state: &UserState) -> GuideSnapshot {
        let filter = PlaceFilter::new()
            .with_query(self.query.clone())
            .with_brew_methods(self.brew_methods.iter().copied())
            .with_user_location(self.location.location());
        let matches = filter.apply(self.mode, places);

        let markers: Vec<Marker> = matches
            .iter()
            .filter_map(|m| {
                m.place.coordinates.map(|coordinates| Marker {
                    id: Some(m.place.id.clone()),
                    coordinates,
                    icon: marker_icon(self.mode, &m.place.id),
                })
            })
            .collect();
        let points: Vec<Coordinates> = markers.iter().map(|m| m.coordinates).collect();

        let mut commands = Vec::new();
        commands.extend(self.map.initial_command());
        commands.extend(self.map.fit_to_markers(&points));
        if let Some(location) = self.location.location() {
            commands.extend(self.map.fly_to(location, self.location.fly_key()));
        }

        let results = matches
            .iter()
            .map(|m| GuideResult {
                place: m.place.clone(),
                distance_km: m.distance_km,
                brew_methods: display_brew_methods(m.place.brew_methods()),
                favorite: state.favorites.contains(&m.place.id),
            })
            .collect();

        let selected = self
            .selected
            .as_ref()
            .and_then(|id| places.iter().find(|place| &place.id == id))
            .map(|place| SelectedPlace {
                place: place.clone(),
                reviews: state.reviews.reviews_for(&place.id).to_vec(),
                note: state.notes.get(&place.id).map(str::to_owned),
                favorite: state.favorites.contains(&place.id),
            });

        GuideSnapshot {
            mode: self.mode,
            query: self.query.clone(),
            brew_methods: self.brew_methods.clone(),
            active_view: self.active_view,
            sidebar_open: self.sidebar_open,
            detail_open: self.detail_open && selected.is_some(),
            bubble: self.bubble,
            results,
            markers,
            user_marker: self.location.location().map(|coordinates| Marker {
                id: None,
                coordinates,
                icon: MarkerIcon::UserLocation,
            }),
            favorites_count: state.favorites.len(),
            commands,
            selected,
        }
    }
}

/// One list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideResult {
    /// The place.
    pub place: Place,
    /// Kilometres from the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Canonical brew methods for the card.
    pub brew_methods: Vec<BrewMethod>,
    /// Whether the client marked it as favourite.
    pub favorite: bool,
}

/// A map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Place id; absent for the user marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PlaceId>,
    /// Position.
    pub coordinates: Coordinates,
    /// Artwork category.
    pub icon: MarkerIcon,
}

/// The selected place with everything its bubble and panel show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPlace {
    /// The place.
    pub place: Place,
    /// Reviews, newest first.
    pub reviews: Vec<Review>,
    /// The client's note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Whether it is a favourite.
    pub favorite: bool,
}

/// Everything the guide screen renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideSnapshot {
    /// Active mode.
    pub mode: AppMode,
    /// Search text.
    pub query: String,
    /// Selected brew methods.
    pub brew_methods: Vec<BrewMethod>,
    /// Pane in front.
    pub active_view: ActiveView,
    /// Sidebar state.
    pub sidebar_open: bool,
    /// Detail panel state.
    pub detail_open: bool,
    /// Where the selection bubble opens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bubble: Option<ScreenPoint>,
    /// Filtered places.
    pub results: Vec<GuideResult>,
    /// Place markers for the filtered places.
    pub markers: Vec<Marker>,
    /// The user's marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_marker: Option<Marker>,
    /// Number of favourites in this mode.
    pub favorites_count: usize,
    /// Map commands to apply in order.
    pub commands: Vec<MapCommand>,
    /// Selected place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<SelectedPlace>,
}
