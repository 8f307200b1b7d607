//! Geographic primitives: positions, great-circle distance, and boxes.

use serde::{Deserialize, Serialize};

/// Mean earth radius used for haversine distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Fallback map centre when no marker is available (Jerusalem).
pub const JERUSALEM: Coordinates = Coordinates::new(31.7683, 35.2137);

/// Box the map view is kept inside.
pub const ISRAEL_BOUNDS: GeoBounds = GeoBounds::new(
    Coordinates::new(30.0, 34.5),
    Coordinates::new(33.2, 35.6),
);

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude, positive north.
    pub latitude: f64,
    /// Longitude, positive east.
    pub longitude: f64,
}

impl Coordinates {
    /// Build a position from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometres.
    ///
    /// # Examples
    /// ```
    /// use cafe_guide::domain::Coordinates;
    ///
    /// let tel_aviv = Coordinates::new(32.0809, 34.7806);
    /// let jerusalem = Coordinates::new(31.7683, 35.2137);
    /// let km = tel_aviv.distance_km(jerusalem);
    /// assert!((km - 53.9).abs() < 1.0);
    /// ```
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lng = (other.longitude - self.longitude).to_radians();
        let h = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
    }

    /// Arithmetic mean of a set of positions, `None` when empty.
    #[must_use]
    pub fn mean(points: &[Self]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let count = points.len() as f64;
        let (lat_sum, lng_sum) = points.iter().fold((0.0, 0.0), |(lat, lng), point| {
            (lat + point.latitude, lng + point.longitude)
        });
        Some(Self::new(lat_sum / count, lng_sum / count))
    }
}

impl From<venue_catalog::Coordinates> for Coordinates {
    fn from(value: venue_catalog::Coordinates) -> Self {
        Self::new(value.lat, value.lng)
    }
}

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBounds {
    /// South-west corner.
    pub south_west: Coordinates,
    /// North-east corner.
    pub north_east: Coordinates,
}

impl GeoBounds {
    /// Build a box from its corners.
    #[must_use]
    pub const fn new(south_west: Coordinates, north_east: Coordinates) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Smallest box containing every point, `None` when empty.
    #[must_use]
    pub fn enclosing(points: &[Coordinates]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |bounds, point| {
            Self::new(
                Coordinates::new(
                    bounds.south_west.latitude.min(point.latitude),
                    bounds.south_west.longitude.min(point.longitude),
                ),
                Coordinates::new(
                    bounds.north_east.latitude.max(point.latitude),
                    bounds.north_east.longitude.max(point.longitude),
                ),
            )
        }))
    }

    /// Whether `point` lies inside or on the edge of the box.
    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }

    /// Centre of the box.
    #[must_use]
    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }

    /// Overlap of two boxes, `None` when they do not overlap.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let south = self.south_west.latitude.max(other.south_west.latitude);
        let west = self.south_west.longitude.max(other.south_west.longitude);
        let north = self.north_east.latitude.min(other.north_east.latitude);
        let east = self.north_east.longitude.min(other.north_east.longitude);
        (south <= north && west <= east).then(|| {
            Self::new(Coordinates::new(south, west), Coordinates::new(north, east))
        })
    }
}
