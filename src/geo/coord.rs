use std::fmt::{Debug, Display, Formatter};

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::geo::GeoError;

/// Fixed-point degree, scaled by [`PRECISION`].
pub type NanoDegree = i64;
pub type Degree = f64;

/// The scale of a [`NanoDegree`], 1e7 units per degree.
pub const PRECISION: f64 = 1e7;

const MAX_LATITUDE: NanoDegree = 90 * PRECISION as NanoDegree;
const MAX_LONGITUDE: NanoDegree = 180 * PRECISION as NanoDegree;

/// `Coordinate`
/// A single geographic observation in fixed-point precision.
///
/// The coordinate is stored as a latitude, longitude pair of [`NanoDegree`]s,
/// so two coordinates constructed from the same degrees compare equal.
///
/// ```rust
/// use routers_match::geo::Coordinate;
/// let coordinate = Coordinate::from_degree(-33.8688, 151.2093).unwrap();
/// assert!(coordinate.is_valid());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: NanoDegree,
    pub lng: NanoDegree,
}

impl Coordinate {
    /// Constructs a new `Coordinate` from a fixed-point `lat` and `lng`.
    ///
    /// No validation is performed, see [`Coordinate::is_valid`].
    pub const fn new(lat: NanoDegree, lng: NanoDegree) -> Self {
        Coordinate { lat, lng }
    }

    pub fn from_degree(lat: Degree, lng: Degree) -> Result<Self, GeoError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::InvalidLatitude(lat));
        }

        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::InvalidLongitude(lng));
        }

        Ok(Self::from_degree_unchecked(lat, lng))
    }

    pub fn from_degree_unchecked(lat: Degree, lng: Degree) -> Self {
        Coordinate {
            lat: (lat * PRECISION).round() as NanoDegree,
            lng: (lng * PRECISION).round() as NanoDegree,
        }
    }

    pub fn lat(&self) -> Degree {
        self.lat as f64 / PRECISION
    }

    pub fn lng(&self) -> Degree {
        self.lng as f64 / PRECISION
    }

    /// Whether the coordinate lies within valid geographic bounds.
    pub fn is_valid(&self) -> bool {
        (-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.lat)
            && (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&self.lng)
    }

    /// Validates the coordinate, returning the offending component on failure.
    pub fn validate(&self) -> Result<(), GeoError> {
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.lat) {
            return Err(GeoError::InvalidLatitude(self.lat()));
        }

        if !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&self.lng) {
            return Err(GeoError::InvalidLongitude(self.lng()));
        }

        Ok(())
    }

    /// The coordinate as a [`Point`], in `(x: lng, y: lat)` order.
    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.lng(), self.lat())
    }

    /// Great-circle distance, in meters, between two coordinates.
    #[inline]
    pub fn distance(&self, other: &Coordinate) -> f64 {
        Haversine.distance(self.point(), other.point())
    }
}

impl From<Point> for Coordinate {
    fn from(point: Point) -> Self {
        Coordinate::from_degree_unchecked(point.y(), point.x())
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lat(), self.lng())
    }
}

impl Debug for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Coordinate{}", self)
    }
}
