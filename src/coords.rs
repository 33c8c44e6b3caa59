use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// A geographic position as delivered by map mouse events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    /// Longitude in degrees
    pub lng: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl LngLat {
    /// Create a new position from longitude and latitude
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Longitude normalized into the (-180, 180] range
    ///
    /// Maps that render copies of the world report longitudes outside the
    /// canonical range when the user clicks on a repeated copy.
    pub fn wrap(&self) -> LngLat {
        let wrapped = (self.lng + 180.0).rem_euclid(360.0) - 180.0;
        let lng = if wrapped == -180.0 { 180.0 } else { wrapped };
        LngLat::new(lng, self.lat)
    }

    /// Check that both components are finite and latitude is within [-90, 90]
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite() && self.lat.abs() <= 90.0
    }

    /// Great-circle distance to another position in meters
    pub fn distance_to(&self, other: &LngLat) -> f64 {
        Haversine.distance(Point::from(*self), Point::from(*other))
    }
}

impl From<LngLat> for Point<f64> {
    fn from(lng_lat: LngLat) -> Self {
        Point::new(lng_lat.lng, lng_lat.lat)
    }
}

impl From<Point<f64>> for LngLat {
    fn from(point: Point<f64>) -> Self {
        LngLat::new(point.x(), point.y())
    }
}

impl From<(f64, f64)> for LngLat {
    fn from((lng, lat): (f64, f64)) -> Self {
        LngLat::new(lng, lat)
    }
}

/// A position in screen pixels relative to the map container
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
