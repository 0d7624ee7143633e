//! Geographic positions and straight-line road distance estimates.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a new position.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle (haversine) distance in kilometres.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_dispatch::distance::GeoPoint;
    ///
    /// let a = GeoPoint::new(55.7558, 37.6173);
    /// let b = GeoPoint::new(55.7558, 37.6173);
    /// assert_eq!(a.haversine_km(&b), 0.0);
    /// ```
    pub fn haversine_km(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }

    /// Estimated road distance: straight line scaled by `inflation`.
    pub fn road_km(&self, other: &GeoPoint, inflation: f64) -> f64 {
        self.haversine_km(other) * inflation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_one_degree_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        // One degree of arc on a 6371 km sphere
        assert!((a.haversine_km(&b) - 111.195).abs() < 1e-2);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = GeoPoint::new(55.75, 37.61);
        let b = GeoPoint::new(55.80, 37.70);
        assert!((a.haversine_km(&b) - b.haversine_km(&a)).abs() < 1e-10);
    }

    #[test]
    fn test_road_km_inflated() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let straight = a.haversine_km(&b);
        assert!((a.road_km(&b, 1.3) - straight * 1.3).abs() < 1e-10);
    }
}
