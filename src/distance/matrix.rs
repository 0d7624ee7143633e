//! Dense distance matrix.

use super::GeoPoint;

/// A dense n×n distance matrix (kilometres) stored in row-major order.
///
/// Location 0 is the shop; order `i` of the day's slice is location `i + 1`.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).unwrap();
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    km: Vec<f64>,
    locations: usize,
}

impl DistanceMatrix {
    /// All-zero matrix over `locations` locations.
    pub fn new(locations: usize) -> Self {
        Self {
            km: vec![0.0; locations * locations],
            locations,
        }
    }

    /// Road distances between geographic positions: haversine scaled by
    /// `inflation`, mirrored across the diagonal.
    pub fn from_points(points: &[GeoPoint], inflation: f64) -> Self {
        let mut dm = Self::new(points.len());
        for (i, a) in points.iter().enumerate() {
            for (j, b) in points.iter().enumerate().skip(i + 1) {
                let km = a.road_km(b, inflation);
                dm.set(i, j, km);
                dm.set(j, i, km);
            }
        }
        dm
    }

    /// Wraps a row-major grid, `None` unless it holds `locations²` entries.
    pub fn from_data(locations: usize, km: Vec<f64>) -> Option<Self> {
        (km.len() == locations * locations).then_some(Self { km, locations })
    }

    fn index(&self, from: usize, to: usize) -> usize {
        from * self.locations + to
    }

    /// Kilometres from location `from` to location `to`.
    ///
    /// Panics on an out-of-range location.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.km[self.index(from, to)]
    }

    /// Overrides one directed distance.
    pub fn set(&mut self, from: usize, to: usize, km: f64) {
        let idx = self.index(from, to);
        self.km[idx] = km;
    }

    /// Number of locations, the shop included.
    pub fn size(&self) -> usize {
        self.locations
    }

    /// Matrix location of the order at slice position `order`.
    pub fn order_location(order: usize) -> usize {
        order + 1
    }

    /// Legs of the closed tour shop → stops… → shop, where `stops` are
    /// order slice positions. Returns `stops.len() + 1` entries.
    pub fn tour_legs(&self, stops: &[usize]) -> Vec<f64> {
        let mut legs = Vec::with_capacity(stops.len() + 1);
        let mut prev = 0;
        for &stop in stops {
            let loc = Self::order_location(stop);
            legs.push(self.get(prev, loc));
            prev = loc;
        }
        legs.push(self.get(prev, 0));
        legs
    }

    /// Returns the nearest candidate order to order `from`.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_order(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let from = Self::order_location(from);
        candidates.iter().copied().min_by(|&a, &b| {
            self.get(from, Self::order_location(a))
                .total_cmp(&self.get(from, Self::order_location(b)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DistanceMatrix {
        // shop, A, B
        DistanceMatrix::from_data(3, vec![0.0, 5.0, 8.0, 5.0, 0.0, 4.0, 8.0, 4.0, 0.0])
            .expect("valid")
    }

    #[test]
    fn test_from_points() {
        let points = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01)];
        let dm = DistanceMatrix::from_points(&points, 1.3);
        assert_eq!(dm.size(), 2);
        assert!(dm.get(0, 1) > 0.0);
        assert!((dm.get(0, 1) - dm.get(1, 0)).abs() < 1e-12);
        assert_eq!(dm.get(0, 0), 0.0);
    }

    #[test]
    fn test_from_data_rejects_ragged_grid() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
        assert!(DistanceMatrix::from_data(0, Vec::new()).is_some());
    }

    #[test]
    fn test_set_is_directed() {
        let mut dm = sample();
        dm.set(1, 2, 6.5);
        assert_eq!(dm.get(1, 2), 6.5);
        assert_eq!(dm.get(2, 1), 4.0);
    }

    #[test]
    fn test_tour_legs() {
        let dm = sample();
        // shop -> A -> B -> shop
        assert_eq!(dm.tour_legs(&[0, 1]), vec![5.0, 4.0, 8.0]);
        assert_eq!(dm.tour_legs(&[1]), vec![8.0, 8.0]);
    }

    #[test]
    fn test_nearest_order() {
        let dm = DistanceMatrix::from_data(
            4,
            vec![
                0.0, 1.0, 1.0, 1.0, //
                1.0, 0.0, 7.0, 2.0, //
                1.0, 7.0, 0.0, 3.0, //
                1.0, 2.0, 3.0, 0.0,
            ],
        )
        .expect("valid");
        assert_eq!(dm.nearest_order(0, &[1, 2]), Some(2));
        assert_eq!(dm.nearest_order(0, &[]), None);
    }
}
