//! Distances between the shop and its orders.
//!
//! Provides geographic positions with an inflated straight-line road
//! estimate, and a dense distance matrix indexed shop-first.

mod geo;
mod matrix;

pub use geo::GeoPoint;
pub use matrix::DistanceMatrix;
