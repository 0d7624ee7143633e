//! Reproducible synthetic shop-day instances.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::distance::GeoPoint;
use crate::models::{CategoryId, Order, Shop};

const KM_PER_DEGREE: f64 = 111.32;

/// Shape of a generated shop-day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Id of the generated shop, also stamped on every order.
    pub shop_id: u64,
    /// Where the shop is.
    pub shop_location: GeoPoint,
    /// Orders to generate.
    pub orders: usize,
    /// Delivery addresses lie within this distance of the shop (km).
    pub radius_km: f64,
    /// Lightest parcel (kg).
    pub min_weight: f64,
    /// Heaviest parcel (kg).
    pub max_weight: f64,
    /// First and last minute of the day orders are placed.
    pub opening: (f64, f64),
    /// Bounds of the minutes between placing and the parcel being ready.
    pub assembly: (f64, f64),
    /// Categories enabled at the shop and on every order.
    pub categories: Vec<CategoryId>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            shop_id: 1,
            shop_location: GeoPoint::new(55.7558, 37.6173),
            orders: 40,
            radius_km: 4.0,
            min_weight: 0.2,
            max_weight: 8.0,
            opening: (540.0, 1260.0),
            assembly: (10.0, 30.0),
            categories: vec![0],
        }
    }
}

/// A generated shop with its orders.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// The shop all orders ship from.
    pub shop: Shop,
    /// Orders sorted by ready time.
    pub orders: Vec<Order>,
}

/// Generates an instance from `seed`; equal seeds give equal instances.
///
/// Orders are numbered from 1 in ready-time order and are due
/// `engine.delivery_limit` minutes after placing.
///
/// # Examples
///
/// ```
/// use u_dispatch::config::EngineConfig;
/// use u_dispatch::generator::{generate, GeneratorConfig};
///
/// let config = GeneratorConfig { orders: 5, ..Default::default() };
/// let engine = EngineConfig::default();
/// let a = generate(&config, &engine, 42);
/// assert_eq!(a.orders.len(), 5);
/// assert_eq!(a, generate(&config, &engine, 42));
/// ```
pub fn generate(config: &GeneratorConfig, engine: &EngineConfig, seed: u64) -> Instance {
    let mut rng = StdRng::seed_from_u64(seed);
    let shop = Shop::new(
        config.shop_id,
        config.shop_location,
        config.categories.clone(),
    );

    let mut drafts: Vec<(f64, f64, GeoPoint, f64)> = (0..config.orders)
        .map(|_| {
            let placed = uniform(&mut rng, config.opening).round();
            let ready = placed + uniform(&mut rng, config.assembly).round();
            let location = scatter(&mut rng, config.shop_location, config.radius_km);
            let weight = uniform(&mut rng, (config.min_weight, config.max_weight));
            (ready, placed, location, (weight * 10.0).round() / 10.0)
        })
        .collect();
    drafts.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let orders = drafts
        .into_iter()
        .zip(1u64..)
        .map(|((ready, placed, location, weight), id)| {
            Order::new(
                id,
                config.shop_id,
                location,
                weight,
                ready,
                placed,
                placed + engine.delivery_limit,
            )
            .with_categories(config.categories.clone())
        })
        .collect();

    Instance { shop, orders }
}

fn uniform<R: Rng>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..hi)
}

/// A uniformly distributed point within `radius_km` of `center`.
fn scatter<R: Rng>(rng: &mut R, center: GeoPoint, radius_km: f64) -> GeoPoint {
    let angle = rng.random_range(0.0..TAU);
    let distance = radius_km * rng.random_range(0.0..1.0f64).sqrt();
    let dlat = distance * angle.sin() / KM_PER_DEGREE;
    let dlng = distance * angle.cos() / (KM_PER_DEGREE * center.lat.to_radians().cos());
    GeoPoint::new(center.lat + dlat, center.lng + dlng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducible() {
        let config = GeneratorConfig::default();
        let engine = EngineConfig::default();
        assert_eq!(generate(&config, &engine, 7), generate(&config, &engine, 7));
        assert_ne!(
            generate(&config, &engine, 7).orders,
            generate(&config, &engine, 8).orders
        );
    }

    #[test]
    fn test_bounds() {
        let config = GeneratorConfig {
            orders: 200,
            categories: vec![0, 3],
            ..Default::default()
        };
        let instance = generate(&config, &EngineConfig::default(), 1);
        assert_eq!(instance.shop.categories, vec![0, 3]);
        for (i, order) in instance.orders.iter().enumerate() {
            assert_eq!(order.id(), i as u64 + 1);
            assert!(order.weight() >= 0.2 && order.weight() <= 8.0);
            assert!(order.placed_time() >= 540.0 && order.placed_time() <= 1260.0);
            let assembly = order.ready_time() - order.placed_time();
            assert!((10.0..=30.0).contains(&assembly));
            assert_eq!(order.deadline(), order.placed_time() + 90.0);
            let km = instance.shop.location.haversine_km(&order.location());
            assert!(km <= 4.0 + 1e-6, "order {} is {km} km away", order.id());
            assert!(order.allows(3));
        }
        let ready: Vec<f64> = instance.orders.iter().map(|o| o.ready_time()).collect();
        assert!(ready.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_deadline_follows_engine_limit() {
        let config = GeneratorConfig {
            orders: 10,
            ..Default::default()
        };
        let engine = EngineConfig {
            delivery_limit: 30.0,
            ..Default::default()
        };
        let instance = generate(&config, &engine, 3);
        for order in &instance.orders {
            assert_eq!(order.deadline(), order.placed_time() + 30.0);
        }
    }
}
