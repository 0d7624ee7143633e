//! Public entry points: solving a shop-day and one-off feasibility probes.

use tracing::info;

use crate::config::EngineConfig;
use crate::day::{group_by_day, OrderDay, OrderRecord};
use crate::distance::DistanceMatrix;
use crate::error::{DispatchError, Result};
use crate::evaluation::feasible_window;
use crate::models::{
    DayPlan, Order, Resource, ResourceCategory, ResourcePool, Shop, TimeWindow, Violation,
};
use crate::scheduler::DayScheduler;
use crate::search::PermutationCache;

/// One stop of a feasibility probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeStop {
    /// Distance from the previous stop, or from the shop for the first (km).
    pub leg_km: f64,
    /// Latest allowed hand-in instant.
    pub deadline: f64,
}

/// Outcome of a successful feasibility probe.
#[derive(Debug, Clone, PartialEq)]
pub struct Feasibility {
    /// Price of the trip under the category's pricing.
    pub cost: f64,
    /// Billed distance (km).
    pub distance: f64,
    /// Minutes from dispatch to the last hand-in.
    pub delivery_time: f64,
    /// Minutes the resource is occupied.
    pub execution_time: f64,
    /// Minutes from dispatch to each hand-in.
    pub arrivals: Vec<f64>,
    /// Instants at which the sequence may be dispatched.
    pub window: TimeWindow,
}

/// The assignment and routing engine.
///
/// Holds the configuration and the permutation cache shared by every solve.
/// The cache fills lazily and is safe to share between threads, so one
/// engine may solve many shop-days in parallel.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_dispatch::config::EngineConfig;
/// use u_dispatch::distance::GeoPoint;
/// use u_dispatch::engine::Engine;
/// use u_dispatch::models::{HourlyCategory, Order, Resource, ResourcePool, Shop, TimeWindow};
///
/// let engine = Engine::new(EngineConfig::default()).unwrap();
/// let shop = Shop::new(1, GeoPoint::new(55.750, 37.600), vec![0]);
/// let pool = ResourcePool::new()
///     .with_category(Arc::new(HourlyCategory::bicycle(0)))
///     .with_template(Resource::new(1, 0, TimeWindow::new(540.0, 1080.0)));
/// let mut orders = vec![
///     Order::new(1, 1, GeoPoint::new(55.755, 37.605), 2.0, 600.0, 590.0, 680.0)
///         .with_categories(vec![0]),
///     Order::new(2, 1, GeoPoint::new(55.757, 37.610), 1.0, 605.0, 600.0, 690.0)
///         .with_categories(vec![0]),
/// ];
///
/// let plan = engine.solve_day(&shop, &mut orders, &pool).unwrap();
/// assert_eq!(plan.num_served(), 2);
/// assert!(orders.iter().all(|o| o.is_completed()));
/// ```
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    cache: PermutationCache,
}

impl Engine {
    /// Creates an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cache: PermutationCache::new(),
        })
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared permutation tables.
    pub fn cache(&self) -> &PermutationCache {
        &self.cache
    }

    /// Groups order records into days, each order due `delivery_limit`
    /// minutes after it was placed.
    pub fn order_days(&self, records: &[OrderRecord]) -> Vec<OrderDay> {
        group_by_day(records, &self.config)
    }

    /// Solves one shop-day with road distances estimated from coordinates.
    ///
    /// Delivered orders are marked completed; orders already completed are
    /// left alone, so solving a finished day yields an empty plan.
    pub fn solve_day(
        &self,
        shop: &Shop,
        orders: &mut [Order],
        pool: &ResourcePool,
    ) -> Result<DayPlan> {
        validate(shop, orders, pool)?;
        let mut points = Vec::with_capacity(orders.len() + 1);
        points.push(shop.location);
        points.extend(orders.iter().map(Order::location));
        let distances = DistanceMatrix::from_points(&points, self.config.distance_inflation);
        self.solve(shop, orders, pool, &distances)
    }

    /// Solves one shop-day with caller-supplied distances. Location 0 is the
    /// shop and order `i` is location `i + 1`.
    pub fn solve_day_with_matrix(
        &self,
        shop: &Shop,
        orders: &mut [Order],
        pool: &ResourcePool,
        distances: &DistanceMatrix,
    ) -> Result<DayPlan> {
        validate(shop, orders, pool)?;
        if distances.size() != orders.len() + 1 {
            return Err(DispatchError::InvalidConfig(format!(
                "distance matrix has {} locations, expected {}",
                distances.size(),
                orders.len() + 1
            )));
        }
        self.solve(shop, orders, pool, distances)
    }

    fn solve(
        &self,
        shop: &Shop,
        orders: &mut [Order],
        pool: &ResourcePool,
        distances: &DistanceMatrix,
    ) -> Result<DayPlan> {
        let open = orders.iter().filter(|o| !o.is_completed()).count();
        info!(shop = shop.id, orders = orders.len(), open, "solving shop-day");

        let mut scheduler = DayScheduler::new(&self.config, &self.cache, shop, pool, distances);
        let plan = scheduler.run(orders);

        info!(
            shop = shop.id,
            routes = plan.num_routes(),
            served = plan.num_served(),
            undeliverable = plan.num_undeliverable(),
            cost = plan.total_cost(),
            "shop-day solved"
        );
        Ok(plan)
    }

    /// Checks whether `resource` can serve the stop sequence when the
    /// parcels are ready at `ready_time`.
    ///
    /// `return_km` is the leg from the last stop back to the shop. On
    /// success the window tells the instants the sequence may leave.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_dispatch::config::EngineConfig;
    /// use u_dispatch::engine::{Engine, ProbeStop};
    /// use u_dispatch::models::{FlatFeeCategory, RejectReason, Resource};
    ///
    /// let engine = Engine::new(EngineConfig::default()).unwrap();
    /// let taxi = FlatFeeCategory::taxi(3);
    /// let account = Resource::new(9, 3, None);
    /// let stops = [ProbeStop { leg_km: 4.0, deadline: 660.0 }];
    ///
    /// let ok = engine.check_feasibility(&taxi, &account, 600.0, &stops, 4.0, 2.0).unwrap();
    /// assert_eq!(ok.window.start(), 600.0);
    ///
    /// let late = [ProbeStop { leg_km: 4.0, deadline: 620.0 }];
    /// let err = engine.check_feasibility(&taxi, &account, 600.0, &late, 4.0, 2.0).unwrap_err();
    /// assert_eq!(err.reason(), RejectReason::MissedAssemblyDeadline);
    /// ```
    pub fn check_feasibility(
        &self,
        category: &dyn ResourceCategory,
        resource: &Resource,
        ready_time: f64,
        stops: &[ProbeStop],
        return_km: f64,
        weight: f64,
    ) -> std::result::Result<Feasibility, Violation> {
        let mut legs: Vec<f64> = stops.iter().map(|s| s.leg_km).collect();
        legs.push(return_km);
        let trip = category.multi_stop(&legs, weight)?;
        let earliest = ready_time.max(self.config.clock());
        let window = feasible_window(resource, &trip, earliest, stops.iter().map(|s| s.deadline))?;
        Ok(Feasibility {
            cost: trip.cost,
            distance: trip.distance,
            delivery_time: trip.delivery_time,
            execution_time: trip.execution_time,
            arrivals: trip.arrivals,
            window,
        })
    }
}

fn validate(shop: &Shop, orders: &[Order], pool: &ResourcePool) -> Result<()> {
    if shop.categories.is_empty() {
        return Err(DispatchError::InvalidShop(shop.id));
    }
    if orders.is_empty() {
        return Err(DispatchError::NoOrders(shop.id));
    }
    if let Some(foreign) = orders.iter().find(|o| o.shop_id() != shop.id) {
        return Err(DispatchError::ForeignOrder {
            order: foreign.id(),
            expected: shop.id,
            actual: foreign.shop_id(),
        });
    }
    if pool.is_empty() {
        return Err(DispatchError::EmptyPool);
    }
    Ok(())
}
