//! Route and stop types.

use serde::{Deserialize, Serialize};

use super::{CategoryId, Order, TimeWindow};

/// A single stop within a route.
///
/// `order` is the position of the order in the day's order slice; the
/// route never owns or copies the order itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Order slice position.
    pub order: usize,
    /// Distance travelled from the shop up to this stop (km).
    pub cumulative_distance: f64,
    /// Minutes from dispatch until the parcel is handed in.
    pub cumulative_time: f64,
}

/// An ordered sequence of stops assigned to one resource for one dispatch.
///
/// A route starts at the shop; stops are not repeated.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Route, Stop, TimeWindow};
///
/// let window = TimeWindow::new(600.0, 630.0).unwrap();
/// let route = Route::new(0, vec![Stop { order: 3, cumulative_distance: 1.2, cumulative_time: 18.0 }], window);
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.dispatch_time(), 600.0);
/// assert_eq!(route.order_ids(), vec![3]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    category: CategoryId,
    resource_id: Option<u64>,
    stops: Vec<Stop>,
    window: TimeWindow,
    dispatch_time: f64,
    total_weight: f64,
    total_distance: f64,
    delivery_time: f64,
    execution_time: f64,
    cost: f64,
}

impl Route {
    /// Creates a route dispatched at the start of its feasible window.
    pub fn new(category: CategoryId, stops: Vec<Stop>, window: TimeWindow) -> Self {
        Self {
            category,
            resource_id: None,
            stops,
            window,
            dispatch_time: window.start(),
            total_weight: 0.0,
            total_distance: 0.0,
            delivery_time: 0.0,
            execution_time: 0.0,
            cost: 0.0,
        }
    }

    /// Category serving this route.
    pub fn category(&self) -> CategoryId {
        self.category
    }

    /// Resource bound to this route once committed.
    pub fn resource_id(&self) -> Option<u64> {
        self.resource_id
    }

    /// Binds the route to a concrete resource.
    pub fn assign(&mut self, resource_id: u64) {
        self.resource_id = Some(resource_id);
    }

    /// The stops in delivery order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if this route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Order slice positions in delivery order.
    pub fn order_ids(&self) -> Vec<usize> {
        self.stops.iter().map(|s| s.order).collect()
    }

    /// Returns `true` if the route visits the given order.
    pub fn visits(&self, order: usize) -> bool {
        self.stops.iter().any(|s| s.order == order)
    }

    /// Instants at which the route may be dispatched.
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Chosen dispatch instant.
    pub fn dispatch_time(&self) -> f64 {
        self.dispatch_time
    }

    /// Instant the resource is free again.
    pub fn return_time(&self) -> f64 {
        self.dispatch_time + self.execution_time
    }

    /// Carried weight.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Billed distance.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Minutes from dispatch to the last hand-in.
    pub fn delivery_time(&self) -> f64 {
        self.delivery_time
    }

    /// Minutes the resource is occupied.
    pub fn execution_time(&self) -> f64 {
        self.execution_time
    }

    /// Route cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Cost per delivered order.
    pub fn cost_per_order(&self) -> f64 {
        if self.stops.is_empty() {
            return 0.0;
        }
        self.cost / self.stops.len() as f64
    }

    /// Whether the route has been delivered, read from its first order.
    pub fn is_completed(&self, orders: &[Order]) -> bool {
        self.stops
            .first()
            .is_some_and(|s| orders[s.order].is_completed())
    }

    /// Sets the totals computed by the evaluator.
    pub(crate) fn set_totals(
        &mut self,
        weight: f64,
        distance: f64,
        delivery_time: f64,
        execution_time: f64,
        cost: f64,
    ) {
        self.total_weight = weight;
        self.total_distance = distance;
        self.delivery_time = delivery_time;
        self.execution_time = execution_time;
        self.cost = cost;
    }
}
