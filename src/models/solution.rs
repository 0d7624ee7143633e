//! The outcome of solving one shop-day.

use serde::{Deserialize, Serialize};

use super::{CategoryId, RejectReason, Resource, Route};

/// An order no category could deliver, with the reason per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Undeliverable {
    /// Order slice position.
    pub order: usize,
    /// Order ID.
    pub order_id: u64,
    /// One entry per category enabled on the order.
    pub reasons: Vec<(CategoryId, RejectReason)>,
}

/// Committed routes, materialised couriers and undeliverable orders of a day.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::DayPlan;
///
/// let plan = DayPlan::new();
/// assert_eq!(plan.num_routes(), 0);
/// assert_eq!(plan.num_undeliverable(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    routes: Vec<Route>,
    resources: Vec<Resource>,
    undeliverable: Vec<Undeliverable>,
}

impl DayPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a committed route to the delivery history.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Records a resource used during the day.
    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Returns a mutable reference to a recorded resource.
    pub fn resource_mut(&mut self, id: u64) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|r| r.id() == id)
    }

    /// Marks an order undeliverable.
    pub fn add_undeliverable(&mut self, entry: Undeliverable) {
        self.undeliverable.push(entry);
    }

    /// Delivery history in commit order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resources that served at least one route.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Orders left undelivered.
    pub fn undeliverable(&self) -> &[Undeliverable] {
        &self.undeliverable
    }

    /// Number of committed routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of undeliverable orders.
    pub fn num_undeliverable(&self) -> usize {
        self.undeliverable.len()
    }

    /// Number of delivered orders across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Money spent on all resources.
    pub fn total_cost(&self) -> f64 {
        self.resources.iter().map(|r| r.tally().cost).sum()
    }
}
