//! Per-resource rollup of a solved day.

use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, DayPlan};

/// Utilization and cost of one resource over the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceStats {
    /// Courier or account id.
    pub resource_id: u64,
    /// Category the resource belongs to.
    pub category: CategoryId,
    /// Orders delivered.
    pub orders: usize,
    /// Routes dispatched.
    pub routes: usize,
    /// Shift cost for couriers, summed fees for flat-fee accounts.
    pub cost: f64,
    /// Minutes from dispatch to last hand-in, summed over routes.
    pub delivery_time: f64,
    /// Minutes out of the shop, summed over routes.
    pub busy_time: f64,
    /// Paid minutes; zero for flat-fee accounts.
    pub work_time: f64,
}

impl ResourceStats {
    /// Share of paid time spent on routes, `None` when nothing was paid by
    /// the minute.
    pub fn utilization(&self) -> Option<f64> {
        (self.work_time > 0.0).then(|| self.busy_time / self.work_time)
    }

    /// Average cost per delivered order.
    pub fn cost_per_order(&self) -> Option<f64> {
        (self.orders > 0).then(|| self.cost / self.orders as f64)
    }
}

/// Rollup of one shop-day.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::DayPlan;
/// use u_dispatch::stats::DayStats;
///
/// let stats = DayStats::from_plan(&DayPlan::new());
/// assert_eq!(stats.orders, 0);
/// assert_eq!(stats.cost_per_order(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    /// Per-resource rows, sorted by resource id.
    pub resources: Vec<ResourceStats>,
    /// Orders delivered.
    pub orders: usize,
    /// Routes dispatched.
    pub routes: usize,
    /// Orders left without a route.
    pub undeliverable: usize,
    /// Total cost of the day.
    pub cost: f64,
    /// Paid courier minutes.
    pub work_time: f64,
}

impl DayStats {
    /// Aggregates the committed routes and resources of a plan.
    pub fn from_plan(plan: &DayPlan) -> Self {
        let mut resources: Vec<ResourceStats> = plan
            .resources()
            .iter()
            .map(|r| {
                let tally = r.tally();
                ResourceStats {
                    resource_id: r.id(),
                    category: r.category(),
                    orders: tally.orders,
                    routes: tally.routes,
                    cost: tally.cost,
                    delivery_time: tally.delivery_time,
                    busy_time: 0.0,
                    work_time: tally.work_time,
                }
            })
            .collect();

        for route in plan.routes() {
            let Some(id) = route.resource_id() else {
                continue;
            };
            if let Some(stats) = resources.iter_mut().find(|s| s.resource_id == id) {
                stats.busy_time += route.execution_time();
            }
        }
        resources.sort_by_key(|s| s.resource_id);

        Self {
            orders: resources.iter().map(|s| s.orders).sum(),
            routes: resources.iter().map(|s| s.routes).sum(),
            undeliverable: plan.num_undeliverable(),
            cost: resources.iter().map(|s| s.cost).sum(),
            work_time: resources.iter().map(|s| s.work_time).sum(),
            resources,
        }
    }

    /// Average cost per delivered order over the day.
    pub fn cost_per_order(&self) -> Option<f64> {
        (self.orders > 0).then(|| self.cost / self.orders as f64)
    }

    /// Share of orders delivered.
    pub fn service_rate(&self) -> f64 {
        let total = self.orders + self.undeliverable;
        if total == 0 {
            return 1.0;
        }
        self.orders as f64 / total as f64
    }
}
