//! Couriers and carriers bound to a resource category.

use serde::{Deserialize, Serialize};

use super::{CategoryId, TimeWindow};

/// Availability of a resource at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    /// On duty and idle at the shop.
    Ready,
    /// On the lunch break.
    Lunch,
    /// Out on a committed route.
    Delivering,
    /// Outside the duty window.
    OffDuty,
}

/// Running totals of one resource over the solved day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceTally {
    /// Orders delivered.
    pub orders: usize,
    /// Routes driven.
    pub routes: usize,
    /// Money spent on this resource.
    pub cost: f64,
    /// Minutes spent between dispatch and the last hand-in, summed over routes.
    pub delivery_time: f64,
    /// Paid minutes on duty.
    pub work_time: f64,
}

/// A courier (or carrier account) bound to one category.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Resource, ResourceStatus, TimeWindow};
///
/// let courier = Resource::new(1, 0, Some(TimeWindow::new(540.0, 1080.0).unwrap()))
///     .with_lunch(TimeWindow::new(780.0, 810.0).unwrap());
/// assert_eq!(courier.status_at(600.0), ResourceStatus::Ready);
/// assert_eq!(courier.status_at(790.0), ResourceStatus::Lunch);
/// assert_eq!(courier.status_at(1200.0), ResourceStatus::OffDuty);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    id: u64,
    category: CategoryId,
    duty: Option<TimeWindow>,
    lunch: Option<TimeWindow>,
    busy_until: Option<f64>,
    tally: ResourceTally,
}

impl Resource {
    /// Creates an idle resource. `duty = None` means always available.
    pub fn new(id: u64, category: CategoryId, duty: Option<TimeWindow>) -> Self {
        Self {
            id,
            category,
            duty,
            lunch: None,
            busy_until: None,
            tally: ResourceTally::default(),
        }
    }

    /// Sets the lunch break.
    pub fn with_lunch(mut self, lunch: TimeWindow) -> Self {
        self.lunch = Some(lunch);
        self
    }

    /// A fresh copy of this template under a new ID, with no commitments.
    pub fn instantiate(&self, id: u64) -> Self {
        Self {
            id,
            category: self.category,
            duty: self.duty,
            lunch: self.lunch,
            busy_until: None,
            tally: ResourceTally::default(),
        }
    }

    /// Resource ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Category this resource belongs to.
    pub fn category(&self) -> CategoryId {
        self.category
    }

    /// Duty window, `None` if unrestricted.
    pub fn duty(&self) -> Option<&TimeWindow> {
        self.duty.as_ref()
    }

    /// Lunch break, if any.
    pub fn lunch(&self) -> Option<&TimeWindow> {
        self.lunch.as_ref()
    }

    /// End of the last committed route, if any.
    pub fn busy_until(&self) -> Option<f64> {
        self.busy_until
    }

    /// Running totals.
    pub fn tally(&self) -> &ResourceTally {
        &self.tally
    }

    /// Records that the resource is occupied until `time`.
    pub fn occupy_until(&mut self, time: f64) {
        self.busy_until = Some(self.busy_until.map_or(time, |b| b.max(time)));
    }

    /// Adds one delivered route to the running totals.
    pub fn record_route(&mut self, orders: usize, cost: f64, delivery_time: f64) {
        self.tally.orders += orders;
        self.tally.routes += 1;
        self.tally.cost += cost;
        self.tally.delivery_time += delivery_time;
    }

    /// Overrides the paid work time and cost after shift trimming.
    pub fn settle_shift(&mut self, work_time: f64, cost: f64) {
        self.tally.work_time = work_time;
        self.tally.cost = cost;
    }

    /// Availability at `time`.
    pub fn status_at(&self, time: f64) -> ResourceStatus {
        if self.duty.is_some_and(|d| !d.contains(time)) {
            ResourceStatus::OffDuty
        } else if self.lunch.is_some_and(|l| l.contains(time)) {
            ResourceStatus::Lunch
        } else if self.busy_until.is_some_and(|b| b > time) {
            ResourceStatus::Delivering
        } else {
            ResourceStatus::Ready
        }
    }
}
