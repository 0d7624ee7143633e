//! Route evaluator that computes timing, cost and the feasible dispatch window.

use crate::distance::DistanceMatrix;
use crate::models::{
    Order, Resource, ResourceCategory, Route, Stop, TimeWindow, Trip, Violation,
};

/// Evaluates stop sequences for one category and one resource state.
///
/// `clock` is the earliest instant any route may leave the shop (the wall
/// clock, or the simulated return time of a courier building its chain).
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::{DistanceMatrix, GeoPoint};
/// use u_dispatch::evaluation::RouteEvaluator;
/// use u_dispatch::models::{HourlyCategory, Order, Resource, TimeWindow};
///
/// let orders = vec![
///     Order::new(1, 1, GeoPoint::new(0.0, 0.0), 1.0, 600.0, 600.0, 690.0),
///     Order::new(2, 1, GeoPoint::new(0.0, 0.0), 1.0, 600.0, 600.0, 690.0),
/// ];
/// let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 1.5, 1.0, 0.0, 0.8, 1.5, 0.8, 0.0]).unwrap();
/// let bike = HourlyCategory::bicycle(0);
/// let courier = Resource::new(1, 0, TimeWindow::new(540.0, 1080.0));
///
/// let evaluator = RouteEvaluator::new(&orders, &dm, &bike, &courier, 0.0);
/// let route = evaluator.build_route(&[0, 1]).unwrap();
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.dispatch_time(), 600.0);
/// ```
pub struct RouteEvaluator<'a> {
    orders: &'a [Order],
    distances: &'a DistanceMatrix,
    category: &'a dyn ResourceCategory,
    resource: &'a Resource,
    clock: f64,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem data.
    pub fn new(
        orders: &'a [Order],
        distances: &'a DistanceMatrix,
        category: &'a dyn ResourceCategory,
        resource: &'a Resource,
        clock: f64,
    ) -> Self {
        Self {
            orders,
            distances,
            category,
            resource,
            clock,
        }
    }

    /// The category being evaluated.
    pub fn category(&self) -> &'a dyn ResourceCategory {
        self.category
    }

    /// The day's orders.
    pub fn orders(&self) -> &'a [Order] {
        self.orders
    }

    /// The distance matrix.
    pub fn distances(&self) -> &'a DistanceMatrix {
        self.distances
    }

    /// Builds a route visiting `stops` (order slice positions) in the given
    /// order, dispatched at the earliest feasible instant.
    pub fn build_route(&self, stops: &[usize]) -> Result<Route, Violation> {
        let legs = self.distances.tour_legs(stops);
        let weight: f64 = stops.iter().map(|&o| self.orders[o].weight()).sum();
        let trip = self.category.multi_stop(&legs, weight)?;

        let earliest = stops
            .iter()
            .map(|&o| self.orders[o].ready_time())
            .fold(self.clock, f64::max);
        let deadlines = stops.iter().map(|&o| self.orders[o].deadline());
        let window = feasible_window(self.resource, &trip, earliest, deadlines)?;

        let route_stops = stops
            .iter()
            .zip(trip.arrivals.iter().zip(&trip.cumulative_distance))
            .map(|(&order, (&time, &distance))| Stop {
                order,
                cumulative_distance: distance,
                cumulative_time: time,
            })
            .collect();

        let mut route = Route::new(self.category.id(), route_stops, window);
        route.set_totals(
            weight,
            trip.distance,
            trip.delivery_time,
            trip.execution_time,
            trip.cost,
        );
        Ok(route)
    }

    /// Single-stop feasibility of one order.
    pub fn build_single(&self, order: usize) -> Result<Route, Violation> {
        self.build_route(&[order])
    }
}

/// Checks every stop's hand-in against its deadline when dispatched at
/// `earliest`, then turns the smallest slack into a dispatch window for
/// `resource`.
pub fn feasible_window(
    resource: &Resource,
    trip: &Trip,
    earliest: f64,
    deadlines: impl IntoIterator<Item = f64>,
) -> Result<TimeWindow, Violation> {
    let mut reserve = f64::INFINITY;
    for (pos, (offset, deadline)) in trip.arrivals.iter().zip(deadlines).enumerate() {
        let arrival = earliest + offset;
        if arrival > deadline {
            return Err(Violation::DeadlineMissed {
                stop: pos,
                arrival,
                deadline,
            });
        }
        reserve = reserve.min(deadline - arrival);
    }
    dispatch_window(resource, earliest, reserve, trip.execution_time)
        .ok_or(Violation::NoDispatchWindow)
}

/// Propagates a stop sequence's reserve time into the instants at which
/// `resource` may dispatch it.
///
/// Starts from `[earliest, earliest + reserve]` and keeps the part inside
/// the duty window that still returns before duty ends. The lunch break and
/// a running delivery then shrink it further. Returns `None` if nothing is
/// left.
pub fn dispatch_window(
    resource: &Resource,
    earliest: f64,
    reserve: f64,
    execution_time: f64,
) -> Option<TimeWindow> {
    let mut window = TimeWindow::new(earliest, earliest + reserve.max(0.0))?;

    if let Some(duty) = resource.duty() {
        let returns_in_time = TimeWindow::new(duty.start(), duty.end() - execution_time)?;
        window = window.intersect(&returns_in_time)?;
    }

    if let Some(lunch) = resource.lunch() {
        if lunch.covers(&window) {
            return None;
        }
        if window.start() < lunch.start() {
            window = TimeWindow::new(window.start(), window.end().min(lunch.start()))?;
        } else if window.start() <= lunch.end() {
            window = TimeWindow::new(lunch.end(), window.end())?;
        }
    }

    if let Some(busy) = resource.busy_until() {
        window = TimeWindow::new(window.start().max(busy), window.end())?;
    }

    Some(window)
}
