//! Shift trimming for hourly couriers.

use crate::models::{HourlyRate, Route};

/// The part of an hourly courier's route chain worth paying for.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftPlan {
    routes: Vec<Route>,
    start: f64,
    work_time: f64,
    orders: usize,
    cost: f64,
}

impl ShiftPlan {
    /// Routes of the shift in dispatch order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Consumes the plan, returning its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Dispatch instant of the first route.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Paid minutes, never below the minimum paid shift.
    pub fn work_time(&self) -> f64 {
        self.work_time
    }

    /// Orders delivered over the shift.
    pub fn orders(&self) -> usize {
        self.orders
    }

    /// Shift pay plus insurance.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Average cost per delivered order.
    pub fn cost_per_order(&self) -> f64 {
        if self.orders == 0 {
            return 0.0;
        }
        self.cost / self.orders as f64
    }
}

/// Selects the prefix of a sequential route chain to commit for one courier.
///
/// Routes dispatched within the minimum paid duration are always kept,
/// since they are paid for anyway. Beyond that the chain is extended
/// route by route while the average cost per order stays within
/// `threshold` or improves on the best average seen so far. The prefix with
/// the lowest average wins; on ties the longer prefix wins.
///
/// Returns `None` for an empty chain.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::HourlyRate;
/// use u_dispatch::scheduler::trim_shift;
///
/// let rate = HourlyRate { per_hour: 10.0, min_paid_minutes: 240.0 };
/// assert!(trim_shift(Vec::new(), &rate, 0.1, 6.0).is_none());
/// ```
pub fn trim_shift(
    chain: Vec<Route>,
    rate: &HourlyRate,
    insurance: f64,
    threshold: f64,
) -> Option<ShiftPlan> {
    let start = chain.first()?.dispatch_time();
    let paid_until = start + rate.min_paid_minutes;

    let mut prefixes = Vec::with_capacity(chain.len());
    let mut orders = 0;
    for route in &chain {
        orders += route.len();
        let span = route.return_time() - start;
        let cost = rate.shift_pay(span) + insurance * orders as f64;
        prefixes.push((span.max(rate.min_paid_minutes), orders, cost));
    }
    let average = |k: usize| {
        let (_, orders, cost) = prefixes[k - 1];
        if orders == 0 {
            f64::INFINITY
        } else {
            cost / orders as f64
        }
    };

    let mandatory = chain
        .iter()
        .take_while(|r| r.dispatch_time() < paid_until)
        .count()
        .max(1);
    let mut best = mandatory;
    let mut best_average = average(mandatory);
    for k in (mandatory + 1)..=chain.len() {
        let avg = average(k);
        if avg <= best_average {
            best = k;
            best_average = avg;
        } else if avg > threshold {
            break;
        }
    }

    let (work_time, orders, cost) = prefixes[best - 1];
    let mut routes = chain;
    routes.truncate(best);
    Some(ShiftPlan {
        routes,
        start,
        work_time,
        orders,
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Stop, TimeWindow};

    fn route(dispatch: f64, orders: usize, execution: f64) -> Route {
        let stops = (0..orders)
            .map(|order| Stop {
                order,
                cumulative_distance: 0.0,
                cumulative_time: 0.0,
            })
            .collect();
        let window = TimeWindow::new(dispatch, dispatch + 10.0).expect("valid");
        let mut r = Route::new(0, stops, window);
        r.set_totals(1.0, 1.0, execution, execution, 0.0);
        r
    }

    fn rate() -> HourlyRate {
        HourlyRate {
            per_hour: 60.0,
            min_paid_minutes: 240.0,
        }
    }

    #[test]
    fn test_sixth_route_is_trimmed() {
        // seven hours; the sixth route pushes the average above 30
        let chain = vec![
            route(0.0, 2, 60.0),
            route(60.0, 2, 60.0),
            route(120.0, 2, 60.0),
            route(180.0, 2, 60.0),
            route(240.0, 3, 60.0),
            route(360.0, 2, 60.0),
        ];
        let plan = trim_shift(chain, &rate(), 0.0, 30.0).expect("non-empty");
        assert_eq!(plan.routes().len(), 5);
        assert_eq!(plan.orders(), 11);
        assert!((plan.work_time() - 300.0).abs() < 1e-10);
        assert!((plan.cost() - 300.0).abs() < 1e-10);
        assert!((plan.cost_per_order() - 300.0 / 11.0).abs() < 1e-10);
    }

    #[test]
    fn test_mandatory_routes_are_kept() {
        // the third route is expensive but still inside the paid minimum
        let chain = vec![
            route(0.0, 5, 30.0),
            route(40.0, 5, 30.0),
            route(200.0, 1, 100.0),
        ];
        let plan = trim_shift(chain, &rate(), 0.0, 1.0).expect("non-empty");
        assert_eq!(plan.routes().len(), 3);
        assert!((plan.work_time() - 300.0).abs() < 1e-10);
    }

    #[test]
    fn test_short_shift_pays_minimum() {
        let plan = trim_shift(vec![route(600.0, 2, 30.0)], &rate(), 0.5, 6.0).expect("non-empty");
        assert_eq!(plan.start(), 600.0);
        assert!((plan.work_time() - 240.0).abs() < 1e-10);
        assert!((plan.cost() - 241.0).abs() < 1e-10);
    }

    #[test]
    fn test_extension_within_threshold_keeps_cheapest_prefix() {
        // averages: 240/4 = 60, then 270/5 = 54, then 330/6 = 55
        let chain = vec![
            route(0.0, 4, 60.0),
            route(250.0, 1, 20.0),
            route(300.0, 1, 30.0),
        ];
        let plan = trim_shift(chain, &rate(), 0.0, 100.0).expect("non-empty");
        assert_eq!(plan.routes().len(), 2);
        assert_eq!(plan.orders(), 5);
    }
}
