//! Heuristic route search for candidate sets too large to enumerate.

use super::{nearest_neighbor_paths, two_opt_search, RouteSearch, SelectionPolicy};
use crate::evaluation::RouteEvaluator;
use crate::models::Route;

/// Greedy nearest-neighbor paths from every starting stop, plus bounded
/// 2-opt from the anchor-first order; the best route of either wins.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicSearch {
    max_rounds: usize,
}

impl HeuristicSearch {
    /// Creates a search with the given 2-opt reversal budget.
    pub fn new(max_rounds: usize) -> Self {
        Self { max_rounds }
    }
}

impl RouteSearch for HeuristicSearch {
    fn search(
        &self,
        evaluator: &RouteEvaluator<'_>,
        stops: &[usize],
        anchor: usize,
        policy: SelectionPolicy,
    ) -> Option<Route> {
        let mut best = None;

        for path in nearest_neighbor_paths(evaluator, stops) {
            if !path.contains(&anchor) {
                continue;
            }
            if let Some(route) = policy.evaluate(evaluator, &path, anchor) {
                policy.keep_best(&mut best, route);
            }
        }

        let initial = fitting_prefix(evaluator, stops, anchor);
        if let Some(route) = two_opt_search(evaluator, &initial, anchor, policy, self.max_rounds) {
            policy.keep_best(&mut best, route);
        }

        best
    }
}

/// The anchor followed by the other stops, in their given order, while they
/// fit the category's weight and stop limits.
fn fitting_prefix(evaluator: &RouteEvaluator<'_>, stops: &[usize], anchor: usize) -> Vec<usize> {
    let orders = evaluator.orders();
    let profile = evaluator.category().profile();
    let mut prefix = vec![anchor];
    let mut load = orders[anchor].weight();
    for &o in stops.iter().filter(|&&o| o != anchor) {
        if prefix.len() >= profile.max_stops {
            break;
        }
        if load + orders[o].weight() > profile.max_weight {
            continue;
        }
        load += orders[o].weight();
        prefix.push(o);
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_heuristic_visits_anchor() {
        let offsets: Vec<f64> = (1..=12).map(|i| i as f64 * 0.3).collect();
        let dm = line(&offsets);
        let orders: Vec<_> = (1..=12).map(|id| order(id, 1000.0, 0.5)).collect();
        let cat = walker(5);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let stops: Vec<usize> = (0..12).collect();
        let search = HeuristicSearch::new(4096);
        for policy in [SelectionPolicy::MinCost, SelectionPolicy::MaxCoverage] {
            let route = search.search(&ev, &stops, 7, policy).expect("feasible");
            assert!(route.visits(7));
            assert!(route.len() <= 5);
        }
    }

    #[test]
    fn test_heuristic_max_coverage_fills_route() {
        let offsets: Vec<f64> = (1..=10).map(|i| i as f64 * 0.2).collect();
        let dm = line(&offsets);
        let orders: Vec<_> = (1..=10).map(|id| order(id, 1000.0, 0.5)).collect();
        let cat = walker(4);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let stops: Vec<usize> = (0..10).collect();
        let route = HeuristicSearch::new(4096)
            .search(&ev, &stops, 0, SelectionPolicy::MaxCoverage)
            .expect("feasible");
        assert_eq!(route.len(), 4);
        assert!(route.visits(0));
    }

    #[test]
    fn test_urgent_far_stops_lead_the_route() {
        // orders 0..=6 west of the shop, 7..=9 east and due almost at once
        let mut offsets: Vec<f64> = (1..=7).map(|i| -0.3 * i as f64).collect();
        offsets.extend([0.5, 1.0, 1.5]);
        let dm = line(&offsets);
        let mut orders: Vec<_> = (1..=7).map(|id| order(id, 1000.0, 0.5)).collect();
        orders.extend([order(8, 6.0, 0.5), order(9, 11.0, 0.5), order(10, 16.0, 0.5)]);
        let cat = walker(10);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let stops: Vec<usize> = (0..10).collect();
        assert!(ev.build_route(&stops).is_err());

        let search = HeuristicSearch::new(4096);
        for policy in [SelectionPolicy::MinCost, SelectionPolicy::MaxCoverage] {
            let route = search.search(&ev, &stops, 0, policy).expect("feasible");
            let ids = route.order_ids();
            assert_eq!(ids.len(), 10, "{policy:?}");
            assert_eq!(&ids[..3], &[7, 8, 9], "{policy:?}");
            assert!((route.cost() - 72.0).abs() < 1e-6, "{policy:?}");
            for stop in route.stops() {
                let deadline = orders[stop.order].deadline();
                assert!(route.dispatch_time() + stop.cumulative_time <= deadline + 1e-9);
            }
        }
    }

    #[test]
    fn test_fitting_prefix_skips_heavy() {
        let dm = line(&[1.0, 1.0, 1.0]);
        let orders = vec![order(1, 1000.0, 4.0), order(2, 1000.0, 7.0), order(3, 1000.0, 4.0)];
        let cat = walker(4);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        assert_eq!(fitting_prefix(&ev, &[0, 1, 2], 0), vec![0, 2]);
    }
}
