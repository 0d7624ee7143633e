//! Single-stop candidates of one category and their co-deliverable groups.

use std::cmp::Ordering;

use super::MinuteCounter;
use crate::evaluation::RouteEvaluator;
use crate::models::TimeWindow;

/// An order that one category can deliver on its own, with the instants it
/// may leave the shop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Order slice position.
    pub order: usize,
    /// Feasible dispatch window of the single-stop route.
    pub window: TimeWindow,
    /// Order deadline.
    pub deadline: f64,
}

/// Feasible single-stop candidates of one category, indexed by the
/// minutes their dispatch windows cover.
///
/// # Examples
///
/// ```
/// use u_dispatch::cluster::CandidateSet;
/// use u_dispatch::distance::{DistanceMatrix, GeoPoint};
/// use u_dispatch::evaluation::RouteEvaluator;
/// use u_dispatch::models::{HourlyCategory, Order, Resource, TimeWindow};
///
/// let at = GeoPoint::new(0.0, 0.0);
/// let orders = vec![
///     Order::new(1, 1, at, 1.0, 600.0, 600.0, 690.0).with_categories(vec![0]),
///     Order::new(2, 1, at, 1.0, 610.0, 610.0, 700.0).with_categories(vec![0]),
/// ];
/// let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 1.5, 1.0, 0.0, 0.8, 1.5, 0.8, 0.0]).unwrap();
/// let bike = HourlyCategory::bicycle(0);
/// let courier = Resource::new(1, 0, TimeWindow::new(540.0, 1080.0));
/// let evaluator = RouteEvaluator::new(&orders, &dm, &bike, &courier, 0.0);
///
/// let set = CandidateSet::build(&evaluator, 64, |_| true);
/// let anchor = set.anchor().unwrap();
/// assert_eq!(anchor.order, 0);
/// assert_eq!(set.co_deliverable(&anchor), vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
    counter: MinuteCounter,
}

impl CandidateSet {
    /// Evaluates every uncompleted order the evaluator's category may carry
    /// and for which `eligible` holds, keeping those feasible on their own.
    pub fn build(
        evaluator: &RouteEvaluator<'_>,
        minute_cap: usize,
        eligible: impl Fn(usize) -> bool,
    ) -> Self {
        let category = evaluator.category().id();
        let orders = evaluator.orders();
        let mut candidates = Vec::new();
        let mut counter = MinuteCounter::new(minute_cap);

        for (idx, order) in orders.iter().enumerate() {
            if order.is_completed() || !order.allows(category) || !eligible(idx) {
                continue;
            }
            let Ok(route) = evaluator.build_single(idx) else {
                continue;
            };
            counter.register(idx, route.window());
            candidates.push(Candidate {
                order: idx,
                window: *route.window(),
                deadline: order.deadline(),
            });
        }

        Self {
            candidates,
            counter,
        }
    }

    /// The feasible candidates, in order slice position.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of feasible candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` if no order is feasible for this category.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The candidate that must leave first: earliest window start, then
    /// earliest deadline, then lowest slice position.
    pub fn anchor(&self) -> Option<Candidate> {
        self.candidates
            .iter()
            .copied()
            .min_by(|a, b| a.urgency(b).then_with(|| a.order.cmp(&b.order)))
    }

    /// Orders dispatchable together with `anchor`: those registered at the
    /// busiest minute of the anchor's window. Empty if the anchor is
    /// isolated.
    pub fn co_deliverable(&self, anchor: &Candidate) -> Vec<usize> {
        let Some(minute) = self.counter.busiest_minute(&anchor.window) else {
            return Vec::new();
        };
        let mut members: Vec<usize> = self
            .counter
            .members(minute)
            .iter()
            .copied()
            .filter(|&o| o != anchor.order)
            .collect();
        members.sort_unstable();
        members.dedup();
        members
    }

    /// Looks up the candidate for an order.
    pub fn get(&self, order: usize) -> Option<&Candidate> {
        self.candidates
            .binary_search_by(|c| c.order.cmp(&order))
            .ok()
            .map(|i| &self.candidates[i])
    }
}

impl Candidate {
    fn urgency(&self, other: &Candidate) -> Ordering {
        self.window
            .start()
            .total_cmp(&other.window.start())
            .then_with(|| self.deadline.total_cmp(&other.deadline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fixtures::{courier, line, order, ready_order, walker};

    #[test]
    fn test_infeasible_orders_are_skipped() {
        // order 1 is 5 km out and due at minute 30
        let dm = line(&[1.0, 5.0, 1.5]);
        let orders = vec![order(1, 200.0, 1.0), order(2, 30.0, 1.0), order(3, 200.0, 1.0)];
        let cat = walker(4);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let set = CandidateSet::build(&ev, 64, |_| true);
        assert_eq!(set.len(), 2);
        assert!(set.get(1).is_none());
        assert!(set.get(2).is_some());
    }

    #[test]
    fn test_completed_and_ineligible_orders_are_skipped() {
        let dm = line(&[1.0, 1.0, 1.0]);
        let mut orders = vec![order(1, 200.0, 1.0), order(2, 200.0, 1.0), order(3, 200.0, 1.0)];
        orders[0].mark_completed();
        let cat = walker(4);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let set = CandidateSet::build(&ev, 64, |o| o != 2);
        assert_eq!(set.candidates().iter().map(|c| c.order).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_orders_of_other_categories_are_skipped() {
        let dm = line(&[1.0, 1.0]);
        let orders = vec![order(1, 200.0, 1.0), order(2, 200.0, 1.0).with_categories(vec![5])];
        let cat = walker(4);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        assert_eq!(CandidateSet::build(&ev, 64, |_| true).len(), 1);
    }

    #[test]
    fn test_anchor_breaks_ties_by_deadline() {
        // every window starts at 0; order 2 is due first
        let dm = line(&[1.0, 1.0, 1.0]);
        let orders = vec![order(1, 200.0, 1.0), order(2, 200.0, 1.0), order(3, 100.0, 1.0)];
        let cat = walker(4);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let set = CandidateSet::build(&ev, 64, |_| true);
        let anchor = set.anchor().expect("feasible");
        assert_eq!(anchor.order, 2);
        assert_eq!(set.co_deliverable(&anchor), vec![0, 1]);
    }

    #[test]
    fn test_isolated_anchor() {
        // windows: order 0 [0, 10], order 1 starts at 500
        let dm = line(&[1.0, 1.0]);
        let orders = vec![order(1, 20.0, 1.0), ready_order(2, 500.0, 700.0, 1.0)];
        let cat = walker(4);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let set = CandidateSet::build(&ev, 64, |_| true);
        let anchor = set.anchor().expect("feasible");
        assert_eq!(anchor.order, 0);
        assert!(set.co_deliverable(&anchor).is_empty());
    }

    #[test]
    fn test_minute_cap_limits_group() {
        let dm = line(&[1.0; 6]);
        let orders: Vec<_> = (1..=6).map(|id| order(id, 200.0, 1.0)).collect();
        let cat = walker(8);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let set = CandidateSet::build(&ev, 3, |_| true);
        let anchor = set.anchor().expect("feasible");
        assert_eq!(set.co_deliverable(&anchor), vec![1, 2]);
    }
}
