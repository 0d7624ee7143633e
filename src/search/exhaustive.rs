//! Exact route search by permutation enumeration.
//!
//! # Algorithm
//!
//! Evaluates every ordering of the candidate stops using the memoized
//! permutation table for that size and keeps the best one under the
//! selection policy. If no ordering is feasible, retries on every subset
//! obtained by excluding 1, then 2, then 3 non-anchor stops; the first
//! exclusion depth that yields a feasible route wins, so the fewest
//! orders are dropped.
//!
//! # Complexity
//!
//! O(n! · n) per subset, n ≤ 8.

use tracing::trace;

use super::{PermutationCache, RouteSearch, SelectionPolicy};
use crate::evaluation::RouteEvaluator;
use crate::models::Route;

/// Exhaustive permutation search with subset-dropping fallback.
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveSearch<'c> {
    cache: &'c PermutationCache,
    max_exclusion_depth: usize,
}

impl<'c> ExhaustiveSearch<'c> {
    /// Creates a search drawing orderings from `cache`.
    pub fn new(cache: &'c PermutationCache, max_exclusion_depth: usize) -> Self {
        Self {
            cache,
            max_exclusion_depth,
        }
    }

    /// Best ordering of exactly `stops`, or `None` if none is feasible or
    /// the set is too large for a permutation table.
    pub fn best_ordering(
        &self,
        evaluator: &RouteEvaluator<'_>,
        stops: &[usize],
        anchor: usize,
        policy: SelectionPolicy,
    ) -> Option<Route> {
        let table = self.cache.get(stops.len())?;
        let mut best = None;
        let mut sequence = Vec::with_capacity(stops.len());
        for ordering in table.iter() {
            sequence.clear();
            sequence.extend(ordering.iter().map(|&i| stops[i as usize]));
            if let Some(route) = policy.evaluate(evaluator, &sequence, anchor) {
                policy.keep_best(&mut best, route);
            }
        }
        best
    }
}

impl RouteSearch for ExhaustiveSearch<'_> {
    fn search(
        &self,
        evaluator: &RouteEvaluator<'_>,
        stops: &[usize],
        anchor: usize,
        policy: SelectionPolicy,
    ) -> Option<Route> {
        if let Some(route) = self.best_ordering(evaluator, stops, anchor, policy) {
            return Some(route);
        }

        let others: Vec<usize> = stops.iter().copied().filter(|&o| o != anchor).collect();
        let max_depth = self.max_exclusion_depth.min(others.len());
        for depth in 1..=max_depth {
            let mut best = None;
            for excluded in combinations(others.len(), depth) {
                let mut subset = Vec::with_capacity(stops.len() - depth);
                subset.push(anchor);
                subset.extend(
                    others
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| !excluded.contains(i))
                        .map(|(_, &o)| o),
                );
                if let Some(route) = self.best_ordering(evaluator, &subset, anchor, policy) {
                    policy.keep_best(&mut best, route);
                }
            }
            // Shallowest depth wins even under MinCost, where a deeper
            // exclusion is always cheaper: dropping fewer orders comes first.
            if best.is_some() {
                trace!(anchor, depth, "feasible route after excluding stops");
                return best;
            }
        }
        trace!(anchor, stops = stops.len(), "exhaustive search found no feasible route");
        None
    }
}

/// All `k`-element index subsets of `0..n`, in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k > n {
        return out;
    }
    let mut current: Vec<usize> = (0..k).collect();
    loop {
        out.push(current.clone());
        let mut i = k;
        while i > 0 && current[i - 1] == n - k + i - 1 {
            i -= 1;
        }
        if i == 0 {
            break;
        }
        current[i - 1] += 1;
        for j in i..k {
            current[j] = current[j - 1] + 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_combinations() {
        assert_eq!(
            combinations(4, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
        assert_eq!(combinations(3, 0), vec![Vec::<usize>::new()]);
        assert!(combinations(2, 3).is_empty());
    }

    #[test]
    fn test_three_stop_brute_force_minimum() {
        // shop-A 2, shop-B 3, shop-C 1, A-B 1, A-C 4, B-C 2
        let dm = symmetric(4, &[2.0, 3.0, 1.0, 1.0, 4.0, 2.0]);
        let orders = vec![order(1, 1000.0, 1.0), order(2, 1000.0, 1.0), order(3, 1000.0, 1.0)];
        let cat = walker(4);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let cache = PermutationCache::new();
        let search = ExhaustiveSearch::new(&cache, 3);

        let route = search
            .search(&ev, &[0, 1, 2], 0, SelectionPolicy::MinCost)
            .expect("feasible");

        let brute_force = cache
            .get(3)
            .expect("in range")
            .iter()
            .map(|p| {
                let seq: Vec<usize> = p.iter().map(|&i| i as usize).collect();
                dm.tour_legs(&seq).iter().sum::<f64>()
            })
            .fold(f64::INFINITY, f64::min);
        assert!((brute_force - 6.0).abs() < 1e-10);
        assert!((route.total_distance() - brute_force).abs() < 1e-10);
        assert_eq!(route.len(), 3);
    }

    #[test]
    fn test_exclusion_fallback_drops_exactly_one() {
        // four 3 kg parcels, the walker carries at most 10 kg
        let dm = line(&[1.0, 1.2, 1.4, 1.6]);
        let orders = vec![
            order(1, 1000.0, 3.0),
            order(2, 1000.0, 3.0),
            order(3, 1000.0, 3.0),
            order(4, 1000.0, 3.0),
        ];
        let cat = walker(4);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let cache = PermutationCache::new();
        let search = ExhaustiveSearch::new(&cache, 3);

        assert!(search
            .best_ordering(&ev, &[0, 1, 2, 3], 0, SelectionPolicy::MinCost)
            .is_none());
        let route = search
            .search(&ev, &[0, 1, 2, 3], 0, SelectionPolicy::MinCost)
            .expect("feasible after exclusion");
        assert_eq!(route.len(), 3);
        assert!(route.visits(0));
        // dropping the farthest stop is cheapest
        assert!(!route.visits(3));
    }

    #[test]
    fn test_no_route_when_anchor_infeasible() {
        let dm = line(&[1.0, 5.0]);
        let orders = vec![order(1, 1000.0, 1.0), order(2, 30.0, 1.0)];
        let cat = walker(4);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let cache = PermutationCache::new();
        let search = ExhaustiveSearch::new(&cache, 3);
        assert!(search
            .search(&ev, &[0, 1], 1, SelectionPolicy::MinCost)
            .is_none());
        assert!(search
            .search(&ev, &[0, 1], 1, SelectionPolicy::MaxCoverage)
            .is_none());
    }

    #[test]
    fn test_max_coverage_salvages() {
        // order 2 lies on the other side of the shop and is due at 31
        let dm = line(&[1.0, 2.0, -3.0]);
        let orders = vec![order(1, 1000.0, 1.0), order(2, 1000.0, 1.0), order(3, 31.0, 1.0)];
        let cat = walker(4);
        let r = courier();
        let ev = RouteEvaluator::new(&orders, &dm, &cat, &r, 0.0);
        let cache = PermutationCache::new();
        let search = ExhaustiveSearch::new(&cache, 3);
        let route = search
            .search(&ev, &[0, 1, 2], 0, SelectionPolicy::MaxCoverage)
            .expect("feasible");
        assert_eq!(route.len(), 3);
        // the urgent stop has to come first
        assert_eq!(route.order_ids()[0], 2);
    }
}
