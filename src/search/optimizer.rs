//! Route optimizer: from an anchor and its co-deliverable candidates to
//! the best feasible route for one category.

use tracing::trace;

use super::{ExhaustiveSearch, HeuristicSearch, PermutationCache, RouteSearch, SelectionPolicy};
use crate::config::EngineConfig;
use crate::distance::DistanceMatrix;
use crate::evaluation::RouteEvaluator;
use crate::models::Route;

/// Builds the cheapest feasible route around an anchor order.
///
/// # Algorithm
///
/// 1. Keep candidates that can share a two-stop route with the anchor in
///    at least one visiting order.
/// 2. Keep at most `max_stops - 1` of them, nearest to the anchor first.
/// 3. Up to `max_exact_stops` stops: exhaustive permutation search;
///    beyond that: nearest-neighbor paths and bounded 2-opt.
/// 4. Reject any result that does not visit the anchor.
pub struct RouteOptimizer<'c> {
    exhaustive: ExhaustiveSearch<'c>,
    heuristic: HeuristicSearch,
    max_exact_stops: usize,
}

impl<'c> RouteOptimizer<'c> {
    /// Creates an optimizer sharing `cache` for its permutation tables.
    pub fn new(cache: &'c PermutationCache, config: &EngineConfig) -> Self {
        Self {
            exhaustive: ExhaustiveSearch::new(cache, config.max_exclusion_depth),
            heuristic: HeuristicSearch::new(config.two_opt_rounds),
            max_exact_stops: config.max_exact_stops,
        }
    }

    /// Best route visiting `anchor` and a subset of `candidates`.
    ///
    /// Returns `None` when no feasible arrangement contains the anchor.
    pub fn optimize(
        &self,
        evaluator: &RouteEvaluator<'_>,
        anchor: usize,
        candidates: &[usize],
        policy: SelectionPolicy,
    ) -> Option<Route> {
        let mut stops = vec![anchor];
        stops.extend(self.pairwise_filter(evaluator, anchor, candidates));

        let search: &dyn RouteSearch = if stops.len() <= self.max_exact_stops {
            &self.exhaustive
        } else {
            &self.heuristic
        };
        let route = search
            .search(evaluator, &stops, anchor, policy)
            .filter(|r| r.visits(anchor));
        if route.is_none() {
            trace!(anchor, candidates = candidates.len(), "no route around anchor");
        }
        route
    }

    /// Candidates able to share a two-stop route with the anchor, limited
    /// to the category's stop capacity and sorted by distance to the anchor.
    pub fn pairwise_filter(
        &self,
        evaluator: &RouteEvaluator<'_>,
        anchor: usize,
        candidates: &[usize],
    ) -> Vec<usize> {
        let distances = evaluator.distances();
        let from = DistanceMatrix::order_location(anchor);
        let mut kept: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&c| c != anchor)
            .filter(|&c| {
                evaluator.build_route(&[anchor, c]).is_ok()
                    || evaluator.build_route(&[c, anchor]).is_ok()
            })
            .collect();
        kept.sort_by(|&a, &b| {
            let da = distances.get(from, DistanceMatrix::order_location(a));
            let db = distances.get(from, DistanceMatrix::order_location(b));
            da.total_cmp(&db).then(a.cmp(&b))
        });
        let capacity = evaluator.category().profile().max_stops.saturating_sub(1);
        kept.truncate(capacity);
        kept
    }
}
