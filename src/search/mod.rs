//! Route construction among a set of co-deliverable orders.
//!
//! - [`ExhaustiveSearch`] — every ordering of up to eight stops, with a
//!   subset-dropping fallback
//! - [`HeuristicSearch`] — greedy nearest-neighbor paths and bounded 2-opt
//!   for larger candidate sets
//! - [`RouteOptimizer`] — pairwise pre-filter, then picks one of the above
//!   by candidate-set size
//!
//! Both searches share the [`RouteSearch`] contract: the returned route
//! always visits the anchor order.

mod exhaustive;
mod heuristic;
mod nearest_neighbor;
mod optimizer;
mod permutation;
mod two_opt;

pub use exhaustive::ExhaustiveSearch;
pub use heuristic::HeuristicSearch;
pub use nearest_neighbor::nearest_neighbor_paths;
pub use optimizer::RouteOptimizer;
pub use permutation::{PermutationCache, PermutationTable, MAX_PERMUTATION_SIZE};
pub use two_opt::two_opt_search;

use crate::evaluation::RouteEvaluator;
use crate::models::Route;

const COST_EPSILON: f64 = 1e-9;

/// How competing feasible routes are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Cheapest route among the fully feasible orderings.
    MinCost,
    /// Most stops served, then cheapest. Infeasible orderings are salvaged
    /// by dropping late stops.
    MaxCoverage,
}

impl SelectionPolicy {
    /// Returns `true` if `candidate` should replace `incumbent`.
    pub fn prefers(&self, candidate: &Route, incumbent: &Route) -> bool {
        match self {
            SelectionPolicy::MinCost => candidate.cost() < incumbent.cost() - COST_EPSILON,
            SelectionPolicy::MaxCoverage => {
                candidate.len() > incumbent.len()
                    || (candidate.len() == incumbent.len()
                        && candidate.cost() < incumbent.cost() - COST_EPSILON)
            }
        }
    }

    /// Keeps the preferred of `incumbent` and `candidate`.
    pub fn keep_best(&self, incumbent: &mut Option<Route>, candidate: Route) {
        let replace = match incumbent {
            Some(current) => self.prefers(&candidate, current),
            None => true,
        };
        if replace {
            *incumbent = Some(candidate);
        }
    }

    /// Evaluates one ordering under this policy.
    pub fn evaluate(
        &self,
        evaluator: &RouteEvaluator<'_>,
        sequence: &[usize],
        anchor: usize,
    ) -> Option<Route> {
        match self {
            SelectionPolicy::MinCost => evaluator.build_route(sequence).ok(),
            SelectionPolicy::MaxCoverage => salvage(evaluator, sequence, anchor),
        }
    }
}

/// A route-construction strategy over a fixed candidate set.
pub trait RouteSearch {
    /// Best route visiting `anchor` and a subset of `stops` (which contains
    /// the anchor), or `None` if no arrangement is feasible.
    fn search(
        &self,
        evaluator: &RouteEvaluator<'_>,
        stops: &[usize],
        anchor: usize,
        policy: SelectionPolicy,
    ) -> Option<Route>;
}

/// Forward salvage: while the sequence is infeasible, drop the first stop
/// that misses its deadline (or the last non-anchor stop for capacity and
/// schedule violations) and re-check what remains.
///
/// Returns `None` once the anchor itself would have to go.
pub fn salvage(evaluator: &RouteEvaluator<'_>, sequence: &[usize], anchor: usize) -> Option<Route> {
    let mut current = sequence.to_vec();
    loop {
        let violation = match evaluator.build_route(&current) {
            Ok(route) => return Some(route),
            Err(violation) => violation,
        };
        let drop = match violation.late_stop() {
            Some(pos) => pos,
            None => current.iter().rposition(|&o| o != anchor)?,
        };
        if current[drop] == anchor {
            return None;
        }
        current.remove(drop);
        if current.is_empty() {
            return None;
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::distance::{DistanceMatrix, GeoPoint};
    use crate::models::{HourlyCategory, Order, Resource, TimeWindow};

    /// Walking courier at 10 min/km with no handling time, 1 per minute.
    pub fn walker(max_stops: usize) -> HourlyCategory {
        let mut c = HourlyCategory::on_foot(0);
        c.profile.speed_kmh = 6.0;
        c.profile.pickup_minutes = 0.0;
        c.profile.handin_minutes = 0.0;
        c.profile.insurance = 0.0;
        c.profile.max_distance = 100.0;
        c.profile.max_stops = max_stops;
        c.rate.per_hour = 60.0;
        c
    }

    pub fn courier() -> Resource {
        Resource::new(1, 0, TimeWindow::new(0.0, 2000.0))
    }

    pub fn order(id: u64, deadline: f64, weight: f64) -> Order {
        ready_order(id, 0.0, deadline, weight)
    }

    pub fn ready_order(id: u64, ready: f64, deadline: f64, weight: f64) -> Order {
        Order::new(id, 1, GeoPoint::new(0.0, 0.0), weight, ready, ready, deadline)
            .with_categories(vec![0])
    }

    /// Symmetric matrix from the upper triangle rows (shop first).
    pub fn symmetric(n: usize, upper: &[f64]) -> DistanceMatrix {
        let mut dm = DistanceMatrix::new(n);
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                dm.set(i, j, upper[k]);
                dm.set(j, i, upper[k]);
                k += 1;
            }
        }
        dm
    }

    /// Points on a line at the given offsets from the shop (km).
    pub fn line(offsets: &[f64]) -> DistanceMatrix {
        let mut points = vec![0.0];
        points.extend_from_slice(offsets);
        let n = points.len();
        let mut dm = DistanceMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                dm.set(i, j, (points[i] - points[j]).abs());
            }
        }
        dm
    }
}
