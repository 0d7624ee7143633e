//! Greedy nearest-neighbor path construction.
//!
//! Builds one path per choice of starting stop: from the start, always
//! extend to the nearest unvisited candidate that still fits the
//! category's weight and stop limits.
//!
//! # Complexity
//!
//! O(n²) per path, O(n³) for all starting stops.

use crate::evaluation::RouteEvaluator;

/// Constructs one greedy nearest-neighbor path per starting stop.
///
/// Paths respect the category's weight and stop-count limits; deadlines are
/// checked later by the evaluator.
///
/// # Arguments
///
/// * `evaluator` — Supplies orders, distances and the category profile
/// * `stops` — Candidate order slice positions
pub fn nearest_neighbor_paths(evaluator: &RouteEvaluator<'_>, stops: &[usize]) -> Vec<Vec<usize>> {
    let orders = evaluator.orders();
    let distances = evaluator.distances();
    let profile = evaluator.category().profile();

    stops
        .iter()
        .map(|&start| {
            let mut path = vec![start];
            let mut load = orders[start].weight();
            let mut remaining: Vec<usize> = stops.iter().copied().filter(|&o| o != start).collect();

            while path.len() < profile.max_stops {
                let fitting: Vec<usize> = remaining
                    .iter()
                    .copied()
                    .filter(|&o| load + orders[o].weight() <= profile.max_weight)
                    .collect();
                let current = path[path.len() - 1];
                let Some(next) = distances.nearest_order(current, &fitting) else {
                    break;
                };
                load += orders[next].weight();
                path.push(next);
                remaining.retain(|&o| o != next);
            }
            path
        })
        .collect()
}
