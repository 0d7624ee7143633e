//! Bounded 2-opt search over a stop sequence.
//!
//! # Algorithm
//!
//! Starting from the given order, try every segment reversal
//! `route[i..=j]` and evaluate the full route (deadlines make the classic
//! edge-delta test unusable). A reversal is kept when the evaluated route
//! beats the best one so far under the selection policy. Passes repeat
//! until no reversal helps or the reversal budget is spent.
//!
//! # Complexity
//!
//! O(n) per evaluated reversal, at most `max_rounds` reversals.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::SelectionPolicy;
use crate::evaluation::RouteEvaluator;
use crate::models::Route;

/// Applies bounded 2-opt to `initial`, returning the best route seen.
///
/// # Arguments
///
/// * `evaluator` — Route evaluator for the category and resource
/// * `initial` — Starting order (order slice positions)
/// * `anchor` — Order that every returned route must visit
/// * `policy` — Ranking of feasible routes
/// * `max_rounds` — Maximum number of reversals evaluated
pub fn two_opt_search(
    evaluator: &RouteEvaluator<'_>,
    initial: &[usize],
    anchor: usize,
    policy: SelectionPolicy,
    max_rounds: usize,
) -> Option<Route> {
    let mut current = initial.to_vec();
    let mut best = policy.evaluate(evaluator, &current, anchor);
    if current.len() < 2 {
        return best;
    }

    let n = current.len();
    let mut rounds = 0;
    let mut improved = true;

    while improved && rounds < max_rounds {
        improved = false;
        'pass: for i in 0..n - 1 {
            for j in i + 1..n {
                if rounds >= max_rounds {
                    break 'pass;
                }
                rounds += 1;
                current[i..=j].reverse();
                let accepted = match policy.evaluate(evaluator, &current, anchor) {
                    Some(route) => {
                        let better = best.as_ref().is_none_or(|b| policy.prefers(&route, b));
                        if better {
                            best = Some(route);
                        }
                        better
                    }
                    None => false,
                };
                if accepted {
                    improved = true;
                } else {
                    current[i..=j].reverse();
                }
            }
        }
    }

    best
}
