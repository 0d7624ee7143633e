//! Feasibility and cost evaluation of stop sequences.
//!
//! Combines a category's cost model with order deadlines and a resource's
//! duty, lunch and running commitments into a dispatchable [`Route`](crate::models::Route).

mod evaluator;

pub use evaluator::{dispatch_window, feasible_window, RouteEvaluator};
