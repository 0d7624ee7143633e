//! Candidate clustering: which orders can leave the shop together.
//!
//! Every still-open order is first checked on its own for one category.
//! The feasible ones register their dispatch windows in a per-minute
//! counter; the orders registered at the busiest minute of the anchor's
//! window form the anchor's co-deliverable group.

mod candidates;
mod minute_counter;

pub use candidates::{Candidate, CandidateSet};
pub use minute_counter::MinuteCounter;
