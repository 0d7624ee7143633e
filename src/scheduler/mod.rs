//! Day-long greedy scheduling across resource categories.
//!
//! - [`DayScheduler`] — repeatedly commits the best next shipment of any
//!   category until none is left
//! - [`trim_shift`] — cuts an hourly courier's route chain to the prefix
//!   with the lowest cost per order

mod greedy;
mod shift;

pub use greedy::{DayScheduler, Phase};
pub use shift::{trim_shift, ShiftPlan};
