//! Domain model types for same-day delivery dispatch.
//!
//! Provides the core abstractions: orders with deadlines, shops, resource
//! categories with their cost models, couriers with duty schedules, routes
//! as ordered stop sequences, and the plan produced for one shop-day.

mod category;
mod order;
mod pool;
mod resource;
mod route;
mod shop;
mod solution;
mod violation;
mod window;

pub use category::{
    CategoryId, CategoryProfile, FlatFeeCategory, FlatFeeSchedule, HourlyCategory, HourlyRate,
    ResourceCategory, Trip,
};
pub use order::Order;
pub use pool::ResourcePool;
pub use resource::{Resource, ResourceStatus, ResourceTally};
pub use route::{Route, Stop};
pub use shop::Shop;
pub use solution::{DayPlan, Undeliverable};
pub use violation::{RejectReason, Violation};
pub use window::{TimeWindow, MINUTES_PER_DAY};
