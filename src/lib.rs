//! # u-dispatch
//!
//! Same-day delivery dispatch: assigns a shop's orders to hourly couriers
//! and flat-fee carriers and builds multi-stop routes that meet every
//! order's deadline within each resource's capacity and duty schedule,
//! at the lowest cost per order.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Order, Shop, ResourceCategory, Resource, Route, DayPlan)
//! - [`distance`] — Geographic positions and road distance matrix
//! - [`evaluation`] — Route feasibility, cost and dispatch window
//! - [`cluster`] — Candidate clustering by overlapping dispatch windows
//! - [`search`] — Route construction (exhaustive permutations, nearest neighbor, 2-opt)
//! - [`scheduler`] — Day-long greedy scheduler with shift trimming
//! - [`engine`] — Entry points: solving a shop-day, feasibility probes
//! - [`stats`] — Per-resource daily rollup
//! - [`day`] — Grouping timestamped order records into days
//! - [`generator`] — Reproducible synthetic instances
//! - [`config`] — Engine and fleet configuration
//! - [`error`] — Input validation errors

pub mod cluster;
pub mod config;
pub mod day;
pub mod distance;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod models;
pub mod scheduler;
pub mod search;
pub mod stats;

pub use engine::Engine;
pub use error::{DispatchError, Result};
