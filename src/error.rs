//! Errors surfaced by the public entry points.
//!
//! Only malformed input is an error. Capacity, deadline and search
//! failures are ordinary outcomes reported through
//! [`Violation`](crate::models::Violation) and
//! [`RejectReason`](crate::models::RejectReason).

/// Input validation failures.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The shop enables no resource category.
    #[error("shop {0} has no enabled resource categories")]
    InvalidShop(u64),

    /// The order slice is empty.
    #[error("no orders for shop {0}")]
    NoOrders(u64),

    /// An order ships from another shop.
    #[error("order {order} belongs to shop {actual}, expected {expected}")]
    ForeignOrder { order: u64, expected: u64, actual: u64 },

    /// No category of the pool has a resource template.
    #[error("resource pool has no usable resource")]
    EmptyPool,

    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed JSON input.
    #[error("configuration parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
