//! Retail orders awaiting delivery.

use serde::{Deserialize, Serialize};

use crate::distance::GeoPoint;

use super::CategoryId;

/// An order to be delivered from its shop on the solved day.
///
/// All times are minutes of the solved day. The completion flag is owned
/// here and nowhere else: routes refer to orders by slice position and
/// derive their completion from this flag.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::GeoPoint;
/// use u_dispatch::models::Order;
///
/// let mut order = Order::new(7, 1, GeoPoint::new(55.75, 37.61), 2.5, 600.0, 590.0, 680.0)
///     .with_categories(vec![0, 1]);
/// assert!(!order.is_completed());
/// assert!(order.mark_completed());
/// assert!(!order.mark_completed());
/// assert!(order.allows(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: u64,
    shop_id: u64,
    location: GeoPoint,
    weight: f64,
    ready_time: f64,
    placed_time: f64,
    deadline: f64,
    categories: Vec<CategoryId>,
    #[serde(default)]
    completed: bool,
}

impl Order {
    /// Creates an uncompleted order with no enabled categories.
    pub fn new(
        id: u64,
        shop_id: u64,
        location: GeoPoint,
        weight: f64,
        ready_time: f64,
        placed_time: f64,
        deadline: f64,
    ) -> Self {
        Self {
            id,
            shop_id,
            location,
            weight,
            ready_time,
            placed_time,
            deadline,
            categories: Vec::new(),
            completed: false,
        }
    }

    /// Sets the resource categories allowed to carry this order.
    pub fn with_categories(mut self, categories: Vec<CategoryId>) -> Self {
        self.categories = categories;
        self
    }

    /// Order ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Shop the order is shipped from.
    pub fn shop_id(&self) -> u64 {
        self.shop_id
    }

    /// Delivery address.
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Parcel weight in kilograms.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Earliest instant the parcel can leave the shop.
    pub fn ready_time(&self) -> f64 {
        self.ready_time
    }

    /// Instant the customer placed the order.
    pub fn placed_time(&self) -> f64 {
        self.placed_time
    }

    /// Latest allowed hand-in instant.
    pub fn deadline(&self) -> f64 {
        self.deadline
    }

    /// Resource categories enabled for this order.
    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    /// Returns `true` if `category` may carry this order.
    pub fn allows(&self, category: CategoryId) -> bool {
        self.categories.contains(&category)
    }

    /// Returns `true` once a committed route delivered this order.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Marks the order delivered.
    ///
    /// Returns `false` if the order was already completed.
    pub fn mark_completed(&mut self) -> bool {
        !std::mem::replace(&mut self.completed, true)
    }

    /// Clears the completion flag at the start of a day.
    pub fn reset(&mut self) {
        self.completed = false;
    }
}
