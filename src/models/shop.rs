//! Shops dispatching orders.

use serde::{Deserialize, Serialize};

use crate::distance::GeoPoint;

use super::CategoryId;

/// A shop, the start and end point of every route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    /// Shop ID.
    pub id: u64,
    /// Shop address.
    pub location: GeoPoint,
    /// Resource categories enabled at this shop for the day.
    pub categories: Vec<CategoryId>,
}

impl Shop {
    /// Creates a shop with the given enabled categories.
    pub fn new(id: u64, location: GeoPoint, categories: Vec<CategoryId>) -> Self {
        Self {
            id,
            location,
            categories,
        }
    }

    /// Returns `true` if `category` is enabled at this shop.
    pub fn allows(&self, category: CategoryId) -> bool {
        self.categories.contains(&category)
    }
}
