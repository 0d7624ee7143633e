//! The categories and resource templates available to a shop-day.

use std::sync::Arc;

use super::{CategoryId, Resource, ResourceCategory};

/// Category catalogue plus one or more resource templates per category.
///
/// Hourly templates describe a courier shift; the scheduler clones a fresh
/// courier from a template each time it commits to that category. A
/// flat-fee template stands for the carrier's dispatch account.
#[derive(Debug, Clone, Default)]
pub struct ResourcePool {
    categories: Vec<Arc<dyn ResourceCategory>>,
    templates: Vec<Resource>,
}

impl ResourcePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a category.
    pub fn with_category(mut self, category: Arc<dyn ResourceCategory>) -> Self {
        self.categories.push(category);
        self
    }

    /// Registers a resource template.
    pub fn with_template(mut self, template: Resource) -> Self {
        self.templates.push(template);
        self
    }

    /// All registered categories.
    pub fn categories(&self) -> &[Arc<dyn ResourceCategory>] {
        &self.categories
    }

    /// Looks up a category by ID.
    pub fn category(&self, id: CategoryId) -> Option<&Arc<dyn ResourceCategory>> {
        self.categories.iter().find(|c| c.id() == id)
    }

    /// Templates registered for a category.
    pub fn templates_for(&self, id: CategoryId) -> impl Iterator<Item = &Resource> {
        self.templates.iter().filter(move |t| t.category() == id)
    }

    /// All templates.
    pub fn templates(&self) -> &[Resource] {
        &self.templates
    }

    /// Largest template ID, used to number cloned couriers.
    pub fn max_resource_id(&self) -> u64 {
        self.templates.iter().map(|t| t.id()).max().unwrap_or(0)
    }

    /// Returns `true` if no category has a template.
    pub fn is_empty(&self) -> bool {
        !self
            .categories
            .iter()
            .any(|c| self.templates_for(c.id()).next().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlatFeeCategory, HourlyCategory, TimeWindow};

    #[test]
    fn test_pool_lookup() {
        let pool = ResourcePool::new()
            .with_category(Arc::new(HourlyCategory::bicycle(1)))
            .with_category(Arc::new(FlatFeeCategory::taxi(2)))
            .with_template(Resource::new(10, 1, TimeWindow::new(540.0, 1080.0)))
            .with_template(Resource::new(11, 1, TimeWindow::new(720.0, 1260.0)))
            .with_template(Resource::new(20, 2, None));
        assert_eq!(pool.categories().len(), 2);
        assert!(pool.category(1).expect("present").is_hourly());
        assert!(pool.category(3).is_none());
        assert_eq!(pool.templates_for(1).count(), 2);
        assert_eq!(pool.max_resource_id(), 20);
        assert!(!pool.is_empty());
    }

    #[test]
    fn test_pool_without_templates_is_empty() {
        let pool = ResourcePool::new().with_category(Arc::new(HourlyCategory::car(0)));
        assert!(pool.is_empty());
    }
}
