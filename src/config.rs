//! Engine and fleet configuration.
//!
//! Both structures deserialize from JSON and are passed explicitly to the
//! engine; nothing is read from process-wide state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};
use crate::models::{
    CategoryId, CategoryProfile, FlatFeeCategory, FlatFeeSchedule, HourlyCategory, HourlyRate,
    Resource, ResourceCategory, ResourcePool, TimeWindow,
};
use crate::search::MAX_PERMUTATION_SIZE;

/// Tuning of the assignment and routing engine.
///
/// # Examples
///
/// ```
/// use u_dispatch::config::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "delivery_limit": 60.0 }"#).unwrap();
/// assert_eq!(config.delivery_limit, 60.0);
/// assert_eq!(config.max_exact_stops, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minutes between placing an order and its delivery deadline.
    pub delivery_limit: f64,
    /// Factor turning straight-line distance into road distance.
    pub distance_inflation: f64,
    /// Acceptable cost per order for hourly couriers.
    pub cost_per_order_threshold: f64,
    /// Candidates registered per minute of the day during clustering.
    pub minute_cap: usize,
    /// Largest candidate set searched exhaustively.
    pub max_exact_stops: usize,
    /// Deepest subset exclusion tried when no ordering is feasible.
    pub max_exclusion_depth: usize,
    /// Reversal budget of the 2-opt search.
    pub two_opt_rounds: usize,
    /// Current minute of the day; no route is dispatched before it.
    pub now: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delivery_limit: 90.0,
            distance_inflation: 1.3,
            cost_per_order_threshold: 6.0,
            minute_cap: 64,
            max_exact_stops: MAX_PERMUTATION_SIZE,
            max_exclusion_depth: 3,
            two_opt_rounds: 4096,
            now: None,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.delivery_limit > 0.0) {
            return Err(DispatchError::InvalidConfig(
                "delivery_limit must be positive".into(),
            ));
        }
        if !(self.distance_inflation >= 1.0) {
            return Err(DispatchError::InvalidConfig(
                "distance_inflation must be at least 1".into(),
            ));
        }
        if self.cost_per_order_threshold < 0.0 {
            return Err(DispatchError::InvalidConfig(
                "cost_per_order_threshold must not be negative".into(),
            ));
        }
        if self.minute_cap == 0 {
            return Err(DispatchError::InvalidConfig(
                "minute_cap must be positive".into(),
            ));
        }
        if self.max_exact_stops == 0 || self.max_exact_stops > MAX_PERMUTATION_SIZE {
            return Err(DispatchError::InvalidConfig(format!(
                "max_exact_stops must be within 1..={MAX_PERMUTATION_SIZE}"
            )));
        }
        Ok(())
    }

    /// Earliest dispatch instant for the solved day.
    pub fn clock(&self) -> f64 {
        self.now.unwrap_or(f64::NEG_INFINITY)
    }
}

/// A category entry of the fleet configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pricing", rename_all = "snake_case")]
pub enum CategoryConfig {
    /// Courier paid by duty time.
    Hourly {
        /// Limits, speed and handling times.
        profile: CategoryProfile,
        /// Hourly pay and minimum paid duration.
        rate: HourlyRate,
    },
    /// Carrier billed per shipment.
    FlatFee {
        /// Limits, speed and handling times.
        profile: CategoryProfile,
        /// Base fee, included distance and per-km surcharge.
        fee: FlatFeeSchedule,
    },
}

impl CategoryConfig {
    fn profile(&self) -> &CategoryProfile {
        match self {
            CategoryConfig::Hourly { profile, .. } | CategoryConfig::FlatFee { profile, .. } => {
                profile
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let p = self.profile();
        if !(p.speed_kmh > 0.0) {
            return Err(DispatchError::InvalidConfig(format!(
                "category {}: speed must be positive",
                p.id
            )));
        }
        if p.max_stops == 0 || !(p.max_weight > 0.0) || !(p.max_distance > 0.0) {
            return Err(DispatchError::InvalidConfig(format!(
                "category {}: limits must be positive",
                p.id
            )));
        }
        if let CategoryConfig::Hourly { rate, .. } = self {
            if rate.per_hour < 0.0 || rate.min_paid_minutes < 0.0 {
                return Err(DispatchError::InvalidConfig(format!(
                    "category {}: hourly rate must not be negative",
                    p.id
                )));
            }
        }
        Ok(())
    }

    /// Instantiates the category.
    pub fn build(&self) -> Arc<dyn ResourceCategory> {
        match self {
            CategoryConfig::Hourly { profile, rate } => {
                Arc::new(HourlyCategory::new(profile.clone(), *rate))
            }
            CategoryConfig::FlatFee { profile, fee } => {
                Arc::new(FlatFeeCategory::new(profile.clone(), *fee))
            }
        }
    }
}

/// A resource template of the fleet configuration. Windows are
/// `[start, end]` minutes of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Template id; couriers cloned from it get fresh ids above the
    /// largest template id.
    pub id: u64,
    /// Category of the template.
    pub category: CategoryId,
    /// Duty window; `None` means available all day.
    #[serde(default)]
    pub duty: Option<(f64, f64)>,
    /// Lunch break inside the duty window.
    #[serde(default)]
    pub lunch: Option<(f64, f64)>,
}

impl ResourceConfig {
    fn build(&self) -> Result<Resource> {
        let window = |(start, end): (f64, f64), what: &str| {
            TimeWindow::new(start, end).ok_or_else(|| {
                DispatchError::InvalidConfig(format!("resource {}: invalid {what} window", self.id))
            })
        };
        let duty = self.duty.map(|d| window(d, "duty")).transpose()?;
        let mut resource = Resource::new(self.id, self.category, duty);
        if let Some(lunch) = self.lunch {
            resource = resource.with_lunch(window(lunch, "lunch")?);
        }
        Ok(resource)
    }
}

/// Categories and resource templates available to the engine.
///
/// # Examples
///
/// ```
/// use u_dispatch::config::FleetConfig;
///
/// let json = r#"{
///   "categories": [{
///     "pricing": "flat_fee",
///     "profile": { "id": 3, "name": "taxi", "max_weight": 20.0, "max_distance": 40.0,
///                  "max_stops": 3, "speed_kmh": 25.0, "pickup_minutes": 2.0,
///                  "handin_minutes": 3.0, "insurance": 0.2 },
///     "fee": { "base_fare": 3.5, "free_distance": 3.0, "per_extra_km": 0.9,
///              "extra_stop_fee": 1.5, "dispatch_delay": 12.0 }
///   }],
///   "resources": [{ "id": 100, "category": 3 }]
/// }"#;
/// let pool = FleetConfig::from_json(json).unwrap().build().unwrap();
/// assert_eq!(pool.categories().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Category catalogue; ids must be unique.
    pub categories: Vec<CategoryConfig>,
    /// Resource templates, each of a listed category.
    pub resources: Vec<ResourceConfig>,
}

impl FleetConfig {
    /// Parses a JSON fleet description.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the description and builds the resource pool.
    pub fn build(&self) -> Result<ResourcePool> {
        let mut pool = ResourcePool::new();
        let mut seen = Vec::with_capacity(self.categories.len());
        for category in &self.categories {
            category.validate()?;
            let id = category.profile().id;
            if seen.contains(&id) {
                return Err(DispatchError::InvalidConfig(format!(
                    "category {id} defined twice"
                )));
            }
            seen.push(id);
            pool = pool.with_category(category.build());
        }
        for resource in &self.resources {
            if !seen.contains(&resource.category) {
                return Err(DispatchError::InvalidConfig(format!(
                    "resource {} refers to unknown category {}",
                    resource.id, resource.category
                )));
            }
            pool = pool.with_template(resource.build()?);
        }
        Ok(pool)
    }
}
