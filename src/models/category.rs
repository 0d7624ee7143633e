//! Resource categories: capability profiles and their cost functions.
//!
//! A category describes one kind of vehicle (on foot, bicycle, car, taxi).
//! Couriers paid by the hour and flat-fee carriers share one
//! [`ResourceCategory`] trait; concrete categories are instances chosen at
//! configuration time.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Violation;

/// Identifies a resource category within a fleet configuration.
pub type CategoryId = usize;

/// Capability limits and handling times shared by every category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    /// Category ID referenced by orders, shops and resources.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Maximum carried weight per route (kg).
    pub max_weight: f64,
    /// Maximum route distance (km).
    pub max_distance: f64,
    /// Maximum number of stops per route.
    pub max_stops: usize,
    /// Average speed (km/h).
    pub speed_kmh: f64,
    /// Minutes spent at the shop loading each parcel.
    pub pickup_minutes: f64,
    /// Minutes spent at each stop handing the parcel in.
    pub handin_minutes: f64,
    /// Insurance surcharge per delivered order.
    pub insurance: f64,
}

impl CategoryProfile {
    /// Minutes needed to cover `km` at the average speed.
    pub fn travel_minutes(&self, km: f64) -> f64 {
        km / self.speed_kmh * 60.0
    }

    fn check_load(&self, stops: usize, weight: f64) -> Result<(), Violation> {
        if stops == 0 || stops > self.max_stops {
            return Err(Violation::TooManyStops {
                stops,
                max_stops: self.max_stops,
            });
        }
        if weight > self.max_weight {
            return Err(Violation::OverWeight {
                weight,
                max_weight: self.max_weight,
            });
        }
        Ok(())
    }

    fn check_distance(&self, distance: f64) -> Result<(), Violation> {
        if distance > self.max_distance {
            return Err(Violation::OverDistance {
                distance,
                max_distance: self.max_distance,
            });
        }
        Ok(())
    }

    /// Hand-in instants (relative to dispatch) and cumulative distances for
    /// each stop. Every parcel is loaded before leaving the shop.
    fn timeline(&self, legs: &[f64], delay: f64) -> (Vec<f64>, Vec<f64>) {
        let stops = legs.len() - 1;
        let mut arrivals = Vec::with_capacity(stops);
        let mut distances = Vec::with_capacity(stops);
        let mut time = delay + stops as f64 * self.pickup_minutes;
        let mut distance = 0.0;
        for &leg in &legs[..stops] {
            distance += leg;
            time += self.travel_minutes(leg) + self.handin_minutes;
            arrivals.push(time);
            distances.push(distance);
        }
        (arrivals, distances)
    }
}

/// Timing and cost of one stop sequence, relative to its dispatch instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Minutes from dispatch until each stop's parcel is handed in.
    pub arrivals: Vec<f64>,
    /// Distance travelled up to each stop.
    pub cumulative_distance: Vec<f64>,
    /// Billed route distance.
    pub distance: f64,
    /// Minutes from dispatch to the last hand-in.
    pub delivery_time: f64,
    /// Minutes the resource is occupied by this route.
    pub execution_time: f64,
    /// Cost of the route.
    pub cost: f64,
}

/// Hourly pay terms of courier categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyRate {
    /// Pay per hour on duty.
    pub per_hour: f64,
    /// Minimum paid shift length in minutes.
    pub min_paid_minutes: f64,
}

impl HourlyRate {
    /// Pay for `minutes` of work, never less than the minimum paid shift.
    pub fn shift_pay(&self, minutes: f64) -> f64 {
        self.per_hour * minutes.max(self.min_paid_minutes) / 60.0
    }
}

/// Per-shipment tariff of flat-fee carriers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatFeeSchedule {
    /// Fare charged for every shipment.
    pub base_fare: f64,
    /// Distance included in the base fare (km).
    pub free_distance: f64,
    /// Charge per kilometre beyond the free distance.
    pub per_extra_km: f64,
    /// Surcharge for each stop after the first.
    pub extra_stop_fee: f64,
    /// Minutes between ordering the carrier and its arrival at the shop.
    pub dispatch_delay: f64,
}

/// A resource category: capability profile plus cost model.
pub trait ResourceCategory: fmt::Debug + Send + Sync {
    /// Capability limits and handling times.
    fn profile(&self) -> &CategoryProfile;

    /// Hourly pay terms, `None` for flat-fee carriers.
    fn hourly_rate(&self) -> Option<&HourlyRate>;

    /// Timing and cost of the closed tour whose legs are
    /// shop → stop₁ → … → stopₙ → shop.
    fn multi_stop(&self, legs: &[f64], weight: f64) -> Result<Trip, Violation>;

    /// Timing and cost of a single-stop round trip.
    fn single_stop(&self, distance: f64, weight: f64) -> Result<Trip, Violation> {
        self.multi_stop(&[distance, distance], weight)
    }

    /// Category ID.
    fn id(&self) -> CategoryId {
        self.profile().id
    }

    /// Returns `true` for categories billed by duty time.
    fn is_hourly(&self) -> bool {
        self.hourly_rate().is_some()
    }
}

/// Couriers paid by the hour who return to the shop after each route.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{HourlyCategory, ResourceCategory};
///
/// let bike = HourlyCategory::bicycle(1);
/// let trip = bike.single_stop(2.0, 3.0).unwrap();
/// assert!(trip.execution_time > trip.delivery_time);
/// assert!(bike.is_hourly());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyCategory {
    /// Capability profile.
    pub profile: CategoryProfile,
    /// Pay terms.
    pub rate: HourlyRate,
}

impl HourlyCategory {
    /// Creates an hourly category.
    pub fn new(profile: CategoryProfile, rate: HourlyRate) -> Self {
        Self { profile, rate }
    }

    /// Walking courier.
    pub fn on_foot(id: CategoryId) -> Self {
        Self::new(
            CategoryProfile {
                id,
                name: "on_foot".into(),
                max_weight: 10.0,
                max_distance: 6.0,
                max_stops: 4,
                speed_kmh: 5.0,
                pickup_minutes: 2.0,
                handin_minutes: 3.0,
                insurance: 0.1,
            },
            HourlyRate {
                per_hour: 8.0,
                min_paid_minutes: 240.0,
            },
        )
    }

    /// Bicycle courier.
    pub fn bicycle(id: CategoryId) -> Self {
        Self::new(
            CategoryProfile {
                id,
                name: "bicycle".into(),
                max_weight: 15.0,
                max_distance: 20.0,
                max_stops: 6,
                speed_kmh: 14.0,
                pickup_minutes: 2.0,
                handin_minutes: 3.0,
                insurance: 0.1,
            },
            HourlyRate {
                per_hour: 10.0,
                min_paid_minutes: 240.0,
            },
        )
    }

    /// Courier driving a private car.
    pub fn car(id: CategoryId) -> Self {
        Self::new(
            CategoryProfile {
                id,
                name: "car".into(),
                max_weight: 40.0,
                max_distance: 60.0,
                max_stops: 10,
                speed_kmh: 28.0,
                pickup_minutes: 2.0,
                handin_minutes: 4.0,
                insurance: 0.2,
            },
            HourlyRate {
                per_hour: 14.0,
                min_paid_minutes: 240.0,
            },
        )
    }
}

impl ResourceCategory for HourlyCategory {
    fn profile(&self) -> &CategoryProfile {
        &self.profile
    }

    fn hourly_rate(&self) -> Option<&HourlyRate> {
        Some(&self.rate)
    }

    fn multi_stop(&self, legs: &[f64], weight: f64) -> Result<Trip, Violation> {
        let stops = legs.len().saturating_sub(1);
        self.profile.check_load(stops, weight)?;
        let distance: f64 = legs.iter().sum();
        self.profile.check_distance(distance)?;

        let (arrivals, cumulative_distance) = self.profile.timeline(legs, 0.0);
        let delivery_time = arrivals.last().copied().unwrap_or(0.0);
        let execution_time = delivery_time + self.profile.travel_minutes(legs[stops]);
        let cost =
            self.rate.per_hour * execution_time / 60.0 + self.profile.insurance * stops as f64;

        Ok(Trip {
            arrivals,
            cumulative_distance,
            distance,
            delivery_time,
            execution_time,
            cost,
        })
    }
}

/// Carriers billed per shipment, such as ride-hailing taxis.
///
/// The carrier does not come back, so execution time equals delivery time
/// and only the outbound path counts against distance and fare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatFeeCategory {
    /// Capability profile.
    pub profile: CategoryProfile,
    /// Tariff.
    pub fee: FlatFeeSchedule,
}

impl FlatFeeCategory {
    /// Creates a flat-fee category.
    pub fn new(profile: CategoryProfile, fee: FlatFeeSchedule) -> Self {
        Self { profile, fee }
    }

    /// Ride-hailing taxi.
    pub fn taxi(id: CategoryId) -> Self {
        Self::new(
            CategoryProfile {
                id,
                name: "taxi".into(),
                max_weight: 20.0,
                max_distance: 40.0,
                max_stops: 3,
                speed_kmh: 25.0,
                pickup_minutes: 2.0,
                handin_minutes: 3.0,
                insurance: 0.2,
            },
            FlatFeeSchedule {
                base_fare: 3.5,
                free_distance: 3.0,
                per_extra_km: 0.9,
                extra_stop_fee: 1.5,
                dispatch_delay: 12.0,
            },
        )
    }
}

impl ResourceCategory for FlatFeeCategory {
    fn profile(&self) -> &CategoryProfile {
        &self.profile
    }

    fn hourly_rate(&self) -> Option<&HourlyRate> {
        None
    }

    fn multi_stop(&self, legs: &[f64], weight: f64) -> Result<Trip, Violation> {
        let stops = legs.len().saturating_sub(1);
        self.profile.check_load(stops, weight)?;
        let distance: f64 = legs[..stops].iter().sum();
        self.profile.check_distance(distance)?;

        let (arrivals, cumulative_distance) = self.profile.timeline(legs, self.fee.dispatch_delay);
        let delivery_time = arrivals.last().copied().unwrap_or(0.0);
        let cost = self.fee.base_fare
            + (distance - self.fee.free_distance).max(0.0) * self.fee.per_extra_km
            + self.fee.extra_stop_fee * (stops - 1) as f64
            + self.profile.insurance * stops as f64;

        Ok(Trip {
            arrivals,
            cumulative_distance,
            distance,
            delivery_time,
            execution_time: delivery_time,
            cost,
        })
    }
}
