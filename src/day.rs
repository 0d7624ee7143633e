//! Loading timestamped order records into per-day order slices.
//!
//! Orders are solved one calendar day at a time. A record belongs to the
//! day of its ready stamp; its times become minutes since that day's
//! midnight, so an order placed the evening before gets a negative placed
//! time.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::distance::GeoPoint;
use crate::error::Result;
use crate::models::{CategoryId, Order};

/// An order as received from the upstream feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order id, unique across the feed.
    pub id: u64,
    /// Shop the order ships from.
    pub shop_id: u64,
    /// Delivery address.
    pub location: GeoPoint,
    /// Parcel weight (kg).
    pub weight: f64,
    /// When the customer placed the order.
    pub placed_at: NaiveDateTime,
    /// When the parcel is assembled and may leave the shop.
    pub ready_at: NaiveDateTime,
    /// Categories allowed to carry the order; empty allows none.
    #[serde(default)]
    pub categories: Vec<CategoryId>,
}

impl OrderRecord {
    /// Parses a JSON array of records.
    pub fn parse_many(json: &str) -> Result<Vec<OrderRecord>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Converts the record into an order of `date`, due
    /// `config.delivery_limit` minutes after it was placed.
    pub fn to_order(&self, date: NaiveDate, config: &EngineConfig) -> Order {
        let placed = minute_of_day(date, self.placed_at);
        Order::new(
            self.id,
            self.shop_id,
            self.location,
            self.weight,
            minute_of_day(date, self.ready_at),
            placed,
            placed + config.delivery_limit,
        )
        .with_categories(self.categories.clone())
    }
}

/// Minutes from midnight of `date` to `at`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_dispatch::day::minute_of_day;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let at = date.and_hms_opt(10, 15, 30).unwrap();
/// assert_eq!(minute_of_day(date, at), 615.5);
/// ```
pub fn minute_of_day(date: NaiveDate, at: NaiveDateTime) -> f64 {
    let midnight = date.and_time(NaiveTime::MIN);
    (at - midnight).num_milliseconds() as f64 / 60_000.0
}

/// The orders of one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDay {
    /// Calendar date the minute-of-day times are relative to.
    pub date: NaiveDate,
    /// Orders sorted by ready time, then id.
    pub orders: Vec<Order>,
}

impl OrderDay {
    /// Clears every completion flag before the day is solved again.
    pub fn reset(&mut self) {
        self.orders.iter_mut().for_each(Order::reset);
    }

    /// The orders shipped from one shop.
    pub fn shop_orders(&self, shop_id: u64) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.shop_id() == shop_id)
            .cloned()
            .collect()
    }
}

/// Groups records by the calendar date of their ready stamp, in date
/// order. Orders of a day are sorted by ready time, then ID, and start
/// uncompleted.
pub fn group_by_day(records: &[OrderRecord], config: &EngineConfig) -> Vec<OrderDay> {
    let mut days: BTreeMap<NaiveDate, Vec<Order>> = BTreeMap::new();
    for record in records {
        let date = record.ready_at.date();
        days.entry(date)
            .or_default()
            .push(record.to_order(date, config));
    }
    days.into_iter()
        .map(|(date, mut orders)| {
            orders.sort_by(|a, b| {
                a.ready_time()
                    .total_cmp(&b.ready_time())
                    .then(a.id().cmp(&b.id()))
            });
            OrderDay { date, orders }
        })
        .collect()
}
