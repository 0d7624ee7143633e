//! Feasibility violations and the reasons reported for undelivered orders.

use serde::{Deserialize, Serialize};

/// Why a stop sequence cannot be served by a resource.
///
/// Violations are ordinary values, never errors: the caller recovers by
/// excluding the offending candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Total parcel weight exceeds the category's limit.
    OverWeight {
        /// Carried weight.
        weight: f64,
        /// Category limit.
        max_weight: f64,
    },
    /// Route distance exceeds the category's limit.
    OverDistance {
        /// Route distance.
        distance: f64,
        /// Category limit.
        max_distance: f64,
    },
    /// More stops than the category allows per route.
    TooManyStops {
        /// Requested stop count.
        stops: usize,
        /// Category limit.
        max_stops: usize,
    },
    /// Even the earliest dispatch reaches a stop after its deadline.
    DeadlineMissed {
        /// Position of the stop within the sequence.
        stop: usize,
        /// Earliest possible hand-in instant.
        arrival: f64,
        /// Stop deadline.
        deadline: f64,
    },
    /// Duty, lunch or a running delivery leave no instant to dispatch.
    NoDispatchWindow,
}

impl Violation {
    /// The reason reported to callers for this violation.
    pub fn reason(&self) -> RejectReason {
        match self {
            Violation::OverWeight { .. } => RejectReason::OverWeight,
            Violation::OverDistance { .. } => RejectReason::OverDistance,
            Violation::TooManyStops { .. } => RejectReason::TooManyStops,
            Violation::DeadlineMissed { .. } => RejectReason::MissedAssemblyDeadline,
            Violation::NoDispatchWindow => RejectReason::MissedStartDeadline,
        }
    }

    /// Sequence position of the stop that missed its deadline, if any.
    pub fn late_stop(&self) -> Option<usize> {
        match self {
            Violation::DeadlineMissed { stop, .. } => Some(*stop),
            _ => None,
        }
    }
}

/// Per-category rejection reason attached to an undeliverable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Parcel too heavy for the category.
    OverWeight,
    /// Address too far for the category.
    OverDistance,
    /// Route would exceed the category's stop limit.
    TooManyStops,
    /// Parcel is assembled too late to reach the customer in time.
    MissedAssemblyDeadline,
    /// No resource can start early enough within its duty schedule.
    MissedStartDeadline,
    /// The category is not available, or had no capacity left.
    NoAvailableResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_reason() {
        let v = Violation::OverWeight {
            weight: 30.0,
            max_weight: 10.0,
        };
        assert_eq!(v.reason(), RejectReason::OverWeight);
        assert_eq!(v.late_stop(), None);
        assert_eq!(
            Violation::NoDispatchWindow.reason(),
            RejectReason::MissedStartDeadline
        );
    }

    #[test]
    fn test_violation_late_stop() {
        let v = Violation::DeadlineMissed {
            stop: 2,
            arrival: 700.0,
            deadline: 690.0,
        };
        assert_eq!(v.late_stop(), Some(2));
        assert_eq!(v.reason(), RejectReason::MissedAssemblyDeadline);
    }

    #[test]
    fn test_reject_reason_serde() {
        let json = serde_json::to_string(&RejectReason::NoAvailableResource).expect("serialize");
        assert_eq!(json, "\"no_available_resource\"");
    }
}
