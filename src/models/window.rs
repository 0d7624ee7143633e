//! Closed time intervals in minutes of the solved day.

use serde::{Deserialize, Serialize};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// A closed interval `[start, end]` in minutes of the day.
///
/// Used for duty shifts, lunch breaks and feasible dispatch windows.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::TimeWindow;
///
/// let duty = TimeWindow::new(540.0, 1080.0).unwrap();
/// assert!(duty.contains(600.0));
/// assert!(!duty.contains(1200.0));
/// assert_eq!(duty.length(), 540.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: f64,
    end: f64,
}

impl TimeWindow {
    /// Creates a new window.
    ///
    /// Returns `None` if `start > end` or either value is non-finite.
    pub fn new(start: f64, end: f64) -> Option<Self> {
        if !start.is_finite() || !end.is_finite() || start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Earliest instant of the window.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Latest instant of the window.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Width of the window in minutes.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Returns `true` if `time` falls within this window (inclusive).
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Returns `true` if `other` lies completely inside this window.
    pub fn covers(&self, other: &TimeWindow) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Intersection of two windows, `None` when they are disjoint.
    pub fn intersect(&self, other: &TimeWindow) -> Option<TimeWindow> {
        TimeWindow::new(self.start.max(other.start), self.end.min(other.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_window() {
        let duty = TimeWindow::new(540.0, 1080.0).expect("valid");
        assert_eq!(duty.start(), 540.0);
        assert_eq!(duty.end(), 1080.0);
        assert_eq!(duty.length(), 540.0);
        assert!(duty.contains(540.0) && duty.contains(1080.0));
        assert!(!duty.contains(539.5));
        assert!(!duty.contains(1080.5));
    }

    #[test]
    fn test_rejects_reversed_or_non_finite() {
        assert!(TimeWindow::new(1080.0, 540.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 600.0).is_none());
        assert!(TimeWindow::new(600.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_single_instant() {
        let tw = TimeWindow::new(615.0, 615.0).expect("valid");
        assert!(tw.contains(615.0));
        assert_eq!(tw.length(), 0.0);
    }

    #[test]
    fn test_window_intersect() {
        let a = TimeWindow::new(0.0, 10.0).expect("valid");
        let b = TimeWindow::new(5.0, 15.0).expect("valid");
        let c = TimeWindow::new(11.0, 12.0).expect("valid");
        assert_eq!(a.intersect(&b), TimeWindow::new(5.0, 10.0));
        assert!(a.intersect(&c).is_none());
    }

    #[test]
    fn test_window_covers() {
        let lunch = TimeWindow::new(720.0, 780.0).expect("valid");
        let inside = TimeWindow::new(730.0, 760.0).expect("valid");
        let across = TimeWindow::new(700.0, 760.0).expect("valid");
        assert!(lunch.covers(&inside));
        assert!(!lunch.covers(&across));
    }
}
