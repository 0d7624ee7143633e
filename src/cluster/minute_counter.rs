//! Per-minute overlap counter for candidate dispatch windows.

use crate::models::{TimeWindow, MINUTES_PER_DAY};

const DAY_MINUTES: usize = MINUTES_PER_DAY as usize;

/// Records which candidates may be dispatched at each minute of the day.
///
/// Every minute holds at most `cap` candidates; registrations beyond the
/// cap are ignored for that minute. Windows are clipped to the day.
///
/// # Examples
///
/// ```
/// use u_dispatch::cluster::MinuteCounter;
/// use u_dispatch::models::TimeWindow;
///
/// let mut counter = MinuteCounter::new(8);
/// counter.register(0, &TimeWindow::new(600.0, 620.0).unwrap());
/// counter.register(1, &TimeWindow::new(610.0, 640.0).unwrap());
/// let window = TimeWindow::new(600.0, 620.0).unwrap();
/// assert_eq!(counter.busiest_minute(&window), Some(610));
/// assert_eq!(counter.members(610), &[0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct MinuteCounter {
    cap: usize,
    slots: Vec<Vec<usize>>,
}

impl MinuteCounter {
    /// Creates an empty counter with the given per-minute cap.
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            slots: vec![Vec::new(); DAY_MINUTES],
        }
    }

    /// Minutes of the day touched by `window`, if any.
    fn minutes(window: &TimeWindow) -> Option<std::ops::RangeInclusive<usize>> {
        let first = window.start().floor().max(0.0);
        let last = window.end().floor().min(MINUTES_PER_DAY - 1.0);
        if first > last {
            return None;
        }
        Some(first as usize..=last as usize)
    }

    /// Registers `candidate` at every minute its window covers.
    pub fn register(&mut self, candidate: usize, window: &TimeWindow) {
        let Some(range) = Self::minutes(window) else {
            return;
        };
        for minute in range {
            let slot = &mut self.slots[minute];
            if slot.len() < self.cap {
                slot.push(candidate);
            }
        }
    }

    /// Number of candidates registered at `minute`.
    pub fn count(&self, minute: usize) -> usize {
        self.slots.get(minute).map_or(0, Vec::len)
    }

    /// Candidates registered at `minute`, in registration order.
    pub fn members(&self, minute: usize) -> &[usize] {
        self.slots.get(minute).map_or(&[], Vec::as_slice)
    }

    /// Earliest minute of `window` with the highest registration count.
    pub fn busiest_minute(&self, window: &TimeWindow) -> Option<usize> {
        let range = Self::minutes(window)?;
        let mut best: Option<(usize, usize)> = None;
        for minute in range {
            let count = self.count(minute);
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((minute, count));
            }
        }
        best.map(|(minute, _)| minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(start: f64, end: f64) -> TimeWindow {
        TimeWindow::new(start, end).expect("valid")
    }

    #[test]
    fn test_register_and_count() {
        let mut c = MinuteCounter::new(4);
        c.register(3, &w(10.0, 12.0));
        assert_eq!(c.count(9), 0);
        assert_eq!(c.count(10), 1);
        assert_eq!(c.count(12), 1);
        assert_eq!(c.count(13), 0);
    }

    #[test]
    fn test_cap_is_respected() {
        let mut c = MinuteCounter::new(2);
        for i in 0..5 {
            c.register(i, &w(100.0, 100.0));
        }
        assert_eq!(c.members(100), &[0, 1]);
    }

    #[test]
    fn test_window_clipped_to_day() {
        let mut c = MinuteCounter::new(4);
        c.register(0, &w(-30.0, 1.0));
        c.register(1, &w(1430.0, 1500.0));
        assert_eq!(c.count(0), 1);
        assert_eq!(c.count(1439), 1);
        assert_eq!(c.busiest_minute(&w(-30.0, -10.0)), None);
        assert_eq!(c.busiest_minute(&w(2000.0, 2100.0)), None);
    }

    #[test]
    fn test_fractional_window_inside_one_minute() {
        let mut c = MinuteCounter::new(4);
        c.register(0, &w(10.2, 10.8));
        assert_eq!(c.busiest_minute(&w(10.2, 10.8)), Some(10));
        assert_eq!(c.count(10), 1);
        assert_eq!(c.count(11), 0);
    }

    #[test]
    fn test_busiest_minute_prefers_earliest() {
        let mut c = MinuteCounter::new(4);
        c.register(0, &w(0.0, 30.0));
        c.register(1, &w(5.0, 8.0));
        c.register(2, &w(20.0, 25.0));
        assert_eq!(c.busiest_minute(&w(0.0, 30.0)), Some(5));
    }
}
