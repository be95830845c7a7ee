//! Scroll-progress percentage with explicit degenerate-case handling.
//!
//! The progress bar's width is the fraction of the scrollable range
//! already covered. A page shorter than the viewport has no scrollable
//! range at all; that case reads as 0% instead of dividing by zero.

/// Percentage of the scrollable range covered at `offset_y`.
///
/// `max_scroll` is the difference between document height and viewport
/// height. Non-positive or non-finite inputs yield 0.0; the result is
/// clamped to `[0.0, 100.0]`.
#[must_use]
pub fn progress_percent(offset_y: f64, max_scroll: f64) -> f64 {
    if !offset_y.is_finite() || !max_scroll.is_finite() || max_scroll <= 0.0 {
        return 0.0;
    }
    (offset_y / max_scroll * 100.0).clamp(0.0, 100.0)
}

/// Suppresses redundant width writes between frames.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    last_percent: Option<f64>,
}

impl ProgressTracker {
    /// Create a tracker that has written nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the percentage and report it only when it changed.
    pub fn update(&mut self, offset_y: f64, max_scroll: f64) -> Option<f64> {
        let percent = progress_percent(offset_y, max_scroll);
        if self.last_percent == Some(percent) {
            return None;
        }
        self.last_percent = Some(percent);
        Some(percent)
    }

    /// The last reported percentage, 0.0 before any update.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.last_percent.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn endpoints() {
        assert_eq!(progress_percent(0.0, 2000.0), 0.0);
        assert_eq!(progress_percent(2000.0, 2000.0), 100.0);
        assert_eq!(progress_percent(500.0, 2000.0), 25.0);
    }

    #[test]
    fn zero_range_reads_zero() {
        assert_eq!(progress_percent(0.0, 0.0), 0.0);
        assert_eq!(progress_percent(100.0, 0.0), 0.0);
        assert_eq!(progress_percent(100.0, -50.0), 0.0);
    }

    #[test]
    fn non_finite_inputs_read_zero() {
        assert_eq!(progress_percent(f64::NAN, 100.0), 0.0);
        assert_eq!(progress_percent(10.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(10.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn overshoot_clamps() {
        // Rubber-band scrolling can report offsets past the range.
        assert_eq!(progress_percent(2500.0, 2000.0), 100.0);
        assert_eq!(progress_percent(-10.0, 2000.0), 0.0);
    }

    #[test]
    fn tracker_suppresses_repeats() {
        let mut t = ProgressTracker::new();
        assert_eq!(t.update(500.0, 2000.0), Some(25.0));
        assert_eq!(t.update(500.0, 2000.0), None);
        assert_eq!(t.update(600.0, 2000.0), Some(30.0));
        assert_eq!(t.percent(), 30.0);
    }

    #[test]
    fn tracker_reports_initial_zero_once() {
        let mut t = ProgressTracker::new();
        assert_eq!(t.update(0.0, 2000.0), Some(0.0));
        assert_eq!(t.update(0.0, 0.0), None);
    }

    proptest! {
        #[test]
        fn always_in_range(offset in proptest::num::f64::ANY, max in proptest::num::f64::ANY) {
            let percent = progress_percent(offset, max);
            prop_assert!((0.0..=100.0).contains(&percent));
        }

        #[test]
        fn monotonic_in_offset(
            max in 1.0f64..1e7,
            a in 0.0f64..1e7,
            b in 0.0f64..1e7,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(progress_percent(lo, max) <= progress_percent(hi, max));
        }
    }
}
