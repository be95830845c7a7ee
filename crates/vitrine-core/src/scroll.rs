//! Scroll sampling, frame coalescing, and navbar state.
//!
//! # Design
//!
//! Browser scroll events fire at native event rate, which can exceed the
//! display rate by an order of magnitude during fling scrolling. Handlers
//! therefore never do layout work: they only record the newest offset into
//! a [`ScrollCoalescer`]. The animation-frame loop drains the coalescer at
//! most once per frame and runs every scroll-linked effect off that single
//! sample.
//!
//! ```text
//!  scroll events (unbounded rate)          frame loop (display rate)
//!  ──────────────────────────────►  push  ───────────────────────────►
//!        s1  s2  s3  s4                        take() -> s4
//!                                              navbar / sections /
//!                                              parallax / progress
//! ```
//!
//! Only the latest sample matters: every consumer derives its state from
//! the absolute offset, so intermediate samples carry no information the
//! final one lacks. Direction detection compares against the previously
//! processed sample, which is exactly what a per-event comparison would
//! have converged to by frame end.
//!
//! # Invariants
//!
//! - [`ScrollCoalescer::take`] returns at most one sample per call and
//!   leaves the slot empty.
//! - Equal consecutive offsets classify as [`ScrollDirection::NonDownward`].
//! - [`NavbarState::apply`] reports a change only when a flag actually
//!   flipped, so DOM writes stay proportional to visual changes.

use crate::config::EffectConfig;

// ---------------------------------------------------------------------------
// Samples and coalescing
// ---------------------------------------------------------------------------

/// One observed scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    /// Vertical document offset in pixels.
    pub offset_y: f64,
}

/// Latest-wins slot between the scroll listener and the frame loop.
///
/// Counters record how much event pressure the coalescer absorbed; they are
/// diagnostics only and never affect behavior.
#[derive(Debug, Default)]
pub struct ScrollCoalescer {
    pending: Option<ScrollSample>,
    samples_seen: u64,
    frames_processed: u64,
}

impl ScrollCoalescer {
    /// Create an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample, replacing any unprocessed predecessor.
    pub fn push(&mut self, sample: ScrollSample) {
        self.samples_seen = self.samples_seen.saturating_add(1);
        self.pending = Some(sample);
    }

    /// Drain the pending sample, if any.
    pub fn take(&mut self) -> Option<ScrollSample> {
        let sample = self.pending.take();
        if sample.is_some() {
            self.frames_processed = self.frames_processed.saturating_add(1);
        }
        sample
    }

    /// Whether a sample is waiting.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Total samples pushed since creation.
    #[must_use]
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    /// Total frames that actually drained a sample.
    #[must_use]
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}

// ---------------------------------------------------------------------------
// Direction tracking
// ---------------------------------------------------------------------------

/// Scroll direction classification for navbar hiding.
///
/// There are deliberately two cases, not three: the navbar only hides on
/// downward movement, so "up" and "unchanged" behave identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Offset strictly increased since the previous sample.
    Downward,
    /// Offset decreased or is unchanged.
    NonDownward,
}

/// Remembers the previously processed offset and classifies new samples.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    last_offset_y: f64,
}

impl ScrollTracker {
    /// Create a tracker with the page assumed at the top.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `offset_y` against the previous sample and remember it.
    ///
    /// Non-finite offsets are ignored for comparison and do not update the
    /// remembered position.
    pub fn observe(&mut self, offset_y: f64) -> ScrollDirection {
        if !offset_y.is_finite() {
            return ScrollDirection::NonDownward;
        }
        let direction = if offset_y > self.last_offset_y {
            ScrollDirection::Downward
        } else {
            ScrollDirection::NonDownward
        };
        self.last_offset_y = offset_y;
        direction
    }

    /// The most recently observed offset.
    #[must_use]
    pub fn last_offset_y(&self) -> f64 {
        self.last_offset_y
    }
}

// ---------------------------------------------------------------------------
// Navbar state
// ---------------------------------------------------------------------------

/// Flags that changed in one [`NavbarState::apply`] call.
///
/// `None` fields did not change. The caller applies exactly the reported
/// transitions and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavbarChange {
    /// New value of the "scrolled" styling flag, if it flipped.
    pub scrolled: Option<bool>,
    /// New value of the hidden (translated off-screen) flag, if it flipped.
    pub hidden: Option<bool>,
}

/// Navbar visual state derived from scroll position and direction.
///
/// - `scrolled` is set iff the offset exceeds the scrolled threshold.
/// - `hidden` is set iff the movement is downward and the offset exceeds
///   the hide threshold. Upward movement or a tie reveals the bar at any
///   offset.
#[derive(Debug)]
pub struct NavbarState {
    scrolled: bool,
    hidden: bool,
    scrolled_threshold_px: f64,
    hide_threshold_px: f64,
}

impl NavbarState {
    /// Create the initial (visible, unscrolled) state.
    #[must_use]
    pub fn new(config: &EffectConfig) -> Self {
        Self {
            scrolled: false,
            hidden: false,
            scrolled_threshold_px: config.navbar_scrolled_threshold_px,
            hide_threshold_px: config.navbar_hide_threshold_px,
        }
    }

    /// Fold one processed sample into the state.
    ///
    /// Returns `Some` only when at least one flag flipped.
    pub fn apply(&mut self, offset_y: f64, direction: ScrollDirection) -> Option<NavbarChange> {
        let scrolled = offset_y > self.scrolled_threshold_px;
        let hidden =
            direction == ScrollDirection::Downward && offset_y > self.hide_threshold_px;

        let change = NavbarChange {
            scrolled: (scrolled != self.scrolled).then_some(scrolled),
            hidden: (hidden != self.hidden).then_some(hidden),
        };
        self.scrolled = scrolled;
        self.hidden = hidden;

        if change.scrolled.is_none() && change.hidden.is_none() {
            None
        } else {
            Some(change)
        }
    }

    /// Whether the navbar currently carries the scrolled styling.
    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Whether the navbar is currently translated off-screen.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn navbar() -> NavbarState {
        NavbarState::new(&EffectConfig::default())
    }

    #[test]
    fn coalescer_latest_sample_wins() {
        let mut c = ScrollCoalescer::new();
        c.push(ScrollSample { offset_y: 10.0 });
        c.push(ScrollSample { offset_y: 20.0 });
        c.push(ScrollSample { offset_y: 30.0 });
        assert_eq!(c.take(), Some(ScrollSample { offset_y: 30.0 }));
        assert_eq!(c.take(), None);
    }

    #[test]
    fn coalescer_counts_pressure() {
        let mut c = ScrollCoalescer::new();
        for i in 0..5 {
            c.push(ScrollSample { offset_y: f64::from(i) });
        }
        assert!(c.has_pending());
        let _ = c.take();
        let _ = c.take();
        assert_eq!(c.samples_seen(), 5);
        assert_eq!(c.frames_processed(), 1);
    }

    #[test]
    fn tracker_classifies_direction() {
        let mut t = ScrollTracker::new();
        assert_eq!(t.observe(100.0), ScrollDirection::Downward);
        assert_eq!(t.observe(50.0), ScrollDirection::NonDownward);
        assert_eq!(t.observe(50.0), ScrollDirection::NonDownward);
        assert_eq!(t.observe(51.0), ScrollDirection::Downward);
        assert_eq!(t.last_offset_y(), 51.0);
    }

    #[test]
    fn tracker_ignores_non_finite_offsets() {
        let mut t = ScrollTracker::new();
        assert_eq!(t.observe(100.0), ScrollDirection::Downward);
        assert_eq!(t.observe(f64::NAN), ScrollDirection::NonDownward);
        assert_eq!(t.last_offset_y(), 100.0);
    }

    #[test]
    fn scrolled_flag_follows_threshold() {
        let mut n = navbar();
        assert_eq!(n.apply(50.0, ScrollDirection::Downward), None);
        assert!(!n.is_scrolled());

        let change = n.apply(50.5, ScrollDirection::Downward).unwrap();
        assert_eq!(change.scrolled, Some(true));
        assert!(n.is_scrolled());

        let change = n.apply(10.0, ScrollDirection::NonDownward).unwrap();
        assert_eq!(change.scrolled, Some(false));
    }

    #[test]
    fn hides_only_downward_past_threshold() {
        let mut n = navbar();
        // Downward but not past the hide threshold.
        let change = n.apply(150.0, ScrollDirection::Downward).unwrap();
        assert_eq!(change.hidden, None);
        assert!(!n.is_hidden());

        // Downward past the threshold.
        let change = n.apply(250.0, ScrollDirection::Downward).unwrap();
        assert_eq!(change.hidden, Some(true));
        assert!(n.is_hidden());

        // A tie is non-downward and reveals the bar.
        let change = n.apply(250.0, ScrollDirection::NonDownward).unwrap();
        assert_eq!(change.hidden, Some(false));
        assert!(!n.is_hidden());
    }

    #[test]
    fn apply_reports_nothing_when_steady() {
        let mut n = navbar();
        assert!(n.apply(300.0, ScrollDirection::Downward).is_some());
        assert_eq!(n.apply(310.0, ScrollDirection::Downward), None);
        assert_eq!(n.apply(320.0, ScrollDirection::Downward), None);
    }

    #[test]
    fn both_flags_can_flip_in_one_sample() {
        let mut n = navbar();
        let change = n.apply(500.0, ScrollDirection::Downward).unwrap();
        assert_eq!(change.scrolled, Some(true));
        assert_eq!(change.hidden, Some(true));
    }

    proptest! {
        #[test]
        fn hidden_implies_downward_and_past_threshold(
            offsets in proptest::collection::vec(0.0f64..5000.0, 1..50)
        ) {
            let mut tracker = ScrollTracker::new();
            let mut nav = navbar();
            for offset in offsets {
                let direction = tracker.observe(offset);
                let _ = nav.apply(offset, direction);
                if nav.is_hidden() {
                    prop_assert_eq!(direction, ScrollDirection::Downward);
                    prop_assert!(offset > 200.0);
                }
                prop_assert_eq!(nav.is_scrolled(), offset > 50.0);
            }
        }

        #[test]
        fn coalescer_take_returns_last_push(
            offsets in proptest::collection::vec(-1000.0f64..10000.0, 1..100)
        ) {
            let mut c = ScrollCoalescer::new();
            for &offset in &offsets {
                c.push(ScrollSample { offset_y: offset });
            }
            let last = *offsets.last().unwrap();
            prop_assert_eq!(c.take(), Some(ScrollSample { offset_y: last }));
            prop_assert_eq!(c.take(), None);
        }
    }
}
