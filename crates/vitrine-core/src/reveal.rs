//! Entrance-animation staggering and one-shot visibility bookkeeping.
//!
//! Content cards fade in the first time they become sufficiently visible.
//! The staggered delay spreads initial reveals so simultaneously-visible
//! cards cascade instead of popping in together. Visibility itself comes
//! from intersection observers wired by the web layer; this module owns
//! the observer parameters and the one-shot guarantee.

// ---------------------------------------------------------------------------
// Observer profiles
// ---------------------------------------------------------------------------

/// Parameters for one intersection watcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverProfile {
    /// Fraction of the element that must be visible to trigger.
    pub threshold: f64,
    /// Margin applied to the viewport for intersection purposes.
    pub root_margin: &'static str,
    /// Whether the watcher stops observing an element after its first
    /// trigger.
    pub unobserve_on_entry: bool,
}

/// Entrance watcher: trigger once an element is 10% visible and clear of
/// the bottom 50px. Keeps observing; the class addition is idempotent.
pub const ENTRANCE_PROFILE: ObserverProfile = ObserverProfile {
    threshold: 0.1,
    root_margin: "0px 0px -50px 0px",
    unobserve_on_entry: false,
};

/// Generic "animate" watcher: larger bottom margin, strict one-shot
/// (unobserves each element on first trigger).
pub const ANIMATE_PROFILE: ObserverProfile = ObserverProfile {
    threshold: 0.1,
    root_margin: "0px 0px -100px 0px",
    unobserve_on_entry: true,
};

// ---------------------------------------------------------------------------
// Staggering
// ---------------------------------------------------------------------------

/// Entrance-animation delay for the element at `index`.
#[must_use]
pub fn stagger_delay_ms(index: usize, step_ms: u64) -> u64 {
    (index as u64).saturating_mul(step_ms)
}

/// Render a millisecond delay as a CSS seconds value ("0.3s").
#[must_use]
pub fn stagger_delay_css(index: usize, step_ms: u64) -> String {
    let seconds = stagger_delay_ms(index, step_ms) as f64 / 1000.0;
    format!("{seconds}s")
}

// ---------------------------------------------------------------------------
// One-shot tracking
// ---------------------------------------------------------------------------

/// Index-addressed one-shot visibility set.
///
/// Marking is idempotent: only the first mark per index reports a
/// transition, and nothing ever un-marks.
#[derive(Debug, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    /// Create a tracker for `len` observed elements.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            revealed: vec![false; len],
        }
    }

    /// Mark `index` visible; `true` only on the first transition.
    ///
    /// Out-of-range indices grow the set, so late-registered elements
    /// still track correctly.
    pub fn mark_visible(&mut self, index: usize) -> bool {
        if index >= self.revealed.len() {
            self.revealed.resize(index + 1, false);
        }
        let first = !self.revealed[index];
        self.revealed[index] = true;
        first
    }

    /// Whether `index` has ever been marked visible.
    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// How many elements have been revealed.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.revealed.iter().filter(|&&v| v).count()
    }

    /// Number of tracked slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    /// Whether the tracker has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_scales_with_index() {
        assert_eq!(stagger_delay_ms(0, 100), 0);
        assert_eq!(stagger_delay_ms(3, 100), 300);
        assert_eq!(stagger_delay_ms(11, 100), 1100);
    }

    #[test]
    fn stagger_css_renders_seconds() {
        assert_eq!(stagger_delay_css(0, 100), "0s");
        assert_eq!(stagger_delay_css(1, 100), "0.1s");
        assert_eq!(stagger_delay_css(7, 100), "0.7s");
        assert_eq!(stagger_delay_css(12, 100), "1.2s");
    }

    #[test]
    fn stagger_saturates() {
        assert_eq!(stagger_delay_ms(usize::MAX, u64::MAX), u64::MAX);
    }

    #[test]
    fn reveal_is_one_shot_per_index() {
        let mut tracker = RevealTracker::with_len(3);
        assert!(!tracker.is_visible(1));
        assert!(tracker.mark_visible(1));
        assert!(tracker.is_visible(1));

        // Scrolling away and back re-fires the observer; the mark stays.
        assert!(!tracker.mark_visible(1));
        assert!(tracker.is_visible(1));
        assert_eq!(tracker.visible_count(), 1);
    }

    #[test]
    fn out_of_range_marks_grow_the_set() {
        let mut tracker = RevealTracker::with_len(2);
        assert!(tracker.mark_visible(5));
        assert_eq!(tracker.len(), 6);
        assert!(tracker.is_visible(5));
        assert!(!tracker.is_visible(4));
    }

    #[test]
    fn profiles_match_the_wired_observers() {
        assert_eq!(ENTRANCE_PROFILE.threshold, 0.1);
        assert_eq!(ENTRANCE_PROFILE.root_margin, "0px 0px -50px 0px");
        assert!(!ENTRANCE_PROFILE.unobserve_on_entry);

        assert_eq!(ANIMATE_PROFILE.threshold, 0.1);
        assert_eq!(ANIMATE_PROFILE.root_margin, "0px 0px -100px 0px");
        assert!(ANIMATE_PROFILE.unobserve_on_entry);
    }
}
