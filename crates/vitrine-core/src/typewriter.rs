//! Tick-driven typewriter for the hero title.
//!
//! # Design
//!
//! The effect captures the title text, blanks the element, then reveals
//! one grapheme per interval. One interval after the final grapheme a
//! cursor marker is appended, and after a further delay the cursor's blink
//! animation starts. The whole sequence is a small state machine advanced
//! by the shared frame loop instead of a chain of self-rescheduling
//! timeouts, so it consumes measured time deltas and dies cleanly with the
//! controller.
//!
//! ```text
//!          start delay            interval x N           interval
//!  Armed ────────────► Typing ───────────────► (full) ───────────► cursor
//!                        │ one grapheme per expiry                appended
//!                        ▼                                           │
//!                    Blinking ◄──────────────────────────────────────┘
//!                                      blink delay
//! ```
//!
//! Ticks accept arbitrarily large deltas and fold every elapsed step into
//! one [`TypewriterTick`]; intermediate prefixes inside a single frame are
//! invisible anyway, so only the final visible prefix is reported.
//!
//! # Invariants
//!
//! - `visible_text()` is always a prefix of the captured text on a
//!   grapheme boundary.
//! - The cursor appends exactly once, strictly after the full text is
//!   visible.
//! - The machine is not restartable; [`Typewriter::is_done`] is terminal.

use unicode_segmentation::UnicodeSegmentation;
use web_time::Duration;

use crate::config::EffectConfig;

// ---------------------------------------------------------------------------
// Tick output
// ---------------------------------------------------------------------------

/// What changed during one [`Typewriter::tick`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypewriterTick {
    /// The visible prefix grew; re-render from [`Typewriter::visible_text`].
    pub revealed: bool,
    /// Append the cursor marker after the text.
    pub append_cursor: bool,
    /// Start the cursor blink animation.
    pub start_blink: bool,
}

impl TypewriterTick {
    /// Whether this tick carries any work.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !(self.revealed || self.append_cursor || self.start_blink)
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting out the start delay.
    Armed,
    /// Revealing graphemes; also spans the interval after the final one.
    Typing,
    /// Cursor appended, waiting to start its blink.
    CursorPending,
    /// Terminal.
    Blinking,
}

/// The typewriter state machine.
#[derive(Debug)]
pub struct Typewriter {
    text: String,
    /// Byte offset just past each grapheme, in order.
    boundaries: Vec<usize>,
    visible: usize,
    phase: Phase,
    remaining: Duration,
    interval: Duration,
    blink_delay: Duration,
}

impl Typewriter {
    /// Capture `text` and arm the start delay.
    #[must_use]
    pub fn new(text: impl Into<String>, config: &EffectConfig) -> Self {
        let text = text.into();
        let boundaries = text
            .grapheme_indices(true)
            .map(|(start, grapheme)| start + grapheme.len())
            .collect();
        Self {
            text,
            boundaries,
            visible: 0,
            phase: Phase::Armed,
            remaining: Duration::from_millis(config.typewriter_start_delay_ms),
            interval: Duration::from_millis(config.typewriter_interval_ms),
            blink_delay: Duration::from_millis(config.cursor_blink_delay_ms),
        }
    }

    /// The currently visible prefix of the captured text.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        match self.visible.checked_sub(1).and_then(|i| self.boundaries.get(i)) {
            Some(&end) => &self.text[..end],
            None => "",
        }
    }

    /// The full captured text.
    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.text
    }

    /// Number of graphemes in the captured text.
    #[must_use]
    pub fn total_graphemes(&self) -> usize {
        self.boundaries.len()
    }

    /// Whether the machine reached its terminal state.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Blinking
    }

    /// Advance by `delta`, folding every elapsed step into one result.
    pub fn tick(&mut self, mut delta: Duration) -> TypewriterTick {
        let mut out = TypewriterTick::default();
        while self.phase != Phase::Blinking {
            if delta < self.remaining {
                self.remaining -= delta;
                break;
            }
            delta -= self.remaining;
            self.advance(&mut out);
        }
        out
    }

    /// One phase-step expiry. Progress is monotonic: every call moves the
    /// machine strictly closer to `Blinking`, so the tick loop terminates.
    fn advance(&mut self, out: &mut TypewriterTick) {
        match self.phase {
            Phase::Armed => {
                if self.boundaries.is_empty() {
                    out.append_cursor = true;
                    self.phase = Phase::CursorPending;
                    self.remaining = self.blink_delay;
                } else {
                    // The first grapheme appears the moment the delay ends.
                    self.visible = 1;
                    out.revealed = true;
                    self.phase = Phase::Typing;
                    self.remaining = self.interval;
                }
            }
            Phase::Typing => {
                if self.visible < self.boundaries.len() {
                    self.visible += 1;
                    out.revealed = true;
                    self.remaining = self.interval;
                } else {
                    // One full interval after the last grapheme.
                    out.append_cursor = true;
                    self.phase = Phase::CursorPending;
                    self.remaining = self.blink_delay;
                }
            }
            Phase::CursorPending => {
                out.start_blink = true;
                self.phase = Phase::Blinking;
                self.remaining = Duration::ZERO;
            }
            Phase::Blinking => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn typewriter(text: &str) -> Typewriter {
        Typewriter::new(text, &EffectConfig::default())
    }

    #[test]
    fn nothing_happens_during_start_delay() {
        let mut tw = typewriter("ABC");
        assert!(tw.tick(ms(999)).is_noop());
        assert_eq!(tw.visible_text(), "");
    }

    #[test]
    fn first_grapheme_appears_when_delay_ends() {
        let mut tw = typewriter("ABC");
        let tick = tw.tick(ms(1000));
        assert!(tick.revealed);
        assert!(!tick.append_cursor);
        assert_eq!(tw.visible_text(), "A");
    }

    #[test]
    fn one_tick_per_interval_then_cursor() {
        let mut tw = typewriter("ABC");
        let _ = tw.tick(ms(1000));
        assert_eq!(tw.visible_text(), "A");

        let _ = tw.tick(ms(100));
        assert_eq!(tw.visible_text(), "AB");

        let tick = tw.tick(ms(100));
        assert_eq!(tw.visible_text(), "ABC");
        assert!(!tick.append_cursor);

        // The cursor appends one interval after the final grapheme.
        let tick = tw.tick(ms(100));
        assert!(tick.append_cursor);
        assert!(!tick.start_blink);

        // And blinks after the blink delay.
        assert!(tw.tick(ms(499)).is_noop());
        let tick = tw.tick(ms(1));
        assert!(tick.start_blink);
        assert!(tw.is_done());
    }

    #[test]
    fn large_delta_folds_every_step() {
        let mut tw = typewriter("ABC");
        let tick = tw.tick(ms(60_000));
        assert!(tick.revealed);
        assert!(tick.append_cursor);
        assert!(tick.start_blink);
        assert_eq!(tw.visible_text(), "ABC");
        assert!(tw.is_done());
    }

    #[test]
    fn terminal_state_ignores_ticks() {
        let mut tw = typewriter("AB");
        let _ = tw.tick(ms(60_000));
        assert!(tw.is_done());
        assert!(tw.tick(ms(1000)).is_noop());
        assert_eq!(tw.visible_text(), "AB");
    }

    #[test]
    fn empty_text_goes_straight_to_cursor() {
        let mut tw = typewriter("");
        let tick = tw.tick(ms(1000));
        assert!(tick.append_cursor);
        assert!(!tick.revealed);

        let tick = tw.tick(ms(500));
        assert!(tick.start_blink);
        assert!(tw.is_done());
    }

    #[test]
    fn graphemes_step_whole_clusters() {
        // Family emoji is one grapheme built from several scalars.
        let mut tw = typewriter("a\u{1F469}\u{200D}\u{1F469}\u{200D}\u{1F466}b");
        assert_eq!(tw.total_graphemes(), 3);

        let _ = tw.tick(ms(1000));
        assert_eq!(tw.visible_text(), "a");

        let _ = tw.tick(ms(100));
        assert_eq!(tw.visible_text(), "a\u{1F469}\u{200D}\u{1F469}\u{200D}\u{1F466}");

        let _ = tw.tick(ms(100));
        assert_eq!(tw.visible_text(), "a\u{1F469}\u{200D}\u{1F469}\u{200D}\u{1F466}b");
    }

    #[test]
    fn accented_text_reveals_cleanly() {
        let mut tw = typewriter("héllo");
        assert_eq!(tw.total_graphemes(), 5);
        let _ = tw.tick(ms(1000));
        let _ = tw.tick(ms(100));
        assert_eq!(tw.visible_text(), "hé");
    }

    #[test]
    fn delta_carries_across_phase_boundaries() {
        let mut tw = typewriter("AB");
        // 1000 delay + 100 interval + 50 leftover inside the next interval.
        let tick = tw.tick(ms(1150));
        assert!(tick.revealed);
        assert_eq!(tw.visible_text(), "AB");

        // 50 more completes the post-final interval: cursor time.
        let tick = tw.tick(ms(50));
        assert!(tick.append_cursor);
    }
}
