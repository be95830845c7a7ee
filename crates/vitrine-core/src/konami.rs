//! The hidden keystroke sequence and its rainbow payoff.
//!
//! # Design
//!
//! [`KonamiDetector`] keeps a sliding window of the most recent key codes,
//! capacity equal to the target sequence length. Every keypress appends,
//! the oldest entry falls out, and the window is compared in order against
//! the target. Matching is exact and contiguous: a stray key anywhere in
//! the window prevents a match until it slides back out.
//!
//! On a match the page gets a full-page hue-rotation animation. The
//! [`RainbowTimer`] counts that animation down on the frame loop; when it
//! finishes, the caller clears the animation and resets the detector. A
//! match that lands while the animation is still running is ignored rather
//! than extending it.

use std::collections::VecDeque;

use web_time::Duration;

use crate::input::KeyCode;

// ---------------------------------------------------------------------------
// Sequence detection
// ---------------------------------------------------------------------------

/// The target sequence: Up, Up, Down, Down, Left, Right, Left, Right, B, A.
pub const KONAMI_SEQUENCE: [KeyCode; 10] = [
    KeyCode::Up,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Char('b'),
    KeyCode::Char('a'),
];

/// Sliding-window detector over the trailing key codes.
#[derive(Debug)]
pub struct KonamiDetector {
    window: VecDeque<KeyCode>,
}

impl Default for KonamiDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl KonamiDetector {
    /// Create a detector with an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: VecDeque::with_capacity(KONAMI_SEQUENCE.len()),
        }
    }

    /// Append a key code and report whether the window now matches.
    pub fn feed(&mut self, code: KeyCode) -> bool {
        self.window.push_back(code);
        if self.window.len() > KONAMI_SEQUENCE.len() {
            self.window.pop_front();
        }
        let matched = self.matches();
        #[cfg(feature = "tracing")]
        if matched {
            tracing::debug!("konami sequence matched");
        }
        matched
    }

    fn matches(&self) -> bool {
        self.window.len() == KONAMI_SEQUENCE.len()
            && self.window.iter().eq(KONAMI_SEQUENCE.iter())
    }

    /// Empty the window.
    pub fn reset(&mut self) {
        self.window.clear();
    }

    /// How many codes the window currently holds.
    #[must_use]
    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}

// ---------------------------------------------------------------------------
// Rainbow countdown
// ---------------------------------------------------------------------------

/// One-shot countdown for the rainbow animation.
#[derive(Debug)]
pub struct RainbowTimer {
    duration: Duration,
    remaining: Option<Duration>,
}

impl RainbowTimer {
    /// Create an idle timer with the given animation duration.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: None,
        }
    }

    /// Arm the countdown.
    ///
    /// Returns `false` without rearming when the countdown is already
    /// running, so a repeated match cannot extend the animation.
    pub fn trigger(&mut self) -> bool {
        if self.remaining.is_some() {
            return false;
        }
        self.remaining = Some(self.duration);
        true
    }

    /// Advance the countdown.
    ///
    /// Returns `true` exactly once, on the tick where the countdown
    /// finishes.
    pub fn tick(&mut self, delta: Duration) -> bool {
        match self.remaining {
            Some(rem) if delta >= rem => {
                self.remaining = None;
                true
            }
            Some(rem) => {
                self.remaining = Some(rem - delta);
                false
            }
            None => false,
        }
    }

    /// Whether the countdown is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
