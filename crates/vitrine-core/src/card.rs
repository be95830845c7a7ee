//! Floating-card microanimations.
//!
//! Each decorative card composes three transform sources:
//!
//! - a scroll-linked parallax translation, set by the frame loop,
//! - a hover rotation, picked at random on pointer enter and cleared on
//!   pointer leave,
//! - a periodic drift: every interval (staggered per card so the cards
//!   stay out of phase) the card nudges a few pixels in a random
//!   direction, holds, then reverts.
//!
//! The composition is a single [`Transform`] record rebuilt from current
//! state, so the sources never corrupt each other. A hovered card skips
//! its drift impulse but keeps its schedule.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_time::Duration;

use crate::config::EffectConfig;
use crate::transform::Transform;

// ---------------------------------------------------------------------------
// Drift schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriftPhase {
    /// Waiting for the next impulse.
    Waiting,
    /// Jitter applied, waiting to revert.
    Reverting,
}

/// Per-card animation state.
#[derive(Debug)]
pub struct FloatingCard {
    index: usize,
    hovered: bool,
    rotate_deg: Option<f64>,
    jitter: Option<(f64, f64)>,
    parallax_y_px: f64,
    phase: DriftPhase,
    remaining: Duration,
    interval: Duration,
    revert: Duration,
    jitter_max_px: f64,
    hover_max_deg: f64,
    rng: SmallRng,
}

impl FloatingCard {
    /// Create the card at `index` with its staggered drift schedule.
    ///
    /// The caller supplies the RNG seed, which keeps tests deterministic.
    #[must_use]
    pub fn new(index: usize, seed: u64, config: &EffectConfig) -> Self {
        let interval_ms = config
            .card_drift_interval_ms
            .saturating_add(config.card_drift_stagger_ms.saturating_mul(index as u64))
            // A zero interval would make the drift schedule spin the
            // frame loop without ever yielding.
            .max(1);
        let interval = Duration::from_millis(interval_ms);
        Self {
            index,
            hovered: false,
            rotate_deg: None,
            jitter: None,
            parallax_y_px: 0.0,
            phase: DriftPhase::Waiting,
            remaining: interval,
            interval,
            revert: Duration::from_millis(config.card_drift_revert_ms.max(1)),
            jitter_max_px: config.card_jitter_max_px.max(0.0),
            hover_max_deg: config.card_hover_max_deg.max(0.0),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// This card's index among the floating cards.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the pointer is currently over the card.
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Pointer entered: pick and hold a random rotation.
    ///
    /// Returns whether the rendered transform changed (always true here).
    pub fn pointer_enter(&mut self) -> bool {
        self.hovered = true;
        let max = self.hover_max_deg;
        self.rotate_deg = Some(self.rng.random_range(-max..=max));
        true
    }

    /// Pointer left: drop the rotation.
    pub fn pointer_leave(&mut self) -> bool {
        self.hovered = false;
        self.rotate_deg.take().is_some()
    }

    /// Update the scroll-linked translation.
    ///
    /// Returns whether the value actually moved.
    pub fn set_parallax_y(&mut self, y_px: f64) -> bool {
        if self.parallax_y_px == y_px {
            return false;
        }
        self.parallax_y_px = y_px;
        true
    }

    /// Advance the drift schedule.
    ///
    /// Returns whether the rendered transform changed.
    pub fn tick(&mut self, mut delta: Duration) -> bool {
        let mut changed = false;
        loop {
            if delta < self.remaining {
                self.remaining -= delta;
                break;
            }
            delta -= self.remaining;
            match self.phase {
                DriftPhase::Waiting => {
                    if self.hovered {
                        // Skip this impulse, keep the schedule.
                        self.remaining = self.interval;
                    } else {
                        let max = self.jitter_max_px;
                        self.jitter = Some((
                            self.rng.random_range(-max..=max),
                            self.rng.random_range(-max..=max),
                        ));
                        changed = true;
                        self.phase = DriftPhase::Reverting;
                        self.remaining = self.revert;
                    }
                }
                DriftPhase::Reverting => {
                    changed |= self.jitter.take().is_some();
                    self.phase = DriftPhase::Waiting;
                    self.remaining = self.interval;
                }
            }
        }
        changed
    }

    /// The card's current composite transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        let (jx, jy) = self.jitter.unwrap_or((0.0, 0.0));
        Transform {
            translate_x_px: jx,
            translate_y_px: self.parallax_y_px + jy,
            rotate_deg: self.rotate_deg.unwrap_or(0.0),
            scale: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
