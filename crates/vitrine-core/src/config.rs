//! Effect configuration and selection flags.
//!
//! Every tunable the behavior layer uses lives in [`EffectConfig`]. The
//! defaults are the contract: they reproduce the site's shipped behavior
//! exactly, and hosts only override them through the JSON options object
//! accepted at controller construction. [`EffectConfig::validated`] clamps
//! hostile values into ranges where every effect stays usable.
//!
//! [`EffectFlags`] selects which effects get wired at attach time. The
//! hover-gated subset is dropped automatically on touch devices.
//!
//! # Defaults
//!
//! | Constant                          | Value   | Used by                       |
//! |-----------------------------------|---------|-------------------------------|
//! | `DEFAULT_HEADER_OFFSET_PX`        | 80      | smooth-scroll target          |
//! | `DEFAULT_NAVBAR_SCROLLED_PX`      | 50      | navbar "scrolled" class       |
//! | `DEFAULT_NAVBAR_HIDE_PX`          | 200     | navbar off-screen translate   |
//! | `DEFAULT_SECTION_PROBE_PX`        | 100     | active-section window         |
//! | `DEFAULT_REVEAL_STAGGER_MS`       | 100     | entrance animation delays     |
//! | `DEFAULT_TYPEWRITER_START_MS`     | 1000    | delay before typing begins    |
//! | `DEFAULT_TYPEWRITER_INTERVAL_MS`  | 100     | per-character interval        |
//! | `DEFAULT_CURSOR_BLINK_DELAY_MS`   | 500     | cursor blink kick-off         |
//! | `DEFAULT_CARD_DRIFT_INTERVAL_MS`  | 5000    | base drift period             |
//! | `DEFAULT_CARD_DRIFT_STAGGER_MS`   | 1000    | per-card period offset        |
//! | `DEFAULT_CARD_DRIFT_REVERT_MS`    | 2000    | jitter hold time              |
//! | `DEFAULT_CARD_JITTER_MAX_PX`      | 5       | drift translation magnitude   |
//! | `DEFAULT_CARD_HOVER_MAX_DEG`      | 5       | hover rotation magnitude      |
//! | `DEFAULT_RAINBOW_DURATION_MS`     | 3000    | easter-egg animation length   |

use bitflags::bitflags;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Default constants
// ---------------------------------------------------------------------------

/// Fixed header height subtracted from smooth-scroll targets.
pub const DEFAULT_HEADER_OFFSET_PX: f64 = 80.0;

/// Offset above which the navbar picks up its "scrolled" styling.
pub const DEFAULT_NAVBAR_SCROLLED_PX: f64 = 50.0;

/// Offset above which downward scrolling hides the navbar.
pub const DEFAULT_NAVBAR_HIDE_PX: f64 = 200.0;

/// How far above a section's top its active window begins.
pub const DEFAULT_SECTION_PROBE_PX: f64 = 100.0;

/// Entrance-animation delay step per element index.
pub const DEFAULT_REVEAL_STAGGER_MS: u64 = 100;

/// Delay between initialization and the first typed character.
pub const DEFAULT_TYPEWRITER_START_MS: u64 = 1000;

/// Interval between typed characters.
pub const DEFAULT_TYPEWRITER_INTERVAL_MS: u64 = 100;

/// Delay between the cursor appearing and its blink starting.
pub const DEFAULT_CURSOR_BLINK_DELAY_MS: u64 = 500;

/// Base interval between floating-card drift impulses.
pub const DEFAULT_CARD_DRIFT_INTERVAL_MS: u64 = 5000;

/// Extra drift interval per card index, desynchronizing the cards.
pub const DEFAULT_CARD_DRIFT_STAGGER_MS: u64 = 1000;

/// How long a drift impulse holds before reverting.
pub const DEFAULT_CARD_DRIFT_REVERT_MS: u64 = 2000;

/// Maximum drift translation on each axis, in pixels.
pub const DEFAULT_CARD_JITTER_MAX_PX: f64 = 5.0;

/// Maximum hover rotation magnitude, in degrees.
pub const DEFAULT_CARD_HOVER_MAX_DEG: f64 = 5.0;

/// Duration of the full-page rainbow animation.
pub const DEFAULT_RAINBOW_DURATION_MS: u64 = 3000;

/// Parallax rate applied to the hero container.
pub const DEFAULT_PARALLAX_HERO_RATE: f64 = -0.5;

/// Parallax rate applied to the first floating card.
pub const DEFAULT_PARALLAX_CARD_BASE_RATE: f64 = -0.3;

/// Additional parallax rate per floating-card index.
pub const DEFAULT_PARALLAX_CARD_STEP: f64 = -0.1;

// Validation bounds. Timer-driven effects refuse intervals short enough to
// spin the frame loop or long enough to look dead.
const MIN_TYPEWRITER_INTERVAL_MS: u64 = 10;
const MAX_TYPEWRITER_INTERVAL_MS: u64 = 2000;
const MAX_START_DELAY_MS: u64 = 30_000;
const MIN_DRIFT_INTERVAL_MS: u64 = 500;
const MAX_DRIFT_INTERVAL_MS: u64 = 120_000;
const MIN_RAINBOW_DURATION_MS: u64 = 500;
const MAX_RAINBOW_DURATION_MS: u64 = 30_000;
const MAX_MAGNITUDE_PX: f64 = 100.0;
const MAX_MAGNITUDE_DEG: f64 = 90.0;

// ---------------------------------------------------------------------------
// Effect selection flags
// ---------------------------------------------------------------------------

bitflags! {
    /// Which effects the controller wires at attach time.
    ///
    /// `HOVER_GATED` is the subset that only makes sense with a fine
    /// pointer; it is cleared automatically when the hover capability
    /// query fails.
    pub struct EffectFlags: u16 {
        /// Animated scrolling for in-page navigation links.
        const SMOOTH_SCROLL = 1 << 0;
        /// Navbar scrolled/hidden state handling.
        const NAVBAR = 1 << 1;
        /// Active-section tracking for the nav highlight.
        const SECTIONS = 1 << 2;
        /// Entrance animations for content cards.
        const REVEAL = 1 << 3;
        /// Scroll-linked hero and card translation.
        const PARALLAX = 1 << 4;
        /// Hero title typewriter.
        const TYPEWRITER = 1 << 5;
        /// Floating-card hover rotation and drift.
        const FLOATING_CARDS = 1 << 6;
        /// Skill-list hover highlight.
        const SKILL_HOVER = 1 << 7;
        /// Scroll progress bar.
        const PROGRESS = 1 << 8;
        /// Konami-code easter egg.
        const KONAMI = 1 << 9;

        /// Effects that require hover plus a fine pointer.
        const HOVER_GATED = Self::FLOATING_CARDS.bits() | Self::SKILL_HOVER.bits();
    }
}

/// Name table for the individually selectable flags.
///
/// Composite flags (`HOVER_GATED`) are intentionally absent.
pub const NAMED_FLAGS: [(&str, EffectFlags); 10] = [
    ("smooth-scroll", EffectFlags::SMOOTH_SCROLL),
    ("navbar", EffectFlags::NAVBAR),
    ("sections", EffectFlags::SECTIONS),
    ("reveal", EffectFlags::REVEAL),
    ("parallax", EffectFlags::PARALLAX),
    ("typewriter", EffectFlags::TYPEWRITER),
    ("floating-cards", EffectFlags::FLOATING_CARDS),
    ("skill-hover", EffectFlags::SKILL_HOVER),
    ("progress", EffectFlags::PROGRESS),
    ("konami", EffectFlags::KONAMI),
];

impl EffectFlags {
    /// Look up a single flag by its external name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_FLAGS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, flag)| *flag)
    }

    /// External name of a single flag, if it is one of the named set.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        NAMED_FLAGS
            .iter()
            .find(|(_, flag)| *flag == self)
            .map(|(n, _)| *n)
    }
}

impl Default for EffectFlags {
    fn default() -> Self {
        Self::all()
    }
}

// ---------------------------------------------------------------------------
// Effect configuration
// ---------------------------------------------------------------------------

/// Tunable constants for every effect.
///
/// Deserializable so the host page can override individual fields through
/// the controller's JSON options; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Header height subtracted from smooth-scroll targets.
    pub header_offset_px: f64,
    /// Navbar "scrolled" threshold.
    pub navbar_scrolled_threshold_px: f64,
    /// Navbar hide threshold (downward scrolling only).
    pub navbar_hide_threshold_px: f64,
    /// Active-section probe offset above each section top.
    pub section_probe_offset_px: f64,
    /// Entrance-animation delay step per element index.
    pub reveal_stagger_ms: u64,
    /// Delay before the typewriter starts.
    pub typewriter_start_delay_ms: u64,
    /// Typewriter per-character interval.
    pub typewriter_interval_ms: u64,
    /// Delay before the appended cursor starts blinking.
    pub cursor_blink_delay_ms: u64,
    /// Base floating-card drift interval.
    pub card_drift_interval_ms: u64,
    /// Per-card drift interval offset.
    pub card_drift_stagger_ms: u64,
    /// How long drift jitter holds before reverting.
    pub card_drift_revert_ms: u64,
    /// Drift translation magnitude per axis.
    pub card_jitter_max_px: f64,
    /// Hover rotation magnitude.
    pub card_hover_max_deg: f64,
    /// Rainbow animation duration.
    pub rainbow_duration_ms: u64,
    /// Hero parallax rate.
    pub parallax_hero_rate: f64,
    /// First floating card's parallax rate.
    pub parallax_card_base_rate: f64,
    /// Additional parallax rate per card index.
    pub parallax_card_step: f64,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            header_offset_px: DEFAULT_HEADER_OFFSET_PX,
            navbar_scrolled_threshold_px: DEFAULT_NAVBAR_SCROLLED_PX,
            navbar_hide_threshold_px: DEFAULT_NAVBAR_HIDE_PX,
            section_probe_offset_px: DEFAULT_SECTION_PROBE_PX,
            reveal_stagger_ms: DEFAULT_REVEAL_STAGGER_MS,
            typewriter_start_delay_ms: DEFAULT_TYPEWRITER_START_MS,
            typewriter_interval_ms: DEFAULT_TYPEWRITER_INTERVAL_MS,
            cursor_blink_delay_ms: DEFAULT_CURSOR_BLINK_DELAY_MS,
            card_drift_interval_ms: DEFAULT_CARD_DRIFT_INTERVAL_MS,
            card_drift_stagger_ms: DEFAULT_CARD_DRIFT_STAGGER_MS,
            card_drift_revert_ms: DEFAULT_CARD_DRIFT_REVERT_MS,
            card_jitter_max_px: DEFAULT_CARD_JITTER_MAX_PX,
            card_hover_max_deg: DEFAULT_CARD_HOVER_MAX_DEG,
            rainbow_duration_ms: DEFAULT_RAINBOW_DURATION_MS,
            parallax_hero_rate: DEFAULT_PARALLAX_HERO_RATE,
            parallax_card_base_rate: DEFAULT_PARALLAX_CARD_BASE_RATE,
            parallax_card_step: DEFAULT_PARALLAX_CARD_STEP,
        }
    }
}

impl EffectConfig {
    /// Validate and clamp values to safe ranges.
    ///
    /// Returns a new config with:
    /// - pixel thresholds forced non-negative and finite
    /// - timer intervals clamped so no machine can spin the frame loop
    /// - jitter and rotation magnitudes clamped to sane maxima
    ///
    /// Parallax rates are left alone; any finite rate is meaningful.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.header_offset_px = clamp_px(self.header_offset_px, DEFAULT_HEADER_OFFSET_PX);
        self.navbar_scrolled_threshold_px =
            clamp_px(self.navbar_scrolled_threshold_px, DEFAULT_NAVBAR_SCROLLED_PX);
        self.navbar_hide_threshold_px =
            clamp_px(self.navbar_hide_threshold_px, DEFAULT_NAVBAR_HIDE_PX);
        self.section_probe_offset_px =
            clamp_px(self.section_probe_offset_px, DEFAULT_SECTION_PROBE_PX);

        self.typewriter_start_delay_ms = self.typewriter_start_delay_ms.min(MAX_START_DELAY_MS);
        self.typewriter_interval_ms = self
            .typewriter_interval_ms
            .clamp(MIN_TYPEWRITER_INTERVAL_MS, MAX_TYPEWRITER_INTERVAL_MS);
        self.cursor_blink_delay_ms = self.cursor_blink_delay_ms.min(MAX_START_DELAY_MS);
        self.reveal_stagger_ms = self.reveal_stagger_ms.min(MAX_START_DELAY_MS);

        self.card_drift_interval_ms = self
            .card_drift_interval_ms
            .clamp(MIN_DRIFT_INTERVAL_MS, MAX_DRIFT_INTERVAL_MS);
        self.card_drift_stagger_ms = self.card_drift_stagger_ms.min(MAX_DRIFT_INTERVAL_MS);
        self.card_drift_revert_ms = self
            .card_drift_revert_ms
            .clamp(1, MAX_DRIFT_INTERVAL_MS);
        self.card_jitter_max_px = clamp_magnitude(self.card_jitter_max_px, MAX_MAGNITUDE_PX);
        self.card_hover_max_deg = clamp_magnitude(self.card_hover_max_deg, MAX_MAGNITUDE_DEG);

        self.rainbow_duration_ms = self
            .rainbow_duration_ms
            .clamp(MIN_RAINBOW_DURATION_MS, MAX_RAINBOW_DURATION_MS);

        if !self.parallax_hero_rate.is_finite() {
            self.parallax_hero_rate = DEFAULT_PARALLAX_HERO_RATE;
        }
        if !self.parallax_card_base_rate.is_finite() {
            self.parallax_card_base_rate = DEFAULT_PARALLAX_CARD_BASE_RATE;
        }
        if !self.parallax_card_step.is_finite() {
            self.parallax_card_step = DEFAULT_PARALLAX_CARD_STEP;
        }

        self
    }

    /// Parallax rate for the floating card at `index`.
    #[must_use]
    pub fn parallax_card_rate(&self, index: usize) -> f64 {
        self.parallax_card_base_rate + self.parallax_card_step * index as f64
    }
}

fn clamp_px(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { fallback }
}

fn clamp_magnitude(value: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_behavior() {
        let config = EffectConfig::default();
        assert_eq!(config.header_offset_px, 80.0);
        assert_eq!(config.navbar_scrolled_threshold_px, 50.0);
        assert_eq!(config.navbar_hide_threshold_px, 200.0);
        assert_eq!(config.section_probe_offset_px, 100.0);
        assert_eq!(config.typewriter_start_delay_ms, 1000);
        assert_eq!(config.typewriter_interval_ms, 100);
        assert_eq!(config.cursor_blink_delay_ms, 500);
        assert_eq!(config.card_drift_interval_ms, 5000);
        assert_eq!(config.card_drift_revert_ms, 2000);
        assert_eq!(config.rainbow_duration_ms, 3000);
    }

    #[test]
    fn defaults_survive_validation_unchanged() {
        let config = EffectConfig::default();
        assert_eq!(config.clone().validated(), config);
    }

    #[test]
    fn validation_clamps_degenerate_timers() {
        let config = EffectConfig {
            typewriter_interval_ms: 0,
            card_drift_interval_ms: 0,
            card_drift_revert_ms: 0,
            rainbow_duration_ms: 0,
            ..EffectConfig::default()
        }
        .validated();
        assert_eq!(config.typewriter_interval_ms, MIN_TYPEWRITER_INTERVAL_MS);
        assert_eq!(config.card_drift_interval_ms, MIN_DRIFT_INTERVAL_MS);
        assert_eq!(config.card_drift_revert_ms, 1);
        assert_eq!(config.rainbow_duration_ms, MIN_RAINBOW_DURATION_MS);
    }

    #[test]
    fn validation_repairs_non_finite_pixels() {
        let config = EffectConfig {
            header_offset_px: f64::NAN,
            navbar_scrolled_threshold_px: f64::INFINITY,
            card_jitter_max_px: f64::NAN,
            parallax_hero_rate: f64::NAN,
            ..EffectConfig::default()
        }
        .validated();
        assert_eq!(config.header_offset_px, DEFAULT_HEADER_OFFSET_PX);
        assert_eq!(config.navbar_scrolled_threshold_px, DEFAULT_NAVBAR_SCROLLED_PX);
        assert_eq!(config.card_jitter_max_px, 0.0);
        assert_eq!(config.parallax_hero_rate, DEFAULT_PARALLAX_HERO_RATE);
    }

    #[test]
    fn validation_forces_thresholds_non_negative() {
        let config = EffectConfig {
            navbar_scrolled_threshold_px: -10.0,
            section_probe_offset_px: -1.0,
            ..EffectConfig::default()
        }
        .validated();
        assert_eq!(config.navbar_scrolled_threshold_px, 0.0);
        assert_eq!(config.section_probe_offset_px, 0.0);
    }

    #[test]
    fn card_rates_follow_index() {
        let config = EffectConfig::default();
        assert!((config.parallax_card_rate(0) - -0.3).abs() < 1e-9);
        assert!((config.parallax_card_rate(1) - -0.4).abs() < 1e-9);
        assert!((config.parallax_card_rate(4) - -0.7).abs() < 1e-9);
    }

    #[test]
    fn config_deserializes_with_partial_fields() {
        let config: EffectConfig =
            serde_json::from_str(r#"{"navbar_scrolled_threshold_px": 75.0}"#).unwrap();
        assert_eq!(config.navbar_scrolled_threshold_px, 75.0);
        assert_eq!(config.header_offset_px, DEFAULT_HEADER_OFFSET_PX);
    }

    #[test]
    fn flag_names_round_trip() {
        for (name, flag) in NAMED_FLAGS {
            assert_eq!(EffectFlags::from_name(name), Some(flag));
            assert_eq!(flag.name(), Some(name));
        }
        assert_eq!(EffectFlags::from_name("definitely-not-a-flag"), None);
        assert_eq!(EffectFlags::HOVER_GATED.name(), None);
    }

    #[test]
    fn hover_gated_covers_pointer_effects() {
        assert!(EffectFlags::HOVER_GATED.contains(EffectFlags::FLOATING_CARDS));
        assert!(EffectFlags::HOVER_GATED.contains(EffectFlags::SKILL_HOVER));
        assert!(!EffectFlags::HOVER_GATED.contains(EffectFlags::KONAMI));
    }

    #[test]
    fn default_flags_enable_everything() {
        assert_eq!(EffectFlags::default(), EffectFlags::all());
    }
}
