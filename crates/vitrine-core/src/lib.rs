#![cfg_attr(not(test), forbid(unsafe_code))]

//! Core state machines for the vitrine page-behavior layer.
//!
//! This crate is DOM-free. Every effect on the site (navbar state, active
//! section highlight, parallax, typewriter, floating-card drift, scroll
//! progress, the Konami easter egg) is modeled here as a small state machine
//! driven by plain inputs: scroll offsets, normalized key codes, and
//! measured time deltas. The machines return plain decisions (class toggles,
//! transform records, text prefixes) and never touch the page themselves.
//!
//! The `vitrine-web` crate owns the browser boundary: it samples events,
//! feeds them through these machines once per animation frame, and applies
//! whatever changed.
//!
//! # Modules
//!
//! | Module       | Responsibility                                          |
//! |--------------|---------------------------------------------------------|
//! | `config`     | Tunable constants, validation, effect selection flags   |
//! | `input`      | DOM `KeyboardEvent.code` normalization                  |
//! | `scroll`     | Frame coalescing, direction tracking, navbar state      |
//! | `section`    | Active-section resolution for the nav highlight         |
//! | `typewriter` | Tick-driven hero-title typing machine                   |
//! | `konami`     | Sliding-window sequence detector and rainbow countdown  |
//! | `transform`  | Structured CSS transform records                        |
//! | `card`       | Floating-card hover, drift, and parallax composition    |
//! | `reveal`     | Entrance-animation staggering and one-shot bookkeeping  |
//! | `progress`   | Guarded scroll-progress percentage                      |
//!
//! All time handling goes through `web-time` so the same code runs under
//! native tests and in the browser.

pub mod card;
pub mod config;
pub mod input;
pub mod konami;
pub mod progress;
pub mod reveal;
pub mod scroll;
pub mod section;
pub mod transform;
pub mod typewriter;

pub use card::FloatingCard;
pub use config::{EffectConfig, EffectFlags};
pub use input::KeyCode;
pub use konami::{KONAMI_SEQUENCE, KonamiDetector, RainbowTimer};
pub use progress::{ProgressTracker, progress_percent};
pub use reveal::{
    ANIMATE_PROFILE, ENTRANCE_PROFILE, ObserverProfile, RevealTracker, stagger_delay_ms,
};
pub use scroll::{NavbarChange, NavbarState, ScrollCoalescer, ScrollDirection, ScrollSample, ScrollTracker};
pub use section::{ActiveSectionChange, ActiveSectionTracker, SectionSpan, resolve_active};
pub use transform::Transform;
pub use typewriter::{Typewriter, TypewriterTick};
