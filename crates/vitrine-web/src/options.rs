//! Controller options parsed from the host page's JSON.
//!
//! The constructor accepts an optional JSON string so a host can tune
//! constants or switch individual effects off without rebuilding:
//!
//! ```json
//! {
//!     "config": { "navbar_hide_threshold_px": 300 },
//!     "disabled": ["konami", "parallax"]
//! }
//! ```
//!
//! Unknown names in `disabled` are reported, not fatal; a malformed
//! document is an error, because silently falling back to defaults would
//! hide the host's typo.

use serde::Deserialize;

use vitrine_core::{EffectConfig, EffectFlags};

/// Top-level options document.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ControllerOptions {
    /// Tunable constants; missing fields keep their defaults.
    pub config: EffectConfig,
    /// External names of effects to leave unwired.
    pub disabled: Vec<String>,
}

impl ControllerOptions {
    /// Parse an optional JSON document; `None` or blank means defaults.
    pub fn from_json(json: Option<&str>) -> Result<Self, serde_json::Error> {
        match json {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(text),
            _ => Ok(Self::default()),
        }
    }

    /// The validated config.
    #[must_use]
    pub fn effect_config(&self) -> EffectConfig {
        self.config.clone().validated()
    }

    /// All effects minus the recognized `disabled` names.
    #[must_use]
    pub fn effect_flags(&self) -> EffectFlags {
        let mut flags = EffectFlags::default();
        for name in &self.disabled {
            if let Some(flag) = EffectFlags::from_name(name) {
                flags.remove(flag);
            }
        }
        flags
    }

    /// `disabled` entries that name no known effect.
    #[must_use]
    pub fn unknown_disabled(&self) -> Vec<&str> {
        self.disabled
            .iter()
            .map(String::as_str)
            .filter(|name| EffectFlags::from_name(name).is_none())
            .collect()
    }
}
