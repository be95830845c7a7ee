//! Structured CSS transform records.
//!
//! Splicing transform strings in place (appending a `rotate(...)` fragment
//! on hover, stripping it back out with pattern replacement) is
//! order-dependent and silently loses components once two effects write
//! the same element. Here every writer owns a full [`Transform`] record
//! and serializes it atomically; no string surgery happens anywhere.
//!
//! Serialization is total: non-finite components render as their identity
//! value instead of poisoning the style attribute.

// ---------------------------------------------------------------------------
// Transform record
// ---------------------------------------------------------------------------

/// A 2D transform as the behavior layer uses it.
///
/// Components serialize in a fixed order: translate, then rotate, then
/// scale. Identity components are omitted; the full identity renders as
/// `"none"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Horizontal translation in pixels.
    pub translate_x_px: f64,
    /// Vertical translation in pixels.
    pub translate_y_px: f64,
    /// Rotation in degrees.
    pub rotate_deg: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translate_x_px: 0.0,
        translate_y_px: 0.0,
        rotate_deg: 0.0,
        scale: 1.0,
    };

    /// A pure translation.
    #[must_use]
    pub fn translate(x_px: f64, y_px: f64) -> Self {
        Self {
            translate_x_px: x_px,
            translate_y_px: y_px,
            ..Self::IDENTITY
        }
    }

    /// A pure vertical translation.
    #[must_use]
    pub fn translate_y(y_px: f64) -> Self {
        Self::translate(0.0, y_px)
    }

    /// This transform with the rotation replaced.
    #[must_use]
    pub fn with_rotate(mut self, deg: f64) -> Self {
        self.rotate_deg = deg;
        self
    }

    /// This transform with the scale replaced.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Whether every component is at its identity value.
    ///
    /// Non-finite components count as identity, matching how they
    /// serialize.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        sane(self.translate_x_px, 0.0) == 0.0
            && sane(self.translate_y_px, 0.0) == 0.0
            && sane(self.rotate_deg, 0.0) == 0.0
            && sane(self.scale, 1.0) == 1.0
    }

    /// Serialize to a CSS `transform` property value.
    #[must_use]
    pub fn to_css(&self) -> String {
        let tx = sane(self.translate_x_px, 0.0);
        let ty = sane(self.translate_y_px, 0.0);
        let rot = sane(self.rotate_deg, 0.0);
        let scale = sane(self.scale, 1.0);

        let mut parts = Vec::with_capacity(3);
        if tx != 0.0 || ty != 0.0 {
            parts.push(format!("translate({tx}px, {ty}px)"));
        }
        if rot != 0.0 {
            parts.push(format!("rotate({rot}deg)"));
        }
        if scale != 1.0 {
            parts.push(format!("scale({scale})"));
        }

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(" ")
        }
    }
}

fn sane(value: f64, identity: f64) -> f64 {
    if value.is_finite() { value } else { identity }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_serializes_as_none() {
        assert_eq!(Transform::IDENTITY.to_css(), "none");
        assert_eq!(Transform::default().to_css(), "none");
        assert!(Transform::IDENTITY.is_identity());
    }

    #[test]
    fn translation_only() {
        assert_eq!(Transform::translate_y(-40.5).to_css(), "translate(0px, -40.5px)");
        assert_eq!(Transform::translate(3.0, 0.0).to_css(), "translate(3px, 0px)");
    }

    #[test]
    fn components_keep_fixed_order() {
        let t = Transform::translate(2.0, -3.0).with_rotate(4.5).with_scale(0.8);
        assert_eq!(t.to_css(), "translate(2px, -3px) rotate(4.5deg) scale(0.8)");
    }

    #[test]
    fn rotation_alone_omits_translate() {
        let t = Transform::IDENTITY.with_rotate(-5.0);
        assert_eq!(t.to_css(), "rotate(-5deg)");
        assert!(!t.is_identity());
    }

    #[test]
    fn non_finite_components_render_as_identity() {
        let t = Transform {
            translate_x_px: f64::NAN,
            translate_y_px: f64::INFINITY,
            rotate_deg: f64::NEG_INFINITY,
            scale: f64::NAN,
        };
        assert_eq!(t.to_css(), "none");
        assert!(t.is_identity());
    }

    #[test]
    fn mixed_finite_and_non_finite() {
        let t = Transform {
            translate_x_px: 1.0,
            translate_y_px: f64::NAN,
            rotate_deg: 0.0,
            scale: 1.0,
        };
        assert_eq!(t.to_css(), "translate(1px, 0px)");
    }
}
