//! Stylesheets injected into the document at attach time.
//!
//! These are the behavior layer's only output format: CSS text appended
//! verbatim to `<head>`. The rules define the state classes the effects
//! toggle (`.navbar.scrolled`, `.nav-link.active`, `.visible`, `.cursor`)
//! and the keyframes they reference. The stylesheet references custom
//! properties (`--shadow-lg`, `--primary-gradient`) owned by the site's
//! main stylesheet.

/// State classes, entrance animations, and the progress bar.
pub const EFFECT_STYLES: &str = r#"
    .cursor {
        animation: blink 1s infinite;
        font-weight: 300;
    }

    @keyframes blink {
        0%, 50% { opacity: 1; }
        51%, 100% { opacity: 0; }
    }

    .navbar.scrolled {
        background: rgba(255, 255, 255, 0.98);
        backdrop-filter: blur(20px);
        box-shadow: var(--shadow-lg);
    }

    .nav-link.active {
        color: #667eea;
        font-weight: 600;
    }

    .timeline-item.visible {
        animation: slideInFromSide 0.8s ease-out forwards;
    }

    @keyframes slideInFromSide {
        from {
            opacity: 0;
            transform: translateX(-50px);
        }
        to {
            opacity: 1;
            transform: translateX(0);
        }
    }

    .skill-category.visible,
    .education-card.visible,
    .training-provider.visible {
        animation: slideInUp 0.8s ease-out forwards;
    }

    @keyframes slideInUp {
        from {
            opacity: 0;
            transform: translateY(50px);
        }
        to {
            opacity: 1;
            transform: translateY(0);
        }
    }

    .volunteer-card.visible {
        animation: zoomIn 0.8s ease-out forwards;
    }

    @keyframes zoomIn {
        from {
            opacity: 0;
            transform: scale(0.8);
        }
        to {
            opacity: 1;
            transform: scale(1);
        }
    }

    /* Loading states */
    .loading-skeleton {
        background: linear-gradient(90deg, #f0f0f0 25%, #e0e0e0 50%, #f0f0f0 75%);
        background-size: 200% 100%;
        animation: loading 1.5s infinite;
    }

    @keyframes loading {
        0% {
            background-position: 200% 0;
        }
        100% {
            background-position: -200% 0;
        }
    }

    /* Enhanced button effects */
    .btn::before {
        content: '';
        position: absolute;
        top: 0;
        left: -100%;
        width: 100%;
        height: 100%;
        background: linear-gradient(
            90deg,
            transparent,
            rgba(255, 255, 255, 0.2),
            transparent
        );
        transition: left 0.5s;
    }

    .btn:hover::before {
        left: 100%;
    }

    /* Scroll progress indicator */
    .scroll-progress {
        position: fixed;
        top: 0;
        left: 0;
        width: 0%;
        height: 3px;
        background: var(--primary-gradient);
        z-index: 1001;
        transition: width 0.3s ease;
    }
"#;

/// Keyframes for the easter-egg hue rotation.
pub const RAINBOW_STYLES: &str = r#"
    @keyframes rainbow {
        0% { filter: hue-rotate(0deg); }
        100% { filter: hue-rotate(360deg); }
    }
"#;

/// Both style blocks in injection order.
#[must_use]
pub fn injected_styles() -> [&'static str; 2] {
    [EFFECT_STYLES, RAINBOW_STYLES]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_styles_define_every_state_class() {
        for selector in [
            ".cursor",
            ".navbar.scrolled",
            ".nav-link.active",
            ".timeline-item.visible",
            ".skill-category.visible",
            ".education-card.visible",
            ".training-provider.visible",
            ".volunteer-card.visible",
            ".loading-skeleton",
            ".scroll-progress",
        ] {
            assert!(
                EFFECT_STYLES.contains(selector),
                "missing selector {selector}"
            );
        }
    }

    #[test]
    fn effect_styles_define_every_keyframe() {
        for keyframes in [
            "@keyframes blink",
            "@keyframes slideInFromSide",
            "@keyframes slideInUp",
            "@keyframes zoomIn",
            "@keyframes loading",
        ] {
            assert!(EFFECT_STYLES.contains(keyframes), "missing {keyframes}");
        }
    }

    #[test]
    fn rainbow_styles_rotate_the_full_circle() {
        assert!(RAINBOW_STYLES.contains("@keyframes rainbow"));
        assert!(RAINBOW_STYLES.contains("hue-rotate(0deg)"));
        assert!(RAINBOW_STYLES.contains("hue-rotate(360deg)"));
    }

    #[test]
    fn injection_order_is_effects_then_rainbow() {
        let [first, second] = injected_styles();
        assert!(first.contains(".scroll-progress"));
        assert!(second.contains("rainbow"));
    }

    #[test]
    fn braces_balance() {
        for styles in injected_styles() {
            let opens = styles.matches('{').count();
            let closes = styles.matches('}').count();
            assert_eq!(opens, closes);
        }
    }
}
