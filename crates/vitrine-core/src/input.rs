//! Keyboard input normalization.
//!
//! The browser reports physical keys through `KeyboardEvent.code` strings
//! ("ArrowUp", "KeyB", "Digit5"). [`KeyCode`] collapses those into a small
//! enum so the sequence detector compares values instead of strings.
//! Unrecognized codes map to [`KeyCode::Unidentified`], which never matches
//! anything.

// ---------------------------------------------------------------------------
// Key codes
// ---------------------------------------------------------------------------

/// Normalized physical key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A letter, digit, or space, lowercased.
    Char(char),
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Enter or numpad enter.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Anything this layer does not care about.
    Unidentified,
}

impl KeyCode {
    /// Normalize a DOM `KeyboardEvent.code` value.
    ///
    /// Letter codes ("KeyA".."KeyZ") lowercase into [`KeyCode::Char`] so
    /// shift state never affects matching; digits and space follow the same
    /// path. Everything unrecognized becomes [`KeyCode::Unidentified`].
    #[must_use]
    pub fn from_dom_code(code: &str) -> Self {
        match code {
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "Enter" | "NumpadEnter" => Self::Enter,
            "Escape" => Self::Escape,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Space" => Self::Char(' '),
            other => {
                if let Some(rest) = other.strip_prefix("Key")
                    && let Some(ch) = single_ascii(rest)
                    && ch.is_ascii_uppercase()
                {
                    return Self::Char(ch.to_ascii_lowercase());
                }
                if let Some(rest) = other.strip_prefix("Digit")
                    && let Some(ch) = single_ascii(rest)
                    && ch.is_ascii_digit()
                {
                    return Self::Char(ch);
                }
                Self::Unidentified
            }
        }
    }
}

/// The sole character of a one-character ASCII string, if that is what
/// `s` is.
fn single_ascii(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii() => Some(ch),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_normalize() {
        assert_eq!(KeyCode::from_dom_code("ArrowUp"), KeyCode::Up);
        assert_eq!(KeyCode::from_dom_code("ArrowDown"), KeyCode::Down);
        assert_eq!(KeyCode::from_dom_code("ArrowLeft"), KeyCode::Left);
        assert_eq!(KeyCode::from_dom_code("ArrowRight"), KeyCode::Right);
    }

    #[test]
    fn letters_lowercase() {
        assert_eq!(KeyCode::from_dom_code("KeyB"), KeyCode::Char('b'));
        assert_eq!(KeyCode::from_dom_code("KeyA"), KeyCode::Char('a'));
        assert_eq!(KeyCode::from_dom_code("KeyZ"), KeyCode::Char('z'));
    }

    #[test]
    fn digits_and_space() {
        assert_eq!(KeyCode::from_dom_code("Digit7"), KeyCode::Char('7'));
        assert_eq!(KeyCode::from_dom_code("Digit0"), KeyCode::Char('0'));
        assert_eq!(KeyCode::from_dom_code("Space"), KeyCode::Char(' '));
    }

    #[test]
    fn named_keys() {
        assert_eq!(KeyCode::from_dom_code("Enter"), KeyCode::Enter);
        assert_eq!(KeyCode::from_dom_code("NumpadEnter"), KeyCode::Enter);
        assert_eq!(KeyCode::from_dom_code("Escape"), KeyCode::Escape);
        assert_eq!(KeyCode::from_dom_code("Tab"), KeyCode::Tab);
        assert_eq!(KeyCode::from_dom_code("Backspace"), KeyCode::Backspace);
    }

    #[test]
    fn malformed_letter_codes_are_unidentified() {
        assert_eq!(KeyCode::from_dom_code("Key"), KeyCode::Unidentified);
        assert_eq!(KeyCode::from_dom_code("KeyAB"), KeyCode::Unidentified);
        assert_eq!(KeyCode::from_dom_code("Keyb"), KeyCode::Unidentified);
        assert_eq!(KeyCode::from_dom_code("Digit10"), KeyCode::Unidentified);
        assert_eq!(KeyCode::from_dom_code("DigitX"), KeyCode::Unidentified);
    }

    #[test]
    fn unknown_codes_are_unidentified() {
        assert_eq!(KeyCode::from_dom_code(""), KeyCode::Unidentified);
        assert_eq!(KeyCode::from_dom_code("ShiftLeft"), KeyCode::Unidentified);
        assert_eq!(KeyCode::from_dom_code("F13"), KeyCode::Unidentified);
        assert_eq!(KeyCode::from_dom_code("MetaRight"), KeyCode::Unidentified);
    }
}
