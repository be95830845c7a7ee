//! The developer-console welcome banner.
//!
//! Purely informational; printed once at attach time through the page's
//! console rather than the tracing channel, because it is addressed to
//! visitors poking at the site, not to its operators.

/// Multi-line banner logged at attach.
pub const WELCOME_BANNER: &str = "
🎨 Welcome to my resume site!
🚀 Built with Rust and WebAssembly
💻 Passionate about clean infrastructure and creative design

Feel free to explore the code and reach out!
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_is_multiline_and_non_empty() {
        assert!(WELCOME_BANNER.lines().filter(|l| !l.trim().is_empty()).count() >= 3);
    }

    #[test]
    fn banner_carries_no_markup() {
        assert!(!WELCOME_BANNER.contains('<'));
        assert!(!WELCOME_BANNER.contains('%'));
    }
}
