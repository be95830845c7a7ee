//! Active-section resolution for the navigation highlight.
//!
//! Each identified section owns a half-open window starting a probe offset
//! above its top edge. The section whose window contains the scroll
//! position becomes "active" and its navigation link gets highlighted.
//! When several windows overlap near a boundary, the last matching section
//! in document order wins; iteration order is the tie-break, and it is
//! part of the contract rather than an accident.
//!
//! When no window matches (above the first section, in a gap, or past the
//! end), the active section clears and no link stays highlighted.

// ---------------------------------------------------------------------------
// Measurement input
// ---------------------------------------------------------------------------

/// One section's identity and geometry, measured by the caller on the
/// frame the resolution runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    /// The section's identifier attribute, also the nav link fragment.
    pub id: String,
    /// Document-relative top edge in pixels.
    pub top: f64,
    /// Rendered height in pixels.
    pub height: f64,
}

impl SectionSpan {
    /// Convenience constructor for measured geometry.
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve which section is active at `scroll_y`.
///
/// A span matches when `scroll_y` falls in
/// `[top - probe_offset_px, top - probe_offset_px + height)`. The LAST
/// matching span in slice order wins.
#[must_use]
pub fn resolve_active(
    spans: &[SectionSpan],
    scroll_y: f64,
    probe_offset_px: f64,
) -> Option<&str> {
    let mut current = None;
    for span in spans {
        let start = span.top - probe_offset_px;
        if scroll_y >= start && scroll_y < start + span.height {
            current = Some(span.id.as_str());
        }
    }
    current
}

// ---------------------------------------------------------------------------
// Transition tracking
// ---------------------------------------------------------------------------

/// An active-section transition, including clears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSectionChange {
    /// Section that was active before, if any.
    pub previous: Option<String>,
    /// Section that is active now, if any.
    pub current: Option<String>,
}

/// Remembers the active section and reports transitions, so the DOM is
/// only rewritten when the highlight actually moves.
#[derive(Debug, Default)]
pub struct ActiveSectionTracker {
    current: Option<String>,
}

impl ActiveSectionTracker {
    /// Create a tracker with no active section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a resolution result into the tracker.
    ///
    /// Returns `Some` only when the active section changed, including the
    /// transition to "none active".
    pub fn update(&mut self, resolved: Option<&str>) -> Option<ActiveSectionChange> {
        if self.current.as_deref() == resolved {
            return None;
        }
        let change = ActiveSectionChange {
            previous: self.current.take(),
            current: resolved.map(str::to_owned),
        };
        self.current = change.current.clone();
        Some(change)
    }

    /// The currently active section id.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionSpan> {
        vec![
            SectionSpan::new("about", 600.0, 500.0),
            SectionSpan::new("skills", 1100.0, 700.0),
            SectionSpan::new("experience", 1800.0, 900.0),
        ]
    }

    #[test]
    fn position_inside_exactly_one_window() {
        let spans = page();
        assert_eq!(resolve_active(&spans, 700.0, 100.0), Some("about"));
        assert_eq!(resolve_active(&spans, 1200.0, 100.0), Some("skills"));
        assert_eq!(resolve_active(&spans, 2000.0, 100.0), Some("experience"));
    }

    #[test]
    fn window_boundaries_are_half_open() {
        let spans = page();
        // Window for "about" is [500, 1000).
        assert_eq!(resolve_active(&spans, 500.0, 100.0), Some("about"));
        assert_eq!(resolve_active(&spans, 999.9, 100.0), Some("about"));
        // 1000 falls into the next window, which starts at exactly 1000.
        assert_eq!(resolve_active(&spans, 1000.0, 100.0), Some("skills"));
    }

    #[test]
    fn no_match_resolves_none() {
        let spans = page();
        assert_eq!(resolve_active(&spans, 0.0, 100.0), None);
        assert_eq!(resolve_active(&spans, 499.9, 100.0), None);
        assert_eq!(resolve_active(&spans, 2700.0, 100.0), None);
        assert_eq!(resolve_active(&[], 700.0, 100.0), None);
    }

    #[test]
    fn overlap_gives_last_in_document_order() {
        let spans = vec![
            SectionSpan::new("first", 100.0, 1000.0),
            SectionSpan::new("second", 400.0, 1000.0),
        ];
        // 500 sits inside both windows; the later section wins.
        assert_eq!(resolve_active(&spans, 500.0, 100.0), Some("second"));
        // Before the second window opens, the first still holds.
        assert_eq!(resolve_active(&spans, 200.0, 100.0), Some("first"));
    }

    #[test]
    fn tracker_reports_transitions_once() {
        let mut tracker = ActiveSectionTracker::new();
        let change = tracker.update(Some("about")).unwrap();
        assert_eq!(change.previous, None);
        assert_eq!(change.current.as_deref(), Some("about"));

        assert_eq!(tracker.update(Some("about")), None);
        assert_eq!(tracker.current(), Some("about"));

        let change = tracker.update(Some("skills")).unwrap();
        assert_eq!(change.previous.as_deref(), Some("about"));
        assert_eq!(change.current.as_deref(), Some("skills"));
    }

    #[test]
    fn tracker_reports_clear_when_nothing_matches() {
        let mut tracker = ActiveSectionTracker::new();
        let _ = tracker.update(Some("about"));
        let change = tracker.update(None).unwrap();
        assert_eq!(change.previous.as_deref(), Some("about"));
        assert_eq!(change.current, None);
        assert_eq!(tracker.current(), None);

        // Still nothing active: no repeated clear.
        assert_eq!(tracker.update(None), None);
    }

    #[test]
    fn zero_height_section_never_matches() {
        let spans = vec![SectionSpan::new("empty", 300.0, 0.0)];
        assert_eq!(resolve_active(&spans, 200.0, 100.0), None);
        assert_eq!(resolve_active(&spans, 300.0, 100.0), None);
    }
}
