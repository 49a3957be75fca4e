use crate::state::ScrollState;

/// Number of content sections in the document, each one viewport tall
pub const SECTION_COUNT: usize = 3;

/// Progress values at which the second and third sections become active
pub const SECTION_THRESHOLDS: [f64; 2] = [0.33, 0.66];

/// Normalized scroll progress, clamped to [0, 1].
///
/// A document no taller than the viewport cannot scroll, so it reports 0
/// instead of dividing by a non-positive height.
pub fn scroll_progress(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable).clamp(0.0, 1.0)
}

/// Maps progress onto one of the three sections
pub fn section_for_progress(progress: f64) -> usize {
    if progress < SECTION_THRESHOLDS[0] {
        0
    } else if progress < SECTION_THRESHOLDS[1] {
        1
    } else {
        2
    }
}

impl ScrollState {
    pub fn from_progress(progress: f64) -> Self {
        ScrollState {
            progress,
            active_section: section_for_progress(progress),
        }
    }
}

/// Tracks the scroll offset through a virtual document of
/// [`SECTION_COUNT`] viewport-tall sections
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    scroll_top: f64,
    viewport_height: f64,
    state: ScrollState,
}

impl ScrollTracker {
    /// Creates a tracker at the top of the document; the state is computed
    /// eagerly so consumers never see an uninitialized value
    pub fn new(viewport_height: u16) -> Self {
        let mut tracker = ScrollTracker {
            scroll_top: 0.0,
            viewport_height: f64::from(viewport_height),
            state: ScrollState::default(),
        };
        tracker.recompute();
        tracker
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn document_height(&self) -> f64 {
        self.viewport_height * SECTION_COUNT as f64
    }

    pub fn max_scroll_top(&self) -> f64 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    /// Scrolls by `rows` (negative scrolls up)
    pub fn scroll_by(&mut self, rows: f64) -> ScrollState {
        self.scroll_to(self.scroll_top + rows)
    }

    pub fn scroll_to(&mut self, scroll_top: f64) -> ScrollState {
        self.scroll_top = scroll_top.clamp(0.0, self.max_scroll_top());
        self.recompute()
    }

    /// Scrolls so that the top of `section` meets the top of the viewport
    pub fn jump_to_section(&mut self, section: usize) -> ScrollState {
        let section = section.min(SECTION_COUNT - 1);
        self.scroll_to(section as f64 * self.viewport_height)
    }

    /// Adapts to a new viewport height, keeping the offset inside the document
    pub fn resize(&mut self, viewport_height: u16) -> ScrollState {
        self.viewport_height = f64::from(viewport_height);
        self.scroll_to(self.scroll_top)
    }

    fn recompute(&mut self) -> ScrollState {
        let progress = scroll_progress(
            self.scroll_top,
            self.document_height(),
            self.viewport_height,
        );
        self.state = ScrollState::from_progress(progress);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_thresholds() {
        let cases = [
            (0.0, 0),
            (0.329999, 0),
            (0.33, 1),
            (0.659999, 1),
            (0.66, 2),
            (1.0, 2),
        ];
        for (progress, section) in cases {
            assert_eq!(section_for_progress(progress), section, "progress {progress}");
        }
    }

    #[test]
    fn progress_is_bounded_and_monotonic() {
        let document_height = 300.0;
        let viewport_height = 100.0;
        let mut previous = 0.0;
        for step in 0..=200 {
            let progress = scroll_progress(step as f64, document_height, viewport_height);
            assert!((0.0..=1.0).contains(&progress));
            assert!(progress >= previous);
            previous = progress;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        assert_eq!(scroll_progress(-20.0, 300.0, 100.0), 0.0);
        assert_eq!(scroll_progress(500.0, 300.0, 100.0), 1.0);
    }

    #[test]
    fn degenerate_document_reports_zero() {
        for scroll_top in [0.0, 10.0, 1e9] {
            let equal = scroll_progress(scroll_top, 100.0, 100.0);
            let shorter = scroll_progress(scroll_top, 50.0, 100.0);
            assert_eq!(equal, 0.0);
            assert_eq!(shorter, 0.0);
        }
    }

    #[test]
    fn tracker_starts_at_first_section() {
        let tracker = ScrollTracker::new(24);
        assert_eq!(tracker.state(), ScrollState { progress: 0.0, active_section: 0 });
        assert_eq!(tracker.document_height(), 72.0);
        assert_eq!(tracker.max_scroll_top(), 48.0);
    }

    #[test]
    fn tracker_clamps_scrolling() {
        let mut tracker = ScrollTracker::new(20);
        assert_eq!(tracker.scroll_by(-5.0).progress, 0.0);
        assert_eq!(tracker.scroll_top(), 0.0);

        let state = tracker.scroll_by(1_000.0);
        assert_eq!(state, ScrollState { progress: 1.0, active_section: 2 });
        assert_eq!(tracker.scroll_top(), 40.0);
    }

    #[test]
    fn jumping_to_a_section_activates_it() {
        let mut tracker = ScrollTracker::new(30);
        // Section tops sit at progress 0, 0.5 and 1
        assert_eq!(tracker.jump_to_section(1).active_section, 1);
        assert_eq!(tracker.jump_to_section(2).active_section, 2);
        assert_eq!(tracker.jump_to_section(0).active_section, 0);
        assert_eq!(tracker.jump_to_section(7).active_section, 2);
    }

    #[test]
    fn resize_keeps_offset_in_document() {
        let mut tracker = ScrollTracker::new(40);
        tracker.scroll_to(80.0);
        let state = tracker.resize(10);
        assert_eq!(tracker.scroll_top(), 20.0);
        assert_eq!(state.progress, 1.0);
    }

    #[test]
    fn zero_height_viewport_never_yields_nan() {
        let mut tracker = ScrollTracker::new(0);
        let state = tracker.scroll_by(3.0);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.active_section, 0);
    }
}
