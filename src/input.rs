use crate::state::{PointerVector, Viewport};

/// Maps a position on the input surface to [-1, 1] on both axes, with the
/// y axis pointing up. Returns `None` for a zero-sized viewport.
pub fn normalize_pointer(client_x: f64, client_y: f64, viewport: Viewport) -> Option<PointerVector> {
    if viewport.is_empty() {
        return None;
    }
    let x = (client_x / f64::from(viewport.width)) * 2.0 - 1.0;
    let y = -(client_y / f64::from(viewport.height)) * 2.0 + 1.0;
    Some(PointerVector::clamped(x, y))
}

/// Records the latest pointer or touch position as the smoothing target
#[derive(Clone, Debug, Default)]
pub struct MouseTracker {
    target: PointerVector,
}

impl MouseTracker {
    pub fn new() -> Self {
        MouseTracker::default()
    }

    pub fn target(&self) -> PointerVector {
        self.target
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64, viewport: Viewport) {
        if let Some(target) = normalize_pointer(client_x, client_y, viewport) {
            self.target = target;
        }
    }

    /// Uses the first touch point; an event without touches is ignored
    pub fn on_touch_move(&mut self, touches: &[(f64, f64)], viewport: Viewport) {
        if let Some(&(client_x, client_y)) = touches.first() {
            self.on_pointer_move(client_x, client_y, viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 80,
        height: 24,
    };

    #[test]
    fn edges_map_to_unit_bounds() {
        assert_eq!(
            normalize_pointer(0.0, 0.0, VIEWPORT),
            Some(PointerVector { x: -1.0, y: 1.0 })
        );
        assert_eq!(
            normalize_pointer(80.0, 24.0, VIEWPORT),
            Some(PointerVector { x: 1.0, y: -1.0 })
        );
        assert_eq!(
            normalize_pointer(40.0, 12.0, VIEWPORT),
            Some(PointerVector { x: 0.0, y: 0.0 })
        );
    }

    #[test]
    fn positions_inside_viewport_stay_in_range() {
        for column in 0..=80 {
            for row in 0..=24 {
                let pointer = normalize_pointer(column as f64, row as f64, VIEWPORT).unwrap();
                assert!((-1.0..=1.0).contains(&pointer.x));
                assert!((-1.0..=1.0).contains(&pointer.y));
            }
        }
    }

    #[test]
    fn latest_event_wins() {
        let mut tracker = MouseTracker::new();
        tracker.on_pointer_move(10.0, 3.0, VIEWPORT);
        tracker.on_pointer_move(60.0, 18.0, VIEWPORT);
        assert_eq!(tracker.target(), PointerVector { x: 0.5, y: -0.5 });
    }

    #[test]
    fn touch_without_points_is_ignored() {
        let mut tracker = MouseTracker::new();
        tracker.on_pointer_move(60.0, 18.0, VIEWPORT);
        tracker.on_touch_move(&[], VIEWPORT);
        assert_eq!(tracker.target(), PointerVector { x: 0.5, y: -0.5 });

        tracker.on_touch_move(&[(20.0, 6.0), (70.0, 2.0)], VIEWPORT);
        assert_eq!(tracker.target(), PointerVector { x: -0.5, y: 0.5 });
    }

    #[test]
    fn empty_viewport_keeps_previous_target() {
        let mut tracker = MouseTracker::new();
        tracker.on_pointer_move(60.0, 18.0, VIEWPORT);
        tracker.on_pointer_move(5.0, 5.0, Viewport::new(0, 0));
        assert_eq!(tracker.target(), PointerVector { x: 0.5, y: -0.5 });
    }
}
