/// Normalized pointer position, each component within [-1, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerVector {
    pub x: f64,
    pub y: f64,
}

impl PointerVector {
    pub const ZERO: PointerVector = PointerVector { x: 0.0, y: 0.0 };

    /// Creates a vector with both components clamped to [-1, 1]
    pub fn clamped(x: f64, y: f64) -> Self {
        PointerVector {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }
}

/// Scroll progress through the document and the section it falls into
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Progress in [0, 1]
    pub progress: f64,
    /// Active section, one of 0, 1 or 2
    pub active_section: usize,
}

/// Size of the input surface in terminal cells
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Viewport { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_pointer_stays_in_range() {
        let pointer = PointerVector::clamped(1.7, -3.0);
        assert_eq!(pointer, PointerVector { x: 1.0, y: -1.0 });

        let pointer = PointerVector::clamped(0.25, -0.5);
        assert_eq!(pointer, PointerVector { x: 0.25, y: -0.5 });
    }

    #[test]
    fn zero_sized_viewport_is_empty() {
        assert!(Viewport::new(0, 24).is_empty());
        assert!(Viewport::new(80, 0).is_empty());
        assert!(!Viewport::new(80, 24).is_empty());
    }
}
