use crate::state::PointerVector;

/// Default weight used to smooth the pointer
pub const DEFAULT_DAMPING_FACTOR: f64 = 0.1;

/// One step of exponential smoothing: `current += (target - current) * factor`
pub fn damp(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Smooths the pointer target toward a current vector once per tick
#[derive(Clone, Debug)]
pub struct Damper {
    factor: f64,
    current: PointerVector,
}

impl Damper {
    /// `factor` must lie in (0, 1]; larger values settle faster
    pub fn new(factor: f64) -> Self {
        Damper {
            factor,
            current: PointerVector::ZERO,
        }
    }

    /// Advances the current vector one step toward `target` and returns it
    pub fn tick(&mut self, target: PointerVector) -> PointerVector {
        self.current = PointerVector {
            x: damp(self.current.x, target.x, self.factor),
            y: damp(self.current.y, target.y, self.factor),
        };
        self.current
    }

    pub fn current(&self) -> PointerVector {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_geometrically() {
        let factor = 0.1;
        let mut damper = Damper::new(factor);
        let target = PointerVector { x: 1.0, y: -0.5 };

        for k in 1..=40 {
            let current = damper.tick(target);
            let expected = (1.0 - factor).powi(k);
            assert!(((target.x - current.x).abs() - expected).abs() < 1e-12);
            assert!(((target.y - current.y).abs() - 0.5 * expected).abs() < 1e-12);
        }
    }

    #[test]
    fn never_overshoots() {
        let mut damper = Damper::new(0.35);
        let target = PointerVector { x: -0.8, y: 0.9 };
        let mut previous = damper.current();
        for _ in 0..100 {
            let current = damper.tick(target);
            assert!(current.x <= previous.x && current.x >= target.x);
            assert!(current.y >= previous.y && current.y <= target.y);
            previous = current;
        }
    }

    #[test]
    fn full_factor_snaps_to_target() {
        let mut damper = Damper::new(1.0);
        let target = PointerVector { x: 0.4, y: 0.2 };
        assert_eq!(damper.tick(target), target);
    }

    #[test]
    fn settled_value_is_stable() {
        assert_eq!(damp(1.2, 1.2, 0.05), 1.2);
        assert_eq!(damp(0.3, 0.3, 0.05), 0.3);
    }
}
