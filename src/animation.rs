use crate::damper::damp;
use crate::math::Rgb;
use crate::state::PointerVector;

/// Scale every shape shrinks to while its section is not active
pub const INACTIVE_SCALE: f64 = 0.3;
/// Per-frame weight used to ease scale toward its target
pub const SCALE_DAMPING: f64 = 0.05;
/// Per-frame weight used to ease opacity toward its target
pub const OPACITY_DAMPING: f64 = 0.05;

/// Inputs sampled once per rendered frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationFrameParams {
    /// Seconds since the frame clock started
    pub elapsed: f64,
    pub scroll_progress: f64,
    pub pointer: PointerVector,
    pub is_active: bool,
}

/// Named values handed to a shader program every frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Uniforms {
    pub time: f64,
    pub mouse_x: f64,
    pub mouse_y: f64,
    pub color_a: Rgb,
    pub color_b: Rgb,
    pub color_shift: f64,
}

/// Material parameters driven per frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialState {
    Opacity(f64),
    Uniforms(Uniforms),
}

/// Everything the rasterizer needs to place and paint one shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeVisualState {
    pub rotation: [f64; 3],
    pub position: [f64; 2],
    pub scale: f64,
    pub material: MaterialState,
}

/// `angle = elapsed * time_rate + progress * scroll_rate`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisMotion {
    pub time_rate: f64,
    pub scroll_rate: f64,
}

impl AxisMotion {
    pub const STILL: AxisMotion = AxisMotion {
        time_rate: 0.0,
        scroll_rate: 0.0,
    };

    pub fn angle(&self, elapsed: f64, progress: f64) -> f64 {
        elapsed * self.time_rate + progress * self.scroll_rate
    }
}

/// `sin(elapsed * frequency) * amplitude`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Oscillation {
    pub const NONE: Oscillation = Oscillation {
        frequency: 0.0,
        amplitude: 0.0,
    };

    pub fn at(&self, elapsed: f64) -> f64 {
        (elapsed * self.frequency).sin() * self.amplitude
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialMotion {
    /// Ease a flat material's opacity toward one of two levels
    FadeOpacity { active: f64, inactive: f64 },
    /// Write shader uniforms directly every frame
    DriveUniforms {
        color_a: Rgb,
        color_b: Rgb,
        /// Multiplier applied to scroll progress for `color_shift`
        color_shift_rate: f64,
    },
}

/// Per-shape animation constants
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub rotation: [AxisMotion; 3],
    /// Added on top of the z rotation
    pub wobble_z: Oscillation,
    /// Pointer-to-offset multipliers for x and y
    pub parallax: [f64; 2],
    /// Scale while featured, multiplied by `1 + pulse`
    pub featured_scale: f64,
    pub pulse: Oscillation,
    pub material: MaterialMotion,
}

impl Motion {
    /// State a shape starts in before its first frame
    pub fn initial_state(&self) -> ShapeVisualState {
        let material = match self.material {
            MaterialMotion::FadeOpacity { .. } => MaterialState::Opacity(1.0),
            MaterialMotion::DriveUniforms {
                color_a, color_b, ..
            } => MaterialState::Uniforms(Uniforms {
                color_a,
                color_b,
                ..Uniforms::default()
            }),
        };
        ShapeVisualState {
            rotation: [0.0; 3],
            position: [0.0; 2],
            scale: 1.0,
            material,
        }
    }

    pub fn target_scale(&self, elapsed: f64, is_active: bool) -> f64 {
        if is_active {
            (self.pulse.at(elapsed) + 1.0) * self.featured_scale
        } else {
            INACTIVE_SCALE
        }
    }
}

/// Computes a shape's visual state for one frame
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    motion: Motion,
}

impl AnimationDriver {
    pub fn new(motion: Motion) -> Self {
        AnimationDriver { motion }
    }

    /// Rotation, parallax and uniforms follow the inputs directly; scale and
    /// opacity ease from `previous` toward their targets.
    pub fn frame(
        &self,
        params: &AnimationFrameParams,
        previous: &ShapeVisualState,
    ) -> ShapeVisualState {
        let motion = &self.motion;
        let t = params.elapsed;
        let p = params.scroll_progress;

        let rotation = [
            motion.rotation[0].angle(t, p),
            motion.rotation[1].angle(t, p),
            motion.rotation[2].angle(t, p) + motion.wobble_z.at(t),
        ];
        let position = [
            params.pointer.x * motion.parallax[0],
            params.pointer.y * motion.parallax[1],
        ];
        let scale = damp(
            previous.scale,
            motion.target_scale(t, params.is_active),
            SCALE_DAMPING,
        );

        let material = match motion.material {
            MaterialMotion::FadeOpacity { active, inactive } => {
                let current = match previous.material {
                    MaterialState::Opacity(opacity) => opacity,
                    MaterialState::Uniforms(_) => 1.0,
                };
                let target = if params.is_active { active } else { inactive };
                MaterialState::Opacity(damp(current, target, OPACITY_DAMPING))
            }
            MaterialMotion::DriveUniforms {
                color_a,
                color_b,
                color_shift_rate,
            } => MaterialState::Uniforms(Uniforms {
                time: t,
                mouse_x: params.pointer.x,
                mouse_y: params.pointer.y,
                color_a,
                color_b,
                color_shift: p * color_shift_rate,
            }),
        };

        ShapeVisualState {
            rotation,
            position,
            scale,
            material,
        }
    }
}
