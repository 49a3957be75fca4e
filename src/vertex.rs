use crate::math::Vec3;

/// Projected vertex ready for rasterization
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Object-space position, interpolated for the fragment program
    pub position: Vec3,
    /// View-space normal
    pub normal: Vec3,
    pub screen_position: [f64; 2],
    /// Distance in front of the camera
    pub depth: f64,
}

/// Per-pixel inputs of a fragment program
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Varyings {
    pub position: Vec3,
    pub normal: Vec3,
}
