pub type Vec3 = [f64; 3];
pub type Mat3 = [[f64; 3]; 3];

/// Linear RGB color with components in [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Rgb { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Rgb {
            r: ((hex >> 16) & 0xff) as f64 / 255.0,
            g: ((hex >> 8) & 0xff) as f64 / 255.0,
            b: (hex & 0xff) as f64 / 255.0,
        }
    }

    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }

    /// `mix(self, other, t)`
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &Mat3, vector: &Vec3) -> Vec3 {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Rotation matrix for Euler angles applied in X, Y, Z order
/// (the resulting matrix is `Rx * Ry * Rz`)
pub fn euler_xyz(angles: &Vec3) -> Mat3 {
    let (sin_x, cos_x) = angles[0].sin_cos();
    let (sin_y, cos_y) = angles[1].sin_cos();
    let (sin_z, cos_z) = angles[2].sin_cos();

    let rotation_x = [[1.0, 0.0, 0.0], [0.0, cos_x, -sin_x], [0.0, sin_x, cos_x]];
    let rotation_y = [[cos_y, 0.0, sin_y], [0.0, 1.0, 0.0], [-sin_y, 0.0, cos_y]];
    let rotation_z = [[cos_z, -sin_z, 0.0], [sin_z, cos_z, 0.0], [0.0, 0.0, 1.0]];

    multiply_matrices(&multiply_matrices(&rotation_x, &rotation_y), &rotation_z)
}

pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn length(v: &Vec3) -> f64 {
    dot(v, v).sqrt()
}

/// Returns the unit vector, or the input unchanged when it has zero length
pub fn normalize(v: &Vec3) -> Vec3 {
    let length = length(v);
    if length == 0.0 {
        return *v;
    }
    [v[0] / length, v[1] / length, v[2] / length]
}

pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// HSV to RGB conversion, all components in [0, 1]
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb {
    let channel = |offset: f64| {
        let p = (fract(hue + offset) * 6.0 - 3.0).abs();
        value * (1.0 + ((p - 1.0).clamp(0.0, 1.0) - 1.0) * saturation)
    };
    Rgb::new(channel(1.0), channel(2.0 / 3.0), channel(1.0 / 3.0))
}

/// Diffuse intensity of a directional light, never below `ambient`
pub fn calculate_light_intensity(normal: &Vec3, light_dir: &Vec3, ambient: f64) -> f64 {
    dot(normal, &normalize(light_dir)).max(ambient)
}

/// Applies lighting to a color
pub fn apply_lighting(color: Rgb, intensity: f64) -> Rgb {
    Rgb::new(
        (color.r * intensity).min(1.0),
        (color.g * intensity).min(1.0),
        (color.b * intensity).min(1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < EPSILON, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn hex_colors_decode_per_channel() {
        let (r, g, b) = Rgb::from_hex(0xa78bfa).to_rgb8();
        assert_eq!((r, g, b), (0xa7, 0x8b, 0xfa));
    }

    #[test]
    fn euler_rotation_applies_z_first() {
        // Rz(90) maps x to y, then Rx(90) maps y to z
        let matrix = euler_xyz(&[FRAC_PI_2, 0.0, FRAC_PI_2]);
        assert_vec_eq(multiply_matrix_vector(&matrix, &[1.0, 0.0, 0.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn zero_rotation_is_identity() {
        let matrix = euler_xyz(&[0.0, 0.0, 0.0]);
        assert_vec_eq(multiply_matrix_vector(&matrix, &[0.3, -2.0, 5.0]), [0.3, -2.0, 5.0]);
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0).to_rgb8(), (255, 0, 0));
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0).to_rgb8(), (0, 255, 0));
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0).to_rgb8(), (0, 0, 255));
        assert_eq!(hsv_to_rgb(0.5, 0.0, 1.0).to_rgb8(), (255, 255, 255));
    }

    #[test]
    fn light_intensity_has_ambient_floor() {
        let away = calculate_light_intensity(&[0.0, 0.0, -1.0], &[0.0, 0.0, 1.0], 0.3);
        assert_eq!(away, 0.3);
        let facing = calculate_light_intensity(&[0.0, 0.0, 1.0], &[0.0, 0.0, 2.0], 0.3);
        assert!((facing - 1.0).abs() < EPSILON);
    }

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        assert_eq!(normalize(&[0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_vec_eq(normalize(&[0.0, 3.0, 4.0]), [0.0, 0.6, 0.8]);
    }
}
