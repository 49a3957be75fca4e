use crate::math::{edge_function, normalize, Rgb, Vec3};
use crate::vertex::{Varyings, Vertex};

/// Perspective camera on the +Z axis looking toward the origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub distance: f64,
    /// Vertical field of view in degrees
    pub fov_y: f64,
    pub near: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            distance: 5.0,
            fov_y: 75.0,
            near: 0.1,
        }
    }
}

impl Camera {
    /// Projects a world-space point into pixel coordinates, returning the
    /// screen position and depth, or `None` when it lies behind the near plane
    pub fn project(&self, world: &Vec3, width: usize, height: usize) -> Option<([f64; 2], f64)> {
        let depth = self.distance - world[2];
        if depth < self.near || width == 0 || height == 0 {
            return None;
        }
        let focal = 1.0 / (self.fov_y.to_radians() / 2.0).tan();
        let aspect = width as f64 / height as f64;
        let ndc_x = world[0] * focal / (aspect * depth);
        let ndc_y = world[1] * focal / depth;
        let screen_x = (ndc_x + 1.0) / 2.0 * width as f64;
        let screen_y = (1.0 - ndc_y) / 2.0 * height as f64;
        Some(([screen_x, screen_y], depth))
    }
}

/// Color and depth buffers of one frame
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    z_buffer: Vec<f64>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Rgb) -> Self {
        Canvas {
            width,
            height,
            pixels: vec![background; width * height],
            z_buffer: vec![f64::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    pub fn clear(&mut self, background: Rgb) {
        self.pixels.fill(background);
        self.z_buffer.fill(f64::INFINITY);
    }

    /// Fills a depth-tested triangle, shading each covered pixel with `shade`.
    /// Either winding is accepted.
    pub fn draw_triangle<F>(&mut self, v0: &Vertex, v1: &Vertex, v2: &Vertex, shade: &mut F)
    where
        F: FnMut(&Varyings) -> Rgb,
    {
        if self.width == 0 || self.height == 0 {
            return;
        }

        // Precompute area of the triangle
        let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
        if area == 0.0 {
            return;
        }

        // Compute bounding box of the triangle
        let min_x = v0.screen_position[0]
            .min(v1.screen_position[0])
            .min(v2.screen_position[0])
            .floor()
            .max(0.0) as usize;
        let max_x = v0.screen_position[0]
            .max(v1.screen_position[0])
            .max(v2.screen_position[0])
            .ceil()
            .min(self.width as f64 - 1.0);
        let min_y = v0.screen_position[1]
            .min(v1.screen_position[1])
            .min(v2.screen_position[1])
            .floor()
            .max(0.0) as usize;
        let max_y = v0.screen_position[1]
            .max(v1.screen_position[1])
            .max(v2.screen_position[1])
            .ceil()
            .min(self.height as f64 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as usize, max_y as usize);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = [x as f64 + 0.5, y as f64 + 0.5];

                // Dividing by the signed area makes the weights positive
                // inside the triangle for both windings
                let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
                let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
                let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
                let offset = y * self.width + x;
                if depth >= self.z_buffer[offset] {
                    continue;
                }
                self.z_buffer[offset] = depth;

                let varyings = Varyings {
                    position: interpolate(&v0.position, &v1.position, &v2.position, w0, w1, w2),
                    normal: normalize(&interpolate(
                        &v0.normal, &v1.normal, &v2.normal, w0, w1, w2,
                    )),
                };
                self.pixels[offset] = shade(&varyings);
            }
        }
    }

    /// Blends a line over the frame using Bresenham's algorithm. Pixels
    /// behind already drawn surfaces are skipped; the depth buffer is left
    /// untouched.
    pub fn draw_line(&mut self, from: &Vertex, to: &Vertex, color: Rgb, opacity: f64) {
        let (mut x0, mut y0, x1, y1) = (
            from.screen_position[0].round() as isize,
            from.screen_position[1].round() as isize,
            to.screen_position[0].round() as isize,
            to.screen_position[1].round() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        let steps = dx.max(-dy).max(1) as f64;
        let mut step = 0.0;

        loop {
            if x0 >= 0 && x0 < self.width as isize && y0 >= 0 && y0 < self.height as isize {
                let offset = y0 as usize * self.width + x0 as usize;
                let depth = from.depth + (to.depth - from.depth) * (step / steps);
                if depth <= self.z_buffer[offset] {
                    self.pixels[offset] = self.pixels[offset].mix(color, opacity);
                }
            }

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
            step += 1.0;
        }
    }
}

fn interpolate(a: &Vec3, b: &Vec3, c: &Vec3, w0: f64, w1: f64, w2: f64) -> Vec3 {
    [
        a[0] * w0 + b[0] * w1 + c[0] * w2,
        a[1] * w0 + b[1] * w1 + c[1] * w2,
        a[2] * w0 + b[2] * w1 + c[2] * w2,
    ]
}
