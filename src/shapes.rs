use std::collections::BTreeSet;
use std::f64::consts::{PI, TAU};

use crate::animation::{
    AnimationDriver, AnimationFrameParams, AxisMotion, MaterialMotion, MaterialState, Motion,
    Oscillation, ShapeVisualState, Uniforms,
};
use crate::graphics::{Camera, Canvas};
use crate::math::{
    apply_lighting, calculate_light_intensity, euler_xyz, fract, hsv_to_rgb, multiply_matrix_vector,
    normalize, Rgb, Vec3,
};
use crate::vertex::{Varyings, Vertex};

const VIOLET: Rgb = Rgb::from_hex(0xa78bfa);
const PINK: Rgb = Rgb::from_hex(0xec4899);

/// Parametric description of a mesh
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Icosahedron {
        radius: f64,
    },
    Sphere {
        radius: f64,
        width_segments: usize,
        height_segments: usize,
    },
    Torus {
        radius: f64,
        tube: f64,
        radial_segments: usize,
        tubular_segments: usize,
    },
}

impl Geometry {
    pub fn build(&self) -> Mesh {
        match *self {
            Geometry::Icosahedron { radius } => Mesh::icosahedron(radius),
            Geometry::Sphere {
                radius,
                width_segments,
                height_segments,
            } => Mesh::sphere(radius, width_segments, height_segments),
            Geometry::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => Mesh::torus(radius, tube, radial_segments, tubular_segments),
        }
    }
}

/// Indexed triangle mesh with per-vertex normals
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub triangles: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn icosahedron(radius: f64) -> Self {
        let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let corners = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ];
        let triangles = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        let normals: Vec<Vec3> = corners.iter().map(normalize).collect();
        let positions = normals
            .iter()
            .map(|n| [n[0] * radius, n[1] * radius, n[2] * radius])
            .collect();
        Mesh {
            positions,
            normals,
            triangles,
        }
    }

    /// UV sphere; the seam column and the pole rows repeat vertices
    pub fn sphere(radius: f64, width_segments: usize, height_segments: usize) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);
        let mut mesh = Mesh::default();
        let mut grid = Vec::with_capacity(height_segments + 1);

        for iy in 0..=height_segments {
            let v = iy as f64 / height_segments as f64;
            let mut row = Vec::with_capacity(width_segments + 1);
            for ix in 0..=width_segments {
                let u = ix as f64 / width_segments as f64;
                let position = [
                    -radius * (u * TAU).cos() * (v * PI).sin(),
                    radius * (v * PI).cos(),
                    radius * (u * TAU).sin() * (v * PI).sin(),
                ];
                row.push(mesh.positions.len());
                mesh.normals.push(normalize(&position));
                mesh.positions.push(position);
            }
            grid.push(row);
        }

        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];
                if iy != 0 {
                    mesh.triangles.push([a, b, d]);
                }
                if iy != height_segments - 1 {
                    mesh.triangles.push([b, c, d]);
                }
            }
        }
        mesh
    }

    /// Ring torus lying in the XY plane
    pub fn torus(radius: f64, tube: f64, radial_segments: usize, tubular_segments: usize) -> Self {
        let radial_segments = radial_segments.max(3);
        let tubular_segments = tubular_segments.max(3);
        let mut mesh = Mesh::default();

        for j in 0..=radial_segments {
            let v = j as f64 / radial_segments as f64 * TAU;
            for i in 0..=tubular_segments {
                let u = i as f64 / tubular_segments as f64 * TAU;
                let position = [
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                ];
                let center = [radius * u.cos(), radius * u.sin(), 0.0];
                mesh.normals.push(normalize(&[
                    position[0] - center[0],
                    position[1] - center[1],
                    position[2] - center[2],
                ]));
                mesh.positions.push(position);
            }
        }

        let stride = tubular_segments + 1;
        for j in 1..=radial_segments {
            for i in 1..=tubular_segments {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;
                mesh.triangles.push([a, b, d]);
                mesh.triangles.push([b, c, d]);
            }
        }
        mesh
    }

    /// Unique undirected edges of all triangles
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = BTreeSet::new();
        for &[a, b, c] in &self.triangles {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                edges.insert((from.min(to), from.max(to)));
            }
        }
        edges.into_iter().collect()
    }
}

/// Per-vertex and per-pixel programs run by the software rasterizer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShaderProgram {
    /// Sine-wave displacement along the normal with a two-color vertical gradient
    WaveGradient,
    /// Undisplaced surface with a lit, scroll-shifted rainbow
    Rainbow,
}

impl ShaderProgram {
    /// Vertex stage: returns the displaced object-space position
    pub fn displace(&self, position: &Vec3, uniforms: &Uniforms) -> Vec3 {
        match self {
            ShaderProgram::WaveGradient => {
                let [x, y, z] = *position;
                let time = uniforms.time;
                let mut wave = (x * 2.0 + time).sin() * 0.1;
                wave += (y * 3.0 + time * 1.5).sin() * 0.1;
                wave += (z * 2.5 + time * 0.8).sin() * 0.1;
                wave += (uniforms.mouse_x * 5.0 + time).sin() * 0.05;
                wave += (uniforms.mouse_y * 5.0 + time).cos() * 0.05;

                let direction = normalize(position);
                [
                    x + direction[0] * wave,
                    y + direction[1] * wave,
                    z + direction[2] * wave,
                ]
            }
            ShaderProgram::Rainbow => *position,
        }
    }

    /// Fragment stage
    pub fn shade(&self, varyings: &Varyings, uniforms: &Uniforms) -> Rgb {
        match self {
            ShaderProgram::WaveGradient => {
                let mix = ((varyings.position[1] * 2.0 + uniforms.time).sin() + 1.0) * 0.5;
                uniforms.color_a.mix(uniforms.color_b, mix)
            }
            ShaderProgram::Rainbow => {
                let hue = fract(
                    varyings.position[0] * 0.3
                        + varyings.position[1] * 0.3
                        + uniforms.time * 0.1
                        + uniforms.color_shift * 0.1,
                );
                let color = hsv_to_rgb(hue, 0.8, 1.0);
                let diffuse = calculate_light_intensity(&varyings.normal, &[1.0, 1.0, 1.0], 0.3);
                apply_lighting(color, diffuse)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Flat-colored, alpha-blended edges
    Wireframe { color: Rgb },
    Shader(ShaderProgram),
}

impl Material {
    pub fn is_transparent(&self) -> bool {
        matches!(self, Material::Wireframe { .. })
    }
}

/// Geometry, material and animation constants of one shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeConfig {
    pub name: &'static str,
    pub geometry: Geometry,
    pub material: Material,
    pub motion: Motion,
}

pub const ICOSAHEDRON: ShapeConfig = ShapeConfig {
    name: "icosahedron",
    geometry: Geometry::Icosahedron { radius: 2.0 },
    material: Material::Wireframe { color: VIOLET },
    motion: Motion {
        rotation: [
            AxisMotion {
                time_rate: 0.2,
                scroll_rate: TAU,
            },
            AxisMotion {
                time_rate: 0.15,
                scroll_rate: PI,
            },
            AxisMotion::STILL,
        ],
        wobble_z: Oscillation::NONE,
        parallax: [0.5, 0.3],
        featured_scale: 1.2,
        pulse: Oscillation {
            frequency: 2.0,
            amplitude: 0.1,
        },
        material: MaterialMotion::FadeOpacity {
            active: 1.0,
            inactive: 0.2,
        },
    },
};

pub const SPHERE: ShapeConfig = ShapeConfig {
    name: "sphere",
    geometry: Geometry::Sphere {
        radius: 1.5,
        width_segments: 64,
        height_segments: 64,
    },
    material: Material::Shader(ShaderProgram::WaveGradient),
    motion: Motion {
        rotation: [
            AxisMotion {
                time_rate: 0.3,
                scroll_rate: PI,
            },
            AxisMotion {
                time_rate: 0.2,
                scroll_rate: TAU,
            },
            AxisMotion::STILL,
        ],
        wobble_z: Oscillation::NONE,
        parallax: [0.8, 0.5],
        featured_scale: 2.0,
        pulse: Oscillation::NONE,
        material: MaterialMotion::DriveUniforms {
            color_a: VIOLET,
            color_b: PINK,
            color_shift_rate: 0.0,
        },
    },
};

pub const TORUS: ShapeConfig = ShapeConfig {
    name: "torus",
    geometry: Geometry::Torus {
        radius: 1.5,
        tube: 0.6,
        radial_segments: 32,
        tubular_segments: 100,
    },
    material: Material::Shader(ShaderProgram::Rainbow),
    motion: Motion {
        rotation: [
            AxisMotion {
                time_rate: 0.5,
                scroll_rate: PI,
            },
            AxisMotion {
                time_rate: 0.4,
                scroll_rate: PI * 1.5,
            },
            AxisMotion::STILL,
        ],
        wobble_z: Oscillation {
            frequency: 0.3,
            amplitude: 0.2,
        },
        parallax: [1.2, 0.8],
        featured_scale: 1.8,
        pulse: Oscillation::NONE,
        material: MaterialMotion::DriveUniforms {
            color_a: VIOLET,
            color_b: PINK,
            color_shift_rate: 10.0,
        },
    },
};

/// Shapes in section order
pub const SHAPES: [ShapeConfig; 3] = [ICOSAHEDRON, SPHERE, TORUS];

/// Built mesh and the state the rasterizer reads every frame
#[derive(Clone, Debug)]
pub struct RenderHandle {
    mesh: Mesh,
    edges: Vec<(usize, usize)>,
    visual: ShapeVisualState,
}

/// One animated shape: drives its visual state and rasterizes it
#[derive(Clone, Debug)]
pub struct ShapeRenderer {
    config: ShapeConfig,
    driver: AnimationDriver,
    handle: Option<RenderHandle>,
}

impl ShapeRenderer {
    pub fn new(config: ShapeConfig) -> Self {
        ShapeRenderer {
            config,
            driver: AnimationDriver::new(config.motion),
            handle: None,
        }
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    /// Builds the mesh; until then frames are skipped
    pub fn attach(&mut self) {
        let mesh = self.config.geometry.build();
        let edges = match self.config.material {
            Material::Wireframe { .. } => mesh.edges(),
            Material::Shader(_) => Vec::new(),
        };
        log::debug!(
            "attached {} ({} vertices, {} triangles)",
            self.config.name,
            mesh.positions.len(),
            mesh.triangles.len()
        );
        self.handle = Some(RenderHandle {
            mesh,
            edges,
            visual: self.config.motion.initial_state(),
        });
    }

    pub fn visual(&self) -> Option<&ShapeVisualState> {
        self.handle.as_ref().map(|handle| &handle.visual)
    }

    /// Advances the visual state by one frame
    pub fn update(&mut self, params: &AnimationFrameParams) {
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        handle.visual = self.driver.frame(params, &handle.visual);
    }

    pub fn draw(&self, canvas: &mut Canvas, camera: &Camera) {
        let Some(handle) = self.handle.as_ref() else {
            return;
        };
        let visual = &handle.visual;
        let uniforms = match visual.material {
            MaterialState::Uniforms(uniforms) => uniforms,
            MaterialState::Opacity(_) => Uniforms::default(),
        };
        let (width, height) = (canvas.width(), canvas.height());
        let rotation = euler_xyz(&visual.rotation);

        let vertices: Vec<Option<Vertex>> = handle
            .mesh
            .positions
            .iter()
            .zip(handle.mesh.normals.iter())
            .map(|(position, normal)| {
                let local = match self.config.material {
                    Material::Shader(program) => program.displace(position, &uniforms),
                    Material::Wireframe { .. } => *position,
                };
                let scaled = [
                    local[0] * visual.scale,
                    local[1] * visual.scale,
                    local[2] * visual.scale,
                ];
                let rotated = multiply_matrix_vector(&rotation, &scaled);
                let world = [
                    rotated[0] + visual.position[0],
                    rotated[1] + visual.position[1],
                    rotated[2],
                ];
                camera
                    .project(&world, width, height)
                    .map(|(screen_position, depth)| Vertex {
                        position: *position,
                        normal: normalize(&multiply_matrix_vector(&rotation, normal)),
                        screen_position,
                        depth,
                    })
            })
            .collect();

        match self.config.material {
            Material::Wireframe { color } => {
                let opacity = match visual.material {
                    MaterialState::Opacity(opacity) => opacity,
                    MaterialState::Uniforms(_) => 1.0,
                };
                for &(from, to) in &handle.edges {
                    if let (Some(from), Some(to)) = (&vertices[from], &vertices[to]) {
                        canvas.draw_line(from, to, color, opacity);
                    }
                }
            }
            Material::Shader(program) => {
                let mut shade = |varyings: &Varyings| program.shade(varyings, &uniforms);
                for &[a, b, c] in &handle.mesh.triangles {
                    if let (Some(v0), Some(v1), Some(v2)) = (&vertices[a], &vertices[b], &vertices[c])
                    {
                        canvas.draw_triangle(v0, v1, v2, &mut shade);
                    }
                }
            }
        }
    }
}
