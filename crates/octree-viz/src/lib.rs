//! Shared visualization utilities for octree intersection scenes.

use std::collections::BTreeSet;

use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};
use octree_intersect::{Geometry, Shape, GEOMETRY_EPSILON};
use ::rand::rngs::StdRng;
use ::rand::{Rng, SeedableRng};

pub mod navigator;
pub use navigator::OctantNavigator;

/// Color of shapes taking part in at least one intersection.
pub const HIT_COLOR: Color = Color::new(1.0, 0.25, 0.2, 1.0);

/// Radius of the sphere drawn for a point shape.
pub const POINT_RADIUS: f32 = 0.08;

/// Converts a library point to a macroquad vector.
pub fn to_vec3(p: &Point3<f64>) -> Vec3 {
    vec3(p.x as f32, p.y as f32, p.z as f32)
}

/// Deterministic muted color derived from a shape index.
pub fn shape_color(index: usize) -> Color {
    // Spread consecutive indices around the hue circle
    let hue = (index as f32 * 0.618_034).fract();
    let rgb = |offset: f32| {
        let x = ((hue + offset).fract() * 6.0 - 3.0).abs() - 1.0;
        0.25 + 0.45 * x.clamp(0.0, 1.0)
    };
    Color::new(rgb(0.0), rgb(2.0 / 3.0), rgb(1.0 / 3.0), 1.0)
}

/// Draws a single shape, in [`HIT_COLOR`] if `highlighted`.
pub fn draw_shape(shape: &Shape, highlighted: bool) {
    let color = if highlighted {
        HIT_COLOR
    } else {
        shape_color(shape.index())
    };

    match shape.geometry() {
        Geometry::Point(p) => draw_sphere(to_vec3(p), POINT_RADIUS, None, color),
        Geometry::Segment(segment) => {
            draw_line_3d(to_vec3(&segment.start()), to_vec3(&segment.end()), color)
        }
        Geometry::Triangle(triangle) => {
            let vertices = triangle
                .vertices()
                .iter()
                .map(|p| Vertex::new2(to_vec3(p), vec2(0.0, 0.0), color))
                .collect();
            let mesh = Mesh {
                vertices,
                indices: vec![0, 1, 2],
                texture: None,
            };
            draw_mesh(&mesh);

            // Outline so that edge-on triangles stay visible
            let [a, b, c] = triangle.vertices();
            let (a, b, c) = (to_vec3(a), to_vec3(b), to_vec3(c));
            draw_line_3d(a, b, BLACK);
            draw_line_3d(b, c, BLACK);
            draw_line_3d(c, a, BLACK);
        }
    }
}

/// Draws every shape, highlighting those listed in `hits`.
pub fn draw_shapes<'a>(shapes: impl IntoIterator<Item = &'a Shape>, hits: &BTreeSet<usize>) {
    for shape in shapes {
        draw_shape(shape, hits.contains(&shape.index()));
    }
}

/// Generates a reproducible scene of small triangles, segments and points.
///
/// Shape centers are uniform in `[-world, world]^3`; vertices lie within
/// `size` of their shape's center on each axis.
pub fn random_scene(seed: u64, count: usize, world: f64, size: f64) -> Vec<Shape> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut coord = |range: f64| rng.gen_range(-range..=range);

    (0..count)
        .map(|index| {
            let base = Point3::new(coord(world), coord(world), coord(world));
            let mut vertex = || base + Vector3::new(coord(size), coord(size), coord(size));
            let vertices = match index % 10 {
                // Mostly triangles, with the odd segment and point
                0 => [base; 3],
                1 => {
                    let end = vertex();
                    [base, end, end]
                }
                _ => [vertex(), vertex(), vertex()],
            };
            Shape::from_vertices(index, vertices, GEOMETRY_EPSILON)
        })
        .collect()
}

/// Simple orbit camera for 3D scene navigation.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Creates a new orbit camera with the given configuration.
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
            zoom_speed: 2.0,
            min_distance: 1.0,
            max_distance: 500.0,
        }
    }

    /// Sets the zoom configuration (speed and distance limits).
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Sets the camera target point.
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Updates camera state from user input (mouse drag, scroll, arrow keys).
    pub fn update(&mut self) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        if is_key_down(KeyCode::Left) {
            self.yaw += 0.02;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= 0.02;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += 0.02;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= 0.02;
        }

        // Keep away from the poles
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// Returns the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + vec3(x, y, z)
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            ..Default::default()
        }
    }
}
