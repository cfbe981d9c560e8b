//! Drawing surface abstraction
//!
//! The simulation draws through [`Canvas`] in center-origin coordinates
//! with y pointing down, like a 2D canvas context. [`VertexCanvas`]
//! tessellates those calls into a clip-space triangle list of packed
//! [`Vertex`] values, ready to hand to a GPU vertex buffer as raw bytes.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors, css_color};

use crate::sim::Vector;

/// Stroke width for lines and outlines, in canvas pixels
pub const LINE_WIDTH: f64 = 1.0;
/// Rim segments used when tessellating circles
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Minimal set of drawing calls a match needs
pub trait Canvas {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Wipe the whole surface
    fn clear(&mut self, color: [f32; 4]);

    fn line(&mut self, from: Vector, to: Vector, color: [f32; 4]);

    /// Filled circle
    fn circle(&mut self, center: Vector, radius: f64, color: [f32; 4]);

    /// Filled convex polygon
    fn polygon(&mut self, points: &[Vector], color: [f32; 4]);

    /// Closed outline through `points`
    fn outline(&mut self, points: &[Vector], color: [f32; 4]) {
        let Some(&last) = points.last() else {
            return;
        };
        let mut previous = last;
        for &point in points {
            self.line(previous, point, color);
            previous = point;
        }
    }
}

/// Canvas that records triangles for the GPU
#[derive(Debug, Clone)]
pub struct VertexCanvas {
    width: f64,
    height: f64,
    clear_color: [f32; 4],
    vertices: Vec<Vertex>,
}

impl VertexCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            clear_color: colors::BACKGROUND,
            vertices: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Center-origin canvas point to clip space (y flipped)
    pub fn to_clip(&self, p: Vector) -> Vector {
        Vector::new(p.x / (self.width * 0.5), -p.y / (self.height * 0.5))
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    fn push_clipped(&mut self, vertices: Vec<Vertex>) {
        for mut v in vertices {
            let canvas_point = Vector::new(v.position[0] as f64, v.position[1] as f64);
            v.position = self.to_clip(canvas_point).into();
            self.vertices.push(v);
        }
    }
}

impl Canvas for VertexCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.clear_color = color;
        self.vertices.clear();
    }

    fn line(&mut self, from: Vector, to: Vector, color: [f32; 4]) {
        self.push_clipped(shapes::line(from, to, LINE_WIDTH, color));
    }

    fn circle(&mut self, center: Vector, radius: f64, color: [f32; 4]) {
        self.push_clipped(shapes::disc(center, radius, color, CIRCLE_SEGMENTS));
    }

    fn polygon(&mut self, points: &[Vector], color: [f32; 4]) {
        self.push_clipped(shapes::convex_fill(points, color));
    }
}
