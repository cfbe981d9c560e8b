//! Tessellation of 2D primitives into triangle lists

use std::f64::consts::TAU;

use super::vertex::Vertex;
use crate::sim::Vector;

fn vertex(p: Vector, color: [f32; 4]) -> Vertex {
    Vertex::new(p.x as f32, p.y as f32, color)
}

/// Quad of `width` around the segment `from -> to`
pub fn line(from: Vector, to: Vector, width: f64, color: [f32; 4]) -> Vec<Vertex> {
    let Some(dir) = (to - from).try_normalized() else {
        return Vec::new();
    };
    let half = dir.perp() * (width * 0.5);

    let a1 = from + half;
    let a2 = from - half;
    let b1 = to + half;
    let b2 = to - half;

    vec![
        vertex(a1, color),
        vertex(a2, color),
        vertex(b1, color),
        vertex(b1, color),
        vertex(a2, color),
        vertex(b2, color),
    ]
}

/// Filled circle as a triangle fan from the center
pub fn disc(center: Vector, radius: f64, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    if segments < 3 || radius <= 0.0 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(segments as usize * 3);
    let step = TAU / segments as f64;

    for i in 0..segments {
        let a1 = i as f64 * step;
        let a2 = (i + 1) as f64 * step;
        vertices.push(vertex(center, color));
        vertices.push(vertex(center + Vector::from_polar(radius, a1), color));
        vertices.push(vertex(center + Vector::from_polar(radius, a2), color));
    }

    vertices
}

/// Convex polygon fanned from its first point
pub fn convex_fill(points: &[Vector], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    for pair in points[1..].windows(2) {
        vertices.push(vertex(points[0], color));
        vertices.push(vertex(pair[0], color));
        vertices.push(vertex(pair[1], color));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_line_is_two_triangles() {
        let verts = line(Vector::new(0.0, 0.0), Vector::new(10.0, 0.0), 2.0, WHITE);
        assert_eq!(verts.len(), 6);
        for v in &verts {
            assert!((v.position[1].abs() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_length_line_is_empty() {
        let p = Vector::new(3.0, 3.0);
        assert!(line(p, p, 1.0, WHITE).is_empty());
    }

    #[test]
    fn test_disc_vertices_on_rim() {
        let center = Vector::new(5.0, -5.0);
        let verts = disc(center, 4.0, WHITE, 16);
        assert_eq!(verts.len(), 48);
        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [5.0, -5.0]);
            let dx = tri[1].position[0] - 5.0;
            let dy = tri[1].position[1] + 5.0;
            assert!(((dx * dx + dy * dy).sqrt() - 4.0).abs() < 1e-4);
        }
        assert!(disc(center, 4.0, WHITE, 2).is_empty());
    }

    #[test]
    fn test_convex_fill_triangle_count() {
        let square = [
            Vector::new(0.0, 0.0),
            Vector::new(1.0, 0.0),
            Vector::new(1.0, 1.0),
            Vector::new(0.0, 1.0),
        ];
        assert_eq!(convex_fill(&square, WHITE).len(), 6);
        assert!(convex_fill(&square[..2], WHITE).is_empty());
    }
}
