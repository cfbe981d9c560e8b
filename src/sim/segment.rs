//! Bounded line segments
//!
//! The only collision primitive of the arena: boundaries, paddle tracks,
//! paddle faces and ball probes are all segments.

use serde::{Deserialize, Serialize};

use super::vector::Vector;

/// A line segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vector,
    pub end: Vector,
}

/// Where two segments cross
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Crossing point
    pub point: Vector,
    /// Position along the first segment (0 = start, 1 = end)
    pub t: f64,
    /// Position along the second segment (0 = start, 1 = end)
    pub u: f64,
}

impl Segment {
    pub const fn new(start: Vector, end: Vector) -> Self {
        Self { start, end }
    }

    /// Displacement from `start` to `end`
    #[inline]
    pub fn delta(&self) -> Vector {
        self.end - self.start
    }

    /// Point at `t` along the segment
    #[inline]
    pub fn lerp(&self, t: f64) -> Vector {
        Vector::lerp(self.start, self.end, t)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        Vector::distance(self.start, self.end)
    }

    #[inline]
    pub fn center(&self) -> Vector {
        self.lerp(0.5)
    }

    /// Angle of the direction `start -> end`
    #[inline]
    pub fn angle(&self) -> f64 {
        Vector::angle(self.start, self.end)
    }

    /// Unit normal: the direction rotated 90° counter-clockwise.
    /// NaN for a zero-length segment.
    pub fn normal(&self) -> Vector {
        self.delta().perp().normalized()
    }

    /// Same segment, endpoints swapped
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    pub fn intersect(&self, other: &Segment) -> Option<Intersection> {
        Segment::intersection(self, other)
    }

    /// Mirror `v` about this segment's normal.
    ///
    /// Splits `v` into its projection on the normal and the remainder, then
    /// negates the projection. Magnitude is preserved.
    pub fn reflect(&self, v: Vector) -> Vector {
        let normal = self.normal();
        let parallel = normal * v.dot(normal);
        let perpendicular = v - parallel;
        perpendicular - parallel
    }

    /// Parametric segment/segment intersection.
    ///
    /// Returns `None` for parallel or collinear pairs (zero determinant) and
    /// when the crossing lies outside either segment. Endpoints count as hits.
    pub fn intersection(a: &Segment, b: &Segment) -> Option<Intersection> {
        let t_top = (b.end.x - b.start.x) * (a.start.y - b.start.y)
            - (b.end.y - b.start.y) * (a.start.x - b.start.x);
        let u_top = (b.start.y - a.start.y) * (a.start.x - a.end.x)
            - (b.start.x - a.start.x) * (a.start.y - a.end.y);
        let bottom =
            (b.end.y - b.start.y) * (a.end.x - a.start.x) - (b.end.x - b.start.x) * (a.end.y - a.start.y);

        if bottom == 0.0 {
            return None;
        }

        let t = t_top / bottom;
        let u = u_top / bottom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(Intersection {
                point: a.lerp(t),
                t,
                u,
            })
        } else {
            None
        }
    }
}
