//! 2D point/displacement type
//!
//! Carries optional homogeneous `z`/`w` components so the same type can feed a
//! projection step; gameplay only ever touches `x`/`y`.
//!
//! Pure operations (`+`, `-`, `*`, `/`, [`Vector::lerp`], [`Vector::distance`])
//! return a fresh value. The `*_mut` methods mutate in place and return
//! `&mut Self` so they can be chained.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub w: f64,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0, w: 0.0 }
    }

    pub const fn new4(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Planar part as a glam vector
    #[inline]
    pub fn xy(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    fn xyz(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Keeps `w` from `self`, takes `x`/`y`/`z` from `v`
    #[inline]
    fn with_xyz(self, v: DVec3) -> Self {
        Self::new4(v.x, v.y, v.z, self.w)
    }

    /// Dot product over `x`, `y`, `z`
    #[inline]
    pub fn dot(self, v: Vector) -> f64 {
        self.xyz().dot(v.xyz())
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.xyz().length()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero vector yields NaN components; use [`Vector::try_normalized`]
    /// where the input may be degenerate.
    #[inline]
    pub fn normalized(self) -> Self {
        self / self.length()
    }

    pub fn try_normalized(self) -> Option<Self> {
        let length = self.length();
        if length > 0.0 && length.is_finite() {
            Some(self / length)
        } else {
            None
        }
    }

    /// Perpendicular vector, rotated 90° counter-clockwise
    #[inline]
    pub fn perp(self) -> Self {
        let p = self.xy().perp();
        Self::new(p.x, p.y)
    }

    pub fn add_mut(&mut self, v: Vector) -> &mut Self {
        *self += v;
        self
    }

    pub fn sub_mut(&mut self, v: Vector) -> &mut Self {
        *self -= v;
        self
    }

    pub fn mul_mut(&mut self, k: f64) -> &mut Self {
        *self *= k;
        self
    }

    pub fn div_mut(&mut self, k: f64) -> &mut Self {
        *self /= k;
        self
    }

    /// Normalize in place. NaN on a zero vector.
    pub fn normalize_mut(&mut self) -> &mut Self {
        let length = self.length();
        self.div_mut(length)
    }

    /// Rotate about the z axis by `angle` radians (standard 2D rotation)
    pub fn rotate_z(&mut self, angle: f64) -> &mut Self {
        let rotated = DVec2::from_angle(angle).rotate(self.xy());
        self.x = rotated.x;
        self.y = rotated.y;
        self
    }

    pub fn translate_x(&mut self, distance: f64) -> &mut Self {
        self.x += distance;
        self
    }

    pub fn translate_y(&mut self, distance: f64) -> &mut Self {
        self.y += distance;
        self
    }

    pub fn translate_z(&mut self, distance: f64) -> &mut Self {
        self.z += distance;
        self
    }

    /// Overwrite `x`/`y`/`z` with the interpolation between `start` and `end`
    pub fn lerp_mut(&mut self, start: Vector, end: Vector, t: f64) -> &mut Self {
        let v = Self::lerp(start, end, t);
        *self = self.with_xyz(v.xyz());
        self
    }

    /// Linear interpolation: `start + (end - start) * t`
    #[inline]
    pub fn lerp(start: Vector, end: Vector, t: f64) -> Vector {
        (end - start) * t + start
    }

    #[inline]
    pub fn distance(v1: Vector, v2: Vector) -> f64 {
        (v2 - v1).length()
    }

    /// Cartesian vector from length `r` and angle `theta`
    #[inline]
    pub fn from_polar(r: f64, theta: f64) -> Vector {
        Vector::new(r * theta.cos(), r * theta.sin())
    }

    /// `(r, theta)` of the planar part
    #[inline]
    pub fn to_polar(self) -> (f64, f64) {
        (self.xy().length(), self.y.atan2(self.x))
    }

    /// Angle of the displacement `end - start`
    #[inline]
    pub fn angle(start: Vector, end: Vector) -> f64 {
        let v = end - start;
        v.y.atan2(v.x)
    }

    /// Point where the line through `line_start`/`line_end` meets the plane
    /// through `plane_p` with normal `plane_n`. Non-finite when they are parallel.
    pub fn intersect_plane(
        plane_p: Vector,
        plane_n: Vector,
        line_start: Vector,
        line_end: Vector,
    ) -> Vector {
        let plane_n = plane_n.normalized();
        let plane_d = -plane_n.dot(plane_p);
        let ad = line_start.dot(plane_n);
        let bd = line_end.dot(plane_n);
        let t = (-plane_d - ad) / (bd - ad);
        line_start + (line_end - line_start) * t
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector> for DVec2 {
    fn from(v: Vector) -> Self {
        v.xy()
    }
}

impl From<Vector> for [f32; 2] {
    fn from(v: Vector) -> Self {
        [v.x as f32, v.y as f32]
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.with_xyz(self.xyz() + rhs.xyz())
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.with_xyz(self.xyz() - rhs.xyz())
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, k: f64) -> Vector {
        self.with_xyz(self.xyz() * k)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, k: f64) -> Vector {
        self.with_xyz(self.xyz() / k)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self * -1.0
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vector {
    fn mul_assign(&mut self, k: f64) {
        *self = *self * k;
    }
}

impl DivAssign<f64> for Vector {
    fn div_assign(&mut self, k: f64) {
        *self = *self / k;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_new_has_zero_homogeneous_parts() {
        let v = Vector::new4(1.0, 2.0, 3.0, 0.0);
        assert_eq!(v.z, 3.0);
        assert_eq!(v.w, 0.0);
        assert_eq!(Vector::new(1.0, 2.0).z, 0.0);
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Vector::new(1.0, 2.0);
        let mut copy = original;
        copy.translate_x(5.0);
        assert_eq!(original.x, 1.0);
        assert_eq!(copy.x, 6.0);
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let mut v = Vector::new4(1.0, 2.0, 3.0, 0.0);
        v.rotate_z(PI / 2.0);
        assert!(close(v.x, -2.0));
        assert!(close(v.y, 1.0));
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_in_place_chain() {
        let mut v = Vector::new(1.0, 1.0);
        v.add_mut(Vector::new(1.0, 3.0)).mul_mut(2.0).sub_mut(Vector::new(0.0, 4.0)).div_mut(2.0);
        assert!(close(v.x, 2.0));
        assert!(close(v.y, 2.0));
    }

    #[test]
    fn test_pure_ops_leave_operands_untouched() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, 5.0);
        let sum = a + b;
        let diff = b - a;
        assert_eq!(sum, Vector::new(4.0, 7.0));
        assert_eq!(diff, Vector::new(2.0, 3.0));
        assert_eq!(a, Vector::new(1.0, 2.0));
        assert_eq!(a * 3.0, Vector::new(3.0, 6.0));
        assert_eq!(b / 2.0, Vector::new(1.5, 2.5));
    }

    #[test]
    fn test_dot_includes_z() {
        let a = Vector::new4(1.0, 2.0, 3.0, 9.0);
        let b = Vector::new4(4.0, 5.0, 6.0, 9.0);
        assert!(close(a.dot(b), 32.0));
    }

    #[test]
    fn test_normalize() {
        let mut v = Vector::new(3.0, 4.0);
        v.normalize_mut();
        assert!(close(v.length(), 1.0));
        assert!(close(v.x, 0.6));
        assert!(Vector::ZERO.normalized().x.is_nan());
        assert!(Vector::ZERO.try_normalized().is_none());
        assert!(Vector::new(0.0, 2.0).try_normalized().is_some());
    }

    #[test]
    fn test_lerp() {
        let start = Vector::new(0.0, 0.0);
        let end = Vector::new(10.0, -10.0);
        assert_eq!(Vector::lerp(start, end, 0.25), Vector::new(2.5, -2.5));

        let mut v = Vector::new4(7.0, 7.0, 0.0, 1.0);
        v.lerp_mut(start, end, 0.5);
        assert_eq!(v, Vector::new4(5.0, -5.0, 0.0, 1.0));
    }

    #[test]
    fn test_distance() {
        assert!(close(Vector::distance(Vector::new(1.0, 1.0), Vector::new(4.0, 5.0)), 5.0));
    }

    #[test]
    fn test_polar_conversions() {
        let v = Vector::from_polar(2.0, PI / 2.0);
        assert!(close(v.x, 0.0));
        assert!(close(v.y, 2.0));

        let (r, theta) = Vector::new(-1.0, 0.0).to_polar();
        assert!(close(r, 1.0));
        assert!(close(theta, PI));
    }

    #[test]
    fn test_angle_between_points() {
        let a = Vector::new(1.0, 1.0);
        let b = Vector::new(1.0, 5.0);
        assert!(close(Vector::angle(a, b), PI / 2.0));
        assert!(close(Vector::angle(b, a), -PI / 2.0));
    }

    #[test]
    fn test_perp_is_counter_clockwise() {
        assert_eq!(Vector::new(1.0, 0.0).perp(), Vector::new(-0.0, 1.0));
    }

    #[test]
    fn test_intersect_plane() {
        // Plane y = 2, line from origin straight up
        let hit = Vector::intersect_plane(
            Vector::new(0.0, 2.0),
            Vector::new(0.0, 5.0),
            Vector::new(0.0, 0.0),
            Vector::new(0.0, 4.0),
        );
        assert!(close(hit.x, 0.0));
        assert!(close(hit.y, 2.0));
    }
}
