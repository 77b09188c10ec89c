// src/geometry.rs

use std::ops::{Add, Deref, Div, Mul, Sub};

use bytemuck::{Pod, Zeroable};
use glam::DVec2;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: &Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Rotates counter-clockwise by `angle_deg` degrees around the origin.
    /// The length is preserved, so a rotated edge vector keeps the scale of the edge.
    pub fn rotate(&self, angle_deg: f64) -> Point2 {
        DVec2::from_angle(angle_deg.to_radians())
            .rotate(DVec2::from(*self))
            .into()
    }

    pub fn distance(&self, other: &Point2) -> f64 {
        (*self - *other).length()
    }
}

impl From<Point2> for DVec2 {
    fn from(p: Point2) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for Point2 {
    fn from(v: DVec2) -> Self {
        Point2::new(v.x, v.y)
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;

    fn mul(self, rhs: f64) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point2 {
    type Output = Point2;

    fn div(self, rhs: f64) -> Point2 {
        Point2::new(self.x / rhs, self.y / rhs)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point2,
    pub b: Point2,
}

impl Segment {
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    pub fn midpoint(&self) -> Point2 {
        (self.a + self.b) / 2.0
    }

    pub fn length(&self) -> f64 {
        self.a.distance(&self.b)
    }

    pub fn points(&self) -> [Point2; 2] {
        [self.a, self.b]
    }
}

/// An open path of points. Rebuilt from scratch on every generation, never edited in place
/// by callers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    points: Vec<Point2>,
}

impl Polyline {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn from_points(points: &[Point2]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    pub fn push(&mut self, point: Point2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }

    /// Consecutive `(a, b)` pairs, one per drawn line.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    pub fn path_length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Interleaved `x0, y0, x1, y1, ...` view for plotting backends.
    pub fn as_flat(&self) -> &[f64] {
        bytemuck::cast_slice(&self.points)
    }
}

impl Deref for Polyline {
    type Target = [Point2];

    fn deref(&self) -> &[Point2] {
        &self.points
    }
}

impl From<Vec<Point2>> for Polyline {
    fn from(points: Vec<Point2>) -> Self {
        Self { points }
    }
}

impl FromIterator<Point2> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point2>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rotate_quarter_turn_is_counter_clockwise() {
        let r = Point2::new(100.0, 0.0).rotate(90.0);
        assert_abs_diff_eq!(r.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.y, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn rotate_keeps_length() {
        let v = Point2::new(3.0, -4.0);
        assert_abs_diff_eq!(v.rotate(37.0).length(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn vector_arithmetic() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(3.0, 6.0);
        assert_eq!(b - a, Point2::new(2.0, 4.0));
        assert_eq!((a + b) / 2.0, Point2::new(2.0, 4.0));
        assert_eq!(a * 3.0, Point2::new(3.0, 6.0));
    }

    #[test]
    fn polyline_flat_view_interleaves_coordinates() {
        let line = Polyline::from_points(&[Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)]);
        assert_eq!(line.as_flat(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn path_length_sums_segments() {
        let line = Polyline::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 4.0),
            Point2::new(3.0, 10.0),
        ]);
        assert_eq!(line.segments().count(), 2);
        assert_abs_diff_eq!(line.path_length(), 11.0, epsilon = 1e-12);
    }
}
