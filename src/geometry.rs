//! Geometry shared by every rasterizer: points, surface bounds, and the
//! triangle coverage predicate.
//!
//! Pixel (x, y) is sampled at the integer coordinate (x, y). Lines truncate
//! to the same grid, so a vertex at (55.0, 80.0) lands exactly on pixel
//! (55, 80) for every primitive.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Triangles whose doubled signed area is below this are skipped
pub const DEGENERATE_AREA_EPSILON: f32 = 1e-6;

/// 2D point / vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for Vec2f {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vec2f {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2f {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2f {
    type Output = Self;
    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// Pixel extents of a destination surface.
///
/// Every rasterizer clips through this type, so the inclusive ranges
/// `[0, width - 1]` and `[0, height - 1]` are spelled out exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if an integer pixel lies on the surface
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < self.width as i64 && y >= 0 && y < self.height as i64
    }

    /// Clip an inclusive column range to `[0, width - 1]`
    #[inline]
    pub fn clip_x(&self, lo: i64, hi: i64) -> Option<(u32, u32)> {
        clip_range(lo, hi, self.width)
    }

    /// Clip an inclusive row range to `[0, height - 1]`
    #[inline]
    pub fn clip_y(&self, lo: i64, hi: i64) -> Option<(u32, u32)> {
        clip_range(lo, hi, self.height)
    }

    /// Clip a float bounding box (inclusive, sampled at integer coordinates)
    /// to the surface. Returns `(x0, y0, x1, y1)`, all inclusive.
    pub fn clip_box(&self, min: Vec2f, max: Vec2f) -> Option<(u32, u32, u32, u32)> {
        let (x0, x1) = self.clip_x(ceil_to_i64(min.x), floor_to_i64(max.x))?;
        let (y0, y1) = self.clip_y(ceil_to_i64(min.y), floor_to_i64(max.y))?;
        Some((x0, y0, x1, y1))
    }
}

#[inline]
fn clip_range(lo: i64, hi: i64, extent: u32) -> Option<(u32, u32)> {
    if extent == 0 {
        return None;
    }
    let lo = lo.max(0);
    let hi = hi.min(extent as i64 - 1);
    if lo > hi {
        None
    } else {
        Some((lo as u32, hi as u32))
    }
}

/// Float -> integer ceil; saturates at the i64 range (`as` also maps NaN to 0)
#[inline]
pub fn ceil_to_i64(v: f32) -> i64 {
    v.ceil() as i64
}

#[inline]
pub fn floor_to_i64(v: f32) -> i64 {
    v.floor() as i64
}

// ============================================================================
// Triangle coverage
// ============================================================================

/// Doubled signed area of the triangle (a, b, p)
#[inline]
pub fn edge_function(a: Vec2f, b: Vec2f, p: Vec2f) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Sort three items by ascending y in place. Ties keep their input order.
#[inline]
pub fn sort3_by_y<T>(items: &mut [T; 3], y: impl Fn(&T) -> f32) {
    if y(&items[0]) > y(&items[1]) {
        items.swap(0, 1);
    }
    if y(&items[0]) > y(&items[2]) {
        items.swap(0, 2);
    }
    if y(&items[1]) > y(&items[2]) {
        items.swap(1, 2);
    }
}

/// Sort three points by ascending y in place
#[inline]
pub fn sort_by_y(p: &mut [Vec2f; 3]) {
    sort3_by_y(p, |v| v.y);
}

/// A non-degenerate triangle prepared for coverage tests.
///
/// Both the scanline fill and the barycentric fill build this from the
/// y-sorted vertices and decide interior pixels with [`Triangle::covers`]
/// inside [`Triangle::bounding_box`], so they agree pixel for pixel. A pixel
/// is covered when all three edge functions, normalised by the winding sign,
/// are >= 0 (edges inclusive) and not all zero.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    v: [Vec2f; 3],
    area: f32,
}

impl Triangle {
    /// Returns `None` for degenerate input: non-finite coordinates, all
    /// vertices on one horizontal or vertical line, or near-zero area.
    pub fn new(p0: Vec2f, p1: Vec2f, p2: Vec2f) -> Option<Self> {
        if !(p0.is_finite() && p1.is_finite() && p2.is_finite()) {
            return None;
        }
        if (p0.y == p1.y && p1.y == p2.y) || (p0.x == p1.x && p1.x == p2.x) {
            return None;
        }
        let area = edge_function(p0, p1, p2);
        if !area.is_finite() || area.abs() < DEGENERATE_AREA_EPSILON {
            return None;
        }
        Some(Self {
            v: [p0, p1, p2],
            area,
        })
    }

    #[inline]
    pub fn vertices(&self) -> [Vec2f; 3] {
        self.v
    }

    /// Doubled signed area (sign gives the winding)
    #[inline]
    pub fn area(&self) -> f32 {
        self.area
    }

    /// Raw edge values (e0, e1, e2), each paired with the opposite vertex
    #[inline]
    fn edges(&self, p: Vec2f) -> [f32; 3] {
        let [a, b, c] = self.v;
        [
            edge_function(b, c, p),
            edge_function(c, a, p),
            edge_function(a, b, p),
        ]
    }

    /// Inclusive interior test at integer pixel (x, y)
    #[inline]
    pub fn covers(&self, x: i64, y: i64) -> bool {
        self.weights(x, y).is_some()
    }

    /// Barycentric weights (w0, w1, w2) at integer pixel (x, y), or `None`
    /// when the pixel is outside. Each weight belongs to the vertex of the
    /// same index as passed to [`Triangle::new`].
    #[inline]
    pub fn weights(&self, x: i64, y: i64) -> Option<[f32; 3]> {
        let e = self.edges(Vec2f::new(x as f32, y as f32));
        let inside = if self.area > 0.0 {
            e[0] >= 0.0 && e[1] >= 0.0 && e[2] >= 0.0
        } else {
            e[0] <= 0.0 && e[1] <= 0.0 && e[2] <= 0.0
        };
        // Normalise by this sample's own edge sum, not the stored area: on
        // slivers rounding can zero all three edges at a covered sample
        let sum = e[0] + e[1] + e[2];
        if !inside || sum == 0.0 || !sum.is_finite() {
            return None;
        }
        Some([e[0] / sum, e[1] / sum, e[2] / sum])
    }

    /// Axis-aligned bounding box as (min, max)
    pub fn bounding_box(&self) -> (Vec2f, Vec2f) {
        let [a, b, c] = self.v;
        (
            Vec2f::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)),
            Vec2f::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2f {
        Vec2f::new(x, y)
    }

    #[test]
    fn test_sort_by_y_all_orders() {
        let pts = [v(0.0, 3.0), v(1.0, 1.0), v(2.0, 2.0)];
        let orders = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        for o in orders {
            let mut p = [pts[o[0]], pts[o[1]], pts[o[2]]];
            sort_by_y(&mut p);
            assert_eq!([p[0].y, p[1].y, p[2].y], [1.0, 2.0, 3.0], "order {:?}", o);
        }
    }

    #[test]
    fn test_bounds_clip() {
        let b = Bounds::new(10, 5);
        assert_eq!(b.clip_x(-4, 20), Some((0, 9)));
        assert_eq!(b.clip_y(2, 3), Some((2, 3)));
        assert_eq!(b.clip_x(10, 20), None);
        assert_eq!(b.clip_y(-3, -1), None);
        assert_eq!(Bounds::new(0, 5).clip_x(0, 3), None);
        assert!(b.contains(9, 4));
        assert!(!b.contains(10, 4));
        assert!(!b.contains(-1, 0));
    }

    #[test]
    fn test_clip_box_uses_integer_samples() {
        let b = Bounds::new(100, 100);
        assert_eq!(b.clip_box(v(1.2, 2.0), v(3.8, 4.5)), Some((2, 2, 3, 4)));
        // No integer sample inside
        assert_eq!(b.clip_box(v(1.2, 2.0), v(1.8, 4.5)), None);
    }

    #[test]
    fn test_degenerate_triangles_rejected() {
        assert!(Triangle::new(v(0.0, 5.0), v(4.0, 5.0), v(9.0, 5.0)).is_none());
        assert!(Triangle::new(v(3.0, 0.0), v(3.0, 4.0), v(3.0, 9.0)).is_none());
        assert!(Triangle::new(v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0)).is_none());
        assert!(Triangle::new(v(0.0, 0.0), v(1.0, 1.0), v(f32::NAN, 2.0)).is_none());
        assert!(Triangle::new(v(0.0, 0.0), v(4.0, 0.0), v(2.0, 3.0)).is_some());
    }

    #[test]
    fn test_weights_at_vertices_are_exact() {
        let t = Triangle::new(v(30.0, 30.0), v(80.0, 30.0), v(55.0, 80.0)).unwrap();
        assert_eq!(t.weights(30, 30), Some([1.0, 0.0, 0.0]));
        assert_eq!(t.weights(80, 30), Some([0.0, 1.0, 0.0]));
        assert_eq!(t.weights(55, 80), Some([0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_coverage_is_winding_independent() {
        let a = Triangle::new(v(30.0, 30.0), v(80.0, 30.0), v(55.0, 80.0)).unwrap();
        let b = Triangle::new(v(55.0, 80.0), v(80.0, 30.0), v(30.0, 30.0)).unwrap();
        assert!(a.area() * b.area() < 0.0);
        for y in 25..85 {
            for x in 25..85 {
                assert_eq!(a.covers(x, y), b.covers(x, y), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let t = Triangle::new(v(2.0, 1.0), v(40.0, 12.0), v(9.0, 33.0)).unwrap();
        for y in 0..40 {
            for x in 0..45 {
                if let Some([w0, w1, w2]) = t.weights(x, y) {
                    assert!((w0 + w1 + w2 - 1.0).abs() < 1e-5);
                    assert!(w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_sliver_weights_never_vanish() {
        let t = Triangle::new(v(33.25, -3.25), v(1.25, 28.75), v(21.387426, 8.612573)).unwrap();
        for y in -4..30 {
            for x in 0..34 {
                if let Some([w0, w1, w2]) = t.weights(x, y) {
                    let sum = w0 + w1 + w2;
                    assert!((sum - 1.0).abs() < 1e-5, "pixel ({}, {}) weights sum {}", x, y, sum);
                }
            }
        }
    }

    #[test]
    fn test_bounding_box() {
        let t = Triangle::new(v(5.0, 9.0), v(-2.0, 1.0), v(7.5, 4.0)).unwrap();
        assert_eq!(t.bounding_box(), (v(-2.0, 1.0), v(7.5, 9.0)));
    }
}
