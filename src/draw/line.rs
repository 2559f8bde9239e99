use serde::{Deserialize, Serialize};

use crate::color::ColorU8Srgb;
use crate::display::Surface;
use crate::geometry::{Bounds, Vec2f};

/// How float endpoints map onto the pixel grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointSnap {
    /// Truncate toward zero, so -0.5 and 0.9 both land on pixel 0
    #[default]
    Truncate,
    /// Round half away from zero
    Round,
}

impl EndpointSnap {
    /// Snapped coordinates saturate at the i64 range
    #[inline]
    fn snap(self, v: f32) -> i64 {
        match self {
            Self::Truncate => v as i64,
            Self::Round => v.round() as i64,
        }
    }

    /// Snap both endpoints, or `None` if either is not finite
    #[inline]
    fn snap_segment(self, a: Vec2f, b: Vec2f) -> Option<(i64, i64, i64, i64)> {
        if !(a.is_finite() && b.is_finite()) {
            return None;
        }
        Some((self.snap(a.x), self.snap(a.y), self.snap(b.x), self.snap(b.y)))
    }
}

/// True when both endpoints sit past the same side of the surface
#[inline]
fn trivially_outside(bounds: Bounds, x0: i64, y0: i64, x1: i64, y1: i64) -> bool {
    let w = bounds.width as i64;
    let h = bounds.height as i64;
    (x0 < 0 && x1 < 0) || (x0 >= w && x1 >= w) || (y0 < 0 && y1 < 0) || (y0 >= h && y1 >= h)
}

/// A snapped segment stepped one pixel at a time along its major axis.
///
/// Deltas are carried in 128-bit so any pair of i64 endpoints is exact.
#[derive(Debug, Clone, Copy)]
struct Walk {
    x_major: bool,
    major0: i128,
    minor0: i128,
    major_dir: i128,
    minor_dir: i128,
    d_major: u128,
    d_minor: u128,
}

impl Walk {
    fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        let (x0, y0, x1, y1) = (x0 as i128, y0 as i128, x1 as i128, y1 as i128);
        let dx = (x1 - x0).unsigned_abs();
        let dy = (y1 - y0).unsigned_abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        if dx >= dy {
            Self {
                x_major: true,
                major0: x0,
                minor0: y0,
                major_dir: sx,
                minor_dir: sy,
                d_major: dx,
                d_minor: dy,
            }
        } else {
            Self {
                x_major: false,
                major0: y0,
                minor0: x0,
                major_dir: sy,
                minor_dir: sx,
                d_major: dy,
                d_minor: dx,
            }
        }
    }

    /// Steps `j` in `[0, d_major]` whose major coordinate lands on the surface
    fn visible_steps(&self, bounds: Bounds) -> Option<(u128, u128)> {
        let extent = if self.x_major { bounds.width } else { bounds.height };
        if extent == 0 {
            return None;
        }
        let last = extent as i128 - 1;
        let (lo, hi) = if self.major_dir > 0 {
            (-self.major0, last - self.major0)
        } else {
            (self.major0 - last, self.major0)
        };
        let lo = lo.max(0);
        let hi = hi.min(self.d_major as i128);
        (lo <= hi).then_some((lo as u128, hi as u128))
    }

    /// Minor-axis offset of step `j` on the Bresenham path.
    ///
    /// The error-term loop (err = dx - dy, `e2 > -dy` / `e2 < dx`) moves the
    /// minor axis at step j to `ceil(j * d_minor / d_major - 1/2)`: nearest,
    /// with exact halves staying behind.
    #[inline]
    fn bresenham_offset(&self, j: u128) -> u128 {
        if self.d_major == 0 {
            return 0;
        }
        // d_major, d_minor < 2^64 so the product fits
        let p = j * self.d_minor;
        let q = p / self.d_major;
        if 2 * (p % self.d_major) > self.d_major {
            q + 1
        } else {
            q
        }
    }

    /// Surface coordinates for step `j` with the given minor coordinate
    #[inline]
    fn point(&self, j: u128, minor: i128) -> (i64, i64) {
        // Both coordinates lie between the i64 endpoints
        let major = (self.major0 + self.major_dir * j as i128) as i64;
        let minor = minor as i64;
        if self.x_major {
            (major, minor)
        } else {
            (minor, major)
        }
    }
}

/// Draw a line using Bresenham's algorithm, truncating endpoints toward zero.
///
/// Both endpoints are inclusive. Only the steps that land on the surface are
/// visited, and each of them sits exactly where it would on an unbounded
/// grid, however far away the endpoints are.
pub fn draw_line_solid(surface: &mut Surface, begin: Vec2f, end: Vec2f, color: ColorU8Srgb) {
    draw_line_solid_snapped(surface, begin, end, color, EndpointSnap::Truncate);
}

/// [`draw_line_solid`] with an explicit endpoint snapping mode
pub fn draw_line_solid_snapped(
    surface: &mut Surface,
    begin: Vec2f,
    end: Vec2f,
    color: ColorU8Srgb,
    snap: EndpointSnap,
) {
    let bounds = surface.bounds();
    let Some((x0, y0, x1, y1)) = snap.snap_segment(begin, end) else {
        return;
    };
    if trivially_outside(bounds, x0, y0, x1, y1) {
        return;
    }

    let walk = Walk::new(x0, y0, x1, y1);
    let Some((first, last)) = walk.visible_steps(bounds) else {
        return;
    };
    for j in first..=last {
        let minor = walk.minor0 + walk.minor_dir * walk.bresenham_offset(j) as i128;
        let (x, y) = walk.point(j, minor);
        if bounds.contains(x, y) {
            surface.set_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draw a line with a floating-point DDA.
///
/// Same endpoint truncation and trivial rejection as [`draw_line_solid`];
/// the minor coordinate of each step is rounded to the nearest pixel.
pub fn draw_line_dda(surface: &mut Surface, begin: Vec2f, end: Vec2f, color: ColorU8Srgb) {
    let bounds = surface.bounds();
    let Some((x0, y0, x1, y1)) = EndpointSnap::Truncate.snap_segment(begin, end) else {
        return;
    };
    if trivially_outside(bounds, x0, y0, x1, y1) {
        return;
    }

    let walk = Walk::new(x0, y0, x1, y1);
    let Some((first, last)) = walk.visible_steps(bounds) else {
        return;
    };
    let inc = if walk.d_major == 0 {
        0.0
    } else {
        (walk.minor_dir as f64 * walk.d_minor as f64) / walk.d_major as f64
    };
    for j in first..=last {
        // Recompute from the start point instead of accumulating drift
        let minor = (walk.minor0 as f64 + inc * j as f64).round() as i128;
        let (x, y) = walk.point(j, minor);
        if bounds.contains(x, y) {
            surface.set_pixel(x as u32, y as u32, color);
        }
    }
}
