use crate::color::ColorU8Srgb;
use crate::display::Surface;
use crate::geometry::{ceil_to_i64, floor_to_i64, sort_by_y, Triangle, Vec2f};

/// Shape of a y-sorted, non-degenerate triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangleShape {
    /// p0 and p1 share the top row
    FlatTop,
    /// p1 and p2 share the bottom row
    FlatBottom,
    /// Split at p1.y; `split_x` is where the long edge p0 -> p2 crosses that row
    General { split_x: f32 },
}

impl TriangleShape {
    /// Classify vertices already sorted by ascending y
    pub fn classify(p: &[Vec2f; 3]) -> Self {
        if p[0].y == p[1].y {
            Self::FlatTop
        } else if p[1].y == p[2].y {
            Self::FlatBottom
        } else {
            let t = (p[1].y - p[0].y) / (p[2].y - p[0].y);
            Self::General {
                split_x: p[0].x + t * (p[2].x - p[0].x),
            }
        }
    }
}

/// x as a function of y along one edge
#[derive(Debug, Clone, Copy)]
struct Edge {
    origin: Vec2f,
    dxdy: f32,
}

impl Edge {
    fn new(a: Vec2f, b: Vec2f) -> Self {
        let dy = b.y - a.y;
        // Horizontal edges are never active for an interior row
        let dxdy = if dy != 0.0 { (b.x - a.x) / dy } else { 0.0 };
        Self { origin: a, dxdy }
    }

    #[inline]
    fn x_at(&self, y: f32) -> f32 {
        self.origin.x + (y - self.origin.y) * self.dxdy
    }
}

/// Fill a triangle with one color using scanline conversion.
///
/// Vertices may be given in any order or winding. Pixels are sampled at
/// integer coordinates and edges are inclusive; degenerate triangles draw
/// nothing.
pub fn draw_triangle_solid(
    surface: &mut Surface,
    p0: Vec2f,
    p1: Vec2f,
    p2: Vec2f,
    color: ColorU8Srgb,
) {
    let mut p = [p0, p1, p2];
    sort_by_y(&mut p);
    let Some(tri) = Triangle::new(p[0], p[1], p[2]) else {
        return;
    };
    let (min, max) = tri.bounding_box();
    let Some((x_lo, y_lo, x_hi, y_hi)) = surface.bounds().clip_box(min, max) else {
        return;
    };

    let e01 = Edge::new(p[0], p[1]);
    let e02 = Edge::new(p[0], p[2]);
    let e12 = Edge::new(p[1], p[2]);
    let shape = TriangleShape::classify(&p);

    for y in y_lo..=y_hi {
        let yf = y as f32;
        let (xa, xb) = match shape {
            TriangleShape::FlatTop => (e02.x_at(yf), e12.x_at(yf)),
            TriangleShape::FlatBottom => (e01.x_at(yf), e02.x_at(yf)),
            TriangleShape::General { split_x } => {
                if yf < p[1].y {
                    (e01.x_at(yf), e02.x_at(yf))
                } else {
                    (e12.x_at(yf), split_x + (yf - p[1].y) * e02.dxdy)
                }
            },
        };
        // Order by value, not by edge, so winding never matters
        let (lo, hi) = if xa <= xb { (xa, xb) } else { (xb, xa) };

        if let Some((x0, x1)) = snap_span(&tri, y as i64, lo, hi, x_lo as i64, x_hi as i64) {
            surface.fill_span(x0, x1, y, color);
        }
    }
}

/// Turn an edge-interpolated span into the exact run of covered pixels
/// within `[min_x, max_x]`.
///
/// The interpolated bounds are only an estimate; nudging each end against
/// [`Triangle::covers`] makes the result identical to the barycentric test.
/// Edge values are monotonic along a row, so the covered run is contiguous.
fn snap_span(
    tri: &Triangle,
    y: i64,
    lo: f32,
    hi: f32,
    min_x: i64,
    max_x: i64,
) -> Option<(u32, u32)> {
    let mut l = ceil_to_i64(lo).clamp(min_x, max_x);
    let mut r = floor_to_i64(hi).clamp(min_x, max_x);

    while l > min_x && tri.covers(l - 1, y) {
        l -= 1;
    }
    while r < max_x && tri.covers(r + 1, y) {
        r += 1;
    }
    while l <= r && !tri.covers(l, y) {
        l += 1;
    }
    while r >= l && !tri.covers(r, y) {
        r -= 1;
    }

    (l <= r).then_some((l as u32, r as u32))
}
