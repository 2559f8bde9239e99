use serde::{Deserialize, Serialize};

use crate::color::ColorF;
use crate::display::Surface;
use crate::geometry::{sort3_by_y, Triangle, Vec2f};

/// Triangle vertex carrying its own linear color.
///
/// Keeping position and color in one value means sorting vertices can
/// never pair a position with another vertex's color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColoredVertex {
    pub position: Vec2f,
    pub color: ColorF,
}

impl ColoredVertex {
    #[inline]
    pub const fn new(position: Vec2f, color: ColorF) -> Self {
        Self { position, color }
    }
}

/// Fill a triangle blending three linear vertex colors barycentrically.
///
/// Equivalent to [`draw_triangle_interp_vertices`] with each point paired
/// with the color of the same index.
pub fn draw_triangle_interp(
    surface: &mut Surface,
    p0: Vec2f,
    p1: Vec2f,
    p2: Vec2f,
    c0: ColorF,
    c1: ColorF,
    c2: ColorF,
) {
    draw_triangle_interp_vertices(
        surface,
        [
            ColoredVertex::new(p0, c0),
            ColoredVertex::new(p1, c1),
            ColoredVertex::new(p2, c2),
        ],
    );
}

/// Fill a triangle blending per-vertex linear colors.
///
/// Every pixel of the clipped bounding box is tested; covered pixels get
/// `w0*C0 + w1*C1 + w2*C2`, encoded to sRGB (clamped to [0, 1] first).
/// Coverage is the same inclusive test the solid fill uses.
pub fn draw_triangle_interp_vertices(surface: &mut Surface, vertices: [ColoredVertex; 3]) {
    let mut v = vertices;
    sort3_by_y(&mut v, |cv| cv.position.y);
    let Some(tri) = Triangle::new(v[0].position, v[1].position, v[2].position) else {
        return;
    };
    let (min, max) = tri.bounding_box();
    let Some((x_lo, y_lo, x_hi, y_hi)) = surface.bounds().clip_box(min, max) else {
        return;
    };

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            if let Some([w0, w1, w2]) = tri.weights(x as i64, y as i64) {
                let linear = ColorF::blend3(v[0].color, v[1].color, v[2].color, w0, w1, w2);
                surface.set_pixel(x, y, linear.to_srgb());
            }
        }
    }
}
