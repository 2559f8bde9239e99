use crate::display::{Surface, BYTES_PER_PIXEL};
use crate::geometry::{Bounds, Vec2f};
use crate::image_rgba::ImageRgba;

/// Source pixels with alpha below this are skipped by [`blit_masked`]
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 128;

/// Overlap between an image placed at an integer offset and the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlitRegion {
    /// First source column / row that lands on the surface
    src_x: u32,
    src_y: u32,
    /// First destination column / row
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
}

impl BlitRegion {
    /// Truncates `position` toward zero. `None` when nothing overlaps.
    fn new(bounds: Bounds, image: &ImageRgba, position: Vec2f) -> Option<Self> {
        if !position.is_finite() || image.width() == 0 || image.height() == 0 {
            return None;
        }
        let ox = position.x as i32 as i64;
        let oy = position.y as i32 as i64;
        let (dx0, dx1) = bounds.clip_x(ox, ox + image.width() as i64 - 1)?;
        let (dy0, dy1) = bounds.clip_y(oy, oy + image.height() as i64 - 1)?;
        Some(Self {
            src_x: (dx0 as i64 - ox) as u32,
            src_y: (dy0 as i64 - oy) as u32,
            dst_x: dx0,
            dst_y: dy0,
            width: dx1 - dx0 + 1,
            height: dy1 - dy0 + 1,
        })
    }

    /// Matching (source, destination) byte slices for one row of the overlap
    #[inline]
    fn rows<'a>(
        &self,
        row: u32,
        image: &'a ImageRgba,
        surface: &'a mut Surface,
    ) -> (&'a [u8], &'a mut [u8]) {
        let len = self.width as usize * BYTES_PER_PIXEL;
        let sx = self.src_x as usize * 4;
        let dx = self.dst_x as usize * BYTES_PER_PIXEL;
        let src = &image.row(self.src_y + row)[sx..sx + len];
        let dst = &mut surface.row_mut(self.dst_y + row)[dx..dx + len];
        (src, dst)
    }
}

/// Copy an image onto the surface, skipping pixels with alpha < 128.
///
/// The destination offset is truncated toward zero. Only RGB is written;
/// pixels landing off the surface are dropped.
pub fn blit_masked(surface: &mut Surface, image: &ImageRgba, position: Vec2f) {
    blit_masked_threshold(surface, image, position, DEFAULT_ALPHA_THRESHOLD);
}

/// [`blit_masked`] with an explicit alpha threshold (pixels with alpha < threshold are skipped)
pub fn blit_masked_threshold(
    surface: &mut Surface,
    image: &ImageRgba,
    position: Vec2f,
    threshold: u8,
) {
    let Some(region) = BlitRegion::new(surface.bounds(), image, position) else {
        return;
    };
    for row in 0..region.height {
        let (src, dst) = region.rows(row, image, surface);
        for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(BYTES_PER_PIXEL)) {
            if s[3] >= threshold {
                d[..3].copy_from_slice(&s[..3]);
            }
        }
    }
}

/// Copy an image onto the surface ignoring alpha entirely
pub fn blit_opaque(surface: &mut Surface, image: &ImageRgba, position: Vec2f) {
    let Some(region) = BlitRegion::new(surface.bounds(), image, position) else {
        return;
    };
    for row in 0..region.height {
        let (src, dst) = region.rows(row, image, surface);
        for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(BYTES_PER_PIXEL)) {
            d[..3].copy_from_slice(&s[..3]);
        }
    }
}
