use std::path::Path;

use image::RgbaImage;

use super::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::color::ColorU8Srgb;
use crate::error::ImageError;
use crate::geometry::Bounds;

/// Bytes per surface pixel (R, G, B, X)
pub const BYTES_PER_PIXEL: usize = 4;

// ============================================================================
// Utility Functions
// ============================================================================

/// Write RGBX pixel to slice. The padding byte is left alone.
#[inline]
fn write_pixel(dest: &mut [u8], color: ColorU8Srgb) {
    dest[0] = color.r;
    dest[1] = color.g;
    dest[2] = color.b;
}

// ============================================================================
// Surface
// ============================================================================

/// RGBX8888 destination buffer in display (sRGB) color space.
///
/// Pixel (x, y) lives at linear index `y * width + x`, i.e. byte offset
/// `4 * (y * width + x)`. The size is fixed at construction.
///
/// `set_pixel` does not clip: the rasterizers clip through [`Bounds`]
/// before writing, and an out-of-range write is a caller bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl Surface {
    /// Create a black surface with default resolution (640x480)
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create a black surface with custom resolution
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Clipping rectangle for this surface
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Linear pixel index of (x, y). Multiply by [`BYTES_PER_PIXEL`] for bytes.
    #[inline]
    pub fn linear_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} surface",
            x,
            y,
            self.width,
            self.height
        );
        self.linear_index(x, y) * BYTES_PER_PIXEL
    }

    /// Clear to a solid color
    pub fn clear(&mut self, color: ColorU8Srgb) {
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&[color.r, color.g, color.b, 0]);
        }
    }

    /// Set a single pixel. The caller must have clipped (x, y) to the surface.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: ColorU8Srgb) {
        let idx = self.pixel_offset(x, y);
        write_pixel(&mut self.pixels[idx..idx + BYTES_PER_PIXEL], color);
    }

    /// Read a pixel from the surface (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<ColorU8Srgb> {
        if self.bounds().contains(x, y) {
            let idx = self.pixel_offset(x as u32, y as u32);
            Some(ColorU8Srgb::new(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
            ))
        } else {
            None
        }
    }

    /// Fill the inclusive span `x0..=x1` of row `y`. Already clipped by the caller.
    /// Computes starting index once, then increments by 4.
    #[inline]
    pub fn fill_span(&mut self, x0: u32, x1: u32, y: u32, color: ColorU8Srgb) {
        let start = self.pixel_offset(x0, y);
        let end = self.pixel_offset(x1, y) + BYTES_PER_PIXEL;
        for px in self.pixels[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
            write_pixel(px, color);
        }
    }

    /// Raw bytes of row `y` (width * 4 bytes)
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// Mutable raw bytes of row `y`, for bulk copies
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        &mut self.pixels[start..start + stride]
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Copy into an opaque RGBA image
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let idx = self.pixel_offset(x, y);
            image::Rgba([
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                255,
            ])
        })
    }

    /// Encode as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        self.to_rgba_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| ImageError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!(
            "wrote {}x{} surface to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_black() {
        let s = Surface::with_size(4, 3);
        assert_eq!(s.as_bytes().len(), 4 * 3 * BYTES_PER_PIXEL);
        assert!(s.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_linear_index_is_row_major() {
        let s = Surface::with_size(7, 5);
        assert_eq!(s.linear_index(0, 0), 0);
        assert_eq!(s.linear_index(6, 0), 6);
        assert_eq!(s.linear_index(0, 1), 7);
        assert_eq!(s.linear_index(3, 4), 31);
    }

    #[test]
    fn test_set_get_roundtrip_and_layout() {
        let mut s = Surface::with_size(8, 8);
        let c = ColorU8Srgb::new(10, 20, 30);
        s.set_pixel(3, 2, c);
        assert_eq!(s.get_pixel(3, 2), Some(c));
        let off = s.linear_index(3, 2) * BYTES_PER_PIXEL;
        assert_eq!(&s.as_bytes()[off..off + 3], &[10, 20, 30]);
        assert_eq!(s.get_pixel(2, 3), Some(ColorU8Srgb::BLACK));
    }

    #[test]
    fn test_get_pixel_out_of_bounds() {
        let s = Surface::with_size(8, 8);
        assert_eq!(s.get_pixel(-1, 0), None);
        assert_eq!(s.get_pixel(8, 0), None);
        assert_eq!(s.get_pixel(0, 8), None);
    }

    #[test]
    fn test_clear() {
        let mut s = Surface::with_size(5, 5);
        s.clear(ColorU8Srgb::new(1, 2, 3));
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(s.get_pixel(x, y), Some(ColorU8Srgb::new(1, 2, 3)));
            }
        }
    }

    #[test]
    fn test_fill_span_inclusive() {
        let mut s = Surface::with_size(10, 3);
        s.fill_span(2, 5, 1, ColorU8Srgb::WHITE);
        for x in 0..10 {
            let expected = if (2..=5).contains(&x) {
                ColorU8Srgb::WHITE
            } else {
                ColorU8Srgb::BLACK
            };
            assert_eq!(s.get_pixel(x, 1), Some(expected), "x = {}", x);
        }
        assert!(s.row(0).iter().all(|&b| b == 0));
        assert!(s.row(2).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_row_mut_addresses_one_row() {
        let mut s = Surface::with_size(3, 2);
        s.row_mut(1)[0] = 99;
        assert_eq!(s.get_pixel(0, 1), Some(ColorU8Srgb::new(99, 0, 0)));
        assert_eq!(s.row(1).len(), 3 * BYTES_PER_PIXEL);
    }

    #[test]
    fn test_zero_sized_surface() {
        let s = Surface::with_size(0, 10);
        assert!(s.bounds().is_empty());
        assert!(s.as_bytes().is_empty());
        assert_eq!(s.get_pixel(0, 0), None);
    }

    #[test]
    fn test_to_rgba_image_is_opaque() {
        let mut s = Surface::with_size(2, 2);
        s.set_pixel(1, 0, ColorU8Srgb::new(9, 8, 7));
        let img = s.to_rgba_image();
        assert_eq!(img.get_pixel(1, 0).0, [9, 8, 7, 255]);
        assert_eq!(img.get_pixel(0, 1).0, [0, 0, 0, 255]);
    }
}
