//! Decoded RGBA8 source images
//!
//! Row 0 is the visual top. Bottom-up buffers are flipped once at
//! construction so the blitter never has to care about orientation.

use std::path::Path;

use crate::color::ColorU8SrgbAlpha;
use crate::error::ImageError;

/// Immutable RGBA image, 4 bytes per pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRgba {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // RGBA format, 4 bytes per pixel
}

impl ImageRgba {
    /// Create image from raw top-down RGBA data
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ImageError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: data,
        })
    }

    /// Create image from bottom-up RGBA data (first row is the visual bottom)
    pub fn from_rgba_bottom_up(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ImageError> {
        let mut image = Self::from_rgba(width, height, data)?;
        image.flip_rows();
        Ok(image)
    }

    /// Decode an image file (PNG) into RGBA8
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .map_err(|source| ImageError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        log::debug!("decoded {} ({}x{})", path.display(), width, height);
        Self::from_rgba(width, height, decoded.into_raw())
    }

    fn flip_rows(&mut self) {
        let stride = self.width as usize * 4;
        if stride == 0 {
            return;
        }
        let h = self.height as usize;
        for y in 0..h / 2 {
            let (top, bottom) = self.pixels.split_at_mut((h - 1 - y) * stride);
            top[y * stride..(y + 1) * stride].swap_with_slice(&mut bottom[..stride]);
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

    /// Read one pixel. Panics if (x, y) is outside the image.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> ColorU8SrgbAlpha {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        ColorU8SrgbAlpha::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Raw RGBA bytes of row `y`
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}
