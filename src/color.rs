//! Color types and the linear -> display transfer function
//!
//! Surfaces store display-encoded (sRGB) bytes. Linear float colors only
//! exist at triangle vertices, where they are blended before encoding.

use serde::{Deserialize, Serialize};

/// Display-encoded (gamma) 8-bit color, one byte per channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorU8Srgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorU8Srgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode to light-linear floats
    #[inline]
    pub fn to_linear(self) -> ColorF {
        ColorF::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }
}

impl From<(u8, u8, u8)> for ColorU8Srgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Display-encoded color with straight (non-premultiplied) alpha, as stored in images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorU8SrgbAlpha {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorU8SrgbAlpha {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Drop the alpha channel
    #[inline]
    pub const fn rgb(self) -> ColorU8Srgb {
        ColorU8Srgb::new(self.r, self.g, self.b)
    }
}

/// Light-linear color, nominally in [0, 1] per channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorF {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Weighted sum of three colors (barycentric blend)
    #[inline]
    pub fn blend3(c0: Self, c1: Self, c2: Self, w0: f32, w1: f32, w2: f32) -> Self {
        Self {
            r: w0 * c0.r + w1 * c1.r + w2 * c2.r,
            g: w0 * c0.g + w1 * c1.g + w2 * c2.g,
            b: w0 * c0.b + w1 * c1.b + w2 * c2.b,
        }
    }

    /// Encode each channel with the sRGB transfer function
    #[inline]
    pub fn to_srgb(self) -> ColorU8Srgb {
        ColorU8Srgb::new(
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        )
    }
}

/// Linear -> display encoding of one channel.
///
/// Inputs are clamped to [0, 1] first; NaN encodes as 0.
#[inline]
pub fn linear_to_srgb(v: f32) -> u8 {
    // `clamp` propagates NaN, `max` does not
    let v = v.max(0.0).min(1.0);
    let encoded = if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    };
    (encoded * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Display -> linear decoding of one channel
#[inline]
pub fn srgb_to_linear(c: u8) -> f32 {
    let v = c as f32 / 255.0;
    if v <= 0.040_45 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
