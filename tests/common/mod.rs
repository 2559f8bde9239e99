//! Helpers shared by the integration tests

#![allow(dead_code)]

use draw2d::{ColorU8Srgb, Surface, Vec2f};

/// Every (x, y) whose color differs from the clear color (black)
pub fn painted_pixels(s: &Surface) -> Vec<(i64, i64)> {
    let mut out = Vec::new();
    for y in 0..s.height() as i64 {
        for x in 0..s.width() as i64 {
            if s.get_pixel(x, y) != Some(ColorU8Srgb::BLACK) {
                out.push((x, y));
            }
        }
    }
    out
}

/// Largest number of painted pixels found in any single row
pub fn max_row_pixel_count(s: &Surface) -> usize {
    (0..s.height() as i64)
        .map(|y| {
            (0..s.width() as i64)
                .filter(|&x| s.get_pixel(x, y) != Some(ColorU8Srgb::BLACK))
                .count()
        })
        .max()
        .unwrap_or(0)
}

/// Largest number of painted pixels found in any single column
pub fn max_col_pixel_count(s: &Surface) -> usize {
    (0..s.width() as i64)
        .map(|x| {
            (0..s.height() as i64)
                .filter(|&y| s.get_pixel(x, y) != Some(ColorU8Srgb::BLACK))
                .count()
        })
        .max()
        .unwrap_or(0)
}

/// Deterministic xorshift64 generator for reproducible fixtures
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// f32 in [min, max)
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        let unit = (self.next_u64() & 0xFFFFFF) as f32 / 0x1000000 as f32;
        min + unit * (max - min)
    }

    /// Point in [min, max) on both axes, snapped to quarter pixels half the time
    pub fn point(&mut self, min: f32, max: f32) -> Vec2f {
        let mut p = Vec2f::new(self.range_f32(min, max), self.range_f32(min, max));
        if self.next_u64() & 1 == 0 {
            p = Vec2f::new((p.x * 4.0).round() / 4.0, (p.y * 4.0).round() / 4.0);
        }
        p
    }
}
