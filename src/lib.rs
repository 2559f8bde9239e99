//! Software rasterizer for in-memory pixel buffers.
//!
//! Draws Bresenham lines, solid and color-interpolated triangles, and
//! alpha-masked image blits into an RGBX [`Surface`]. Every primitive clips
//! to the surface; off-surface and degenerate input draws nothing.
//!
//! ```
//! use draw2d::{draw_line_solid, draw_triangle_solid, ColorU8Srgb, Surface, Vec2f};
//!
//! let mut surface = Surface::with_size(128, 128);
//! draw_triangle_solid(
//!     &mut surface,
//!     Vec2f::new(30.0, 30.0),
//!     Vec2f::new(80.0, 30.0),
//!     Vec2f::new(55.0, 80.0),
//!     ColorU8Srgb::RED,
//! );
//! draw_line_solid(&mut surface, Vec2f::new(10.0, 10.0), Vec2f::new(100.0, 100.0), ColorU8Srgb::WHITE);
//! assert_eq!(surface.get_pixel(55, 60), Some(ColorU8Srgb::RED));
//! ```

pub mod color;
pub mod config;
pub mod display;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod image_rgba;
pub mod scene;

pub use color::{linear_to_srgb, srgb_to_linear, ColorF, ColorU8Srgb, ColorU8SrgbAlpha};
pub use config::RenderConfig;
pub use display::Surface;
pub use draw::{
    blit_masked, blit_masked_threshold, blit_opaque, draw_line_dda, draw_line_solid,
    draw_line_solid_snapped, draw_triangle_interp, draw_triangle_interp_vertices,
    draw_triangle_solid, ColoredVertex, EndpointSnap, TriangleShape, DEFAULT_ALPHA_THRESHOLD,
};
pub use error::{ConfigError, ImageError, SceneError};
pub use geometry::{Bounds, Triangle, Vec2f};
pub use image_rgba::ImageRgba;
pub use scene::{DrawCommand, Scene};
