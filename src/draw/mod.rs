//! Rasterization primitives drawing into a [`Surface`](crate::display::Surface)
//!
//! All entry points clip to the surface and silently ignore degenerate or
//! non-finite input.

mod blit;
mod interp;
mod line;
mod triangle;

pub use blit::{blit_masked, blit_masked_threshold, blit_opaque, DEFAULT_ALPHA_THRESHOLD};
pub use interp::{draw_triangle_interp, draw_triangle_interp_vertices, ColoredVertex};
pub use line::{draw_line_dda, draw_line_solid, draw_line_solid_snapped, EndpointSnap};
pub use triangle::{draw_triangle_solid, TriangleShape};
