mod surface;

pub use surface::{Surface, BYTES_PER_PIXEL};

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
