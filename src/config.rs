use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::color::ColorU8Srgb;
use crate::display::{Surface, BYTES_PER_PIXEL, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::draw::{EndpointSnap, DEFAULT_ALPHA_THRESHOLD};
use crate::error::ConfigError;

/// Target surface and drawing knobs shared by a batch of draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub background: ColorU8Srgb,
    /// Masked blits skip source pixels with alpha below this
    pub alpha_threshold: u8,
    pub line_snap: EndpointSnap,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: ColorU8Srgb::BLACK,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            line_snap: EndpointSnap::Truncate,
        }
    }
}

impl RenderConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Load and validate a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!(
            "loaded render config {} ({}x{})",
            path.display(),
            config.width,
            config.height
        );
        Ok(config)
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("saved render config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "surface must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        let bytes = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL));
        if bytes.is_none() {
            return Err(ConfigError::Invalid(format!(
                "surface {}x{} is too large",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Allocate a surface of the configured size cleared to the background
    pub fn surface(&self) -> Result<Surface, ConfigError> {
        self.validate()?;
        let mut surface = Surface::with_size(self.width, self.height);
        surface.clear(self.background);
        Ok(surface)
    }
}
