//! Scenes: a render config plus an ordered list of draw commands, stored as JSON

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::color::ColorU8Srgb;
use crate::config::RenderConfig;
use crate::display::Surface;
use crate::draw::{
    blit_masked_threshold, blit_opaque, draw_line_dda, draw_line_solid_snapped,
    draw_triangle_interp_vertices, draw_triangle_solid, ColoredVertex,
};
use crate::error::SceneError;
use crate::geometry::Vec2f;
use crate::image_rgba::ImageRgba;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Line {
        from: Vec2f,
        to: Vec2f,
        color: ColorU8Srgb,
    },
    LineDda {
        from: Vec2f,
        to: Vec2f,
        color: ColorU8Srgb,
    },
    Triangle {
        points: [Vec2f; 3],
        color: ColorU8Srgb,
    },
    TriangleInterp {
        vertices: [ColoredVertex; 3],
    },
    /// `image` is a file path, relative paths resolve against the scene's base dir
    Blit {
        image: PathBuf,
        at: Vec2f,
        #[serde(default = "default_masked")]
        masked: bool,
    },
}

fn default_masked() -> bool {
    true
}

/// A named, replayable list of draw commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    #[serde(default)]
    pub config: RenderConfig,
    #[serde(default)]
    pub commands: Vec<DrawCommand>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Scene {
    pub fn new(name: impl Into<String>, config: RenderConfig) -> Self {
        Self {
            name: name.into(),
            config,
            commands: Vec::new(),
            base_dir: None,
        }
    }

    /// Resolve relative image paths against `dir` instead of the working directory
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(SceneError::Serialize)?;
        fs::write(path, json).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load scene from a JSON file. Image paths resolve against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut scene: Self = serde_json::from_str(&json).map_err(|source| SceneError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        scene.config.validate()?;
        scene.base_dir = path.parent().map(Path::to_path_buf);
        log::info!(
            "loaded scene '{}' from {} ({} commands)",
            scene.name,
            path.display(),
            scene.commands.len()
        );
        Ok(scene)
    }

    fn resolve(&self, image: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if image.is_relative() => dir.join(image),
            _ => image.to_path_buf(),
        }
    }

    /// Decode every referenced image once, keyed by its path as written
    fn load_images(&self) -> Result<HashMap<&Path, ImageRgba>, SceneError> {
        let mut images = HashMap::new();
        for command in &self.commands {
            let DrawCommand::Blit { image, .. } = command else {
                continue;
            };
            if images.contains_key(image.as_path()) {
                continue;
            }
            let decoded = ImageRgba::load(self.resolve(image)).map_err(|e| {
                log::warn!("scene '{}': {}", self.name, e);
                e
            })?;
            images.insert(image.as_path(), decoded);
        }
        Ok(images)
    }

    /// Allocate a surface from the config and replay every command in order
    pub fn render(&self) -> Result<Surface, SceneError> {
        let mut surface = self.config.surface()?;
        let images = self.load_images()?;
        log::debug!(
            "rendering scene '{}': {} commands, {} images",
            self.name,
            self.commands.len(),
            images.len()
        );

        for command in &self.commands {
            match command {
                DrawCommand::Line { from, to, color } => {
                    draw_line_solid_snapped(&mut surface, *from, *to, *color, self.config.line_snap);
                },
                DrawCommand::LineDda { from, to, color } => {
                    draw_line_dda(&mut surface, *from, *to, *color);
                },
                DrawCommand::Triangle { points, color } => {
                    draw_triangle_solid(&mut surface, points[0], points[1], points[2], *color);
                },
                DrawCommand::TriangleInterp { vertices } => {
                    draw_triangle_interp_vertices(&mut surface, *vertices);
                },
                DrawCommand::Blit { image, at, masked } => {
                    // Every blit path was decoded by load_images
                    let Some(img) = images.get(image.as_path()) else {
                        continue;
                    };
                    if *masked {
                        blit_masked_threshold(&mut surface, img, *at, self.config.alpha_threshold);
                    } else {
                        blit_opaque(&mut surface, img, *at);
                    }
                },
            }
        }
        Ok(surface)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("untitled", RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorF;
    use crate::draw::EndpointSnap;
    use crate::error::{ConfigError, ImageError};

    fn small_scene() -> Scene {
        let mut scene = Scene::new("test", RenderConfig::with_size(16, 16));
        scene.push(DrawCommand::Triangle {
            points: [Vec2f::new(1.0, 1.0), Vec2f::new(10.0, 1.0), Vec2f::new(1.0, 10.0)],
            color: ColorU8Srgb::RED,
        });
        scene.push(DrawCommand::Line {
            from: Vec2f::new(0.0, 15.0),
            to: Vec2f::new(15.0, 15.0),
            color: ColorU8Srgb::WHITE,
        });
        scene
    }

    #[test]
    fn test_commands_replay_in_order() {
        let mut scene = small_scene();
        scene.push(DrawCommand::Line {
            from: Vec2f::new(1.0, 1.0),
            to: Vec2f::new(1.0, 1.0),
            color: ColorU8Srgb::BLUE,
        });
        let s = scene.render().unwrap();
        assert_eq!(s.get_pixel(1, 1), Some(ColorU8Srgb::BLUE));
        assert_eq!(s.get_pixel(2, 2), Some(ColorU8Srgb::RED));
        assert_eq!(s.get_pixel(7, 15), Some(ColorU8Srgb::WHITE));
        assert_eq!(s.get_pixel(14, 1), Some(ColorU8Srgb::BLACK));
    }

    #[test]
    fn test_line_honours_config_snap() {
        let mut scene = Scene::new("snap", RenderConfig::with_size(4, 4));
        scene.config.line_snap = EndpointSnap::Round;
        scene.push(DrawCommand::Line {
            from: Vec2f::new(1.6, 1.6),
            to: Vec2f::new(1.6, 1.6),
            color: ColorU8Srgb::WHITE,
        });
        let s = scene.render().unwrap();
        assert_eq!(s.get_pixel(2, 2), Some(ColorU8Srgb::WHITE));
        assert_eq!(s.get_pixel(1, 1), Some(ColorU8Srgb::BLACK));
    }

    #[test]
    fn test_json_format() {
        let json = r#"{
            "name": "demo",
            "config": { "width": 8, "height": 8 },
            "commands": [
                { "kind": "line_dda", "from": { "x": 0, "y": 0 }, "to": { "x": 7, "y": 7 },
                  "color": { "r": 0, "g": 255, "b": 0 } },
                { "kind": "triangle_interp", "vertices": [
                    { "position": { "x": 0, "y": 7 }, "color": { "r": 1, "g": 0, "b": 0 } },
                    { "position": { "x": 3, "y": 7 }, "color": { "r": 1, "g": 0, "b": 0 } },
                    { "position": { "x": 0, "y": 4 }, "color": { "r": 1, "g": 0, "b": 0 } }
                ] },
                { "kind": "blit", "image": "sprite.png", "at": { "x": 2, "y": 3 } }
            ]
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.config.alpha_threshold, 128);
        assert_eq!(scene.commands.len(), 3);
        assert!(matches!(
            scene.commands[1],
            DrawCommand::TriangleInterp { vertices } if vertices[2].color == ColorF::new(1.0, 0.0, 0.0)
        ));
        assert!(matches!(scene.commands[2], DrawCommand::Blit { masked: true, .. }));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let scene = Scene::new("empty", RenderConfig::with_size(0, 4));
        assert!(matches!(
            scene.render(),
            Err(SceneError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test_log::test]
    fn test_missing_image_fails_render() {
        let mut scene = small_scene().with_base_dir("/nonexistent/draw2d");
        scene.push(DrawCommand::Blit {
            image: PathBuf::from("missing.png"),
            at: Vec2f::new(0.0, 0.0),
            masked: true,
        });
        let err = scene.render().unwrap_err();
        assert!(matches!(err, SceneError::Image(ImageError::Decode { .. })));
        assert!(err.to_string().contains("/nonexistent/draw2d/missing.png"));
    }

    #[test]
    fn test_relative_paths_resolve_against_base_dir() {
        let scene = Scene::default().with_base_dir("/assets");
        assert_eq!(scene.resolve(Path::new("a.png")), PathBuf::from("/assets/a.png"));
        assert_eq!(scene.resolve(Path::new("/abs/b.png")), PathBuf::from("/abs/b.png"));
        assert_eq!(Scene::default().resolve(Path::new("a.png")), PathBuf::from("a.png"));
    }
}
