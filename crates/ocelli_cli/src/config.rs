//! Ocelli configuration file handling

use anyhow::{bail, Context, Result};
use ocelli_face::FaceConfig;
use ocelli_paint::{Color, Size};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "ocelli.toml";

/// Top-level configuration (ocelli.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OcelliConfig {
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub face: FaceConfig,
}

/// Drawing surface the face is bound to
#[derive(Debug, Deserialize, Serialize)]
pub struct SurfaceConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Background color as `#rrggbb`
    #[serde(default = "default_background")]
    pub background: String,
    /// Dot color as `#rrggbb`
    #[serde(default = "default_dot")]
    pub dot: String,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_background() -> String {
    "#000000".to_string()
}

fn default_dot() -> String {
    "#3297a0".to_string()
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
            dot: default_dot(),
        }
    }
}

impl SurfaceConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    pub fn background_color(&self) -> Result<Color> {
        parse_color(&self.background).context("Invalid surface.background")
    }

    pub fn dot_color(&self) -> Result<Color> {
        parse_color(&self.dot).context("Invalid surface.dot")
    }
}

/// Headless run settings
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RunConfig {
    /// Logical milliseconds between frames
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Minimum gap between relayed dialogue transitions
    #[serde(default = "default_dialogue_window")]
    pub dialogue_window_ms: f64,
}

fn default_frame_ms() -> u64 {
    16
}

fn default_dialogue_window() -> f64 {
    1000.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
            dialogue_window_ms: default_dialogue_window(),
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional)
pub fn parse_color(value: &str) -> Result<Color> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("expected #rrggbb, got {value:?}");
    }
    let packed =
        u32::from_str_radix(hex, 16).with_context(|| format!("expected #rrggbb, got {value:?}"))?;
    Ok(Color::from_hex(packed))
}

impl OcelliConfig {
    /// Load configuration from a file, or from `ocelli.toml` inside a directory
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            bail!(
                "No {} found at {}. Run `ocelli init-config` to create one.",
                CONFIG_FILE,
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: OcelliConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.surface.width == 0 || self.surface.height == 0 {
            bail!("surface dimensions must be non-zero");
        }
        if self.run.frame_ms == 0 {
            bail!("run.frame_ms must be > 0");
        }
        if !(self.run.dialogue_window_ms.is_finite() && self.run.dialogue_window_ms >= 0.0) {
            bail!("run.dialogue_window_ms must be a non-negative number");
        }
        self.surface.background_color()?;
        self.surface.dot_color()?;
        self.face.validate()?;
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
