// Settings for the desktop pad, stored as JSON next to where it runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use signature_pad::render::{MAX_RASTER_PIXELS, raster_size};
use signature_pad::{Color, Style};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const SETTINGS_FILE_NAME: &str = "signature_pad.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub stroke_width: f32,
    pub stroke_color: Color,
    pub background_color: Color,
    /// Scale applied to saved images (2.0 for high-DPI output).
    pub export_scale: f32,
    pub export_dir: PathBuf,
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let style = Style::default();
        Self {
            width: 640,
            height: 480,
            stroke_width: style.stroke_width,
            stroke_color: style.stroke_color,
            background_color: style.background_color,
            export_scale: 1.0,
            export_dir: PathBuf::from("signatures"),
            debug_logging: false,
        }
    }
}

impl Settings {
    /// Settings path from the first CLI argument, else the default file name.
    pub fn resolve_path(arg: Option<String>) -> PathBuf {
        arg.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME))
    }

    /// Missing or blank files give defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut loaded: Settings = serde_json::from_str(&content)
            .with_context(|| format!("deserialize settings file {}", path.display()))?;
        loaded.sanitize();
        Ok(loaded)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create settings folder {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, json).with_context(|| format!("write settings file {}", path.display()))?;
        Ok(())
    }

    /// Put out-of-range values back to their defaults.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            warn!(stroke_width = self.stroke_width, "invalid stroke width, using default");
            self.stroke_width = defaults.stroke_width;
        }
        if !(self.export_scale.is_finite() && self.export_scale > 0.0) {
            warn!(export_scale = self.export_scale, "invalid export scale, using default");
            self.export_scale = defaults.export_scale;
        }
        if self.width == 0 || self.height == 0 {
            warn!(width = self.width, height = self.height, "invalid window size, using default");
            self.width = defaults.width;
            self.height = defaults.height;
        }
        let (w, h) = raster_size((self.width, self.height), self.export_scale);
        if u64::from(w) * u64::from(h) > MAX_RASTER_PIXELS {
            warn!(export_scale = self.export_scale, w, h, "export scale too large, using default");
            self.export_scale = defaults.export_scale;
        }
    }

    pub fn style(&self) -> Style {
        Style {
            stroke_width: self.stroke_width,
            stroke_color: self.stroke_color,
            background_color: self.background_color,
        }
    }
}
