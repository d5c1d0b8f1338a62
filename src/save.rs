use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const FULL_SUFFIX: &str = "full";
pub const CROPPED_SUFFIX: &str = "cropped";

pub fn timestamped_stem(now: DateTime<Local>) -> String {
    format!("signature_{}", now.format("%Y%m%d_%H%M%S"))
}

pub fn build_filename(stem: &str, suffix: &str) -> String {
    format!("{}_{}.png", stem, suffix)
}

/// Write `image` as `<dir>/<stem>_<suffix>.png`, creating `dir` if needed.
pub fn save_png(image: &RgbaImage, dir: &Path, stem: &str, suffix: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create export folder {}", dir.display()))?;
    let path = dir.join(build_filename(stem, suffix));
    image
        .save(&path)
        .with_context(|| format!("write signature image {}", path.display()))?;
    info!(path = %path.display(), width = image.width(), height = image.height(), "saved signature");
    Ok(path)
}
