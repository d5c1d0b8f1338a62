// Error types. Every variant states *where* things went wrong.
use thiserror::Error;

use crate::path::Rect;

/// Failures of the window host.
#[derive(Debug, Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String),   // Creating the window failed
    #[error("window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
}

/// Why an export produced no image. All of these are expected outcomes, not crashes.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ExportError {
    /// Nothing has been signed yet.
    #[error("no signature to export")]
    EmptyPath,
    /// The padded bounds do not overlap the raster.
    #[error("crop rectangle {rect:?} does not fit a {width}x{height} raster")]
    CropFailure { rect: Rect, width: u32, height: u32 },
    #[error("export scale must be finite and positive, got {0}")]
    InvalidScale(f32),
    /// The scaled raster would exceed [`crate::render::MAX_RASTER_PIXELS`].
    #[error("a {width}x{height} export is too large to allocate")]
    RasterTooLarge { width: u32, height: u32 },
}
