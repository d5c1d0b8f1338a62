use image::RgbaImage;
use tracing::{debug, warn};

use crate::error::ExportError;
use crate::input::{InputController, InputOutcome, InputState, PointerEvent};
use crate::observer::{StrokeEvent, StrokeObserver, notify};
use crate::path::{Path, Rect};
use crate::render;
use crate::types::{Color, FrameBuffer, Style};

/// A signature surface: one path, its style, and the stroke currently being drawn.
///
/// The pad never paints on its own. It raises a redraw request that the host
/// collects with [`SignaturePad::take_redraw_request`] once per frame, so bursts
/// of pointer samples coalesce into a single repaint.
pub struct SignaturePad {
    width: u32,
    height: u32,
    style: Style,
    path: Path,
    input: InputController,
    observer: Option<Box<dyn StrokeObserver + Send>>,
    needs_redraw: bool,
}

impl SignaturePad {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            style: Style::default(),
            path: Path::new(),
            input: InputController::new(),
            observer: None,
            needs_redraw: true,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.needs_redraw = true;
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stroke_state(&self) -> InputState {
        self.input.state()
    }

    pub fn set_observer(&mut self, observer: Box<dyn StrokeObserver + Send>) {
        self.observer = Some(observer);
    }

    pub fn take_observer(&mut self) -> Option<Box<dyn StrokeObserver + Send>> {
        self.observer.take()
    }

    /// Takes effect on the next redraw or export.
    pub fn set_stroke_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.style.stroke_width = width;
        } else {
            warn!(width, "ignoring non-positive stroke width");
        }
    }

    /// Takes effect on the next redraw or export.
    pub fn set_stroke_color(&mut self, color: Color) {
        self.style.stroke_color = color;
    }

    /// The backdrop is visible right away, so this schedules a redraw.
    pub fn set_background_color(&mut self, color: Color) {
        self.style.background_color = color;
        self.needs_redraw = true;
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let outcome = self.input.handle(event, &mut self.path);
        let notification = match outcome {
            InputOutcome::Ignored => return,
            InputOutcome::StrokeStarted => {
                debug!(?event, "stroke started");
                Some(StrokeEvent::Started)
            }
            InputOutcome::Sampled { .. } => None,
            InputOutcome::StrokeFinished => {
                debug!(segments = self.path.len(), "stroke finished");
                Some(StrokeEvent::Finished)
            }
        };

        self.needs_redraw = true;
        if let (Some(stroke_event), Some(observer)) = (notification, self.observer.as_deref_mut()) {
            notify(observer, stroke_event);
        }
    }

    /// Erase the signature and drop any stroke in progress.
    pub fn clear(&mut self) {
        self.path.clear();
        self.input.reset();
        self.needs_redraw = true;
    }

    pub fn has_content(&self) -> bool {
        !self.path.is_empty()
    }

    /// Replace the path wholesale, bypassing pointer input.
    pub fn inject_path(&mut self, path: Path) {
        self.input.reset();
        self.path = path;
        self.needs_redraw = true;
    }

    /// True once per batch of changes; clears the request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn render_into(&self, fb: &mut FrameBuffer) {
        render::render_into(&self.path, &self.style, fb);
    }

    pub fn try_export_image(&self, scale: f32) -> Result<RgbaImage, ExportError> {
        render::render(&self.path, &self.style, self.size(), scale)
    }

    pub fn try_export_cropped_image(&self, scale: f32) -> Result<RgbaImage, ExportError> {
        render::render_cropped(&self.path, &self.style, self.size(), scale)
    }

    /// `None` when there is nothing to export.
    pub fn export_image(&self, scale: f32) -> Option<RgbaImage> {
        self.try_export_image(scale)
            .inspect_err(|err| debug!(%err, "export skipped"))
            .ok()
    }

    /// `None` when there is nothing to export, the raster would be too large, or
    /// the crop does not fit the raster.
    pub fn export_cropped_image(&self, scale: f32) -> Option<RgbaImage> {
        self.try_export_cropped_image(scale)
            .inspect_err(|err| debug!(%err, "cropped export skipped"))
            .ok()
    }

    /// The rectangle a cropped export at `scale` cuts out, before clamping to the raster.
    pub fn crop_rect(&self, scale: f32) -> Option<Rect> {
        render::crop_rect(&self.path, &self.style, scale)
    }
}
