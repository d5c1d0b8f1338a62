// What you SEE:
// • A blank pad in the window's background color.
// • Hold Left Mouse and drag: a smooth ink stroke follows the pointer.
// • S saves the signature as PNG, X saves it cropped to the ink.
// • C clears. ESC quits.

mod config;
mod draw;
mod logging;
mod save;

use anyhow::Result;
use chrono::Local;
use config::Settings;
use draw::{Drawer, PointerTracker, draw_crosshair, draw_text_5x7};
use signature_pad::{FrameBuffer, SignaturePad, StrokeObserver};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

const HUD_COLOR: u32 = 0x00_80_80_80;
const CROSSHAIR_COLOR: u32 = 0x00_B0_B0_B0;
const STATUS_TTL: Duration = Duration::from_secs(2);

/// Counts finished strokes for the HUD.
struct StrokeCounter(Arc<AtomicUsize>);

impl StrokeObserver for StrokeCounter {
    fn on_stroke_finished(&mut self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

fn main() -> Result<()> {
    let settings_path = Settings::resolve_path(std::env::args().nth(1));
    let settings = Settings::load(&settings_path)?;
    logging::init(settings.debug_logging);
    info!(path = %settings_path.display(), ?settings, "loaded settings");
    if !settings_path.exists() {
        // First run: leave an editable copy of the defaults behind.
        if let Err(err) = settings.save(&settings_path) {
            warn!("{err:#}");
        }
    }

    let (w, h) = (settings.width as usize, settings.height as usize);
    let mut drawer = Drawer::new("Signature Pad", w, h)?;
    let mut pad = SignaturePad::new(settings.width, settings.height).with_style(settings.style());

    let strokes = Arc::new(AtomicUsize::new(0));
    pad.set_observer(Box::new(StrokeCounter(Arc::clone(&strokes))));

    let mut tracker = PointerTracker::default();
    /* `canvas` holds the pad as last repainted; `screen` is canvas + overlays. */
    let mut canvas = FrameBuffer::new(w, h);
    let mut screen = FrameBuffer::new(w, h);
    let mut status: Option<(String, Instant)> = None;

    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Input */
        if let Some(event) = tracker.update(drawer.left_mouse_down(), drawer.mouse_pos()) {
            pad.handle_pointer(event);
        }
        if drawer.c_pressed_once() {
            pad.clear();
            strokes.store(0, Ordering::Relaxed);
        }
        if drawer.s_pressed_once() {
            status = Some((save_export(&pad, &settings, false), Instant::now()));
        }
        if drawer.x_pressed_once() {
            status = Some((save_export(&pad, &settings, true), Instant::now()));
        }

        /* 2) Repaint the pad only when it asked for it */
        if pad.take_redraw_request() {
            pad.render_into(&mut canvas);
        }
        screen.pixels.copy_from_slice(&canvas.pixels);

        /* 3) Overlays */
        if let Some(pos) = drawer.mouse_pos() {
            draw_crosshair(&mut screen, pos.x as i32, pos.y as i32, 10, CROSSHAIR_COLOR);
        }
        let hint = if pad.has_content() {
            format!("STROKES: {} | C: CLEAR  S: SAVE  X: CROP", strokes.load(Ordering::Relaxed))
        } else {
            String::from("SIGN HERE")
        };
        draw_text_5x7(&mut screen, 8, 8, &hint, HUD_COLOR);

        if status.as_ref().is_some_and(|(_, since)| since.elapsed() >= STATUS_TTL) {
            status = None;
        }
        if let Some((text, _)) = &status {
            draw_text_5x7(&mut screen, 8, h as i32 - 16, text, HUD_COLOR);
        }

        /* 4) Present */
        drawer.present(&screen)?;
    }

    Ok(())
}

/// Export and write a PNG; returns the status line for the HUD.
fn save_export(pad: &SignaturePad, settings: &Settings, cropped: bool) -> String {
    let (image, suffix) = if cropped {
        (pad.export_cropped_image(settings.export_scale), save::CROPPED_SUFFIX)
    } else {
        (pad.export_image(settings.export_scale), save::FULL_SUFFIX)
    };
    let Some(image) = image else {
        return String::from("NOTHING TO SAVE");
    };

    let stem = save::timestamped_stem(Local::now());
    match save::save_png(&image, &settings.export_dir, &stem, suffix) {
        Ok(_) => String::from("SAVED"),
        Err(err) => {
            warn!("{err:#}");
            String::from("SAVE FAILED")
        }
    }
}
