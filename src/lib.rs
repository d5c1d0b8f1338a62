// Signature capture: smoothed vector strokes from pointer input, exported as images.
//
// `SignaturePad` is the entry point. Feed it `PointerEvent`s, repaint when it asks,
// and call `export_image` / `export_cropped_image` when the user is done.

pub mod error;
pub mod gamma;
pub mod input;
pub mod observer;
pub mod pad;
pub mod path;
pub mod render;
pub mod smoother;
pub mod stroke_window;
pub mod types;

pub use error::{Error, ExportError};
pub use input::{InputState, PointerEvent};
pub use observer::{StrokeEvent, StrokeObserver};
pub use pad::SignaturePad;
pub use path::{Path, Rect, Segment};
pub use types::{Color, FrameBuffer, Point, Style};
