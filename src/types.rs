// Core value types shared by the smoother, the path and the rasterizer.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// A sample position in view-local coordinates (pixels, y pointing down).
pub type Point = glam::Vec2;

/// Straight RGBA8 color (not premultiplied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_rgba_array(color: [u8; 4]) -> Self {
        Self::rgba(color[0], color[1], color[2], color[3])
    }
}

/// How strokes and the backdrop look. Plain data: read at render time only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub stroke_width: f32,       // pixels in view space, always > 0
    pub stroke_color: Color,
    pub background_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            stroke_color: Color::BLACK,
            background_color: Color::WHITE,
        }
    }
}

/// Pixels ready for the window.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Copy a rendered raster into this buffer, packing RGB as 0x00RRGGBB.
    /// A buffer of a different size is reallocated to the raster size.
    pub fn copy_from_rgba(&mut self, img: &RgbaImage) {
        let (w, h) = img.dimensions();
        if self.width != w as usize || self.height != h as usize {
            *self = Self::new(w as usize, h as usize);
        }
        for (dst, pixel) in self.pixels.iter_mut().zip(img.pixels()) {
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            *dst = (r << 16) | (g << 8) | b;
        }
    }

    /// Fill every pixel with one color (alpha is dropped, the window is opaque).
    pub fn fill(&mut self, color: Color) {
        let packed = ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32;
        for px in &mut self.pixels {
            *px = packed;
        }
    }
}

/// Stroke coverage in [0,1] per pixel; 1 = fully inside a stroke.
/// Visual: unseen directly; it controls how much stroke color lands on each pixel.
pub struct Mask {
    pub width: u32,
    pub height: u32,
    pub alpha: Vec<f32>,   // length = width * height, values clamped to [0.0, 1.0]
}

impl Mask {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, alpha: vec![0.0; width as usize * height as usize] }
    }

    /// Raise coverage at (x,y) to at least `coverage`; overlapping strokes never double up.
    #[inline]
    pub fn cover(&mut self, x: i32, y: i32, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        let a = &mut self.alpha[idx];
        if coverage > *a {
            *a = coverage.min(1.0);
        }
    }
}
