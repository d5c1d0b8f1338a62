// Rasterizes the accumulated path.
//
// Segments are stroked into a coverage mask first (round caps, 1 px soft edge),
// then the mask is blended stroke-over-backdrop through the gamma table. Curves
// are flattened into short lines before stroking.

use glam::Vec2;
use image::{Rgba, RgbaImage, imageops};

use crate::error::ExportError;
use crate::gamma::GammaLut;
use crate::path::{Path, Rect, Segment};
use crate::types::{Color, FrameBuffer, Mask, Style};

/// Longest flattened piece of a curve, in output pixels.
const FLATTEN_STEP_PX: f32 = 2.0;
const MAX_FLATTEN_STEPS: usize = 256;

/// Largest export raster, in pixels. The image and its coverage mask each take
/// four bytes per pixel.
pub const MAX_RASTER_PIXELS: u64 = 1 << 26;

/// Output raster size for a view of `size` exported at `scale`. Saturates at `u32::MAX`.
pub fn raster_size(size: (u32, u32), scale: f32) -> (u32, u32) {
    let w = (size.0 as f32 * scale).round().max(1.0) as u32;
    let h = (size.1 as f32 * scale).round().max(1.0) as u32;
    (w, h)
}

fn check_scale(scale: f32) -> Result<(), ExportError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(ExportError::InvalidScale(scale))
    }
}

/// Full-size export of the path over the backdrop.
pub fn render(path: &Path, style: &Style, size: (u32, u32), scale: f32) -> Result<RgbaImage, ExportError> {
    if path.is_empty() {
        return Err(ExportError::EmptyPath);
    }
    check_scale(scale)?;
    let (w, h) = raster_size(size, scale);
    if u64::from(w) * u64::from(h) > MAX_RASTER_PIXELS {
        return Err(ExportError::RasterTooLarge { width: w, height: h });
    }
    Ok(paint(path, style, w, h, scale))
}

/// Bounds padded by half the stroke width so caps are not clipped, in output pixels.
/// Not clamped to the raster.
pub fn crop_rect(path: &Path, style: &Style, scale: f32) -> Option<Rect> {
    path.bounds().map(|bounds| bounds.inflated(style.stroke_width / 2.0).scaled(scale))
}

/// Export cropped to the signature. Never larger than [`render`]'s output.
pub fn render_cropped(
    path: &Path,
    style: &Style,
    size: (u32, u32),
    scale: f32,
) -> Result<RgbaImage, ExportError> {
    let full = render(path, style, size, scale)?;
    let rect = crop_rect(path, style, scale).ok_or(ExportError::EmptyPath)?;
    let (width, height) = full.dimensions();

    let x0 = rect.min.x.floor().max(0.0);
    let y0 = rect.min.y.floor().max(0.0);
    let x1 = rect.max.x.ceil().min(width as f32);
    let y1 = rect.max.y.ceil().min(height as f32);
    if !(x1 > x0 && y1 > y0) {
        return Err(ExportError::CropFailure { rect, width, height });
    }

    let (x0, y0) = (x0 as u32, y0 as u32);
    let (cw, ch) = (x1 as u32 - x0, y1 as u32 - y0);
    Ok(imageops::crop_imm(&full, x0, y0, cw, ch).to_image())
}

/// Draw the live view into the window buffer. An empty path shows just the backdrop.
pub fn render_into(path: &Path, style: &Style, fb: &mut FrameBuffer) {
    if path.is_empty() {
        fb.fill(style.background_color);
        return;
    }
    let img = paint(path, style, fb.width as u32, fb.height as u32, 1.0);
    fb.copy_from_rgba(&img);
}

fn paint(path: &Path, style: &Style, width: u32, height: u32, scale: f32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, Rgba(style.background_color.to_rgba_array()));
    let mut mask = Mask::new(width, height);
    let radius = style.stroke_width * scale / 2.0;

    for segment in path.segments() {
        stroke_segment(&mut mask, segment, scale, radius);
    }

    composite(&mut img, &mask, style.stroke_color, GammaLut::shared());
    img
}

fn stroke_segment(mask: &mut Mask, segment: &Segment, scale: f32, radius: f32) {
    match *segment {
        Segment::Line { from, to } => stroke_capsule(mask, from * scale, to * scale, radius),
        Segment::Curve { .. } => {
            let steps = flatten_steps(segment, scale);
            let mut last = segment.start() * scale;
            for i in 1..=steps {
                let next = segment.evaluate(i as f32 / steps as f32) * scale;
                stroke_capsule(mask, last, next, radius);
                last = next;
            }
        }
    }
}

/// Enough pieces that none is longer than a couple of output pixels.
fn flatten_steps(segment: &Segment, scale: f32) -> usize {
    let hull: Vec<Vec2> = segment.hull_points().collect();
    let polygon_len: f32 = hull.windows(2).map(|w| w[0].distance(w[1])).sum::<f32>() * scale;
    ((polygon_len / FLATTEN_STEP_PX).ceil() as usize).clamp(1, MAX_FLATTEN_STEPS)
}

/// Round-capped line of half-width `radius`, coverage measured at pixel centers.
fn stroke_capsule(mask: &mut Mask, start: Vec2, end: Vec2, radius: f32) {
    let pad = radius + 1.0;
    let min = start.min(end) - Vec2::splat(pad);
    let max = start.max(end) + Vec2::splat(pad);

    let x0 = (min.x.floor() as i32).max(0);
    let y0 = (min.y.floor() as i32).max(0);
    let x1 = (max.x.ceil() as i32).min(mask.width as i32 - 1);
    let y1 = (max.y.ceil() as i32).min(mask.height as i32 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let dist = point_segment_distance(center, start, end);
            let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
            if coverage > 0.0 {
                mask.cover(x, y, coverage);
            }
        }
    }
}

fn point_segment_distance(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let v = end - start;
    let len_sq = v.length_squared();
    if len_sq <= f32::EPSILON {
        return point.distance(start);
    }
    let t = ((point - start).dot(v) / len_sq).clamp(0.0, 1.0);
    point.distance(start + v * t)
}

fn composite(img: &mut RgbaImage, mask: &Mask, color: Color, lut: &GammaLut) {
    for (pixel, &a) in img.pixels_mut().zip(mask.alpha.iter()) {
        if a <= 0.0 {
            continue;
        }
        let bg = Color::from_rgba_array(pixel.0);
        pixel.0 = lut.over(bg, color, a).to_rgba_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn curve_path() -> Path {
        Path::from_segments([Segment::Curve {
            start: vec2(0.0, 0.0),
            end: vec2(10.0, 10.0),
            control1: vec2(0.0, 10.0),
            control2: vec2(10.0, 0.0),
        }])
    }

    fn ink_pixels(img: &RgbaImage, background: Color) -> usize {
        img.pixels().filter(|p| p.0 != background.to_rgba_array()).count()
    }

    #[test]
    fn empty_path_is_not_exported() {
        let style = Style::default();
        assert!(matches!(
            render(&Path::new(), &style, (32, 32), 1.0),
            Err(ExportError::EmptyPath)
        ));
        assert!(matches!(
            render_cropped(&Path::new(), &style, (32, 32), 1.0),
            Err(ExportError::EmptyPath)
        ));
    }

    #[test]
    fn invalid_scale_is_rejected() {
        let style = Style::default();
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                render(&curve_path(), &style, (32, 32), scale),
                Err(ExportError::InvalidScale(_))
            ));
        }
    }

    #[test]
    fn oversized_scale_is_refused_before_allocating() {
        let style = Style::default();
        assert!(matches!(
            render(&curve_path(), &style, (640, 480), 1.0e30),
            Err(ExportError::RasterTooLarge { width: u32::MAX, height: u32::MAX })
        ));
        assert!(matches!(
            render(&curve_path(), &style, (640, 480), 20.0),
            Err(ExportError::RasterTooLarge { width: 12800, height: 9600 })
        ));
        assert!(matches!(
            render_cropped(&curve_path(), &style, (640, 480), 1.0e30),
            Err(ExportError::RasterTooLarge { .. })
        ));
        assert!(render(&curve_path(), &style, (640, 480), 8.0).is_ok());
    }

    #[test]
    fn raster_follows_view_size_times_scale() {
        let style = Style::default();
        let img = render(&curve_path(), &style, (40, 30), 2.0).expect("render");
        assert_eq!(img.dimensions(), (80, 60));
        assert_eq!(raster_size((3, 3), 0.1), (1, 1));
    }

    #[test]
    fn dot_center_gets_exact_stroke_color() {
        let style = Style::default();
        let path = Path::from_segments([Segment::Line { from: vec2(4.0, 7.0), to: vec2(6.0, 7.0) }]);
        let img = render(&path, &style, (16, 16), 1.0).expect("render");

        assert_eq!(img.get_pixel(5, 7).0, Color::BLACK.to_rgba_array());
        assert_eq!(img.get_pixel(12, 12).0, Color::WHITE.to_rgba_array());
        assert!(ink_pixels(&img, Color::WHITE) >= 4);
    }

    #[test]
    fn curve_is_drawn_along_its_midpoint() {
        let style = Style { stroke_width: 3.0, ..Style::default() };
        let img = render(&curve_path(), &style, (32, 32), 1.0).expect("render");
        // B(0.5) = (5,5); pixel (4,4) has its center half a pixel away.
        assert_eq!(img.get_pixel(4, 4).0, Color::BLACK.to_rgba_array());
        assert_eq!(img.get_pixel(25, 25).0, Color::WHITE.to_rgba_array());
    }

    #[test]
    fn crop_rect_pads_bounds_by_half_stroke_width() {
        let style = Style::default();
        assert_eq!(
            crop_rect(&curve_path(), &style, 1.0),
            Some(Rect::new(vec2(-1.0, -1.0), vec2(11.0, 11.0)))
        );
        assert_eq!(
            crop_rect(&curve_path(), &style, 2.0),
            Some(Rect::new(vec2(-2.0, -2.0), vec2(22.0, 22.0)))
        );
        assert_eq!(crop_rect(&Path::new(), &style, 1.0), None);
    }

    #[test]
    fn cropped_export_is_clamped_to_the_raster() {
        let style = Style::default();
        let full = render(&curve_path(), &style, (64, 48), 1.0).expect("render");
        let cropped = render_cropped(&curve_path(), &style, (64, 48), 1.0).expect("crop");

        assert_eq!(cropped.dimensions(), (11, 11));
        assert!(cropped.width() <= full.width() && cropped.height() <= full.height());
        assert_eq!(ink_pixels(&cropped, Color::WHITE), ink_pixels(&full, Color::WHITE));
    }

    #[test]
    fn cropped_export_keeps_stroke_caps() {
        let style = Style { stroke_width: 4.0, ..Style::default() };
        let path = Path::from_segments([Segment::Line { from: vec2(20.0, 20.0), to: vec2(30.0, 20.0) }]);
        let cropped = render_cropped(&path, &style, (64, 64), 1.0).expect("crop");

        // Bounds (20,20)-(30,20) padded by 2 on every side.
        assert_eq!(cropped.dimensions(), (14, 4));
        let full = render(&path, &style, (64, 64), 1.0).expect("render");
        assert_eq!(ink_pixels(&cropped, Color::WHITE), ink_pixels(&full, Color::WHITE));
    }

    #[test]
    fn signature_outside_the_view_cannot_be_cropped() {
        let style = Style::default();
        let path = Path::from_segments([Segment::Line { from: vec2(200.0, 200.0), to: vec2(210.0, 200.0) }]);
        assert!(matches!(
            render_cropped(&path, &style, (32, 32), 1.0),
            Err(ExportError::CropFailure { width: 32, height: 32, .. })
        ));
    }

    #[test]
    fn render_into_shows_backdrop_for_empty_path() {
        let style = Style { background_color: Color::rgba(0x10, 0x20, 0x30, 255), ..Style::default() };
        let mut fb = FrameBuffer::new(4, 4);
        render_into(&Path::new(), &style, &mut fb);
        assert!(fb.pixels.iter().all(|&px| px == 0x0010_2030));
    }

    #[test]
    fn render_into_matches_scale_one_export() {
        let style = Style::default();
        let mut fb = FrameBuffer::new(16, 16);
        render_into(&curve_path(), &style, &mut fb);
        let img = render(&curve_path(), &style, (16, 16), 1.0).expect("render");

        let mut expected = FrameBuffer::new(16, 16);
        expected.copy_from_rgba(&img);
        assert_eq!(fb.pixels, expected.pixels);
    }
}
