// Rolling five-sample cubic fit.
//
// Every time the window fills up, slot 3 is replaced by the midpoint of slots 2
// and 4 and a cubic from slot 0 to that midpoint is emitted with slots 1 and 2
// as controls. The window then slides so the next curve starts exactly where
// this one ended.

use crate::path::Segment;
use crate::stroke_window::StrokeWindow;
use crate::types::Point;

/// Half-length of the line that stands in for a tap.
const DOT_HALF_WIDTH: f32 = 1.0;

#[derive(Debug, Clone, Default)]
pub struct CurveSmoother {
    window: StrokeWindow,
}

impl CurveSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// First sample of a stroke. Emits nothing.
    pub fn begin(&mut self, point: Point) {
        self.window.reset(point);
    }

    /// Feed one sample; returns a curve once five samples have been gathered.
    pub fn add_point(&mut self, point: Point) -> Option<Segment> {
        self.window.push(point);
        if !self.window.is_full() {
            return None;
        }

        let join = (self.window.get(2) + self.window.get(4)) * 0.5;
        self.window.set(3, join);
        let curve = Segment::Curve {
            start: self.window.get(0),
            end: self.window.get(3),
            control1: self.window.get(1),
            control2: self.window.get(2),
        };
        self.window.slide();
        Some(curve)
    }

    /// End of stroke. Anything short of a full window leaves a dot at slot 0.
    pub fn finish(&mut self) -> Option<Segment> {
        let dot = if self.window.cursor() < 4 {
            let center = self.window.get(0);
            Some(Segment::Line {
                from: Point::new(center.x - DOT_HALF_WIDTH, center.y),
                to: Point::new(center.x + DOT_HALF_WIDTH, center.y),
            })
        } else {
            None
        };
        self.window.clear_cursor();
        dot
    }

    pub fn cursor(&self) -> usize {
        self.window.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn feed(smoother: &mut CurveSmoother, points: &[(f32, f32)]) -> Vec<Segment> {
        let (first, rest) = points.split_first().expect("at least one point");
        smoother.begin(vec2(first.0, first.1));
        rest.iter()
            .filter_map(|&(x, y)| smoother.add_point(vec2(x, y)))
            .collect()
    }

    #[test]
    fn four_samples_emit_nothing() {
        let mut smoother = CurveSmoother::new();
        let emitted = feed(&mut smoother, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert!(emitted.is_empty());
        assert_eq!(smoother.cursor(), 3);
    }

    #[test]
    fn fifth_sample_emits_curve_ending_at_midpoint() {
        let mut smoother = CurveSmoother::new();
        let emitted = feed(
            &mut smoother,
            &[(0.0, 0.0), (10.0, 0.0), (20.0, 10.0), (30.0, 30.0), (40.0, 20.0)],
        );
        assert_eq!(
            emitted,
            vec![Segment::Curve {
                start: vec2(0.0, 0.0),
                end: vec2(30.0, 15.0),
                control1: vec2(10.0, 0.0),
                control2: vec2(20.0, 10.0),
            }]
        );
        assert_eq!(smoother.cursor(), 1);
    }

    #[test]
    fn consecutive_curves_share_endpoints() {
        let mut smoother = CurveSmoother::new();
        let points: Vec<(f32, f32)> = (0..20).map(|i| (i as f32 * 3.0, (i * i) as f32 * 0.5)).collect();
        let emitted = feed(&mut smoother, &points);

        // Curves complete at samples 5, 8, 11, 14, 17 and 20.
        assert_eq!(emitted.len(), 6);
        for pair in emitted.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        assert_eq!(emitted[0].start(), vec2(0.0, 0.0));
    }

    #[test]
    fn second_curve_uses_carried_sample_as_first_control() {
        let mut smoother = CurveSmoother::new();
        let emitted = feed(
            &mut smoother,
            &[
                (0.0, 0.0),
                (1.0, 0.0),
                (2.0, 0.0),
                (3.0, 0.0),
                (4.0, 0.0),
                (5.0, 0.0),
                (6.0, 0.0),
                (7.0, 0.0),
            ],
        );
        assert_eq!(emitted.len(), 2);
        assert_eq!(
            emitted[1],
            Segment::Curve {
                start: vec2(3.0, 0.0),
                end: vec2(6.0, 0.0),
                control1: vec2(4.0, 0.0),
                control2: vec2(5.0, 0.0),
            }
        );
    }

    #[test]
    fn tap_finishes_with_two_pixel_dot() {
        let mut smoother = CurveSmoother::new();
        smoother.begin(vec2(5.0, 7.0));
        assert_eq!(
            smoother.finish(),
            Some(Segment::Line { from: vec2(4.0, 7.0), to: vec2(6.0, 7.0) })
        );
        assert_eq!(smoother.cursor(), 0);
    }

    #[test]
    fn finish_after_curve_appends_dot_at_last_join() {
        // After the slide the cursor is 1, so the stroke-end rule still applies.
        let mut smoother = CurveSmoother::new();
        let emitted = feed(
            &mut smoother,
            &[(0.0, 0.0), (10.0, 0.0), (20.0, 10.0), (30.0, 30.0), (40.0, 20.0)],
        );
        let dot = smoother.finish();
        assert_eq!(
            dot,
            Some(Segment::Line { from: vec2(29.0, 15.0), to: vec2(31.0, 15.0) })
        );
        assert_eq!(emitted[0].end(), vec2(30.0, 15.0));
    }

    #[test]
    fn identical_samples_still_emit_curve_once_window_fills() {
        let mut smoother = CurveSmoother::new();
        let emitted = feed(&mut smoother, &[(5.0, 5.0); 5]);
        assert_eq!(
            emitted,
            vec![Segment::Curve {
                start: vec2(5.0, 5.0),
                end: vec2(5.0, 5.0),
                control1: vec2(5.0, 5.0),
                control2: vec2(5.0, 5.0),
            }]
        );
    }
}
