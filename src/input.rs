use tracing::trace;

use crate::path::Path;
use crate::smoother::CurveSmoother;
use crate::types::Point;

/// Pointer events for the primary contact, in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    #[default]
    Idle,
    Stroking,
}

/// What an event did to the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// No stroke was active; nothing changed.
    Ignored,
    StrokeStarted,
    /// A sample was taken; `emitted` is true when a segment was appended.
    Sampled { emitted: bool },
    StrokeFinished,
}

#[derive(Debug, Clone, Default)]
pub struct InputController {
    state: InputState,
    smoother: CurveSmoother,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn handle(&mut self, event: PointerEvent, path: &mut Path) -> InputOutcome {
        match (self.state, event) {
            (_, PointerEvent::Down(point)) => {
                self.smoother.begin(point);
                self.state = InputState::Stroking;
                InputOutcome::StrokeStarted
            }
            (InputState::Stroking, PointerEvent::Move(point)) => {
                let segment = self.smoother.add_point(point);
                let emitted = segment.is_some();
                if let Some(segment) = segment {
                    path.append(segment);
                }
                InputOutcome::Sampled { emitted }
            }
            (InputState::Stroking, PointerEvent::Up) => {
                if let Some(dot) = self.smoother.finish() {
                    path.append(dot);
                }
                self.state = InputState::Idle;
                InputOutcome::StrokeFinished
            }
            (InputState::Idle, PointerEvent::Move(_) | PointerEvent::Up) => {
                trace!(?event, "pointer event without an active stroke");
                InputOutcome::Ignored
            }
        }
    }

    /// Abandon any stroke in progress without emitting geometry.
    pub fn reset(&mut self) {
        self.smoother = CurveSmoother::new();
        self.state = InputState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Segment;
    use glam::vec2;

    fn stroke(controller: &mut InputController, path: &mut Path, points: &[(f32, f32)]) {
        let (first, rest) = points.split_first().expect("at least one point");
        controller.handle(PointerEvent::Down(vec2(first.0, first.1)), path);
        for &(x, y) in rest {
            controller.handle(PointerEvent::Move(vec2(x, y)), path);
        }
        controller.handle(PointerEvent::Up, path);
    }

    #[test]
    fn down_up_commits_single_dot() {
        let mut controller = InputController::new();
        let mut path = Path::new();

        assert_eq!(
            controller.handle(PointerEvent::Down(vec2(10.0, 10.0)), &mut path),
            InputOutcome::StrokeStarted
        );
        assert_eq!(controller.state(), InputState::Stroking);
        assert_eq!(controller.handle(PointerEvent::Up, &mut path), InputOutcome::StrokeFinished);
        assert_eq!(controller.state(), InputState::Idle);

        assert_eq!(
            path.segments(),
            &[Segment::Line { from: vec2(9.0, 10.0), to: vec2(11.0, 10.0) }]
        );
    }

    #[test]
    fn move_and_up_without_down_are_ignored() {
        let mut controller = InputController::new();
        let mut path = Path::new();

        assert_eq!(
            controller.handle(PointerEvent::Move(vec2(3.0, 3.0)), &mut path),
            InputOutcome::Ignored
        );
        assert_eq!(controller.handle(PointerEvent::Up, &mut path), InputOutcome::Ignored);
        assert!(path.is_empty());
        assert_eq!(controller.state(), InputState::Idle);
    }

    #[test]
    fn moves_report_when_a_segment_is_emitted() {
        let mut controller = InputController::new();
        let mut path = Path::new();
        controller.handle(PointerEvent::Down(vec2(0.0, 0.0)), &mut path);

        let outcomes: Vec<_> = (1..=4)
            .map(|i| controller.handle(PointerEvent::Move(vec2(i as f32, 0.0)), &mut path))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                InputOutcome::Sampled { emitted: false },
                InputOutcome::Sampled { emitted: false },
                InputOutcome::Sampled { emitted: false },
                InputOutcome::Sampled { emitted: true },
            ]
        );
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn short_zero_length_stroke_becomes_dot() {
        let mut controller = InputController::new();
        let mut path = Path::new();
        stroke(&mut controller, &mut path, &[(5.0, 5.0); 4]);

        assert_eq!(
            path.segments(),
            &[Segment::Line { from: vec2(4.0, 5.0), to: vec2(6.0, 5.0) }]
        );
    }

    #[test]
    fn five_identical_samples_emit_curve_then_tail_dot() {
        let mut controller = InputController::new();
        let mut path = Path::new();
        stroke(&mut controller, &mut path, &[(5.0, 5.0); 5]);

        assert_eq!(path.len(), 2);
        assert!(matches!(path.segments()[0], Segment::Curve { .. }));
        assert!(matches!(path.segments()[1], Segment::Line { .. }));
    }

    #[test]
    fn second_down_restarts_the_stroke() {
        let mut controller = InputController::new();
        let mut path = Path::new();
        controller.handle(PointerEvent::Down(vec2(0.0, 0.0)), &mut path);
        controller.handle(PointerEvent::Move(vec2(1.0, 0.0)), &mut path);
        controller.handle(PointerEvent::Down(vec2(50.0, 50.0)), &mut path);
        controller.handle(PointerEvent::Up, &mut path);

        assert_eq!(
            path.segments(),
            &[Segment::Line { from: vec2(49.0, 50.0), to: vec2(51.0, 50.0) }]
        );
    }

    #[test]
    fn reset_abandons_the_active_stroke() {
        let mut controller = InputController::new();
        let mut path = Path::new();
        controller.handle(PointerEvent::Down(vec2(0.0, 0.0)), &mut path);
        controller.reset();

        assert_eq!(controller.state(), InputState::Idle);
        assert_eq!(controller.handle(PointerEvent::Up, &mut path), InputOutcome::Ignored);
        assert!(path.is_empty());
    }
}
