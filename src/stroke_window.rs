use crate::types::Point;

/// Samples needed for one cubic fit.
pub const STROKE_WINDOW_LEN: usize = 5;

/// The last five samples of the stroke in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeWindow {
    points: [Point; STROKE_WINDOW_LEN],
    cursor: usize,
}

impl Default for StrokeWindow {
    fn default() -> Self {
        Self { points: [Point::ZERO; STROKE_WINDOW_LEN], cursor: 0 }
    }
}

impl StrokeWindow {
    /// Start over with `first` in slot 0.
    pub fn reset(&mut self, first: Point) {
        self.cursor = 0;
        self.points[0] = first;
    }

    /// Store `point` in the next slot and return the new cursor.
    pub fn push(&mut self, point: Point) -> usize {
        debug_assert!(self.cursor < STROKE_WINDOW_LEN - 1, "window must slide before it overflows");
        self.cursor = (self.cursor + 1).min(STROKE_WINDOW_LEN - 1);
        self.points[self.cursor] = point;
        self.cursor
    }

    /// Carry slots 3 and 4 forward as the seed of the next fit.
    pub fn slide(&mut self) {
        self.points[0] = self.points[3];
        self.points[1] = self.points[4];
        self.cursor = 1;
    }

    pub fn is_full(&self) -> bool {
        self.cursor == STROKE_WINDOW_LEN - 1
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = 0;
    }

    pub fn get(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn set(&mut self, index: usize, point: Point) {
        self.points[index] = point;
    }
}
