use glam::Vec2;

use crate::types::Point;

/// Axis-aligned rectangle, inclusive on both corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_point(point: Point) -> Self {
        Self::new(point, point)
    }

    pub fn containing(mut points: impl Iterator<Item = Point>) -> Option<Self> {
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |b, p| b.expanded_to_contain(p)))
    }

    pub fn expanded_to_contain(self, point: Point) -> Self {
        Self::new(self.min.min(point), self.max.max(point))
    }

    pub fn union(self, other: Rect) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Grow outward by `pad` on every side.
    pub fn inflated(self, pad: f32) -> Self {
        Self::new(self.min - Vec2::splat(pad), self.max + Vec2::splat(pad))
    }

    pub fn scaled(self, scale: f32) -> Self {
        Self::new(self.min * scale, self.max * scale)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x && point.y >= self.min.y && point.x <= self.max.x && point.y <= self.max.y
    }
}

/// One atomic piece of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line { from: Point, to: Point },
    Curve { start: Point, end: Point, control1: Point, control2: Point },
}

impl Segment {
    pub fn start(&self) -> Point {
        match *self {
            Segment::Line { from, .. } => from,
            Segment::Curve { start, .. } => start,
        }
    }

    pub fn end(&self) -> Point {
        match *self {
            Segment::Line { to, .. } => to,
            Segment::Curve { end, .. } => end,
        }
    }

    /// Endpoints plus control points. The curve always lies inside their convex hull.
    pub fn hull_points(&self) -> impl Iterator<Item = Point> {
        let points = match *self {
            Segment::Line { from, to } => [from, to, to, to],
            Segment::Curve { start, end, control1, control2 } => [start, control1, control2, end],
        };
        points.into_iter()
    }

    pub fn bounds(&self) -> Rect {
        Rect::containing(self.hull_points()).unwrap_or_else(|| Rect::from_point(self.start()))
    }

    /// Point at parameter `t` in [0,1].
    pub fn evaluate(&self, t: f32) -> Point {
        match *self {
            Segment::Line { from, to } => from.lerp(to, t),
            Segment::Curve { start, end, control1, control2 } => {
                let q0 = start.lerp(control1, t);
                let q1 = control1.lerp(control2, t);
                let q2 = control2.lerp(end, t);
                q0.lerp(q1, t).lerp(q1.lerp(q2, t), t)
            }
        }
    }
}

/// The accumulated signature: ordered segments plus their tight bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
    bounds: Option<Rect>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut path = Self::new();
        for segment in segments {
            path.append(segment);
        }
        path
    }

    pub fn append(&mut self, segment: Segment) {
        let segment_bounds = segment.bounds();
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.union(segment_bounds),
            None => segment_bounds,
        });
        self.segments.push(segment);
    }

    pub fn append_line(&mut self, from: Point, to: Point) {
        self.append(Segment::Line { from, to });
    }

    pub fn append_curve(&mut self, start: Point, end: Point, control1: Point, control2: Point) {
        self.append(Segment::Curve { start, end, control1, control2 });
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.bounds = None;
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// `None` while the path has no segments.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}
