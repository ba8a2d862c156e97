//! Stroke buffering and incremental midpoint smoothing.
//!
//! Each appended point yields at most one [`InkSegment`] to render, so the cost per input event is
//! constant regardless of stroke length. Consecutive quadratic segments share their endpoints
//! (the midpoints between raw samples), which keeps the rendered ink free of sampling corners.

use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect};
use crate::foundation::math::midpoint;

/// Curve flattening tolerance for dot outlines, in device pixels.
const DOT_TOLERANCE: f64 = 0.05;

/// A single recorded input sample in surface-local logical coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokePoint {
    /// Horizontal position in logical pixels.
    pub x: f64,
    /// Vertical position in logical pixels.
    pub y: f64,
    /// Event timestamp in milliseconds.
    pub t: f64,
}

impl StrokePoint {
    /// Create a point.
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    /// Position without the timestamp.
    pub fn pos(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A piece of ink produced by one input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InkSegment {
    /// Straight stroked segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// Quadratic stroked segment.
    Quad {
        /// Start point.
        from: Point,
        /// Control point.
        ctrl: Point,
        /// End point.
        to: Point,
    },
    /// Filled disc marking a tap.
    Dot {
        /// Disc center.
        center: Point,
    },
}

impl InkSegment {
    /// Scale every coordinate by `k` (logical to device pixels).
    pub fn scaled(self, k: f64) -> Self {
        let s = |p: Point| Point::new(p.x * k, p.y * k);
        match self {
            Self::Line { from, to } => Self::Line {
                from: s(from),
                to: s(to),
            },
            Self::Quad { from, ctrl, to } => Self::Quad {
                from: s(from),
                ctrl: s(ctrl),
                to: s(to),
            },
            Self::Dot { center } => Self::Dot { center: s(center) },
        }
    }

    /// Whether the segment is filled rather than stroked.
    pub fn is_fill(&self) -> bool {
        matches!(self, Self::Dot { .. })
    }

    /// Path geometry. Dots become a closed circle of `dot_radius`.
    pub fn to_path(&self, dot_radius: f64) -> BezPath {
        match *self {
            Self::Line { from, to } => {
                let mut p = BezPath::new();
                p.move_to(from);
                p.line_to(to);
                p
            }
            Self::Quad { from, ctrl, to } => {
                let mut p = BezPath::new();
                p.move_to(from);
                p.quad_to(ctrl, to);
                p
            }
            Self::Dot { center } => kurbo::Circle::new(center, dot_radius).to_path(DOT_TOLERANCE),
        }
    }

    /// Bounding box of the control hull, which contains the curve.
    pub fn hull_bounds(&self) -> Rect {
        match *self {
            Self::Line { from, to } => Rect::from_points(from, to),
            Self::Quad { from, ctrl, to } => Rect::from_points(from, to).union_pt(ctrl),
            Self::Dot { center } => Rect::from_points(center, center),
        }
    }
}

/// Points of the stroke currently being drawn.
#[derive(Clone, Debug, Default)]
pub struct Stroke {
    points: Vec<StrokePoint>,
}

impl Stroke {
    /// Start a stroke at its first point.
    pub fn begin(first: StrokePoint) -> Self {
        Self {
            points: vec![first],
        }
    }

    /// Buffered points in input order.
    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    /// Append a point and return the segment to render for it.
    ///
    /// Below three points this is the straight segment between the last two points; from three
    /// points on it is the quadratic from `mid(p[n-2], p[n-1])` to `mid(p[n-1], p[n])` with
    /// `p[n-1]` as control.
    pub fn push(&mut self, p: StrokePoint) -> Option<InkSegment> {
        self.points.push(p);
        let n = self.points.len();
        match n {
            0 | 1 => None,
            2 => Some(InkSegment::Line {
                from: self.points[0].pos(),
                to: self.points[1].pos(),
            }),
            _ => {
                let a = self.points[n - 3].pos();
                let b = self.points[n - 2].pos();
                let c = self.points[n - 1].pos();
                Some(InkSegment::Quad {
                    from: midpoint(a, b),
                    ctrl: b,
                    to: midpoint(b, c),
                })
            }
        }
    }

    /// Segment that completes the stroke on release.
    ///
    /// A stroke that never left its first point becomes a dot. Smoothed strokes stop at the last midpoint, so the
    /// remaining half segment up to the release point is returned as a line.
    pub fn finish(&self) -> Option<InkSegment> {
        let last = self.points.last()?.pos();
        // Zero-delta moves on a tap stroke to nothing; the stroke still leaves a mark.
        if self.points.iter().all(|p| p.pos() == last) {
            return Some(InkSegment::Dot { center: last });
        }
        match self.points.as_slice() {
            [.., a, b] if self.points.len() >= 3 => Some(InkSegment::Line {
                from: midpoint(a.pos(), b.pos()),
                to: b.pos(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/stroke.rs"]
mod tests;
