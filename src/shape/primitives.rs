use crate::foundation::core::{
    Point, Rect, Vec2, ensure_finite_point, ensure_non_negative, rect_contains_inclusive,
};
use crate::foundation::error::{GyreError, GyreResult};
use crate::foundation::palette::ColorIndex;
use crate::shape::lines::{LinePoints, between_lines, slope};

/// Filled disc.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub color: ColorIndex,
}

impl Circle {
    /// Black disc.
    pub fn new(center: Point, radius: f64) -> GyreResult<Self> {
        ensure_finite_point("circle center", center)?;
        ensure_non_negative("circle radius", radius)?;
        Ok(Self {
            center,
            radius,
            color: ColorIndex::BLACK,
        })
    }

    pub fn with_color(mut self, color: ColorIndex) -> Self {
        self.color = color;
        self
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<ColorIndex> {
        let d = Point::new(x, y).distance(self.center);
        (d <= self.radius).then_some(self.color)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (2.0 * self.radius, 2.0 * self.radius))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
enum LineForm {
    Vertical { x: f64 },
    Sloped { slope: f64, intercept: f64, norm: f64 },
}

/// One-pixel-wide segment between two points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
    pub color: ColorIndex,
    #[serde(skip)]
    bounds: Rect,
    #[serde(skip)]
    form: LineForm,
}

impl LineSegment {
    /// Distance from the line below which a point counts as covered.
    pub const HALF_WIDTH: f64 = 1.0;

    pub fn new(start: Point, end: Point, color: ColorIndex) -> GyreResult<Self> {
        ensure_finite_point("line start", start)?;
        ensure_finite_point("line end", end)?;

        let form = match slope(start, end) {
            Some(m) => LineForm::Sloped {
                slope: m,
                intercept: start.y - m * start.x,
                norm: m.hypot(1.0),
            },
            None => LineForm::Vertical { x: start.x },
        };

        Ok(Self {
            start,
            end,
            color,
            bounds: Rect::from_points(start, end),
            form,
        })
    }

    /// Perpendicular distance from `(x, y)` to the infinite line through the endpoints.
    pub fn distance_to_line(&self, x: f64, y: f64) -> f64 {
        match self.form {
            LineForm::Vertical { x: lx } => (x - lx).abs(),
            LineForm::Sloped {
                slope,
                intercept,
                norm,
            } => (slope * x - y + intercept).abs() / norm,
        }
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<ColorIndex> {
        if !rect_contains_inclusive(self.bounds, x, y) {
            return None;
        }
        (self.distance_to_line(x, y) < Self::HALF_WIDTH).then_some(self.color)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Axis-aligned plus sign: a horizontal and a vertical bar sharing a center.
///
/// Bar edges are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Cross {
    pub center: Point,
    pub half_width: f64,
    pub half_height: f64,
    pub half_thickness: f64,
    pub color: ColorIndex,
}

impl Cross {
    pub fn new(
        center: Point,
        half_width: f64,
        half_height: f64,
        half_thickness: f64,
        color: ColorIndex,
    ) -> GyreResult<Self> {
        ensure_finite_point("cross center", center)?;
        ensure_non_negative("cross half width", half_width)?;
        ensure_non_negative("cross half height", half_height)?;
        ensure_non_negative("cross half thickness", half_thickness)?;
        Ok(Self {
            center,
            half_width,
            half_height,
            half_thickness,
            color,
        })
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<ColorIndex> {
        let dx = (x - self.center.x).abs();
        let dy = (y - self.center.y).abs();
        let horizontal = dx < self.half_width && dy < self.half_thickness;
        let vertical = dy < self.half_height && dx < self.half_thickness;
        (horizontal || vertical).then_some(self.color)
    }

    pub fn bounds(&self) -> Rect {
        let w = self.half_width.max(self.half_thickness);
        let h = self.half_height.max(self.half_thickness);
        Rect::from_center_size(self.center, (2.0 * w, 2.0 * h))
    }
}

/// Pair of parallel lines bounding a strip.
type Band = (LinePoints, LinePoints);

/// Two equal bands crossing at right angles, rotated about their shared center.
///
/// All rotated geometry is computed once at construction; [`EqualArmedCross::hit_test`] only
/// runs strip tests, and only for points inside the square `center ± radius`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EqualArmedCross {
    pub center: Point,
    /// Distance from the center to the end of each arm.
    pub arm: f64,
    pub half_thickness: f64,
    /// Radians, clockwise on screen.
    pub rotation: f64,
    pub color: ColorIndex,
    #[serde(skip)]
    bounds: Rect,
    /// Corners of the band along the rotation direction, then of the band across it.
    #[serde(skip)]
    corners: [Point; 8],
    #[serde(skip)]
    bands: [Band; 4],
}

impl EqualArmedCross {
    pub fn new(
        center: Point,
        arm: f64,
        half_thickness: f64,
        rotation: f64,
        color: ColorIndex,
    ) -> GyreResult<Self> {
        ensure_finite_point("cross center", center)?;
        ensure_non_negative("cross arm", arm)?;
        ensure_non_negative("cross half thickness", half_thickness)?;
        if !rotation.is_finite() {
            return Err(GyreError::geometry(format!(
                "cross rotation must be finite, got {rotation}"
            )));
        }

        let along = Vec2::from_angle(rotation);
        let across = along.turn_90();
        let (l, t) = (along * arm, across * half_thickness);
        let (l2, t2) = (across * arm, along * half_thickness);

        let corners = [
            center - l - t,
            center + l - t,
            center + l + t,
            center - l + t,
            center - t2 - l2,
            center - t2 + l2,
            center + t2 + l2,
            center + t2 - l2,
        ];
        let [a0, a1, a2, a3, b0, b1, b2, b3] = corners;

        // 1: thin strip along `along`, 4: its length limits.
        // 3: thin strip along `across`, 2: its length limits.
        let bands = [
            ((a0, a1), (a3, a2)),
            ((b0, b3), (b1, b2)),
            ((b0, b1), (b3, b2)),
            ((a1, a2), (a0, a3)),
        ];

        let radius = arm.hypot(half_thickness);
        Ok(Self {
            center,
            arm,
            half_thickness,
            rotation,
            color,
            bounds: Rect::from_center_size(center, (2.0 * radius, 2.0 * radius)),
            corners,
            bands,
        })
    }

    pub fn corners(&self) -> &[Point; 8] {
        &self.corners
    }

    /// Half the side of the bounding square.
    pub fn radius(&self) -> f64 {
        self.bounds.width() / 2.0
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<ColorIndex> {
        if !rect_contains_inclusive(self.bounds, x, y) {
            return None;
        }
        let p = Point::new(x, y);
        let [b1, b2, b3, b4] = &self.bands;
        let inside = |b: &Band| between_lines(b.0, b.1, p);
        let covered = (inside(b1) && inside(b4)) || (inside(b2) && inside(b3));
        covered.then_some(self.color)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Any primitive a pattern can place on a step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle(Circle),
    Line(LineSegment),
    Cross(Cross),
    EqualArmedCross(EqualArmedCross),
}

impl Shape {
    #[inline]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<ColorIndex> {
        match self {
            Self::Circle(s) => s.hit_test(x, y),
            Self::Line(s) => s.hit_test(x, y),
            Self::Cross(s) => s.hit_test(x, y),
            Self::EqualArmedCross(s) => s.hit_test(x, y),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Self::Circle(s) => s.bounds(),
            Self::Line(s) => s.bounds(),
            Self::Cross(s) => s.bounds(),
            Self::EqualArmedCross(s) => s.bounds(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Circle(_) => "circle",
            Self::Line(_) => "line",
            Self::Cross(_) => "cross",
            Self::EqualArmedCross(_) => "equal_armed_cross",
        }
    }
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Self::Circle(s)
    }
}

impl From<LineSegment> for Shape {
    fn from(s: LineSegment) -> Self {
        Self::Line(s)
    }
}

impl From<Cross> for Shape {
    fn from(s: Cross) -> Self {
        Self::Cross(s)
    }
}

impl From<EqualArmedCross> for Shape {
    fn from(s: EqualArmedCross) -> Self {
        Self::EqualArmedCross(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/primitives.rs"]
mod tests;
