use crate::foundation::error::{GyreError, GyreResult};

pub use kurbo::{Point, Rect, Vec2};

/// Pixel dimensions shared by every frame of one animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Build a validated canvas.
    pub fn new(width: u32, height: u32) -> GyreResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Reject zero-sized canvases.
    pub fn validate(self) -> GyreResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GyreError::validation("canvas width/height must be non-zero"));
        }
        Ok(())
    }

    /// `width * height`.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Pixel at the middle of the canvas.
    pub fn center(self) -> Point {
        // Integer halving keeps the center on a pixel for odd sizes too.
        Point::new(f64::from(self.width / 2), f64::from(self.height / 2))
    }
}

pub(crate) fn ensure_finite_point(what: &str, p: Point) -> GyreResult<()> {
    if !p.is_finite() {
        return Err(GyreError::geometry(format!("{what} must be finite, got {p:?}")));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(what: &str, v: f64) -> GyreResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(GyreError::geometry(format!(
            "{what} must be finite and >= 0, got {v}"
        )));
    }
    Ok(())
}

/// Inclusive containment; `kurbo::Rect::contains` is half-open.
pub(crate) fn rect_contains_inclusive(r: Rect, x: f64, y: f64) -> bool {
    x >= r.x0 && x <= r.x1 && y >= r.y0 && y <= r.y1
}
