use std::f64::consts::{FRAC_PI_4, TAU};

use crate::foundation::core::{Point, ensure_finite_point, ensure_non_negative};
use crate::foundation::error::{GyreError, GyreResult};

/// Slack allowed when checking that a segment length is integral.
const SEGMENT_EPS: f64 = 1e-9;

/// A cyclic sequence of anchor positions, one per animation step.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Orbit {
    points: Vec<Point>,
}

impl Orbit {
    /// Wrap an explicit point table; it must not be empty.
    pub fn from_points(points: Vec<Point>) -> GyreResult<Self> {
        if points.is_empty() {
            return Err(GyreError::validation("orbit must contain at least one point"));
        }
        Ok(Self { points })
    }

    /// Period in steps.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for orbits built through the constructors.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Every position, in step order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Position at `step`.
    ///
    /// Panics when `step` is outside `[0, len)`.
    pub fn at(&self, step: usize) -> Point {
        assert!(
            step < self.points.len(),
            "orbit step {step} out of range (len {})",
            self.points.len()
        );
        self.points[step]
    }

    /// Position at `step` modulo the period.
    pub fn at_wrapped(&self, step: usize) -> Point {
        self.points[step % self.points.len()]
    }

    /// Cyclic left rotation: `rotated[i] == self[(i + phase) % len]`.
    pub fn rotated(&self, phase: usize) -> Self {
        let mut points = self.points.clone();
        let len = points.len();
        points.rotate_left(phase % len);
        Self { points }
    }
}

/// How polygon orbits split the step count into per-edge segments when it does not divide evenly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SegmentPolicy {
    /// Floor the segment length. Leftover steps run into an extra, partial segment, so the last
    /// few steps of the period drift slightly ahead of the first vertex.
    #[default]
    Truncate,
    /// Reject step counts that are not a multiple of `vertices * speed`.
    Exact,
}

/// Anchor position on a circle, measured so that angle 0 sits at the top and angles grow
/// toward the left (counter-clockwise on screen).
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x - radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

/// Orbit around a circle: step `i` sits at angle `2π·speed·i/total_steps`.
///
/// `speed` must be a non-zero whole number of revolutions per period (negative runs the other
/// way), otherwise the sequence would not close on itself.
pub fn circle_orbit(
    center: Point,
    radius: f64,
    speed: f64,
    phase: usize,
    total_steps: usize,
) -> GyreResult<Orbit> {
    ensure_finite_point("orbit center", center)?;
    ensure_non_negative("orbit radius", radius)?;
    if total_steps == 0 {
        return Err(GyreError::validation("total_steps must be > 0"));
    }
    if !speed.is_finite() || speed == 0.0 || speed.fract() != 0.0 {
        return Err(GyreError::validation(format!(
            "circle orbit speed must be a non-zero integer, got {speed}"
        )));
    }

    let n = total_steps as f64;
    let points = (0..total_steps)
        .map(|i| point_on_circle(center, radius, TAU * speed * (i as f64) / n))
        .collect();
    Ok(Orbit { points }.rotated(phase))
}

/// Orbit that walks the edges of a regular (or star) polygon.
///
/// Vertices are spread evenly on a circle; they are visited in the order
/// `0, stride, 2·stride, …` (mod `vertices`), so `stride > 1` traces star polygons such as the
/// `{7/3}` heptagram.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PolygonOrbit {
    pub center: Point,
    pub radius: f64,
    pub vertices: usize,
    pub stride: usize,
    /// Laps of the polygon per period.
    pub speed: f64,
    /// Angle of vertex 0.
    pub start_angle: f64,
    pub policy: SegmentPolicy,
}

impl PolygonOrbit {
    /// Speed 1, vertex 0 at the top, truncating segment policy.
    pub fn new(center: Point, radius: f64, vertices: usize, stride: usize) -> Self {
        Self {
            center,
            radius,
            vertices,
            stride,
            speed: 1.0,
            start_angle: 0.0,
            policy: SegmentPolicy::default(),
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.start_angle = start_angle;
        self
    }

    pub fn with_policy(mut self, policy: SegmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn vertex_points(&self) -> Vec<Point> {
        let n = self.vertices as f64;
        (0..self.vertices)
            .map(|k| {
                point_on_circle(
                    self.center,
                    self.radius,
                    self.start_angle + TAU * (k as f64) / n,
                )
            })
            .collect()
    }

    /// Steps spent travelling one edge.
    pub fn segment_len(&self, total_steps: usize) -> GyreResult<usize> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(GyreError::validation(format!(
                "polygon orbit speed must be > 0, got {}",
                self.speed
            )));
        }
        let raw = total_steps as f64 / self.vertices as f64 / self.speed;
        let len = match self.policy {
            SegmentPolicy::Truncate => raw.floor(),
            SegmentPolicy::Exact => {
                if (raw - raw.round()).abs() > SEGMENT_EPS {
                    return Err(GyreError::validation(format!(
                        "{total_steps} steps do not split into {} vertices at speed {} \
                         (segment length {raw:.3})",
                        self.vertices, self.speed
                    )));
                }
                raw.round()
            }
        };
        if len < 1.0 {
            return Err(GyreError::validation(format!(
                "{total_steps} steps are too few for {} vertices at speed {}",
                self.vertices, self.speed
            )));
        }
        Ok(len as usize)
    }

    pub fn validate(&self, total_steps: usize) -> GyreResult<usize> {
        ensure_finite_point("orbit center", self.center)?;
        ensure_non_negative("orbit radius", self.radius)?;
        if !self.start_angle.is_finite() {
            return Err(GyreError::geometry("polygon start angle must be finite"));
        }
        if total_steps == 0 {
            return Err(GyreError::validation("total_steps must be > 0"));
        }
        if self.vertices < 3 {
            return Err(GyreError::validation(format!(
                "polygon orbit needs at least 3 vertices, got {}",
                self.vertices
            )));
        }
        if self.stride == 0 || gcd(self.stride, self.vertices) != 1 {
            return Err(GyreError::validation(format!(
                "stride {} does not visit every one of {} vertices",
                self.stride, self.vertices
            )));
        }
        self.segment_len(total_steps)
    }

    pub fn generate(&self, total_steps: usize, phase: usize) -> GyreResult<Orbit> {
        let seg_len = self.validate(total_steps)?;
        let verts = self.vertex_points();
        let n = verts.len();

        let mut points = Vec::with_capacity(total_steps);
        for i in 0..total_steps {
            let seg = i / seg_len;
            let from = verts[(seg * self.stride) % n];
            let to = verts[((seg + 1) * self.stride) % n];
            let t = (i % seg_len) as f64 / seg_len as f64;
            points.push(from.lerp(to, t));
        }
        Ok(Orbit { points }.rotated(phase))
    }
}

/// Axis-aligned square inscribed in the circle of `radius`, walked clockwise on screen from the
/// top-left corner.
pub fn square_orbit(
    center: Point,
    radius: f64,
    speed: f64,
    phase: usize,
    total_steps: usize,
) -> GyreResult<Orbit> {
    PolygonOrbit::new(center, radius, 4, 3)
        .with_speed(speed)
        .with_start_angle(FRAC_PI_4)
        .generate(total_steps, phase)
}

/// `{7/3}` star polygon.
pub fn heptagram_orbit(
    center: Point,
    radius: f64,
    speed: f64,
    phase: usize,
    total_steps: usize,
) -> GyreResult<Orbit> {
    PolygonOrbit::new(center, radius, 7, 3)
        .with_speed(speed)
        .generate(total_steps, phase)
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
#[path = "../../tests/unit/motion/orbit.rs"]
mod tests;
