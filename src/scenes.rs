//! Compiled-in animations.
//!
//! Every variant renders on the same [`SceneConfig`]; parameters below are fixed by design and
//! are not meant to be tuned at runtime.

use std::f64::consts::FRAC_PI_2;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{GyreError, GyreResult};
use crate::foundation::palette::ColorIndex;
use crate::motion::orbit::{circle_orbit, heptagram_orbit, square_orbit};
use crate::pattern::composite::Composite;
use crate::pattern::stepped::{HitOrder, Pattern, ShapePattern};
use crate::shape::primitives::{Circle, Cross, EqualArmedCross, LineSegment, Shape};

/// Radius of the dots riding on orbits.
pub const DOT_RADIUS: f64 = 3.0;
/// Radius of the circle and square orbits.
pub const SMALL_ORBIT_RADIUS: f64 = 50.0;
/// Radius of the heptagram orbits.
pub const HEPTAGRAM_RADIUS: f64 = 100.0;
/// Number of dots chasing each other around the heptagram.
pub const HEPTAGRAM_ORBITS: usize = 12;
/// Lattice pitch of the rotating crosses.
pub const CROSS_CELL: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    pub canvas: Canvas,
    pub total_steps: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 240,
                height: 240,
            },
            total_steps: 120,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> GyreResult<()> {
        self.canvas.validate()?;
        if self.total_steps == 0 {
            return Err(GyreError::validation("total_steps must be > 0"));
        }
        Ok(())
    }

    pub fn center(&self) -> Point {
        self.canvas.center()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Circle,
    Squares,
    Heptagram,
    Overlay,
    Cross,
    Crosses,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Circle,
        Variant::Squares,
        Variant::Heptagram,
        Variant::Overlay,
        Variant::Cross,
        Variant::Crosses,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Squares => "squares",
            Self::Heptagram => "heptagram",
            Self::Overlay => "overlay",
            Self::Cross => "cross",
            Self::Crosses => "crosses",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Circle => "one dot orbiting the center",
            Self::Squares => "four dots chasing each other around a square",
            Self::Heptagram => "twelve dots on a {7/3} star, joined by blue and green chords",
            Self::Overlay => "the square dots with a red orbiting dot painted on top",
            Self::Cross => "a single static plus sign",
            Self::Crosses => "two interlocking lattices of crosses turning in opposite directions",
        }
    }

    pub fn build(self, cfg: &SceneConfig) -> GyreResult<Box<dyn ShapePattern>> {
        cfg.validate()?;
        Ok(match self {
            Self::Circle => boxed(rotating_circle(cfg, ColorIndex::BLACK)?),
            Self::Squares => boxed(rotating_squares(cfg)?),
            Self::Heptagram => boxed(rotating_heptagram(cfg)?),
            Self::Overlay => boxed(overlay(cfg)?),
            Self::Cross => boxed(single_cross(cfg)?),
            Self::Crosses => boxed(rotating_crosses(cfg)?),
        })
    }
}

fn boxed(pattern: impl ShapePattern + 'static) -> Box<dyn ShapePattern> {
    Box::new(pattern)
}

/// Shape-count overview of a built variant.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SceneSummary {
    pub variant: Variant,
    pub summary: &'static str,
    pub canvas: Canvas,
    pub total_steps: usize,
    pub min_shapes_per_step: usize,
    pub max_shapes_per_step: usize,
}

pub fn describe(variant: Variant, cfg: &SceneConfig) -> GyreResult<SceneSummary> {
    let pattern = variant.build(cfg)?;
    let counts: Vec<usize> = (0..pattern.step_count())
        .map(|s| pattern.shape_count(s))
        .collect();
    Ok(SceneSummary {
        variant,
        summary: variant.summary(),
        canvas: cfg.canvas,
        total_steps: pattern.step_count(),
        min_shapes_per_step: counts.iter().copied().min().unwrap_or(0),
        max_shapes_per_step: counts.iter().copied().max().unwrap_or(0),
    })
}

pub fn rotating_circle(cfg: &SceneConfig, color: ColorIndex) -> GyreResult<Pattern> {
    let n = cfg.total_steps;
    let orbit = circle_orbit(cfg.center(), SMALL_ORBIT_RADIUS, 1.0, 0, n)?;
    Pattern::from_fn(n, |step| {
        Ok(vec![
            Circle::new(orbit.at(step), DOT_RADIUS)?
                .with_color(color)
                .into(),
        ])
    })
}

pub fn rotating_squares(cfg: &SceneConfig) -> GyreResult<Pattern> {
    let n = cfg.total_steps;
    let spacing = n / 4;
    let orbits = (0..4)
        .map(|i| square_orbit(cfg.center(), SMALL_ORBIT_RADIUS, 1.0, i * spacing, n))
        .collect::<GyreResult<Vec<_>>>()?;

    Pattern::from_fn(n, |step| {
        orbits
            .iter()
            .map(|o| -> GyreResult<Shape> { Ok(Circle::new(o.at(step), DOT_RADIUS)?.into()) })
            .collect()
    })
}

/// Dots are listed before chords and the first hit wins, so dots sit on top of the lines.
pub fn rotating_heptagram(cfg: &SceneConfig) -> GyreResult<Pattern> {
    let n = cfg.total_steps;
    let spacing = n / HEPTAGRAM_ORBITS;
    let orbits = (0..HEPTAGRAM_ORBITS)
        .map(|i| heptagram_orbit(cfg.center(), HEPTAGRAM_RADIUS, 1.0, i * spacing, n))
        .collect::<GyreResult<Vec<_>>>()?;

    let pattern = Pattern::from_fn(n, |step| {
        let mut shapes: Vec<Shape> = Vec::with_capacity(3 * HEPTAGRAM_ORBITS);
        for o in &orbits {
            shapes.push(Circle::new(o.at(step), DOT_RADIUS)?.into());
        }
        for (skip, color) in [(3, ColorIndex::BLUE), (4, ColorIndex::GREEN)] {
            for j in 0..HEPTAGRAM_ORBITS {
                let from = orbits[j].at(step);
                let to = orbits[(j + skip) % HEPTAGRAM_ORBITS].at(step);
                shapes.push(LineSegment::new(from, to, color)?.into());
            }
        }
        Ok(shapes)
    })?;
    Ok(pattern.with_order(HitOrder::FirstHit))
}

pub fn overlay(cfg: &SceneConfig) -> GyreResult<Composite> {
    Composite::new(vec![boxed(rotating_squares(cfg)?)])?
        .layer(rotating_circle(cfg, ColorIndex::RED)?)
}

pub fn single_cross(cfg: &SceneConfig) -> GyreResult<Pattern> {
    let cross = Cross::new(cfg.center(), 15.0, 15.0, 5.0, ColorIndex::BLACK)?;
    Pattern::from_fn(cfg.total_steps, |_| Ok(vec![cross.into()]))
}

/// Red crosses on a lattice turning clockwise, under blue crosses offset by half a cell turning
/// counter-clockwise. A cross is symmetric under a quarter turn, so one quarter turn per period
/// closes the loop.
pub fn rotating_crosses(cfg: &SceneConfig) -> GyreResult<Composite> {
    let red = cross_lattice(cfg, CROSS_CELL / 2.0, 1.0, ColorIndex::RED)?;
    let blue = cross_lattice(cfg, 0.0, -1.0, ColorIndex::BLUE)?;
    Composite::new(vec![boxed(red)])?.layer(blue)
}

fn cross_lattice(
    cfg: &SceneConfig,
    offset: f64,
    direction: f64,
    color: ColorIndex,
) -> GyreResult<Pattern> {
    let arm = CROSS_CELL * 0.43;
    let half_thickness = CROSS_CELL * 0.1;

    let cols = (f64::from(cfg.canvas.width) / CROSS_CELL).ceil() as usize;
    let rows = (f64::from(cfg.canvas.height) / CROSS_CELL).ceil() as usize;
    let mut centers = Vec::with_capacity((cols + 1) * (rows + 1));
    for j in 0..=rows {
        for i in 0..=cols {
            let c = Point::new(
                offset + i as f64 * CROSS_CELL,
                offset + j as f64 * CROSS_CELL,
            );
            if c.x - arm < f64::from(cfg.canvas.width)
                && c.y - arm < f64::from(cfg.canvas.height)
            {
                centers.push(c);
            }
        }
    }

    let n = cfg.total_steps as f64;
    Pattern::from_fn(cfg.total_steps, |step| {
        let rotation = direction * FRAC_PI_2 * step as f64 / n;
        centers
            .iter()
            .map(|&c| -> GyreResult<Shape> {
                Ok(EqualArmedCross::new(c, arm, half_thickness, rotation, color)?.into())
            })
            .collect()
    })
}

#[cfg(test)]
#[path = "../tests/unit/scenes.rs"]
mod tests;
