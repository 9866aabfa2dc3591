//! Procedural looping animations rendered to indexed-color GIFs.
//!
//! A [`ShapePattern`] answers, for any animation step and pixel, which palette color covers it.
//! Patterns are built from primitive [`Shape`]s placed along precomputed [`Orbit`]s, stacked with
//! [`Composite`], rasterized step by step with [`render_step`] / [`assemble`], and written out
//! with [`write_gif`].
//!
//! ```no_run
//! use gyre::{GifEncodeConfig, Palette, RenderSettings, RenderThreading, SceneConfig, Variant};
//!
//! let cfg = SceneConfig::default();
//! let pattern = Variant::Heptagram.build(&cfg)?;
//! let (seq, _stats) = gyre::assemble(
//!     cfg.canvas,
//!     pattern.as_ref(),
//!     &RenderSettings::default(),
//!     &RenderThreading::default(),
//!     4,
//! )?;
//! gyre::write_gif(&seq, &Palette::standard(), &GifEncodeConfig::new("heptagram.gif"))?;
//! # Ok::<(), gyre::GyreError>(())
//! ```
#![forbid(unsafe_code)]

mod encode;
mod foundation;
mod motion;
mod pattern;
mod render;
mod scenes;
mod shape;

pub use encode::gif::{GifEncodeConfig, write_frame_png, write_gif};
pub use foundation::core::{Canvas, Point, Rect, Vec2};
pub use foundation::error::{GyreError, GyreResult};
pub use foundation::palette::{ColorIndex, Palette};
pub use motion::orbit::{
    Orbit, PolygonOrbit, SegmentPolicy, circle_orbit, heptagram_orbit, point_on_circle,
    square_orbit,
};
pub use pattern::composite::Composite;
pub use pattern::stepped::{HitOrder, Pattern, ShapePattern};
pub use render::raster::{IndexedFrame, RenderSettings, render_step};
pub use render::sequence::{FrameSequence, RenderStats, RenderThreading, assemble};
pub use scenes::{SceneConfig, SceneSummary, Variant, describe};
pub use shape::lines::{LinePoints, VERTICAL_SLOPE_LIMIT, between_lines, slope};
pub use shape::primitives::{Circle, Cross, EqualArmedCross, LineSegment, Shape};
