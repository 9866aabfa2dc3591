use std::collections::HashSet;

use rayon::prelude::*;

use crate::foundation::core::Canvas;
use crate::foundation::error::{GyreError, GyreResult};
use crate::foundation::palette::Palette;
use crate::pattern::stepped::ShapePattern;
use crate::render::raster::{IndexedFrame, RenderSettings, render_step};

#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Render steps concurrently on a rayon pool.
    pub parallel: bool,
    /// Pool size; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    pub frames_total: u64,
    /// Number of distinct frames.
    pub frames_unique: u64,
}

/// Complete animation payload handed to the encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSequence {
    pub canvas: Canvas,
    /// In step order.
    pub frames: Vec<IndexedFrame>,
    /// Per-frame display delay in centiseconds; 0 means "as fast as the viewer goes".
    pub delays_cs: Vec<u16>,
}

impl FrameSequence {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Check frame sizes, delay count and that every index is in `palette`.
    pub fn validate(&self, palette: &Palette) -> GyreResult<()> {
        if self.frames.is_empty() {
            return Err(GyreError::validation("frame sequence is empty"));
        }
        if self.frames.len() != self.delays_cs.len() {
            return Err(GyreError::validation(format!(
                "{} frames but {} delays",
                self.frames.len(),
                self.delays_cs.len()
            )));
        }
        for (step, frame) in self.frames.iter().enumerate() {
            if frame.width != self.canvas.width || frame.height != self.canvas.height {
                return Err(GyreError::validation(format!(
                    "frame {step} is {}x{}, expected {}x{}",
                    frame.width, frame.height, self.canvas.width, self.canvas.height
                )));
            }
            if frame.indices.len() != self.canvas.pixel_count() {
                return Err(GyreError::validation(format!(
                    "frame {step} has {} pixels, expected {}",
                    frame.indices.len(),
                    self.canvas.pixel_count()
                )));
            }
            if let Some(bad) = frame.indices.iter().find(|&&c| !palette.contains(c)) {
                return Err(GyreError::validation(format!(
                    "frame {step} uses color index {} outside the palette",
                    bad.0
                )));
            }
        }
        Ok(())
    }
}

/// Render every step of `pattern` and collect the frames in step order.
#[tracing::instrument(skip(pattern, settings), fields(steps = pattern.step_count()))]
pub fn assemble(
    canvas: Canvas,
    pattern: &dyn ShapePattern,
    settings: &RenderSettings,
    threading: &RenderThreading,
    delay_cs: u16,
) -> GyreResult<(FrameSequence, RenderStats)> {
    canvas.validate()?;
    let steps = pattern.step_count();
    if steps == 0 {
        return Err(GyreError::validation("pattern has no steps to render"));
    }

    let render_one = |step: usize| -> GyreResult<IndexedFrame> {
        let frame = render_step(canvas, step, pattern, settings)?;
        tracing::debug!(step, "rendered step");
        Ok(frame)
    };

    let frames = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            (0..steps)
                .into_par_iter()
                .map(render_one)
                .collect::<GyreResult<Vec<_>>>()
        })?
    } else {
        (0..steps).map(render_one).collect::<GyreResult<Vec<_>>>()?
    };

    let unique = frames.iter().collect::<HashSet<_>>().len();
    let stats = RenderStats {
        frames_total: frames.len() as u64,
        frames_unique: unique as u64,
    };

    Ok((
        FrameSequence {
            canvas,
            delays_cs: vec![delay_cs; frames.len()],
            frames,
        },
        stats,
    ))
}

fn build_thread_pool(threads: Option<usize>) -> GyreResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(GyreError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GyreError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/sequence.rs"]
mod tests;
