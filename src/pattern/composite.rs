use std::fmt;

use crate::foundation::error::{GyreError, GyreResult};
use crate::foundation::palette::ColorIndex;
use crate::pattern::stepped::ShapePattern;

/// Ordered stack of patterns; later children paint over earlier ones.
pub struct Composite {
    children: Vec<Box<dyn ShapePattern>>,
    step_count: usize,
}

impl Composite {
    /// Stack `children` bottom to top; all must share one step count.
    pub fn new(children: Vec<Box<dyn ShapePattern>>) -> GyreResult<Self> {
        let Some(first) = children.first() else {
            return Err(GyreError::validation("composite needs at least one child"));
        };
        let step_count = first.step_count();
        if let Some((idx, bad)) = children
            .iter()
            .enumerate()
            .find(|(_, c)| c.step_count() != step_count)
        {
            return Err(GyreError::validation(format!(
                "composite child {idx} has {} steps, expected {step_count}",
                bad.step_count()
            )));
        }
        Ok(Self {
            children,
            step_count,
        })
    }

    /// Add a layer on top.
    pub fn layer(mut self, child: impl ShapePattern + 'static) -> GyreResult<Self> {
        if child.step_count() != self.step_count {
            return Err(GyreError::validation(format!(
                "composite layer has {} steps, expected {}",
                child.step_count(),
                self.step_count
            )));
        }
        self.children.push(Box::new(child));
        Ok(self)
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl ShapePattern for Composite {
    fn step_count(&self) -> usize {
        self.step_count
    }

    fn evaluate(&self, step: usize, x: f64, y: f64) -> Option<ColorIndex> {
        assert!(
            step < self.step_count,
            "composite step {step} out of range (step count {})",
            self.step_count
        );
        // Painting every child in order and keeping the last hit is the same as taking the
        // first hit from the top.
        self.children
            .iter()
            .rev()
            .find_map(|c| c.evaluate(step, x, y))
    }

    fn shape_count(&self, step: usize) -> usize {
        self.children.iter().map(|c| c.shape_count(step)).sum()
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("children", &self.children.len())
            .field("step_count", &self.step_count)
            .finish()
    }
}
