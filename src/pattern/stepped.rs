use crate::foundation::core::{Rect, rect_contains_inclusive};
use crate::foundation::error::{GyreError, GyreResult};
use crate::foundation::palette::ColorIndex;
use crate::shape::primitives::Shape;

/// Anything that can answer "which color covers `(x, y)` at `step`".
///
/// Implementations are pure and shared across rasterizer threads.
pub trait ShapePattern: Send + Sync {
    /// Period of the animation; valid steps are `0..step_count()`.
    fn step_count(&self) -> usize;

    /// Color covering `(x, y)` at `step`, or `None` for background.
    ///
    /// Panics when `step >= step_count()`.
    fn evaluate(&self, step: usize, x: f64, y: f64) -> Option<ColorIndex>;

    /// Primitive shapes active at `step`.
    fn shape_count(&self, step: usize) -> usize;
}

/// Which shape wins when several shapes in one step cover the same pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HitOrder {
    /// The first shape in the step's list.
    FirstHit,
    /// The last shape in the step's list, as if shapes were painted in order.
    #[default]
    Topmost,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
struct StepShapes {
    shapes: Vec<Shape>,
    #[serde(skip)]
    bounds: Option<Rect>,
}

impl StepShapes {
    fn new(shapes: Vec<Shape>) -> Self {
        let bounds = shapes.iter().map(Shape::bounds).reduce(|a, b| a.union(b));
        Self { shapes, bounds }
    }
}

/// One set of shapes per animation step.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Pattern {
    steps: Vec<StepShapes>,
    order: HitOrder,
}

impl Pattern {
    /// One shape list per step; at least one step is required.
    pub fn new(steps: Vec<Vec<Shape>>) -> GyreResult<Self> {
        if steps.is_empty() {
            return Err(GyreError::validation("pattern must have at least one step"));
        }
        Ok(Self {
            steps: steps.into_iter().map(StepShapes::new).collect(),
            order: HitOrder::default(),
        })
    }

    /// Build the shape set of every step in `0..total_steps` with `f`.
    pub fn from_fn<F>(total_steps: usize, mut f: F) -> GyreResult<Self>
    where
        F: FnMut(usize) -> GyreResult<Vec<Shape>>,
    {
        let steps = (0..total_steps).map(&mut f).collect::<GyreResult<Vec<_>>>()?;
        Self::new(steps)
    }

    pub fn with_order(mut self, order: HitOrder) -> Self {
        self.order = order;
        self
    }

    pub fn order(&self) -> HitOrder {
        self.order
    }

    pub fn shapes_at(&self, step: usize) -> &[Shape] {
        &self.step(step).shapes
    }

    fn step(&self, step: usize) -> &StepShapes {
        assert!(
            step < self.steps.len(),
            "pattern step {step} out of range (step count {})",
            self.steps.len()
        );
        &self.steps[step]
    }
}

impl ShapePattern for Pattern {
    fn step_count(&self) -> usize {
        self.steps.len()
    }

    fn evaluate(&self, step: usize, x: f64, y: f64) -> Option<ColorIndex> {
        let set = self.step(step);
        match set.bounds {
            Some(b) if rect_contains_inclusive(b, x, y) => {}
            _ => return None,
        }
        match self.order {
            HitOrder::FirstHit => set.shapes.iter().find_map(|s| s.hit_test(x, y)),
            HitOrder::Topmost => set.shapes.iter().rev().find_map(|s| s.hit_test(x, y)),
        }
    }

    fn shape_count(&self, step: usize) -> usize {
        self.step(step).shapes.len()
    }
}
