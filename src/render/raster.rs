use crate::foundation::core::Canvas;
use crate::foundation::error::{GyreError, GyreResult};
use crate::foundation::palette::{ColorIndex, Palette};
use crate::pattern::stepped::ShapePattern;

/// One rendered step: a row-major grid of palette indices.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexedFrame {
    pub width: u32,
    pub height: u32,
    pub indices: Vec<ColorIndex>,
}

impl IndexedFrame {
    /// Frame of `canvas` size with every pixel set to `color`.
    pub fn filled(canvas: Canvas, color: ColorIndex) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            indices: vec![color; canvas.pixel_count()],
        }
    }

    /// Index at `(x, y)`, or `None` outside the frame.
    pub fn get(&self, x: u32, y: u32) -> Option<ColorIndex> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.indices
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Number of pixels painted with `color`.
    pub fn count(&self, color: ColorIndex) -> usize {
        self.indices.iter().filter(|&&c| c == color).count()
    }

    /// Expand to opaque RGBA8 through `palette`.
    pub fn to_rgba8(&self, palette: &Palette) -> GyreResult<Vec<u8>> {
        let mut out = Vec::with_capacity(self.indices.len() * 4);
        for &idx in &self.indices {
            out.extend_from_slice(&palette.rgba(idx)?);
        }
        Ok(out)
    }
}

#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Color for pixels no shape covers.
    pub background: ColorIndex,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: ColorIndex::WHITE,
        }
    }
}

/// Rasterize `step` of `pattern`, sampling each pixel at its integer coordinates.
///
/// Pixels are independent of each other; the order of evaluation is irrelevant.
pub fn render_step(
    canvas: Canvas,
    step: usize,
    pattern: &dyn ShapePattern,
    settings: &RenderSettings,
) -> GyreResult<IndexedFrame> {
    canvas.validate()?;
    if step >= pattern.step_count() {
        return Err(GyreError::render(format!(
            "step {step} is outside the pattern's {} steps",
            pattern.step_count()
        )));
    }

    let mut indices = Vec::with_capacity(canvas.pixel_count());
    for y in 0..canvas.height {
        let fy = f64::from(y);
        for x in 0..canvas.width {
            let color = pattern
                .evaluate(step, f64::from(x), fy)
                .unwrap_or(settings.background);
            indices.push(color);
        }
    }

    Ok(IndexedFrame {
        width: canvas.width,
        height: canvas.height,
        indices,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
