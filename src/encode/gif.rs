use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use crate::foundation::error::{GyreError, GyreResult};
use crate::foundation::palette::{ColorIndex, Palette};
use crate::render::raster::IndexedFrame;
use crate::render::sequence::FrameSequence;

/// Destination and container options for [`write_gif`].
#[derive(Clone, Debug)]
pub struct GifEncodeConfig {
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Loop the animation forever instead of playing it once.
    pub repeat_forever: bool,
}

impl GifEncodeConfig {
    /// Overwrite and loop forever by default.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            repeat_forever: true,
        }
    }

    /// Reject paths that do not name a file.
    pub fn validate(&self) -> GyreResult<()> {
        if self.out_path.file_name().is_none() {
            return Err(GyreError::validation(format!(
                "output path '{}' does not name a file",
                self.out_path.display()
            )));
        }
        Ok(())
    }

    /// Hidden sibling file the encoder writes into before the final rename.
    ///
    /// Tagged with the process id so concurrent runs targeting the same destination never share
    /// a temp file.
    pub fn partial_path(&self) -> PathBuf {
        let mut name = std::ffi::OsString::from(".");
        if let Some(file) = self.out_path.file_name() {
            name.push(file);
        }
        name.push(format!(".{}.partial", std::process::id()));
        self.out_path.with_file_name(name)
    }
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> GyreResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encode `seq` as an animated GIF at `cfg.out_path`.
///
/// Frames are written to a hidden sibling file first and renamed into place once the encoder
/// has finished, so a failure never leaves a truncated GIF at the destination.
#[tracing::instrument(
    skip(seq, palette, cfg),
    fields(out = %cfg.out_path.display(), frames = seq.len())
)]
pub fn write_gif(seq: &FrameSequence, palette: &Palette, cfg: &GifEncodeConfig) -> GyreResult<()> {
    cfg.validate()?;
    seq.validate(palette)?;
    ensure_parent_dir(&cfg.out_path)?;

    if !cfg.overwrite && cfg.out_path.exists() {
        return Err(GyreError::validation(format!(
            "output file '{}' already exists",
            cfg.out_path.display()
        )));
    }

    let partial = cfg.partial_path();
    let mut guard = TempFileGuard(Some(partial.clone()));
    encode_to(&partial, seq, palette, cfg.repeat_forever)?;

    std::fs::rename(&partial, &cfg.out_path).map_err(|e| {
        GyreError::encode(format!(
            "failed to move '{}' into place at '{}': {e}",
            partial.display(),
            cfg.out_path.display()
        ))
    })?;
    guard.0 = None;

    tracing::info!(
        width = seq.canvas.width,
        height = seq.canvas.height,
        "wrote gif"
    );
    Ok(())
}

fn encode_to(
    path: &Path,
    seq: &FrameSequence,
    palette: &Palette,
    repeat_forever: bool,
) -> GyreResult<()> {
    let (width, height) = gif_dimensions(seq)?;
    let global = global_palette(palette)?;

    let file = File::create(path)
        .map_err(|e| GyreError::encode(format!("failed to create '{}': {e}", path.display())))?;
    let mut encoder = gif::Encoder::new(BufWriter::new(file), width, height, &global)
        .map_err(|e| GyreError::encode(format!("failed to start gif: {e}")))?;
    if repeat_forever {
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| GyreError::encode(format!("failed to set gif repeat: {e}")))?;
    }

    for (step, (frame, &delay_cs)) in seq.frames.iter().zip(&seq.delays_cs).enumerate() {
        let indices: Vec<u8> = frame.indices.iter().map(|c| c.0).collect();
        // No local color table: every frame indexes the shared global palette.
        let mut out = gif::Frame::from_indexed_pixels(width, height, indices, None);
        out.delay = delay_cs;
        encoder
            .write_frame(&out)
            .map_err(|e| GyreError::encode(format!("failed to encode frame {step}: {e}")))?;
    }

    let mut writer = encoder
        .into_inner()
        .map_err(|e| GyreError::encode(format!("failed to finish gif: {e}")))?;
    writer
        .flush()
        .map_err(|e| GyreError::encode(format!("failed to flush '{}': {e}", path.display())))?;
    let file = writer
        .into_inner()
        .map_err(|e| GyreError::encode(format!("failed to flush '{}': {e}", path.display())))?;
    file.sync_all()
        .map_err(|e| GyreError::encode(format!("failed to sync '{}': {e}", path.display())))?;
    Ok(())
}

fn gif_dimensions(seq: &FrameSequence) -> GyreResult<(u16, u16)> {
    let side = |v: u32, what: &str| {
        u16::try_from(v).map_err(|_| {
            GyreError::validation(format!("gif {what} {v} exceeds {}", u16::MAX))
        })
    };
    Ok((
        side(seq.canvas.width, "width")?,
        side(seq.canvas.height, "height")?,
    ))
}

/// Flat `[r, g, b, ...]` global color table.
fn global_palette(palette: &Palette) -> GyreResult<Vec<u8>> {
    if palette.is_empty() || palette.len() > 256 {
        return Err(GyreError::validation(format!(
            "gif palette needs 1..=256 entries, got {}",
            palette.len()
        )));
    }
    let mut flat = Vec::with_capacity(palette.len() * 3);
    for idx in 0..palette.len() {
        flat.extend_from_slice(&palette.rgb(ColorIndex(idx as u8))?);
    }
    Ok(flat)
}

/// Write one frame as a PNG.
pub fn write_frame_png(frame: &IndexedFrame, palette: &Palette, path: &Path) -> GyreResult<()> {
    ensure_parent_dir(path)?;
    let rgba = frame.to_rgba8(palette)?;
    image::save_buffer_with_format(
        path,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| GyreError::encode(format!("failed to write png '{}': {e}", path.display())))
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
