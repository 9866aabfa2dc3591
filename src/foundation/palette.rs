use crate::foundation::error::{GyreError, GyreResult};

/// Index into a [`Palette`]; the only color representation a frame carries.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ColorIndex(pub u8);

impl ColorIndex {
    pub const BLACK: Self = Self(0);
    pub const BLUE: Self = Self(1);
    pub const GREEN: Self = Self(2);
    pub const CYAN: Self = Self(3);
    pub const RED: Self = Self(4);
    pub const MAGENTA: Self = Self(5);
    pub const YELLOW: Self = Self(6);
    pub const WHITE: Self = Self(7);
}

/// Fixed ordered color table shared by every frame of an animation.
///
/// Built once and passed by reference to the encoder; there is no way to mutate it afterwards.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Palette {
    entries: Vec<[u8; 3]>,
}

impl Palette {
    /// The eight corners of the RGB cube, ordered so each index reads as a 3-bit `rgb` value.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                [0x00, 0x00, 0x00],
                [0x00, 0x00, 0xff],
                [0x00, 0xff, 0x00],
                [0x00, 0xff, 0xff],
                [0xff, 0x00, 0x00],
                [0xff, 0x00, 0xff],
                [0xff, 0xff, 0x00],
                [0xff, 0xff, 0xff],
            ],
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `idx` names an entry of this palette.
    pub fn contains(&self, idx: ColorIndex) -> bool {
        usize::from(idx.0) < self.entries.len()
    }

    /// RGB for `idx`; out-of-palette indices are a validation error.
    pub fn rgb(&self, idx: ColorIndex) -> GyreResult<[u8; 3]> {
        self.entries
            .get(usize::from(idx.0))
            .copied()
            .ok_or_else(|| {
                GyreError::validation(format!(
                    "color index {} is outside the {}-entry palette",
                    idx.0,
                    self.entries.len()
                ))
            })
    }

    /// Opaque RGBA8 for `idx`.
    pub fn rgba(&self, idx: ColorIndex) -> GyreResult<[u8; 4]> {
        let [r, g, b] = self.rgb(idx)?;
        Ok([r, g, b, 0xff])
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/palette.rs"]
mod tests;
