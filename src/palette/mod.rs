//! The fixed background palette and the swatch picker that selects from it.

pub(crate) mod color;

use crate::foundation::error::{AvatarError, AvatarResult};
use crate::selection::SelectionEvent;
use color::Color;
use std::sync::Arc;

/// Background colors offered when no palette is configured.
pub const DEFAULT_PALETTE: [Color; 18] = [
    Color::rgb(0x9b, 0x9f, 0xaa),
    Color::rgb(0xc3, 0xb8, 0xf2),
    Color::rgb(0x9f, 0xc2, 0xe6),
    Color::rgb(0xe5, 0x9f, 0xb8),
    Color::rgb(0xea, 0xca, 0x93),
    Color::rgb(0xc1, 0xeb, 0xa8),
    Color::rgb(0xce, 0xb0, 0xab),
    Color::rgb(0xdf, 0xad, 0x8a),
    Color::rgb(0xc2, 0xba, 0xcf),
    Color::rgb(0xb6, 0xc6, 0xdc),
    Color::rgb(0xc4, 0xde, 0xe0),
    Color::rgb(0xde, 0x9e, 0xe1),
    Color::rgb(0xa1, 0xe7, 0xeb),
    Color::rgb(0xa8, 0xec, 0xad),
    Color::rgb(0xc6, 0xc2, 0xbb),
    Color::rgb(0xd7, 0xc5, 0xa6),
    Color::rgb(0xd3, 0xdb, 0xce),
    Color::rgb(0x86, 0x86, 0x86),
];

/// An immutable, ordered, non-empty list of background colors.
///
/// Cloning is cheap; all clones share the same storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Arc<[Color]>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: Arc::from(DEFAULT_PALETTE.as_slice()),
        }
    }
}

impl Palette {
    /// Build a palette; an empty color list is rejected.
    pub fn new(colors: impl Into<Vec<Color>>) -> AvatarResult<Self> {
        let colors = colors.into();
        if colors.is_empty() {
            return Err(AvatarError::validation("palette must not be empty"));
        }
        Ok(Self {
            colors: Arc::from(colors),
        })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Clamp any integer into a valid index.
    pub fn clamp_index(&self, index: i64) -> usize {
        let max = self.colors.len().saturating_sub(1);
        if index <= 0 {
            0
        } else {
            usize::try_from(index).map_or(max, |i| i.min(max))
        }
    }

    /// The color at `clamp_index(index)`.
    pub fn color_at(&self, index: i64) -> Color {
        self.colors[self.clamp_index(index)]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

/// One selectable entry of the palette UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub index: usize,
    pub color: Color,
}

/// The color tab: renders one swatch per palette entry and turns clicks into events.
///
/// Clicks are addressed by swatch position; positions past the end produce nothing, so
/// this never emits an out-of-range index.
#[derive(Debug, Clone)]
pub struct PalettePicker {
    palette: Palette,
}

impl PalettePicker {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn swatches(&self) -> impl Iterator<Item = Swatch> + '_ {
        self.palette
            .colors()
            .iter()
            .enumerate()
            .map(|(index, &color)| Swatch { index, color })
    }

    pub fn click(&self, position: usize) -> Option<SelectionEvent> {
        if position >= self.palette.len() {
            tracing::debug!(position, "palette click outside swatch grid ignored");
            return None;
        }
        Some(SelectionEvent::ColorPicked(position))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/picker.rs"]
mod tests;
