//! The selection state holder: current emoji and palette index, plus change subscribers.

use crate::palette::Palette;
use crate::palette::color::Color;

/// Glyph shown until the user picks an emoji.
pub const DEFAULT_PLACEHOLDER: &str = "\u{1F47B}";

/// Events the picker widgets deliver to the state holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The emoji picker reported a glyph.
    EmojiSelected(String),
    /// The palette UI reported a swatch index.
    ColorPicked(usize),
}

/// What the user has chosen so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// `None` until an emoji has been picked.
    pub emoji: Option<String>,
    /// Always a valid index into the holder's palette.
    pub color_index: usize,
}

impl Selection {
    /// The glyph to draw, falling back to `placeholder`.
    pub fn glyph_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.emoji.as_deref().unwrap_or(placeholder)
    }
}

/// Handle returned by [`SelectionState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Selection)>;

/// Owns the current [`Selection`] and notifies subscribers after every mutation.
///
/// Notification is synchronous: when a setter returns, every subscriber has seen the new value.
pub struct SelectionState {
    selection: Selection,
    palette: Palette,
    placeholder: String,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl std::fmt::Debug for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionState")
            .field("selection", &self.selection)
            .field("palette_len", &self.palette.len())
            .field("placeholder", &self.placeholder)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl SelectionState {
    pub fn new(palette: Palette, placeholder: impl Into<String>) -> Self {
        Self {
            selection: Selection::default(),
            palette,
            placeholder: placeholder.into(),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Current `(glyph, color)` pair, placeholder and palette already applied.
    pub fn resolve(&self) -> (&str, Color) {
        (
            self.selection.glyph_or(&self.placeholder),
            self.palette.color_at(self.selection.color_index as i64),
        )
    }

    /// Register a callback run after each mutation.
    pub fn subscribe(&mut self, f: impl FnMut(&Selection) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn set_emoji(&mut self, glyph: impl Into<String>) {
        let glyph = glyph.into();
        tracing::debug!(glyph = %glyph, "emoji selected");
        self.selection.emoji = Some(glyph);
        self.notify();
    }

    /// Store `index`, clamped into the palette's range.
    pub fn set_color_index(&mut self, index: i64) {
        let clamped = self.palette.clamp_index(index);
        if i64::try_from(clamped).ok() != Some(index) {
            tracing::debug!(index, clamped, "color index clamped into palette range");
        }
        self.selection.color_index = clamped;
        self.notify();
    }

    pub fn apply(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::EmojiSelected(glyph) => self.set_emoji(glyph),
            SelectionEvent::ColorPicked(index) => {
                self.set_color_index(i64::try_from(index).unwrap_or(i64::MAX))
            }
        }
    }

    fn notify(&mut self) {
        for (_, f) in &mut self.subscribers {
            f(&self.selection);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/selection/state.rs"]
mod tests;
