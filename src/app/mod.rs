//! The avatar generator wired together: selection state driving the compositor.

pub(crate) mod command;

use crate::config::AvatarConfig;
use crate::export::save_download;
use crate::foundation::error::{AvatarError, AvatarResult};
use crate::palette::color::Color;
use crate::palette::{PalettePicker, Swatch};
use crate::render::compositor::AvatarCompositor;
use crate::render::output::AvatarImage;
use crate::selection::{Selection, SelectionEvent, SelectionState};
use std::cell::{Ref, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Selection state, palette picker and compositor, connected by a subscription.
///
/// The compositor is subscribed to the state holder, so every picker event redraws the avatar
/// before the dispatching call returns.
pub struct AvatarApp {
    state: SelectionState,
    picker: PalettePicker,
    view: Rc<RefCell<AvatarCompositor>>,
}

impl std::fmt::Debug for AvatarApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarApp")
            .field("state", &self.state)
            .field("view", &self.view)
            .finish()
    }
}

impl AvatarApp {
    /// Build the app and draw the default avatar (placeholder on the first palette entry).
    pub fn new(cfg: &AvatarConfig) -> AvatarResult<Self> {
        let compositor = AvatarCompositor::from_config(cfg)?;
        let palette = cfg.palette()?;
        let mut state = SelectionState::new(palette.clone(), cfg.placeholder.clone());
        let view = Rc::new(RefCell::new(compositor));

        {
            let (glyph, color) = state.resolve();
            view.borrow_mut().render(glyph, color);
        }

        let subscriber = Rc::clone(&view);
        let placeholder = cfg.placeholder.clone();
        state.subscribe(move |sel: &Selection| {
            let color = palette.color_at(sel.color_index as i64);
            subscriber
                .borrow_mut()
                .render(sel.glyph_or(&placeholder), color);
        });

        tracing::debug!(
            size = cfg.size,
            dpr = cfg.device_pixel_ratio,
            palette_len = cfg.palette.len(),
            "avatar app ready"
        );
        Ok(Self {
            picker: PalettePicker::new(state.palette().clone()),
            state,
            view,
        })
    }

    pub fn selection(&self) -> &Selection {
        self.state.selection()
    }

    /// Current `(glyph, color)` as drawn.
    pub fn resolved(&self) -> (&str, Color) {
        self.state.resolve()
    }

    pub fn swatches(&self) -> impl Iterator<Item = Swatch> + '_ {
        self.picker.swatches()
    }

    /// The emoji picker reported `glyph`.
    pub fn select_emoji(&mut self, glyph: impl Into<String>) {
        self.dispatch(SelectionEvent::EmojiSelected(glyph.into()));
    }

    /// A swatch was clicked; returns false when `position` is not a swatch.
    pub fn click_swatch(&mut self, position: usize) -> bool {
        match self.picker.click(position) {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    pub fn dispatch(&mut self, event: SelectionEvent) {
        self.state.apply(event);
    }

    /// Borrow the latest render.
    pub fn image(&self) -> Option<Ref<'_, AvatarImage>> {
        Ref::filter_map(self.view.borrow(), |c| c.image()).ok()
    }

    /// Save the latest render as `emoji-avatar.png` in `dir`.
    pub fn download(&self, dir: &Path) -> AvatarResult<PathBuf> {
        let image = self
            .image()
            .ok_or_else(|| AvatarError::render("no avatar has been rendered"))?;
        save_download(&image, dir)
    }

    /// The latest render as a PNG `data:` URI.
    pub fn data_uri(&self) -> AvatarResult<String> {
        self.image()
            .ok_or_else(|| AvatarError::render("no avatar has been rendered"))?
            .to_data_uri()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/app.rs"]
mod tests;
