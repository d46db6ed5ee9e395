use crate::config::{AvatarConfig, FONT_SCALE, FontConfig, HostEngine};
use crate::foundation::core::{AvatarSize, Point};
use crate::foundation::error::AvatarResult;
use crate::foundation::math::premul_over_in_place;
use crate::palette::color::Color;
use crate::render::glyph::GlyphEngine;
use crate::render::output::AvatarImage;
use crate::render::{affine_to_cpu, circle_to_cpu, clear_pixmap_to_transparent, surface_side};

/// Result of a [`AvatarCompositor::render`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A new image replaced the previous one.
    Rendered,
    /// Inputs matched the last render; the current image was kept.
    Unchanged,
    /// No drawing surface could be created; the previous image (if any) stays current.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderKey {
    emoji: String,
    color: Color,
}

/// Draws `(emoji, color)` into a circular avatar of fixed size.
///
/// Each render recreates the image from scratch: a flat-filled circle inscribed in the square,
/// then the glyph layer composited over it. Only the latest image is kept.
pub struct AvatarCompositor {
    size: AvatarSize,
    host: HostEngine,
    glyph_fill: Color,
    glyphs: GlyphEngine,

    bg_ctx: Option<vello_cpu::RenderContext>,
    glyph_ctx: Option<vello_cpu::RenderContext>,

    current: Option<AvatarImage>,
    last_key: Option<RenderKey>,
}

impl std::fmt::Debug for AvatarCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarCompositor")
            .field("size", &self.size)
            .field("host", &self.host)
            .field("glyphs", &self.glyphs)
            .field("has_image", &self.current.is_some())
            .finish()
    }
}

impl AvatarCompositor {
    pub fn new(size: AvatarSize, host: HostEngine, fonts: &FontConfig) -> AvatarResult<Self> {
        Ok(Self {
            size,
            host,
            glyph_fill: Color::WHITE,
            glyphs: GlyphEngine::new(fonts)?,
            bg_ctx: None,
            glyph_ctx: None,
            current: None,
            last_key: None,
        })
    }

    pub fn from_config(cfg: &AvatarConfig) -> AvatarResult<Self> {
        cfg.validate()?;
        Self::new(cfg.avatar_size()?, cfg.host_engine(), &cfg.fonts)
    }

    pub fn size(&self) -> AvatarSize {
        self.size
    }

    pub fn host_engine(&self) -> HostEngine {
        self.host
    }

    /// The most recent render, if any.
    pub fn image(&self) -> Option<&AvatarImage> {
        self.current.as_ref()
    }

    /// Forget the last inputs so the next render always redraws.
    pub fn invalidate(&mut self) {
        self.last_key = None;
    }

    pub fn font_size(&self) -> f64 {
        self.size.logical_f64() * FONT_SCALE
    }

    /// Logical point the glyph's em-box middle is placed on.
    pub fn glyph_anchor(&self) -> Point {
        let half = self.size.logical_f64() / 2.0;
        Point::new(half, half + self.font_size() * self.host.baseline_offset_factor())
    }

    #[tracing::instrument(skip(self), fields(size = self.size.logical, dpr = self.size.dpr))]
    pub fn render(&mut self, emoji: &str, color: Color) -> RenderOutcome {
        let key = RenderKey {
            emoji: emoji.to_owned(),
            color,
        };
        if self.current.is_some() && self.last_key.as_ref() == Some(&key) {
            return RenderOutcome::Unchanged;
        }

        let Some(side) = surface_side(self.size.device_side()) else {
            tracing::debug!(
                device_side = self.size.device_side(),
                "no drawing surface for this size; draw skipped"
            );
            return RenderOutcome::Skipped;
        };

        let mut out = self.draw_background(side, color);
        let glyph_layer = self.draw_glyph_layer(side, emoji);
        premul_over_in_place(&mut out, glyph_layer.data_as_u8_slice());

        self.current = Some(AvatarImage {
            width: u32::from(side),
            height: u32::from(side),
            data: out,
        });
        self.last_key = Some(key);
        tracing::debug!(side, "avatar rendered");
        RenderOutcome::Rendered
    }

    fn draw_background(&mut self, side: u16, color: Color) -> Vec<u8> {
        let mut ctx = take_context(&mut self.bg_ctx, side);
        ctx.set_transform(affine_to_cpu(self.size.to_device()));
        ctx.set_paint(color.to_cpu());
        ctx.fill_path(&circle_to_cpu(self.size.inscribed_circle()));
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(side, side);
        clear_pixmap_to_transparent(&mut pixmap);
        ctx.render_to_pixmap(&mut pixmap);
        self.bg_ctx = Some(ctx);
        pixmap.data_as_u8_slice().to_vec()
    }

    fn draw_glyph_layer(&mut self, side: u16, emoji: &str) -> vello_cpu::Pixmap {
        let mut ctx = take_context(&mut self.glyph_ctx, side);
        let font_size = self.font_size();
        let anchor = self.glyph_anchor();
        self.glyphs.draw(
            &mut ctx,
            emoji,
            font_size,
            anchor,
            self.size.to_device(),
            self.glyph_fill,
        );
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(side, side);
        clear_pixmap_to_transparent(&mut pixmap);
        ctx.render_to_pixmap(&mut pixmap);
        self.glyph_ctx = Some(ctx);
        pixmap
    }
}

fn take_context(
    slot: &mut Option<vello_cpu::RenderContext>,
    side: u16,
) -> vello_cpu::RenderContext {
    let mut ctx = match slot.take() {
        Some(ctx) if ctx.width() == side && ctx.height() == side => ctx,
        _ => vello_cpu::RenderContext::new(side, side),
    };
    ctx.reset();
    ctx
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
