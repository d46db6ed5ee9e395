use crate::config::FontConfig;
use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::{AvatarError, AvatarResult};
use crate::palette::color::Color;
use crate::render::affine_to_cpu;
use anyhow::Context as _;
use std::collections::HashMap;

/// Brush carried through Parley layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct GlyphBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Color> for GlyphBrush {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Generic fallbacks appended after any user font families.
const GENERIC_FAMILIES: &str = "serif, emoji";

// Missing-glyph box proportions, in ems.
const SUBST_ADVANCE_EM: f64 = 0.6;
const SUBST_WIDTH_EM: f64 = 0.5;
const SUBST_HEIGHT_EM: f64 = 0.7;

struct ShapedRun {
    font: vello_cpu::peniko::FontData,
    font_size: f32,
    glyphs: Vec<vello_cpu::Glyph>,
}

struct ShapedLine {
    runs: Vec<ShapedRun>,
    width: f64,
    /// Offset from the layout top to the middle of the em box.
    em_middle: f64,
}

/// Shapes glyph strings with Parley and rasterizes them with `vello_cpu`.
///
/// Glyphs no configured font covers are drawn as filled missing-glyph boxes, one per
/// visible character.
pub(crate) struct GlyphEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<GlyphBrush>,
    font_stack: String,
    has_fonts: bool,
    cpu_fonts: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl std::fmt::Debug for GlyphEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphEngine")
            .field("font_stack", &self.font_stack)
            .field("has_fonts", &self.has_fonts)
            .finish()
    }
}

impl GlyphEngine {
    pub(crate) fn new(fonts: &FontConfig) -> AvatarResult<Self> {
        let mut font_ctx = parley::FontContext {
            collection: parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                shared: false,
                system_fonts: fonts.system,
            }),
            source_cache: parley::fontique::SourceCache::default(),
        };

        let mut families = Vec::new();
        for path in &fonts.files {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read font file '{}'", path.display()))?;
            let registered = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes), None);
            let (family_id, _) = registered.first().ok_or_else(|| {
                AvatarError::render(format!(
                    "no font families registered from '{}'",
                    path.display()
                ))
            })?;
            let name = font_ctx
                .collection
                .family_name(*family_id)
                .ok_or_else(|| AvatarError::render("registered font family has no name"))?
                .to_string();
            tracing::debug!(family = %name, path = %path.display(), "registered font file");
            families.push(format!("\"{}\"", name.replace('"', "")));
        }

        let has_fonts =
            !families.is_empty() || font_ctx.collection.family_names().next().is_some();
        if !has_fonts {
            tracing::info!("no fonts available; glyphs render as substitution boxes");
        }

        families.push(GENERIC_FAMILIES.to_owned());
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            font_stack: families.join(", "),
            has_fonts,
            cpu_fonts: HashMap::new(),
        })
    }

    /// Draw `text` so the middle of its em box sits on `anchor` (logical units).
    pub(crate) fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        font_size: f64,
        anchor: Point,
        to_device: Affine,
        fill: Color,
    ) {
        if text.is_empty() {
            return;
        }

        ctx.set_paint(fill.to_cpu());

        if self.has_fonts
            && let Some(line) = self.shape(text, font_size, fill)
        {
            let origin =
                Affine::translate((anchor.x - line.width / 2.0, anchor.y - line.em_middle));
            ctx.set_transform(affine_to_cpu(to_device * origin));
            for run in line.runs {
                ctx.glyph_run(&run.font)
                    .font_size(run.font_size)
                    .fill_glyphs(run.glyphs.into_iter());
            }
            return;
        }

        ctx.set_transform(affine_to_cpu(to_device));
        for rect in substitution_boxes(text, font_size, anchor) {
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
        }
    }

    /// Shape the first line of `text`; `None` when no font produced a real glyph.
    fn shape(&mut self, text: &str, font_size: f64, fill: Color) -> Option<ShapedLine> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.font_stack.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_size as f32));
        builder.push_default(parley::style::StyleProperty::Brush(GlyphBrush::from(fill)));
        let mut layout: parley::Layout<GlyphBrush> = builder.build(text);
        layout.break_all_lines(None);

        let line = layout.lines().next()?;
        let metrics = line.metrics();
        let em_middle =
            f64::from(metrics.baseline) + f64::from(metrics.descent - metrics.ascent) / 2.0;

        let mut runs = Vec::new();
        let mut inked = false;
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs: Vec<vello_cpu::Glyph> = run
                .positioned_glyphs()
                .map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                })
                .collect();
            inked |= glyphs.iter().any(|g| g.id != 0);
            let shaped = run.run();
            let font = self.cpu_font(
                shaped.font().data.id(),
                shaped.font().data.data(),
                shaped.font().index,
            );
            runs.push(ShapedRun {
                font,
                font_size: shaped.font_size(),
                glyphs,
            });
        }

        if !inked {
            tracing::debug!(text, "no font covers glyph; using substitution boxes");
            return None;
        }

        Some(ShapedLine {
            runs,
            width: f64::from(layout.width()),
            em_middle,
        })
    }

    /// Re-wrap a shaped font for the rasterizer, once per (blob, face index).
    fn cpu_font(
        &mut self,
        blob_id: u64,
        bytes: &[u8],
        index: u32,
    ) -> vello_cpu::peniko::FontData {
        self.cpu_fonts
            .entry((blob_id, index))
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    index,
                )
            })
            .clone()
    }
}

/// Whether `c` renders as its own box when substituted (joiners and modifiers do not).
fn is_visible_char(c: char) -> bool {
    !matches!(
        c,
        '\u{200D}'
            | '\u{20E3}'
            | '\u{FE00}'..='\u{FE0F}'
            | '\u{1F3FB}'..='\u{1F3FF}'
            | '\u{E0020}'..='\u{E007F}'
    )
}

/// Missing-glyph boxes for `text`, centered on `anchor`.
pub(crate) fn substitution_boxes(text: &str, font_size: f64, anchor: Point) -> Vec<Rect> {
    let n = text.chars().filter(|&c| is_visible_char(c)).count();
    if n == 0 {
        return Vec::new();
    }
    let advance = SUBST_ADVANCE_EM * font_size;
    let w = SUBST_WIDTH_EM * font_size;
    let h = SUBST_HEIGHT_EM * font_size;
    let total = advance * (n as f64 - 1.0) + w;
    let x0 = anchor.x - total / 2.0;
    let y0 = anchor.y - h / 2.0;
    (0..n)
        .map(|i| {
            let x = x0 + advance * i as f64;
            Rect::new(x, y0, x + w, y0 + h)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyph.rs"]
mod tests;
