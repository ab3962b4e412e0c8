//! Dashboard heading with an optional muted note.

use crate::canvas::Canvas;
use crate::config::{self, palette};
use crate::layout::{Rect, RenderContext, Size, Widget};
use crate::style::{Color, FontRole, FontWeight, TextAlign, TitleSize};
use crate::text::{self, TextMeasure};

use super::apply_weight;

/// A single-line heading, optionally followed by a muted note (typically a
/// reporting period).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleWidget {
    pub text: String,
    pub note: String,
    pub size: TitleSize,
    pub weight: Option<FontWeight>,
    pub color: Option<Color>,
    pub align: TextAlign,
}

impl TitleWidget {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    fn font(&self, ctx: &RenderContext) -> crate::font::FontSpec {
        apply_weight(ctx.font(self.size.role()), self.weight)
    }
}

impl Widget for TitleWidget {
    fn measure<M: TextMeasure>(&self, m: &M, ctx: &RenderContext, avail: Size) -> Size {
        let title = self.text.trim();
        let note = self.note.trim();
        let mut size = Size::default();
        if !title.is_empty() {
            let t = text::measure_runs(m, title, &self.font(ctx));
            size = Size::new(t.w, t.h + 2 * ctx.px(config::TITLE_PADDING_V));
        }
        if !note.is_empty() {
            let n = text::measure_runs(m, note, &ctx.font(FontRole::Body));
            let gap = if title.is_empty() { 0 } else { ctx.px(config::GAP_MEDIUM) };
            size = Size::new(size.w.max(n.w), size.h + gap + n.h);
        }
        size.clamp_to(avail)
    }

    fn render<C: Canvas>(&self, canvas: &mut C, ctx: &RenderContext, rect: Rect) {
        let title = self.text.trim();
        let note = self.note.trim();
        if rect.is_empty() || (title.is_empty() && note.is_empty()) {
            return;
        }

        let mut note_y = rect.y;
        if !title.is_empty() {
            let font = self.font(ctx);
            let pad_v = ctx.px(config::TITLE_PADDING_V);
            let shown = text::truncate(canvas, title, &font, rect.w);
            let size = text::measure_runs(canvas, &shown, &font);
            let x = rect.x + self.align.offset(rect.w, size.w);
            // Centre vertically when the box is too short for the padding.
            let y = if size.h <= rect.h - 2 * pad_v {
                rect.y + pad_v
            } else {
                rect.y + ((rect.h - size.h) / 2).max(0)
            };
            let color = self.color.unwrap_or(palette::FOREGROUND);
            text::draw_runs(canvas, &shown, x, y, &font, color);
            log::debug!("title {:?} at {:?}", shown, rect);
            note_y = y + size.h + ctx.px(config::GAP_MEDIUM);
        }

        if !note.is_empty() {
            let note_font = ctx.font(FontRole::Body);
            let shown = text::truncate(canvas, note, &note_font, rect.w);
            let note_w = text::measure_runs(canvas, &shown, &note_font).w;
            let nx = rect.x + self.align.offset(rect.w, note_w);
            text::draw_runs(canvas, &shown, nx, note_y, &note_font, palette::MUTED_FOREGROUND);
        }
    }
}
