//! Plain text blocks, single-line or wrapped.

use crate::canvas::Canvas;
use crate::config::palette;
use crate::font::FontSpec;
use crate::layout::{Rect, RenderContext, Size, Widget};
use crate::style::{Color, FontRole, FontWeight, TextAlign};
use crate::text::{self, TextMeasure};

use super::apply_weight;

/// A block of text. Single-line text is truncated with an ellipsis; wrapped
/// text fills as many lines as the box allows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextWidget {
    pub text: String,
    pub role: FontRole,
    pub weight: Option<FontWeight>,
    pub color: Option<Color>,
    pub align: TextAlign,
    pub wrap: bool,
}

impl TextWidget {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    fn font(&self, ctx: &RenderContext) -> FontSpec {
        apply_weight(ctx.font(self.role), self.weight)
    }
}

impl Widget for TextWidget {
    fn measure<M: TextMeasure>(&self, m: &M, ctx: &RenderContext, avail: Size) -> Size {
        let content = self.text.trim();
        if content.is_empty() {
            return Size::default();
        }
        let font = self.font(ctx);
        if !self.wrap {
            return text::measure_runs(m, content, &font).clamp_to(avail);
        }

        let lines = text::wrap(m, content, &font, avail.w);
        let lh = text::line_height(m, &font);
        let w = lines
            .iter()
            .map(|l| text::measure_runs(m, l, &font).w)
            .max()
            .unwrap_or(0);
        Size::new(w, lh * lines.len() as i32).clamp_to(avail)
    }

    fn render<C: Canvas>(&self, canvas: &mut C, ctx: &RenderContext, rect: Rect) {
        let content = self.text.trim();
        if rect.is_empty() || content.is_empty() {
            return;
        }
        let font = self.font(ctx);
        let color = self.color.unwrap_or(palette::FOREGROUND);

        let lines = if self.wrap {
            text::fit_lines(canvas, content, &font, rect.w, rect.h)
        } else {
            vec![text::truncate(canvas, content, &font, rect.w)]
        };

        let lh = text::line_height(canvas, &font);
        let mut y = rect.y;
        for line in &lines {
            let w = text::measure_runs(canvas, line, &font).w;
            text::draw_runs(canvas, line, rect.x + self.align.offset(rect.w, w), y, &font, color);
            y += lh;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;

    #[test]
    fn single_line_measures_its_text() {
        let fonts = FontContext::new();
        let ctx = RenderContext::default();
        let t = TextWidget::new("Hello");
        let size = t.measure(&fonts, &ctx, Size::new(1000, 1000));
        assert_eq!(size, text::measure_runs(&fonts, "Hello", &ctx.font(FontRole::Body)));
    }

    #[test]
    fn wrapped_text_grows_in_height() {
        let fonts = FontContext::new();
        let ctx = RenderContext::default();
        let t = TextWidget {
            wrap: true,
            ..TextWidget::new("alpha beta gamma delta epsilon zeta")
        };
        let narrow = t.measure(&fonts, &ctx, Size::new(300, 10_000));
        let wide = t.measure(&fonts, &ctx, Size::new(5000, 10_000));
        assert_eq!(wide.h, 48);
        assert!(narrow.h > wide.h);
        assert!(narrow.w <= 300);
    }

    #[test]
    fn blank_text_is_empty() {
        let fonts = FontContext::new();
        let t = TextWidget::new("  ");
        assert_eq!(
            t.measure(&fonts, &RenderContext::default(), Size::new(100, 100)),
            Size::default()
        );
    }
}
