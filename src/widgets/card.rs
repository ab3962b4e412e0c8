//! Plain card: a bordered panel with one caption-sized value.

use crate::canvas::Canvas;
use crate::config::{self, palette};
use crate::layout::{Rect, RenderContext, Size, Widget};
use crate::style::FontRole;
use crate::text::{self, TextMeasure};

/// A fixed-height card showing a single value in its top-left corner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardWidget {
    pub value: String,
}

impl CardWidget {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

impl Widget for CardWidget {
    fn measure<M: TextMeasure>(&self, _m: &M, ctx: &RenderContext, avail: Size) -> Size {
        Size::new(avail.w, ctx.px(config::CARD_HEIGHT)).clamp_to(avail)
    }

    fn render<C: Canvas>(&self, canvas: &mut C, ctx: &RenderContext, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        canvas.rounded_rect(
            rect,
            ctx.px(config::CARD_RADIUS),
            Some(palette::CARD_BACKGROUND),
            Some(palette::BORDER),
        );

        let value = self.value.trim();
        if value.is_empty() {
            return;
        }
        let pad = ctx.px(config::CARD_PADDING);
        let font = ctx.font(FontRole::Caption);
        let shown = text::truncate(canvas, value, &font, rect.w - 2 * pad);
        text::draw_runs(canvas, &shown, rect.x + pad, rect.y + pad, &font, palette::FOREGROUND);
        log::debug!("card {:?} in {:?}", shown, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RasterCanvas;
    use crate::font::FontContext;
    use crate::style::Color;

    #[test]
    fn card_has_fixed_height() {
        let fonts = FontContext::new();
        let card = CardWidget::new("Uptime 99.9%");
        let size = card.measure(&fonts, &RenderContext::default(), Size::new(400, 1000));
        assert_eq!(size, Size::new(400, 150));
        let doubled = card.measure(&fonts, &RenderContext::new(2.0), Size::new(400, 1000));
        assert_eq!(doubled.h, 300);
    }

    #[test]
    fn card_height_is_clamped() {
        let fonts = FontContext::new();
        let card = CardWidget::new("x");
        let size = card.measure(&fonts, &RenderContext::default(), Size::new(400, 90));
        assert_eq!(size, Size::new(400, 90));
    }

    #[test]
    fn card_paints_panel_with_border() {
        let fonts = FontContext::new();
        let mut canvas = RasterCanvas::new(300, 150, &fonts, Some(Color::rgb(0, 0, 0)));
        let card = CardWidget::new("A value far too long to fit inside a three hundred pixel card");
        card.render(&mut canvas, &RenderContext::default(), Rect::sized(300, 150));

        let img = canvas.image();
        assert_eq!(img.get_pixel(0, 75).0, palette::BORDER.to_rgba());
        assert_eq!(img.get_pixel(150, 120).0, palette::CARD_BACKGROUND.to_rgba());
        // Rounded corner leaves the background showing.
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn long_value_is_truncated_to_padded_width() {
        let fonts = FontContext::new();
        let font = RenderContext::default().font(FontRole::Caption);
        let value = "A value far too long to fit inside a three hundred pixel card";
        let shown = text::truncate(&fonts, value, &font, 300 - 2 * config::CARD_PADDING);
        assert!(shown.ends_with(text::ELLIPSIS));
        assert!(text::measure_runs(&fonts, &shown, &font).w <= 260);
    }
}
