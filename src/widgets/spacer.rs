//! Spacers and fixed-size boxes.

use crate::canvas::Canvas;
use crate::config;
use crate::layout::{Rect, RenderContext, Size, Widget};
use crate::style::{Background, Color};
use crate::text::TextMeasure;

/// Empty space. Draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Spacer {
    /// Width in base pixels; takes the available width when unset.
    pub width: Option<i32>,
    /// Height in base pixels.
    pub height: i32,
}

impl Default for Spacer {
    fn default() -> Self {
        Self {
            width: None,
            height: config::GAP_MEDIUM,
        }
    }
}

impl Widget for Spacer {
    fn measure<M: TextMeasure>(&self, _m: &M, ctx: &RenderContext, avail: Size) -> Size {
        let w = self.width.map(|w| ctx.px(w)).unwrap_or(avail.w);
        Size::new(w, ctx.px(self.height)).clamp_to(avail)
    }

    fn render<C: Canvas>(&self, _canvas: &mut C, _ctx: &RenderContext, _rect: Rect) {}
}

/// A box of fixed size that only paints its background.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedBox {
    /// Size in base pixels.
    pub width: i32,
    pub height: i32,
    pub background: Background,
}

impl FixedBox {
    pub const DEFAULT_FILL: Color = Color::rgb(230, 230, 230);
    pub const DEFAULT_OUTLINE: Color = Color::rgb(180, 180, 180);

    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            background: Background {
                fill: Some(Self::DEFAULT_FILL),
                outline: Some(Self::DEFAULT_OUTLINE),
                radius: config::CARD_RADIUS,
            },
        }
    }
}

impl Widget for FixedBox {
    fn measure<M: TextMeasure>(&self, _m: &M, ctx: &RenderContext, avail: Size) -> Size {
        Size::new(ctx.px(self.width), ctx.px(self.height)).clamp_to(avail)
    }

    fn render<C: Canvas>(&self, canvas: &mut C, ctx: &RenderContext, rect: Rect) {
        let bg = &self.background;
        canvas.rounded_rect(rect, ctx.px(bg.radius), bg.fill, bg.outline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;

    #[test]
    fn spacer_takes_available_width() {
        let fonts = FontContext::new();
        let s = Spacer {
            width: None,
            height: 24,
        };
        let size = s.measure(&fonts, &RenderContext::new(2.0), Size::new(300, 1000));
        assert_eq!(size, Size::new(300, 48));
    }

    #[test]
    fn fixed_box_clamps_to_envelope() {
        let fonts = FontContext::new();
        let b = FixedBox::new(500, 80);
        let size = b.measure(&fonts, &RenderContext::default(), Size::new(200, 50));
        assert_eq!(size, Size::new(200, 50));
    }
}
