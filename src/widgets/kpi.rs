//! KPI card widget.

use crate::canvas::Canvas;
use crate::config::{self, palette};
use crate::font::FontSpec;
use crate::layout::{Rect, RenderContext, Size, Widget};
use crate::style::{Color, FontRole, TextAlign};
use crate::text::{self, TextMeasure};

/// A metric card: an upper-case label, a large value and an optional
/// signed delta such as `+12.3% vs last week`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
    /// Percentage change; the sign picks the symbol and color.
    pub delta: Option<f64>,
    pub delta_label: Option<String>,
    pub align: TextAlign,
    pub fill: Option<Color>,
    pub outline: Option<Color>,
}

impl KpiCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    fn label_text(&self) -> String {
        self.label.trim().to_uppercase()
    }

    /// `+12.3%`, `-4.0%` or `=0.0%`, followed by the delta label.
    pub fn formatted_delta(&self) -> String {
        let mut pieces = Vec::new();
        if let Some(delta) = self.delta {
            let symbol = if delta > 0.0 {
                '+'
            } else if delta < 0.0 {
                '-'
            } else {
                '='
            };
            pieces.push(format!("{}{:.1}%", symbol, delta.abs()));
        }
        if let Some(label) = self.delta_label.as_deref().filter(|l| !l.trim().is_empty()) {
            pieces.push(label.trim().to_string());
        }
        pieces.join(" ")
    }

    fn delta_color(&self) -> Color {
        match self.delta {
            Some(d) if d > 0.0 => palette::SUCCESS,
            Some(d) if d < 0.0 => palette::DESTRUCTIVE,
            _ => palette::MUTED_FOREGROUND,
        }
    }
}

impl Widget for KpiCard {
    fn measure<M: TextMeasure>(&self, m: &M, ctx: &RenderContext, avail: Size) -> Size {
        let pad = ctx.px(config::KPI_PADDING);
        let gap = ctx.px(config::KPI_GAP);
        let small = ctx.font(FontRole::Caption);

        let label = text::measure_runs(m, &self.label_text(), &small);
        let value = text::measure_runs(m, self.value.trim(), &ctx.font(FontRole::Number));
        let delta = text::measure_runs(m, &self.formatted_delta(), &small);

        let mut h = pad;
        if label.h > 0 {
            h += label.h + gap;
        }
        h += value.h;
        if delta.h > 0 {
            h += gap + delta.h;
        }
        h += pad;

        Size::new(avail.w, h).clamp_to(avail)
    }

    fn render<C: Canvas>(&self, canvas: &mut C, ctx: &RenderContext, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        canvas.rounded_rect(
            rect,
            ctx.px(config::CARD_RADIUS),
            Some(self.fill.unwrap_or(palette::SECONDARY)),
            Some(self.outline.unwrap_or(palette::BORDER)),
        );

        let pad = ctx.px(config::KPI_PADDING);
        let gap = ctx.px(config::KPI_GAP);
        let content_w = (rect.w - 2 * pad).max(0);
        let small = ctx.font(FontRole::Caption);
        let number = ctx.font(FontRole::Number);
        let mut y = rect.y + pad;

        let line = |canvas: &mut C, s: &str, font: &FontSpec, color: Color, y: i32| -> i32 {
            let shown = text::truncate(canvas, s, font, content_w);
            let size = text::measure_runs(canvas, &shown, font);
            let x = rect.x + pad + self.align.offset(content_w, size.w);
            text::draw_runs(canvas, &shown, x, y, font, color);
            size.h
        };

        let label = self.label_text();
        if !label.is_empty() {
            y += line(canvas, &label, &small, palette::MUTED_FOREGROUND, y) + gap;
        }
        y += line(canvas, self.value.trim(), &number, palette::FOREGROUND, y);

        let delta = self.formatted_delta();
        if !delta.is_empty() {
            y += gap;
            line(canvas, &delta, &small, self.delta_color(), y);
        }
        log::debug!("kpi {:?}={:?} delta {:?} in {:?}", self.label, self.value, self.delta, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;

    #[test]
    fn delta_formatting() {
        let mut card = KpiCard::new("Revenue", "$1.2M");
        card.delta = Some(12.345);
        assert_eq!(card.formatted_delta(), "+12.3%");
        card.delta = Some(-4.0);
        card.delta_label = Some("vs last week".to_string());
        assert_eq!(card.formatted_delta(), "-4.0% vs last week");
        card.delta = Some(0.0);
        card.delta_label = None;
        assert_eq!(card.formatted_delta(), "=0.0%");
        card.delta = None;
        assert_eq!(card.formatted_delta(), "");
    }

    #[test]
    fn delta_colors_follow_sign() {
        let mut card = KpiCard::new("x", "1");
        card.delta = Some(3.0);
        assert_eq!(card.delta_color(), palette::SUCCESS);
        card.delta = Some(-3.0);
        assert_eq!(card.delta_color(), palette::DESTRUCTIVE);
        card.delta = None;
        assert_eq!(card.delta_color(), palette::MUTED_FOREGROUND);
    }

    #[test]
    fn measured_height_stacks_lines() {
        let fonts = FontContext::new();
        let ctx = RenderContext::default();
        let mut card = KpiCard::new("Orders", "1,204");
        card.delta = Some(5.0);
        let size = card.measure(&fonts, &ctx, Size::new(400, 1000));
        // pad + caption + gap + number + gap + caption + pad
        assert_eq!(size, Size::new(400, 24 + 40 + 12 + 80 + 12 + 40 + 24));
    }

    #[test]
    fn value_only_card() {
        let fonts = FontContext::new();
        let card = KpiCard::new("", "42");
        let size = card.measure(&fonts, &RenderContext::default(), Size::new(300, 1000));
        assert_eq!(size.h, 24 + 80 + 24);
    }
}
