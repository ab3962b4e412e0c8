//! # Layout
//!
//! Every drawable thing is a [`Widget`]: it can tell how much space it
//! would like inside an available envelope (`measure`) and it can draw
//! itself into an assigned box (`render`). Measuring is pure; it never
//! draws and always gives the same answer for the same inputs, which is
//! what lets the document assembler run a probe pass before the real one.
//!
//! Geometry is in whole pixels of the render surface. Base-pixel
//! configuration (gaps, paddings, font sizes) is converted through the
//! [`RenderContext`] that is threaded through every call, so supersampled
//! renders never touch shared state.

pub mod build;
pub mod flex;
pub mod root;

use crate::canvas::Canvas;
use crate::config;
use crate::font::FontSpec;
use crate::style::FontRole;
use crate::text::TextMeasure;
use crate::widgets::{CardWidget, FixedBox, KpiCard, Spacer, TableWidget, TextWidget, TitleWidget};

pub use flex::{FlexContainer, FlexItem};

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Clip to `avail` on both axes, never below zero.
    pub fn clamp_to(self, avail: Size) -> Size {
        Size::new(
            self.w.min(avail.w).max(0),
            self.h.min(avail.h).max(0),
        )
    }
}

/// A positioned box in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A box at the origin.
    pub const fn sized(w: i32, h: i32) -> Self {
        Self::new(0, 0, w, h)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Shrink by `pad` on every side, clamping the size at zero.
    pub fn inset(&self, pad: i32) -> Rect {
        Rect::new(
            self.x + pad,
            self.y + pad,
            (self.w - 2 * pad).max(0),
            (self.h - 2 * pad).max(0),
        )
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.w <= self.x + self.w
            && other.y + other.h <= self.y + self.h
    }
}

/// Per-render settings passed to every measure and render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    /// Multiplier from base pixels to surface pixels.
    pub scale: f64,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl RenderContext {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Convert base pixels to surface pixels.
    pub fn px(&self, base: i32) -> i32 {
        (base as f64 * self.scale).round() as i32
    }

    /// The scaled font for a typographic role.
    pub fn font(&self, role: FontRole) -> FontSpec {
        let (size, bold) = config::role_metrics(role);
        FontSpec::new(size * self.scale as f32, bold)
    }
}

/// Something that can be sized and drawn.
pub trait Widget {
    /// Preferred size within `avail`. Must not draw and must be
    /// deterministic.
    fn measure<M: TextMeasure>(&self, m: &M, ctx: &RenderContext, avail: Size) -> Size;

    /// Draw into `rect`. Must not draw outside it.
    fn render<C: Canvas>(&self, canvas: &mut C, ctx: &RenderContext, rect: Rect);
}

/// Every widget kind the document builder can produce.
pub enum Element {
    Title(TitleWidget),
    Text(TextWidget),
    Kpi(KpiCard),
    Card(CardWidget),
    Table(TableWidget),
    Spacer(Spacer),
    FixedBox(FixedBox),
    Flex(FlexContainer),
}

impl Widget for Element {
    fn measure<M: TextMeasure>(&self, m: &M, ctx: &RenderContext, avail: Size) -> Size {
        match self {
            Element::Title(w) => w.measure(m, ctx, avail),
            Element::Text(w) => w.measure(m, ctx, avail),
            Element::Kpi(w) => w.measure(m, ctx, avail),
            Element::Card(w) => w.measure(m, ctx, avail),
            Element::Table(w) => w.measure(m, ctx, avail),
            Element::Spacer(w) => w.measure(m, ctx, avail),
            Element::FixedBox(w) => w.measure(m, ctx, avail),
            Element::Flex(w) => w.measure(m, ctx, avail),
        }
    }

    fn render<C: Canvas>(&self, canvas: &mut C, ctx: &RenderContext, rect: Rect) {
        match self {
            Element::Title(w) => w.render(canvas, ctx, rect),
            Element::Text(w) => w.render(canvas, ctx, rect),
            Element::Kpi(w) => w.render(canvas, ctx, rect),
            Element::Card(w) => w.render(canvas, ctx, rect),
            Element::Table(w) => w.render(canvas, ctx, rect),
            Element::Spacer(w) => w.render(canvas, ctx, rect),
            Element::FixedBox(w) => w.render(canvas, ctx, rect),
            Element::Flex(w) => w.render(canvas, ctx, rect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_rounds_scaled_values() {
        let ctx = RenderContext::new(1.5);
        assert_eq!(ctx.px(10), 15);
        assert_eq!(ctx.px(3), 5);
        assert_eq!(RenderContext::default().px(7), 7);
    }

    #[test]
    fn fonts_scale_with_context() {
        let base = RenderContext::default().font(FontRole::Body);
        let double = RenderContext::new(2.0).font(FontRole::Body);
        assert!((double.size - 2.0 * base.size).abs() < 1e-4);
        assert!(RenderContext::default().font(FontRole::Number).bold);
    }

    #[test]
    fn rect_inset_clamps() {
        assert_eq!(Rect::new(0, 0, 10, 10).inset(3), Rect::new(3, 3, 4, 4));
        assert_eq!(Rect::new(0, 0, 4, 10).inset(3), Rect::new(3, 3, 0, 4));
    }

    #[test]
    fn size_clamp() {
        assert_eq!(Size::new(50, -3).clamp_to(Size::new(40, 40)), Size::new(40, 0));
    }
}
