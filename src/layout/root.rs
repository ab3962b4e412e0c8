//! # Document Assembly
//!
//! Puts the top-level nodes into one vertical flow inside the canvas
//! margins and turns it into a single image:
//!
//! 1. probe: measure the flow at the effective width with an unbounded
//!    height hint to learn its preferred height;
//! 2. size: pick the surface height from the height policy;
//! 3. render into a surface of that size;
//! 4. when supersampling, downscale to the target width.
//!
//! Everything runs at `scale × width`; the [`RenderContext`] carries the
//! scale into every measure and render call.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::canvas::{Canvas, RasterCanvas};
use crate::config::{self, palette};
use crate::font::FontContext;
use crate::model::{CanvasConfig, Document, HeightMode};
use crate::text::TextMeasure;

use super::build::build;
use super::flex::{FlexContainer, FlexItem};
use super::{Rect, RenderContext, Size, Widget};

/// Largest accepted supersampling factor.
pub const MAX_SCALE: f64 = 8.0;

/// Margins in base pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edges {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Edges {
    pub const fn uniform(v: i32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

impl Default for Edges {
    fn default() -> Self {
        Self::uniform(config::PADDING)
    }
}

/// The top-level vertical flow with its margins.
///
/// Top-level components keep their measured height; when the surface is
/// shorter than the content, whatever doesn't fit is cut at the bottom.
pub struct Root {
    pub margins: Edges,
    pub flow: FlexContainer,
}

impl Root {
    pub fn new(margins: Edges) -> Self {
        Self {
            margins,
            flow: FlexContainer::column().gap(config::ROOT_GAP),
        }
    }

    /// Build the element tree for every top-level node of `doc`.
    pub fn from_document(doc: &Document) -> Self {
        let mut root = Root::new(margins_for(&doc.canvas));
        for node in &doc.components {
            root.flow.push(FlexItem::new(build(node, &doc.data)).shrink(0.0));
        }
        root
    }

    fn content_rect(&self, ctx: &RenderContext, rect: Rect) -> Rect {
        let m = &self.margins;
        let (top, right, bottom, left) = (ctx.px(m.top), ctx.px(m.right), ctx.px(m.bottom), ctx.px(m.left));
        Rect::new(
            rect.x + left,
            rect.y + top,
            (rect.w - left - right).max(0),
            (rect.h - top - bottom).max(0),
        )
    }
}

impl Widget for Root {
    fn measure<M: TextMeasure>(&self, m: &M, ctx: &RenderContext, avail: Size) -> Size {
        let mg = &self.margins;
        let horizontal = ctx.px(mg.left) + ctx.px(mg.right);
        let vertical = ctx.px(mg.top) + ctx.px(mg.bottom);
        let inner = Size::new((avail.w - horizontal).max(0), (avail.h - vertical).max(0));
        let flow = self.flow.measure(m, ctx, inner);
        Size::new(avail.w, flow.h + vertical).clamp_to(avail)
    }

    fn render<C: Canvas>(&self, canvas: &mut C, ctx: &RenderContext, rect: Rect) {
        let content = self.content_rect(ctx, rect);
        log::debug!("root content box {:?} in {:?}", content, rect);
        self.flow.render(canvas, ctx, content);
    }
}

/// Margins declared by the canvas section, defaulting per side.
fn margins_for(canvas: &CanvasConfig) -> Edges {
    let d = Edges::default();
    match canvas.margin {
        Some(m) => Edges {
            top: m.top.unwrap_or(d.top).max(0),
            right: m.right.unwrap_or(d.right).max(0),
            bottom: m.bottom.unwrap_or(d.bottom).max(0),
            left: m.left.unwrap_or(d.left).max(0),
        },
        None => d,
    }
}

/// The supersampling factor to render at. Non-positive or non-finite
/// scales fall back to 1, large ones are capped.
pub fn effective_scale(requested: Option<f64>) -> f64 {
    match requested {
        None => 1.0,
        Some(s) if !s.is_finite() || s <= 0.0 => {
            log::warn!("ignoring invalid scale {}; rendering at 1x", s);
            1.0
        }
        Some(s) if s > MAX_SCALE => {
            log::warn!("scale {} exceeds {}; clamping", s, MAX_SCALE);
            MAX_SCALE
        }
        Some(s) => s,
    }
}

/// The target output width in pixels.
fn target_width(canvas: &CanvasConfig) -> i32 {
    match canvas.width {
        Some(w) if w > 0 => w,
        Some(w) => {
            log::warn!("ignoring non-positive width {}; using {}", w, config::WIDTH);
            config::WIDTH
        }
        None => config::WIDTH,
    }
}

/// Surface height from the preferred content height and the height policy.
/// All values are surface pixels except the configured bounds, which are
/// scaled through `ctx`.
pub fn surface_height(canvas: &CanvasConfig, ctx: &RenderContext, preferred: i32) -> i32 {
    let h = match canvas.height {
        HeightMode::Fixed(h) => ctx.px(h),
        HeightMode::Auto => {
            let mut h = preferred;
            if canvas.margin.is_none() {
                h += ctx.px(config::GAP_MEDIUM);
            }
            if let Some(min) = canvas.min_height {
                h = h.max(ctx.px(min));
            }
            if let Some(max) = canvas.max_height {
                h = h.min(ctx.px(max));
            }
            h
        }
    };
    h.max(1)
}

/// Lay out and draw a document into a single image of the canvas width.
pub fn render_document(doc: &Document, fonts: &FontContext) -> RgbaImage {
    let scale = effective_scale(doc.canvas.scale);
    let ctx = RenderContext::new(scale);
    let width = target_width(&doc.canvas);
    let render_width = ctx.px(width).max(1);

    let root = Root::from_document(doc);
    let preferred = root
        .measure(fonts, &ctx, Size::new(render_width, config::PROBE_HEIGHT))
        .h;
    let height = surface_height(&doc.canvas, &ctx, preferred);
    log::debug!(
        "probe: preferred height {} -> surface {}x{} at scale {}",
        preferred,
        render_width,
        height,
        scale
    );

    let background = doc.canvas.background.unwrap_or(palette::BACKGROUND);
    let mut canvas = RasterCanvas::new(render_width, height, fonts, Some(background));
    root.render(&mut canvas, &ctx, Rect::sized(render_width, height));
    let image = canvas.into_image();

    if (scale - 1.0).abs() < f64::EPSILON {
        return image;
    }
    let out_h = ((height as f64 / scale).round() as u32).max(1);
    log::debug!("downsampling {}x{} -> {}x{}", render_width, height, width, out_h);
    imageops::resize(&image, width as u32, out_h, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Margins;
    use crate::style::Properties;

    fn canvas(height: HeightMode) -> CanvasConfig {
        CanvasConfig {
            height,
            ..Default::default()
        }
    }

    #[test]
    fn auto_height_respects_max() {
        let mut c = canvas(HeightMode::Auto);
        c.max_height = Some(1200);
        assert_eq!(surface_height(&c, &RenderContext::default(), 5000), 1200);
    }

    #[test]
    fn auto_height_respects_min() {
        let mut c = canvas(HeightMode::Auto);
        c.min_height = Some(600);
        assert_eq!(surface_height(&c, &RenderContext::default(), 100), 600);
    }

    #[test]
    fn auto_height_adds_bottom_gap_without_margins() {
        let c = canvas(HeightMode::Auto);
        assert_eq!(surface_height(&c, &RenderContext::default(), 400), 408);
        let with_margins = CanvasConfig {
            margin: Some(Margins::default()),
            ..canvas(HeightMode::Auto)
        };
        assert_eq!(surface_height(&with_margins, &RenderContext::default(), 400), 400);
    }

    #[test]
    fn fixed_height_is_scaled() {
        let c = canvas(HeightMode::Fixed(300));
        assert_eq!(surface_height(&c, &RenderContext::new(2.0), 5000), 600);
    }

    #[test]
    fn scale_is_validated() {
        assert_eq!(effective_scale(None), 1.0);
        assert_eq!(effective_scale(Some(0.0)), 1.0);
        assert_eq!(effective_scale(Some(-2.0)), 1.0);
        assert_eq!(effective_scale(Some(f64::NAN)), 1.0);
        assert_eq!(effective_scale(Some(20.0)), MAX_SCALE);
        assert_eq!(effective_scale(Some(2.0)), 2.0);
    }

    #[test]
    fn partial_margins_default_per_side() {
        let c = CanvasConfig {
            margin: Some(Margins {
                top: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let m = margins_for(&c);
        assert_eq!(m.top, 0);
        assert_eq!(m.left, config::PADDING);
    }

    #[test]
    fn empty_document_is_just_margins() {
        let doc = Document::default();
        let root = Root::from_document(&doc);
        let fonts = FontContext::new();
        let size = root.measure(&fonts, &RenderContext::default(), Size::new(800, 10_000));
        assert_eq!(size, Size::new(800, 64));
    }

    #[test]
    fn probe_height_sums_children() {
        let spacer = |h: i32| {
            crate::model::Node::new(crate::model::NodeKind::Spacer).with_properties(Properties {
                height: Some(h),
                ..Default::default()
            })
        };
        let doc = Document {
            components: vec![spacer(100), spacer(50)],
            ..Default::default()
        };
        let root = Root::from_document(&doc);
        let fonts = FontContext::new();
        let size = root.measure(&fonts, &RenderContext::default(), Size::new(800, 10_000));
        // margins + children + one root gap
        assert_eq!(size.h, 32 + 100 + config::ROOT_GAP + 50 + 32);
    }

    #[test]
    fn capped_height_cuts_from_the_bottom() {
        let fixed = |h: i32| {
            crate::model::Node::new(crate::model::NodeKind::FixedBox).with_properties(Properties {
                width: Some(10),
                height: Some(h),
                ..Default::default()
            })
        };
        let mut doc = Document {
            components: vec![fixed(150), fixed(3000), fixed(2000)],
            ..Default::default()
        };
        doc.canvas.width = Some(400);
        doc.canvas.max_height = Some(1200);

        let root = Root::from_document(&doc);
        let fonts = FontContext::new();
        let ctx = RenderContext::default();
        let preferred = root.measure(&fonts, &ctx, Size::new(400, config::PROBE_HEIGHT)).h;
        let height = surface_height(&doc.canvas, &ctx, preferred);
        assert_eq!(height, 1200);

        let content = root.content_rect(&ctx, Rect::sized(400, height));
        assert_eq!(content, Rect::new(32, 32, 336, 1136));
        let heights: Vec<i32> = root.flow.layout(&fonts, &ctx, content).iter().map(|r| r.h).collect();
        // The first box keeps its full height; the second takes the rest.
        assert_eq!(heights, vec![150, 1136 - 150 - 2 * config::ROOT_GAP, 0]);
    }

    #[test]
    fn supersampled_render_has_target_size() {
        let mut doc = Document::default();
        doc.canvas.width = Some(200);
        doc.canvas.scale = Some(2.0);
        doc.canvas.height = HeightMode::Fixed(100);
        let img = render_document(&doc, &FontContext::new());
        assert_eq!(img.dimensions(), (200, 100));
    }
}
