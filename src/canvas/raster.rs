//! Software raster backend over an `image::RgbaImage`.
//!
//! Shapes are anti-aliased analytically (signed distance to the rounded
//! box, sampled at pixel centers). Glyphs are fontdue coverage bitmaps
//! blended source-over. Layers are plain images composited with
//! `imageops::overlay`, which clips to the destination.

use image::{imageops, Pixel, Rgba, RgbaImage};

use super::Canvas;
use crate::font::{FontContext, FontSpec, ResolvedFace};
use crate::layout::{Rect, Size};
use crate::style::Color;
use crate::text::TextMeasure;

pub struct RasterCanvas<'f> {
    image: RgbaImage,
    fonts: &'f FontContext,
}

impl<'f> RasterCanvas<'f> {
    /// A surface of `width × height`, filled with `background` or left
    /// transparent.
    pub fn new(width: i32, height: i32, fonts: &'f FontContext, background: Option<Color>) -> Self {
        let (w, h) = (width.max(0) as u32, height.max(0) as u32);
        let image = match background {
            Some(bg) => RgbaImage::from_pixel(w, h, Rgba(bg.to_rgba())),
            None => RgbaImage::new(w, h),
        };
        Self { image, fonts }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Blend `color` at `(x, y)` with the given coverage in `0.0..=1.0`.
    fn blend(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if coverage <= 0.0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }
        let alpha = (color.a as f32 * coverage.min(1.0)).round() as u8;
        if alpha == 0 {
            return;
        }
        let src = Rgba([color.r, color.g, color.b, alpha]);
        self.image.get_pixel_mut(x, y).blend(&src);
    }
}

/// Signed distance from `(px, py)` to a rounded box. Negative inside.
fn rounded_box_distance(px: f32, py: f32, rect: &Rect, radius: f32) -> f32 {
    let hw = rect.w as f32 / 2.0;
    let hh = rect.h as f32 / 2.0;
    let cx = rect.x as f32 + hw;
    let cy = rect.y as f32 + hh;
    let qx = (px - cx).abs() - hw + radius;
    let qy = (py - cy).abs() - hh + radius;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}

impl TextMeasure for RasterCanvas<'_> {
    fn measure_text(&self, text: &str, font: &FontSpec) -> Size {
        self.fonts.measure_text(text, font)
    }
}

impl Canvas for RasterCanvas<'_> {
    fn width(&self) -> i32 {
        self.image.width() as i32
    }

    fn height(&self) -> i32 {
        self.image.height() as i32
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: &FontSpec, color: Color) {
        let face = match self.fonts.resolve(font) {
            ResolvedFace::Loaded(face) => face,
            ResolvedFace::Builtin(_) => {
                log::trace!("no face loaded for {:?}, skipping paint of {:?}", font.face, text);
                return;
            }
        };
        let baseline = y as f32 + face.metrics.line_metrics(font.size).ascent;
        let mut pen = x as f32;
        for ch in text.chars() {
            if !ch.is_whitespace() {
                let (m, coverage) = face.rasterize(ch, font.size);
                let gx = pen.round() as i32 + m.xmin;
                let gy = baseline.round() as i32 - m.height as i32 - m.ymin;
                for row in 0..m.height {
                    for col in 0..m.width {
                        let c = coverage[row * m.width + col] as f32 / 255.0;
                        self.blend(gx + col as i32, gy + row as i32, color, c);
                    }
                }
            }
            pen += face.metrics.char_width(ch, font.size);
        }
    }

    fn rounded_rect(&mut self, rect: Rect, radius: i32, fill: Option<Color>, outline: Option<Color>) {
        if rect.is_empty() {
            return;
        }
        let r = radius.clamp(0, rect.w.min(rect.h) / 2) as f32;
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + rect.w).min(self.width());
        let y1 = (rect.y + rect.h).min(self.height());

        for py in y0..y1 {
            for px in x0..x1 {
                let d = rounded_box_distance(px as f32 + 0.5, py as f32 + 0.5, &rect, r);
                let inside = (0.5 - d).clamp(0.0, 1.0);
                if let Some(color) = fill {
                    self.blend(px, py, color, inside);
                }
                if let Some(color) = outline {
                    // One-pixel stroke along the inside of the edge.
                    let inner = (0.5 - (d + 1.0)).clamp(0.0, 1.0);
                    self.blend(px, py, color, inside - inner);
                }
            }
        }
    }

    fn new_layer(&self, width: i32, height: i32) -> Self {
        RasterCanvas::new(width, height, self.fonts, None)
    }

    fn composite_layer(&mut self, layer: &Self, x: i32, y: i32) {
        imageops::overlay(&mut self.image, &layer.image, x as i64, y as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn fill_rect_covers_exactly_its_box() {
        let fonts = FontContext::new();
        let mut c = RasterCanvas::new(10, 10, &fonts, Some(Color::WHITE));
        c.fill_rect(Rect::new(2, 3, 4, 5), RED);
        assert_eq!(c.image().get_pixel(2, 3).0, [255, 0, 0, 255]);
        assert_eq!(c.image().get_pixel(5, 7).0, [255, 0, 0, 255]);
        assert_eq!(c.image().get_pixel(6, 3).0, [255, 255, 255, 255]);
        assert_eq!(c.image().get_pixel(2, 8).0, [255, 255, 255, 255]);
    }

    #[test]
    fn rounded_corners_are_softened() {
        let fonts = FontContext::new();
        let mut c = RasterCanvas::new(40, 40, &fonts, Some(Color::WHITE));
        c.rounded_rect(Rect::new(0, 0, 40, 40), 16, Some(RED), None);
        // The very corner is outside the arc, the center is solid.
        assert_eq!(c.image().get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(c.image().get_pixel(20, 20).0, [255, 0, 0, 255]);
    }

    #[test]
    fn outline_leaves_interior_untouched() {
        let fonts = FontContext::new();
        let mut c = RasterCanvas::new(20, 20, &fonts, Some(Color::WHITE));
        c.rounded_rect(Rect::new(0, 0, 20, 20), 0, None, Some(RED));
        assert_eq!(c.image().get_pixel(0, 10).0, [255, 0, 0, 255]);
        assert_eq!(c.image().get_pixel(10, 10).0, [255, 255, 255, 255]);
    }

    #[test]
    fn layers_composite_with_clipping() {
        let fonts = FontContext::new();
        let mut c = RasterCanvas::new(10, 10, &fonts, Some(Color::WHITE));
        let mut layer = c.new_layer(4, 4);
        layer.fill_rect(Rect::new(0, 0, 4, 4), RED);
        c.composite_layer(&layer, 8, 8);
        assert_eq!(c.image().get_pixel(9, 9).0, [255, 0, 0, 255]);
        assert_eq!(c.image().get_pixel(7, 7).0, [255, 255, 255, 255]);
    }

    #[test]
    fn transparent_layer_pixels_do_not_cover() {
        let fonts = FontContext::new();
        let mut c = RasterCanvas::new(4, 4, &fonts, Some(RED));
        let layer = c.new_layer(4, 4);
        c.composite_layer(&layer, 0, 0);
        assert_eq!(c.image().get_pixel(1, 1).0, [255, 0, 0, 255]);
    }
}
