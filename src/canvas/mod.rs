//! # Drawing Surface
//!
//! The boundary between layout and pixels. Widgets only ever talk to a
//! [`Canvas`]: they measure text through it, draw text and rounded boxes on
//! it, and containers use layers to keep each child inside its box.

pub mod raster;

pub use raster::RasterCanvas;

use crate::font::FontSpec;
use crate::layout::Rect;
use crate::style::Color;
use crate::text::TextMeasure;

pub trait Canvas: TextMeasure + Sized {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Draw a single-face string with the top of its line box at `y`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: &FontSpec, color: Color);

    /// Fill and/or outline a rectangle with rounded corners. The radius is
    /// clamped to half the shorter side.
    fn rounded_rect(&mut self, rect: Rect, radius: i32, fill: Option<Color>, outline: Option<Color>);

    /// A transparent surface of the given size sharing this canvas's fonts.
    fn new_layer(&self, width: i32, height: i32) -> Self;

    /// Draw `layer` over this canvas with its top-left at `(x, y)`.
    /// Pixels falling outside this canvas are dropped.
    fn composite_layer(&mut self, layer: &Self, x: i32, y: i32);

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.rounded_rect(rect, 0, Some(color), None);
    }
}
