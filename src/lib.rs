//! # dashprint
//!
//! A dashboard renderer: a declarative JSON node tree plus a data context
//! in, one raster image out.
//!
//! The node tree describes titles, KPI cards, tables and text arranged in
//! rows, columns and grids. Content fields either hold literals or point
//! into the data (`"$.kpis[0].value"`), so the same layout can be rendered
//! against fresh numbers every day. Layout is a single-line flexbox with
//! integer pixel arithmetic; text never overflows its box, it is truncated
//! with an ellipsis or wrapped into the lines that fit.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON)
//!       ↓
//!   [model]    Document: nodes, data, canvas settings
//!       ↓
//!   [layout::build]  bind data, produce an Element tree
//!       ↓
//!   [layout::root]   probe measure, pick height, render
//!       ↓
//!   [canvas]   RgbaImage surface (downscaled when supersampling)
//! ```

pub mod binding;
pub mod canvas;
pub mod config;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod style;
pub mod text;
pub mod widgets;

pub use error::DashError;

use image::RgbaImage;

use font::FontContext;
use model::Document;

/// Render a document to an image of the canvas width.
///
/// Never fails: missing data renders as empty content.
pub fn render(document: &Document, fonts: &FontContext) -> RgbaImage {
    layout::root::render_document(document, fonts)
}

/// Parse a document from JSON.
pub fn parse(json: &str) -> Result<Document, DashError> {
    Ok(serde_json::from_str(json)?)
}

/// Register the fonts a document embeds or references. A font that can't
/// be loaded is logged and skipped.
pub fn register_document_fonts(document: &Document, fonts: &mut FontContext) {
    for entry in &document.fonts {
        if let Err(e) = fonts.register_entry(entry) {
            log::warn!("skipping document font ({:?}, bold: {}): {}", entry.script, entry.bold, e);
        }
    }
}

/// Parse, register document fonts into `fonts`, and render.
pub fn render_json(json: &str, fonts: &mut FontContext) -> Result<RgbaImage, DashError> {
    let document = parse(json)?;
    register_document_fonts(&document, fonts);
    Ok(render(&document, fonts))
}
