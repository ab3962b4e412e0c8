//! # Font Management
//!
//! Faces are keyed by script class and weight. Each slot holds either a real
//! TrueType/OpenType face (metrics via ttf-parser, coverage bitmaps via
//! fontdue) or nothing, in which case measurement falls back to the built-in
//! Helvetica width table and text is measured but not painted.
//!
//! Faces come from three places, later ones overriding earlier ones:
//! the built-in table, system fonts found through fontdb, and fonts embedded
//! in the document.

pub mod metrics;

pub use metrics::StandardFontMetrics;

use std::collections::HashMap;

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::DashError;
use crate::model::FontEntry;

/// Which family of faces a run of text needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceClass {
    /// Latin and everything else the primary face covers.
    #[default]
    Default,
    /// Han, Kana, Hangul and Bopomofo.
    Cjk,
    /// Pictographic emoji.
    Emoji,
}

impl FaceClass {
    /// Built-in metrics treat ideographs and emoji as one em wide.
    fn is_wide(self) -> bool {
        !matches!(self, FaceClass::Default)
    }
}

/// A concrete font request: pixel size, weight and face class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub bold: bool,
    pub face: FaceClass,
}

impl FontSpec {
    pub fn new(size: f32, bold: bool) -> Self {
        Self {
            size,
            bold,
            face: FaceClass::Default,
        }
    }

    pub fn with_face(self, face: FaceClass) -> Self {
        Self { face, ..self }
    }

    pub fn with_bold(self, bold: bool) -> Self {
        Self { bold, ..self }
    }
}

/// Vertical metrics of one line of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    /// Height of the line box.
    pub height: f32,
}

/// Parsed metrics from a TrueType/OpenType font via ttf-parser.
#[derive(Debug, Clone)]
pub struct CustomFontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
    pub default_advance: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
}

impl CustomFontMetrics {
    /// Advance width of a character in pixels.
    pub fn char_width(&self, ch: char, font_size: f32) -> f32 {
        if metrics::is_zero_width(ch) {
            return 0.0;
        }
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        w as f32 / self.units_per_em as f32 * font_size
    }

    pub fn line_metrics(&self, font_size: f32) -> LineMetrics {
        let scale = font_size / self.units_per_em as f32;
        LineMetrics {
            ascent: self.ascender as f32 * scale,
            height: (self.ascender as f32 - self.descender as f32 + self.line_gap as f32) * scale,
        }
    }

    /// Parse metrics from font data using ttf-parser.
    pub fn from_font_data(data: &[u8], index: u32) -> Option<Self> {
        let face = ttf_parser::Face::parse(data, index).ok()?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
                subtable.codepoints(|code| {
                    let Some(ch) = char::from_u32(code) else {
                        return;
                    };
                    if let Some(glyph) = face.glyph_index(ch) {
                        let advance = face.glyph_hor_advance(glyph).unwrap_or(0);
                        advance_widths.insert(ch, advance);
                    }
                });
            }
        }

        let default_advance = advance_widths
            .get(&' ')
            .copied()
            .filter(|a| *a > 0)
            .unwrap_or(units_per_em / 2);

        Some(CustomFontMetrics {
            units_per_em,
            advance_widths,
            default_advance,
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
        })
    }
}

/// A parsed face: metrics for layout plus a rasterizer for painting.
pub struct LoadedFace {
    pub metrics: CustomFontMetrics,
    raster: fontdue::Font,
}

impl LoadedFace {
    pub fn parse(data: &[u8], index: u32) -> Result<Self, DashError> {
        let metrics = CustomFontMetrics::from_font_data(data, index)
            .ok_or_else(|| DashError::Font("not a TrueType/OpenType face".to_string()))?;
        let settings = fontdue::FontSettings {
            collection_index: index,
            ..fontdue::FontSettings::default()
        };
        let raster = fontdue::Font::from_bytes(data, settings)
            .map_err(|e| DashError::Font(e.to_string()))?;
        Ok(Self { metrics, raster })
    }

    /// Coverage bitmap for one glyph.
    pub fn rasterize(&self, ch: char, font_size: f32) -> (fontdue::Metrics, Vec<u8>) {
        self.raster.rasterize(ch, font_size)
    }
}

/// The metrics source a font request resolved to.
pub enum ResolvedFace<'a> {
    Loaded(&'a LoadedFace),
    Builtin(StandardFontMetrics),
}

impl ResolvedFace<'_> {
    pub fn char_width(&self, ch: char, spec: &FontSpec) -> f32 {
        match self {
            ResolvedFace::Loaded(face) => face.metrics.char_width(ch, spec.size),
            ResolvedFace::Builtin(m) => m.char_width(ch, spec.face.is_wide(), spec.size),
        }
    }

    pub fn line_metrics(&self, spec: &FontSpec) -> LineMetrics {
        match self {
            ResolvedFace::Loaded(face) => face.metrics.line_metrics(spec.size),
            ResolvedFace::Builtin(_) => LineMetrics {
                ascent: spec.size * metrics::BUILTIN_ASCENT,
                height: spec.size * metrics::BUILTIN_LINE_HEIGHT,
            },
        }
    }
}

/// Shared font context used by measurement and painting.
#[derive(Default)]
pub struct FontContext {
    faces: HashMap<(FaceClass, bool), LoadedFace>,
}

const CJK_FAMILIES: &[&str] = &[
    "Noto Sans CJK SC",
    "Noto Sans CJK JP",
    "Noto Sans SC",
    "Source Han Sans SC",
    "PingFang SC",
    "Hiragino Sans",
    "Microsoft YaHei",
    "WenQuanYi Micro Hei",
];

const EMOJI_FAMILIES: &[&str] = &[
    "Noto Emoji",
    "Noto Color Emoji",
    "Apple Color Emoji",
    "Segoe UI Emoji",
    "Twemoji",
];

impl FontContext {
    /// A context with built-in metrics only.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context populated from the system font database.
    ///
    /// `family` is tried first for the default class, then the generic
    /// sans-serif family. Classes with no match keep built-in metrics.
    pub fn with_system_fonts(family: Option<&str>) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("fontdb: {} system faces", db.len());

        let mut ctx = Self::new();
        for class in [FaceClass::Default, FaceClass::Cjk, FaceClass::Emoji] {
            let families: Vec<fontdb::Family> = match class {
                FaceClass::Default => family
                    .map(fontdb::Family::Name)
                    .into_iter()
                    .chain(std::iter::once(fontdb::Family::SansSerif))
                    .collect(),
                FaceClass::Cjk => CJK_FAMILIES.iter().copied().map(fontdb::Family::Name).collect(),
                FaceClass::Emoji => EMOJI_FAMILIES.iter().copied().map(fontdb::Family::Name).collect(),
            };
            for bold in [false, true] {
                let query = fontdb::Query {
                    families: &families,
                    weight: if bold {
                        fontdb::Weight::BOLD
                    } else {
                        fontdb::Weight::NORMAL
                    },
                    stretch: fontdb::Stretch::Normal,
                    style: fontdb::Style::Normal,
                };
                let Some(id) = db.query(&query) else {
                    log::debug!("no system face for {:?} (bold: {})", class, bold);
                    continue;
                };
                match db.with_face_data(id, LoadedFace::parse) {
                    Some(Ok(face)) => {
                        ctx.faces.insert((class, bold), face);
                    }
                    Some(Err(e)) => log::warn!("skipping system face for {:?}: {}", class, e),
                    None => log::warn!("system face for {:?} is unreadable", class),
                }
            }
        }
        ctx
    }

    /// Register raw font bytes for a class and weight.
    pub fn register(&mut self, class: FaceClass, bold: bool, data: &[u8]) -> Result<(), DashError> {
        let face = LoadedFace::parse(data, 0)?;
        self.faces.insert((class, bold), face);
        Ok(())
    }

    /// Register a document font entry.
    pub fn register_entry(&mut self, entry: &FontEntry) -> Result<(), DashError> {
        let data = read_font_source(&entry.src)?;
        self.register(entry.script, entry.bold, &data)
    }

    /// Whether any real face is loaded.
    pub fn has_faces(&self) -> bool {
        !self.faces.is_empty()
    }

    /// Find the face for a request: exact slot, the other weight of the same
    /// class, then the default class, then built-in metrics.
    pub fn resolve(&self, spec: &FontSpec) -> ResolvedFace<'_> {
        let candidates = [
            (spec.face, spec.bold),
            (spec.face, !spec.bold),
            (FaceClass::Default, spec.bold),
            (FaceClass::Default, !spec.bold),
        ];
        candidates
            .iter()
            .find_map(|key| self.faces.get(key))
            .map(ResolvedFace::Loaded)
            .unwrap_or_else(|| ResolvedFace::Builtin(StandardFontMetrics::for_weight(spec.bold)))
    }

    /// Width of a string in pixels, single face, no segmentation.
    pub fn text_width(&self, text: &str, spec: &FontSpec) -> f32 {
        let face = self.resolve(spec);
        text.chars().map(|ch| face.char_width(ch, spec)).sum()
    }

    pub fn line_metrics(&self, spec: &FontSpec) -> LineMetrics {
        self.resolve(spec).line_metrics(spec)
    }
}

/// Resolve a font source string to raw bytes.
///
/// Accepts a `data:` URI, an explicit file path (`/`, `./`, `../`), or raw
/// base64.
fn read_font_source(src: &str) -> Result<Vec<u8>, DashError> {
    if src.starts_with("data:") {
        let comma = src
            .find(',')
            .ok_or_else(|| DashError::Font("Invalid data URI: missing comma".to_string()))?;
        return base64_decode(&src[comma + 1..]);
    }

    if src.starts_with('/') || src.starts_with("./") || src.starts_with("../") {
        return std::fs::read(src)
            .map_err(|e| DashError::Font(format!("Failed to read font file '{}': {}", src, e)));
    }

    base64_decode(src)
}

fn base64_decode(input: &str) -> Result<Vec<u8>, DashError> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(&cleaned)
        .map_err(|e| DashError::Font(format!("Base64 decode error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_space_width() {
        let ctx = FontContext::new();
        let w = ctx.text_width(" ", &FontSpec::new(100.0, false));
        assert!((w - 27.8).abs() < 0.001);
    }

    #[test]
    fn bold_text_is_wider() {
        let ctx = FontContext::new();
        let regular = ctx.text_width("dashboard", &FontSpec::new(48.0, false));
        let bold = ctx.text_width("dashboard", &FontSpec::new(48.0, true));
        assert!(bold > regular);
    }

    #[test]
    fn cjk_builtin_is_full_width() {
        let ctx = FontContext::new();
        let spec = FontSpec::new(40.0, false).with_face(FaceClass::Cjk);
        assert!((ctx.text_width("中文", &spec) - 80.0).abs() < 0.001);
    }

    #[test]
    fn builtin_line_height_is_font_size() {
        let ctx = FontContext::new();
        let lm = ctx.line_metrics(&FontSpec::new(48.0, false));
        assert!((lm.height - 48.0).abs() < 0.001);
        assert!(lm.ascent < lm.height);
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let mut ctx = FontContext::new();
        assert!(ctx.register(FaceClass::Default, false, b"not a font").is_err());
        assert!(!ctx.has_faces());
    }

    #[test]
    fn bad_base64_source() {
        let err = read_font_source("data:font/ttf;base64,@@@").unwrap_err();
        assert!(err.to_string().contains("Base64"));
    }

    #[test]
    fn face_class_from_json() {
        let c: FaceClass = serde_json::from_str("\"cjk\"").unwrap();
        assert_eq!(c, FaceClass::Cjk);
    }
}
