//! # Node Properties
//!
//! The presentational and flex properties a node can carry. One flat bag of
//! optional fields shared by every node kind: each widget reads the fields it
//! understands and ignores the rest, and the container that owns a node reads
//! the flex-item fields (`grow`, `shrink`, `basis`, `align_self`, ...).
//!
//! All pixel values here are *base* pixels. They are multiplied by the render
//! scale at measure/render time, never stored pre-scaled.

use serde::{Deserialize, Deserializer, Serialize};

/// The complete set of optional properties for a node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Properties {
    // ── Flex container ─────────────────────────────────────────
    /// Space between children along the main axis.
    pub gap: Option<i32>,
    /// Uniform inner padding.
    pub padding: Option<i32>,
    /// Cross-axis alignment of children.
    pub align_items: Option<AlignItems>,
    /// Main-axis distribution of leftover space.
    pub justify_content: Option<JustifyContent>,
    /// Number of cells per row (grid only).
    pub columns: Option<usize>,
    /// Render each child into its own layer (default true).
    pub clip_children: Option<bool>,

    // ── Flex item ──────────────────────────────────────────────
    /// Flex grow factor.
    pub grow: Option<f64>,
    /// Flex shrink factor.
    pub shrink: Option<f64>,
    /// Explicit main-axis size overriding the measured size.
    pub basis: Option<i32>,
    /// Override of the parent's `align_items` for this child.
    pub align_self: Option<AlignItems>,
    /// Relative width inside a row (treated as a grow weight).
    pub width_ratio: Option<f64>,
    /// Take the remaining height inside a column.
    pub fill_remaining: Option<bool>,

    // ── Box ────────────────────────────────────────────────────
    /// Explicit width (fixed boxes, spacers).
    pub width: Option<i32>,
    /// Explicit height (fixed boxes, spacers, column basis).
    pub height: Option<i32>,
    /// Background fill.
    pub bg_fill: Option<Color>,
    /// Background outline.
    pub bg_outline: Option<Color>,
    /// Corner radius of the background.
    pub bg_radius: Option<i32>,

    // ── Text ───────────────────────────────────────────────────
    /// Named font role.
    pub font: Option<FontRole>,
    /// Heading size for titles (`h1`..`h4`, `body`).
    pub size: Option<TitleSize>,
    /// Font weight override.
    pub weight: Option<FontWeight>,
    /// Horizontal text alignment.
    pub align: Option<TextAlign>,
    /// Text color.
    pub color: Option<Color>,
    /// Wrap text onto multiple lines instead of truncating.
    pub wrap: Option<bool>,

    // ── Table ──────────────────────────────────────────────────
    /// How rows adapt to the table's box.
    pub fit: Option<TableFit>,
    /// Smallest row height in truncate mode.
    pub min_row_height: Option<i32>,
    /// Largest row height in truncate mode.
    pub max_row_height: Option<i32>,
    /// Height of the header band.
    pub header_height: Option<i32>,
    /// Natural row height used when measuring.
    pub row_height: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Row,
    #[default]
    Column,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignItems {
    #[serde(alias = "flex-start")]
    Start,
    Center,
    #[serde(alias = "flex-end")]
    End,
    #[default]
    Stretch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    #[default]
    #[serde(alias = "flex-start")]
    Start,
    #[serde(alias = "flex-end")]
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// X offset of a run of `content_w` pixels inside a span of `span_w`.
    pub fn offset(self, span_w: i32, content_w: i32) -> i32 {
        let slack = (span_w - content_w).max(0);
        match self {
            TextAlign::Left => 0,
            TextAlign::Center => slack / 2,
            TextAlign::Right => slack,
        }
    }
}

/// Named typographic roles. Each maps to a base size and weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    Title,
    Heading,
    H3,
    H4,
    Number,
    #[default]
    Body,
    Table,
    Caption,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleSize {
    #[default]
    H1,
    H2,
    H3,
    H4,
    Body,
}

impl TitleSize {
    pub fn role(self) -> FontRole {
        match self {
            TitleSize::H1 => FontRole::Title,
            TitleSize::H2 => FontRole::Heading,
            TitleSize::H3 => FontRole::H3,
            TitleSize::H4 => FontRole::H4,
            TitleSize::Body => FontRole::Body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFit {
    /// Keep rows legible: drop trailing rows below `min_row_height`.
    #[default]
    Truncate,
    /// Show every row, however short.
    Shrink,
}

/// A rounded background box drawn behind a container or box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub fill: Option<Color>,
    pub outline: Option<Color>,
    /// Corner radius in base pixels.
    pub radius: i32,
}

impl Background {
    /// The background a node asks for, or `None` if it has neither a fill
    /// nor an outline.
    pub fn from_properties(props: &Properties, default_radius: i32) -> Option<Self> {
        if props.bg_fill.is_none() && props.bg_outline.is_none() {
            return None;
        }
        Some(Background {
            fill: props.bg_fill,
            outline: props.bg_outline,
            radius: props.bg_radius.unwrap_or(default_radius),
        })
    }
}

/// An RGBA color with 8-bit channels.
///
/// Deserializes from `"#rgb"`, `"#rgba"`, `"#rrggbb"`, `"#rrggbbaa"` or an
/// `[r, g, b]` / `[r, g, b, a]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a hex color. Returns `None` for anything that isn't one.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if expanded.len() == 8 { channel(6)? } else { 255 },
        })
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Channels(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Color::from_hex(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{}'", s))),
            Repr::Channels(c) => match c.as_slice() {
                [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Color { r: *r, g: *g, b: *b, a: *a }),
                _ => Err(serde::de::Error::custom(
                    "color arrays need 3 or 4 channels",
                )),
            },
        }
    }
}
