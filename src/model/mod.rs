//! # Document Model
//!
//! The input representation for the renderer. A document is a list of
//! top-level nodes, a data context those nodes reference into, and a canvas
//! section that controls output width, margins, scale and height policy.
//!
//! Nodes are declarative: content fields may hold literals or references
//! (`"$.kpis[0].value"`), which are resolved against `data` when the element
//! tree is built. The model itself never touches the data.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::font::FaceClass;
use crate::style::{Color, Properties};

/// A complete document ready for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Top-level nodes, laid out as one vertical flow.
    #[serde(default, alias = "layout")]
    pub components: Vec<Node>,

    /// The data context references resolve against.
    #[serde(default)]
    pub data: Value,

    /// Output dimensions and margins.
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Fonts to register before layout.
    #[serde(default)]
    pub fonts: Vec<FontEntry>,
}

/// A node in the document tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// What kind of node this is, plus its kind-specific content fields.
    #[serde(flatten)]
    pub kind: NodeKind,

    /// Presentational and flex properties.
    #[serde(default)]
    pub properties: Properties,

    /// Reference (or literal) supplying this node's data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_ref: Option<Value>,

    /// Child nodes. Only meaningful for containers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// A node of the given kind with default properties and no children.
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            properties: Properties::default(),
            data_ref: None,
            children: vec![],
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_data_ref(mut self, data_ref: impl Into<Value>) -> Self {
        self.data_ref = Some(data_ref.into());
        self
    }
}

/// The closed set of node kinds.
///
/// Content fields are raw JSON values: a plain string is a literal, a string
/// starting with `$` or `.` (or a `{"$": path}` object) is a reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// A heading with an optional muted note below it.
    Title {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date_note: Option<Value>,
    },

    /// A block of text, truncated or wrapped to its box.
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<Value>,
    },

    /// A metric card: label, large value, signed delta.
    #[serde(alias = "kpi")]
    KpiCard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delta: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delta_label: Option<Value>,
    },

    /// A bordered panel showing one short value.
    Card {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },

    /// Tabular data with a header band.
    Table {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        headers: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<Value>,
    },

    /// Empty vertical space.
    Spacer,

    /// A box of fixed size that draws only its background.
    FixedBox,

    /// Horizontal flex container.
    Row,

    /// Vertical flex container.
    Column,

    /// Rows of `columns` equally growing cells.
    Grid,
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Target output width in pixels.
    pub width: Option<i32>,
    /// Supersampling factor. Rendering happens at `scale × width`, then the
    /// result is downscaled to `width`.
    pub scale: Option<f64>,
    /// Per-side margins around the root flow.
    pub margin: Option<Margins>,
    /// Height policy.
    pub height: HeightMode,
    /// Lower bound for auto height.
    pub min_height: Option<i32>,
    /// Upper bound for auto height.
    pub max_height: Option<i32>,
    /// Surface background.
    pub background: Option<Color>,
    /// Preferred font family for system font lookup.
    pub font_family: Option<String>,
}

/// Per-side margins. Missing sides take the default margin.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: Option<i32>,
    pub right: Option<i32>,
    pub bottom: Option<i32>,
    pub left: Option<i32>,
}

/// How the output height is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum HeightMode {
    /// Content height, clamped to `min_height`/`max_height`.
    #[default]
    Auto,
    /// Exactly this many pixels; overflowing content is cut.
    Fixed(i32),
}

impl<'de> Deserialize<'de> for HeightMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Keyword(String),
            Pixels(i32),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Keyword(k) if k.eq_ignore_ascii_case("auto") => Ok(HeightMode::Auto),
            Repr::Keyword(k) => Err(serde::de::Error::custom(format!(
                "height must be \"auto\" or a pixel count, got \"{}\"",
                k
            ))),
            Repr::Pixels(px) => Ok(HeightMode::Fixed(px.max(0))),
        }
    }
}

/// A font to register with the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontEntry {
    /// Base64-encoded font data, a data URI, or a file path.
    pub src: String,
    /// Whether this is the bold variant.
    #[serde(default)]
    pub bold: bool,
    /// Which script class this face covers.
    #[serde(default)]
    pub script: FaceClass,
}
