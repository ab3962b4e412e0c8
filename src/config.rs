//! Base dimensions, typography and palette.
//!
//! Everything here is expressed in base pixels at scale 1. The render
//! context multiplies these at measure/render time.

use crate::style::{Color, FontRole};

/// Target output width when the document doesn't set one.
pub const WIDTH: i32 = 1920;
/// Default margin around the root flow.
pub const PADDING: i32 = 32;
pub const CARD_RADIUS: i32 = 8;

/// Default spacer height, grid gap and title-to-note spacing.
pub const GAP_MEDIUM: i32 = 8;

/// Gap between top-level components in the root flow.
pub const ROOT_GAP: i32 = 10;

/// Height hint for the probe pass. Large enough to never constrain content.
pub const PROBE_HEIGHT: i32 = 10_000_000;

/// Height of a plain card.
pub const CARD_HEIGHT: i32 = 150;
/// Inset of a plain card's value from its edges.
pub const CARD_PADDING: i32 = 20;

pub const KPI_PADDING: i32 = 24;
pub const KPI_GAP: i32 = 12;

pub const TABLE_HEADER_HEIGHT: i32 = 70;
pub const TABLE_ROW_HEIGHT: i32 = 60;
pub const TABLE_MIN_ROW_HEIGHT: i32 = 28;
pub const TABLE_MAX_ROW_HEIGHT: i32 = 90;
/// Outer padding of a table card, applied on every side.
pub const TABLE_PADDING: i32 = 20;
/// Horizontal padding inside each cell.
pub const TABLE_CELL_PADDING: i32 = 16;
pub const TABLE_FIRST_COLUMN_BONUS: i32 = 30;
pub const TABLE_TRAILING_COLUMN_CUT: i32 = 15;
pub const TABLE_MIN_COLUMN_WIDTH: i32 = 50;

/// Vertical padding above and below a title.
pub const TITLE_PADDING_V: i32 = 8;

/// Base font size and weight for each role.
pub fn role_metrics(role: FontRole) -> (f32, bool) {
    match role {
        FontRole::Title => (84.0, true),
        FontRole::Heading => (60.0, true),
        FontRole::H3 => (52.0, true),
        FontRole::H4 => (44.0, true),
        FontRole::Number => (80.0, true),
        FontRole::Body => (48.0, false),
        FontRole::Table => (48.0, false),
        FontRole::Caption => (40.0, false),
    }
}

/// Default palette.
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const MUTED: Color = Color::rgb(0xf1, 0xf5, 0xf9);
    pub const BORDER: Color = Color::rgb(0xd1, 0xd5, 0xdb);
    pub const FOREGROUND: Color = Color::rgb(0x0f, 0x17, 0x2a);
    pub const MUTED_FOREGROUND: Color = Color::rgb(0x64, 0x74, 0x8b);
    pub const SECONDARY: Color = Color::rgb(0xf1, 0xf5, 0xf9);
    pub const DESTRUCTIVE: Color = Color::rgb(0xef, 0x44, 0x44);
    pub const SUCCESS: Color = Color::rgb(0x22, 0xc5, 0x5e);
    pub const CARD_BACKGROUND: Color = Color::rgb(0xff, 0xff, 0xff);
}
