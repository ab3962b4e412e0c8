//! Leaf widgets. Each holds already-resolved content; data binding
//! happens when the element tree is built, not while drawing.

pub mod card;
pub mod kpi;
pub mod spacer;
pub mod table;
pub mod text;
pub mod title;

pub use card::CardWidget;
pub use kpi::KpiCard;
pub use spacer::{FixedBox, Spacer};
pub use table::{RowPlan, TableWidget};
pub use text::TextWidget;
pub use title::TitleWidget;

use crate::font::FontSpec;
use crate::style::FontWeight;

/// Apply an explicit weight to a role's font.
fn apply_weight(font: FontSpec, weight: Option<FontWeight>) -> FontSpec {
    match weight {
        Some(FontWeight::Bold) => font.with_bold(true),
        Some(FontWeight::Normal) => font.with_bold(false),
        None => font,
    }
}
