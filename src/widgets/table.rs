//! Tables with a header band and rows that adapt to the box they get.
//!
//! The table doesn't scroll or paginate: when it is given less height than
//! its rows need, it either drops trailing rows to keep the rest legible
//! (`truncate`) or squeezes every row (`shrink`).

use crate::canvas::Canvas;
use crate::config::{self, palette};
use crate::font::FontSpec;
use crate::layout::{Rect, RenderContext, Size, Widget};
use crate::style::{FontRole, TableFit};
use crate::text::{self, TextMeasure};

/// How many rows to draw and how tall each one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPlan {
    pub rows: usize,
    pub row_height: i32,
}

impl RowPlan {
    /// Fit `row_count` rows into `content_height` pixels.
    ///
    /// Truncate mode keeps rows between `min_row` and `max_row` tall,
    /// dropping trailing rows when even `min_row` doesn't fit them all.
    /// Shrink mode always keeps every row and divides the space evenly.
    pub fn compute(
        fit: TableFit,
        content_height: i32,
        row_count: usize,
        min_row: i32,
        max_row: i32,
    ) -> RowPlan {
        let content_height = content_height.max(0);
        if row_count == 0 {
            return RowPlan {
                rows: 0,
                row_height: 0,
            };
        }
        let n = row_count as i32;
        let ideal = content_height / n;

        match fit {
            TableFit::Shrink => RowPlan {
                rows: row_count,
                row_height: ideal,
            },
            TableFit::Truncate if ideal < min_row => {
                let kept = if content_height > 0 && min_row > 0 {
                    (content_height / min_row).max(1)
                } else {
                    0
                };
                let row_height = if kept > 0 {
                    min_row.max(content_height / kept)
                } else {
                    min_row
                };
                RowPlan {
                    rows: (kept as usize).min(row_count),
                    row_height,
                }
            }
            TableFit::Truncate if ideal > max_row => RowPlan {
                rows: row_count,
                row_height: max_row,
            },
            TableFit::Truncate => RowPlan {
                rows: row_count,
                row_height: ideal,
            },
        }
    }
}

/// Split `available` pixels into `n` columns.
///
/// Even split with the remainder going to the leftmost columns, then the
/// first column gets `bonus` extra and each of the last two columns (other
/// than the first) gives up `cut`, never going below `min_width`.
pub fn column_widths(available: i32, n: usize, bonus: i32, cut: i32, min_width: i32) -> Vec<i32> {
    if n == 0 {
        return vec![];
    }
    let available = available.max(0);
    let count = n as i32;
    let base = available / count;
    let rem = (available % count) as usize;
    (0..n)
        .map(|i| {
            let w = base + i32::from(i < rem);
            if i == 0 {
                w + bonus
            } else if i + 2 >= n {
                (w - cut).max(min_width)
            } else {
                w
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableWidget {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub fit: TableFit,
    /// Base-pixel heights.
    pub header_height: i32,
    pub row_height: i32,
    pub min_row_height: i32,
    pub max_row_height: i32,
}

impl Default for TableWidget {
    fn default() -> Self {
        Self {
            headers: vec![],
            rows: vec![],
            fit: TableFit::Truncate,
            header_height: config::TABLE_HEADER_HEIGHT,
            row_height: config::TABLE_ROW_HEIGHT,
            min_row_height: config::TABLE_MIN_ROW_HEIGHT,
            max_row_height: config::TABLE_MAX_ROW_HEIGHT,
        }
    }
}

impl TableWidget {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            rows,
            ..Default::default()
        }
    }

    fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// Row plan for a table drawn into a box of height `h`.
    pub fn plan(&self, ctx: &RenderContext, h: i32) -> RowPlan {
        let content = h - ctx.px(self.header_height) - 2 * ctx.px(config::TABLE_PADDING);
        RowPlan::compute(
            self.fit,
            content,
            self.rows.len(),
            ctx.px(self.min_row_height),
            ctx.px(self.max_row_height),
        )
    }

    fn draw_row<C: Canvas>(
        &self,
        canvas: &mut C,
        ctx: &RenderContext,
        cells: &[String],
        widths: &[i32],
        band: Rect,
        fonts: (FontSpec, FontSpec),
    ) {
        let (first_font, font) = fonts;
        let cell_pad = ctx.px(config::TABLE_CELL_PADDING);
        let mut x = band.x;
        for (i, w) in widths.iter().enumerate() {
            let font = if i == 0 { first_font } else { font };
            let font = fit_font_to_height(canvas, font, band.h);
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let avail = (w - 2 * cell_pad).max(0);
            let shown = text::truncate(canvas, cell, &font, avail);
            if !shown.is_empty() {
                let lh = text::line_height(canvas, &font);
                let y = band.y + (band.h - lh) / 2;
                text::draw_runs(canvas, &shown, x + cell_pad, y, &font, palette::FOREGROUND);
            }
            x += w;
        }
    }
}

/// Scale a font down so one line fits in `height`.
fn fit_font_to_height<M: TextMeasure + ?Sized>(m: &M, font: FontSpec, height: i32) -> FontSpec {
    let lh = text::line_height(m, &font);
    if lh <= height || lh == 0 {
        return font;
    }
    FontSpec {
        size: font.size * height.max(0) as f32 / lh as f32,
        ..font
    }
}

impl Widget for TableWidget {
    fn measure<M: TextMeasure>(&self, _m: &M, ctx: &RenderContext, avail: Size) -> Size {
        let h = ctx.px(self.header_height)
            + self.rows.len() as i32 * ctx.px(self.row_height)
            + 2 * ctx.px(config::TABLE_PADDING);
        Size::new(avail.w, h).clamp_to(avail)
    }

    fn render<C: Canvas>(&self, canvas: &mut C, ctx: &RenderContext, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let pad = ctx.px(config::TABLE_PADDING);
        canvas.rounded_rect(
            rect,
            ctx.px(config::CARD_RADIUS),
            Some(palette::CARD_BACKGROUND),
            Some(palette::BORDER),
        );

        let inner = rect.inset(pad);
        let widths = column_widths(
            inner.w,
            self.column_count(),
            ctx.px(config::TABLE_FIRST_COLUMN_BONUS),
            ctx.px(config::TABLE_TRAILING_COLUMN_CUT),
            ctx.px(config::TABLE_MIN_COLUMN_WIDTH),
        );
        let body_font = ctx.font(FontRole::Table);
        let bold_font = body_font.with_bold(true);

        let header_h = ctx.px(self.header_height).min(inner.h);
        let header = Rect::new(inner.x, inner.y, inner.w, header_h);
        if !header.is_empty() {
            canvas.rounded_rect(header, ctx.px(config::CARD_RADIUS), Some(palette::MUTED), None);
            if !self.headers.is_empty() {
                self.draw_row(canvas, ctx, &self.headers, &widths, header, (bold_font, bold_font));
            }
        }

        let plan = self.plan(ctx, rect.h);
        log::debug!(
            "table: {} of {} rows at {}px ({:?})",
            plan.rows,
            self.rows.len(),
            plan.row_height,
            self.fit
        );
        if plan.row_height <= 0 {
            return;
        }
        let mut y = header.y + header.h;
        for (i, row) in self.rows.iter().take(plan.rows).enumerate() {
            let band = Rect::new(inner.x, y, inner.w, plan.row_height);
            if i % 2 == 1 {
                canvas.fill_rect(band, palette::MUTED);
            }
            self.draw_row(canvas, ctx, row, &widths, band, (bold_font, body_font));
            y += plan.row_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;

    #[test]
    fn shrink_keeps_every_row() {
        let plan = RowPlan::compute(TableFit::Shrink, 100, 10, 28, 90);
        assert_eq!(
            plan,
            RowPlan {
                rows: 10,
                row_height: 10
            }
        );
    }

    #[test]
    fn truncate_within_bounds_uses_ideal() {
        let plan = RowPlan::compute(TableFit::Truncate, 400, 8, 28, 90);
        assert_eq!(plan, RowPlan { rows: 8, row_height: 50 });
    }

    #[test]
    fn truncate_drops_rows_below_minimum() {
        // 100 / 10 = 10 < 28: keep 100 / 28 = 3 rows of max(28, 33) px.
        let plan = RowPlan::compute(TableFit::Truncate, 100, 10, 28, 90);
        assert_eq!(plan, RowPlan { rows: 3, row_height: 33 });
    }

    #[test]
    fn truncate_keeps_one_row_when_space_is_tight() {
        let plan = RowPlan::compute(TableFit::Truncate, 20, 5, 28, 90);
        assert_eq!(plan, RowPlan { rows: 1, row_height: 28 });
        let plan = RowPlan::compute(TableFit::Truncate, 0, 5, 28, 90);
        assert_eq!(plan.rows, 0);
    }

    #[test]
    fn truncate_caps_tall_rows() {
        let plan = RowPlan::compute(TableFit::Truncate, 1000, 2, 28, 90);
        assert_eq!(plan, RowPlan { rows: 2, row_height: 90 });
    }

    #[test]
    fn no_rows_no_plan() {
        let plan = RowPlan::compute(TableFit::Truncate, 500, 0, 28, 90);
        assert_eq!(plan.rows, 0);
    }

    #[test]
    fn column_width_adjustments() {
        assert_eq!(column_widths(400, 4, 30, 15, 50), vec![130, 100, 85, 85]);
        assert_eq!(column_widths(10, 3, 30, 15, 50), vec![34, 50, 50]);
        assert_eq!(column_widths(301, 3, 30, 15, 50), vec![131, 85, 85]);
        assert_eq!(column_widths(200, 1, 30, 15, 50), vec![230]);
        assert!(column_widths(200, 0, 30, 15, 50).is_empty());
    }

    #[test]
    fn measure_uses_natural_row_height() {
        let fonts = FontContext::new();
        let rows = vec![vec!["a".to_string()]; 5];
        let t = TableWidget::new(vec!["H".to_string()], rows);
        let ctx = RenderContext::default();
        assert_eq!(
            t.measure(&fonts, &ctx, Size::new(800, 10_000)),
            Size::new(800, 70 + 5 * 60 + 40)
        );
        assert_eq!(t.measure(&fonts, &ctx, Size::new(800, 200)).h, 200);
    }

    #[test]
    fn plan_accounts_for_header_and_padding() {
        let rows = vec![vec!["a".to_string()]; 10];
        let t = TableWidget {
            fit: TableFit::Shrink,
            ..TableWidget::new(vec![], rows)
        };
        // 210 - 70 - 40 leaves 100px for 10 rows.
        let plan = t.plan(&RenderContext::default(), 210);
        assert_eq!(plan.row_height, 10);
        assert_eq!(plan.rows, 10);
    }
}
