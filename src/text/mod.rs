//! # Text Fitting
//!
//! Truncation, greedy wrapping and multi-line fitting on top of a
//! measurement oracle. Every measurement here goes through
//! [`measure_runs`], so mixed-script strings are sized with the face each
//! run will actually be drawn with.
//!
//! Line breaking uses the Unicode Line Breaking Algorithm (UAX#14) via the
//! `unicode-linebreak` crate: words break at spaces, ideographs break
//! between characters, and `\n` forces a break.

pub mod script;

use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::canvas::Canvas;
use crate::font::{FontContext, FontSpec};
use crate::layout::Size;
use crate::style::Color;
pub use script::{classify, segment_runs, TextRun};

pub const ELLIPSIS: &str = "...";

/// Measures a single-face string. Implemented by every canvas backend.
pub trait TextMeasure {
    /// Width and line height of `text` drawn with `font`, in whole pixels.
    /// Empty text measures `(0, 0)`.
    fn measure_text(&self, text: &str, font: &FontSpec) -> Size;
}

impl TextMeasure for FontContext {
    fn measure_text(&self, text: &str, font: &FontSpec) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        Size::new(
            self.text_width(text, font).ceil() as i32,
            self.line_metrics(font).height.ceil() as i32,
        )
    }
}

/// Size of `text` with each script run measured in its own face.
/// Width is the cumulative advance; height is the tallest run.
pub fn measure_runs<M: TextMeasure + ?Sized>(m: &M, text: &str, font: &FontSpec) -> Size {
    segment_runs(text).iter().fold(Size::default(), |acc, run| {
        let s = m.measure_text(run.text, &font.with_face(run.face));
        Size::new(acc.w + s.w, acc.h.max(s.h))
    })
}

/// Height of one line of text in `font`.
pub fn line_height<M: TextMeasure + ?Sized>(m: &M, font: &FontSpec) -> i32 {
    m.measure_text("Ag", font).h
}

/// Draw `text` run by run starting at `(x, y)` (top-left of the line box).
pub fn draw_runs<C: Canvas>(canvas: &mut C, text: &str, x: i32, y: i32, font: &FontSpec, color: Color) {
    let mut pen = x;
    for run in segment_runs(text) {
        let run_font = font.with_face(run.face);
        canvas.draw_text(run.text, pen, y, &run_font, color);
        pen += canvas.measure_text(run.text, &run_font).w;
    }
}

/// Shorten `text` to fit `max_width`, ending in `...` when anything was cut.
///
/// Surrounding whitespace is trimmed first. The longest character prefix
/// that fits together with the ellipsis is found by binary search. If the
/// ellipsis alone doesn't fit, the ellipsis is returned anyway.
pub fn truncate<M: TextMeasure + ?Sized>(m: &M, text: &str, font: &FontSpec, max_width: i32) -> String {
    if max_width <= 0 {
        return String::new();
    }
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    if measure_runs(m, text, font).w <= max_width {
        return text.to_string();
    }

    let available = max_width - measure_runs(m, ELLIPSIS, font).w;
    if available <= 0 {
        return ELLIPSIS.to_string();
    }

    // bounds[k] is the byte offset just past the k-th character.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .chain(std::iter::once(text.len()))
        .collect();

    let (mut lo, mut hi) = (0usize, bounds.len());
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        if measure_runs(m, &text[..bounds[mid - 1]], font).w <= available {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    let kept = if lo == 0 { "" } else { &text[..bounds[lo - 1]] };
    log::trace!(
        "truncated {} chars to {} for width {}",
        text.chars().count(),
        lo,
        max_width
    );
    format!("{}{}", kept, ELLIPSIS)
}

/// Greedy word wrap over UAX#14 break opportunities.
///
/// A line is extended while it fits; a segment that overflows starts a new
/// line, and a segment wider than `max_width` on its own is truncated in
/// place. Mandatory breaks always end the current line.
pub fn wrap<M: TextMeasure + ?Sized>(m: &M, text: &str, font: &FontSpec, max_width: i32) -> Vec<String> {
    let mut lines = Vec::new();
    if max_width <= 0 {
        return lines;
    }
    let text = text.trim();
    let fits = |s: &str| measure_runs(m, s.trim_end(), font).w <= max_width;

    let mut current = String::new();
    let mut start = 0;
    for (idx, opp) in linebreaks(text) {
        let segment = &text[start..idx];
        start = idx;

        let mut candidate = current.clone();
        candidate.push_str(segment);
        if fits(&candidate) {
            current = candidate;
        } else {
            if !current.trim().is_empty() {
                lines.push(current.trim_end().to_string());
            }
            current.clear();
            if fits(segment) {
                current.push_str(segment);
            } else {
                lines.push(truncate(m, segment, font, max_width));
            }
        }

        if opp == BreakOpportunity::Mandatory {
            let line = current.trim_end();
            if idx < text.len() || !line.is_empty() {
                lines.push(line.to_string());
            }
            current.clear();
        }
    }

    if !current.trim().is_empty() {
        lines.push(current.trim_end().to_string());
    }
    lines
}

/// Wrap `text` and keep as many lines as fit in `max_height`.
///
/// At least one line is always kept. When lines are dropped the last kept
/// line is re-truncated so it ends with an ellipsis.
pub fn fit_lines<M: TextMeasure + ?Sized>(
    m: &M,
    text: &str,
    font: &FontSpec,
    max_width: i32,
    max_height: i32,
) -> Vec<String> {
    if max_width <= 0 || max_height <= 0 {
        return vec![];
    }
    let mut lines = wrap(m, text, font, max_width);
    let lh = line_height(m, font).max(1);
    let max_lines = (max_height / lh).max(1) as usize;

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = force_ellipsis(m, last, font, max_width);
        }
    }
    lines
}

/// Truncate so the result ends with an ellipsis even if the line fits.
fn force_ellipsis<M: TextMeasure + ?Sized>(m: &M, line: &str, font: &FontSpec, max_width: i32) -> String {
    let with_ellipsis = format!("{}{}", line.trim_end(), ELLIPSIS);
    truncate(m, &with_ellipsis, font, max_width)
}
