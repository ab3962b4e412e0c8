//! Built-in glyph metrics.
//!
//! Advance widths for Helvetica and Helvetica-Bold in 1/1000 em, taken from
//! the Adobe AFM files. These are used when no real face is loaded for a
//! class, which keeps measurement deterministic in tests and on machines
//! without system fonts.

/// Advance widths for printable ASCII, indexed by `code - 32`.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
    389, 280, 389, 584, // {..~
];

/// Baseline position within the line box, as a fraction of the font size.
pub const BUILTIN_ASCENT: f32 = 0.756;
/// Line box height as a fraction of the font size.
pub const BUILTIN_LINE_HEIGHT: f32 = 1.0;

/// Width table for the built-in face.
#[derive(Debug, Clone, Copy)]
pub struct StandardFontMetrics {
    widths: &'static [u16; 95],
    /// Width of a non-ASCII character of ordinary (Latin-like) width.
    fallback: u16,
}

impl StandardFontMetrics {
    pub const fn regular() -> Self {
        Self {
            widths: &HELVETICA,
            fallback: 556,
        }
    }

    pub const fn bold() -> Self {
        Self {
            widths: &HELVETICA_BOLD,
            fallback: 611,
        }
    }

    pub fn for_weight(bold: bool) -> Self {
        if bold {
            Self::bold()
        } else {
            Self::regular()
        }
    }

    /// Advance of `ch` in 1/1000 em. `wide` marks ideographs and emoji,
    /// which take a full em.
    pub fn advance(&self, ch: char, wide: bool) -> u16 {
        let code = ch as u32;
        if (32..=126).contains(&code) {
            self.widths[(code - 32) as usize]
        } else if ch.is_control() || is_zero_width(ch) {
            0
        } else if wide {
            1000
        } else {
            self.fallback
        }
    }

    pub fn char_width(&self, ch: char, wide: bool, font_size: f32) -> f32 {
        self.advance(ch, wide) as f32 * font_size / 1000.0
    }
}

/// Variation selectors and joiners take no horizontal space.
pub fn is_zero_width(ch: char) -> bool {
    matches!(ch as u32, 0x200B..=0x200D | 0xFE00..=0xFE0F | 0x2060)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lookups() {
        let m = StandardFontMetrics::regular();
        assert_eq!(m.advance(' ', false), 278);
        assert_eq!(m.advance('A', false), 667);
        assert_eq!(m.advance('~', false), 584);
        assert_eq!(m.advance('.', false), 278);
    }

    #[test]
    fn bold_is_wider_for_lowercase() {
        let r = StandardFontMetrics::regular();
        let b = StandardFontMetrics::bold();
        assert!(b.advance('b', false) > r.advance('b', false));
    }

    #[test]
    fn wide_and_zero_width() {
        let m = StandardFontMetrics::regular();
        assert_eq!(m.advance('中', true), 1000);
        assert_eq!(m.advance('\u{FE0F}', false), 0);
        assert_eq!(m.advance('é', false), 556);
    }
}
