//! Script segmentation.
//!
//! Splits text into maximal runs that need the same face class, so a Latin
//! face never has to draw ideographs or emoji. Characters that belong to no
//! particular script (spaces, digits, punctuation, joiners) stay with the
//! run they appear in.

use unicode_script::{Script, UnicodeScript};

use crate::font::FaceClass;

/// A slice of text drawn with one face class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub face: FaceClass,
}

fn is_emoji(ch: char) -> bool {
    matches!(ch as u32, 0x1F300..=0x1FAFF | 0x2600..=0x27BF | 0xFE0F)
}

/// The face class a character needs, or `None` if any face will do.
pub fn classify(ch: char) -> Option<FaceClass> {
    if is_emoji(ch) {
        return Some(FaceClass::Emoji);
    }
    match ch.script() {
        Script::Han | Script::Hiragana | Script::Katakana | Script::Hangul | Script::Bopomofo => {
            Some(FaceClass::Cjk)
        }
        Script::Common | Script::Inherited | Script::Unknown => None,
        _ => Some(FaceClass::Default),
    }
}

/// Partition `text` into face-class runs. Neutral characters at the start
/// join the first classified run; a fully neutral string is one default run.
pub fn segment_runs(text: &str) -> Vec<TextRun<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<FaceClass> = None;

    for (idx, ch) in text.char_indices() {
        let Some(class) = classify(ch) else {
            continue;
        };
        match current {
            None => current = Some(class),
            Some(c) if c == class => {}
            Some(c) => {
                runs.push(TextRun {
                    text: &text[start..idx],
                    face: c,
                });
                start = idx;
                current = Some(class);
            }
        }
    }

    if start < text.len() {
        runs.push(TextRun {
            text: &text[start..],
            face: current.unwrap_or_default(),
        });
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_is_one_run() {
        let runs = segment_runs("Revenue 2024");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].face, FaceClass::Default);
    }

    #[test]
    fn mixed_scripts_split() {
        let runs = segment_runs("Sales 销售额 🚀");
        let faces: Vec<FaceClass> = runs.iter().map(|r| r.face).collect();
        assert_eq!(faces, vec![FaceClass::Default, FaceClass::Cjk, FaceClass::Emoji]);
        assert_eq!(runs[0].text, "Sales ");
        assert_eq!(runs[1].text, "销售额 ");
        assert_eq!(runs[2].text, "🚀");
    }

    #[test]
    fn runs_cover_the_whole_string() {
        let text = "12 東京 and ソウル ✨ ok";
        let joined: String = segment_runs(text).iter().map(|r| r.text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn neutral_only_and_empty() {
        assert_eq!(
            segment_runs("123 - 456"),
            vec![TextRun {
                text: "123 - 456",
                face: FaceClass::Default
            }]
        );
        assert!(segment_runs("").is_empty());
    }

    #[test]
    fn classify_ranges() {
        assert_eq!(classify('a'), Some(FaceClass::Default));
        assert_eq!(classify('한'), Some(FaceClass::Cjk));
        assert_eq!(classify('\u{1F600}'), Some(FaceClass::Emoji));
        assert_eq!(classify('\u{2705}'), Some(FaceClass::Emoji));
        assert_eq!(classify(' '), None);
    }
}
