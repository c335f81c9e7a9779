//! Width folding and line splitting for OCR text.
//!
//! OCR engines mix full-width and half-width punctuation freely. Everything
//! downstream matches on ASCII digits, `:`, `/` and `-`, so lines are folded
//! once here. The wave dashes `～` and `〜` are kept as they are; the time
//! range pattern accepts them directly.

use std::borrow::Cow;

use crate::types::Line;

/// Map a single full-width character to its ASCII counterpart.
fn fold_char(c: char) -> Option<char> {
    match c {
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32),
        '：' => Some(':'),
        '／' => Some('/'),
        '－' => Some('-'),
        '\u{3000}' => Some(' '),
        _ => None,
    }
}

/// Fold full-width digits, colon, slash, hyphen and ideographic space to ASCII.
///
/// Borrows when there is nothing to fold.
#[must_use]
pub fn fold_width(input: &str) -> Cow<'_, str> {
    if !input.chars().any(|c| fold_char(c).is_some()) {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.chars().map(|c| fold_char(c).unwrap_or(c)).collect())
}

/// Input text split into folded lines.
///
/// `\r\n`, `\n` and a lone `\r` each end a line. Indices are 0-based and
/// match the order of the lines in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .flat_map(|line| line.split('\r'))
            .map(|line| fold_width(line).into_owned())
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> impl Iterator<Item = Line<'_>> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, text)| Line {
                index,
                text: text.as_str(),
            })
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<Line<'_>> {
        self.lines.get(index).map(|text| Line {
            index,
            text: text.as_str(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Collapse runs of whitespace to one ASCII space and trim the ends.
#[must_use]
pub fn squash_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_full_width_punctuation() {
        assert_eq!(fold_width("９：００～１７：００"), "9:00～17:00");
        assert_eq!(fold_width("２０２４／０５／１０"), "2024/05/10");
        assert_eq!(fold_width("２０２４－０５－１０"), "2024-05-10");
        assert_eq!(fold_width("田中\u{3000}太郎"), "田中 太郎");
    }

    #[test]
    fn test_fold_borrows_ascii() {
        assert!(matches!(fold_width("9:00-17:00"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_wave_dashes_are_kept() {
        assert_eq!(fold_width("9:00〜17:00"), "9:00〜17:00");
    }

    #[test]
    fn test_line_breaks() {
        let doc = Document::parse("a\r\nb\nc\rd");
        let texts: Vec<_> = doc.lines().map(|l| l.text).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
        assert_eq!(doc.line(3).map(|l| l.index), Some(3));
    }

    #[test]
    fn test_blank_lines_keep_their_index() {
        let doc = Document::parse("first\n\nthird");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.line(2).map(|l| l.text), Some("third"));
    }

    #[test]
    fn test_squash_whitespace() {
        assert_eq!(squash_whitespace("  早番   応援 "), "早番 応援");
        assert_eq!(squash_whitespace("   "), "");
    }
}
