//! Free-form extraction: one person's shifts from unstructured text.
//!
//! Every line mentioning the target name is paired with the closest line
//! that carries a date, and the time range on the name line becomes the
//! shift. Anything else left on the name line is kept as a note.

use std::ops::Range;

use tracing::debug;

use crate::dates::DateScanner;
use crate::normalize::{fold_width, squash_whitespace, Document};
use crate::time_range::find_time_range;
use crate::types::{DateToken, ShiftEntry};

/// Extract the shifts of `name` from a document.
///
/// An empty (or all-whitespace) name yields no entries. Occurrences without
/// any date line in the document, or without a time range on their own
/// line, are skipped.
#[must_use]
pub fn match_proximity(doc: &Document, name: &str, scanner: &DateScanner<'_>) -> Vec<ShiftEntry> {
    let name = fold_width(name);
    if name.trim().is_empty() {
        return Vec::new();
    }
    let name = name.as_ref();

    let occurrences: Vec<_> = doc.lines().filter(|l| l.text.contains(name)).collect();
    if occurrences.is_empty() {
        debug!(name, "name not found in text");
        return Vec::new();
    }

    let dated: Vec<DateToken> = doc.lines().filter_map(|l| scanner.find_date(l)).collect();

    let mut entries = Vec::with_capacity(occurrences.len());
    for line in occurrences {
        let Some(date) = nearest_date(&dated, line.index) else {
            debug!(line = line.index, "no date anywhere in text; skipping occurrence");
            continue;
        };
        let Some(range) = find_time_range(line.text) else {
            debug!(line = line.index, "no time range on name line; skipping occurrence");
            continue;
        };

        let mut removed = vec![range.span.clone()];
        if date.line_index == line.index {
            removed.push(date.span.clone());
        }
        let residue = strip_spans(line.text, &removed).replace(name, " ");
        let notes = squash_whitespace(&residue);
        let notes = (!notes.is_empty()).then_some(notes);

        match ShiftEntry::from_parts(date.date, &range, notes) {
            Ok(entry) => entries.push(entry),
            Err(e) => debug!(line = line.index, error = %e, "dropping shift"),
        }
    }
    entries
}

/// The date line closest to `line`.
///
/// Date lines are scanned top to bottom and only a strictly smaller distance
/// replaces the current pick, so of two equally distant date lines the one
/// above wins.
fn nearest_date(dated: &[DateToken], line: usize) -> Option<&DateToken> {
    let mut best: Option<(&DateToken, usize)> = None;
    for token in dated {
        let distance = token.line_index.abs_diff(line);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((token, distance));
        }
    }
    best.map(|(token, _)| token)
}

/// Cut byte ranges out of `text`, leaving a space in place of each.
/// Overlapping ranges are merged.
fn strip_spans(text: &str, spans: &[Range<usize>]) -> String {
    let mut spans = spans.to_vec();
    spans.sort_by_key(|s| s.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        if span.start < cursor {
            cursor = cursor.max(span.end);
            continue;
        }
        out.push_str(&text[cursor..span.start]);
        out.push(' ');
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
