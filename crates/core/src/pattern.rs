//! Date pattern trait definition.

use std::ops::Range;

use chrono::NaiveDate;

/// Metadata about a date pattern for help/documentation.
#[derive(Debug, Clone)]
pub struct PatternInfo {
    /// Unique identifier (e.g., "ymd-slash")
    pub id: &'static str,
    /// Human-readable name (e.g., "Year/month/day")
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Example lines the pattern picks a date out of
    pub examples: &'static [&'static str],
}

/// A substring that is shaped like a date but not yet checked against the
/// calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCandidate {
    /// Byte range within the searched line.
    pub span: Range<usize>,
    /// `None` when the text carries no year.
    pub year: Option<i32>,
    pub month: u32,
    pub day: u32,
}

impl DateCandidate {
    /// Resolve to a calendar date, injecting `reference_year` when the text
    /// had none. Impossible dates (month 13, Feb 30) give `None`.
    #[must_use]
    pub fn resolve(&self, reference_year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year.unwrap_or(reference_year), self.month, self.day)
    }
}

/// A resolved date and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub date: NaiveDate,
    pub span: Range<usize>,
    pub pattern: &'static str,
}

/// Trait for date formats the extractor recognises.
///
/// Patterns are kept in an ordered list; the order is the priority used
/// when a line could be read more than one way.
pub trait DatePattern: Send + Sync {
    /// Unique identifier for this pattern (e.g., "ymd-slash").
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Get pattern metadata for help/documentation.
    fn info(&self) -> PatternInfo {
        PatternInfo {
            id: self.id(),
            name: self.name(),
            description: "",
            examples: &[],
        }
    }

    /// All non-overlapping substrings of `line` shaped like this pattern,
    /// left to right.
    fn candidates(&self, line: &str) -> Vec<DateCandidate>;

    /// First candidate in `line` that is a real calendar date.
    fn find_first(&self, line: &str, reference_year: i32) -> Option<DateMatch> {
        self.candidates(line).into_iter().find_map(|c| {
            c.resolve(reference_year).map(|date| DateMatch {
                date,
                span: c.span,
                pattern: self.id(),
            })
        })
    }

    /// Every candidate in `line` that is a real calendar date.
    fn find_all(&self, line: &str, reference_year: i32) -> Vec<DateMatch> {
        self.candidates(line)
            .into_iter()
            .filter_map(|c| {
                c.resolve(reference_year).map(|date| DateMatch {
                    date,
                    span: c.span,
                    pattern: self.id(),
                })
            })
            .collect()
    }
}
