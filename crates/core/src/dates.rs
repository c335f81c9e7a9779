//! Finding dates in lines of text.
//!
//! Two questions get asked of a line: "what is *the* date on this line?"
//! (free-form mode, one answer at most) and "what are *all* the dates on this
//! line?" (grid mode, to spot the header row). Both run over the same ordered
//! list of [`DatePattern`]s.

use tracing::trace;

use crate::pattern::{DateMatch, DatePattern};
use crate::types::{DateToken, Line};

/// Date lookup for one extraction call.
///
/// Built per call so the reference year is fixed for the whole call even if
/// the clock rolls over midway.
pub struct DateScanner<'p> {
    patterns: &'p [Box<dyn DatePattern>],
    reference_year: i32,
}

impl<'p> DateScanner<'p> {
    #[must_use]
    pub fn new(patterns: &'p [Box<dyn DatePattern>], reference_year: i32) -> Self {
        Self {
            patterns,
            reference_year,
        }
    }

    #[must_use]
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// The single best date on a line.
    ///
    /// Patterns are tried in priority order and the first one that yields a
    /// real calendar date wins, even if a later pattern would match earlier
    /// in the line.
    #[must_use]
    pub fn find_date(&self, line: Line<'_>) -> Option<DateToken> {
        self.patterns.iter().find_map(|pattern| {
            pattern
                .find_first(line.text, self.reference_year)
                .map(|m| {
                    trace!(line = line.index, pattern = m.pattern, date = %m.date, "date found");
                    token(line.index, m)
                })
        })
    }

    /// Every date on a line, left to right.
    ///
    /// Matches from different patterns that overlap (e.g. `5月10日` inside
    /// `2024年5月10日`) are reduced to the longest one.
    #[must_use]
    pub fn find_all(&self, line: Line<'_>) -> Vec<DateToken> {
        let mut matches: Vec<(usize, DateMatch)> = self
            .patterns
            .iter()
            .enumerate()
            .flat_map(|(priority, pattern)| {
                pattern
                    .find_all(line.text, self.reference_year)
                    .into_iter()
                    .map(move |m| (priority, m))
            })
            .collect();

        matches.sort_by(|(pa, a), (pb, b)| {
            a.span
                .start
                .cmp(&b.span.start)
                .then_with(|| b.span.len().cmp(&a.span.len()))
                .then_with(|| pa.cmp(pb))
        });

        let mut tokens: Vec<DateToken> = Vec::with_capacity(matches.len());
        for (_, m) in matches {
            if tokens
                .last()
                .is_some_and(|prev| m.span.start < prev.span.end)
            {
                continue;
            }
            tokens.push(token(line.index, m));
        }
        tokens
    }
}

fn token(line_index: usize, m: DateMatch) -> DateToken {
    DateToken {
        line_index,
        date: m.date,
        span: m.span,
        pattern: m.pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn line(text: &str) -> Line<'_> {
        Line { index: 0, text }
    }

    #[test]
    fn test_priority_beats_position() {
        let patterns = patterns::builtin();
        let scanner = DateScanner::new(&patterns, 2025);
        // 5/1 comes first in the line but the full date has priority
        let token = scanner.find_date(line("5/1 提出 2024/06/30")).unwrap();
        assert_eq!(token.date, ymd(2024, 6, 30));
        assert_eq!(token.pattern, "ymd-slash");
    }

    #[test]
    fn test_single_date_per_line() {
        let patterns = patterns::builtin();
        let scanner = DateScanner::new(&patterns, 2025);
        let token = scanner.find_date(line("5/1 5/2 5/3")).unwrap();
        assert_eq!(token.date, ymd(2025, 5, 1));
    }

    #[test]
    fn test_no_date() {
        let patterns = patterns::builtin();
        let scanner = DateScanner::new(&patterns, 2025);
        assert!(scanner.find_date(line("田中 9:00-17:00")).is_none());
        assert!(scanner.find_date(line("")).is_none());
    }

    #[test]
    fn test_kanji_long_form() {
        let patterns = patterns::builtin();
        let scanner = DateScanner::new(&patterns, 2025);
        let token = scanner.find_date(line("2024年5月10日 シフト")).unwrap();
        assert_eq!(token.date, ymd(2024, 5, 10));
        assert_eq!(token.pattern, "ymd-kanji");
    }

    #[test]
    fn test_year_inference() {
        let patterns = patterns::builtin();
        let scanner = DateScanner::new(&patterns, 2025);
        let token = scanner.find_date(line("5/1")).unwrap();
        assert_eq!(token.date, ymd(2025, 5, 1));
    }

    #[test]
    fn test_find_all_header() {
        let patterns = patterns::builtin();
        let scanner = DateScanner::new(&patterns, 2024);
        let dates: Vec<_> = scanner
            .find_all(line("5/1 5/2 5/3"))
            .into_iter()
            .map(|t| t.date)
            .collect();
        assert_eq!(dates, vec![ymd(2024, 5, 1), ymd(2024, 5, 2), ymd(2024, 5, 3)]);
    }

    #[test]
    fn test_find_all_mixed_formats_in_order() {
        let patterns = patterns::builtin();
        let scanner = DateScanner::new(&patterns, 2024);
        let dates: Vec<_> = scanner
            .find_all(line("名前 2024年5月1日 5/2 2024-05-03 5月4日"))
            .into_iter()
            .map(|t| t.date)
            .collect();
        assert_eq!(
            dates,
            vec![
                ymd(2024, 5, 1),
                ymd(2024, 5, 2),
                ymd(2024, 5, 3),
                ymd(2024, 5, 4)
            ]
        );
    }

    #[test]
    fn test_find_all_drops_invalid_columns() {
        let patterns = patterns::builtin();
        let scanner = DateScanner::new(&patterns, 2024);
        assert_eq!(scanner.find_all(line("5/1 13/1 5/3")).len(), 2);
    }

    #[test]
    fn test_find_all_ignores_time_ranges() {
        let patterns = patterns::builtin();
        let scanner = DateScanner::new(&patterns, 2024);
        assert!(scanner.find_all(line("鈴木 9:05-10:15 10:05-12:10")).is_empty());
    }
}
