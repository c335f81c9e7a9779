//! Numeric dates: `2024/05/10`, `2024-05-10`, `5/10`.

use std::sync::OnceLock;

use regex::Regex;

use super::scan;
use crate::pattern::{DateCandidate, DatePattern, PatternInfo};

/// Digits joined by a separator, with or without a leading 4-digit year.
#[derive(Debug, Clone, Copy)]
pub struct NumericDatePattern {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    examples: &'static [&'static str],
    separator: char,
    with_year: bool,
}

fn ymd_slash() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?P<y>[0-9]{4})/(?P<m>[0-9]{1,2})/(?P<d>[0-9]{1,2})").unwrap())
}

fn ymd_dash() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?P<y>[0-9]{4})-(?P<m>[0-9]{1,2})-(?P<d>[0-9]{1,2})").unwrap())
}

fn md_slash() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?P<m>[0-9]{1,2})/(?P<d>[0-9]{1,2})").unwrap())
}

impl NumericDatePattern {
    pub const YMD_SLASH: Self = Self {
        id: "ymd-slash",
        name: "Year/month/day",
        description: "Full numeric date with slashes",
        examples: &["2024/05/10", "2024/5/1 早番"],
        separator: '/',
        with_year: true,
    };

    pub const YMD_DASH: Self = Self {
        id: "ymd-dash",
        name: "Year-month-day",
        description: "Full numeric date with hyphens (ISO 8601 order)",
        examples: &["2024-05-10", "シフト 2024-5-1"],
        separator: '-',
        with_year: true,
    };

    pub const MD_SLASH: Self = Self {
        id: "md-slash",
        name: "Month/day",
        description: "Month and day with a slash; the year is inferred",
        examples: &["5/10", "05/10(金)"],
        separator: '/',
        with_year: false,
    };

    fn regex(&self) -> &'static Regex {
        match (self.with_year, self.separator) {
            (true, '-') => ymd_dash(),
            (true, _) => ymd_slash(),
            (false, _) => md_slash(),
        }
    }
}

impl DatePattern for NumericDatePattern {
    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn info(&self) -> PatternInfo {
        PatternInfo {
            id: self.id,
            name: self.name,
            description: self.description,
            examples: self.examples,
        }
    }

    fn candidates(&self, line: &str) -> Vec<DateCandidate> {
        let separator = self.separator;
        let with_year = self.with_year;
        // A yearless date touching another separator is a piece of a longer
        // numeric date (e.g. `13/45` inside `2024/13/45`).
        scan(self.regex(), line, move |c| {
            c.is_ascii_digit() || (!with_year && c == separator)
        })
    }
}
