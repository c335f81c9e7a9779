//! Japanese long-form dates: `2024年5月10日`, `5月10日`.

use std::sync::OnceLock;

use regex::Regex;

use super::scan;
use crate::pattern::{DateCandidate, DatePattern, PatternInfo};

#[derive(Debug, Clone, Copy)]
pub struct KanjiDatePattern {
    with_year: bool,
}

fn ymd() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?P<y>[0-9]{4})\s*年\s*(?P<m>[0-9]{1,2})\s*月\s*(?P<d>[0-9]{1,2})\s*日").unwrap()
    })
}

fn md() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?P<m>[0-9]{1,2})\s*月\s*(?P<d>[0-9]{1,2})\s*日").unwrap())
}

impl KanjiDatePattern {
    pub const YMD: Self = Self { with_year: true };
    pub const MD: Self = Self { with_year: false };
}

impl DatePattern for KanjiDatePattern {
    fn id(&self) -> &'static str {
        if self.with_year {
            "ymd-kanji"
        } else {
            "md-kanji"
        }
    }

    fn name(&self) -> &'static str {
        if self.with_year {
            "Year年month月day日"
        } else {
            "Month月day日"
        }
    }

    fn info(&self) -> PatternInfo {
        if self.with_year {
            PatternInfo {
                id: self.id(),
                name: self.name(),
                description: "Localized long form with year, month and day markers",
                examples: &["2024年5月10日", "2024年05月10日(金) 出勤"],
            }
        } else {
            PatternInfo {
                id: self.id(),
                name: self.name(),
                description: "Localized month and day; the year is inferred",
                examples: &["5月10日", "5月1日 田中 早番"],
            }
        }
    }

    fn candidates(&self, line: &str) -> Vec<DateCandidate> {
        let re = if self.with_year { ymd() } else { md() };
        scan(re, line, |c| c.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_form_with_year() {
        let m = KanjiDatePattern::YMD
            .find_first("2024年05月10日(金) 出勤", 1999)
            .unwrap();
        assert_eq!(m.date, ymd_date(2024, 5, 10));
        assert_eq!(m.pattern, "ymd-kanji");
    }

    #[test]
    fn test_month_day_injects_year() {
        let m = KanjiDatePattern::MD.find_first("5月1日 田中", 2025).unwrap();
        assert_eq!(m.date, ymd_date(2025, 5, 1));
        assert_eq!(m.span, 0.."5月1日".len());
    }

    #[test]
    fn test_ocr_spacing_between_markers() {
        let m = KanjiDatePattern::MD.find_first("5 月 1 日", 2025).unwrap();
        assert_eq!(m.date, ymd_date(2025, 5, 1));
    }

    #[test]
    fn test_month_only_is_not_a_date() {
        assert!(KanjiDatePattern::MD.find_first("5月のシフト", 2025).is_none());
    }

    #[test]
    fn test_impossible_day() {
        assert!(KanjiDatePattern::MD.find_first("4月31日", 2025).is_none());
    }
}
