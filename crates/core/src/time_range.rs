//! Finding `start-end` time ranges such as `9:00-17:00` or `22：00～6：00`.

use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::{Captures, Regex};

use crate::types::TimeRange;

/// `H:MM` or `HH:MM` (either colon width), a hyphen, full-width tilde or
/// wave dash, then another time.
fn range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?P<sh>[0-9]{1,2})[:：](?P<sm>[0-9]{2})[ \t]*[-～〜][ \t]*(?P<eh>[0-9]{1,2})[:：](?P<em>[0-9]{2})",
        )
        .unwrap()
    })
}

/// True when `input` contains something shaped like a time range, valid or not.
#[must_use]
pub fn looks_like_range(input: &str) -> bool {
    range_regex().is_match(input)
}

/// First valid time range in `input`.
///
/// Matches glued to surrounding digits are ignored, as are matches whose
/// hour or minute is out of range (`25:00`, `9:75`); the search then moves
/// on to the next match.
#[must_use]
pub fn find_time_range(input: &str) -> Option<TimeRange> {
    range_regex().captures_iter(input).find_map(|caps| {
        let whole = caps.get(0)?;
        let before = input[..whole.start()].chars().next_back();
        let after = input[whole.end()..].chars().next();
        if before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit())
        {
            return None;
        }
        let range = TimeRange {
            start: time_of_day(&caps, "sh", "sm")?,
            end: time_of_day(&caps, "eh", "em")?,
            span: whole.range(),
        };
        Some(range)
    })
}

fn time_of_day(caps: &Captures<'_>, hour: &str, minute: &str) -> Option<NaiveTime> {
    let h: u32 = caps.name(hour)?.as_str().parse().ok()?;
    let m: u32 = caps.name(minute)?.as_str().parse().ok()?;
    let time = NaiveTime::from_hms_opt(h, m, 0);
    if time.is_none() {
        tracing::trace!(hour = h, minute = m, "not a time of day");
    }
    time
}
