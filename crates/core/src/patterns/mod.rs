//! Built-in date patterns.

mod kanji;
mod numeric;

pub use kanji::KanjiDatePattern;
pub use numeric::NumericDatePattern;

use regex::Regex;

use crate::pattern::{DateCandidate, DatePattern};

/// The built-in patterns in priority order.
///
/// Year-bearing forms come first so `2024/05/10` is never read as `05/10`
/// of the reference year.
#[must_use]
pub fn builtin() -> Vec<Box<dyn DatePattern>> {
    vec![
        Box::new(NumericDatePattern::YMD_SLASH),
        Box::new(NumericDatePattern::YMD_DASH),
        Box::new(KanjiDatePattern::YMD),
        Box::new(NumericDatePattern::MD_SLASH),
        Box::new(KanjiDatePattern::MD),
    ]
}

/// Collect candidates from a regex with `m`/`d` groups and an optional `y`
/// group.
///
/// A match is dropped when the character just before or after it satisfies
/// `glued`; that keeps fragments of longer numbers out.
pub(crate) fn scan(re: &Regex, line: &str, glued: impl Fn(char) -> bool) -> Vec<DateCandidate> {
    re.captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let before = line[..whole.start()].chars().next_back();
            let after = line[whole.end()..].chars().next();
            if before.is_some_and(&glued) || after.is_some_and(&glued) {
                tracing::trace!(text = whole.as_str(), "date candidate glued to neighbours");
                return None;
            }
            let year = match caps.name("y") {
                Some(y) => Some(y.as_str().parse().ok()?),
                None => None,
            };
            Some(DateCandidate {
                span: whole.range(),
                year,
                month: caps.name("m")?.as_str().parse().ok()?,
                day: caps.name("d")?.as_str().parse().ok()?,
            })
        })
        .collect()
}
