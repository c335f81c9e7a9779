//! Errors raised while assembling shift records.
//!
//! Extraction itself never fails: lines without a date, a time range or the
//! target name simply produce nothing. These errors only surface when a
//! record built from otherwise valid tokens would break the
//! [`ShiftEntry`](crate::ShiftEntry) invariants; the extractors log and skip
//! such records.

use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShiftError {
    #[error("shift starting at {start} does not start on {date}")]
    StartOffDate { date: NaiveDate, start: NaiveDateTime },

    #[error("shift ending at {end} does not end on {date} or the following day")]
    EndOutOfRange { date: NaiveDate, end: NaiveDateTime },

    #[error("shift ends at {end}, which is not after its start {start}")]
    NonPositiveDuration {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("no calendar day follows {0}")]
    DateOverflow(NaiveDate),
}
