//! Core types for shiftscan.
//!
//! These are the values every extraction step passes along: lines of OCR
//! text, the date and time tokens found in them, and the shift records that
//! come out the other end.

use std::collections::BTreeMap;
use std::ops::Range;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ShiftError;

/// One line of the input text with its 0-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub index: usize,
    pub text: &'a str,
}

/// A calendar date found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken {
    /// Index of the line the date was found on.
    pub line_index: usize,
    pub date: NaiveDate,
    /// Byte range of the matched substring within the (normalized) line.
    pub span: Range<usize>,
    /// Id of the pattern that produced this date (e.g. "ymd-slash").
    pub pattern: &'static str,
}

/// A start/end pair of times of day.
///
/// `end` may be earlier than `start`; that means the shift crosses midnight
/// and is resolved against a calendar date in [`ShiftEntry::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Byte range of the matched substring within the searched string.
    pub span: Range<usize>,
}

impl TimeRange {
    /// True when the end hour is strictly earlier than the start hour.
    #[must_use]
    pub fn crosses_midnight(&self) -> bool {
        use chrono::Timelike;
        self.end.hour() < self.start.hour()
    }
}

/// A single work shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftEntry {
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ShiftEntry {
    /// Build an entry, checking that it describes a forward span of time
    /// starting on `date` and ending on `date` or the day after.
    pub fn new(
        date: NaiveDate,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        notes: Option<String>,
    ) -> Result<Self, ShiftError> {
        if start_time.date() != date {
            return Err(ShiftError::StartOffDate {
                date,
                start: start_time,
            });
        }
        let end_day = end_time.date();
        if end_day != date && date.succ_opt() != Some(end_day) {
            return Err(ShiftError::EndOutOfRange {
                date,
                end: end_time,
            });
        }
        if end_time <= start_time {
            return Err(ShiftError::NonPositiveDuration {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            date,
            start_time,
            end_time,
            notes: notes.filter(|n| !n.is_empty()),
        })
    }

    /// Combine a calendar date with a time range.
    ///
    /// When the end hour is earlier than the start hour the end moves to the
    /// following day.
    pub fn from_parts(
        date: NaiveDate,
        range: &TimeRange,
        notes: Option<String>,
    ) -> Result<Self, ShiftError> {
        let end_date = if range.crosses_midnight() {
            date.succ_opt().ok_or(ShiftError::DateOverflow(date))?
        } else {
            date
        };
        Self::new(
            date,
            date.and_time(range.start),
            end_date.and_time(range.end),
            notes,
        )
    }

    /// True when the shift ends on the day after it starts.
    #[must_use]
    pub fn crosses_midnight(&self) -> bool {
        self.end_time.date() != self.date
    }

    /// Shift length in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Shifts per employee from a tabular schedule.
///
/// Every employee present has at least one entry; entries keep the header's
/// column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeSchedule {
    employees: BTreeMap<String, Vec<ShiftEntry>>,
}

impl EmployeeSchedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append entries for `name`. Empty batches leave the schedule untouched,
    /// so a name never maps to an empty list.
    pub fn append(&mut self, name: &str, entries: Vec<ShiftEntry>) {
        if entries.is_empty() {
            return;
        }
        self.employees
            .entry(name.to_string())
            .or_default()
            .extend(entries);
    }

    /// Entries for one employee.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[ShiftEntry]> {
        self.employees.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.employees.contains_key(name)
    }

    /// Employee names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.employees.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ShiftEntry])> {
        self.employees
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Number of employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Total number of shifts across all employees.
    #[must_use]
    pub fn shift_count(&self) -> usize {
        self.employees.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Vec<ShiftEntry>> {
        self.employees
    }
}

/// Which extraction strategy to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Free-form text mentioning one person near a date and time.
    Proximity { name: String },
    /// A header row of dates followed by one row per employee.
    Grid,
}

/// Result of [`crate::ShiftScan::run`]; one variant per mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "result", rename_all = "lowercase")]
pub enum ExtractionOutput {
    Proximity(Vec<ShiftEntry>),
    Grid(EmployeeSchedule),
}

impl ExtractionOutput {
    /// Number of shift records produced.
    #[must_use]
    pub fn shift_count(&self) -> usize {
        match self {
            Self::Proximity(entries) => entries.len(),
            Self::Grid(schedule) => schedule.shift_count(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shift_count() == 0
    }
}
