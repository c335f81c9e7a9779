//! Tabular extraction: a header row of dates followed by employee rows.
//!
//! ```text
//! 5/1 5/2 5/3
//! 鈴木 9:00-17:00 休み 10:00-18:00
//! 佐藤 off 13:00-22:00 13:00-22:00
//! ```
//!
//! The header is the first line with more than one date. Every row that
//! starts with a name followed by shift cells is aligned to the header by
//! position.

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::config::ExtractionConfig;
use crate::dates::DateScanner;
use crate::normalize::Document;
use crate::time_range::{find_time_range, looks_like_range};
use crate::types::{EmployeeSchedule, Line, ShiftEntry};

/// A line that starts with a name and at least one shift cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow<'a> {
    pub line_index: usize,
    pub name: &'a str,
    /// Every whitespace-separated token after the name.
    pub cells: Vec<&'a str>,
}

/// Grid parser for one extraction call.
pub struct GridParser<'a> {
    scanner: &'a DateScanner<'a>,
    config: &'a ExtractionConfig,
}

impl<'a> GridParser<'a> {
    #[must_use]
    pub fn new(scanner: &'a DateScanner<'a>, config: &'a ExtractionConfig) -> Self {
        Self { scanner, config }
    }

    /// Parse every employee row in the document.
    ///
    /// Returns an empty schedule when no header row exists.
    #[must_use]
    pub fn parse(&self, doc: &Document) -> EmployeeSchedule {
        let mut schedule = EmployeeSchedule::new();
        let Some((header_index, header)) = self.find_header(doc) else {
            debug!("no header row with more than one date; not a grid");
            return schedule;
        };
        debug!(line = header_index, columns = header.len(), "found header row");

        for line in doc.lines() {
            let Some(row) = self.match_row(line) else {
                continue;
            };
            if row.cells.len() < header.len() {
                debug!(
                    line = row.line_index,
                    name = row.name,
                    cells = row.cells.len(),
                    columns = header.len(),
                    "skipping row with fewer cells than header dates"
                );
                continue;
            }
            let entries = self.row_entries(&row, &header);
            schedule.append(row.name, entries);
        }
        schedule
    }

    /// First line carrying more than one date, with its dates in column order.
    #[must_use]
    pub fn find_header(&self, doc: &Document) -> Option<(usize, Vec<NaiveDate>)> {
        doc.lines().find_map(|line| {
            let dates = self.scanner.find_all(line);
            (dates.len() > 1).then(|| (line.index, dates.into_iter().map(|t| t.date).collect()))
        })
    }

    /// Split a line into name and cells if it looks like an employee row.
    #[must_use]
    pub fn match_row<'l>(&self, line: Line<'l>) -> Option<GridRow<'l>> {
        let mut tokens = line.text.split_whitespace();
        let name = tokens.next()?;
        let cells: Vec<&str> = tokens.collect();

        if !self.is_cell(cells.first()?) {
            return None;
        }
        if looks_like_range(name) || !self.scanner.find_all(line_of(name)).is_empty() {
            trace!(line = line.index, name, "leading token is not a name");
            return None;
        }
        Some(GridRow {
            line_index: line.index,
            name,
            cells,
        })
    }

    fn is_cell(&self, token: &str) -> bool {
        self.config.is_off_marker(token) || looks_like_range(token)
    }

    /// Shifts for one row, one per working column.
    fn row_entries(&self, row: &GridRow<'_>, header: &[NaiveDate]) -> Vec<ShiftEntry> {
        header
            .iter()
            .zip(&row.cells)
            .filter_map(|(&date, &cell)| {
                if self.config.is_off_marker(cell) {
                    return None;
                }
                let Some(range) = find_time_range(cell) else {
                    trace!(line = row.line_index, %date, cell, "unreadable cell");
                    return None;
                };
                ShiftEntry::from_parts(date, &range, None)
                    .map_err(|e| debug!(line = row.line_index, error = %e, "dropping shift"))
                    .ok()
            })
            .collect()
    }
}

fn line_of(text: &str) -> Line<'_> {
    Line { index: 0, text }
}
