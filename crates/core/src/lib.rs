//! Shiftscan Core
//!
//! Extracts work-shift records from the text an OCR engine reads off a
//! printed or handwritten shift schedule. The text is noisy: dates come in
//! several formats, punctuation is a mix of full-width and half-width, and
//! the layout is either free-form prose or a grid of dates and cells.
//!
//! # Free-form text
//!
//! ```
//! use shiftscan_core::{ExtractionConfig, ShiftScan};
//!
//! let scan = ShiftScan::with_config(ExtractionConfig::default().with_reference_year(2025));
//! let text = "5月10日(土)\n田中 9:00-17:00 早番\n佐藤 13:00-22:00";
//!
//! let shifts = scan.extract(text, "田中");
//! assert_eq!(shifts.len(), 1);
//! assert_eq!(shifts[0].date.to_string(), "2025-05-10");
//! assert_eq!(shifts[0].notes.as_deref(), Some("早番"));
//! ```
//!
//! # Schedule grids
//!
//! ```
//! use shiftscan_core::ShiftScan;
//!
//! let scan = ShiftScan::new();
//! let text = "2024/5/1 2024/5/2 2024/5/3\n鈴木 9:00-17:00 休み 10:00-18:00";
//!
//! let schedule = scan.extract_table(text);
//! assert_eq!(schedule.get("鈴木").map(|s| s.len()), Some(2));
//! ```

pub mod config;
pub mod dates;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod pattern;
pub mod patterns;
pub mod proximity;
pub mod time_range;
pub mod types;

pub use config::{ExtractionConfig, DEFAULT_OFF_MARKERS};
pub use error::ShiftError;
pub use pattern::{DatePattern, PatternInfo};
pub use types::*;

use dates::DateScanner;
use grid::GridParser;
use normalize::Document;

/// Main entry point - a configured extractor instance.
///
/// Holds no per-call state, so one instance can serve any number of
/// threads.
pub struct ShiftScan {
    patterns: Vec<Box<dyn DatePattern>>,
    config: ExtractionConfig,
}

impl ShiftScan {
    /// Create an extractor with the built-in date patterns and default
    /// settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create an extractor with custom configuration.
    #[must_use]
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            patterns: patterns::builtin(),
            config,
        }
    }

    /// Set the configuration.
    #[must_use]
    pub fn set_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Date scanner for a single call; the reference year is read here once.
    fn scanner(&self) -> DateScanner<'_> {
        DateScanner::new(&self.patterns, self.config.resolve_year())
    }

    /// Shifts of one person from free-form text.
    ///
    /// Each line mentioning `target_name` becomes at most one shift, dated
    /// by the closest line that carries a date. Returns entries in line
    /// order; an empty name or text without matches gives an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftscan_core::ShiftScan;
    ///
    /// let shifts = ShiftScan::new().extract("2024/05/10 田中 9:00-17:00", "田中");
    /// assert_eq!(shifts[0].start_time.to_string(), "2024-05-10 09:00:00");
    /// assert_eq!(shifts[0].notes, None);
    /// ```
    #[must_use]
    pub fn extract(&self, text: &str, target_name: &str) -> Vec<ShiftEntry> {
        let doc = Document::parse(text);
        let scanner = self.scanner();
        let entries = proximity::match_proximity(&doc, target_name, &scanner);
        tracing::debug!(
            lines = doc.len(),
            shifts = entries.len(),
            "free-form extraction done"
        );
        entries
    }

    /// Shifts of every employee in a schedule grid.
    ///
    /// Returns an empty schedule when the text has no header row of dates.
    #[must_use]
    pub fn extract_table(&self, text: &str) -> EmployeeSchedule {
        let doc = Document::parse(text);
        let scanner = self.scanner();
        let schedule = GridParser::new(&scanner, &self.config).parse(&doc);
        tracing::debug!(
            lines = doc.len(),
            employees = schedule.len(),
            shifts = schedule.shift_count(),
            "grid extraction done"
        );
        schedule
    }

    /// Run one extraction mode.
    #[must_use]
    pub fn run(&self, text: &str, mode: &ExtractionMode) -> ExtractionOutput {
        match mode {
            ExtractionMode::Proximity { name } => {
                ExtractionOutput::Proximity(self.extract(text, name))
            }
            ExtractionMode::Grid => ExtractionOutput::Grid(self.extract_table(text)),
        }
    }

    /// Registered date patterns in priority order (for help/documentation).
    #[must_use]
    pub fn pattern_infos(&self) -> Vec<PatternInfo> {
        self.patterns.iter().map(|p| p.info()).collect()
    }
}

impl Default for ShiftScan {
    fn default() -> Self {
        Self::new()
    }
}

/// Shifts of `target_name` from free-form text, with default settings.
#[must_use]
pub fn extract(text: &str, target_name: &str) -> Vec<ShiftEntry> {
    ShiftScan::new().extract(text, target_name)
}

/// Shifts of every employee in a schedule grid, with default settings.
#[must_use]
pub fn extract_table(text: &str) -> EmployeeSchedule {
    ShiftScan::new().extract_table(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_extractor_is_shareable() {
        assert_send_sync::<ShiftScan>();
    }

    #[test]
    fn test_run_dispatches_by_mode() {
        let scan = ShiftScan::with_config(ExtractionConfig::default().with_reference_year(2024));
        let text = "5/1 5/2\n鈴木 9:00-17:00 休";

        let grid = scan.run(text, &ExtractionMode::Grid);
        assert!(matches!(&grid, ExtractionOutput::Grid(s) if s.contains("鈴木")));

        let free = scan.run(
            text,
            &ExtractionMode::Proximity {
                name: "鈴木".to_string(),
            },
        );
        let ExtractionOutput::Proximity(entries) = free else {
            panic!("expected proximity output");
        };
        // Nearest date line is the header; its first date wins
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date.to_string(), "2024-05-01");
    }

    #[test]
    fn test_pattern_infos_in_priority_order() {
        let ids: Vec<_> = ShiftScan::new()
            .pattern_infos()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids[0], "ymd-slash");
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_free_functions() {
        assert!(extract("", "田中").is_empty());
        assert!(extract_table("").is_empty());
    }
}
