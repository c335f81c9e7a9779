//! Extraction settings.

use chrono::{Datelike, Local};

/// Literal tokens that mean "no shift this day" in a schedule grid.
pub const DEFAULT_OFF_MARKERS: &[&str] = &["休", "休み", "off", "OFF", "Off"];

/// Settings shared by both extraction modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Year used for dates written without one. `None` uses the current
    /// local year at the time of the call.
    pub reference_year: Option<i32>,
    /// Grid cells that mark a day off. Matched exactly, without case folding.
    pub off_markers: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            reference_year: None,
            off_markers: DEFAULT_OFF_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl ExtractionConfig {
    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Replace the off-marker set.
    #[must_use]
    pub fn with_off_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.off_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// The year to inject into yearless dates for a call made now.
    #[must_use]
    pub fn resolve_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| Local::now().year())
    }

    #[must_use]
    pub fn is_off_marker(&self, token: &str) -> bool {
        self.off_markers.iter().any(|m| m == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_off_markers_are_exact() {
        let config = ExtractionConfig::default();
        for marker in ["休", "休み", "off", "OFF", "Off"] {
            assert!(config.is_off_marker(marker), "{marker} should be off");
        }
        assert!(!config.is_off_marker("oFF"));
        assert!(!config.is_off_marker("公休"));
        assert!(!config.is_off_marker("休日"));
    }

    #[test]
    fn test_reference_year_overrides_clock() {
        let config = ExtractionConfig::default().with_reference_year(2025);
        assert_eq!(config.resolve_year(), 2025);
    }

    #[test]
    fn test_default_year_is_current() {
        assert_eq!(ExtractionConfig::default().resolve_year(), Local::now().year());
    }

    #[test]
    fn test_replace_off_markers() {
        let config = ExtractionConfig::default().with_off_markers(["公休", "x"]);
        assert!(config.is_off_marker("公休"));
        assert!(!config.is_off_marker("休み"));
    }
}
