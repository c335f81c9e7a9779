//! Human-readable rendering of extracted shifts.
//!
//! One block per employee:
//!
//! ```text
//! ▶ 田中  2 shifts
//!   2024-06-03 Mon  13:00 → 22:00      9h00m  ※佐藤さんと交代
//!   2024-06-04 Tue  22:00 → 07:00 +1   9h00m
//! ```
//!
//! Names are padded by display width so CJK and Latin names line up.

use colored::{Color, Colorize};
use shiftscan_core::{EmployeeSchedule, ShiftEntry};
use unicode_width::UnicodeWidthStr;

/// Configuration for pretty printing.
#[derive(Debug, Clone, Copy)]
pub struct PrettyConfig {
    /// Enable colored output.
    pub color: bool,
    /// Indent string (usually 2 spaces).
    pub indent: &'static str,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            color: true,
            indent: "  ",
        }
    }
}

/// Render the shifts of one person.
pub fn render_shifts(name: &str, entries: &[ShiftEntry], config: &PrettyConfig) -> String {
    let mut output = String::new();
    push_block(&mut output, name, name.width(), entries, config);
    output
}

/// Render a whole schedule, one block per employee in name order.
pub fn render_schedule(schedule: &EmployeeSchedule, config: &PrettyConfig) -> String {
    let name_width = schedule.names().map(UnicodeWidthStr::width).max().unwrap_or(0);
    let mut output = String::new();
    for (i, (name, entries)) in schedule.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        push_block(&mut output, name, name_width, entries, config);
    }
    output
}

fn push_block(
    output: &mut String,
    name: &str,
    name_width: usize,
    entries: &[ShiftEntry],
    config: &PrettyConfig,
) {
    let count = match entries.len() {
        1 => "1 shift".to_string(),
        n => format!("{n} shifts"),
    };
    output.push_str(&format!(
        "{} {}  {}\n",
        colorize("▶", Color::Blue, config.color),
        bold(&pad_to_width(name, name_width), config.color),
        dimmed(&count, config.color),
    ));
    for entry in entries {
        output.push_str(config.indent);
        output.push_str(&format_entry(entry, config));
        output.push('\n');
    }
}

/// One shift on a single line.
pub fn format_entry(entry: &ShiftEntry, config: &PrettyConfig) -> String {
    let day = entry.date.format("%Y-%m-%d %a").to_string();
    let span = format!(
        "{} → {}",
        entry.start_time.format("%H:%M"),
        entry.end_time.format("%H:%M")
    );
    let next_day = if entry.crosses_midnight() { "+1" } else { "  " };
    let minutes = entry.duration_minutes();
    let duration = format!("{}h{:02}m", minutes / 60, minutes % 60);

    let mut line = format!(
        "{}  {} {}  {}",
        colorize(&day, Color::Cyan, config.color),
        colorize(&span, Color::Green, config.color),
        colorize(next_day, Color::Yellow, config.color),
        dimmed(&format!("{duration:>6}"), config.color),
    );
    if let Some(notes) = &entry.notes {
        line.push_str("  ");
        line.push_str(notes);
    }
    line
}

/// Left-align `text` in a column `width` terminal cells wide.
fn pad_to_width(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(padding))
}

fn colorize(s: &str, color: Color, enabled: bool) -> String {
    if enabled {
        s.color(color).to_string()
    } else {
        s.to_string()
    }
}

fn bold(s: &str, enabled: bool) -> String {
    if enabled {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

fn dimmed(s: &str, enabled: bool) -> String {
    if enabled {
        s.dimmed().to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    const PLAIN: PrettyConfig = PrettyConfig {
        color: false,
        indent: "  ",
    };

    fn entry(day: u32, start: u32, end_day: u32, end: u32, notes: Option<&str>) -> ShiftEntry {
        let date = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
        let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        ShiftEntry::new(
            date(day),
            date(day).and_time(at(start)),
            date(end_day).and_time(at(end)),
            notes.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn test_format_entry() {
        let line = format_entry(&entry(3, 13, 3, 22, Some("※交代")), &PLAIN);
        assert_eq!(line, "2024-06-03 Mon  13:00 → 22:00      9h00m  ※交代");
    }

    #[test]
    fn test_format_overnight_entry() {
        let line = format_entry(&entry(4, 22, 5, 7, None), &PLAIN);
        assert_eq!(line, "2024-06-04 Tue  22:00 → 07:00 +1   9h00m");
    }

    #[test]
    fn test_render_shifts() {
        let out = render_shifts("田中", &[entry(3, 9, 3, 17, None)], &PLAIN);
        assert_eq!(out, "▶ 田中  1 shift\n  2024-06-03 Mon  09:00 → 17:00      8h00m\n");
    }

    #[test]
    fn test_schedule_names_align_by_display_width() {
        let mut schedule = EmployeeSchedule::new();
        schedule.append("Ann", vec![entry(3, 9, 3, 17, None)]);
        schedule.append("鈴木", vec![entry(3, 9, 3, 17, None), entry(4, 9, 4, 17, None)]);
        let out = render_schedule(&schedule, &PLAIN);
        let headers: Vec<_> = out.lines().filter(|l| l.starts_with('▶')).collect();
        assert_eq!(headers, vec!["▶ Ann   1 shift", "▶ 鈴木  2 shifts"]);
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("鈴木", 6), "鈴木  ");
        assert_eq!(pad_to_width("abc", 2), "abc");
    }
}
