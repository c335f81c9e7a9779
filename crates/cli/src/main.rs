mod config;
mod pretty;

use config::Config;

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use clap::Parser;
use colored::{control::set_override, Colorize};
use shiftscan_core::{ExtractionConfig, ExtractionMode, ExtractionOutput, ShiftScan};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::pretty::PrettyConfig;

const LONG_ABOUT: &str = r##"
Shiftscan extracts work shifts from the text an OCR engine reads off a shift
schedule photo: change notices, group chat screenshots, printed rosters.

Each shift comes out as a date, a start and end time (overnight shifts end on
the next day), and any leftover text on the line as notes.

MODES:
  Free-form (--name NAME)
    Finds every line mentioning NAME and pairs it with the closest line that
    carries a date. The time range on the NAME line becomes the shift.

  Grid (default)
    Reads a roster: a header row of dates followed by one row per employee.
    Cells are time ranges or off markers (休, 休み, off, OFF, Off).

RECOGNIZED DATES:
  2024/05/10   2024-05-10   2024年5月10日   5/10   5月10日
  Dates without a year use --year (default: the current year).
  Full-width digits and punctuation (２０２４／５／１０, ９：００～１７：００) are accepted.

EXAMPLES:
  shiftscan -n 田中 @notice.txt       Shifts of 田中 from a saved OCR result
  shiftscan @roster.txt               Every employee in a roster grid
  shiftscan -y 2025 -j @roster.txt    JSON output, yearless dates in 2025
  pbpaste | shiftscan -n 田中         Read piped text

FILE INPUT:
  Use @path to read file contents:
    shiftscan @roster.txt       Read a file
    shiftscan @-                Read from stdin

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting      | CLI flag       | Env var                | Default
  -------------|----------------|------------------------|---------------------
  year         | -y, --year     | SHIFTSCAN_YEAR         | current year
  no_color     | -C, --no-color | SHIFTSCAN_NO_COLOR     | false
  off_markers  |                | SHIFTSCAN_OFF_MARKERS  | 休,休み,off,OFF,Off

  Config file location: shiftscan --config-path
  Generate default config: shiftscan --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)"##;

#[derive(Parser)]
#[command(name = "shiftscan")]
#[command(version)]
#[command(about = "Extract work shifts from OCR text of shift schedules")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// The OCR text to scan
    ///
    /// Use @path to read from a file, or @- to read stdin.
    /// Piped stdin is read when no input is given.
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Extract the shifts of this person from free-form text
    ///
    /// Without --name the input is read as a roster grid.
    #[arg(long, short = 'n', value_name = "NAME")]
    name: Option<String>,

    /// Year for dates written without one
    #[arg(long, short = 'y', value_name = "YEAR")]
    year: Option<i32>,

    /// Output results as JSON (for scripting/piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// Enable verbose logging (use multiple times for more detail)
    ///
    /// -v shows debug messages, -vv shows trace messages.
    /// Useful for understanding why a line was or wasn't matched.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// List recognized date patterns in priority order
    #[arg(long)]
    patterns: bool,

    /// Show config file path
    #[arg(long)]
    config_path: bool,

    /// Generate default config file (see --config-path for location)
    #[arg(long)]
    config_init: bool,
}

fn print_patterns() {
    let scan = ShiftScan::new();

    println!("{}", "Date Patterns".bold().underline());
    println!();

    for (i, info) in scan.pattern_infos().iter().enumerate() {
        println!(
            "{} {} {}",
            format!("{}.", i + 1).blue(),
            info.id.yellow(),
            format!("({})", info.name).green()
        );
        if !info.description.is_empty() {
            println!("   {}", info.description);
        }
        if !info.examples.is_empty() {
            println!("   {}", format!("e.g. {}", info.examples.join(", ")).dimmed());
        }
    }
    println!();
    println!(
        "{}",
        "A line is dated by the first pattern that matches it.".dimmed()
    );
}

/// Read input, handling @path syntax for file reading.
fn read_input(input: &str) -> Result<String, String> {
    let Some(path) = input.strip_prefix('@') else {
        return Ok(input.to_string());
    };

    if path == "-" {
        return read_stdin();
    }

    let file_path = Path::new(path);
    if !file_path.exists() {
        return Err(format!("File not found: {}", path));
    }

    let buffer =
        fs::read(file_path).map_err(|e| format!("Failed to read file '{}': {}", path, e))?;
    String::from_utf8(buffer).map_err(|_| format!("File is not UTF-8 text: {}", path))
}

fn read_stdin() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;
    Ok(buffer)
}

fn fail(message: &str) -> ! {
    eprintln!("{}: {}", "error".red().bold(), message);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    // Handle --config-path
    if cli.config_path {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => fail("Cannot determine config directory"),
        }
        return;
    }

    // Handle --config-init
    if cli.config_init {
        match config::init_config() {
            Ok(path) => println!("Created config file: {}", path.display()),
            Err(e) => fail(&e),
        }
        return;
    }

    // Initialize tracing based on verbosity level (before config loading for logging)
    let level = match cli.verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    // Load config file and merge with CLI args
    // Precedence: CLI args > Environment vars > Config file > Defaults
    let file_config = Config::load();

    if let Some(path) = Config::path() {
        if path.exists() {
            tracing::debug!("Loaded config from: {}", path.display());
        } else {
            tracing::trace!("No config file at: {}", path.display());
        }
    }

    // Merge settings with source logging
    let year = if let Some(y) = cli.year {
        tracing::debug!("year = {} (from CLI)", y);
        Some(y)
    } else {
        let y = file_config.year();
        let source = if std::env::var("SHIFTSCAN_YEAR").is_ok() {
            "env SHIFTSCAN_YEAR"
        } else if file_config.year.is_some() {
            "config file"
        } else {
            "default (current year)"
        };
        tracing::debug!("year = {:?} (from {})", y, source);
        y
    };

    let off_markers = file_config.off_markers();
    let source = if std::env::var("SHIFTSCAN_OFF_MARKERS").is_ok() {
        "env SHIFTSCAN_OFF_MARKERS"
    } else if file_config.off_markers.is_some() {
        "config file"
    } else {
        "default"
    };
    tracing::debug!("off_markers = {:?} (from {})", off_markers, source);

    let no_color = if cli.no_color {
        tracing::debug!("no_color = true (from CLI)");
        true
    } else {
        let c = file_config.no_color();
        tracing::debug!("no_color = {} (from env/config)", c);
        c
    };

    if no_color {
        set_override(false);
    }

    // Handle --patterns (after color settings so it respects --no-color)
    if cli.patterns {
        print_patterns();
        return;
    }

    let text = match cli.input.as_deref() {
        Some(input) => read_input(input),
        None if !io::stdin().is_terminal() => read_stdin(),
        None => {
            eprintln!("{}: No input provided", "error".red().bold());
            eprintln!();
            eprintln!("Usage: {} [OPTIONS] <INPUT>", "shiftscan".bold());
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  shiftscan -n 田中 @notice.txt   Shifts of one person");
            eprintln!("  shiftscan @roster.txt          Every employee in a grid");
            eprintln!("  cat roster.txt | shiftscan     Pipe text input");
            eprintln!();
            eprintln!("Run {} for more information.", "shiftscan --help".bold());
            std::process::exit(1);
        }
    };
    let text = text.unwrap_or_else(|e| fail(&e));

    let mut extraction = ExtractionConfig::default().with_off_markers(off_markers);
    if let Some(y) = year {
        extraction = extraction.with_reference_year(y);
    }
    let scan = ShiftScan::with_config(extraction);

    let mode = match cli.name {
        Some(name) if name.trim().is_empty() => fail("--name must not be empty"),
        Some(name) => ExtractionMode::Proximity { name },
        None => ExtractionMode::Grid,
    };
    let output = scan.run(&text, &mode);
    tracing::debug!(shifts = output.shift_count(), "extraction finished");

    if output.is_empty() {
        eprintln!("{}", "No shifts found".yellow());
    }

    if cli.json {
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("Failed to serialize output: {}", e)),
        }
        return;
    }

    let pretty_config = PrettyConfig {
        color: !no_color,
        ..PrettyConfig::default()
    };
    let rendered = match (&output, &mode) {
        (ExtractionOutput::Proximity(entries), ExtractionMode::Proximity { name })
            if !entries.is_empty() =>
        {
            pretty::render_shifts(name, entries, &pretty_config)
        }
        (ExtractionOutput::Grid(schedule), _) => pretty::render_schedule(schedule, &pretty_config),
        _ => String::new(),
    };
    print!("{}", rendered);
}
