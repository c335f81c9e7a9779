//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use serde::Deserialize;
use shiftscan_core::DEFAULT_OFF_MARKERS;
use std::fs;
use std::path::PathBuf;

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# Shiftscan configuration
# See: shiftscan --help for all options

# Year for dates written without one (defaults to the current year)
# year = 2025

# Disable colored output
no_color = false

# Grid cells that mean "day off" (matched exactly, case-sensitive)
off_markers = ["休", "休み", "off", "OFF", "Off"]
"#;

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub year: Option<i32>,
    pub no_color: Option<bool>,
    pub off_markers: Option<Vec<String>>,
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux: `~/.config/shiftscan/config.toml`
    /// - macOS: `~/Library/Application Support/shiftscan/config.toml`
    /// - Windows: `%APPDATA%\shiftscan\config.toml`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("shiftscan").join("config.toml"))
    }

    /// Load config from file. Returns default if file doesn't exist.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Read value from environment variable.
    fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
        std::env::var(name).ok()?.trim().parse().ok()
    }

    /// Get year with precedence: env > config. `None` means the current year.
    pub fn year(&self) -> Option<i32> {
        Self::env_var("SHIFTSCAN_YEAR").or(self.year)
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        if std::env::var("NO_COLOR").is_ok() {
            return true;
        }
        if std::env::var("SHIFTSCAN_NO_COLOR").is_ok() {
            return true;
        }
        self.no_color.unwrap_or(false)
    }

    /// Get off_markers with precedence: env > config > default.
    ///
    /// The env var holds a comma-separated list.
    pub fn off_markers(&self) -> Vec<String> {
        if let Ok(raw) = std::env::var("SHIFTSCAN_OFF_MARKERS") {
            return split_markers(&raw);
        }
        self.off_markers.clone().unwrap_or_else(|| {
            DEFAULT_OFF_MARKERS
                .iter()
                .map(|m| (*m).to_string())
                .collect()
        })
    }
}

fn split_markers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Create a default config file at the standard location.
pub fn init_config() -> Result<PathBuf, String> {
    let path = Config::path().ok_or("Cannot determine config directory")?;

    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    fs::write(&path, DEFAULT_CONFIG).map_err(|e| format!("Failed to write config: {}", e))?;

    Ok(path)
}
