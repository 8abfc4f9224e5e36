// Settings loaded from the rc file

use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result};
use log::warn;

/// Runtime settings. Defaults match a stock Timewarrior + icalBuddy setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Tracker program, first element of every tracker command
    pub tracker_command: String,
    pub calendar_enabled: bool,
    pub calendar_command: String,
    /// Calendar (as named in the calendar app) to read events from
    pub calendar_name: String,
    /// Field separator requested from the calendar tool
    pub calendar_separator: String,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tracker_command: "timew".to_string(),
            calendar_enabled: true,
            calendar_command: "/usr/local/bin/icalbuddy".to_string(),
            calendar_name: "Calendar".to_string(),
            calendar_separator: " | ".to_string(),
            timeout_secs: 10,
            log_level: "warn".to_string(),
        }
    }
}

/// Strip one pair of surrounding double quotes, keeping inner whitespace
fn unquote(value: &str) -> &str {
    let value = value.trim();
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => anyhow::bail!("Invalid value for {}: '{}' (expected true or false)", key, value),
    }
}

impl Settings {
    /// Default rc file location: `~/.twbridge/rc`
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".twbridge").join("rc"))
    }

    /// Load from an explicit path, or from the default location when it exists.
    /// A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                Self::parse(&content)
                    .with_context(|| format!("Invalid config file: {}", path.display()))
            }
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::load(Some(&path)),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse `key=value` lines. Blank lines and `#` comments are skipped.
    pub fn parse(content: &str) -> Result<Self> {
        let mut settings = Self::default();

        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, raw) = line
                .split_once('=')
                .with_context(|| format!("Line {}: expected key=value, got '{}'", lineno + 1, line))?;
            let key = key.trim();
            let value = unquote(raw);

            match key {
                "tracker.command" => settings.tracker_command = value.to_string(),
                "calendar.enable" => settings.calendar_enabled = parse_bool(key, value)?,
                "calendar.command" => settings.calendar_command = value.to_string(),
                "calendar.name" => settings.calendar_name = value.to_string(),
                "calendar.separator" => settings.calendar_separator = value.to_string(),
                "process.timeout" => {
                    settings.timeout_secs = value
                        .parse::<u64>()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .with_context(|| format!("Invalid process.timeout: '{}'", value))?;
                }
                "log.level" => settings.log_level = value.to_string(),
                _ => warn!("Ignoring unknown config key '{}'", key),
            }
        }

        if settings.tracker_command.is_empty() {
            anyhow::bail!("tracker.command cannot be empty");
        }
        if settings.calendar_separator.trim().is_empty() {
            anyhow::bail!("calendar.separator must contain a visible character");
        }
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
