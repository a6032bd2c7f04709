//! Diagnostic line formatting.
//!
//! The host configures three presentation knobs for the diagnostic log:
//! a minimum severity, a line layout, and a timestamp layout. All three are
//! parsed case-insensitively from strings, and an unrecognized value falls
//! back to the default instead of failing configuration.

use chrono::Local;

/// Severity of a diagnostic line.
///
/// Ordering follows declaration order, so `Level::Debug < Level::Info`.
/// A line is written only when its level is at or above the configured
/// minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Level {
    /// Parses a level name. Returns `None` for anything unrecognized so the
    /// caller can fall back to the default.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            _ => None,
        }
    }

    /// Upper-case name used in rendered lines.
    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// Layout of a rendered diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// `<timestamp> [LEVEL] <message>`
    #[default]
    Long,
    /// `<timestamp> LEVEL <message>`
    Standard,
    /// `[LEVEL] <message>`, no timestamp
    Short,
}

impl LineFormat {
    /// Parses a format name (`long`, `std`, `standard`, `short`). Returns
    /// `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "long" => Some(LineFormat::Long),
            "std" | "standard" => Some(LineFormat::Standard),
            "short" => Some(LineFormat::Short),
            _ => None,
        }
    }

    /// Renders one diagnostic line, without a trailing newline.
    pub fn render(self, date_format: DateFormat, level: Level, message: &str) -> String {
        match self {
            LineFormat::Long => {
                format!("{} [{}] {}", date_format.timestamp(), level.name(), message)
            }
            LineFormat::Standard => {
                format!("{} {:<5} {}", date_format.timestamp(), level.name(), message)
            }
            LineFormat::Short => format!("[{}] {}", level.name(), message),
        }
    }
}

/// Timestamp layout used by [`LineFormat::Long`] and [`LineFormat::Standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `2024-01-31`
    Date,
    /// `2024-01-31 13:05:59`
    #[default]
    Datetime,
    /// `13:05:59.123`, millisecond resolution
    Time,
}

impl DateFormat {
    /// Parses a date-format name (`date`, `datetime`, `time`). Returns
    /// `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "date" => Some(DateFormat::Date),
            "datetime" => Some(DateFormat::Datetime),
            "time" => Some(DateFormat::Time),
            _ => None,
        }
    }

    fn timestamp(self) -> String {
        let now = Local::now();
        match self {
            DateFormat::Date => now.format("%Y-%m-%d").to_string(),
            DateFormat::Datetime => now.format("%Y-%m-%d %H:%M:%S").to_string(),
            DateFormat::Time => now.format("%H:%M:%S%.3f").to_string(),
        }
    }
}
