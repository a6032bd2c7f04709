//! Store configuration.
//!
//! Two ways to build a [`SessionConfig`]:
//!
//! 1. Typed, for Rust callers: `Default` plus chainable `with_*` setters.
//! 2. Loose, for plugin-style hosts: [`SessionConfig::from_settings`] takes
//!    a string-keyed map of JSON values, the shape a host process hands a
//!    session backend. Every key is optional; a missing key, wrong type, or
//!    unrecognized value falls back to the default. Configuration never
//!    fails.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::diag::{DateFormat, DiagConfig, Level, LineFormat};

/// Namespace prefix used when the host does not configure one.
pub const DEFAULT_PREFIX: &str = "memory";

/// Entry lifetime applied by `put` when the host does not configure one.
pub const DEFAULT_TTL_MINUTES: u64 = 60;

/// Interval between reaper sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for a [`SessionStore`](crate::store::SessionStore).
///
/// # Example
///
/// ```
/// use sessionkv::SessionConfig;
/// use std::time::Duration;
///
/// let config = SessionConfig::default()
///     .with_prefix("oauth")
///     .with_ttl_minutes(30);
/// assert_eq!(config.prefix, "oauth");
/// assert_eq!(config.ttl_minutes, 30);
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Namespace segment joined in front of every caller-supplied key.
    pub prefix: String,
    /// Uniform entry lifetime in whole minutes. `0` is legal: entries
    /// become sweep-eligible immediately after the write instant.
    pub ttl_minutes: u64,
    /// How often the reaper scans for expired entries. Also the bound on
    /// how long an expired value stays readable.
    pub sweep_interval: Duration,
    /// Diagnostic logger options.
    pub log: DiagConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            ttl_minutes: DEFAULT_TTL_MINUTES,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            log: DiagConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the namespace prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the uniform entry lifetime in whole minutes.
    pub fn with_ttl_minutes(mut self, minutes: u64) -> Self {
        self.ttl_minutes = minutes;
        self
    }

    /// Sets the reaper sweep interval. Tests shorten this to make expiry
    /// observable quickly; hosts normally leave the one-second default.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Routes diagnostic lines to a file instead of stdout.
    pub fn with_log_file(mut self, filename: impl Into<String>) -> Self {
        self.log.filename = Some(filename.into());
        self
    }

    /// Sets the minimum diagnostic severity.
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log.level = level;
        self
    }

    /// Builds a configuration from a loosely-typed settings map.
    ///
    /// Recognized keys, all optional:
    ///
    /// | key             | type             | fallback        |
    /// |-----------------|------------------|-----------------|
    /// | `prefix`        | string           | `"memory"`      |
    /// | `ttl`           | number or string | `60` (minutes)  |
    /// | `filename`      | string           | stdout if empty |
    /// | `loglevel`      | string           | `info`          |
    /// | `logformat`     | string           | `long`          |
    /// | `logdateformat` | string           | `datetime`      |
    ///
    /// `logformat` accepts `long`, `std`, `standard`, `short`;
    /// `logdateformat` accepts `date`, `datetime`, `time`. Both are
    /// case-insensitive.
    pub fn from_settings(settings: &HashMap<String, Value>) -> Self {
        let mut config = Self::default();

        if let Some(prefix) = settings.get("prefix").and_then(Value::as_str) {
            config.prefix = prefix.to_string();
        }

        if let Some(ttl) = settings.get("ttl") {
            if let Some(minutes) = ttl.as_u64() {
                config.ttl_minutes = minutes;
            } else if let Some(minutes) = ttl.as_str().and_then(|s| s.parse().ok()) {
                config.ttl_minutes = minutes;
            }
        }

        if let Some(filename) = settings.get("filename").and_then(Value::as_str) {
            if !filename.is_empty() {
                config.log.filename = Some(filename.to_string());
            }
        }

        if let Some(level) = settings.get("loglevel").and_then(Value::as_str) {
            config.log.level = Level::parse(level).unwrap_or_default();
        }

        if let Some(format) = settings.get("logformat").and_then(Value::as_str) {
            config.log.format = LineFormat::parse(format).unwrap_or_default();
        }

        if let Some(date_format) = settings.get("logdateformat").and_then(Value::as_str) {
            config.log.date_format = DateFormat::parse(date_format).unwrap_or_default();
        }

        config
    }
}
