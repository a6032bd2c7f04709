//! Diagnostic logger and output sink.
//!
//! Every store instance owns one `DiagLogger`. Operations push one line per
//! call (`[GET]`, `[PUT]`, `[DEL]`) through it, and the host decides at
//! construction time where those lines land: a freshly created file, or the
//! process's stdout when no file is configured or the file cannot be
//! created. That sink-unavailable case is the only failure the store
//! recognizes at its boundary, and it is downgraded to the fallback sink
//! rather than surfaced.
//!
//! The sink has its own mutex so concurrent operations never interleave
//! partial lines. The store's map lock is not involved in logging.

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;

use tracing::warn;

use crate::error::SessionError;

use super::format::{DateFormat, Level, LineFormat};

/// Options for the diagnostic logger.
///
/// All fields default to the values used when the host supplies nothing:
/// stdout, Info, the long line layout, and date-plus-time timestamps.
#[derive(Debug, Clone, Default)]
pub struct DiagConfig {
    /// Target file for diagnostic lines. `None` means stdout. The file is
    /// created at store construction, truncating any prior content.
    pub filename: Option<String>,
    /// Minimum severity written to the sink.
    pub level: Level,
    /// Line layout.
    pub format: LineFormat,
    /// Timestamp layout.
    pub date_format: DateFormat,
}

/// Where diagnostic lines go.
#[derive(Debug)]
enum Sink {
    File(File),
    Stdout,
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::File(file) => file.write(buf),
            Sink::Stdout => io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::File(file) => file.flush(),
            Sink::Stdout => io::stdout().flush(),
        }
    }
}

/// A per-store diagnostic logger.
///
/// Writes are whole lines under the logger's own mutex, so lines from
/// concurrent operations may interleave with each other but are never torn.
#[derive(Debug)]
pub struct DiagLogger {
    sink: Mutex<Sink>,
    level: Level,
    format: LineFormat,
    date_format: DateFormat,
}

impl DiagLogger {
    /// Opens the configured sink and returns the logger.
    ///
    /// Never fails: if the configured file cannot be created, the logger
    /// falls back to stdout and records the downgrade on the `tracing`
    /// side.
    pub fn open(config: &DiagConfig) -> Self {
        let sink = match config.filename.as_deref() {
            Some(name) if !name.is_empty() => match File::create(name) {
                Ok(file) => Sink::File(file),
                Err(err) => {
                    warn!(filename = name, error = %err, "diagnostic file unavailable, falling back to stdout");
                    Sink::Stdout
                }
            },
            _ => Sink::Stdout,
        };

        Self {
            sink: Mutex::new(sink),
            level: config.level,
            format: config.format,
            date_format: config.date_format,
        }
    }

    /// True when the logger writes to a file rather than stdout.
    pub fn writes_to_file(&self) -> bool {
        matches!(*self.sink.lock().unwrap(), Sink::File(_))
    }

    /// Writes one line at the given level, if the level clears the
    /// configured minimum. Write errors are swallowed; diagnostics must
    /// never fail an operation.
    pub fn log(&self, level: Level, message: &str) {
        if level < self.level {
            return;
        }
        let line = self.format.render(self.date_format, level, message);
        let mut sink = self.sink.lock().unwrap();
        let _ = writeln!(sink, "{}", line);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    /// Releases a file sink, flushing it first. A stdout sink is left
    /// untouched. Later writes land on stdout, so calling this twice is
    /// harmless.
    pub fn close(&self) -> Result<(), SessionError> {
        let mut sink = self.sink.lock().unwrap();
        if let Sink::File(file) = &mut *sink {
            let _ = file.flush();
            *sink = Sink::Stdout;
        }
        Ok(())
    }
}
