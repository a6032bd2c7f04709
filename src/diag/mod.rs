//! Diagnostic Output Module
//!
//! Each store instance emits one diagnostic line per operation, recording
//! the fully-qualified key it touched:
//!
//! ```text
//! [GET] <fullKey>:<value>
//! [PUT] <fullKey>:<value>
//! [DEL] <fullKey>
//! ```
//!
//! The host controls presentation, not meaning: a minimum severity, a line
//! layout (`long`, `standard`, `short`), a timestamp layout (`date`,
//! `datetime`, `time`), and the sink (a file, or stdout when no file is
//! configured or the file cannot be created). These lines are for operators;
//! nothing parses them.
//!
//! Internal lifecycle events (construction, sink fallback, shutdown) go
//! through `tracing` instead, so hosts that install a subscriber see them in
//! their own pipeline.

pub mod format;
pub mod logger;

pub use format::{DateFormat, Level, LineFormat};
pub use logger::{DiagConfig, DiagLogger};
