//! Error types for the session store.

use thiserror::Error;

/// Errors a store operation can report.
///
/// Every public operation keeps a `Result` signature so callers have a
/// failure channel, but none of the defined behaviors actually produce one:
/// a missing key is an empty value, a delete on a missing key is a no-op,
/// and a diagnostic sink that cannot be opened falls back to stdout instead
/// of failing the store.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The diagnostic sink rejected a write or close.
    #[error("diagnostic sink unavailable: {0}")]
    Sink(#[from] std::io::Error),
}
