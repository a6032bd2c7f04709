//! # sessionkv - An In-Memory Session Key-Value Store
//!
//! sessionkv holds short-lived session data (OAuth/OIDC state, tokens)
//! entirely in process memory. It serves concurrent reads, writes, and
//! deletes from many callers and discards entries whose lifetime has
//! elapsed without the caller ever invoking cleanup.
//!
//! ## Features
//!
//! - **Namespaced keys**: a configured prefix is joined in front of every
//!   caller-supplied key, so logical stores sharing a host do not collide
//! - **Uniform TTL**: one configured lifetime, in whole minutes, applied
//!   by every write
//! - **Background reaper**: a periodic task removes expired entries; it is
//!   owned by the store and stops when the store is closed or dropped
//! - **Diagnostic log**: one line per operation, routed to a file or
//!   stdout with host-configured severity, line layout, and timestamp
//!   layout
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       SessionStore                       │
//! │                                                          │
//! │  get/put/delete ──► ┌──────────────────────────┐         │
//! │                     │  Mutex<HashMap<String,   │         │
//! │                     │         Entry>>          │         │
//! │                     └────────────▲─────────────┘         │
//! │                                  │ same lock             │
//! │                     ┌────────────┴─────────────┐         │
//! │                     │          Reaper          │         │
//! │                     │  (background tokio task) │         │
//! │                     └──────────────────────────┘         │
//! │                                                          │
//! │  [GET]/[PUT]/[DEL] lines ──► DiagLogger ──► file|stdout  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use sessionkv::{SessionConfig, SessionStore};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), sessionkv::SessionError> {
//!     let store = SessionStore::new(
//!         SessionConfig::default()
//!             .with_prefix("oauth")
//!             .with_ttl_minutes(30),
//!     );
//!
//!     store.put("state:abc123", "pending")?;
//!     assert_eq!(store.get("state:abc123")?, "pending");
//!
//!     store.delete("state:abc123")?;
//!     assert_eq!(store.get("state:abc123")?, "");
//!
//!     store.close()?;
//!     Ok(())
//! }
//! ```
//!
//! Hosts that pass configuration as a loose settings map (the plugin
//! contract) use [`SessionConfig::from_settings`]; every key is optional
//! and wrong values fall back to defaults instead of failing.
//!
//! ## Module Overview
//!
//! - [`store`]: the session store, its entry representation, and the
//!   background reaper
//! - [`config`]: typed configuration plus the loose settings surface
//! - [`diag`]: the per-instance diagnostic logger
//!
//! ## Design Highlights
//!
//! ### One coarse lock
//!
//! All access to the map, operations and sweep alike, serializes on a
//! single mutex held only for the map step itself. Operations on one store
//! observe a total order set by lock acquisition; racing writes to one key
//! resolve last-writer-wins.
//!
//! ### Bounded staleness instead of read-time expiry
//!
//! `get` never evaluates the expiry predicate. An expired entry stays
//! readable until the next sweep removes it, at most one sweep interval
//! (one second by default). That window is the contract, not an accident;
//! the reaper is the single place expiry acts.
//!
//! ### Infallible operations
//!
//! A missing key reads as an empty string, deleting a missing key is a
//! no-op, and a diagnostic file that cannot be created falls back to
//! stdout. The `Result` signatures stay, so the contract has room for
//! future failure modes without breaking callers.

pub mod config;
pub mod diag;
pub mod error;
pub mod store;

// Re-export the types a host needs for the common path
pub use config::{SessionConfig, DEFAULT_PREFIX, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL_MINUTES};
pub use diag::{DateFormat, DiagConfig, DiagLogger, Level, LineFormat};
pub use error::SessionError;
pub use store::{Entry, Expiry, SessionStore};

/// Version of sessionkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
