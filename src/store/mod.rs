//! Session Store Module
//!
//! The core of the crate: a namespaced key/value map with a uniform TTL
//! and a background reaper that removes expired entries.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                 SessionStore                  │
//! │                                               │
//! │   prefix ─┐                                   │
//! │           ▼                                   │
//! │   ┌───────────────────────────┐   ┌─────────┐ │
//! │   │ Mutex<HashMap<String,     │   │  Diag   │ │
//! │   │        Entry>>            │   │ Logger  │ │
//! │   └───────────▲───────────────┘   └─────────┘ │
//! │               │ same lock                     │
//! │   ┌───────────┴───────────────┐               │
//! │   │          Reaper           │               │
//! │   │   (background tokio task, │               │
//! │   │    one sweep per second)  │               │
//! │   └───────────────────────────┘               │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Get, put, delete, and the sweep all serialize on the one map lock, so
//! each is atomic with respect to the others. The reaper is the only thing
//! that removes an entry for being expired; `get` reads whatever is
//! resident, which bounds staleness at one sweep interval.

pub mod entry;
pub mod session;

mod reaper;

pub use entry::{Entry, Expiry};
pub use session::SessionStore;
