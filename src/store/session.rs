//! The session store.
//!
//! One coarse mutex guards the whole map. Every operation is a single
//! lock-hold around a map lookup, insert, or remove, and the reaper's sweep
//! takes the same lock, so operations and sweeps are mutually exclusive and
//! each completes as an atomic step. The lock is never held across I/O or
//! an await point; diagnostic lines are written after it is released.
//!
//! Sharding the map would cut contention under heavy load, but session
//! traffic does not get there and a single lock keeps the ordering story
//! trivial: operations on one store observe a total order set by lock
//! acquisition, and two racing `put`s on one key resolve to whichever
//! acquired the lock last.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::SessionConfig;
use crate::diag::DiagLogger;
use crate::error::SessionError;

use super::entry::{Entry, Expiry};
use super::reaper::Reaper;

/// The map and its lock, shared between the store handle and the reaper
/// task.
#[derive(Debug, Default)]
pub(crate) struct Shared {
    pub(crate) items: Mutex<HashMap<String, Entry>>,
}

impl Shared {
    /// Removes every entry whose expiry predicate holds at `now`. One lock
    /// hold, O(n) in resident entries. Returns how many were removed.
    pub(crate) fn sweep(&self, now: Instant) -> usize {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|_, entry| !entry.expires.is_expired(now));
        before - items.len()
    }
}

/// Joins the namespace prefix and a caller-supplied key into the
/// fully-qualified key. Empty segments drop out and a separator is never
/// doubled.
fn full_key(prefix: &str, key: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let key = key.trim_start_matches('/');
    match (prefix.is_empty(), key.is_empty()) {
        (true, _) => key.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{}/{}", prefix, key),
    }
}

/// An in-memory, TTL-bounded session key/value store.
///
/// Holds short-lived session data (OAuth/OIDC state, tokens) under a
/// configured namespace prefix. Every `put` applies the store's uniform
/// TTL; a background reaper removes entries once their lifetime has
/// elapsed, so callers never clean up.
///
/// Construction wires everything in one step: the diagnostic sink is
/// opened and the reaper is started before the value is returned, so there
/// is no window in which an operation can run against a half-initialized
/// store. The reaper task stops when [`close`](SessionStore::close) is
/// called or the store is dropped.
///
/// # Staleness bound
///
/// [`get`](SessionStore::get) does not check expiry. A value stays
/// readable until the reaper physically removes it, which happens within
/// one sweep interval (one second by default) of the entry becoming
/// expired. Callers that cannot tolerate that window should treat the TTL
/// as already shortened by it.
///
/// # Example
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), sessionkv::SessionError> {
/// use sessionkv::{SessionConfig, SessionStore};
///
/// let store = SessionStore::new(SessionConfig::default().with_prefix("oauth"));
/// store.put("state:abc", "pending")?;
/// assert_eq!(store.get("state:abc")?, "pending");
/// store.delete("state:abc")?;
/// assert_eq!(store.get("state:abc")?, "");
/// store.close()?;
/// # Ok(())
/// # }
/// ```
pub struct SessionStore {
    shared: Arc<Shared>,
    prefix: String,
    ttl: Duration,
    logger: DiagLogger,
    reaper: Reaper,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionStore {
    /// Creates the store, opens the diagnostic sink, and starts the
    /// reaper.
    ///
    /// Never fails: a diagnostic file that cannot be created falls back to
    /// stdout. Must be called inside a tokio runtime because the reaper is
    /// a spawned task.
    pub fn new(config: SessionConfig) -> Self {
        let logger = DiagLogger::open(&config.log);
        let shared = Arc::new(Shared::default());
        let reaper = Reaper::start(Arc::clone(&shared), config.sweep_interval);

        debug!(
            prefix = %config.prefix,
            ttl_minutes = config.ttl_minutes,
            sweep_interval_ms = config.sweep_interval.as_millis() as u64,
            "session store created"
        );

        Self {
            shared,
            prefix: config.prefix,
            ttl: Duration::from_secs(config.ttl_minutes.saturating_mul(60)),
            logger,
            reaper,
        }
    }

    /// Returns the stored value for `key`, or the empty string when the
    /// key is absent or already swept. Never an error: a miss is a normal
    /// result.
    ///
    /// Expiry is not checked here; see the staleness bound on the type.
    pub fn get(&self, key: &str) -> Result<String, SessionError> {
        let full_key = full_key(&self.prefix, key);
        let value = {
            let items = self.shared.items.lock().unwrap();
            items
                .get(&full_key)
                .map(|entry| entry.value.clone())
                .unwrap_or_default()
        };
        self.logger.debug(&format!("[GET] {}:{}", full_key, value));
        Ok(value)
    }

    /// Stores `value` under `key` with the configured TTL, unconditionally
    /// replacing any existing entry. Two racing `put`s on one key resolve
    /// last-writer-wins by lock order.
    pub fn put(&self, key: &str, value: impl Into<String>) -> Result<(), SessionError> {
        let full_key = full_key(&self.prefix, key);
        let value = value.into();
        let expires = Expiry::At(Instant::now() + self.ttl);
        {
            let mut items = self.shared.items.lock().unwrap();
            items.insert(full_key.clone(), Entry::new(value.clone(), expires));
        }
        self.logger.debug(&format!("[PUT] {}:{}", full_key, value));
        Ok(())
    }

    /// Removes the entry for `key` if present. A miss is a no-op, not an
    /// error, so repeated deletes are safe.
    pub fn delete(&self, key: &str) -> Result<(), SessionError> {
        let full_key = full_key(&self.prefix, key);
        {
            let mut items = self.shared.items.lock().unwrap();
            items.remove(&full_key);
        }
        self.logger.debug(&format!("[DEL] {}", full_key));
        Ok(())
    }

    /// Stops the reaper and releases the diagnostic sink. A file sink is
    /// flushed and dropped; stdout is left untouched. Safe to call more
    /// than once.
    pub fn close(&self) -> Result<(), SessionError> {
        self.reaper.stop();
        debug!(prefix = %self.prefix, "session store closed");
        self.logger.close()
    }

    /// Number of resident entries, expired-but-unswept ones included.
    pub fn len(&self) -> usize {
        self.shared.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Level;
    use serde_json::json;
    use std::collections::HashMap;

    fn quiet_config() -> SessionConfig {
        // Info suppresses the per-operation debug lines on stdout.
        SessionConfig::default().with_log_level(Level::Info)
    }

    #[test]
    fn test_full_key_joins_with_separator() {
        assert_eq!(full_key("memory", "key"), "memory/key");
        assert_eq!(full_key("/memory", "key"), "/memory/key");
        assert_eq!(full_key("memory/", "/key"), "memory/key");
        assert_eq!(full_key("", "key"), "key");
        assert_eq!(full_key("memory", ""), "memory");
    }

    #[tokio::test]
    async fn test_put_then_get_returns_value() {
        let store = SessionStore::new(quiet_config());
        store.put("key", "test").unwrap();
        assert_eq!(store.get("key").unwrap(), "test");
        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_get_missing_returns_empty_string() {
        let store = SessionStore::new(quiet_config());
        assert_eq!(store.get("never-written").unwrap(), "");
        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_put_overwrites_last_writer_wins() {
        let store = SessionStore::new(quiet_config());
        store.put("key", "first").unwrap();
        store.put("key", "second").unwrap();
        assert_eq!(store.get("key").unwrap(), "second");
        assert_eq!(store.len(), 1);
        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let store = SessionStore::new(quiet_config());
        store.put("key", "test").unwrap();
        store.delete("key").unwrap();
        assert_eq!(store.get("key").unwrap(), "");
        assert!(store.is_empty());
        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop_and_idempotent() {
        let store = SessionStore::new(quiet_config());
        store.put("other", "kept").unwrap();

        store.delete("absent").unwrap();
        store.delete("absent").unwrap();

        assert_eq!(store.get("other").unwrap(), "kept");
        assert_eq!(store.len(), 1);
        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_prefixes_namespace_independent_stores() {
        let p = SessionStore::new(quiet_config().with_prefix("p"));
        let q = SessionStore::new(quiet_config().with_prefix("q"));

        p.put("a", "x").unwrap();

        assert_eq!(p.get("a").unwrap(), "x");
        assert_eq!(q.get("a").unwrap(), "");

        p.close().unwrap();
        q.close().unwrap();
    }

    #[tokio::test]
    async fn test_zero_ttl_entry_is_swept_within_interval() {
        let store = SessionStore::new(
            quiet_config()
                .with_ttl_minutes(0)
                .with_sweep_interval(Duration::from_millis(20)),
        );

        store.put("ephemeral", "gone soon").unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(store.get("ephemeral").unwrap(), "");
        assert!(store.is_empty());
        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_live_entries_survive_sweeps() {
        let store = SessionStore::new(
            quiet_config()
                .with_ttl_minutes(60)
                .with_sweep_interval(Duration::from_millis(20)),
        );

        store.put("token", "opaque").unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(store.get("token").unwrap(), "opaque");
        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_distinct_keys() {
        use std::thread;

        let store = Arc::new(SessionStore::new(quiet_config()));
        let mut handles = vec![];

        for t in 0..10 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("key-{}-{}", t, i);
                    store.put(&key, "value").unwrap();
                    assert_eq!(store.get(&key).unwrap(), "value");
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 1000);
        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_same_key_never_corrupts() {
        use std::thread;

        let store = Arc::new(SessionStore::new(quiet_config()));
        let mut handles = vec![];

        for t in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for i in 0..200 {
                    match i % 3 {
                        0 => store.put("contended", format!("value-{}", t)).unwrap(),
                        1 => {
                            let value = store.get("contended").unwrap();
                            // Either a miss or a complete write; never a
                            // torn one.
                            assert!(value.is_empty() || value.starts_with("value-"));
                        }
                        _ => store.delete("contended").unwrap(),
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let value = store.get("contended").unwrap();
        assert!(value.is_empty() || value.starts_with("value-"));
        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_log_file_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");

        let settings: HashMap<String, serde_json::Value> = [
            ("prefix".to_string(), json!("/memory")),
            ("filename".to_string(), json!(path.to_string_lossy())),
            ("loglevel".to_string(), json!("debug")),
            ("logformat".to_string(), json!("short")),
            ("logdateformat".to_string(), json!("date")),
        ]
        .into();

        let store = SessionStore::new(SessionConfig::from_settings(&settings));

        store.put("key", "test").unwrap();
        assert_eq!(store.get("key").unwrap(), "test");
        store.delete("key").unwrap();
        assert_eq!(store.get("key").unwrap(), "");

        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[PUT] /memory/key:test"));
        assert!(content.contains("[GET] /memory/key:test"));
        assert!(content.contains("[DEL] /memory/key"));

        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_empty_filename_scenario_creates_no_file() {
        let settings: HashMap<String, serde_json::Value> = [
            ("prefix".to_string(), json!("/memory")),
            ("filename".to_string(), json!("")),
            ("loglevel".to_string(), json!("debug")),
        ]
        .into();

        let config = SessionConfig::from_settings(&settings);
        assert!(config.log.filename.is_none());

        let store = SessionStore::new(config);
        store.put("key", "test").unwrap();
        assert_eq!(store.get("key").unwrap(), "test");
        store.close().unwrap();
    }

    #[tokio::test]
    async fn test_close_twice_is_safe() {
        let store = SessionStore::new(quiet_config());
        store.put("key", "test").unwrap();
        store.close().unwrap();
        store.close().unwrap();
    }
}
