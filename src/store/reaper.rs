//! Background reaper.
//!
//! Expiry is passive everywhere else in the store: `get` does not check it
//! and nothing removes an entry on access. Without a collector, an entry
//! whose session ended would sit in memory for the process lifetime. The
//! reaper is that collector: a periodic task that takes the store lock once
//! per tick and removes every entry whose expiry predicate holds.
//!
//! The task is owned, not fire-and-forget. [`Reaper::start`] returns a
//! handle; signaling it (or dropping it) terminates the loop, so a store
//! that is closed or dropped does not leave a task ticking behind it.
//!
//! The sweep body does no I/O, never logs, and has no failure path.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;

use super::session::Shared;

/// Handle to the running reaper task.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub(crate) struct Reaper {
    shutdown_tx: watch::Sender<bool>,
}

impl Reaper {
    /// Spawns the reaper over the given shared state, sweeping once per
    /// `interval`.
    pub(crate) fn start(shared: Arc<Shared>, interval: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(reaper_loop(shared, interval, shutdown_rx));

        Self { shutdown_tx }
    }

    /// Signals the task to stop. Called from `close` and from `Drop`;
    /// repeat signals are harmless.
    pub(crate) fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for Reaper {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn reaper_loop(shared: Arc<Shared>, interval: Duration, mut shutdown_rx: watch::Receiver<bool>) {
    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    return;
                }
            }
        }

        shared.sweep(Instant::now());
    }
}
