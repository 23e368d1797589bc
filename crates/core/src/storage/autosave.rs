//! Debounced background persistence.
//!
//! The host publishes each committed snapshot through [`AutosaveHandle::notify`].
//! A single task waits until no new snapshot has arrived for the debounce
//! window, then writes the latest one. Identical documents are not rewritten.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, sleep};
use tracing::{debug, error, info};

use super::error::StorageError;
use super::service::SnapshotStore;
use crate::snapshot::SnapshotService;
use crate::state::AppState;

type FlushAck = oneshot::Sender<Result<bool, StorageError>>;

/// Sender side of the autosave task.
#[derive(Clone)]
pub struct AutosaveHandle {
    snapshots: Arc<watch::Sender<AppState>>,
    flushes: mpsc::Sender<FlushAck>,
}

impl AutosaveHandle {
    /// Publishes a committed snapshot; it is written after the debounce window.
    pub fn notify(&self, state: AppState) {
        self.snapshots.send_replace(state);
    }

    /// Writes the latest snapshot now.
    ///
    /// Returns `true` when a write happened, `false` when the stored document
    /// was already up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or the task has stopped.
    pub async fn flush(&self) -> Result<bool, StorageError> {
        let (ack, done) = oneshot::channel();
        self.flushes
            .send(ack)
            .await
            .map_err(|_| StorageError::Closed)?;
        done.await.map_err(|_| StorageError::Closed)?
    }
}

/// Background writer.
pub struct Autosaver {
    store: Arc<SnapshotStore>,
    debounce: Duration,
    last_written: Option<String>,
}

impl Autosaver {
    /// Spawns the autosave task on the current runtime.
    ///
    /// `initial` is the document as loaded; publishing it again is not a change.
    #[must_use]
    pub fn spawn(store: Arc<SnapshotStore>, initial: AppState, debounce: Duration) -> AutosaveHandle {
        let last_written = SnapshotService::export_json(&initial).ok();
        let (snapshots, rx) = watch::channel(initial);
        let (flushes, flush_rx) = mpsc::channel(8);

        let saver = Self {
            store,
            debounce,
            last_written,
        };
        tokio::spawn(saver.run(rx, flush_rx));

        AutosaveHandle {
            snapshots: Arc::new(snapshots),
            flushes,
        }
    }

    async fn run(mut self, mut rx: watch::Receiver<AppState>, mut flush_rx: mpsc::Receiver<FlushAck>) {
        info!(debounce_ms = self.debounce.as_millis(), "Autosave started");
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    let open = changed.is_ok() && self.settle(&mut rx, &mut flush_rx).await;
                    if let Err(e) = self.write_latest(&mut rx).await {
                        error!(error = %e, "Autosave failed");
                    }
                    if !open {
                        break;
                    }
                }
                Some(ack) = flush_rx.recv() => {
                    let result = self.write_latest(&mut rx).await;
                    let _ = ack.send(result);
                }
            }
        }
        info!("Autosave stopped");
    }

    /// Waits until the debounce window passes without a new snapshot, or
    /// until a flush cuts it short. Returns `false` once every handle has
    /// been dropped.
    async fn settle(
        &mut self,
        rx: &mut watch::Receiver<AppState>,
        flush_rx: &mut mpsc::Receiver<FlushAck>,
    ) -> bool {
        let deadline = sleep(self.debounce);
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                () = &mut deadline => return true,
                changed = rx.changed() => {
                    if changed.is_err() {
                        return false;
                    }
                    deadline.as_mut().reset(Instant::now() + self.debounce);
                }
                Some(ack) = flush_rx.recv() => {
                    let result = self.write_latest(rx).await;
                    let _ = ack.send(result);
                    return true;
                }
            }
        }
    }

    async fn write_latest(&mut self, rx: &mut watch::Receiver<AppState>) -> Result<bool, StorageError> {
        let raw = SnapshotService::export_json(&rx.borrow_and_update())?;
        if self.last_written.as_deref() == Some(raw.as_str()) {
            debug!("Snapshot unchanged, skipping write");
            return Ok(false);
        }
        self.store.save_raw(&raw).await?;
        self.last_written = Some(raw);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RecordService;
    use crate::state::fixtures::{building, two_buildings};

    const DEBOUNCE: Duration = Duration::from_millis(20);

    fn store() -> Arc<SnapshotStore> {
        Arc::new(SnapshotStore::in_memory("snapshot.json").unwrap())
    }

    #[tokio::test]
    async fn test_flush_writes_latest_snapshot() {
        let store = store();
        let handle = Autosaver::spawn(store.clone(), AppState::default(), Duration::from_secs(60));

        handle.notify(two_buildings());

        assert!(handle.flush().await.unwrap());
        assert_eq!(store.load().await.unwrap(), two_buildings());
    }

    #[tokio::test]
    async fn test_unchanged_document_is_not_rewritten() {
        let store = store();
        let handle = Autosaver::spawn(store.clone(), AppState::default(), DEBOUNCE);

        handle.notify(AppState::default());

        assert!(!handle.flush().await.unwrap());
        assert!(!store.exists().await);
    }

    #[tokio::test]
    async fn test_rapid_commits_coalesce_to_latest() {
        let store = store();
        let handle = Autosaver::spawn(store.clone(), AppState::default(), DEBOUNCE);

        let first = two_buildings();
        let second = RecordService::add_building(&first, building("b3", &["C"]));
        handle.notify(first);
        handle.notify(second.clone());
        tokio::time::sleep(DEBOUNCE * 10).await;

        assert_eq!(store.load().await.unwrap(), second);
        assert!(!handle.flush().await.unwrap());
    }
}
