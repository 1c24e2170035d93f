//! Background task that mirrors published store snapshots into storage.
//!
//! The task always writes the newest snapshot it can see. When writes are
//! slower than mutations, intermediate revisions are skipped; since every
//! write carries the whole collection, the backend still converges on the
//! latest state.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::bridge::PersistenceBridge;
use super::error::PersistError;
use crate::store::Snapshot;

/// Progress of the persister, published after every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistStatus {
    /// Nothing written since the persister started.
    Idle,
    Pending { revision: u64 },
    Saved { revision: u64 },
    Failed { revision: u64, error: String },
}

impl PersistStatus {
    /// Revision of the last finished write, successful or not.
    pub fn settled_revision(&self) -> Option<u64> {
        match self {
            PersistStatus::Saved { revision } | PersistStatus::Failed { revision, .. } => {
                Some(*revision)
            }
            PersistStatus::Idle | PersistStatus::Pending { .. } => None,
        }
    }
}

impl fmt::Display for PersistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistStatus::Idle => write!(f, "idle"),
            PersistStatus::Pending { revision } => write!(f, "saving revision {}", revision),
            PersistStatus::Saved { revision } => write!(f, "saved revision {}", revision),
            PersistStatus::Failed { revision, error } => {
                write!(f, "failed to save revision {}: {}", revision, error)
            }
        }
    }
}

/// Handle to a running persister task.
pub struct Persister {
    status: watch::Receiver<PersistStatus>,
    handle: JoinHandle<()>,
}

/// Starts persisting every snapshot published on `snapshots`.
///
/// Must be called from within a tokio runtime. The task ends once the store
/// owning the sender is dropped and its last snapshot has been written.
pub fn spawn_persister(
    bridge: Arc<PersistenceBridge>,
    mut snapshots: watch::Receiver<Snapshot>,
) -> Persister {
    let (status_tx, status_rx) = watch::channel(PersistStatus::Idle);

    let handle = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            let revision = snapshot.revision;
            status_tx.send_replace(PersistStatus::Pending { revision });

            let status = match bridge.persist(&snapshot.workouts).await {
                Ok(()) => PersistStatus::Saved { revision },
                Err(e) => PersistStatus::Failed {
                    revision,
                    error: e.to_string(),
                },
            };
            status_tx.send_replace(status);
        }
        debug!("store closed, persister stopping");
    });

    Persister {
        status: status_rx,
        handle,
    }
}

impl Persister {
    pub fn status(&self) -> PersistStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PersistStatus> {
        self.status.clone()
    }

    /// Waits until `revision` (or a later one) has been written.
    ///
    /// Fails if that write failed or the persister stopped first.
    pub async fn settled(&self, revision: u64) -> Result<(), PersistError> {
        let mut rx = self.status.clone();
        let status = rx
            .wait_for(|s| s.settled_revision().is_some_and(|r| r >= revision))
            .await
            .map_err(|_| PersistError::PersisterStopped(revision))?
            .clone();

        match status {
            PersistStatus::Failed { revision, error } => Err(PersistError::WriteFailed {
                revision,
                reason: error,
            }),
            _ => Ok(()),
        }
    }

    /// Waits for the task to finish. Only returns once the store is gone.
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            tracing::error!("Persister task failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_id::SequentialIds;
    use crate::persistence::{KeyValueBackend, MemoryBackend, WORKOUTS_KEY};
    use crate::store::Store;

    fn setup() -> (Store, Persister, Arc<MemoryBackend>, Arc<PersistenceBridge>) {
        let backend = Arc::new(MemoryBackend::new());
        let bridge = Arc::new(PersistenceBridge::new(backend.clone()));
        let store = Store::new(SequentialIds::default());
        let persister = spawn_persister(bridge.clone(), store.subscribe());
        (store, persister, backend, bridge)
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let (_store, persister, backend, _bridge) = setup();
        assert_eq!(persister.status(), PersistStatus::Idle);
        assert_eq!(backend.write_count(), 0);
    }

    #[tokio::test]
    async fn test_persists_after_mutation() {
        let (mut store, persister, _backend, bridge) = setup();

        let w = store.create_workout("Leg Day").unwrap();
        store.create_exercise(&w, "Squat").unwrap();
        persister.settled(store.revision()).await.unwrap();

        assert_eq!(bridge.restore().await, store.workouts());
        assert_eq!(
            persister.status(),
            PersistStatus::Saved {
                revision: store.revision()
            }
        );
    }

    #[tokio::test]
    async fn test_rapid_mutations_converge_on_latest() {
        let (mut store, persister, backend, bridge) = setup();

        for i in 0..10 {
            store.create_workout(&format!("Workout {}", i)).unwrap();
        }
        persister.settled(store.revision()).await.unwrap();

        // The single-threaded test runtime only let the task run once
        assert_eq!(backend.write_count(), 1);
        assert_eq!(bridge.restore().await.len(), 10);
    }

    #[tokio::test]
    async fn test_write_failure_is_observable_and_recovers() {
        let (mut store, persister, backend, bridge) = setup();

        backend.set_fail_writes(true);
        store.create_workout("Lost").unwrap();
        let result = persister.settled(store.revision()).await;
        assert!(matches!(
            result,
            Err(PersistError::WriteFailed { revision: 1, .. })
        ));
        assert!(matches!(
            persister.status(),
            PersistStatus::Failed { revision: 1, .. }
        ));
        assert_eq!(backend.get(WORKOUTS_KEY).await.unwrap(), None);

        // Next write carries the whole collection, including the earlier change
        backend.set_fail_writes(false);
        store.create_workout("Kept").unwrap();
        persister.settled(store.revision()).await.unwrap();
        assert_eq!(bridge.restore().await.len(), 2);
    }

    #[tokio::test]
    async fn test_last_snapshot_written_before_stop() {
        let (mut store, persister, _backend, bridge) = setup();

        store.create_workout("Final").unwrap();
        drop(store);
        persister.join().await;

        let restored = bridge.restore().await;
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].name, "Final");
    }

    #[tokio::test]
    async fn test_settled_after_stop_without_write() {
        let (store, persister, _backend, _bridge) = setup();
        drop(store);
        assert!(matches!(
            persister.settled(1).await,
            Err(PersistError::PersisterStopped(1))
        ));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PersistStatus::Idle.to_string(), "idle");
        assert_eq!(
            PersistStatus::Failed {
                revision: 3,
                error: "disk full".into()
            }
            .to_string(),
            "failed to save revision 3: disk full"
        );
    }
}
