//! Application session: startup sequence plus a running persister.
//!
//! # Startup
//!
//! 1. `initialize` checks the version marker (running the migration hook if needed)
//! 2. `restore` reads the stored collection (empty on any failure)
//! 3. the store is loaded with it
//! 4. the persister starts mirroring every later change
//!
//! Initialization failures do not abort startup; they are reported in
//! [`StartupReport`] so the shell can decide what to do.

use std::sync::Arc;
use tracing::error;

use crate::entity_id::IdGenerator;
use crate::persistence::{
    spawn_persister, InitOutcome, KeyValueBackend, PersistError, PersistStatus,
    PersistenceBridge, Persister,
};
use crate::store::Store;

/// Result of the startup sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub initialized: bool,
    pub init: Option<InitOutcome>,
    pub error: Option<String>,
    pub restored: usize,
}

pub struct Session {
    store: Store,
    bridge: Arc<PersistenceBridge>,
    persister: Persister,
    // Revision right after the startup load; nothing newer means nothing to flush
    baseline: u64,
    report: StartupReport,
}

impl Session {
    pub async fn start(backend: Arc<dyn KeyValueBackend>, ids: impl IdGenerator + 'static) -> Self {
        Self::start_with_bridge(PersistenceBridge::new(backend), ids).await
    }

    /// Starts with a preconfigured bridge (custom migration hook).
    pub async fn start_with_bridge(
        bridge: PersistenceBridge,
        ids: impl IdGenerator + 'static,
    ) -> Self {
        let (init, init_error) = match bridge.initialize().await {
            Ok(outcome) => (Some(outcome), None),
            Err(e) => {
                error!("Storage initialization failed: {}", e);
                (None, Some(e.to_string()))
            }
        };

        let workouts = bridge.restore().await;
        let restored = workouts.len();

        let mut store = Store::new(ids);
        store.load_all(workouts);
        let baseline = store.revision();

        let bridge = Arc::new(bridge);
        let persister = spawn_persister(Arc::clone(&bridge), store.subscribe());

        Self {
            store,
            bridge,
            persister,
            baseline,
            report: StartupReport {
                initialized: init.is_some(),
                init,
                error: init_error,
                restored,
            },
        }
    }

    pub fn report(&self) -> &StartupReport {
        &self.report
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn persist_status(&self) -> PersistStatus {
        self.persister.status()
    }

    /// Waits until the current revision is durably written.
    pub async fn flush(&self) -> Result<(), PersistError> {
        let revision = self.store.revision();
        if revision <= self.baseline {
            return Ok(());
        }
        self.persister.settled(revision).await
    }

    /// Export document for the current collection.
    pub fn export(&self) -> Option<String> {
        self.bridge.export_snapshot(self.store.workouts())
    }

    /// Flushes, then stops the persister.
    pub async fn close(self) -> Result<(), PersistError> {
        let result = self.flush().await;
        let Session {
            store, persister, ..
        } = self;
        drop(store);
        persister.join().await;
        result
    }
}
