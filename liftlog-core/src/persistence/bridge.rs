//! Persistence bridge between the store and a key-value backend.

use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::backend::KeyValueBackend;
use super::error::PersistError;
use super::export::ExportDocument;
use crate::models::Workout;

/// Key holding the serialized collection.
pub const WORKOUTS_KEY: &str = "workouts";
/// Key holding the data version marker.
pub const VERSION_KEY: &str = "data_version";
/// Version of the stored data format written by this build.
pub const DATA_VERSION: &str = "1.0.0";

/// Runs when stored data is older than [`DATA_VERSION`].
/// Receives the stored version and the current one.
pub type MigrationHook = Box<dyn Fn(&str, &str) -> Result<(), PersistError> + Send + Sync>;

/// What `initialize` found in the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// No version marker; the current one was written.
    FirstRun,
    /// Stored data was older; the migration hook ran and the marker was updated.
    Migrated { from: String },
    /// Marker already current (or newer).
    UpToDate { version: String },
}

/// Reads and writes the whole workout collection under a single key.
pub struct PersistenceBridge {
    backend: Arc<dyn KeyValueBackend>,
    migrate: MigrationHook,
}

impl PersistenceBridge {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self {
            backend,
            migrate: Box::new(|_, _| Ok(())),
        }
    }

    /// Replaces the default no-op migration hook.
    pub fn with_migration(mut self, hook: MigrationHook) -> Self {
        self.migrate = hook;
        self
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueBackend> {
        &self.backend
    }

    /// Checks the version marker, migrating older data.
    ///
    /// Must complete before the restored collection is loaded into the store.
    pub async fn initialize(&self) -> Result<InitOutcome, PersistError> {
        let stored = self.backend.get(VERSION_KEY).await?;

        let outcome = match stored {
            None => {
                self.backend.set(VERSION_KEY, DATA_VERSION).await?;
                info!(version = DATA_VERSION, "initialized storage");
                InitOutcome::FirstRun
            }
            Some(version) if compare_versions(&version, DATA_VERSION) == Ordering::Less => {
                info!(from = %version, to = DATA_VERSION, "migrating stored data");
                (self.migrate)(&version, DATA_VERSION)?;
                self.backend.set(VERSION_KEY, DATA_VERSION).await?;
                InitOutcome::Migrated { from: version }
            }
            Some(version) => {
                debug!(version = %version, "storage up to date");
                InitOutcome::UpToDate { version }
            }
        };

        Ok(outcome)
    }

    /// Loads the stored collection.
    ///
    /// Missing, unreadable or corrupt data yields an empty collection.
    pub async fn restore(&self) -> Vec<Workout> {
        let payload = match self.backend.get(WORKOUTS_KEY).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("no stored workouts");
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read workouts: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Workout>>(&payload) {
            Ok(workouts) => {
                info!("Restored {} workout(s)", workouts.len());
                workouts
            }
            Err(e) => {
                warn!("Stored workouts are unreadable, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Overwrites the stored collection with `workouts`.
    pub async fn persist(&self, workouts: &[Workout]) -> Result<(), PersistError> {
        let payload = serde_json::to_string(workouts)?;
        if let Err(e) = self.backend.set(WORKOUTS_KEY, &payload).await {
            error!("Failed to save workouts: {}", e);
            return Err(e.into());
        }
        debug!(workouts = workouts.len(), bytes = payload.len(), "saved workouts");
        Ok(())
    }

    /// Pretty JSON export of `workouts`, or `None` if serialization fails.
    pub fn export_snapshot(&self, workouts: &[Workout]) -> Option<String> {
        let document = ExportDocument::new(DATA_VERSION, workouts.to_vec());
        match document.to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                warn!("Failed to export workouts: {}", e);
                None
            }
        }
    }
}

/// Compares dotted version strings numerically, component by component.
///
/// Missing components count as zero; non-numeric components sort lowest.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<Option<u64>> {
        v.trim().split('.').map(|part| part.parse().ok()).collect()
    };
    let (a, b) = (parse(a), parse(b));
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(Some(0));
        let y = b.get(i).copied().unwrap_or(Some(0));
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}
