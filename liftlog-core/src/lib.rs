//! liftlog core library
//!
//! Workout models, the in-memory store that owns them, and the persistence
//! bridge that mirrors the store into key-value storage.

pub mod entity_id;
pub mod models;
pub mod persistence;
pub mod session;
pub mod store;

pub use entity_id::{EntityId, EntityIdError, IdGenerator, SequentialIds, UuidIds};
pub use models::{history_order, Exercise, Summary, Workout, WorkoutSet};
pub use persistence::{
    BackendError, ExportDocument, FileBackend, InitOutcome, KeyValueBackend, MemoryBackend,
    PersistError, PersistStatus, PersistenceBridge, DATA_VERSION,
};
pub use session::{Session, StartupReport};
pub use store::{Command, SetInput, Snapshot, Store, StoreError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
