//! Mirroring the store into durable key-value storage.
//!
//! # Storage Layout
//!
//! Two keys in the backend:
//! - `workouts`: JSON array with the whole collection, overwritten on every change
//! - `data_version`: version marker used to gate the migration hook
//!
//! With [`FileBackend`] each key is a file in the data directory:
//!
//! ```text
//! ~/.local/share/liftlog/
//! ├── workouts.json
//! └── data_version.json
//! ```

mod backend;
mod bridge;
mod error;
mod export;
mod file_backend;
mod persister;

pub use backend::{KeyValueBackend, MemoryBackend};
pub use bridge::{
    compare_versions, InitOutcome, MigrationHook, PersistenceBridge, DATA_VERSION, VERSION_KEY,
    WORKOUTS_KEY,
};
pub use error::{BackendError, PersistError};
pub use export::ExportDocument;
pub use file_backend::FileBackend;
pub use persister::{spawn_persister, PersistStatus, Persister};
