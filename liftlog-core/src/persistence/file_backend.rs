//! Key-value backend storing one JSON file per key.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::backend::KeyValueBackend;
use super::error::BackendError;

/// Storage for string values on disk.
///
/// Each key maps to `<data_dir>/<key>.json`. Writes go to a temporary file
/// first and are renamed into place, so a reader sees either the previous
/// value or the new one in full.
#[derive(Debug, Clone)]
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: &str) -> Result<PathBuf, BackendError> {
        validate_key(key)?;
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

fn validate_key(key: &str) -> Result<(), BackendError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(BackendError::InvalidKey(key.to_string()))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> BackendError + '_ {
    move |source| BackendError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl KeyValueBackend for FileBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let path = self.path(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(io_error(&self.data_dir))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await.map_err(io_error(&tmp))?;
        fs::rename(&tmp, &path).await.map_err(io_error(&path))?;
        Ok(())
    }
}
