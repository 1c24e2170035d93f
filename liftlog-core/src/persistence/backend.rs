//! Key-value backend capability and an in-memory implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

use super::error::BackendError;

/// Durable string-keyed storage.
///
/// A `set` replaces the whole value; readers never observe a partial write.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;
}

/// Backend holding values in memory. Used in tests and for dry runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Makes every subsequent `set` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable(format!(
                "writes disabled for key {}",
                key
            )));
        }
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("workouts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let backend = MemoryBackend::new();
        backend.set("k", "1").await.unwrap();
        backend.set("k", "2").await.unwrap();
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("2"));
        assert_eq!(backend.write_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_writes_keep_previous_value() {
        let backend = MemoryBackend::with_entries([("k", "old")]);
        backend.set_fail_writes(true);

        assert!(matches!(
            backend.set("k", "new").await,
            Err(BackendError::Unavailable(_))
        ));
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("old"));

        backend.set_fail_writes(false);
        backend.set("k", "new").await.unwrap();
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("new"));
    }
}
