use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use redstash_core::cache::{CacheError, Result, Store};

/// A single stored value with optional expiration.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(value: String, ttl_seconds: Option<u64>) -> Self {
        let expires_at = ttl_seconds.map(|secs| Instant::now() + Duration::from_secs(secs));
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-process store with lazy TTL expiration.
///
/// Thread-safe via `Arc<RwLock<HashMap>>`; expired entries are treated as
/// absent on read rather than actively reaped.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    errors: broadcast::Sender<CacheError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (errors, _) = broadcast::channel(16);
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            errors,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn fetch(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone()))
    }

    async fn fetch_many(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
        let entries = self.entries.read().await;
        Ok(keys
            .iter()
            .map(|key| {
                entries
                    .get(key)
                    .filter(|entry| !entry.is_expired())
                    .map(|entry| entry.value.clone())
            })
            .collect())
    }

    async fn store(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), Entry::new(value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn remove(&self, keys: &[String]) -> Result<()> {
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }

    async fn eval(
        &self,
        _script: &str,
        _keys: &[String],
        _args: &[String],
    ) -> Result<Option<String>> {
        Err(CacheError::OperationFailed(
            "scripting is not supported by the in-memory store".to_string(),
        ))
    }

    fn errors(&self) -> broadcast::Receiver<CacheError> {
        self.errors.subscribe()
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
