use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{CacheError, Result};

/// Low-level handle to an external key-value store.
///
/// The store performs all actual storage, expiration, and scripting; the
/// adapter only serializes values and translates errors. Values cross this
/// boundary as JSON text. Key namespacing (prefixing) is the backend's
/// concern.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetches the raw value for a single key.
    async fn fetch(&self, key: &str) -> Result<Option<String>>;

    /// Fetches raw values for several keys in one batched round trip.
    ///
    /// The result is positionally aligned with the input keys; absent
    /// entries are `None` in their position.
    async fn fetch_many(&self, keys: &[String]) -> Result<Vec<Option<String>>>;

    /// Stores a raw value, optionally expiring after `ttl_seconds`.
    async fn store(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<()>;

    /// Removes several keys in one batched round trip.
    async fn remove(&self, keys: &[String]) -> Result<()>;

    /// Runs a store-side script with the key-count-prefixed argument
    /// convention: the store receives the number of key arguments, the keys
    /// themselves, then the remaining parameters.
    async fn eval(&self, script: &str, keys: &[String], args: &[String])
        -> Result<Option<String>>;

    /// Subscribes to transport-level error notifications.
    ///
    /// Backends deliver errors already wrapped as
    /// [`CacheError::ConnectionFailed`]; expected reconnection noise is
    /// filtered out before it reaches this channel.
    fn errors(&self) -> broadcast::Receiver<CacheError>;

    /// Releases the underlying connection.
    async fn close(&self) -> Result<()>;
}
