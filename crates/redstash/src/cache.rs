//! The cache adapter.
//!
//! Translates simple cache verbs into store calls, serializes values as
//! JSON, and surfaces failures either as returned errors (`get`, `get_many`,
//! `execute`) or as events on a broadcast error channel (`set`, `clear`).
//!
//! # Fire-and-forget contract
//!
//! `set` and `clear` do not report store-level failures to the caller. The
//! command is issued from a spawned task and any failure is wrapped into a
//! [`CacheError`] and emitted on the channel returned by
//! [`Cache::subscribe_errors`]. Callers that do not subscribe silently lose
//! that failure information; this is the intended contract, not an
//! oversight. The `Result` these methods do return carries only local
//! precondition and serialization failures, produced before any store
//! interaction.
//!
//! # Ordering
//!
//! Operations apply in invocation order. Writes are enqueued on a single
//! writer task that issues them sequentially, and reads drain that queue
//! before touching the store, so a `get` following an unawaited `set`
//! observes the written value.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot};

use redstash_core::cache::{decode_value, encode_value, CacheError, Result, Store};

/// Capacity of the adapter's broadcast error channel. Slow subscribers lag
/// and drop old events rather than block operations.
const ERROR_CHANNEL_CAPACITY: usize = 100;

/// Cache adapter over an external key-value store.
///
/// Owns the store handle exclusively; the handle is shared only with the
/// adapter's own writer task. Dropping the adapter (or calling
/// [`Cache::close`]) releases the connection.
pub struct Cache {
    name: String,
    store: Arc<dyn Store>,
    commands: mpsc::UnboundedSender<Command>,
    errors: broadcast::Sender<CacheError>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A fire-and-forget write queued for the writer task.
enum Command {
    Store {
        key: String,
        value: String,
        ttl: Option<u64>,
    },
    Remove {
        keys: Vec<String>,
    },
    /// Resolves once every command queued ahead of it has been issued.
    Flush(oneshot::Sender<()>),
}

impl Cache {
    /// Connects to Redis using the given configuration.
    ///
    /// Fails fast with [`CacheError::InvalidConfig`] when the connection
    /// parameters are absent, before any connection is attempted.
    #[cfg(feature = "redis")]
    pub async fn connect(config: crate::config::CacheConfig) -> Result<Self> {
        config.validate()?;
        let name = config.name().to_string();
        let store = crate::redis_impl::RedisStore::connect(&name, &config.redis).await?;
        Ok(Self::with_store(name, Arc::new(store)))
    }

    /// Wraps an already-constructed store backend.
    ///
    /// This is the seam used by tests and by alternative backends such as
    /// [`crate::memory::MemoryStore`].
    pub fn with_store(name: impl Into<String>, store: Arc<dyn Store>) -> Self {
        let name = name.into();
        let (errors, _) = broadcast::channel(ERROR_CHANNEL_CAPACITY);

        // Re-emit the store's transport error notifications on the adapter's
        // own channel. The loop ends when the store drops its sender.
        let mut store_errors = store.errors();
        let tx = errors.clone();
        let task_name = name.clone();
        tokio::spawn(async move {
            loop {
                match store_errors.recv().await {
                    Ok(error) => {
                        tracing::error!(cache = %task_name, %error, "store connection error");
                        // Ignore send errors (no subscribers).
                        let _ = tx.send(error);
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        // Issue fire-and-forget writes from a single task so they reach the
        // store in invocation order. Failures are emitted on the error
        // channel; the loop ends when the adapter drops its sender.
        let (commands, mut queue) = mpsc::unbounded_channel();
        let writer_store = Arc::clone(&store);
        let writer_errors = errors.clone();
        let writer_name = name.clone();
        tokio::spawn(async move {
            while let Some(command) = queue.recv().await {
                match command {
                    Command::Store { key, value, ttl } => {
                        let started = Instant::now();
                        match writer_store.store(&key, &value, ttl).await {
                            Ok(()) => {
                                let elapsed_ms = started.elapsed().as_millis() as u64;
                                tracing::trace!(cache = %writer_name, op = "set", elapsed_ms, "store round trip");
                                tracing::debug!(cache = %writer_name, key = %key, ttl = ?ttl, "cached value");
                            }
                            Err(error) => {
                                let wrapped = CacheError::Set(cause(error));
                                tracing::error!(cache = %writer_name, error = %wrapped, "set failed");
                                let _ = writer_errors.send(wrapped);
                            }
                        }
                    }
                    Command::Remove { keys } => {
                        let started = Instant::now();
                        match writer_store.remove(&keys).await {
                            Ok(()) => {
                                let elapsed_ms = started.elapsed().as_millis() as u64;
                                tracing::trace!(cache = %writer_name, op = "clear", elapsed_ms, "store round trip");
                                tracing::debug!(cache = %writer_name, keys = ?keys, "cleared keys");
                            }
                            Err(error) => {
                                let wrapped = CacheError::Clear(cause(error));
                                tracing::error!(cache = %writer_name, error = %wrapped, "clear failed");
                                let _ = writer_errors.send(wrapped);
                            }
                        }
                    }
                    Command::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });

        Self {
            name,
            store,
            commands,
            errors,
        }
    }

    /// Queues a write for the writer task.
    fn enqueue(&self, command: Command) {
        // The queue only closes if the writer task itself died.
        if self.commands.send(command).is_err() {
            tracing::error!(cache = %self.name, "cache writer stopped, dropping command");
            let _ = self
                .errors
                .send(CacheError::OperationFailed("cache writer stopped".to_string()));
        }
    }

    /// Waits until every write enqueued before this call has been issued,
    /// so reads observe earlier fire-and-forget writes.
    async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.commands.send(Command::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }

    /// The adapter name used for logging correlation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subscribes to the adapter's error event channel.
    ///
    /// Carries store failures from fire-and-forget operations and re-emitted
    /// transport errors from the store connection.
    pub fn subscribe_errors(&self) -> broadcast::Receiver<CacheError> {
        self.errors.subscribe()
    }

    /// Fetches and JSON-decodes the value for a single key.
    ///
    /// Resolves to `None` when the key is absent. A stored value that fails
    /// to parse as JSON is logged and swallowed as `None`, never surfaced as
    /// an error.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        if key.is_empty() {
            return Err(CacheError::MissingArgument("key"));
        }
        self.flush().await;

        let started = Instant::now();
        let raw = self
            .store
            .fetch(key)
            .await
            .map_err(|e| CacheError::Get(cause(e)))?;
        self.trace_round_trip("get", started);

        match raw {
            Some(raw) => Ok(self.parse_entry(key, &raw)),
            None => {
                tracing::debug!(cache = %self.name, key, "cache miss");
                Ok(None)
            }
        }
    }

    /// Fetches and JSON-decodes values for several keys in one batched
    /// round trip.
    ///
    /// The result is positionally aligned with the input keys. A parse
    /// failure for one entry yields `None` in that position only; it does
    /// not abort the other entries.
    pub async fn get_many<T: DeserializeOwned>(&self, keys: &[String]) -> Result<Vec<Option<T>>> {
        if keys.is_empty() || keys.iter().any(|k| k.is_empty()) {
            return Err(CacheError::MissingArgument("keys"));
        }
        self.flush().await;

        let started = Instant::now();
        let raw = self
            .store
            .fetch_many(keys)
            .await
            .map_err(|e| CacheError::GetMany(cause(e)))?;
        self.trace_round_trip("get_many", started);

        let values = raw
            .iter()
            .zip(keys)
            .map(|(raw, key)| raw.as_deref().and_then(|raw| self.parse_entry(key, raw)))
            .collect();
        Ok(values)
    }

    /// JSON-encodes a value and stores it, optionally expiring after
    /// `expires` seconds. Fire-and-forget: see the module documentation.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, expires: Option<u64>) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::MissingArgument("key"));
        }
        let raw = encode_value(value)?;
        // A zero expiration means "no expiration", matching the plain-set
        // path rather than an immediate expiry.
        let ttl = expires.filter(|secs| *secs > 0);

        self.enqueue(Command::Store {
            key: key.to_string(),
            value: raw,
            ttl,
        });
        Ok(())
    }

    /// Removes a single key. Fire-and-forget, same contract as [`Cache::set`].
    pub fn clear(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::MissingArgument("key"));
        }
        self.clear_many(&[key.to_string()])
    }

    /// Removes several keys in one batched delete. Fire-and-forget, same
    /// contract as [`Cache::set`].
    pub fn clear_many(&self, keys: &[String]) -> Result<()> {
        if keys.is_empty() || keys.iter().any(|k| k.is_empty()) {
            return Err(CacheError::MissingArgument("keys"));
        }

        self.enqueue(Command::Remove { keys: keys.to_vec() });
        Ok(())
    }

    /// Runs a store-side script and JSON-decodes its result.
    ///
    /// `keys` are passed ahead of `args` with the key-count-prefixed
    /// convention so the store can tell key arguments from plain parameters.
    /// A result that fails to parse as JSON resolves to `None` after a
    /// warning, like `get`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        script: &str,
        keys: &[String],
        args: &[String],
    ) -> Result<Option<T>> {
        if script.is_empty() {
            return Err(CacheError::MissingArgument("script"));
        }
        self.flush().await;

        let started = Instant::now();
        let raw = self
            .store
            .eval(script, keys, args)
            .await
            .map_err(|e| CacheError::Script(cause(e)))?;
        self.trace_round_trip("execute", started);

        Ok(raw
            .as_deref()
            .and_then(|raw| self.parse_entry("<script result>", raw)))
    }

    /// Releases the store connection after draining pending writes.
    pub async fn close(&self) -> Result<()> {
        self.flush().await;
        self.store.close().await
    }

    fn parse_entry<T: DeserializeOwned>(&self, key: &str, raw: &str) -> Option<T> {
        match decode_value(raw) {
            Ok(value) => Some(value),
            Err(error) => {
                // Malformed stored data is swallowed: a caller cannot act on
                // a parse failure for one key without losing the rest.
                tracing::warn!(cache = %self.name, key, %error, "discarding malformed cache entry");
                None
            }
        }
    }

    fn trace_round_trip(&self, op: &'static str, started: Instant) {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::trace!(cache = %self.name, op, elapsed_ms, "store round trip");
    }
}

/// Unwraps the transport-level cause out of a store error so wrapped
/// messages read as "<operation message>: <cause>" without double prefixes.
fn cause(error: CacheError) -> String {
    match error {
        CacheError::ConnectionFailed(cause) | CacheError::OperationFailed(cause) => cause,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        value: i64,
    }

    fn memory_cache() -> (Cache, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::with_store("testcache", Arc::clone(&store) as Arc<dyn Store>);
        (cache, store)
    }

    /// Waits for writes that are only observed through the raw store handle,
    /// bypassing the adapter's queue draining.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    /// Store double that fails every operation and exposes its transport
    /// error channel for injection.
    struct FailingStore {
        errors: broadcast::Sender<CacheError>,
    }

    impl FailingStore {
        fn new() -> Self {
            let (errors, _) = broadcast::channel(16);
            Self { errors }
        }

        fn fail() -> CacheError {
            CacheError::OperationFailed("broken pipe".to_string())
        }
    }

    #[async_trait]
    impl Store for FailingStore {
        async fn fetch(&self, _key: &str) -> redstash_core::cache::Result<Option<String>> {
            Err(Self::fail())
        }

        async fn fetch_many(
            &self,
            _keys: &[String],
        ) -> redstash_core::cache::Result<Vec<Option<String>>> {
            Err(Self::fail())
        }

        async fn store(
            &self,
            _key: &str,
            _value: &str,
            _ttl_seconds: Option<u64>,
        ) -> redstash_core::cache::Result<()> {
            Err(Self::fail())
        }

        async fn remove(&self, _keys: &[String]) -> redstash_core::cache::Result<()> {
            Err(Self::fail())
        }

        async fn eval(
            &self,
            _script: &str,
            _keys: &[String],
            _args: &[String],
        ) -> redstash_core::cache::Result<Option<String>> {
            Err(Self::fail())
        }

        fn errors(&self) -> broadcast::Receiver<CacheError> {
            self.errors.subscribe()
        }

        async fn close(&self) -> redstash_core::cache::Result<()> {
            Ok(())
        }
    }

    /// Store double whose `eval` returns a canned reply.
    struct ScriptStore {
        reply: Option<String>,
        errors: broadcast::Sender<CacheError>,
    }

    impl ScriptStore {
        fn new(reply: Option<&str>) -> Self {
            let (errors, _) = broadcast::channel(16);
            Self {
                reply: reply.map(str::to_string),
                errors,
            }
        }
    }

    #[async_trait]
    impl Store for ScriptStore {
        async fn fetch(&self, _key: &str) -> redstash_core::cache::Result<Option<String>> {
            Ok(None)
        }

        async fn fetch_many(
            &self,
            keys: &[String],
        ) -> redstash_core::cache::Result<Vec<Option<String>>> {
            Ok(vec![None; keys.len()])
        }

        async fn store(
            &self,
            _key: &str,
            _value: &str,
            _ttl_seconds: Option<u64>,
        ) -> redstash_core::cache::Result<()> {
            Ok(())
        }

        async fn remove(&self, _keys: &[String]) -> redstash_core::cache::Result<()> {
            Ok(())
        }

        async fn eval(
            &self,
            _script: &str,
            _keys: &[String],
            _args: &[String],
        ) -> redstash_core::cache::Result<Option<String>> {
            Ok(self.reply.clone())
        }

        fn errors(&self) -> broadcast::Receiver<CacheError> {
            self.errors.subscribe()
        }

        async fn close(&self) -> redstash_core::cache::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_get_unset_key_resolves_to_none() {
        let (cache, _) = memory_cache();

        let result: Option<Payload> = cache.get("missing").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let (cache, _) = memory_cache();

        // No waiting between the calls: a read must observe the unawaited
        // write that was invoked before it.
        cache.set("key1", &Payload { value: 1 }, None).unwrap();

        let result: Option<Payload> = cache.get("key1").await.unwrap();
        assert_eq!(result, Some(Payload { value: 1 }));
    }

    #[tokio::test]
    async fn test_writes_apply_in_invocation_order() {
        let (cache, _) = memory_cache();

        cache.set("key1", &Payload { value: 1 }, None).unwrap();
        cache.clear("key1").unwrap();
        cache.set("key1", &Payload { value: 2 }, None).unwrap();

        let result: Option<Payload> = cache.get("key1").await.unwrap();
        assert_eq!(result, Some(Payload { value: 2 }));
    }

    #[tokio::test]
    async fn test_set_stores_json_text() {
        let (cache, store) = memory_cache();

        cache.set("key1", &Payload { value: 7 }, None).unwrap();
        settle().await;

        let raw = store.fetch("key1").await.unwrap();
        assert_eq!(raw.as_deref(), Some(r#"{"value":7}"#));
    }

    #[tokio::test]
    async fn test_clear_then_get_resolves_to_none() {
        let (cache, _) = memory_cache();

        cache.set("key1", &Payload { value: 1 }, None).unwrap();
        cache.clear("key1").unwrap();

        let result: Option<Payload> = cache.get("key1").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_get_many_is_positionally_aligned() {
        let (cache, _) = memory_cache();

        cache.set("key1", &Payload { value: 1 }, None).unwrap();
        cache.set("key3", &Payload { value: 3 }, None).unwrap();

        let keys = vec!["key1".to_string(), "key2".to_string(), "key3".to_string()];
        let result: Vec<Option<Payload>> = cache.get_many(&keys).await.unwrap();

        assert_eq!(
            result,
            vec![
                Some(Payload { value: 1 }),
                None,
                Some(Payload { value: 3 }),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_many_after_clear_is_all_none() {
        let (cache, _) = memory_cache();

        cache.set("key1", &Payload { value: 1 }, None).unwrap();
        cache.set("key2", &Payload { value: 2 }, None).unwrap();
        cache
            .clear_many(&["key1".to_string(), "key2".to_string()])
            .unwrap();

        let keys = vec!["key1".to_string(), "key2".to_string(), "key3".to_string()];
        let result: Vec<Option<Payload>> = cache.get_many(&keys).await.unwrap();
        assert_eq!(result, vec![None, None, None]);
    }

    #[tokio::test]
    async fn test_malformed_entry_is_swallowed_as_none() {
        let (cache, store) = memory_cache();

        store.store("bad", "not json", None).await.unwrap();

        let result: Option<Payload> = cache.get("bad").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_malformed_entry_does_not_abort_the_batch() {
        let (cache, store) = memory_cache();

        cache.set("key1", &Payload { value: 1 }, None).unwrap();
        store.store("key2", "not json", None).await.unwrap();

        let keys = vec!["key1".to_string(), "key2".to_string()];
        let result: Vec<Option<Payload>> = cache.get_many(&keys).await.unwrap();
        assert_eq!(result, vec![Some(Payload { value: 1 }), None]);
    }

    #[tokio::test]
    async fn test_zero_expiration_means_no_expiration() {
        let (cache, store) = memory_cache();

        cache.set("key1", &Payload { value: 1 }, Some(0)).unwrap();
        settle().await;

        assert!(store.fetch("key1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_expiration_is_honored() {
        let (cache, _) = memory_cache();

        cache.set("key1", &Payload { value: 1 }, Some(1)).unwrap();

        let before: Option<Payload> = cache.get("key1").await.unwrap();
        assert!(before.is_some());

        tokio::time::sleep(Duration::from_millis(1_200)).await;

        let after: Option<Payload> = cache.get("key1").await.unwrap();
        assert_eq!(after, None);
    }

    #[tokio::test]
    async fn test_empty_key_fails_before_store_interaction() {
        // A failing store proves the store is never reached: the error is
        // the precondition one, not the store's.
        let cache = Cache::with_store("testcache", Arc::new(FailingStore::new()));

        let get: Result<Option<Payload>> = cache.get("").await;
        assert_eq!(get.unwrap_err(), CacheError::MissingArgument("key"));

        let set = cache.set("", &Payload { value: 1 }, None);
        assert_eq!(set.unwrap_err(), CacheError::MissingArgument("key"));

        let clear = cache.clear("");
        assert_eq!(clear.unwrap_err(), CacheError::MissingArgument("key"));

        let clear_many = cache.clear_many(&[]);
        assert_eq!(clear_many.unwrap_err(), CacheError::MissingArgument("keys"));

        let get_many: Result<Vec<Option<Payload>>> = cache.get_many(&[]).await;
        assert_eq!(get_many.unwrap_err(), CacheError::MissingArgument("keys"));

        let execute: Result<Option<Payload>> = cache.execute("", &[], &[]).await;
        assert_eq!(execute.unwrap_err(), CacheError::MissingArgument("script"));
    }

    #[tokio::test]
    async fn test_get_failure_rejects_with_wrapped_cause() {
        let cache = Cache::with_store("testcache", Arc::new(FailingStore::new()));

        let result: Result<Option<Payload>> = cache.get("key1").await;
        let err = result.unwrap_err();

        assert_eq!(err, CacheError::Get("broken pipe".to_string()));
        assert_eq!(
            err.to_string(),
            "Failed to retrieve a value from cache: broken pipe"
        );
    }

    #[tokio::test]
    async fn test_get_many_failure_uses_plural_message() {
        let cache = Cache::with_store("testcache", Arc::new(FailingStore::new()));

        let result: Result<Vec<Option<Payload>>> =
            cache.get_many(&["key1".to_string()]).await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "Failed to retrieve values from cache: broken pipe"
        );
    }

    #[tokio::test]
    async fn test_set_failure_emits_error_event_instead_of_returning() {
        let cache = Cache::with_store("testcache", Arc::new(FailingStore::new()));
        let mut events = cache.subscribe_errors();

        // The call itself succeeds; the failure arrives on the channel.
        cache.set("key1", &Payload { value: 1 }, None).unwrap();

        let event = tokio::time::timeout(Duration::from_secs(1), events.recv())
            .await
            .expect("timed out waiting for error event")
            .unwrap();
        assert_eq!(event, CacheError::Set("broken pipe".to_string()));
    }

    #[tokio::test]
    async fn test_clear_failure_emits_error_event() {
        let cache = Cache::with_store("testcache", Arc::new(FailingStore::new()));
        let mut events = cache.subscribe_errors();

        cache.clear("key1").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(1), events.recv())
            .await
            .expect("timed out waiting for error event")
            .unwrap();
        assert_eq!(event, CacheError::Clear("broken pipe".to_string()));
    }

    #[tokio::test]
    async fn test_serialize_failure_returns_without_store_interaction() {
        use std::collections::HashMap;

        let cache = Cache::with_store("testcache", Arc::new(FailingStore::new()));

        let mut map: HashMap<Vec<u8>, i32> = HashMap::new();
        map.insert(vec![1], 2);

        let err = cache.set("key1", &map, None).unwrap_err();
        assert!(matches!(err, CacheError::Serialize(_)));
    }

    #[tokio::test]
    async fn test_store_transport_errors_are_re_emitted() {
        let store = Arc::new(FailingStore::new());
        let cache = Cache::with_store("testcache", Arc::clone(&store) as Arc<dyn Store>);
        let mut events = cache.subscribe_errors();

        store
            .errors
            .send(CacheError::ConnectionFailed("reset by peer".to_string()))
            .unwrap();

        let event = tokio::time::timeout(Duration::from_secs(1), events.recv())
            .await
            .expect("timed out waiting for error event")
            .unwrap();
        assert_eq!(
            event,
            CacheError::ConnectionFailed("reset by peer".to_string())
        );
    }

    #[tokio::test]
    async fn test_execute_decodes_script_result() {
        let cache = Cache::with_store("testcache", Arc::new(ScriptStore::new(Some("42"))));

        let result: Option<i64> = cache
            .execute("return 42", &[], &[])
            .await
            .unwrap();
        assert_eq!(result, Some(42));
    }

    #[tokio::test]
    async fn test_execute_without_result_resolves_to_none() {
        let cache = Cache::with_store("testcache", Arc::new(ScriptStore::new(None)));

        let result: Option<i64> = cache
            .execute("return nil", &[], &[])
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_execute_parse_failure_resolves_to_none() {
        let cache =
            Cache::with_store("testcache", Arc::new(ScriptStore::new(Some("not json"))));

        let result: Option<Payload> = cache
            .execute("return 'not json'", &[], &[])
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_execute_failure_uses_script_message() {
        let cache = Cache::with_store("testcache", Arc::new(FailingStore::new()));

        let result: Result<Option<Payload>> =
            cache.execute("return 1", &[], &[]).await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "Failed to execute cache script: broken pipe"
        );
    }

    #[tokio::test]
    async fn test_scripting_unsupported_on_memory_store() {
        let (cache, _) = memory_cache();

        let result: Result<Option<i64>> = cache.execute("return 1", &[], &[]).await;
        assert!(matches!(result.unwrap_err(), CacheError::Script(_)));
    }

    #[tokio::test]
    async fn test_adapter_name() {
        let (cache, _) = memory_cache();
        assert_eq!(cache.name(), "testcache");
    }
}
