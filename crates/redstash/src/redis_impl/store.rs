use async_trait::async_trait;
use fred::error::ErrorKind;
use fred::interfaces::LuaInterface;
use fred::prelude::*;
use fred::types::Value;
use tokio::sync::{broadcast, watch};

use redstash_core::cache::{CacheError, Result, Store};

use crate::config::RedisConfig;

use super::error::map_store_error;

/// Capacity of the transport error notification channel.
const ERROR_CHANNEL_CAPACITY: usize = 100;

/// Redis store backend over a single `fred` client.
///
/// Reconnection after a transport-level disconnect is handled by the driver,
/// configured from the adapter's [`redstash_core::cache::RetryPolicy`]:
/// linear delays with the policy's step and cap, giving up once the attempt
/// budget derived from the elapsed ceiling is spent. While disconnected,
/// commands buffer or fail according to the driver's own behavior.
pub struct RedisStore {
    client: Client,
    prefix: Option<String>,
    errors: broadcast::Sender<CacheError>,
    shutdown: watch::Sender<()>,
}

impl RedisStore {
    /// Connects to the configured Redis server.
    ///
    /// `name` is only used to correlate log records; policy evaluation and
    /// logging receive it explicitly rather than capturing it.
    pub async fn connect(name: &str, config: &RedisConfig) -> Result<Self> {
        let url = format!("redis://{}:{}", config.host, config.port);
        let mut fred_config = Config::from_url(&url).map_err(map_store_error)?;
        if !config.password.is_empty() {
            fred_config.password = Some(config.password.clone());
        }

        let reconnect = ReconnectPolicy::new_linear(
            config.retry.max_attempts(),
            u32::try_from(config.retry.cap.as_millis()).unwrap_or(u32::MAX),
            u32::try_from(config.retry.step.as_millis()).unwrap_or(u32::MAX),
        );

        let client = Builder::from_config(fred_config)
            .set_policy(reconnect)
            .build()
            .map_err(map_store_error)?;
        let _ = client.init().await.map_err(map_store_error)?;

        let (errors, _) = broadcast::channel(ERROR_CHANNEL_CAPACITY);
        let (shutdown, shutdown_rx) = watch::channel(());
        spawn_event_loops(name, &client, errors.clone(), shutdown_rx);

        tracing::debug!(cache = %name, host = %config.host, port = config.port, "connected to store");

        Ok(Self {
            client,
            prefix: config.prefix.clone(),
            errors,
            shutdown,
        })
    }

    /// Applies the configured key namespace.
    fn keyed(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{key}"),
            None => key.to_string(),
        }
    }
}

/// Forwards driver events into the store's error channel.
///
/// An AUTH failure received while the connection is down is expected noise
/// from the reconnect handshake, not a genuine operational failure; it is
/// warn-logged and never forwarded.
///
/// The forwarding task holds a client clone for `is_connected`, which keeps
/// the driver's event channels open; it stops on the shutdown signal instead
/// of waiting for a channel close that its own clone would prevent.
fn spawn_event_loops(
    name: &str,
    client: &Client,
    errors: broadcast::Sender<CacheError>,
    mut shutdown: watch::Receiver<()>,
) {
    let mut error_rx = client.error_rx();
    let mut reconnect_rx = client.reconnect_rx();

    let task_name = name.to_string();
    let watched = client.clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                // Fires on close() and when the store is dropped.
                _ = shutdown.changed() => break,
                received = error_rx.recv() => match received {
                    Ok((error, server)) => {
                        if matches!(error.kind(), ErrorKind::Auth) && !watched.is_connected() {
                            tracing::warn!(
                                cache = %task_name,
                                %error,
                                "suppressing auth error during reconnect"
                            );
                            continue;
                        }
                        tracing::debug!(cache = %task_name, ?server, %error, "transport error");
                        let _ = errors.send(CacheError::ConnectionFailed(error.to_string()));
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
    });

    let task_name = name.to_string();
    tokio::spawn(async move {
        while let Ok(server) = reconnect_rx.recv().await {
            tracing::debug!(cache = %task_name, ?server, "reconnected to store");
        }
    });
}

#[async_trait]
impl Store for RedisStore {
    async fn fetch(&self, key: &str) -> Result<Option<String>> {
        self.client
            .get(self.keyed(key))
            .await
            .map_err(map_store_error)
    }

    async fn fetch_many(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
        let keys: Vec<String> = keys.iter().map(|k| self.keyed(k)).collect();
        self.client.mget(keys).await.map_err(map_store_error)
    }

    async fn store(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<()> {
        let expire = ttl_seconds.map(|secs| Expiration::EX(secs as i64));
        self.client
            .set::<(), _, _>(self.keyed(key), value, expire, None, false)
            .await
            .map_err(map_store_error)
    }

    async fn remove(&self, keys: &[String]) -> Result<()> {
        let keys: Vec<String> = keys.iter().map(|k| self.keyed(k)).collect();
        self.client.del::<(), _>(keys).await.map_err(map_store_error)
    }

    async fn eval(
        &self,
        script: &str,
        keys: &[String],
        args: &[String],
    ) -> Result<Option<String>> {
        let keys: Vec<String> = keys.iter().map(|k| self.keyed(k)).collect();

        // The driver sends EVAL with the key count ahead of the keys, so the
        // server can tell key arguments from plain parameters.
        let result: Value = self
            .client
            .eval(script, keys, args.to_vec())
            .await
            .map_err(map_store_error)?;

        if result.is_null() {
            return Ok(None);
        }
        result
            .convert::<String>()
            .map(Some)
            .map_err(map_store_error)
    }

    fn errors(&self) -> broadcast::Receiver<CacheError> {
        self.errors.subscribe()
    }

    async fn close(&self) -> Result<()> {
        let _ = self.shutdown.send(());
        self.client.quit().await.map_err(map_store_error)
    }
}
