use std::env;

use redstash_core::cache::{CacheError, Result, RetryPolicy};

/// Name used for logging when the configuration does not provide one.
pub const DEFAULT_NAME: &str = "cache";

/// Connection parameters for the wrapped Redis server.
///
/// Parameters are validated before the adapter is constructed; an empty host
/// or zero port is a construction-time failure, not a runtime one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    /// Server hostname or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// AUTH credential. Empty means the server requires no authentication.
    pub password: String,
    /// Optional namespace prepended to every key.
    pub prefix: Option<String>,
    /// Reconnect policy applied after transport-level disconnects.
    pub retry: RetryPolicy,
}

impl RedisConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            password: String::new(),
            prefix: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Checks that the connection parameters are present.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(CacheError::InvalidConfig(
                "redis host must not be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(CacheError::InvalidConfig(
                "redis port must not be zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Adapter configuration: an optional name plus the store connection
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Adapter name used for logging/tracing correlation.
    pub name: Option<String>,
    pub redis: RedisConfig,
}

impl CacheConfig {
    pub fn new(redis: RedisConfig) -> Self {
        Self { name: None, redis }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The configured name, or [`DEFAULT_NAME`].
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    pub fn validate(&self) -> Result<()> {
        self.redis.validate()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_NAME` - Adapter name (default: "cache")
    /// - `REDIS_HOST` - Server hostname (default: "localhost")
    /// - `REDIS_PORT` - Server port (default: 6379)
    /// - `REDIS_PASSWORD` - AUTH credential (default: empty)
    /// - `REDIS_PREFIX` - Key namespace prefix (default: none)
    pub fn from_env() -> Self {
        Self {
            name: env::var("CACHE_NAME").ok(),
            redis: RedisConfig {
                host: env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: env::var("REDIS_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(6379),
                password: env::var("REDIS_PASSWORD").unwrap_or_default(),
                prefix: env::var("REDIS_PREFIX").ok(),
                retry: RetryPolicy::default(),
            },
        }
    }
}
