use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// Causes are carried as rendered strings so errors stay `Clone` and can be
/// delivered over the adapter's broadcast error channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The configuration was rejected before any connection was attempted.
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),
    /// A required argument was empty or absent. Returned before any store
    /// interaction, never wrapped, never emitted on the error channel.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    #[error("Failed to retrieve a value from cache: {0}")]
    Get(String),
    #[error("Failed to retrieve values from cache: {0}")]
    GetMany(String),
    #[error("Failed to store a value in cache: {0}")]
    Set(String),
    #[error("Failed to remove values from cache: {0}")]
    Clear(String),
    #[error("Failed to execute cache script: {0}")]
    Script(String),
    #[error("Failed to serialize: {0}")]
    Serialize(String),
    #[error("Failed to deserialize: {0}")]
    Deserialize(String),
}

impl CacheError {
    /// Returns true for errors the caller could have avoided by validating
    /// arguments; these are never retried or re-emitted.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CacheError::InvalidConfig(_) | CacheError::MissingArgument(_)
        )
    }
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
