//! fred error mapping to CacheError.

use fred::error::{Error, ErrorKind};
use redstash_core::cache::CacheError;

/// Maps fred errors to CacheError.
pub fn map_store_error(err: Error) -> CacheError {
    if matches!(
        err.kind(),
        ErrorKind::IO | ErrorKind::Timeout | ErrorKind::Canceled
    ) {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}
