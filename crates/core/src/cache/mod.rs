mod error;
mod retry;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use retry::{
    RetryDecision, RetryPolicy, RETRY_DELAY_CAP, RETRY_ELAPSED_CEILING, RETRY_STEP,
};
pub use serialization::{decode_value, encode_value, SerializationError};
pub use traits::Store;
