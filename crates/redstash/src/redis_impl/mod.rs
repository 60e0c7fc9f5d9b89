//! Redis store backend implementation.
//!
//! Wraps a `fred` client: connection lifecycle with the configured reconnect
//! policy, transport error forwarding, key namespacing, and Lua script
//! execution.

mod error;
mod store;

pub use store::RedisStore;
