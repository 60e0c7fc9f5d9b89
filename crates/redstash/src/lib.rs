//! Thin, typed cache adapter over Redis.
//!
//! The adapter owns one connection to an external key-value store and exposes
//! a narrow operation set: [`Cache::get`], [`Cache::get_many`],
//! [`Cache::set`], [`Cache::clear`], and [`Cache::execute`]. Values are
//! stored as UTF-8 JSON text; `set` and `clear` are fire-and-forget, with
//! failures reported on a broadcast error channel instead of a returned
//! result.
//!
//! All durable behavior (storage, expiration, scripting, reconnection) is
//! delegated to the store. The only local logic is option defaulting, JSON
//! encode/decode, and wrapping transport errors into [`CacheError`].
//!
//! # Backends
//!
//! - `redis` (default feature): Redis via the `fred` client.
//! - [`memory::MemoryStore`]: in-process store used in tests and as a
//!   lightweight stand-in; it supports everything except scripting.

pub mod cache;
pub mod config;
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use cache::Cache;
pub use config::{CacheConfig, RedisConfig};
pub use redstash_core::cache::{CacheError, RetryDecision, RetryPolicy, Store};
