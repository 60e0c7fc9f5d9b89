//! In-memory store backend.
//!
//! Mirrors the Redis backend's semantics (TTL, batched fetch/delete) without
//! an external server. Scripting is not supported. There is deliberately no
//! eviction: the adapter is not a cache engine, and this backend exists for
//! tests and lightweight stand-in use, not as local cache storage.

mod store;

pub use store::MemoryStore;
