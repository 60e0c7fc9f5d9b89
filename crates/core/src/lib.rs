//! Core types for the redstash cache adapter.
//!
//! This crate holds everything that does not depend on a concrete Redis
//! driver: the error taxonomy, the JSON value codec, the reconnect retry
//! policy, and the `Store` trait that backends implement.

pub mod cache;
