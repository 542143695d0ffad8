//! Geolocation lookups.
//!
//! This module provides:
//! - `GeoClient`, which queries the provider with retry and caching
//! - `GeoCache`, the in-memory map of successful lookups
//! - `RetryPolicy` and `Backoff`, which bound how a lookup retries
//! - The record, target and cache key types
//!
//! Lookups are cached for the lifetime of the process and never expire.

mod cache;
mod client;
mod retry;
mod types;

// Re-export public API
pub use cache::GeoCache;
pub use client::GeoClient;
pub use retry::{Backoff, RetryPolicy};
pub use types::{CacheKey, Coordinates, GeoRecord, Target};
