//! Runtime caches used by application services.
//!
//! - [`rate::InMemoryRateCache`]: computed market estimates with TTL-based expiration
//! - [`rate::NoopRateCache`]: a cache that never stores anything

pub mod rate;
