//! Market estimate cache with TTL support.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::port::outbound::cache::{CachedMarket, RateCache, RateCacheKey};

struct Entry {
    stored_at: DateTime<Utc>,
    market: CachedMarket,
}

/// In-memory cache of market computations.
pub struct InMemoryRateCache {
    entries: RwLock<HashMap<RateCacheKey, Entry>>,
    /// Time-to-live for cached entries.
    ttl: Duration,
    /// Upper bound on stored entries; the oldest entry is evicted first.
    max_entries: usize,
}

impl InMemoryRateCache {
    /// Create a new cache with the given TTL and capacity.
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Prune expired entries. Returns count removed.
    pub fn prune_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at + self.ttl >= now);
        before - entries.len()
    }

    fn evict_oldest(entries: &mut HashMap<RateCacheKey, Entry>) {
        let oldest = entries
            .iter()
            .min_by_key(|(_, entry)| entry.stored_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            debug!(key = %key, "Evicting oldest market estimate");
            entries.remove(&key);
        }
    }
}

#[async_trait]
impl RateCache for InMemoryRateCache {
    async fn get(&self, key: &RateCacheKey) -> Option<CachedMarket> {
        let entries = self.entries.read();
        let entry = entries.get(key)?;

        // Check expiration
        if entry.stored_at + self.ttl < Utc::now() {
            return None;
        }

        Some(entry.market.clone())
    }

    async fn put(&self, key: RateCacheKey, value: CachedMarket) {
        let mut entries = self.entries.write();
        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            Self::evict_oldest(&mut entries);
        }
        entries.insert(
            key,
            Entry {
                stored_at: Utc::now(),
                market: value,
            },
        );
    }
}

/// Cache used when caching is disabled in configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRateCache;

#[async_trait]
impl RateCache for NoopRateCache {
    async fn get(&self, _key: &RateCacheKey) -> Option<CachedMarket> {
        None
    }

    async fn put(&self, _key: RateCacheKey, _value: CachedMarket) {}
}
