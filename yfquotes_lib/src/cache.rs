//! Per-symbol TTL cache backed by `DashMap` for concurrent access.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// A single cached quote with its expiration time.
struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

/// Thread-safe quote cache keyed by symbol, with time-to-live expiration.
///
/// Expired entries are lazily evicted on the next `get` for that symbol.
pub struct QuoteCache<T> {
    store: DashMap<String, CacheEntry<T>>,
    ttl: Duration,
}

impl<T: Clone> QuoteCache<T> {
    /// Creates a new cache with the given time-to-live for entries.
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached quote for `symbol`, or `None` if missing or expired.
    pub fn get(&self, symbol: &str) -> Option<T> {
        let entry = self.store.get(symbol)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.store.remove(symbol);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Inserts or overwrites the quote for `symbol`.
    pub fn insert(&self, symbol: String, value: T) {
        self.store.insert(
            symbol,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Number of stored entries, expired ones included until evicted.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        self.store.clear();
    }
}
