//! In-memory cache of fetched series, keyed by symbol.
//!
//! Entries expire after a fixed time-to-live. When the cache is full the
//! least recently used entry is evicted. The map keeps entries in recency
//! order: a hit moves the entry to the back, eviction pops from the front.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use indexmap::IndexMap;
use tracing::debug;

use crate::models::{price_series::PriceSeries, symbol::Symbol};

/// Eviction settings for a [`SeriesCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// How long an entry stays fresh.
    pub ttl: Duration,
    /// Maximum number of symbols held at once.
    pub capacity: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            capacity: 32,
        }
    }
}

struct CacheEntry {
    series: Arc<PriceSeries>,
    stored_at: Instant,
}

pub struct SeriesCache {
    policy: CachePolicy,
    entries: Mutex<IndexMap<Symbol, CacheEntry>>,
}

impl SeriesCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: Mutex::new(IndexMap::new()),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns the cached series if it is still fresh.
    ///
    /// Expired entries are dropped on lookup.
    pub fn get(&self, symbol: &Symbol) -> Option<Arc<PriceSeries>> {
        let mut entries = self.entries();
        let entry = entries.shift_remove(symbol)?;

        if self.is_expired(&entry) {
            debug!(%symbol, "cache entry expired");
            return None;
        }

        let series = Arc::clone(&entry.series);
        entries.insert(symbol.clone(), entry);
        Some(series)
    }

    /// Stores a series, evicting expired entries first and then the least
    /// recently used ones until there is room.
    pub fn insert(&self, symbol: Symbol, series: Arc<PriceSeries>) {
        if self.policy.capacity == 0 {
            return;
        }

        let mut entries = self.entries();
        entries.shift_remove(&symbol);
        entries.retain(|_, entry| !self.is_expired(entry));

        while entries.len() >= self.policy.capacity {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                debug!(symbol = %evicted, "cache full, evicted least recently used entry");
            }
        }

        entries.insert(
            symbol,
            CacheEntry {
                series,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        entry.stored_at.elapsed() >= self.policy.ttl
    }

    // A panic while holding the lock leaves the map itself consistent, so a
    // poisoned lock is still usable.
    fn entries(&self) -> MutexGuard<'_, IndexMap<Symbol, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SeriesCache {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}
