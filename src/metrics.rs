//! Operation counters for cache instances.
//!
//! Every cache tracks how its operations resolved (hits, misses, fresh
//! inserts, in-place updates, policy evictions, explicit removals) and
//! exposes them as a [`CacheMetricsSnapshot`] with length/capacity gauges
//! captured at snapshot time. Counters are plain `u64`s: the cache is
//! single-threaded, so no atomics are involved.
//!
//! ```
//! use slotcache::item::Plain;
//! use slotcache::policy::lru::LruCache;
//!
//! let mut cache: LruCache<u32, Plain<u32>> = LruCache::new(2);
//! cache.insert(1, Plain(10));
//! cache.get(&1);
//! cache.get(&2);
//!
//! let snapshot = cache.metrics();
//! assert_eq!(snapshot.get_calls, 2);
//! assert_eq!(snapshot.get_hits, 1);
//! assert_eq!(snapshot.get_misses, 1);
//! assert_eq!(snapshot.insert_new, 1);
//! assert_eq!(snapshot.cache_len, 1);
//! ```

/// Point-in-time view of a cache's operation counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,

    /// Victims sacrificed by the policy to make room.
    pub evictions: u64,
    /// Explicit removals, including those performed by `clear`.
    pub removes: u64,

    // Gauges captured at snapshot time.
    pub cache_len: usize,
    pub capacity: usize,
}

/// Internal counters embedded in each cache.
#[derive(Debug, Default, Clone)]
pub(crate) struct CacheMetrics {
    get_hits: u64,
    get_misses: u64,
    insert_new: u64,
    insert_updates: u64,
    evictions: u64,
    removes: u64,
}

impl CacheMetrics {
    #[inline]
    pub(crate) fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }

    #[inline]
    pub(crate) fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }

    #[inline]
    pub(crate) fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    #[inline]
    pub(crate) fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    #[inline]
    pub(crate) fn record_remove(&mut self) {
        self.removes += 1;
    }

    pub(crate) fn snapshot(&self, cache_len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_hits + self.get_misses,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_new + self.insert_updates,
            insert_new: self.insert_new,
            insert_updates: self.insert_updates,
            evictions: self.evictions,
            removes: self.removes,
            cache_len,
            capacity,
        }
    }
}
