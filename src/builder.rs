//! Unified cache builder for all eviction policies.
//!
//! Provides one construction path that validates configuration and hides
//! the policy type parameter behind a single [`Cache`] wrapper.
//!
//! ## Example
//!
//! ```
//! use slotcache::builder::{CacheBuilder, CachePolicy};
//! use slotcache::item::Plain;
//!
//! let mut cache = CacheBuilder::new(100)
//!     .try_build::<u64, Plain<String>>(CachePolicy::Bplru)
//!     .unwrap();
//! cache.insert(1, Plain("hello".to_string()));
//! assert_eq!(cache.get(&1), Some(&Plain("hello".to_string())));
//! ```

use std::hash::Hash;

use crate::cache::SlotCache;
use crate::error::{ConfigError, InvariantError};
use crate::item::Item;
#[cfg(feature = "metrics")]
use crate::metrics::CacheMetricsSnapshot;
use crate::policy::bplru::BplruPolicy;
use crate::policy::lru::LruPolicy;
use crate::policy::trc::{TrcPolicy, DEFAULT_SAMPLES};
use crate::traits::{CoreCache, MutableCache, ReadOnlyCache};

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Bit-tree pseudo-LRU eviction.
    Bplru,
    /// Two-random-choices eviction with a configurable sample count.
    Trc { samples: usize },
    /// Exact least-recently-used eviction.
    Lru,
}

impl CachePolicy {
    /// Two-random-choices with the default sample count.
    pub fn trc() -> Self {
        CachePolicy::Trc {
            samples: DEFAULT_SAMPLES,
        }
    }
}

/// Builder validating capacity and policy parameters.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Builds a [`Cache`] over the chosen policy.
    ///
    /// Fails with [`ConfigError::InvalidCapacity`] for a zero capacity and
    /// [`ConfigError::InvalidSampleCount`] for a zero TRC sample count.
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Item,
    {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidCapacity { capacity: 0 });
        }
        let inner = match policy {
            CachePolicy::Bplru => {
                CacheInner::Bplru(SlotCache::from_parts(self.capacity, BplruPolicy::new(self.capacity)))
            },
            CachePolicy::Trc { samples } => {
                if samples == 0 {
                    return Err(ConfigError::InvalidSampleCount { samples });
                }
                CacheInner::Trc(SlotCache::from_parts(
                    self.capacity,
                    TrcPolicy::with_samples(self.capacity, samples),
                ))
            },
            CachePolicy::Lru => {
                CacheInner::Lru(SlotCache::from_parts(self.capacity, LruPolicy::new(self.capacity)))
            },
        };
        Ok(Cache { inner })
    }
}

/// Policy-erased cache with a consistent API regardless of policy.
///
/// Built by [`CacheBuilder::try_build`]; dispatches every operation to the
/// policy-specialized [`SlotCache`] it wraps.
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    Bplru(SlotCache<K, V, BplruPolicy>),
    Trc(SlotCache<K, V, TrcPolicy>),
    Lru(SlotCache<K, V, LruPolicy>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    /// Inserts a key/item pair. Returns the previous item if the key was
    /// already cached.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Bplru(cache) => cache.insert(key, value),
            CacheInner::Trc(cache) => cache.insert(key, value),
            CacheInner::Lru(cache) => cache.insert(key, value),
        }
    }

    /// Gets a reference to a value, refreshing policy metadata and firing
    /// `on_hit`.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Bplru(cache) => cache.get(key),
            CacheInner::Trc(cache) => cache.get(key),
            CacheInner::Lru(cache) => cache.get(key),
        }
    }

    /// Gets a mutable reference to a value, refreshing policy metadata and
    /// firing `on_hit`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match &mut self.inner {
            CacheInner::Bplru(cache) => cache.get_mut(key),
            CacheInner::Trc(cache) => cache.get_mut(key),
            CacheInner::Lru(cache) => cache.get_mut(key),
        }
    }

    /// Peeks at a value without refreshing policy metadata or firing hooks.
    pub fn peek(&self, key: &K) -> Option<&V> {
        match &self.inner {
            CacheInner::Bplru(cache) => cache.peek(key),
            CacheInner::Trc(cache) => cache.peek(key),
            CacheInner::Lru(cache) => cache.peek(key),
        }
    }

    /// Gets the value for `key`, inserting `factory(&key)` on a miss.
    pub fn get_or_insert_with(&mut self, key: K, factory: impl FnOnce(&K) -> V) -> &V {
        match &mut self.inner {
            CacheInner::Bplru(cache) => cache.get_or_insert_with(key, factory),
            CacheInner::Trc(cache) => cache.get_or_insert_with(key, factory),
            CacheInner::Lru(cache) => cache.get_or_insert_with(key, factory),
        }
    }

    /// Removes `key`, firing the occupant's `on_evict` and returning it.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Bplru(cache) => cache.remove(key),
            CacheInner::Trc(cache) => cache.remove(key),
            CacheInner::Lru(cache) => cache.remove(key),
        }
    }

    /// Removes every occupant, firing `on_evict` for each.
    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Bplru(cache) => cache.clear(),
            CacheInner::Trc(cache) => cache.clear(),
            CacheInner::Lru(cache) => cache.clear(),
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Bplru(cache) => cache.len(),
            CacheInner::Trc(cache) => cache.len(),
            CacheInner::Lru(cache) => cache.len(),
        }
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Bplru(cache) => cache.capacity(),
            CacheInner::Trc(cache) => cache.capacity(),
            CacheInner::Lru(cache) => cache.capacity(),
        }
    }

    /// Returns `true` if `key` is cached, without touching policy metadata.
    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Bplru(cache) => cache.contains(key),
            CacheInner::Trc(cache) => cache.contains(key),
            CacheInner::Lru(cache) => cache.contains(key),
        }
    }

    /// Verifies store/index lock-step.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match &self.inner {
            CacheInner::Bplru(cache) => cache.check_invariants(),
            CacheInner::Trc(cache) => cache.check_invariants(),
            CacheInner::Lru(cache) => cache.check_invariants(),
        }
    }

    /// Snapshot of this cache's operation counters.
    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> CacheMetricsSnapshot {
        match &self.inner {
            CacheInner::Bplru(cache) => cache.metrics(),
            CacheInner::Trc(cache) => cache.metrics(),
            CacheInner::Lru(cache) => cache.metrics(),
        }
    }
}

impl<K, V> std::fmt::Debug for Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = match &self.inner {
            CacheInner::Bplru(_) => "Bplru",
            CacheInner::Trc(_) => "Trc",
            CacheInner::Lru(_) => "Lru",
        };
        f.debug_struct("Cache")
            .field("policy", &policy)
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> ReadOnlyCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    fn len(&self) -> usize {
        Cache::len(self)
    }

    fn capacity(&self) -> usize {
        Cache::capacity(self)
    }

    fn contains(&self, key: &K) -> bool {
        Cache::contains(self, key)
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        Cache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        Cache::get(self, key)
    }

    fn clear(&mut self) {
        Cache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        Cache::remove(self, key)
    }
}

/// External-locking wrapper for sharing a [`Cache`] across threads.
///
/// The core stays single-threaded by contract; this wrapper packages the
/// documented discipline, scoped acquisition of one mutex around every
/// operation, rather than adding internal synchronization. Reads hand a
/// borrow to a closure so it cannot outlive the lock.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "concurrency")] {
/// use slotcache::builder::{CacheBuilder, CachePolicy, ConcurrentCache};
/// use slotcache::item::Plain;
///
/// let cache = CacheBuilder::new(8)
///     .try_build::<u32, Plain<u32>>(CachePolicy::Lru)
///     .unwrap();
/// let shared = ConcurrentCache::new(cache);
///
/// shared.insert(1, Plain(10));
/// assert_eq!(shared.get_with(&1, |value| value.copied()), Some(Plain(10)));
/// # }
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    inner: parking_lot::Mutex<Cache<K, V>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    pub fn new(cache: Cache<K, V>) -> Self {
        Self {
            inner: parking_lot::Mutex::new(cache),
        }
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().insert(key, value)
    }

    /// Looks up `key` and passes the borrow to `f` while the lock is held.
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(Option<&V>) -> R) -> R {
        let mut cache = self.inner.lock();
        f(cache.get(key))
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }
}
