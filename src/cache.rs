//! Cache façade: slot store + key index + eviction policy.
//!
//! ## Architecture
//! - [`SlotCache`] composes a [`SlotStore`](crate::store::SlotStore) with a
//!   [`ReplacementPolicy`], generic over both.
//! - Every operation consults the key index first. A miss that must insert
//!   into a full store asks the policy for a victim, evicts it, and reuses
//!   the freed slot.
//! - Policy metadata is refreshed in lock-step: hits and fresh inserts are
//!   reported through `on_access`, explicit removals through `on_remove`.
//!
//! ## Lifecycle hooks
//! - `on_hit` fires on every successful `get`/`get_mut` and on the hit half
//!   of `get_or_insert_with`.
//! - `on_evict` fires exactly once per departing occupant, whether the
//!   policy sacrificed it or `remove`/`clear` took it out.
//! - Hooks always run after the cache's own bookkeeping for the operation
//!   has committed, so a panicking hook leaves the cache consistent.
//!
//! ## Thread Safety
//! - Single-threaded; share behind external locking (see
//!   [`ConcurrentCache`](crate::builder::ConcurrentCache) with the
//!   `concurrency` feature).

use std::fmt;
use std::hash::Hash;

use crate::error::InvariantError;
use crate::item::Item;
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, CacheMetricsSnapshot};
use crate::policy::ReplacementPolicy;
use crate::store::SlotStore;

/// A fixed-capacity key/value cache parameterized by its eviction policy.
///
/// Usually named through a policy alias
/// ([`BplruCache`](crate::policy::bplru::BplruCache),
/// [`TrcCache`](crate::policy::trc::TrcCache),
/// [`LruCache`](crate::policy::lru::LruCache)) or built behind the unified
/// [`Cache`](crate::builder::Cache) wrapper.
///
/// # Example
///
/// ```
/// use slotcache::item::Plain;
/// use slotcache::policy::bplru::BplruCache;
///
/// let mut cache: BplruCache<&str, Plain<u32>> = BplruCache::new(16);
/// cache.insert("a", Plain(1));
///
/// assert_eq!(cache.get(&"a"), Some(&Plain(1)));
/// assert_eq!(cache.len(), 1);
/// assert_eq!(cache.capacity(), 16);
/// ```
pub struct SlotCache<K, V, P>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    store: SlotStore<K, V>,
    policy: P,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V, P> SlotCache<K, V, P>
where
    K: Eq + Hash + Clone,
    V: Item,
    P: ReplacementPolicy,
{
    /// Composes a cache from a store capacity and a policy covering the
    /// same slot range.
    pub(crate) fn from_parts(capacity: usize, policy: P) -> Self {
        assert!(capacity > 0, "cache capacity must be at least 1");
        Self {
            store: SlotStore::new(capacity),
            policy,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.store.is_full()
    }

    /// Returns `true` if `key` is cached.
    ///
    /// Does not refresh policy metadata and fires no hooks.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    /// Peeks at a value without refreshing policy metadata or firing
    /// `on_hit`.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.store.index_of(key).and_then(|slot| self.store.value(slot))
    }

    /// Inserts a key/item pair, returning the previous item if the key was
    /// already cached.
    ///
    /// A present key is replaced in place: the slot's policy metadata is
    /// refreshed, no hook fires, and ownership of the previous item returns
    /// to the caller. An absent key lands in a free slot; when the store
    /// is full, it lands in the slot freed by evicting the policy's victim,
    /// which fires the victim's `on_evict` first.
    ///
    /// # Example
    ///
    /// ```
    /// use slotcache::item::Plain;
    /// use slotcache::policy::lru::LruCache;
    ///
    /// let mut cache: LruCache<u32, Plain<&str>> = LruCache::new(4);
    /// assert_eq!(cache.insert(1, Plain("first")), None);
    /// assert_eq!(cache.insert(1, Plain("second")), Some(Plain("first")));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.store.index_of(&key) {
            let previous = self.store.replace(slot, value);
            self.policy.on_access(slot);
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            #[cfg(debug_assertions)]
            self.validate();
            return Some(previous);
        }
        self.insert_absent(key, value);
        None
    }

    /// Gets a reference to a value, refreshing policy metadata and firing
    /// `on_hit`. A miss returns `None` with no side effects.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let slot = match self.store.index_of(key) {
            Some(slot) => slot,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.touch(slot);
        self.store.value(slot)
    }

    /// Gets a mutable reference to a value, refreshing policy metadata and
    /// firing `on_hit`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = match self.store.index_of(key) {
            Some(slot) => slot,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.touch(slot);
        self.store.value_mut(slot)
    }

    /// Gets the value for `key`, inserting `factory(&key)` on a miss.
    ///
    /// `factory` runs at most once, only on a miss, and only after the
    /// lookup has finished. A hit fires `on_hit`; the fresh-insert half
    /// fires no hook on the new item.
    ///
    /// # Example
    ///
    /// ```
    /// use slotcache::item::Plain;
    /// use slotcache::policy::trc::TrcCache;
    ///
    /// let mut cache: TrcCache<&str, Plain<usize>> = TrcCache::new(8);
    /// let mut builds = 0;
    ///
    /// for _ in 0..3 {
    ///     let value = cache.get_or_insert_with("len", |key| {
    ///         builds += 1;
    ///         Plain(key.len())
    ///     });
    ///     assert_eq!(value, &Plain(3));
    /// }
    /// assert_eq!(builds, 1);
    /// ```
    pub fn get_or_insert_with(&mut self, key: K, factory: impl FnOnce(&K) -> V) -> &V {
        let slot = match self.store.index_of(&key) {
            Some(slot) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                self.touch(slot);
                slot
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                let value = factory(&key);
                self.insert_absent(key, value)
            },
        };
        match self.store.value(slot) {
            Some(value) => value,
            None => unreachable!("slot resolved to an occupant above"),
        }
    }

    /// Removes `key`, firing the occupant's `on_evict` and returning it.
    /// An absent key returns `None`; that is not an error.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let (slot, mut value) = self.store.remove(key)?;
        self.policy.on_remove(slot);
        #[cfg(feature = "metrics")]
        self.metrics.record_remove();
        #[cfg(debug_assertions)]
        self.validate();
        // Bookkeeping is consistent before the hook runs.
        value.on_evict();
        Some(value)
    }

    /// Removes every occupant, firing `on_evict` for each, and resets the
    /// policy metadata wholesale.
    pub fn clear(&mut self) {
        for slot in 0..self.store.capacity() {
            if self.store.is_occupied(slot) {
                self.store.evict(slot);
                #[cfg(feature = "metrics")]
                self.metrics.record_remove();
            }
        }
        self.policy.clear();
    }

    /// Verifies store/index lock-step.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.store.check_invariants()
    }

    /// Snapshot of this cache's operation counters.
    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity())
    }

    /// Refreshes policy metadata for a hit, then fires `on_hit`.
    fn touch(&mut self, slot: usize) {
        self.policy.on_access(slot);
        if let Some(value) = self.store.value_mut(slot) {
            value.on_hit();
        }
    }

    /// Places an absent key, evicting the policy's victim first if the
    /// store is full. Returns the slot written.
    fn insert_absent(&mut self, key: K, value: V) -> usize {
        if self.store.is_full() {
            let victim = self.policy.victim();
            self.store.evict(victim);
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
        }
        let slot = match self.store.try_insert(key, value) {
            Ok(slot) => slot,
            // A slot was freed above and nothing can reenter in between.
            Err(_) => unreachable!("insertion after guaranteed free slot"),
        };
        self.policy.on_access(slot);
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();
        #[cfg(debug_assertions)]
        self.validate();
        slot
    }

    #[cfg(debug_assertions)]
    fn validate(&self) {
        if let Err(err) = self.store.check_invariants() {
            panic!("cache invariant violated: {err}");
        }
    }
}

impl<K, V, P> crate::traits::ReadOnlyCache<K, V> for SlotCache<K, V, P>
where
    K: Eq + Hash + Clone,
    V: Item,
    P: ReplacementPolicy,
{
    fn len(&self) -> usize {
        SlotCache::len(self)
    }

    fn capacity(&self) -> usize {
        SlotCache::capacity(self)
    }

    fn contains(&self, key: &K) -> bool {
        SlotCache::contains(self, key)
    }
}

impl<K, V, P> crate::traits::CoreCache<K, V> for SlotCache<K, V, P>
where
    K: Eq + Hash + Clone,
    V: Item,
    P: ReplacementPolicy,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        SlotCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        SlotCache::get(self, key)
    }

    fn clear(&mut self) {
        SlotCache::clear(self)
    }
}

impl<K, V, P> crate::traits::MutableCache<K, V> for SlotCache<K, V, P>
where
    K: Eq + Hash + Clone,
    V: Item,
    P: ReplacementPolicy,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        SlotCache::remove(self, key)
    }
}

impl<K, V, P> fmt::Debug for SlotCache<K, V, P>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotCache")
            .field("capacity", &self.store.capacity())
            .field("len", &self.store.len())
            .finish_non_exhaustive()
    }
}
