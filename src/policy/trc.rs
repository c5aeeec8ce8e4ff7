//! Two-random-choices (TRC) replacement policy.
//!
//! Approximates LRU by sampling: every slot carries a monotonically
//! increasing last-touched stamp, and eviction draws a small number of
//! distinct slots at random and sacrifices the stalest of them. With the
//! default two samples this is the classic power-of-two-choices trade:
//! no per-access bookkeeping beyond one stamp write, in exchange for a
//! probabilistic (rather than exact) recency ordering.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                 TrcPolicy, capacity = 8                        │
//! │                                                                │
//! │   last_touched: ┌────┬────┬────┬────┬────┬────┬────┬────┐      │
//! │                 │ 17 │  3 │ 21 │  9 │ 20 │ 11 │  5 │ 14 │      │
//! │                 └────┴────┴─▲──┴────┴────┴────┴─▲──┴────┘      │
//! │                             │                   │              │
//! │   victim():        sample ──┘          sample ──┘              │
//! │                    stamp 21            stamp 5  ← evict        │
//! │                                                                │
//! │   tick: per-cache counter, bumped on every access              │
//! └────────────────────────────────────────────────────────────────┘
//!
//! Eviction Flow
//! ─────────────
//!
//!   victim():
//!     1. Draw `samples` distinct slot numbers (Floyd's algorithm)
//!     2. Compare their last-touched stamps
//!     3. Oldest stamp loses; equal stamps break to the lower slot
//! ```
//!
//! ## Operations
//!
//! | Operation   | Time | Notes                                   |
//! |-------------|------|-----------------------------------------|
//! | `on_access` | O(1) | one stamp write                         |
//! | `victim`    | O(k) | k = sample count, clamped to capacity   |
//! | `on_remove` | O(1) | stamp reset                             |
//!
//! ## Implementation Notes
//!
//! - RNG state uses XorShift64 seeded from the capacity, so victim
//!   sequences are reproducible and Miri-compatible.
//! - `victim` never writes stamps; repeated calls without interleaved
//!   accesses re-sample the same distribution.

use std::hash::Hash;

use crate::cache::SlotCache;
use crate::item::Item;
use crate::policy::ReplacementPolicy;

/// Number of eviction candidates drawn when none is configured.
pub const DEFAULT_SAMPLES: usize = 2;

/// Fixed-capacity cache using the two-random-choices policy.
///
/// # Example
///
/// ```
/// use slotcache::item::Plain;
/// use slotcache::policy::trc::TrcCache;
///
/// let mut cache: TrcCache<&str, Plain<u32>> = TrcCache::new(1);
/// cache.insert("x", Plain(1));
/// cache.insert("y", Plain(2));
///
/// // A single slot leaves no sampling ambiguity.
/// assert!(cache.get(&"x").is_none());
/// assert_eq!(cache.get(&"y"), Some(&Plain(2)));
/// ```
pub type TrcCache<K, V> = SlotCache<K, V, TrcPolicy>;

impl<K, V> SlotCache<K, V, TrcPolicy>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    /// Creates a TRC cache drawing [`DEFAULT_SAMPLES`] eviction candidates.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use the
    /// [builder](crate::builder::CacheBuilder) for fallible construction.
    pub fn new(capacity: usize) -> Self {
        Self::with_samples(capacity, DEFAULT_SAMPLES)
    }

    /// Creates a TRC cache drawing `samples` eviction candidates.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` or `samples` is zero.
    pub fn with_samples(capacity: usize, samples: usize) -> Self {
        SlotCache::from_parts(capacity, TrcPolicy::with_samples(capacity, samples))
    }
}

/// Per-slot last-touched stamps plus the sampling state.
#[derive(Debug, Clone)]
pub struct TrcPolicy {
    last_touched: Vec<u64>,
    /// Monotonic access counter; stamp 0 marks a never-touched slot.
    tick: u64,
    samples: usize,
    /// Internal PRNG state for candidate sampling (XorShift64).
    rng_state: u64,
}

impl TrcPolicy {
    pub fn new(capacity: usize) -> Self {
        Self::with_samples(capacity, DEFAULT_SAMPLES)
    }

    /// # Panics
    ///
    /// Panics if `samples` is zero.
    pub fn with_samples(capacity: usize, samples: usize) -> Self {
        assert!(samples >= 1, "eviction sample count must be at least 1");
        Self {
            last_touched: vec![0; capacity],
            tick: 0,
            samples,
            // Non-zero XorShift seed derived from the capacity.
            rng_state: capacity as u64 + 0x9e3779b97f4a7c15,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.last_touched.len()
    }

    #[inline]
    pub fn samples(&self) -> usize {
        self.samples
    }

    #[inline]
    fn next_random(&mut self) -> u64 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        x
    }
}

impl ReplacementPolicy for TrcPolicy {
    fn on_access(&mut self, slot: usize) {
        self.tick += 1;
        self.last_touched[slot] = self.tick;
    }

    fn on_remove(&mut self, slot: usize) {
        self.last_touched[slot] = 0;
    }

    fn victim(&mut self) -> usize {
        let slots = self.last_touched.len();
        debug_assert!(slots > 0);
        let draws = self.samples.min(slots);

        // Floyd's sampling: `draws` distinct slot numbers from 0..slots.
        let mut picked: Vec<usize> = Vec::with_capacity(draws);
        for pool in (slots - draws)..slots {
            let candidate = (self.next_random() % (pool as u64 + 1)) as usize;
            if picked.contains(&candidate) {
                picked.push(pool);
            } else {
                picked.push(candidate);
            }
        }

        let mut victim = picked[0];
        for &slot in &picked[1..] {
            let older = self.last_touched[slot] < self.last_touched[victim];
            let tied = self.last_touched[slot] == self.last_touched[victim];
            if older || (tied && slot < victim) {
                victim = slot;
            }
        }
        victim
    }

    fn clear(&mut self) {
        self.last_touched.fill(0);
        self.tick = 0;
    }
}
