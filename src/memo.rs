//! Function memoization over a dedicated cache.
//!
//! [`Memoized`] wraps a function together with a key-derivation function and
//! a private, policy-configurable cache of its results. Key derivation is an
//! explicit boundary (the caller decides how arguments map to a hashable
//! key) rather than implicit argument serialization, which keeps it cheap
//! and testable.
//!
//! ## Example
//!
//! ```
//! use slotcache::builder::CachePolicy;
//! use slotcache::memo::Memoized;
//!
//! let mut fib = Memoized::new(CachePolicy::Bplru, 64, |n: &u64| *n, |n: &u64| {
//!     // Pretend this is expensive.
//!     (0..*n).fold((0u64, 1u64), |(a, b), _| (b, a + b)).0
//! })
//! .unwrap();
//!
//! assert_eq!(fib.call(10), 55);
//! assert_eq!(fib.call(10), 55); // served from cache
//! assert_eq!(fib.cache().len(), 1);
//! ```

use std::hash::Hash;
use std::marker::PhantomData;

use crate::builder::{Cache, CacheBuilder, CachePolicy};
use crate::error::ConfigError;
use crate::item::Plain;

/// A function wrapped with a bounded result cache.
///
/// `derive_key` maps borrowed arguments to the cache key; `func` computes a
/// result on a miss. Results are cloned out of the cache, so `V: Clone`.
/// The wrapped function is assumed pure: a cached result is
/// indistinguishable from a fresh one.
pub struct Memoized<A, K, V, F, D>
where
    K: Eq + Hash + Clone,
    V: Clone,
    F: FnMut(&A) -> V,
    D: Fn(&A) -> K,
{
    cache: Cache<K, Plain<V>>,
    derive_key: D,
    func: F,
    _args: PhantomData<fn(&A)>,
}

impl<A, K, V, F, D> Memoized<A, K, V, F, D>
where
    K: Eq + Hash + Clone,
    V: Clone,
    F: FnMut(&A) -> V,
    D: Fn(&A) -> K,
{
    /// Wraps `func` with a fresh cache of `capacity` results under the
    /// chosen eviction policy.
    pub fn new(
        policy: CachePolicy,
        capacity: usize,
        derive_key: D,
        func: F,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: CacheBuilder::new(capacity).try_build(policy)?,
            derive_key,
            func,
            _args: PhantomData,
        })
    }

    /// Invokes the wrapped function through the cache.
    ///
    /// The function runs only when the derived key misses; otherwise the
    /// cached result is cloned out.
    pub fn call(&mut self, args: A) -> V {
        let key = (self.derive_key)(&args);
        let Self { cache, func, .. } = self;
        cache.get_or_insert_with(key, |_| Plain(func(&args))).0.clone()
    }

    /// The result cache, for inspection.
    pub fn cache(&self) -> &Cache<K, Plain<V>> {
        &self.cache
    }

    /// The result cache, for maintenance such as `clear` or `remove`.
    pub fn cache_mut(&mut self) -> &mut Cache<K, Plain<V>> {
        &mut self.cache
    }
}
