//! Item lifecycle hooks.
//!
//! Every value stored in a cache is an [`Item`]: a type that may react to
//! being found on a lookup (`on_hit`) and to leaving the cache (`on_evict`).
//! Both hooks default to no-ops, so most callers wrap plain payloads in
//! [`Plain`] and never think about them again.
//!
//! Hooks run after the cache's own bookkeeping for the triggering operation
//! has completed, so a panicking hook leaves the cache consistent.

use std::ops::{Deref, DerefMut};

/// Lifecycle capability for cached values.
///
/// `on_hit` runs on every successful lookup of the item; `on_evict` runs
/// exactly once when the item leaves the cache, whether it was selected as
/// an eviction victim or explicitly removed. Replacing an item in place via
/// `insert` fires neither hook: ownership of the previous item returns to
/// the caller instead.
///
/// # Example
///
/// ```
/// use slotcache::item::Item;
///
/// struct Counted {
///     hits: u32,
/// }
///
/// impl Item for Counted {
///     fn on_hit(&mut self) {
///         self.hits += 1;
///     }
/// }
/// ```
pub trait Item {
    /// Called on every successful lookup of this item.
    fn on_hit(&mut self) {}

    /// Called exactly once when this item leaves the cache.
    fn on_evict(&mut self) {}
}

/// A plain payload with the default no-op lifecycle.
///
/// # Example
///
/// ```
/// use slotcache::item::Plain;
/// use slotcache::policy::lru::LruCache;
///
/// let mut cache: LruCache<&str, Plain<u32>> = LruCache::new(8);
/// cache.insert("answer", Plain(42));
/// assert_eq!(cache.get(&"answer"), Some(&Plain(42)));
/// assert_eq!(cache.get(&"answer").map(|v| **v), Some(42));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Plain<V>(pub V);

impl<V> Plain<V> {
    /// Unwraps the payload.
    #[inline]
    pub fn into_inner(self) -> V {
        self.0
    }
}

impl<V> Item for Plain<V> {}

impl<V> From<V> for Plain<V> {
    #[inline]
    fn from(value: V) -> Self {
        Plain(value)
    }
}

impl<V> Deref for Plain<V> {
    type Target = V;

    #[inline]
    fn deref(&self) -> &V {
        &self.0
    }
}

impl<V> DerefMut for Plain<V> {
    #[inline]
    fn deref_mut(&mut self) -> &mut V {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_defaults_are_no_ops() {
        let mut item = Plain("payload");
        item.on_hit();
        item.on_evict();
        assert_eq!(item.into_inner(), "payload");
    }

    #[test]
    fn plain_derefs_to_payload() {
        let mut item = Plain(String::from("a"));
        item.push('b');
        assert_eq!(&*item, "ab");
        assert_eq!(Plain::from(3u8), Plain(3u8));
    }
}
