//! Fixed-capacity slot storage with a key index.
//!
//! ## Architecture
//! - Occupants live in a fixed `Vec<Option<Slot>>`; a slot is fully empty or
//!   fully occupied, never partial.
//! - A `FxHashMap<K, usize>` key index keeps the array addressable by key in
//!   O(1) expected time and is updated in lock-step with every mutation.
//! - Freed slot numbers are recycled through a free list, lowest-numbered
//!   slots first.
//!
//! ## Core Operations
//! - `try_insert`: place a pair in a free slot; full stores report
//!   [`CapacityExceeded`] instead of evicting.
//! - `evict`: clear a slot chosen by a policy, then fire the occupant's
//!   `on_evict` and drop it.
//! - `remove`: clear by key and hand the occupant back to the caller.
//!
//! ## Thread Safety
//! - Single-threaded; the cache façade documents the external-locking
//!   contract.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{CapacityExceeded, InvariantError};
use crate::item::Item;

/// One occupied storage cell. Policy metadata lives in the policy, keyed by
/// slot number, not here.
#[derive(Debug)]
struct Slot<K, V> {
    key: K,
    value: V,
}

/// Fixed array of slots plus the key index addressing them.
///
/// The store owns every cached item; the façade never holds an item outside
/// a slot. It enforces capacity but never picks victims; eviction decisions
/// belong to the policy layer.
///
/// # Example
///
/// ```
/// use slotcache::item::Plain;
/// use slotcache::store::SlotStore;
///
/// let mut store: SlotStore<&str, Plain<u32>> = SlotStore::new(2);
/// let slot = store.try_insert("a", Plain(1)).unwrap();
/// assert_eq!(store.index_of(&"a"), Some(slot));
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug)]
pub struct SlotStore<K, V> {
    slots: Vec<Option<Slot<K, V>>>,
    index: FxHashMap<K, usize>,
    free: Vec<usize>,
}

impl<K, V> SlotStore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a store with `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            // Popped from the back, so slots fill lowest-numbered first.
            free: (0..capacity).rev().collect(),
        }
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Returns `true` if `key` is stored.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Slot number holding `key`, if any.
    #[inline]
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns `true` if `slot` currently holds an occupant.
    #[inline]
    pub fn is_occupied(&self, slot: usize) -> bool {
        self.slots
            .get(slot)
            .map(|cell| cell.is_some())
            .unwrap_or(false)
    }

    /// Key stored in `slot`, if occupied.
    #[inline]
    pub fn key_at(&self, slot: usize) -> Option<&K> {
        self.slots.get(slot).and_then(|cell| cell.as_ref()).map(|s| &s.key)
    }

    /// Value stored in `slot`, if occupied.
    #[inline]
    pub fn value(&self, slot: usize) -> Option<&V> {
        self.slots
            .get(slot)
            .and_then(|cell| cell.as_ref())
            .map(|s| &s.value)
    }

    /// Mutable value stored in `slot`, if occupied.
    #[inline]
    pub fn value_mut(&mut self, slot: usize) -> Option<&mut V> {
        self.slots
            .get_mut(slot)
            .and_then(|cell| cell.as_mut())
            .map(|s| &mut s.value)
    }

    /// Places `key`/`value` in a free slot and indexes it.
    ///
    /// The caller guarantees a slot was freed beforehand; a full store is a
    /// caller bug and reports [`CapacityExceeded`].
    pub fn try_insert(&mut self, key: K, value: V) -> Result<usize, CapacityExceeded> {
        debug_assert!(!self.index.contains_key(&key), "key already stored");
        let slot = self.free.pop().ok_or(CapacityExceeded)?;
        debug_assert!(self.slots[slot].is_none());
        self.index.insert(key.clone(), slot);
        self.slots[slot] = Some(Slot { key, value });
        Ok(slot)
    }

    /// Swaps the value stored in an occupied `slot`, returning the previous
    /// one. The key and the index entry are untouched.
    pub fn replace(&mut self, slot: usize, value: V) -> V {
        debug_assert!(self.is_occupied(slot), "replace on a vacant slot");
        let cell = self.slots[slot].as_mut();
        match cell {
            Some(occupant) => std::mem::replace(&mut occupant.value, value),
            None => unreachable!("replace requires an occupied slot"),
        }
    }

    /// Clears `slot` and its index entry, returning the occupant.
    ///
    /// The slot number goes back on the free list. Returns `None` for a
    /// vacant or out-of-range slot.
    pub fn take(&mut self, slot: usize) -> Option<(K, V)> {
        let Slot { key, value } = self.slots.get_mut(slot)?.take()?;
        self.index.remove(&key);
        self.free.push(slot);
        Some((key, value))
    }

    /// Clears the slot holding `key`, returning the slot number and the
    /// occupant. The caller owns the item and fires `on_evict` itself.
    pub fn remove(&mut self, key: &K) -> Option<(usize, V)> {
        let slot = self.index.remove(key)?;
        debug_assert!(self.slots[slot].is_some(), "index pointed at vacant slot");
        let occupant = self.slots[slot].take()?;
        self.free.push(slot);
        Some((slot, occupant.value))
    }

    /// Verifies index/slot lock-step. Used by tests and debug validation.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() + self.free.len() != self.slots.len() {
            return Err(InvariantError::new(format!(
                "{} indexed + {} free != {} slots",
                self.index.len(),
                self.free.len(),
                self.slots.len()
            )));
        }
        for (key, &slot) in &self.index {
            match self.slots.get(slot).and_then(|cell| cell.as_ref()) {
                Some(occupant) if occupant.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "index entry disagrees with occupant key in slot {slot}"
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at vacant slot {slot}"
                    )));
                },
            }
        }
        for &slot in &self.free {
            if self.is_occupied(slot) {
                return Err(InvariantError::new(format!(
                    "free list contains occupied slot {slot}"
                )));
            }
        }
        Ok(())
    }
}

impl<K, V> SlotStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Item,
{
    /// Evicts the occupant of `slot`: clears the slot and the index entry,
    /// then fires `on_evict` and drops the item.
    ///
    /// Evicting a vacant slot is a contract violation (debug-asserted; a
    /// no-op in release builds).
    pub fn evict(&mut self, slot: usize) {
        debug_assert!(self.is_occupied(slot), "evict on a vacant slot");
        if let Some((_key, mut value)) = self.take(slot) {
            value.on_evict();
        }
    }
}
