// ==============================================
// ITEM LIFECYCLE HOOK TESTS (integration)
// ==============================================
//
// Verifies the hook contract across every policy: on_hit fires once per
// successful lookup, on_evict fires exactly once per departing occupant,
// whether the policy sacrificed it, remove() took it out, or clear()
// emptied the cache, and never for an in-place replacement.

use std::cell::Cell;
use std::rc::Rc;

use slotcache::builder::{CacheBuilder, CachePolicy};
use slotcache::item::Item;

const POLICIES: [CachePolicy; 3] = [
    CachePolicy::Bplru,
    CachePolicy::Trc { samples: 2 },
    CachePolicy::Lru,
];

/// Shared hit/evict counters for one tracked item.
#[derive(Clone, Default)]
struct Counters {
    hits: Rc<Cell<u32>>,
    evicts: Rc<Cell<u32>>,
}

struct Tracked {
    counters: Counters,
}

impl Tracked {
    fn new(counters: &Counters) -> Self {
        Self {
            counters: counters.clone(),
        }
    }
}

impl Item for Tracked {
    fn on_hit(&mut self) {
        self.counters.hits.set(self.counters.hits.get() + 1);
    }

    fn on_evict(&mut self) {
        self.counters.evicts.set(self.counters.evicts.get() + 1);
    }
}

#[test]
fn hits_fire_once_per_successful_lookup() {
    for policy in POLICIES {
        let mut cache = CacheBuilder::new(4).try_build::<&str, Tracked>(policy).unwrap();
        let counters = Counters::default();
        cache.insert("k", Tracked::new(&counters));

        assert_eq!(counters.hits.get(), 0, "{policy:?} fired on_hit on insert");
        cache.get(&"k");
        cache.get(&"k");
        cache.get_or_insert_with("k", |_| unreachable!("key is present"));
        assert_eq!(counters.hits.get(), 3);

        // Misses and peeks are hookless.
        cache.get(&"other");
        cache.peek(&"k");
        cache.contains(&"k");
        assert_eq!(counters.hits.get(), 3);
    }
}

#[test]
fn policy_eviction_fires_on_evict_exactly_once() {
    for policy in POLICIES {
        let mut cache = CacheBuilder::new(1).try_build::<u32, Tracked>(policy).unwrap();
        let counters = Counters::default();
        cache.insert(1, Tracked::new(&counters));

        // The only slot is sacrificed for the new key.
        cache.insert(2, Tracked::new(&Counters::default()));
        assert_eq!(counters.evicts.get(), 1, "{policy:?} eviction hook");

        // The evicted item is gone; nothing can fire its hook again.
        cache.get(&1);
        cache.clear();
        assert_eq!(counters.evicts.get(), 1);
    }
}

#[test]
fn remove_fires_on_evict_and_returns_the_item() {
    for policy in POLICIES {
        let mut cache = CacheBuilder::new(4).try_build::<u32, Tracked>(policy).unwrap();
        let counters = Counters::default();
        cache.insert(1, Tracked::new(&counters));

        let removed = cache.remove(&1).expect("key was present");
        assert_eq!(counters.evicts.get(), 1, "{policy:?} remove hook");
        drop(removed);
        assert_eq!(counters.evicts.get(), 1);

        assert!(cache.remove(&1).is_none());
        assert_eq!(counters.evicts.get(), 1);
    }
}

#[test]
fn clear_fires_on_evict_per_occupant() {
    for policy in POLICIES {
        let mut cache = CacheBuilder::new(4).try_build::<u32, Tracked>(policy).unwrap();
        let all: Vec<Counters> = (0..3).map(|_| Counters::default()).collect();
        for (key, counters) in all.iter().enumerate() {
            cache.insert(key as u32, Tracked::new(counters));
        }

        cache.clear();
        for counters in &all {
            assert_eq!(counters.evicts.get(), 1, "{policy:?} clear hook");
        }
        assert!(cache.is_empty());
    }
}

#[test]
fn replacement_fires_no_hook() {
    for policy in POLICIES {
        let mut cache = CacheBuilder::new(4).try_build::<u32, Tracked>(policy).unwrap();
        let old = Counters::default();
        cache.insert(1, Tracked::new(&old));

        // In-place replacement hands the previous item back instead of
        // firing on_evict.
        let previous = cache.insert(1, Tracked::new(&Counters::default()));
        assert!(previous.is_some());
        assert_eq!(old.evicts.get(), 0, "{policy:?} replacement hook");
        assert_eq!(old.hits.get(), 0);
    }
}

#[test]
fn hook_totals_balance_over_a_churned_cache() {
    for policy in POLICIES {
        let mut cache = CacheBuilder::new(8).try_build::<u32, Tracked>(policy).unwrap();
        let all: Vec<Counters> = (0..64).map(|_| Counters::default()).collect();

        for (key, counters) in all.iter().enumerate() {
            cache.insert(key as u32, Tracked::new(counters));
            if key % 5 == 0 {
                cache.remove(&(key as u32 / 2));
            }
        }
        cache.clear();

        // Every item left the cache exactly once, one way or another.
        for (key, counters) in all.iter().enumerate() {
            assert_eq!(
                counters.evicts.get(),
                1,
                "{policy:?} key {key} fired on_evict {} times",
                counters.evicts.get()
            );
        }
    }
}
