// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Tests that verify library-wide behavioral consistency across all cache
// policies. These span multiple modules and belong here rather than in any
// single source file.

use slotcache::builder::{CacheBuilder, CachePolicy};
use slotcache::item::Plain;
use slotcache::policy::bplru::BplruCache;
use slotcache::policy::trc::TrcCache;

const POLICIES: [CachePolicy; 3] = [
    CachePolicy::Bplru,
    CachePolicy::Trc { samples: 2 },
    CachePolicy::Lru,
];

// ==============================================
// Capacity Invariant
// ==============================================
//
// No sequence of inserts may push the occupancy past the configured
// capacity, and the key index must stay in lock-step with the slots.

mod capacity_invariant {
    use super::*;

    #[test]
    fn occupancy_never_exceeds_capacity() {
        for policy in POLICIES {
            for capacity in [1, 2, 3, 4, 7, 8, 100] {
                let mut cache = CacheBuilder::new(capacity)
                    .try_build::<u32, Plain<u32>>(policy)
                    .unwrap();
                for key in 0..(capacity as u32 * 4) {
                    cache.insert(key, Plain(key));
                    assert!(
                        cache.len() <= capacity,
                        "{policy:?} overfilled at capacity {capacity}"
                    );
                    cache.check_invariants().unwrap();
                }
                assert_eq!(cache.len(), capacity);
            }
        }
    }

    #[test]
    fn interleaved_removals_stay_consistent() {
        for policy in POLICIES {
            let mut cache = CacheBuilder::new(8)
                .try_build::<u32, Plain<u32>>(policy)
                .unwrap();
            for key in 0..64 {
                cache.insert(key, Plain(key));
                if key % 3 == 0 {
                    cache.remove(&(key / 2));
                }
                cache.check_invariants().unwrap();
            }
        }
    }
}

// ==============================================
// Index Consistency
// ==============================================
//
// A key resolves iff it was inserted and has neither been removed nor
// evicted since.

mod index_consistency {
    use super::*;

    #[test]
    fn lookup_tracks_insert_and_remove() {
        for policy in POLICIES {
            let mut cache = CacheBuilder::new(4)
                .try_build::<&str, Plain<u32>>(policy)
                .unwrap();

            assert!(cache.get(&"a").is_none());
            cache.insert("a", Plain(1));
            assert_eq!(cache.get(&"a"), Some(&Plain(1)));

            cache.remove(&"a");
            assert!(cache.get(&"a").is_none());
            assert!(cache.remove(&"a").is_none());
        }
    }

    #[test]
    fn eviction_drops_exactly_one_resident_key() {
        for policy in POLICIES {
            let mut cache = CacheBuilder::new(4)
                .try_build::<u32, Plain<u32>>(policy)
                .unwrap();
            for key in 0..4 {
                cache.insert(key, Plain(key));
            }
            cache.insert(4, Plain(4));

            let survivors = (0..5).filter(|key| cache.contains(key)).count();
            assert_eq!(survivors, 4, "{policy:?} lost more than one key");
            assert!(cache.contains(&4), "{policy:?} evicted the fresh insert");
        }
    }
}

// ==============================================
// BPLRU Walk Semantics
// ==============================================
//
// Pins the exact bit-walk behavior end to end: keys fill slots
// lowest-numbered first, so access order maps directly onto leaves.

mod bplru_walks {
    use super::*;

    #[test]
    fn in_order_accesses_sacrifice_the_first_leaf() {
        let mut cache: BplruCache<u32, Plain<u32>> = BplruCache::new(4);
        for key in 0..4 {
            cache.insert(key, Plain(key));
        }

        cache.insert(4, Plain(4));
        assert!(!cache.contains(&0));
        for key in 1..5 {
            assert!(cache.contains(&key));
        }
    }

    #[test]
    fn refreshing_a_slot_redirects_the_walk() {
        let mut cache: BplruCache<u32, Plain<u32>> = BplruCache::new(4);
        for key in 0..4 {
            cache.insert(key, Plain(key));
        }
        cache.insert(4, Plain(4)); // key 0 out, slot 0 refilled

        cache.get(&1);
        cache.insert(5, Plain(5));

        // Slot 1 was just refreshed; the walk lands on slot 2 instead.
        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
    }

    #[test]
    fn capacity_two_evicts_the_older_of_the_pair() {
        let mut cache: BplruCache<&str, Plain<u32>> = BplruCache::new(2);
        cache.insert("a", Plain(1));
        cache.insert("b", Plain(2));
        cache.insert("c", Plain(3));

        assert!(cache.get(&"a").is_none());
        assert_eq!(cache.get(&"b"), Some(&Plain(2)));
        assert_eq!(cache.get(&"c"), Some(&Plain(3)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn non_power_of_two_capacity_stays_in_bounds() {
        for capacity in [3usize, 5, 6, 7, 9] {
            let mut cache = BplruCache::new(capacity);
            for key in 0..(capacity as u32 * 5) {
                cache.insert(key, Plain(key));
                if key % 2 == 0 {
                    cache.get(&(key / 2));
                }
                assert!(cache.len() <= capacity);
                cache.check_invariants().unwrap();
            }
        }
    }
}

// ==============================================
// TRC Determinism at the Boundary
// ==============================================

mod trc_boundaries {
    use super::*;

    #[test]
    fn single_slot_cache_replaces_its_occupant() {
        let mut cache: TrcCache<&str, Plain<u32>> = TrcCache::new(1);
        cache.insert("x", Plain(1));
        cache.insert("y", Plain(2));

        assert!(cache.get(&"x").is_none());
        assert_eq!(cache.get(&"y"), Some(&Plain(2)));
    }

    #[test]
    fn oversized_sample_count_behaves_like_exact_lru() {
        // Draws are clamped to the capacity, so every slot is compared and
        // the stalest stamp always loses.
        let mut cache: TrcCache<u32, Plain<u32>> = TrcCache::with_samples(3, 64);
        cache.insert(1, Plain(1));
        cache.insert(2, Plain(2));
        cache.insert(3, Plain(3));
        cache.get(&1);

        cache.insert(4, Plain(4));
        assert!(!cache.contains(&2));
        assert!(cache.contains(&1));
    }
}

// ==============================================
// get_or_insert_with Idempotence
// ==============================================

mod ensure_idempotence {
    use super::*;

    #[test]
    fn repeated_calls_build_at_most_once() {
        for policy in POLICIES {
            let mut cache = CacheBuilder::new(4)
                .try_build::<&str, Plain<u32>>(policy)
                .unwrap();
            let mut builds = 0;

            let first = *cache.get_or_insert_with("k", |_| {
                builds += 1;
                Plain(7)
            });
            let second = *cache.get_or_insert_with("k", |_| {
                builds += 1;
                Plain(8)
            });

            assert_eq!(first, second);
            assert_eq!(builds, 1, "{policy:?} rebuilt a cached value");
        }
    }
}
