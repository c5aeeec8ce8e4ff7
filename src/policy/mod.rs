//! Eviction policies.
//!
//! A policy never sees keys or values: the slot store owns those. Policies
//! track per-slot recency metadata, keyed by slot number, and answer one
//! question: which occupied slot to sacrifice when the store is full.
//!
//! Available policies:
//!
//! | Policy | Access | Eviction | Metadata |
//! |--------------------------|----------|----------|-----------------------|
//! | [`bplru::BplruPolicy`]   | O(log n) | O(log n) | n bits (tree) |
//! | [`trc::TrcPolicy`]       | O(1)     | O(k)     | one stamp per slot |
//! | [`lru::LruPolicy`]       | O(1)     | O(1)     | two links per slot |

pub mod bplru;
pub mod lru;
pub mod trc;

pub use bplru::{BplruCache, BplruPolicy};
pub use lru::{LruCache, LruPolicy};
pub use trc::{TrcCache, TrcPolicy, DEFAULT_SAMPLES};

/// A replacement policy: per-slot recency metadata plus victim selection.
///
/// The cache façade drives the policy in lock-step with the slot store:
/// every hit and every fresh insert is reported through [`on_access`], every
/// explicit removal through [`on_remove`], and a victim is requested through
/// [`victim`] only when every slot is occupied.
///
/// [`on_access`]: ReplacementPolicy::on_access
/// [`on_remove`]: ReplacementPolicy::on_remove
/// [`victim`]: ReplacementPolicy::victim
pub trait ReplacementPolicy {
    /// Records an access (hit or fresh insert) to `slot`.
    fn on_access(&mut self, slot: usize);

    /// Resets metadata for `slot` after its occupant was explicitly removed.
    fn on_remove(&mut self, slot: usize);

    /// Selects the slot to sacrifice. Callers must only ask while every slot
    /// is occupied.
    fn victim(&mut self) -> usize;

    /// Resets all metadata.
    fn clear(&mut self);
}
