//! Error types for the slotcache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity, zero eviction sample count).
//! - [`CapacityExceeded`]: Returned by [`SlotStore::try_insert`] when no slot
//!   is free. The cache façade always frees a slot first, so seeing this
//!   through the façade indicates an orchestration bug, not a runtime case.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//!
//! [`SlotStore::try_insert`]: crate::store::SlotStore::try_insert

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by the fallible construction path,
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use slotcache::builder::{CacheBuilder, CachePolicy};
/// use slotcache::error::ConfigError;
/// use slotcache::item::Plain;
///
/// let err = CacheBuilder::new(0)
///     .try_build::<u64, Plain<u64>>(CachePolicy::Bplru)
///     .unwrap_err();
/// assert_eq!(err, ConfigError::InvalidCapacity { capacity: 0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested capacity was zero; every cache needs at least one slot.
    InvalidCapacity { capacity: usize },
    /// The requested eviction sample count was zero; the two-random-choices
    /// policy must compare at least one candidate.
    InvalidSampleCount { samples: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCapacity { capacity } => {
                write!(f, "cache capacity must be at least 1 (got {capacity})")
            },
            ConfigError::InvalidSampleCount { samples } => {
                write!(f, "eviction sample count must be at least 1 (got {samples})")
            },
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// CapacityExceeded
// ---------------------------------------------------------------------------

/// Error returned when an insertion is attempted against a full slot store.
///
/// The caller is expected to evict before inserting; the store never evicts
/// on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded;

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("slot store is full; a slot must be evicted before inserting")
    }
}

impl std::error::Error for CapacityExceeded {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on cache types (e.g.
/// [`SlotCache::check_invariants`](crate::cache::SlotCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages_name_the_parameter() {
        let err = ConfigError::InvalidCapacity { capacity: 0 };
        assert!(err.to_string().contains("capacity"));

        let err = ConfigError::InvalidSampleCount { samples: 0 };
        assert!(err.to_string().contains("sample"));
    }

    #[test]
    fn invariant_error_round_trips_message() {
        let err = InvariantError::new("index points at vacant slot 3");
        assert_eq!(err.message(), "index points at vacant slot 3");
        assert_eq!(err.to_string(), "index points at vacant slot 3");
    }
}
