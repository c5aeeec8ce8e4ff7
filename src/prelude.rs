pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
#[cfg(feature = "concurrency")]
pub use crate::builder::ConcurrentCache;
pub use crate::cache::SlotCache;
pub use crate::ds::BitTree;
pub use crate::error::{CapacityExceeded, ConfigError, InvariantError};
pub use crate::item::{Item, Plain};
pub use crate::memo::Memoized;
#[cfg(feature = "metrics")]
pub use crate::metrics::CacheMetricsSnapshot;
pub use crate::policy::{
    BplruCache, BplruPolicy, LruCache, LruPolicy, ReplacementPolicy, TrcCache, TrcPolicy,
    DEFAULT_SAMPLES,
};
pub use crate::store::SlotStore;
pub use crate::traits::{CoreCache, MutableCache, ReadOnlyCache};
