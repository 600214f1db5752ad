//! Hash map construction helpers
//!
//! The analysis result is a two-level map keyed by user and video id. Both
//! levels use ahash, which keeps lookups fast for the short string keys
//! typical of playback logs while staying DoS resistant through random seeds.

use ahash::RandomState;
use std::collections::HashMap;

/// Map type used for the per-user and per-video levels of the analysis result
pub type KeyedMap<K, V> = HashMap<K, V, RandomState>;

/// Create a new `HashMap` with the crate's hasher
///
/// # Example
///
/// ```rust
/// use uvt_core::utils::hashers::create_hash_map;
///
/// let mut map = create_hash_map::<String, u32>();
/// map.insert("video-1".to_string(), 42);
/// ```
#[must_use]
pub fn create_hash_map<K, V>() -> KeyedMap<K, V> {
    HashMap::with_hasher(RandomState::new())
}

/// Create a new `HashMap` with specific capacity and the crate's hasher
#[must_use]
pub fn create_hash_map_with_capacity<K, V>(capacity: usize) -> KeyedMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, RandomState::new())
}
