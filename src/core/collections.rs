//! Storage and hashing aliases shared across the crate.
//!
//! The arena backend is selectable at build time: the default
//! `dense-slotmap` feature stores quad-edge groups in a `DenseSlotMap` for
//! cache-friendly iteration, while building with `--no-default-features`
//! switches to the plain `SlotMap`. Neither choice is exposed in public API
//! signatures.

use rustc_hash::{FxHashMap, FxHashSet};

#[cfg(feature = "dense-slotmap")]
use slotmap::DenseSlotMap;
#[cfg(not(feature = "dense-slotmap"))]
use slotmap::SlotMap;

/// Keyed arena backing for per-instance storage.
#[cfg(feature = "dense-slotmap")]
pub type StorageMap<K, V> = DenseSlotMap<K, V>;

/// Keyed arena backing for per-instance storage.
#[cfg(not(feature = "dense-slotmap"))]
pub type StorageMap<K, V> = SlotMap<K, V>;

/// Fast non-cryptographic hash map for internal, trusted keys.
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// Fast non-cryptographic hash set for internal, trusted keys.
pub type FastHashSet<T> = FxHashSet<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_collections_are_usable() {
        let mut map: FastHashMap<u64, usize> = FastHashMap::default();
        map.insert(7, 42);
        assert_eq!(map.get(&7), Some(&42));

        let mut set: FastHashSet<[usize; 3]> = FastHashSet::default();
        assert!(set.insert([0, 1, 2]));
        assert!(!set.insert([0, 1, 2]));
    }
}
