// ============================================================================
// equatable-collections - Collections
// Immutable array, map and set values with structural equality
// ============================================================================
//
// EquatableArray wraps a shared slice. EquatableMap and EquatableSet sit on
// one persistent hash trie, so every edit copies only the path it touches
// and the rest of the structure is shared with the previous version.
//
// Map and set hashes are XOR folds of per-entry hashes, kept up to date on
// each edit. That makes them independent of insertion order and O(1) to read.
// ============================================================================

mod array;
mod map;
mod set;
mod trie;

#[cfg(feature = "serde")]
mod serde_impls;

pub use array::EquatableArray;
pub use map::{EquatableMap, Iter as MapIter, Keys, Values};
pub use set::{EquatableSet, Iter as SetIter};
