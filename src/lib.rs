// ============================================================================
// equatable-collections - Persistent Collections with Structural Equality
// ============================================================================
//
// Immutable array, map and set values that compare and hash by content,
// under pluggable equality policies. Suitable as cache keys and for cheap
// snapshot comparison: every edit returns a new value and shares structure
// with the old one.
// ============================================================================

pub mod collections;
pub mod core;
pub mod equality;
mod macros;

// Re-export the collections and policies at crate root
pub use collections::{EquatableArray, EquatableMap, EquatableSet};
pub use crate::core::error::{CollectionError, Result};
pub use crate::core::types::{default_equals, default_hash, EqualsFn, HashFn};
pub use equality::{Comparer, EqualityComparer, IgnoreAsciiCase};

// =============================================================================
// TESTS
// =============================================================================
