// ============================================================================
// equatable-collections - Type Definitions
// Function-pointer policy types and the default equality/hash functions
// ============================================================================

use std::hash::Hash;
use std::sync::LazyLock;

use ahash::RandomState;

use super::constants::DEFAULT_HASH_SEEDS;

// =============================================================================
// POLICY FUNCTION TYPES
// =============================================================================

/// Equality function type for comparing keys, values or elements
pub type EqualsFn<T> = fn(&T, &T) -> bool;

/// Hash function type paired with an [`EqualsFn`].
///
/// Must agree with its equality function: values that compare equal hash equal.
pub type HashFn<T> = fn(&T) -> u64;

// =============================================================================
// DEFAULTS
// =============================================================================

static DEFAULT_HASH_STATE: LazyLock<RandomState> = LazyLock::new(|| {
    let [k0, k1, k2, k3] = DEFAULT_HASH_SEEDS;
    RandomState::with_seeds(k0, k1, k2, k3)
});

/// The hash state behind [`default_hash`].
///
/// Custom comparers can build hashers from it so their codes mix the same way
/// as the defaults.
pub fn hash_state() -> &'static RandomState {
    &DEFAULT_HASH_STATE
}

/// Default equality using PartialEq
pub fn default_equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// Default hash using the value's own `Hash` impl.
///
/// Deterministic within a process, so equal values held by different
/// collections always produce the same code.
///
/// # Example
/// ```
/// use equatable_collections::core::types::default_hash;
///
/// assert_eq!(default_hash(&"key"), default_hash(&"key"));
/// assert_ne!(default_hash(&1u32), default_hash(&2u32));
/// ```
pub fn default_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    DEFAULT_HASH_STATE.hash_one(value)
}

// =============================================================================
// TESTS
// =============================================================================
