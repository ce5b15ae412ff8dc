// ============================================================================
// equatable-collections - Case-Insensitive Strings
// ============================================================================

use std::hash::{BuildHasher, Hasher};

use super::comparer::{Comparer, EqualityComparer};
use crate::core::types::hash_state;

/// ASCII case-insensitive equality for anything string-like.
///
/// Zero-sized, so every `EqualityComparer` built from it is the same policy.
///
/// # Example
/// ```
/// use equatable_collections::{EqualityComparer, EquatableMap};
///
/// let keys = EqualityComparer::ignore_ascii_case();
/// let upper = EquatableMap::from_entries_with([("A", 1)], keys.clone(), EqualityComparer::new());
/// let lower = EquatableMap::from_entries_with([("a", 1)], keys, EqualityComparer::new());
///
/// assert_eq!(upper, lower);
/// assert_eq!(upper.content_hash(), lower.content_hash());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IgnoreAsciiCase;

impl<T: AsRef<str>> Comparer<T> for IgnoreAsciiCase {
    fn equals(&self, a: &T, b: &T) -> bool {
        a.as_ref().eq_ignore_ascii_case(b.as_ref())
    }

    fn hash(&self, value: &T) -> u64 {
        let mut hasher = hash_state().build_hasher();
        for byte in value.as_ref().bytes() {
            hasher.write_u8(byte.to_ascii_lowercase());
        }
        // length terminator, like `str`'s own Hash impl
        hasher.write_u8(0xff);
        hasher.finish()
    }
}

impl<T: AsRef<str>> EqualityComparer<T> {
    /// Shorthand for `EqualityComparer::shared(IgnoreAsciiCase)`.
    pub fn ignore_ascii_case() -> Self {
        Self::shared(IgnoreAsciiCase)
    }
}
