// ============================================================================
// equatable-collections - EquatableArray
// A fixed-length, read-only sequence compared element by element
// ============================================================================

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::slice::Iter;
use std::sync::Arc;

use crate::core::constants::{FNV_OFFSET_BASIS, FNV_PRIME};
use crate::core::error::{CollectionError, Result};
use crate::core::types::default_hash;

// =============================================================================
// EQUATABLE ARRAY
// =============================================================================

/// An immutable array that compares and hashes by its elements, in order.
///
/// Cloning shares the backing storage. Building from an empty source yields
/// [`EquatableArray::EMPTY`] without allocating.
///
/// # Example
///
/// ```
/// use equatable_collections::EquatableArray;
///
/// let inputs = EquatableArray::from(vec![1, 2, 3]);
///
/// assert_eq!(inputs.len(), 3);
/// assert_eq!(inputs[1], 2);
/// assert_eq!(inputs, EquatableArray::from([1, 2, 3]));
/// assert_ne!(inputs, EquatableArray::from([3, 2, 1]));
/// ```
///
/// There is no way to change an element once the array exists:
///
/// ```compile_fail
/// use equatable_collections::EquatableArray;
///
/// let mut inputs = EquatableArray::from([1, 2, 3]);
/// inputs[0] = 10;
/// ```
///
/// ```compile_fail
/// use equatable_collections::EquatableArray;
///
/// let mut inputs = EquatableArray::from([1, 2, 3]);
/// inputs.push(4);
/// ```
pub struct EquatableArray<T> {
    /// `None` is the canonical empty array
    items: Option<Arc<[T]>>,
}

impl<T> EquatableArray<T> {
    /// The canonical empty array.
    pub const EMPTY: Self = Self { items: None };

    /// Returns [`EquatableArray::EMPTY`].
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Number of elements. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.items.as_deref().map_or(0, <[T]>::len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_none()
    }

    /// Element at `index`, or `None` when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Element at `index`, or [`CollectionError::IndexOutOfRange`].
    ///
    /// # Example
    /// ```
    /// use equatable_collections::{CollectionError, EquatableArray};
    ///
    /// let array = EquatableArray::from(["a", "b"]);
    /// assert_eq!(array.try_get(1), Ok(&"b"));
    /// assert_eq!(
    ///     array.try_get(2),
    ///     Err(CollectionError::IndexOutOfRange { index: 2, len: 2 })
    /// );
    /// ```
    pub fn try_get(&self, index: usize) -> Result<&T> {
        self.get(index).ok_or(CollectionError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Read-only view of the elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Iterate in construction order. Every call starts a fresh pass.
    pub fn iter(&self) -> Iter<'_, T> {
        self.as_slice().iter()
    }

    /// True when both arrays are the same instance: both canonical empty, or
    /// sharing one allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.items, &other.items) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: PartialEq> EquatableArray<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.as_slice().contains(value)
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|item| item == value)
    }
}

impl<T: Clone> EquatableArray<T> {
    /// Copy the elements into a fresh `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    pub fn from_slice(items: &[T]) -> Self {
        if items.is_empty() {
            Self::EMPTY
        } else {
            Self {
                items: Some(Arc::from(items)),
            }
        }
    }
}

impl<T: Hash> EquatableArray<T> {
    /// Order-sensitive hash of the contents.
    ///
    /// Folds every element's hash into an FNV-1a style accumulator, so
    /// reordering elements changes the result.
    pub fn content_hash(&self) -> u64 {
        self.iter().fold(FNV_OFFSET_BASIS, |acc, item| {
            (acc ^ default_hash(item)).wrapping_mul(FNV_PRIME)
        })
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl<T> From<Vec<T>> for EquatableArray<T> {
    fn from(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::EMPTY
        } else {
            Self {
                items: Some(Arc::from(items)),
            }
        }
    }
}

impl<T, const N: usize> From<[T; N]> for EquatableArray<T> {
    fn from(items: [T; N]) -> Self {
        Self::from(Vec::from(items))
    }
}

impl<T: Clone> From<&[T]> for EquatableArray<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T> FromIterator<T> for EquatableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

// =============================================================================
// TRAIT IMPLEMENTATIONS
// =============================================================================

impl<T> Default for EquatableArray<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> Clone for EquatableArray<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for EquatableArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for EquatableArray<T> {}

impl<T: Hash> Hash for EquatableArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.content_hash());
    }
}

impl<T> Index<usize> for EquatableArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> AsRef<[T]> for EquatableArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> IntoIterator for &'a EquatableArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for EquatableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_array_is_empty() {
        let array: EquatableArray<i32> = EquatableArray::new();
        assert!(array.is_empty());
        assert_eq!(array.len(), 0);
        assert_eq!(array.first(), None);
        assert!(array.ptr_eq(&EquatableArray::EMPTY));
    }

    #[test]
    fn empty_sources_are_canonical() {
        let from_vec: EquatableArray<i32> = EquatableArray::from(Vec::new());
        let from_iter: EquatableArray<i32> = std::iter::empty().collect();
        let from_slice: EquatableArray<i32> = EquatableArray::from_slice(&[]);

        for array in [from_vec, from_iter, from_slice] {
            assert!(array.ptr_eq(&EquatableArray::EMPTY));
            assert_eq!(array, EquatableArray::default());
        }
    }

    #[test]
    fn indexed_reads() {
        let array = EquatableArray::from([1, 2, 3]);
        assert_eq!(array.len(), 3);
        assert_eq!(array[1], 2);
        assert_eq!(array.get(2), Some(&3));
        assert_eq!(array.get(3), None);
        assert_eq!(array.first(), Some(&1));
        assert_eq!(array.last(), Some(&3));
    }

    #[test]
    fn try_get_reports_out_of_range() {
        let array = EquatableArray::from([10, 20]);
        assert_eq!(array.try_get(0), Ok(&10));
        assert_eq!(
            array.try_get(2),
            Err(CollectionError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            EquatableArray::<u8>::EMPTY.try_get(0),
            Err(CollectionError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    #[should_panic]
    fn index_out_of_range_panics() {
        let array = EquatableArray::from([1]);
        let _ = array[1];
    }

    #[test]
    fn equality_is_elementwise_and_ordered() {
        let a = EquatableArray::from([1, 2, 3]);
        let b: EquatableArray<i32> = vec![1, 2, 3].into_iter().collect();
        let reversed = EquatableArray::from([3, 2, 1]);
        let shorter = EquatableArray::from([1, 2]);

        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert_ne!(a, reversed);
        assert_ne!(a, shorter);
    }

    #[test]
    fn clones_share_storage() {
        let a = EquatableArray::from(vec!["x".to_string()]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn identical_instances_are_equal_even_when_elements_are_not() {
        let array = EquatableArray::from([f64::NAN]);
        assert_ne!(array.as_slice(), array.clone().as_slice());
        assert_eq!(array, array.clone());
    }

    #[test]
    fn hash_follows_equality() {
        let a = EquatableArray::from([1, 2, 3]);
        let b = EquatableArray::from_slice(&[1, 2, 3]);
        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(
            a.content_hash(),
            EquatableArray::from([3, 2, 1]).content_hash()
        );
        assert_eq!(
            EquatableArray::<u8>::EMPTY.content_hash(),
            FNV_OFFSET_BASIS
        );
    }

    #[test]
    fn works_as_hash_set_key() {
        let mut seen = HashSet::new();
        assert!(seen.insert(EquatableArray::from(["a", "b"])));
        assert!(!seen.insert(EquatableArray::from(vec!["a", "b"])));
        assert!(seen.insert(EquatableArray::from(["b", "a"])));
    }

    #[test]
    fn iteration_is_restartable() {
        let array = EquatableArray::from([1, 2, 3]);
        let first: Vec<_> = array.iter().copied().collect();
        let second: Vec<_> = (&array).into_iter().copied().collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn read_only_queries() {
        let array = EquatableArray::from(["a", "b", "a"]);
        assert!(array.contains(&"b"));
        assert!(!array.contains(&"c"));
        assert_eq!(array.index_of(&"a"), Some(0));
        assert_eq!(array.index_of(&"c"), None);
        assert_eq!(array.to_vec(), vec!["a", "b", "a"]);
        assert_eq!(AsRef::<[&str]>::as_ref(&array), &["a", "b", "a"]);
    }

    #[test]
    fn debug_format() {
        let array = EquatableArray::from([1, 2]);
        assert_eq!(format!("{:?}", array), "[1, 2]");
    }
}
