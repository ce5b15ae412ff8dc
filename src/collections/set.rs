// ============================================================================
// equatable-collections - EquatableSet
// A persistent hash set with content equality and set algebra
// ============================================================================

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use super::trie::{self, Trie};
use crate::equality::EqualityComparer;

// =============================================================================
// EQUATABLE SET
// =============================================================================

/// An immutable set of distinct elements.
///
/// Uniqueness, lookups and set algebra all go through the set's comparer.
/// Edits return new sets that share untouched structure with the receiver.
/// Two sets are equal when they use the same comparer and contain the same
/// elements.
///
/// # Example
///
/// ```
/// use equatable_collections::{equatable_set, EquatableSet};
///
/// let small: EquatableSet<i32> = [1, 2, 3].into_iter().collect();
/// let large = small.union([3, 4]);
///
/// assert_eq!(large.len(), 4);
/// assert!(small.is_proper_subset_of(&large));
/// assert_eq!(small.intersect([2, 3, 9]), equatable_set![3, 2]);
/// ```
pub struct EquatableSet<T> {
    trie: Trie<T, ()>,
    /// XOR of every element's hash under `comparer`
    content_hash: u64,
    comparer: EqualityComparer<T>,
}

impl<T: Eq + Hash> EquatableSet<T> {
    /// An empty set using the default comparer.
    pub const fn new() -> Self {
        Self::with_comparer(EqualityComparer::new())
    }
}

impl<T> EquatableSet<T> {
    /// An empty set using `comparer`.
    pub const fn with_comparer(comparer: EqualityComparer<T>) -> Self {
        Self {
            trie: Trie::new(),
            content_hash: 0,
            comparer,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trie.len() == 0
    }

    pub fn comparer(&self) -> &EqualityComparer<T> {
        &self.comparer
    }

    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// The stored element equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.trie
            .get(self.comparer.hash(value), value, &self.comparer)
            .map(|(stored, _)| stored)
    }

    /// Elements in unspecified (but repeatable) order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.trie.iter(),
        }
    }

    /// Order-independent hash of the elements. O(1).
    #[inline]
    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.trie.ptr_eq(&other.trie)
    }

    /// An empty set with the same comparer.
    pub fn clear(&self) -> Self {
        Self::with_comparer(self.comparer.clone())
    }

    // =========================================================================
    // PREDICATES
    // =========================================================================

    /// Whether any element of `other` is in this set.
    pub fn overlaps<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        other.into_iter().any(|item| self.contains(item.borrow()))
    }

    /// Whether every element of `other` is in this set.
    pub fn is_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        other.into_iter().all(|item| self.contains(item.borrow()))
    }
}

impl<T: Clone> EquatableSet<T> {
    /// Build a set with `comparer`; the first of several equal elements wins.
    pub fn from_iter_with<I>(items: I, comparer: EqualityComparer<T>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Self::with_comparer(comparer);
        for item in items {
            set.insert_mut(item);
        }
        set
    }

    /// The set with `value` added. Adding a present element returns a set
    /// sharing the receiver's structure.
    pub fn add(&self, value: T) -> Self {
        let mut next = self.clone();
        next.insert_mut(value);
        next
    }

    /// The set without `value`.
    pub fn remove(&self, value: &T) -> Self {
        let mut next = self.clone();
        next.remove_mut(value);
        next
    }

    // =========================================================================
    // SET ALGEBRA
    // =========================================================================

    /// Elements in either this set or `other`.
    pub fn union<I>(&self, other: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let mut next = self.clone();
        for item in other {
            next.insert_ref(item.borrow());
        }
        next
    }

    /// Elements of this set that also occur in `other`.
    pub fn intersect<I>(&self, other: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let mut next = self.clear();
        for item in other {
            if let Some(stored) = self.get(item.borrow()) {
                next.insert_ref(stored);
            }
        }
        if next.len() == self.len() {
            return self.clone();
        }
        next
    }

    /// Elements of this set that do not occur in `other`.
    pub fn except<I>(&self, other: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let mut next = self.clone();
        for item in other {
            next.remove_mut(item.borrow());
        }
        next
    }

    /// Elements in exactly one of this set and `other`.
    ///
    /// # Example
    /// ```
    /// use equatable_collections::equatable_set;
    ///
    /// let set = equatable_set![1, 2, 3];
    /// let odd_one_out = set.symmetric_except([3, 4, 4]);
    /// assert_eq!(odd_one_out, equatable_set![1, 2, 4]);
    /// ```
    pub fn symmetric_except<I>(&self, other: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = self.distinct(other);
        let mut next = self.except(&other);
        for item in other.iter() {
            if !self.contains(item) {
                next.insert_ref(item);
            }
        }
        next
    }

    /// Whether every element of this set occurs in `other`.
    pub fn is_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = self.distinct(other);
        self.len() <= other.len() && self.iter().all(|item| other.contains(item))
    }

    /// Subset of `other`, with `other` holding at least one extra element.
    pub fn is_proper_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = self.distinct(other);
        self.len() < other.len() && self.iter().all(|item| other.contains(item))
    }

    /// Superset of `other`, holding at least one element `other` lacks.
    pub fn is_proper_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = self.distinct(other);
        self.len() > other.len() && self.is_superset_of(&other)
    }

    /// Whether this set and `other` hold the same elements, ignoring
    /// duplicates in `other`.
    pub fn set_equals<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = self.distinct(other);
        self.len() == other.len() && self.is_superset_of(&other)
    }

    /// `other` collected under this set's comparer.
    fn distinct<I>(&self, other: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let mut distinct = self.clear();
        for item in other {
            distinct.insert_ref(item.borrow());
        }
        distinct
    }

    fn insert_ref(&mut self, value: &T) {
        if !self.contains(value) {
            self.insert_mut(value.clone());
        }
    }

    pub(super) fn insert_mut(&mut self, value: T) {
        let hash = self.comparer.hash(&value);
        if self.trie.get(hash, &value, &self.comparer).is_some() {
            return;
        }
        self.trie.insert(hash, value, (), &self.comparer);
        self.content_hash ^= hash;
    }

    fn remove_mut(&mut self, value: &T) {
        let hash = self.comparer.hash(value);
        if self.trie.remove(hash, value, &self.comparer).is_some() {
            self.content_hash ^= hash;
        }
    }
}

// =============================================================================
// TRAIT IMPLEMENTATIONS
// =============================================================================

impl<T: Eq + Hash> Default for EquatableSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EquatableSet<T> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
            content_hash: self.content_hash,
            comparer: self.comparer.clone(),
        }
    }
}

impl<T> PartialEq for EquatableSet<T> {
    fn eq(&self, other: &Self) -> bool {
        if !self.comparer.same_policy(&other.comparer) {
            return false;
        }
        if self.ptr_eq(other) {
            return true;
        }
        self.len() == other.len()
            && self.content_hash == other.content_hash
            && self.iter().all(|item| other.contains(item))
    }
}

impl<T> Eq for EquatableSet<T> {}

impl<T> Hash for EquatableSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        state.write_u64(self.content_hash);
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for EquatableSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with(iter, EqualityComparer::new())
    }
}

impl<'a, T> IntoIterator for &'a EquatableSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for EquatableSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// =============================================================================
// ITERATOR
// =============================================================================

/// Iterator over a set's elements.
pub struct Iter<'a, T> {
    inner: trie::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(item, _)| item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[i32]) -> EquatableSet<i32> {
        items.iter().copied().collect()
    }

    fn sorted(set: &EquatableSet<i32>) -> Vec<i32> {
        let mut items: Vec<_> = set.iter().copied().collect();
        items.sort_unstable();
        items
    }

    #[test]
    fn create_empty_set() {
        let empty: EquatableSet<String> = EquatableSet::new();
        assert!(empty.is_empty());
        assert_eq!(empty.content_hash(), 0);
        assert_eq!(empty, EquatableSet::default());
    }

    #[test]
    fn duplicates_collapse_on_construction() {
        let set = set(&[1, 2, 2, 3, 1]);
        assert_eq!(set.len(), 3);
        assert_eq!(sorted(&set), vec![1, 2, 3]);
    }

    #[test]
    fn add_and_remove_are_persistent() {
        let base = set(&[1, 2]);
        let added = base.add(3);
        let removed = base.remove(&1);

        assert_eq!(sorted(&base), vec![1, 2]);
        assert_eq!(sorted(&added), vec![1, 2, 3]);
        assert_eq!(sorted(&removed), vec![2]);

        assert!(base.add(2).ptr_eq(&base));
        assert!(base.remove(&9).ptr_eq(&base));
    }

    #[test]
    fn equality_ignores_order() {
        let forward = set(&[1, 2, 3]);
        let backward = set(&[3, 2, 1]);
        assert_eq!(forward, backward);
        assert_eq!(forward.content_hash(), backward.content_hash());
        assert_ne!(forward, set(&[1, 2]));
        assert_ne!(forward, set(&[1, 2, 4]));
    }

    #[test]
    fn union_intersect_except() {
        let left = set(&[1, 2, 3]);
        assert_eq!(left.union([3, 4, 5]), set(&[1, 2, 3, 4, 5]));
        assert_eq!(left.intersect([2, 3, 4]), set(&[2, 3]));
        assert_eq!(left.except([2, 9]), set(&[1, 3]));
        assert_eq!(left.symmetric_except([3, 4]), set(&[1, 2, 4]));
    }

    #[test]
    fn algebra_accepts_references() {
        let left = set(&[1, 2, 3]);
        let right = set(&[2, 3, 4]);
        assert_eq!(left.union(&right), set(&[1, 2, 3, 4]));
        assert_eq!(left.intersect(&right), set(&[2, 3]));
        assert_eq!(left.except(&right), set(&[1]));
        assert_eq!(left.symmetric_except(&right), set(&[1, 4]));
        assert!(left.overlaps(&right));
    }

    #[test]
    fn algebra_with_empty_input() {
        let left = set(&[1, 2]);
        let nothing: [i32; 0] = [];
        assert!(left.union(nothing).ptr_eq(&left));
        assert!(left.intersect(nothing).is_empty());
        assert!(left.except(nothing).ptr_eq(&left));
        assert_eq!(left.symmetric_except(nothing), left);
        assert!(!left.overlaps(nothing));
    }

    #[test]
    fn full_intersection_shares_structure() {
        let left = set(&[1, 2, 3]);
        assert!(left.intersect([3, 2, 1, 7]).ptr_eq(&left));
    }

    #[test]
    fn subset_and_superset() {
        let small = set(&[1, 2]);
        let large = set(&[1, 2, 3]);

        assert!(small.is_subset_of(&large));
        assert!(small.is_proper_subset_of(&large));
        assert!(large.is_superset_of(&small));
        assert!(large.is_proper_superset_of(&small));

        assert!(small.is_subset_of(&small));
        assert!(!small.is_proper_subset_of(&small));
        assert!(!large.is_subset_of(&small));

        // duplicates in the argument do not count twice
        assert!(!small.is_proper_subset_of([1, 1, 2, 2]));
        assert!(small.set_equals([2, 1, 2]));
        assert!(!small.set_equals([1, 2, 3]));
    }

    #[test]
    fn empty_set_relations() {
        let empty: EquatableSet<i32> = EquatableSet::new();
        let some = set(&[1]);
        assert!(empty.is_subset_of(&some));
        assert!(empty.is_proper_subset_of(&some));
        assert!(empty.is_subset_of(&empty));
        assert!(!empty.overlaps(&some));
        assert!(some.is_superset_of(&empty));
    }

    #[test]
    fn custom_comparer_drives_membership() {
        fn same_tens(a: &i32, b: &i32) -> bool {
            a / 10 == b / 10
        }
        fn tens(value: &i32) -> u64 {
            (value / 10) as u64
        }
        let by_tens = EqualityComparer::from_fns(same_tens, tens);
        let buckets = EquatableSet::from_iter_with([11, 15, 23], by_tens.clone());

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets.get(&19), Some(&11));
        assert!(buckets.set_equals([10, 20]));
        assert_eq!(buckets, EquatableSet::from_iter_with([29, 12], by_tens));
        // same contents, different policy
        assert_ne!(buckets, set(&[11, 23]));
    }

    #[test]
    fn clear_keeps_comparer() {
        let words = EquatableSet::from_iter_with(["Hello"], EqualityComparer::ignore_ascii_case());
        let cleared = words.clear();
        assert!(cleared.is_empty());
        assert!(cleared.add("HELLO").contains(&"hello"));
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", set(&[7])), "{7}");
    }
}
