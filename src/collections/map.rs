// ============================================================================
// equatable-collections - EquatableMap
// A persistent hash map with content equality under pluggable comparers
// ============================================================================

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::Index;

use super::trie::{self, Trie};
use crate::core::error::{CollectionError, Result};
use crate::equality::EqualityComparer;

/// Combines one entry's key and value hashes.
///
/// Entries are then XOR-folded, which makes the map hash independent of
/// iteration order.
#[inline]
fn entry_hash(key_hash: u64, value_hash: u64) -> u64 {
    (key_hash ^ value_hash.rotate_left(32)).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

// =============================================================================
// EQUATABLE MAP
// =============================================================================

/// An immutable map from unique keys to values.
///
/// Every edit returns a new map that shares all untouched structure with the
/// receiver; the receiver never changes. Keys are compared with the map's key
/// comparer and values with its value comparer, both defaulting to the types'
/// own `Eq + Hash`.
///
/// Two maps are equal when they use the same comparers and hold the same
/// entries, in any order.
///
/// # Example
///
/// ```
/// use equatable_collections::EquatableMap;
///
/// let original: EquatableMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
/// let updated = original.set_item("a", 9);
///
/// assert_eq!(updated.get(&"a"), Some(&9));
/// assert_eq!(updated.get(&"b"), Some(&2));
/// // the original is untouched
/// assert_eq!(original.get(&"a"), Some(&1));
/// assert_ne!(original, updated);
/// ```
pub struct EquatableMap<K, V> {
    trie: Trie<K, V>,
    /// XOR of `entry_hash` over all entries, maintained on every edit
    content_hash: u64,
    keys: EqualityComparer<K>,
    values: EqualityComparer<V>,
}

impl<K: Eq + Hash, V: Eq + Hash> EquatableMap<K, V> {
    /// An empty map using the default comparers.
    pub const fn new() -> Self {
        Self::with_comparers(EqualityComparer::new(), EqualityComparer::new())
    }
}

impl<K, V> EquatableMap<K, V> {
    /// An empty map using the given comparers.
    pub const fn with_comparers(keys: EqualityComparer<K>, values: EqualityComparer<V>) -> Self {
        Self {
            trie: Trie::new(),
            content_hash: 0,
            keys,
            values,
        }
    }

    /// Number of entries. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trie.len() == 0
    }

    pub fn key_comparer(&self) -> &EqualityComparer<K> {
        &self.keys
    }

    pub fn value_comparer(&self) -> &EqualityComparer<V> {
        &self.values
    }

    /// Value stored for `key`, or `None`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Stored key and value for `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.trie.get(self.keys.hash(key), key, &self.keys)
    }

    /// The key actually stored in the map that equals `key`.
    ///
    /// Differs from `key` only under a custom key comparer.
    ///
    /// # Example
    /// ```
    /// use equatable_collections::{EqualityComparer, EquatableMap};
    ///
    /// let map = EquatableMap::from_entries_with(
    ///     [("Config.toml", 1)],
    ///     EqualityComparer::ignore_ascii_case(),
    ///     EqualityComparer::new(),
    /// );
    /// assert_eq!(map.get_key(&"config.TOML"), Some(&"Config.toml"));
    /// ```
    pub fn get_key(&self, key: &K) -> Option<&K> {
        self.get_key_value(key).map(|(stored, _)| stored)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get_key_value(key).is_some()
    }

    /// Whether the map holds `key` with a value equal to `value`.
    pub fn contains(&self, key: &K, value: &V) -> bool {
        self.get(key)
            .is_some_and(|stored| self.values.equals(stored, value))
    }

    /// Entries in unspecified (but repeatable) order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.trie.iter(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Order-independent hash of the contents, under the map's comparers.
    ///
    /// O(1): the value is maintained as entries are added and removed.
    #[inline]
    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }

    /// True when both maps share one trie (or are both empty). Implies
    /// equal contents; the comparers are not checked.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.trie.ptr_eq(&other.trie)
    }

    /// An empty map keeping this map's comparers.
    pub fn clear(&self) -> Self {
        Self::with_comparers(self.keys.clone(), self.values.clone())
    }
}

impl<K: Clone, V: Clone> EquatableMap<K, V> {
    /// Build a map with the given comparers. Later duplicates replace earlier
    /// ones.
    pub fn from_entries_with<I>(entries: I, keys: EqualityComparer<K>, values: EqualityComparer<V>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_comparers(keys, values);
        for (key, value) in entries {
            map.insert_mut(key, value);
        }
        map
    }

    /// Adds an entry whose key must not be present yet.
    ///
    /// A present key fails even when the stored value is equal; use
    /// [`set_item`](Self::set_item) for an insert that tolerates it.
    ///
    /// # Example
    /// ```
    /// use equatable_collections::{CollectionError, EquatableMap};
    ///
    /// let map = EquatableMap::new().add("a", 1).unwrap();
    /// assert_eq!(map.add("a", 2), Err(CollectionError::DuplicateKey));
    /// assert_eq!(map.get(&"a"), Some(&1));
    /// ```
    pub fn add(&self, key: K, value: V) -> Result<Self> {
        let mut next = self.clone();
        next.add_mut(key, value)?;
        Ok(next)
    }

    /// Inserts or replaces an entry.
    ///
    /// Setting a value equal to the stored one returns a map sharing the
    /// receiver's structure.
    pub fn set_item(&self, key: K, value: V) -> Self {
        let mut next = self.clone();
        next.insert_mut(key, value);
        next
    }

    /// The map without `key`. Removing an absent key returns a map sharing
    /// the receiver's structure.
    pub fn remove(&self, key: &K) -> Self {
        let mut next = self.clone();
        next.remove_mut(key);
        next
    }

    /// [`add`](Self::add) for each entry, left to right. Fails on the first
    /// key already present, whether it came from the receiver or from earlier
    /// in `entries`.
    pub fn add_range<I>(&self, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut next = self.clone();
        for (key, value) in entries {
            next.add_mut(key, value)?;
        }
        Ok(next)
    }

    /// [`set_item`](Self::set_item) for each entry, left to right.
    pub fn set_items<I>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut next = self.clone();
        for (key, value) in entries {
            next.insert_mut(key, value);
        }
        next
    }

    /// [`remove`](Self::remove) for each key.
    pub fn remove_range<'a, I>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut next = self.clone();
        for key in keys {
            next.remove_mut(key);
        }
        next
    }

    /// The same entries under different comparers.
    ///
    /// Keys that the new key comparer considers equal are merged when their
    /// values are equal under the new value comparer; otherwise the rebuild
    /// fails with [`CollectionError::DuplicateKey`].
    pub fn rebuild_with_comparers(&self, keys: EqualityComparer<K>, values: EqualityComparer<V>) -> Result<Self> {
        if keys.same_policy(&self.keys) && values.same_policy(&self.values) {
            return Ok(self.clone());
        }
        let mut next = Self::with_comparers(keys, values);
        for (key, value) in self.iter() {
            match next.get(key) {
                Some(existing) if next.values.equals(existing, value) => {}
                Some(_) => return Err(CollectionError::DuplicateKey),
                None => next.insert_mut(key.clone(), value.clone()),
            }
        }
        Ok(next)
    }

    fn add_mut(&mut self, key: K, value: V) -> Result<()> {
        if self.contains_key(&key) {
            return Err(CollectionError::DuplicateKey);
        }
        self.insert_mut(key, value);
        Ok(())
    }

    pub(super) fn insert_mut(&mut self, key: K, value: V) {
        let key_hash = self.keys.hash(&key);
        if let Some((_, stored)) = self.trie.get(key_hash, &key, &self.keys) {
            if self.values.equals(stored, &value) {
                return;
            }
        }
        let value_hash = self.values.hash(&value);
        if let Some(previous) = self.trie.insert(key_hash, key, value, &self.keys) {
            self.content_hash ^= entry_hash(key_hash, self.values.hash(&previous));
        }
        self.content_hash ^= entry_hash(key_hash, value_hash);
    }

    fn remove_mut(&mut self, key: &K) {
        let key_hash = self.keys.hash(key);
        if let Some((_, value)) = self.trie.remove(key_hash, key, &self.keys) {
            self.content_hash ^= entry_hash(key_hash, self.values.hash(&value));
        }
    }
}

// =============================================================================
// TRAIT IMPLEMENTATIONS
// =============================================================================

impl<K: Eq + Hash, V: Eq + Hash> Default for EquatableMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for EquatableMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
            content_hash: self.content_hash,
            keys: self.keys.clone(),
            values: self.values.clone(),
        }
    }
}

impl<K, V> PartialEq for EquatableMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        if !self.keys.same_policy(&other.keys) || !self.values.same_policy(&other.values) {
            return false;
        }
        if self.ptr_eq(other) {
            return true;
        }
        self.len() == other.len()
            && self.content_hash == other.content_hash
            && self.iter().all(|(key, value)| {
                other
                    .get(key)
                    .is_some_and(|found| self.values.equals(value, found))
            })
    }
}

impl<K, V> Eq for EquatableMap<K, V> {}

impl<K, V> Hash for EquatableMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        state.write_u64(self.content_hash);
    }
}

impl<K: Eq + Hash + Clone, V: Eq + Hash + Clone> FromIterator<(K, V)> for EquatableMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries_with(iter, EqualityComparer::new(), EqualityComparer::new())
    }
}

impl<K, V> Index<&K> for EquatableMap<K, V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present, like `HashMap`.
    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found in EquatableMap"),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a EquatableMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for EquatableMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// ITERATORS
// =============================================================================

/// Iterator over a map's entries.
pub struct Iter<'a, K, V> {
    inner: trie::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Iterator over a map's keys.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over a map's values.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

// =============================================================================
// TESTS
// =============================================================================
