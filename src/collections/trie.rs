// ============================================================================
// equatable-collections - Hash Trie
// Persistent hash-array-mapped trie behind EquatableMap and EquatableSet
// ============================================================================
//
// Each level consumes BITS_PER_LEVEL bits of a 64-bit hash. Branches store
// only their occupied children, addressed through a 32-bit bitmap. Buckets
// hold every entry whose full hash is identical, so a bucket is valid at any
// depth and can be lifted toward the root when its siblings disappear.
//
// Edits go through Arc::make_mut: shared nodes on the root-to-leaf path are
// copied, everything else is reused. A trie owned by a single collection
// (e.g. while a batch edit runs) is updated in place.
// ============================================================================

use std::iter::FusedIterator;
use std::sync::Arc;

use crate::core::constants::{BITS_PER_LEVEL, LEVEL_MASK};
use crate::equality::EqualityComparer;

// =============================================================================
// NODES
// =============================================================================

#[derive(Clone)]
enum Node<K, V> {
    Branch {
        bitmap: u32,
        children: Vec<Arc<Node<K, V>>>,
    },
    Bucket {
        hash: u64,
        entries: Vec<(K, V)>,
    },
}

impl<K, V> Node<K, V> {
    fn leaf(hash: u64, key: K, value: V) -> Self {
        Node::Bucket {
            hash,
            entries: vec![(key, value)],
        }
    }
}

/// Bitmap bit selected by `hash` at `shift`.
#[inline]
fn bit_for(hash: u64, shift: u32) -> u32 {
    1 << ((hash >> shift) & LEVEL_MASK)
}

/// Position of `bit`'s child in a branch's dense child vector.
#[inline]
fn slot(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

enum Shape<K, V> {
    Empty,
    SingleBucket(Arc<Node<K, V>>),
    Keep,
}

/// How a node should be stored by its parent after a removal.
fn shape<K, V>(node: &Arc<Node<K, V>>) -> Shape<K, V> {
    match &**node {
        Node::Bucket { entries, .. } if entries.is_empty() => Shape::Empty,
        Node::Branch { children, .. } if children.is_empty() => Shape::Empty,
        Node::Branch { children, .. } if children.len() == 1 => match &*children[0] {
            Node::Bucket { .. } => Shape::SingleBucket(Arc::clone(&children[0])),
            Node::Branch { .. } => Shape::Keep,
        },
        _ => Shape::Keep,
    }
}

fn insert_into<K: Clone, V: Clone>(
    node: &mut Node<K, V>,
    shift: u32,
    hash: u64,
    key: K,
    value: V,
    keys: &EqualityComparer<K>,
) -> Option<V> {
    // a bucket in the way of a different hash becomes a branch holding it
    let displaced = match node {
        Node::Bucket {
            hash: bucket_hash, ..
        } if *bucket_hash != hash => Some(*bucket_hash),
        _ => None,
    };
    if let Some(bucket_hash) = displaced {
        let bucket = std::mem::replace(
            node,
            Node::Branch {
                bitmap: 0,
                children: Vec::new(),
            },
        );
        *node = Node::Branch {
            bitmap: bit_for(bucket_hash, shift),
            children: vec![Arc::new(bucket)],
        };
    }

    match node {
        Node::Branch { bitmap, children } => {
            let bit = bit_for(hash, shift);
            let index = slot(*bitmap, bit);
            if *bitmap & bit == 0 {
                children.insert(index, Arc::new(Node::leaf(hash, key, value)));
                *bitmap |= bit;
                None
            } else {
                insert_into(
                    Arc::make_mut(&mut children[index]),
                    shift + BITS_PER_LEVEL,
                    hash,
                    key,
                    value,
                    keys,
                )
            }
        }
        Node::Bucket { entries, .. } => {
            match entries.iter_mut().find(|(existing, _)| keys.equals(existing, &key)) {
                Some(entry) => Some(std::mem::replace(&mut entry.1, value)),
                None => {
                    entries.push((key, value));
                    None
                }
            }
        }
    }
}

fn remove_from<K: Clone, V: Clone>(
    node: &mut Node<K, V>,
    shift: u32,
    hash: u64,
    key: &K,
    keys: &EqualityComparer<K>,
) -> Option<(K, V)> {
    match node {
        Node::Branch { bitmap, children } => {
            let bit = bit_for(hash, shift);
            if *bitmap & bit == 0 {
                return None;
            }
            let index = slot(*bitmap, bit);
            let removed = remove_from(
                Arc::make_mut(&mut children[index]),
                shift + BITS_PER_LEVEL,
                hash,
                key,
                keys,
            )?;
            match shape(&children[index]) {
                Shape::Empty => {
                    children.remove(index);
                    *bitmap &= !bit;
                }
                Shape::SingleBucket(bucket) => children[index] = bucket,
                Shape::Keep => {}
            }
            Some(removed)
        }
        Node::Bucket {
            hash: bucket_hash,
            entries,
        } => {
            if *bucket_hash != hash {
                return None;
            }
            let position = entries
                .iter()
                .position(|(existing, _)| keys.equals(existing, key))?;
            Some(entries.remove(position))
        }
    }
}

// =============================================================================
// TRIE
// =============================================================================

/// Persistent hash trie mapping `K` to `V`.
///
/// The trie stores hashes but never computes them: callers pass the hash of
/// every key along with the comparer that produced it.
pub(crate) struct Trie<K, V> {
    root: Option<Arc<Node<K, V>>>,
    len: usize,
}

impl<K, V> Trie<K, V> {
    pub(crate) const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Both tries are the same allocation (or both empty).
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub(crate) fn get(&self, hash: u64, key: &K, keys: &EqualityComparer<K>) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        let mut shift = 0;
        loop {
            match node {
                Node::Branch { bitmap, children } => {
                    let bit = bit_for(hash, shift);
                    if bitmap & bit == 0 {
                        return None;
                    }
                    node = &*children[slot(*bitmap, bit)];
                    shift += BITS_PER_LEVEL;
                }
                Node::Bucket {
                    hash: bucket_hash,
                    entries,
                } => {
                    if *bucket_hash != hash {
                        return None;
                    }
                    return entries
                        .iter()
                        .find(|(existing, _)| keys.equals(existing, key))
                        .map(|(k, v)| (k, v));
                }
            }
        }
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }
}

impl<K: Clone, V: Clone> Trie<K, V> {
    /// Inserts or replaces. Returns the replaced value; a replaced entry
    /// keeps its original key.
    pub(crate) fn insert(
        &mut self,
        hash: u64,
        key: K,
        value: V,
        keys: &EqualityComparer<K>,
    ) -> Option<V> {
        match self.root.as_mut() {
            Some(root) => {
                let previous = insert_into(Arc::make_mut(root), 0, hash, key, value, keys);
                if previous.is_none() {
                    self.len += 1;
                }
                previous
            }
            None => {
                self.root = Some(Arc::new(Node::leaf(hash, key, value)));
                self.len = 1;
                None
            }
        }
    }

    /// Removes the entry equal to `key`. Absent keys leave the trie untouched,
    /// including its sharing with other tries.
    pub(crate) fn remove(
        &mut self,
        hash: u64,
        key: &K,
        keys: &EqualityComparer<K>,
    ) -> Option<(K, V)> {
        self.get(hash, key, keys)?;
        let root = self.root.as_mut()?;
        let removed = remove_from(Arc::make_mut(root), 0, hash, key, keys)?;
        self.len -= 1;
        match shape(root) {
            Shape::Empty => self.root = None,
            Shape::SingleBucket(bucket) => self.root = Some(bucket),
            Shape::Keep => {}
        }
        Some(removed)
    }
}

impl<K, V> Clone for Trie<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

// =============================================================================
// ITERATION
// =============================================================================

/// Depth-first walk over every entry.
pub(crate) struct Iter<'a, K, V> {
    stack: Vec<std::slice::Iter<'a, Arc<Node<K, V>>>>,
    entries: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(trie: &'a Trie<K, V>) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            entries: Default::default(),
            remaining: trie.len,
        };
        if let Some(root) = &trie.root {
            iter.descend(root);
        }
        iter
    }

    fn descend(&mut self, node: &'a Node<K, V>) {
        match node {
            Node::Branch { children, .. } => self.stack.push(children.iter()),
            Node::Bucket { entries, .. } => self.entries = entries.iter(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.entries.next() {
                self.remaining -= 1;
                return Some((key, value));
            }
            let child = loop {
                match self.stack.last_mut()?.next() {
                    Some(child) => break child,
                    None => {
                        self.stack.pop();
                    }
                }
            };
            self.descend(child);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            entries: self.entries.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
