// ============================================================================
// equatable-collections - Serde Support
// Arrays and sets as sequences, maps as maps
// ============================================================================
//
// Only collections using the default comparers can be deserialized: a
// comparer is a policy value, not data, and has no serialized form.
// ============================================================================

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use super::{EquatableArray, EquatableMap, EquatableSet};

/// Upper bound on preallocation from an untrusted size hint.
const MAX_PREALLOCATE: usize = 4096;

// =============================================================================
// SERIALIZE
// =============================================================================

impl<T: Serialize> Serialize for EquatableArray<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<T: Serialize> Serialize for EquatableSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<K: Serialize, V: Serialize> Serialize for EquatableMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

// =============================================================================
// DESERIALIZE
// =============================================================================

struct ArrayVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for ArrayVisitor<T> {
    type Value = EquatableArray<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut items = Vec::with_capacity(capacity);
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(EquatableArray::from(items))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for EquatableArray<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(ArrayVisitor {
            marker: PhantomData,
        })
    }
}

struct SetVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for SetVisitor<T>
where
    T: Deserialize<'de> + Eq + Hash + Clone,
{
    type Value = EquatableSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of distinct elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut set = EquatableSet::new();
        while let Some(item) = seq.next_element()? {
            set.insert_mut(item);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for EquatableSet<T>
where
    T: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SetVisitor {
            marker: PhantomData,
        })
    }
}

struct MapVisitor<K, V> {
    marker: PhantomData<(K, V)>,
}

impl<'de, K, V> Visitor<'de> for MapVisitor<K, V>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
    V: Deserialize<'de> + Eq + Hash + Clone,
{
    type Value = EquatableMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = EquatableMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert_mut(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for EquatableMap<K, V>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
    V: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MapVisitor {
            marker: PhantomData,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
