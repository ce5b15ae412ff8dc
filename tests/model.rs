//! Seeded randomized comparison against the standard library collections.

use equatable_collections::{CollectionError, EquatableMap, EquatableSet};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::{HashMap, HashSet};

const STEPS: usize = 4000;

fn assert_map_matches(map: &EquatableMap<u16, u32>, model: &HashMap<u16, u32>) {
    assert_eq!(map.len(), model.len());
    for (key, value) in model {
        assert_eq!(map.get(key), Some(value));
    }
    let mut seen = 0;
    for (key, value) in map {
        assert_eq!(model.get(key), Some(value));
        seen += 1;
    }
    assert_eq!(seen, model.len());
}

#[test]
fn test_map_follows_hash_map() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed_0001);
    let mut map = EquatableMap::new();
    let mut model = HashMap::new();
    let mut snapshots = Vec::new();

    for step in 0..STEPS {
        let key: u16 = rng.gen_range(0..512);
        let value: u32 = rng.gen_range(0..8);
        match rng.gen_range(0..4) {
            0 => {
                let result = map.add(key, value);
                if model.contains_key(&key) {
                    assert_eq!(result, Err(CollectionError::DuplicateKey));
                } else {
                    model.insert(key, value);
                    map = result.unwrap();
                }
            }
            1 | 2 => {
                map = map.set_item(key, value);
                model.insert(key, value);
            }
            _ => {
                map = map.remove(&key);
                model.remove(&key);
            }
        }
        if step % 500 == 0 {
            snapshots.push((map.clone(), model.clone()));
        }
    }

    assert_map_matches(&map, &model);
    // earlier versions were never disturbed
    for (snapshot, expected) in &snapshots {
        assert_map_matches(snapshot, expected);
    }
}

#[test]
fn test_map_hash_depends_only_on_contents() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed_0002);
    let entries: Vec<(u16, u32)> = (0..300).map(|k| (k, rng.gen_range(0..1000))).collect();

    let forward: EquatableMap<u16, u32> = entries.iter().copied().collect();
    let mut shuffled = EquatableMap::new();
    for (key, value) in entries.iter().rev() {
        // detour through a different value first
        shuffled = shuffled.set_item(*key, value + 1).set_item(*key, *value);
    }

    assert_eq!(forward, shuffled);
    assert_eq!(forward.content_hash(), shuffled.content_hash());
}

#[test]
fn test_set_follows_hash_set() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed_0003);
    let mut set = EquatableSet::new();
    let mut model = HashSet::new();

    for _ in 0..STEPS {
        let item: u32 = rng.gen_range(0..700);
        if rng.gen_bool(0.6) {
            set = set.add(item);
            model.insert(item);
        } else {
            set = set.remove(&item);
            model.remove(&item);
        }
        assert_eq!(set.len(), model.len());
    }

    assert!(model.iter().all(|item| set.contains(item)));
    assert!(set.set_equals(&model));
}

#[test]
fn test_set_algebra_follows_hash_set() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed_0004);
    for _ in 0..50 {
        let left: HashSet<u32> = (0..rng.gen_range(0..80)).map(|_| rng.gen_range(0..100)).collect();
        let right: HashSet<u32> = (0..rng.gen_range(0..80)).map(|_| rng.gen_range(0..100)).collect();
        let set: EquatableSet<u32> = left.iter().copied().collect();

        assert!(set.union(&right).set_equals(left.union(&right)));
        assert!(set.intersect(&right).set_equals(left.intersection(&right)));
        assert!(set.except(&right).set_equals(left.difference(&right)));
        assert!(set.symmetric_except(&right).set_equals(left.symmetric_difference(&right)));
        assert_eq!(set.is_subset_of(&right), left.is_subset(&right));
        assert_eq!(set.is_superset_of(&right), left.is_superset(&right));
        assert_eq!(set.overlaps(&right), !left.is_disjoint(&right));
    }
}
