#![allow(clippy::unwrap_used, clippy::missing_docs_in_private_items, clippy::float_cmp)]
// Scenario tests run against both maps.
//
// - Scenarios written once against `BucketMap` check the shared contract.
// - Per-map scenarios pin down what differs: chaining never grows by itself, probing grows
//   before an insertion at half load and leaves tombstones behind on removal.

use bucketmap::{
    BucketMap, ChainingHashMap, ProbingHashMap, Slot,
    hashing::{position_weighted, sum_of_chars},
};

fn init_logger() {
    let _ignored = env_logger::builder().is_test(true).try_init();
}

fn zero(_: &str) -> u64 {
    0
}

fn sorted<K: Ord>(mut keys: Vec<K>) -> Vec<K> {
    keys.sort();
    keys
}

// ---- Shared contract ----

fn round_trip_and_overwrite<M: BucketMap<String, i32>>(mut map: M) {
    assert_eq!(map.get("key"), None);
    map.put("key1".to_string(), 10);
    assert_eq!(map.get("key1"), Some(&10));
    assert!(map.contains_key("key1"));

    let size = map.len();
    assert_eq!(map.put("key1".to_string(), 20), Some(10));
    assert_eq!(map.len(), size);
    assert_eq!(map.get("key1"), Some(&20));

    assert_eq!(map.remove("key1"), Some(20));
    assert_eq!(map.get("key1"), None);
    assert_eq!(map.remove("key4"), None);
    assert_eq!(map.len(), size - 1);
}

fn empty_buckets_counts<M: BucketMap<String, i32>>(mut map: M) {
    let mut observed = vec![(map.empty_buckets(), map.len(), map.capacity())];
    for (key, value) in [("key1", 10), ("key2", 20), ("key1", 30), ("key4", 40)] {
        map.put(key.to_string(), value);
        observed.push((map.empty_buckets(), map.len(), map.capacity()));
    }

    assert_eq!(
        observed,
        vec![(100, 0, 100), (99, 1, 100), (98, 2, 100), (98, 2, 100), (97, 3, 100)]
    );
}

fn membership_after_bulk_insert<M: BucketMap<String, i32>>(mut map: M) {
    let keys: Vec<i32> = (1..1000).step_by(20).collect();
    for &key in &keys {
        map.put(key.to_string(), key * 42);
    }

    assert_eq!(map.len(), keys.len());
    for &key in &keys {
        assert!(map.contains_key(&key.to_string()));
        assert!(!map.contains_key(&(key + 1).to_string()));
        assert_eq!(map.get(&key.to_string()), Some(&(key * 42)));
    }
}

fn clear_keeps_capacity<M: BucketMap<String, i32>>(mut map: M) {
    map.put("key1".to_string(), 10);
    map.put("key2".to_string(), 20);
    map.put("key1".to_string(), 30);
    assert_eq!(map.len(), 2);

    map.clear();

    assert_eq!((map.len(), map.capacity()), (0, 100));
    assert_eq!(map.empty_buckets(), 100);
    assert!(!map.contains_key("key2"));
}

fn table_load_tracks_live_entries<M: BucketMap<String, i32>>(mut map: M) {
    assert_eq!(map.table_load(), 0.0);
    map.put("key1".to_string(), 10);
    assert_eq!(map.table_load(), 0.01);
    map.put("key2".to_string(), 20);
    map.put("key1".to_string(), 30);
    assert_eq!(map.table_load(), 0.02);
    map.remove("key2");
    assert_eq!(map.table_load(), 0.01);
}

#[test]
fn test_shared_contract_on_chaining() {
    init_logger();
    round_trip_and_overwrite(ChainingHashMap::new(30, sum_of_chars));
    empty_buckets_counts(ChainingHashMap::new(100, sum_of_chars));
    membership_after_bulk_insert(ChainingHashMap::new(75, position_weighted));
    clear_keeps_capacity(ChainingHashMap::new(100, sum_of_chars));
    table_load_tracks_live_entries(ChainingHashMap::new(100, sum_of_chars));
}

#[test]
fn test_shared_contract_on_probing() {
    init_logger();
    round_trip_and_overwrite(ProbingHashMap::new(30, sum_of_chars));
    empty_buckets_counts(ProbingHashMap::new(100, sum_of_chars));
    membership_after_bulk_insert(ProbingHashMap::new(75, position_weighted));
    clear_keeps_capacity(ProbingHashMap::new(100, sum_of_chars));
    table_load_tracks_live_entries(ProbingHashMap::new(100, sum_of_chars));
}

// ---- Separate chaining ----

#[test]
fn test_chaining_single_bucket_order() {
    let mut map = ChainingHashMap::new(2, zero);
    map.put("x".to_string(), 1);
    map.put("y".to_string(), 2);

    assert_eq!(map.empty_buckets(), 1);
    assert_eq!(map.keys(), vec!["x".to_string(), "y".to_string()]);
    let bucket: Vec<(&String, &i32)> =
        map.bucket(0).unwrap().iter().map(|node| (node.key(), node.value())).collect();
    assert_eq!(bucket, vec![(&"x".to_string(), &1), (&"y".to_string(), &2)]);
}

#[test]
fn test_chaining_load_grows_without_resize() {
    let mut map = ChainingHashMap::new(50, sum_of_chars);
    for i in 0..50 {
        map.put(format!("key{i}"), i * 100);
    }
    assert_eq!(map.capacity(), 50);
    assert_eq!(map.table_load(), 1.0);
}

#[test]
fn test_chaining_resize_sweep() {
    init_logger();
    let keys: Vec<i32> = (1..1000).step_by(13).collect();
    let mut map = ChainingHashMap::new(75, position_weighted);
    for &key in &keys {
        map.put(key.to_string(), key * 42);
    }

    for capacity in (111..1000).step_by(117) {
        assert!(map.resize(capacity));
        assert_eq!(map.capacity(), capacity);

        map.put("some key".to_string(), -1);
        assert!(map.contains_key("some key"));
        map.remove("some key");

        assert_eq!(map.len(), keys.len());
        for &key in &keys {
            assert!(map.contains_key(&key.to_string()));
            assert!(!map.contains_key(&(key + 1).to_string()));
        }
    }
}

#[test]
fn test_chaining_keys_follow_rehash_order() {
    let mut map = ChainingHashMap::new(10, position_weighted);
    for i in (100..200).step_by(10) {
        map.put(i.to_string(), (i * 10).to_string());
    }

    let before = map.keys();
    assert!(map.resize(1));
    // A single bucket holds the keys in the order they were rehashed
    assert_eq!(map.keys(), before);

    map.put("200".to_string(), "2000".to_string());
    map.remove("100");
    assert!(map.resize(2));

    let expected: Vec<String> = (110..=200).step_by(10).map(|i: i32| i.to_string()).collect();
    assert_eq!(sorted(map.keys()), expected);
}

// ---- Quadratic probing ----

#[test]
fn test_probing_growth_and_tombstone_scenario() {
    let mut map = ProbingHashMap::new(4, sum_of_chars);

    map.put("a".to_string(), 1);
    assert_eq!((map.len(), map.capacity()), (1, 4));

    // Load is 0.25 before this insert, so the table keeps its size
    map.put("b".to_string(), 2);
    assert_eq!((map.len(), map.capacity()), (2, 4));

    map.remove("a");
    assert_eq!(map.len(), 1);
    assert!(!map.contains_key("a"));
    assert_eq!(map.get("a"), None);
    assert_eq!(map.slot(1), Some(&Slot::Tombstone));

    // Two live entries in four slots: the next insert doubles first
    map.put("c".to_string(), 3);
    map.put("d".to_string(), 4);
    assert_eq!((map.len(), map.capacity()), (3, 8));
}

#[test]
fn test_probing_put_keeps_load_in_bounds() {
    let mut map = ProbingHashMap::new(50, sum_of_chars);
    for i in 0..150 {
        map.put(format!("str{i}"), i * 100);
        assert!((map.len() - 1) * 2 < map.capacity());
    }
    assert_eq!(map.len(), 150);
    assert_eq!(map.capacity(), 400);
}

#[test]
fn test_probing_repeated_keys() {
    let mut map = ProbingHashMap::new(40, position_weighted);
    for i in 0..50 {
        map.put(format!("str{}", i / 3), i * 100);
    }

    assert_eq!(map.len(), 17);
    assert_eq!(map.capacity(), 40);
    assert_eq!(map.empty_buckets(), 23);
    assert_eq!(map.get("str16"), Some(&4900));
}

#[test]
fn test_probing_resize_sweep() {
    init_logger();
    let keys: Vec<i32> = (1..1000).step_by(13).collect();
    let mut map = ProbingHashMap::new(75, position_weighted);
    for &key in &keys {
        map.put(key.to_string(), key * 42);
    }
    assert_eq!((map.len(), map.capacity()), (keys.len(), 300));

    for capacity in (111..1000).step_by(117) {
        assert!(map.resize(capacity));
        assert!(map.capacity() >= capacity);

        map.put("some key".to_string(), -1);
        assert!(map.contains_key("some key"));
        map.remove("some key");

        assert_eq!(map.len(), keys.len());
        for &key in &keys {
            assert!(map.contains_key(&key.to_string()));
            assert!(!map.contains_key(&(key + 1).to_string()));
        }
    }
}

#[test]
fn test_probing_resize_rejects_capacity_below_size() {
    let mut map = ProbingHashMap::new(10, position_weighted);
    for i in (100..200).step_by(10) {
        map.put(i.to_string(), (i * 10).to_string());
    }
    assert_eq!((map.len(), map.capacity()), (10, 20));

    assert!(!map.resize(1));
    assert_eq!(map.capacity(), 20);

    map.put("200".to_string(), "2000".to_string());
    map.remove("100");
    assert!(!map.resize(2));
    assert_eq!((map.len(), map.capacity()), (10, 40));

    let expected: Vec<String> = (110..=200).step_by(10).map(|i: i32| i.to_string()).collect();
    assert_eq!(sorted(map.keys()), expected);
}

#[test]
fn test_probing_keys_in_slot_order() {
    let mut map = ProbingHashMap::new(16, |key: &str| sum_of_chars(key) % 16);
    for key in ["c", "a", "b"] {
        map.put(key.to_string(), 0);
    }
    // 'a' = 97 -> slot 1, 'b' -> 2, 'c' -> 3
    assert_eq!(map.keys(), vec!["a".to_string(), "b".to_string(), "c".to_string()]);
}

#[test]
fn test_probing_display_dump() {
    let mut map = ProbingHashMap::new(2, zero);
    map.put("a".to_string(), 1);
    assert_eq!(map.to_string(), "0: K: a V: 1\n1: None\n");
}
