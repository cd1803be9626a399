//! The operation set shared by both map implementations

use crate::{ChainingHashMap, HashFunction, ProbingHashMap};
use std::borrow::Borrow;

/// Common interface of the bucket-array maps in this crate.
///
/// Both strategies expose the same operations; code that only needs the map contract (drivers,
/// benchmarks, shared test scenarios) can be written once against this trait.
pub trait BucketMap<K, V> {
    /// Removes every entry, keeping the capacity
    fn clear(&mut self);

    /// Returns the value stored for `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Inserts or overwrites `key`, returning the previous value if there was one
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Removes `key`, returning its value if it was present
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Returns true if `key` is stored
    fn contains_key(&self, key: &str) -> bool;

    /// Returns the number of buckets holding no live entry
    fn empty_buckets(&self) -> usize;

    /// Returns the ratio of live entries to buckets
    fn table_load(&self) -> f64;

    /// Rebuilds the table with `new_capacity` buckets. Returns false when the request was ignored.
    fn resize(&mut self, new_capacity: usize) -> bool;

    /// Returns every stored key in bucket order
    fn keys(&self) -> Vec<K>;

    /// Returns every stored value in bucket order
    fn values(&self) -> Vec<V>;

    /// Returns the number of live entries
    fn len(&self) -> usize;

    /// Returns the number of buckets
    fn capacity(&self) -> usize;

    /// Returns true if no entries are stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Forwards the trait to the inherent methods of the same name
macro_rules! forward_bucket_map {
    ($map:ident) => {
        impl<K, V, H> BucketMap<K, V> for $map<K, V, H>
        where
            K: Borrow<str> + Clone,
            V: Clone,
            H: HashFunction,
        {
            fn clear(&mut self) {
                $map::clear(self);
            }

            fn get(&self, key: &str) -> Option<&V> {
                $map::get(self, key)
            }

            fn put(&mut self, key: K, value: V) -> Option<V> {
                $map::put(self, key, value)
            }

            fn remove(&mut self, key: &str) -> Option<V> {
                $map::remove(self, key)
            }

            fn contains_key(&self, key: &str) -> bool {
                $map::contains_key(self, key)
            }

            fn empty_buckets(&self) -> usize {
                $map::empty_buckets(self)
            }

            fn table_load(&self) -> f64 {
                $map::table_load(self)
            }

            fn resize(&mut self, new_capacity: usize) -> bool {
                $map::resize(self, new_capacity)
            }

            fn keys(&self) -> Vec<K> {
                $map::keys(self)
            }

            fn values(&self) -> Vec<V> {
                self.iter().map(|(_, v)| v.clone()).collect()
            }

            fn len(&self) -> usize {
                $map::len(self)
            }

            fn capacity(&self) -> usize {
                $map::capacity(self)
            }
        }
    };
}

forward_bucket_map!(ChainingHashMap);
forward_bucket_map!(ProbingHashMap);

/// Fills `map` from an iterator of key-value pairs and returns it
pub fn from_pairs<M, K, V, I>(mut map: M, pairs: I) -> M
where
    M: BucketMap<K, V>,
    I: IntoIterator<Item = (K, V)>,
{
    for (key, value) in pairs {
        map.put(key, value);
    }

    map
}
