use crate::{
    collision_list::{CollisionList, Node},
    error::HashMapError,
    hashing::{HashFunction, bucket_index},
};
use log::{debug, trace};
use std::{borrow::Borrow, fmt, mem};

/// A hash map resolving collisions by separate chaining.
///
/// Every bucket holds a [`CollisionList`] of the entries hashing to it, so a bucket can hold any
/// number of entries. The table never resizes on its own: callers decide when the load is high
/// enough and call [`ChainingHashMap::resize`].
///
/// Bucket indices are `hash_function(key) % capacity`.
#[derive(Clone)]
pub struct ChainingHashMap<K, V, H> {
    /// One collision list per bucket
    buckets: Vec<CollisionList<K, V>>,
    /// Current number of entries across all buckets
    size: usize,
    /// Caller-supplied hash function
    hash_function: H,
}

impl<K, V, H> fmt::Debug for ChainingHashMap<K, V, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainingHashMap")
            .field("buckets", &self.buckets)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<K, V, H> fmt::Display for ChainingHashMap<K, V, H>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {bucket}")?;
        }
        Ok(())
    }
}

impl<K, V, H> Extend<(K, V)> for ChainingHashMap<K, V, H>
where
    K: Borrow<str>,
    H: HashFunction,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

/// Builds `capacity` empty collision lists
fn empty_lists<K, V>(capacity: usize) -> Vec<CollisionList<K, V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, CollisionList::new);
    buckets
}

impl<K, V, H> ChainingHashMap<K, V, H>
where
    H: HashFunction,
{
    /// Creates a map with `capacity` buckets hashed by `hash_function`
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize, hash_function: H) -> Self {
        assert!(capacity >= 1, "hash map capacity must be at least 1");
        Self { buckets: empty_lists(capacity), size: 0, hash_function }
    }

    /// Creates a map with `capacity` buckets, rejecting a zero capacity
    ///
    /// # Errors
    ///
    /// Returns [`HashMapError::ZeroCapacity`] if `capacity` is zero.
    pub fn try_new(capacity: usize, hash_function: H) -> Result<Self, HashMapError> {
        if capacity == 0 {
            return Err(HashMapError::ZeroCapacity);
        }
        Ok(Self::new(capacity, hash_function))
    }

    /// Returns the bucket `key` hashes to
    fn bucket_index(&self, key: &str) -> usize {
        bucket_index(self.hash_function.hash(key), self.buckets.len())
    }

    /// Returns the number of entries in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the collision list stored at `index`
    #[must_use]
    pub fn bucket(&self, index: usize) -> Option<&CollisionList<K, V>> {
        self.buckets.get(index)
    }

    /// Replaces every bucket with an empty list. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.buckets = empty_lists(self.buckets.len());
        self.size = 0;
    }

    /// Returns the number of buckets whose collision list is empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_empty()).count()
    }

    /// Returns the current load factor, `len / capacity`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns an iterator over the entries in bucket order, then insertion order within a bucket
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets.iter().flat_map(|bucket| bucket.iter().map(|node| (node.key(), node.value())))
    }
}

impl<K, V, H> ChainingHashMap<K, V, H>
where
    K: Borrow<str>,
    H: HashFunction,
{
    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets.get(self.bucket_index(key))?.contains(key).map(Node::value)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)?.value_mut(key)
    }

    /// Inserts a key-value pair.
    ///
    /// An existing entry for `key` has its value replaced in place and the old value is returned;
    /// otherwise the pair is appended to its bucket. Never resizes the table.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(key.borrow());
        let bucket = self.buckets.get_mut(index)?;

        if let Some(existing) = bucket.value_mut(key.borrow()) {
            return Some(mem::replace(existing, value));
        }

        bucket.insert(key, value);
        self.size = self.size.saturating_add(1);
        None
    }

    /// Removes `key` from its bucket, returning the value. Absent keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let (_, value) = self.buckets.get_mut(index)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(value)
    }

    /// Returns true if the map holds an entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        self.buckets.get(self.bucket_index(key)).is_some_and(|bucket| bucket.contains(key).is_some())
    }

    /// Rehashes every entry into `new_capacity` buckets.
    ///
    /// Entries are moved bucket by bucket in ascending order, each bucket in insertion order.
    /// Returns false and leaves the map untouched when `new_capacity` is zero.
    pub fn resize(&mut self, new_capacity: usize) -> bool {
        if new_capacity < 1 {
            trace!("ignoring resize of chaining map to {new_capacity} buckets");
            return false;
        }

        let old_capacity = self.buckets.len();
        let mut buckets = empty_lists(new_capacity);

        for bucket in mem::take(&mut self.buckets) {
            for (key, value) in bucket.into_pairs() {
                let index = bucket_index(self.hash_function.hash(key.borrow()), new_capacity);
                if let Some(target) = buckets.get_mut(index) {
                    target.insert(key, value);
                }
            }
        }

        self.buckets = buckets;
        debug!(
            "rehashed chaining map from {old_capacity} to {new_capacity} buckets ({} entries)",
            self.size
        );
        true
    }
}

impl<K, V, H> ChainingHashMap<K, V, H>
where
    K: Borrow<str> + Clone,
    H: HashFunction,
{
    /// Returns every key, bucket by bucket
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }
}
