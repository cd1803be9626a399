use crate::{
    error::HashMapError,
    hashing::{HashFunction, bucket_index},
};
use log::{debug, trace, warn};
use std::{borrow::Borrow, fmt, iter, mem};

/// Growth threshold used by new maps, as a percentage of the capacity
const DEFAULT_LOAD_FACTOR_THRESHOLD: usize = 50;

/// The state of one slot in a [`ProbingHashMap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K, V> {
    /// Never held an entry since the table was last rebuilt
    Empty,
    /// Held an entry that was removed; probes continue past it
    Tombstone,
    /// Holds a live key-value pair
    Occupied(K, V),
}

impl<K, V> Slot<K, V> {
    /// Returns true if the slot holds a live entry
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(..))
    }
}

impl<K, V> fmt::Display for Slot<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "None"),
            Self::Tombstone => write!(f, "Tombstone"),
            Self::Occupied(key, value) => write!(f, "K: {key} V: {value}"),
        }
    }
}

/// Returns the `step`-th index of the quadratic probe sequence starting at `start`.
///
/// The offsets `step²` repeat with period `capacity`, so callers never need more than
/// `capacity` steps. For composite capacities the sequence does not reach every slot.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn quadratic_index(start: usize, step: usize, capacity: usize) -> usize {
    let capacity = capacity as u128;
    let step = step as u128 % capacity;
    // Both operands are below `capacity`, so the sum cannot overflow and the result fits a usize
    (((start as u128) + step * step % capacity) % capacity) as usize
}

/// Builds `capacity` empty slots
fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

/// A hash map using open addressing with quadratic probing.
///
/// Each slot holds at most one entry. A key whose home slot `hash_function(key) % capacity` is
/// taken is placed at the first free slot of the sequence `home + j²` for `j = 1, 2, ...`.
/// Removal leaves a [`Slot::Tombstone`] behind so later probes keep walking past it; tombstones
/// are only discarded when the whole table is rebuilt.
///
/// Before every insertion the table doubles if the load factor has reached the growth threshold
/// (50% unless changed with [`ProbingHashMap::set_load_factor_threshold`]).
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct ProbingHashMap<K, V, H> {
    /// The slots storing the key-value pairs
    slots: Vec<Slot<K, V>>,
    /// Current number of live entries; tombstones are not counted
    size: usize,
    /// Caller-supplied hash function
    hash_function: H,
    /// Load factor at which `put` grows the table - stored as percentage (1-95)
    load_factor_threshold: usize,
}

impl<K, V, H> fmt::Debug for ProbingHashMap<K, V, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbingHashMap")
            .field("slots", &self.slots)
            .field("size", &self.size)
            .field("load_factor_threshold", &self.load_factor_threshold)
            .finish_non_exhaustive()
    }
}

impl<K, V, H> fmt::Display for ProbingHashMap<K, V, H>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            writeln!(f, "{index}: {slot}")?;
        }
        Ok(())
    }
}

impl<K, V, H> Extend<(K, V)> for ProbingHashMap<K, V, H>
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

impl<K, V, H> ProbingHashMap<K, V, H>
where
    H: HashFunction,
{
    /// Creates a map with `capacity` slots hashed by `hash_function`
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize, hash_function: H) -> Self {
        assert!(capacity >= 1, "hash map capacity must be at least 1");
        Self {
            slots: empty_slots(capacity),
            size: 0,
            hash_function,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
        }
    }

    /// Creates a map with `capacity` slots, rejecting a zero capacity
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

    /// Yields the slot indices `key` may occupy, home slot first
    fn probe(&self, key: &str) -> impl Iterator<Item = usize> {
        let capacity = self.slots.len();
        let start = bucket_index(self.hash_function.hash(key), capacity);
        (0..capacity).map(move |step| quadratic_index(start, step, capacity))
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the slot at `index`
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&Slot<K, V>> {
        self.slots.get(index)
    }

    /// Returns the growth threshold as a percentage of the capacity
    #[must_use]
    pub fn load_factor_threshold(&self) -> usize {
        self.load_factor_threshold
    }

    /// Provide a way to configure the load factor threshold
    pub fn set_load_factor_threshold(&mut self, threshold: usize) {
        self.load_factor_threshold = threshold.clamp(1, 95);
    }

    /// Resets every slot to empty, dropping tombstones. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.slots = empty_slots(self.slots.len());
        self.size = 0;
    }

    /// Returns the number of slots without a live entry, tombstones included
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_occupied()).count()
    }

    /// Returns the current load factor, `len / capacity`. Tombstones do not count.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Returns true once the load factor has reached the growth threshold
    fn needs_growth(&self) -> bool {
        self.size.saturating_mul(100) >= self.slots.len().saturating_mul(self.load_factor_threshold)
    }

    /// Returns an iterator over the live entries in slot order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.slots.iter() }
    }
}

impl<K, V, H> ProbingHashMap<K, V, H>
where
    K: Borrow<str>,
    H: HashFunction,
{
    /// Returns the index of the live slot holding `key`
    fn find(&self, key: &str) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        for index in self.probe(key) {
            match self.slots.get(index) {
                // Nothing was ever placed past an empty slot
                None | Some(Slot::Empty) => return None,
                Some(Slot::Occupied(k, _)) if k.borrow() == key => return Some(index),
                Some(_) => {}
            }
        }

        None
    }

    /// Returns the first slot along `key`'s probe sequence that can take a new entry
    fn vacant_slot(&self, key: &str) -> Option<usize> {
        self.probe(key).find(|&index| self.slots.get(index).is_some_and(|slot| !slot.is_occupied()))
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.slots.get(self.find(key)?) {
            Some(Slot::Occupied(_, value)) => Some(value),
            _ => None,
        }
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find(key)?;
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(_, value)) => Some(value),
            _ => None,
        }
    }

    /// Insert a key-value pair into the hash table.
    ///
    /// The table first doubles if the load factor has reached the growth threshold. An existing
    /// entry for `key` then has its value replaced and the old value returned; otherwise the pair
    /// takes the first tombstone or empty slot along the probe sequence.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.needs_growth() {
            self.rebuild(self.slots.len().saturating_mul(2));
        }

        if let Some(index) = self.find(key.borrow()) {
            if let Some(Slot::Occupied(_, existing)) = self.slots.get_mut(index) {
                return Some(mem::replace(existing, value));
            }
        }

        self.insert_new(key, value);
        None
    }

    /// Places a key known to be absent into the first reusable slot of its probe sequence
    fn insert_new(&mut self, key: K, value: V) {
        loop {
            if let Some(index) = self.vacant_slot(key.borrow()) {
                if let Some(slot) = self.slots.get_mut(index) {
                    *slot = Slot::Occupied(key, value);
                    self.size = self.size.saturating_add(1);
                }
                return;
            }

            // Composite capacities leave some slots off the sequence; a larger table reaches more
            let capacity = self.slots.len();
            warn!(
                "quadratic probing found no free slot among {capacity} slots ({} live), growing",
                self.size
            );
            self.rebuild(capacity.saturating_mul(2));
        }
    }

    /// Converts the slot holding `key` into a tombstone and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find(key)?;
        let slot = self.slots.get_mut(index)?;

        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(_, value) => {
                self.size = self.size.saturating_sub(1);
                Some(value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Returns true if the map holds a live entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Rebuilds the table with `new_capacity` slots.
    ///
    /// Requests below one slot or below the number of live entries are ignored and return false.
    /// Live entries are reinserted through [`ProbingHashMap::put`], so the table may end up larger
    /// than requested when the new capacity is under the growth threshold. Tombstones are dropped.
    pub fn resize(&mut self, new_capacity: usize) -> bool {
        if new_capacity < 1 || new_capacity < self.size {
            trace!(
                "ignoring resize of probing map to {new_capacity} slots ({} live)",
                self.size
            );
            return false;
        }

        self.rebuild(new_capacity);
        true
    }

    /// Replaces the slots with `new_capacity` empty ones and reinserts the live entries
    fn rebuild(&mut self, new_capacity: usize) {
        let old_capacity = self.slots.len();
        let old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.size = 0;

        for slot in old_slots {
            if let Slot::Occupied(key, value) = slot {
                self.put(key, value);
            }
        }

        debug!(
            "rebuilt probing map from {old_capacity} to {} slots ({} live)",
            self.slots.len(),
            self.size
        );
    }
}

impl<K, V, H> ProbingHashMap<K, V, H>
where
    K: Borrow<str> + Clone,
    H: HashFunction,
{
    /// Returns every live key in slot order
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }
}

/// Iterator over the live entries of a [`ProbingHashMap`], in slot order
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Remaining slots
    slots: std::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(|slot| match slot {
            Slot::Occupied(key, value) => Some((key, value)),
            Slot::Empty | Slot::Tombstone => None,
        })
    }
}
