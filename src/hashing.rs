//! Caller-supplied hash functions

/// Maps a key to a non-negative integer.
///
/// The maps reduce the result modulo their capacity to pick a bucket and never inspect how the
/// value was produced. Implementations must be deterministic: the same key has to produce the
/// same hash for as long as it is stored, otherwise entries become unreachable.
///
/// Any `Fn(&str) -> u64` is a hash function, so plain functions and closures can be passed
/// directly.
pub trait HashFunction {
    /// Hashes `key`
    fn hash(&self, key: &str) -> u64;
}

impl<F> HashFunction for F
where
    F: Fn(&str) -> u64,
{
    fn hash(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Reduces a hash to a bucket index in `0..capacity`.
///
/// `capacity` must be non-zero; both maps guarantee at least one bucket.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub(crate) fn bucket_index(hash: u64, capacity: usize) -> usize {
    // The remainder is below `capacity`, so it fits back into a usize
    (hash % capacity as u64) as usize
}

/// Sums the scalar values of the characters in `key`.
///
/// Anagrams collide, which makes it handy for exercising collision handling.
#[must_use]
pub fn sum_of_chars(key: &str) -> u64 {
    key.chars().fold(0_u64, |hash, letter| hash.wrapping_add(u64::from(letter)))
}

/// Weights each character's scalar value by its one-based position and sums the results.
#[must_use]
pub fn position_weighted(key: &str) -> u64 {
    key.chars().zip(1_u64..).fold(0_u64, |hash, (letter, position)| {
        hash.wrapping_add(position.wrapping_mul(u64::from(letter)))
    })
}
