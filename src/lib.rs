//! # Bucket Maps
//!
//! Two hash maps built directly on a bucket array, each with its own collision strategy:
//!
//! - `ChainingHashMap`: every bucket keeps an ordered list of the entries hashing to it. The
//!   table only changes size when the caller asks for it.
//! - `ProbingHashMap`: open addressing with quadratic probing. Removed entries leave tombstones
//!   behind, and the table doubles before an insertion once half of it is in use.
//!
//! Both maps take string-like keys and a caller-supplied hash function: anything implementing
//! [`HashFunction`], which includes every `Fn(&str) -> u64`. The bucket of a key is
//! `hash(key) % capacity`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use bucketmap::{ProbingHashMap, hashing::sum_of_chars};
//!
//! // Create a map with 4 slots
//! let mut map = ProbingHashMap::new(4, sum_of_chars);
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! assert!(!map.contains_key("apple"));
//! ```
//!
//! ## Separate Chaining
//!
//! ```rust
//! use bucketmap::ChainingHashMap;
//!
//! // Every key lands in bucket 0
//! let mut map = ChainingHashMap::new(2, |_: &str| 0_u64);
//! map.put("x".to_string(), 1);
//! map.put("y".to_string(), 2);
//!
//! assert_eq!(map.empty_buckets(), 1);
//! assert_eq!(map.keys(), vec!["x".to_string(), "y".to_string()]);
//!
//! // Growing is up to the caller
//! map.resize(8);
//! assert_eq!(map.capacity(), 8);
//! assert_eq!(map.get("y"), Some(&2));
//! ```

/// Module implementing the separate-chaining hash map
mod chaining;
/// Module implementing the per-bucket collision list
mod collision_list;
/// Construction errors
mod error;
pub mod hashing;
/// Module implementing the quadratic-probing hash map
mod probing;
/// Traits shared by both hash maps
mod utils;

pub use chaining::ChainingHashMap;
pub use collision_list::{CollisionList, Node};
pub use error::HashMapError;
pub use hashing::HashFunction;
pub use probing::{Iter, ProbingHashMap, Slot};
pub use utils::{BucketMap, from_pairs};
