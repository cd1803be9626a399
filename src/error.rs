use thiserror::Error;

/// Errors reported when constructing a map
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashMapError {
    /// A map needs at least one bucket
    #[error("hash map capacity must be at least 1")]
    ZeroCapacity,
}
