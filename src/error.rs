//! Error types shared by both table variants.

use thiserror::Error;

/// Failures reported by table operations.
///
/// `remove` never produces one of these: an absent key is an expected
/// outcome there and is reported as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The key is the null sentinel of its type (see [`crate::TableKey`]).
    #[error("key must not be null")]
    NullKey,
    /// `insert` found a live entry with an equal key; the table is unchanged.
    #[error("key is already present in the table")]
    DuplicateKey,
    /// `get`/`update` found no live entry for the key.
    #[error("key not found")]
    KeyNotFound,
    /// Every slot was probed without finding room. The load-factor cap makes
    /// this unreachable; seeing it means the growth trigger is broken.
    #[error("no free slot after probing all {capacity} slots")]
    TableFull { capacity: usize },
}

/// Rejected [`crate::TableConfig`] values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial capacity must be at least 1")]
    ZeroCapacity,
    #[error("max load factor must be finite and positive, got {0}")]
    InvalidLoadFactor(f64),
    #[error("open addressing needs a max load factor below 1.0, got {0}")]
    LoadFactorTooHigh(f64),
}
