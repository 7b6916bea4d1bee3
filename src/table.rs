//! The contract both table variants implement.

use crate::error::TableError;
use crate::key::TableKey;
use core::borrow::Borrow;

/// An associative table with unique keys.
///
/// Lookups accept any borrowed form of the key, as with
/// `std::collections::HashMap`. Every operation rejects a null key before
/// hashing; `contains_key` and `remove` report it as absent.
pub trait AssociativeTable {
    type Key: TableKey;
    type Value;

    /// Insert if absent. Fails with `DuplicateKey` (table unchanged) or
    /// `NullKey`. May grow the table before returning.
    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Result<(), TableError>;

    fn get<Q>(&self, key: &Q) -> Result<&Self::Value, TableError>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + TableKey;

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + TableKey;

    /// Overwrite the value of a present key; `KeyNotFound` otherwise.
    fn update<Q>(&mut self, key: &Q, value: Self::Value) -> Result<(), TableError>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + TableKey;

    /// Returns `true` if the key was present and is now removed.
    fn remove<Q>(&mut self, key: &Q) -> bool
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + TableKey;

    /// Drop every entry, keeping the current capacity.
    fn clear(&mut self);

    /// Number of live entries.
    fn len(&self) -> usize;

    /// Length of the slot array.
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }
}
