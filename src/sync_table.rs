//! SyncTable: one reader/writer lock around a whole table.
//!
//! Lookups share the lock; `insert`, `update`, `remove` and `clear` hold it
//! exclusively, including any rehash an insert triggers. There is no
//! per-bucket locking and no timeout: acquisition blocks until granted.

use crate::error::TableError;
use crate::key::TableKey;
use crate::table::AssociativeTable;
use core::borrow::Borrow;
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct SyncTable<T> {
    inner: RwLock<T>,
}

impl<T> SyncTable<T>
where
    T: AssociativeTable,
{
    pub fn new(table: T) -> Self {
        Self {
            inner: RwLock::new(table),
        }
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }

    /// Run `f` under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Run `f` under the exclusive lock, e.g. for insert-or-update.
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.inner.write())
    }

    pub fn insert(&self, key: T::Key, value: T::Value) -> Result<(), TableError> {
        self.inner.write().insert(key, value)
    }

    /// Returns a clone of the value; references cannot outlive the lock.
    pub fn get<Q>(&self, key: &Q) -> Result<T::Value, TableError>
    where
        T::Key: Borrow<Q>,
        T::Value: Clone,
        Q: ?Sized + TableKey,
    {
        self.inner.read().get(key).cloned()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        self.inner.read().contains_key(key)
    }

    pub fn update<Q>(&self, key: &Q, value: T::Value) -> Result<(), TableError>
    where
        T::Key: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        self.inner.write().update(key, value)
    }

    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        self.inner.write().remove(key)
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.inner.read().load_factor()
    }
}

impl<T> From<T> for SyncTable<T>
where
    T: AssociativeTable,
{
    fn from(table: T) -> Self {
        Self::new(table)
    }
}
