//! assoc-table: two interchangeable hash tables behind one contract, with
//! load-factor driven growth and an optional reader/writer-locked wrapper.
//!
//! Internal Design:
//!
//! Summary
//! - `ChainingTable<K, V, S>`: separate chaining. Buckets hold the head of
//!   a singly-linked chain; chain nodes live in a `SlotMap` arena and link
//!   through generational keys, so there are no back-references and no
//!   per-node boxing.
//! - `OpenAddressingTable<K, V, S>`: linear probing. Slots are Empty,
//!   Occupied or Tombstone; removal leaves a tombstone so probe runs stay
//!   contiguous.
//! - `AssociativeTable`: the shared contract (insert-if-absent,
//!   get-or-fail, contains, update-if-present, remove-if-present, len,
//!   capacity, load factor).
//! - `SyncTable<T>`: one `parking_lot::RwLock` around any table. Readers
//!   share, writers (including a rehashing insert) are exclusive.
//!
//! Failure model
//! - `NullKey` is checked first on every operation (`TableKey::is_null`).
//! - `DuplicateKey` from insert leaves the table unchanged, in both
//!   variants. Open addressing scans the probe run up to its first Empty
//!   slot before writing, so a duplicate behind a tombstone is caught.
//! - `KeyNotFound` from get/update is an expected outcome, not a bug.
//! - `remove` reports absence as `false`.
//! - `TableFull` means the growth trigger is broken; it is logged at error
//!   level and should be treated as fatal.
//!
//! Growth
//! - After an insert, if `len / capacity` exceeds the configured maximum,
//!   the `GrowthPolicy` is applied until the load fits and every live
//!   entry is moved to the new array in one pass. The moved count is
//!   asserted against `len` before the new array is installed.
//! - Entries store their `u64` hash; `K: Hash` is never invoked after
//!   insertion, so rehashing never calls into user code.
//! - Open addressing also rebuilds at the same capacity when tombstones
//!   push occupancy over the cap, which guarantees an Empty slot and
//!   bounded probes. That rebuild grows instead when live load is above
//!   half the cap, so churn at the cap rebuilds once per Θ(capacity)
//!   inserts rather than on every insert.
//! - A single insert may therefore cost O(len).
//!
//! Notes and non-goals
//! - No iteration order guarantees.
//! - The tables themselves are plain single-threaded values (`&mut self`
//!   for mutation); use `SyncTable` to share one across threads.
//! - No persistence.

mod chaining;
mod config;
mod error;
mod growth;
mod key;
mod open_addressing;
mod sync_table;
mod table;
mod table_proptest;
#[doc(hidden)]
pub mod test_hashers;

// Public surface
pub use chaining::ChainingTable;
pub use config::{
    TableConfig, DEFAULT_CHAINING_CAPACITY, DEFAULT_CHAINING_LOAD_FACTOR,
    DEFAULT_OPEN_ADDRESSING_CAPACITY, DEFAULT_OPEN_ADDRESSING_LOAD_FACTOR,
};
pub use error::{ConfigError, TableError};
pub use growth::{Doubling, GrowthPolicy, Incremental};
pub use key::TableKey;
pub use open_addressing::OpenAddressingTable;
pub use sync_table::SyncTable;
pub use table::AssociativeTable;
