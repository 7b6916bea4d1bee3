//! OpenAddressingTable: linear probing with tombstone deletion.
//!
//! Each slot is Empty, Occupied or a Tombstone. A probe for a key starts at
//! `hash % capacity` and steps one slot at a time; lookups skip tombstones
//! and stop at the first Empty slot, so removal must leave a tombstone
//! behind to keep later entries of the same run reachable.
//!
//! Tombstones count against the load factor for probe termination: when
//! live entries plus tombstones exceed the cap but live entries alone do
//! not, the table is rebuilt at the same capacity instead of grown.

use crate::config::TableConfig;
use crate::error::{ConfigError, TableError};
use crate::key::TableKey;
use crate::table::AssociativeTable;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use log::{debug, error, trace};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

#[derive(Debug)]
enum Slot<K, V> {
    Empty,
    Occupied(Entry<K, V>),
    Tombstone,
}

#[derive(Debug)]
pub struct OpenAddressingTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    config: TableConfig,
}

impl<K, V> OpenAddressingTable<K, V>
where
    K: TableKey,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, Default::default())
    }
}

impl<K, V> Default for OpenAddressingTable<K, V>
where
    K: TableKey,
{
    fn default() -> Self {
        Self::new()
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

/// Slot indices visited by a probe for `hash`, at most `capacity` of them.
fn probe(hash: u64, capacity: usize) -> impl Iterator<Item = usize> {
    let start = (hash % capacity as u64) as usize;
    (0..capacity).map(move |step| (start + step) % capacity)
}

impl<K, V, S> OpenAddressingTable<K, V, S>
where
    K: TableKey,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::build(TableConfig::open_addressing(), hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate_open_addressing()?;
        Ok(Self::build(config, hasher))
    }

    fn build(config: TableConfig, hasher: S) -> Self {
        Self {
            hasher,
            slots: empty_slots(config.initial_capacity()),
            len: 0,
            tombstones: 0,
            config,
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }
    pub fn tombstone_count(&self) -> usize {
        self.tombstones
    }
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        let hash = self.make_hash(key);
        for i in probe(hash, self.slots.len()) {
            match &self.slots[i] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied(e) => {
                    if e.hash == hash && e.key.borrow() == key {
                        return Some(i);
                    }
                }
            }
        }
        None
    }

    /// Insert into the first Tombstone or Empty slot of the key's probe run.
    ///
    /// The run is scanned up to its first Empty slot for a live equal key
    /// before anything is written, so a duplicate sitting behind a tombstone
    /// is still rejected with `DuplicateKey`.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        if key.is_null() {
            return Err(TableError::NullKey);
        }
        let hash = self.make_hash(&key);
        let capacity = self.slots.len();

        let mut target = None;
        for i in probe(hash, capacity) {
            match &self.slots[i] {
                Slot::Empty => {
                    if target.is_none() {
                        target = Some(i);
                    }
                    break;
                }
                Slot::Tombstone => {
                    if target.is_none() {
                        target = Some(i);
                    }
                }
                Slot::Occupied(e) => {
                    if e.hash == hash && e.key == key {
                        return Err(TableError::DuplicateKey);
                    }
                }
            }
        }

        let Some(index) = target else {
            error!(
                "open addressing table full: capacity {}, {} entries, {} tombstones",
                capacity, self.len, self.tombstones
            );
            return Err(TableError::TableFull { capacity });
        };
        if matches!(self.slots[index], Slot::Tombstone) {
            self.tombstones -= 1;
        }
        self.slots[index] = Slot::Occupied(Entry { key, value, hash });
        self.len += 1;

        if self.config.exceeds(self.len, capacity) {
            let new_capacity = self.config.grown_capacity(capacity, self.len);
            self.rehash(new_capacity);
            debug!(
                "open addressing table grew from {} to {} slots ({} entries)",
                capacity, new_capacity, self.len
            );
        } else if self.config.exceeds(self.len + self.tombstones, capacity) {
            let new_capacity = self.config.purge_capacity(capacity, self.len);
            trace!(
                "purging {} tombstones, capacity {} -> {}",
                self.tombstones,
                capacity,
                new_capacity
            );
            self.rehash(new_capacity);
        }
        Ok(())
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        if key.is_null() {
            return Err(TableError::NullKey);
        }
        match self.find_index(key).map(|i| &self.slots[i]) {
            Some(Slot::Occupied(e)) => Ok(&e.value),
            _ => Err(TableError::KeyNotFound),
        }
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        if key.is_null() {
            return Err(TableError::NullKey);
        }
        match self.find_index(key).map(|i| &mut self.slots[i]) {
            Some(Slot::Occupied(e)) => Ok(&mut e.value),
            _ => Err(TableError::KeyNotFound),
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        !key.is_null() && self.find_index(key).is_some()
    }

    pub fn update<Q>(&mut self, key: &Q, value: V) -> Result<(), TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        *self.get_mut(key)? = value;
        Ok(())
    }

    /// Replace the key's slot with a tombstone. Never downgrades to Empty.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        if key.is_null() {
            return false;
        }
        match self.find_index(key) {
            Some(i) => {
                self.slots[i] = Slot::Tombstone;
                self.len -= 1;
                self.tombstones += 1;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = Slot::Empty);
        self.len = 0;
        self.tombstones = 0;
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|s| match s {
            Slot::Occupied(e) => Some((&e.key, &e.value)),
            _ => None,
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.slots.iter_mut().filter_map(|s| match s {
            Slot::Occupied(e) => Some((&e.key, &mut e.value)),
            _ => None,
        })
    }

    /// Move every live entry into a fresh array of `new_capacity` slots.
    /// Tombstones are not carried over.
    fn rehash(&mut self, new_capacity: usize) {
        let mut slots = empty_slots(new_capacity);
        let mut moved = 0;
        for slot in self.slots.drain(..) {
            if let Slot::Occupied(entry) = slot {
                Self::place(&mut slots, entry);
                moved += 1;
            }
        }
        assert_eq!(
            moved, self.len,
            "rehash must carry every live entry exactly once"
        );
        self.slots = slots;
        self.tombstones = 0;
    }

    // No duplicate or load checks: the entry is known unique and the
    // destination has no tombstones and room for every live entry.
    fn place(slots: &mut [Slot<K, V>], entry: Entry<K, V>) {
        let index = probe(entry.hash, slots.len())
            .find(|&i| matches!(slots[i], Slot::Empty))
            .expect("rehash destination sized to hold every live entry");
        slots[index] = Slot::Occupied(entry);
    }

    /// Panics if counters or probe runs are inconsistent with the slots.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let capacity = self.slots.len();
        let occupied = self
            .slots
            .iter()
            .filter(|s| matches!(s, Slot::Occupied(_)))
            .count();
        let tombstones = self
            .slots
            .iter()
            .filter(|s| matches!(s, Slot::Tombstone))
            .count();
        assert_eq!(occupied, self.len, "len counts live entries");
        assert_eq!(tombstones, self.tombstones, "tombstone counter");
        assert!(occupied + tombstones < capacity, "an Empty slot always remains");
        assert!(!self.config.exceeds(self.len, capacity), "load factor over cap");
        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied(e) = slot {
                let run_clear = probe(e.hash, capacity)
                    .take_while(|&i| i != index)
                    .all(|i| !matches!(self.slots[i], Slot::Empty));
                assert!(run_clear, "entry at {} cut off by an Empty slot", index);
            }
        }
    }
}

impl<K, V, S> AssociativeTable for OpenAddressingTable<K, V, S>
where
    K: TableKey,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        OpenAddressingTable::insert(self, key, value)
    }

    fn get<Q>(&self, key: &Q) -> Result<&V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        OpenAddressingTable::get(self, key)
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        OpenAddressingTable::contains_key(self, key)
    }

    fn update<Q>(&mut self, key: &Q, value: V) -> Result<(), TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        OpenAddressingTable::update(self, key, value)
    }

    fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        OpenAddressingTable::remove(self, key)
    }

    fn clear(&mut self) {
        OpenAddressingTable::clear(self)
    }

    fn len(&self) -> usize {
        OpenAddressingTable::len(self)
    }

    fn capacity(&self) -> usize {
        OpenAddressingTable::capacity(self)
    }
}
