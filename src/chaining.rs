//! ChainingTable: separate chaining with per-bucket singly-linked chains.
//!
//! Chain nodes live in a `SlotMap` arena and link to each other through
//! generational keys; each bucket holds the key of its chain head. Growth
//! relinks the existing nodes into a larger bucket array, so entries never
//! move or get rehashed through `K: Hash`.

use crate::config::TableConfig;
use crate::error::{ConfigError, TableError};
use crate::key::TableKey;
use crate::table::AssociativeTable;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use log::debug;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    hash: u64,
    next: Option<DefaultKey>,
}

#[derive(Debug)]
pub struct ChainingTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Vec<Option<DefaultKey>>, // chain heads
    nodes: SlotMap<DefaultKey, Node<K, V>>,
    config: TableConfig,
}

impl<K, V> ChainingTable<K, V>
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

impl<K, V> Default for ChainingTable<K, V>
where
    K: TableKey,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainingTable<K, V, S>
where
    K: TableKey,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::build(TableConfig::chaining(), hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, hasher))
    }

    fn build(config: TableConfig, hasher: S) -> Self {
        Self {
            hasher,
            buckets: vec![None; config.initial_capacity()],
            nodes: SlotMap::with_key(),
            config,
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    fn bucket_of(hash: u64, capacity: usize) -> usize {
        (hash % capacity as u64) as usize
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    fn find<Q>(&self, key: &Q) -> Option<DefaultKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        let hash = self.make_hash(key);
        let mut cursor = self.buckets[Self::bucket_of(hash, self.buckets.len())];
        while let Some(k) = cursor {
            let node = &self.nodes[k];
            if node.hash == hash && node.key.borrow() == key {
                return Some(k);
            }
            cursor = node.next;
        }
        None
    }

    /// Append `key` to its bucket's chain. Fails with `DuplicateKey` if the
    /// chain already holds an equal key, leaving the table untouched. Grows
    /// the table when the new entry pushes the load factor over the cap.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        if key.is_null() {
            return Err(TableError::NullKey);
        }
        let hash = self.make_hash(&key);
        let index = Self::bucket_of(hash, self.buckets.len());

        let mut tail = None;
        let mut cursor = self.buckets[index];
        while let Some(k) = cursor {
            let node = &self.nodes[k];
            if node.hash == hash && node.key == key {
                return Err(TableError::DuplicateKey);
            }
            tail = Some(k);
            cursor = node.next;
        }

        let k = self.nodes.insert(Node {
            key,
            value,
            hash,
            next: None,
        });
        match tail {
            Some(t) => self.nodes[t].next = Some(k),
            None => self.buckets[index] = Some(k),
        }

        if self.config.exceeds(self.len(), self.capacity()) {
            self.grow();
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
        self.find(key)
            .map(|k| &self.nodes[k].value)
            .ok_or(TableError::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        if key.is_null() {
            return Err(TableError::NullKey);
        }
        match self.find(key) {
            Some(k) => Ok(&mut self.nodes[k].value),
            None => Err(TableError::KeyNotFound),
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        !key.is_null() && self.find(key).is_some()
    }

    pub fn update<Q>(&mut self, key: &Q, value: V) -> Result<(), TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        *self.get_mut(key)? = value;
        Ok(())
    }

    /// Unlink the entry for `key` from its chain. Returns `false` when the
    /// key is absent (or null).
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        if key.is_null() {
            return false;
        }
        let hash = self.make_hash(key);
        let index = Self::bucket_of(hash, self.buckets.len());

        let mut prev: Option<DefaultKey> = None;
        let mut cursor = self.buckets[index];
        while let Some(k) = cursor {
            let node = &self.nodes[k];
            if node.hash == hash && node.key.borrow() == key {
                let next = node.next;
                match prev {
                    Some(p) => self.nodes[p].next = next,
                    None => self.buckets[index] = next,
                }
                // Chain is relinked before K/V drop.
                self.nodes.remove(k);
                return true;
            }
            prev = Some(k);
            cursor = node.next;
        }
        false
    }

    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|b| *b = None);
        self.nodes.clear();
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.nodes.values().map(|n| (&n.key, &n.value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.nodes.values_mut().map(|n| (&n.key, &mut n.value))
    }

    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = self.config.grown_capacity(old_capacity, self.len());

        let mut live = Vec::with_capacity(self.len());
        for &head in &self.buckets {
            let mut cursor = head;
            while let Some(k) = cursor {
                live.push(k);
                cursor = self.nodes[k].next;
            }
        }
        assert_eq!(
            live.len(),
            self.nodes.len(),
            "rehash must carry every live entry exactly once"
        );

        let mut buckets = vec![None; new_capacity];
        for k in live {
            Self::push_front(&mut buckets, &mut self.nodes, k);
        }
        self.buckets = buckets;
        debug!(
            "chaining table grew from {} to {} buckets ({} entries)",
            old_capacity,
            new_capacity,
            self.len()
        );
    }

    // No duplicate or load checks: callers guarantee `k` is unique and the
    // bucket array is already sized for it.
    fn push_front(
        buckets: &mut [Option<DefaultKey>],
        nodes: &mut SlotMap<DefaultKey, Node<K, V>>,
        k: DefaultKey,
    ) {
        let index = Self::bucket_of(nodes[k].hash, buckets.len());
        nodes[k].next = buckets[index];
        buckets[index] = Some(k);
    }

    #[cfg(test)]
    fn chain_len(&self, index: usize) -> usize {
        let mut n = 0;
        let mut cursor = self.buckets[index];
        while let Some(k) = cursor {
            n += 1;
            cursor = self.nodes[k].next;
        }
        n
    }

    /// Panics if the bucket array disagrees with the arena.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let capacity = self.buckets.len();
        let mut reachable = 0;
        for (index, &head) in self.buckets.iter().enumerate() {
            let mut cursor = head;
            while let Some(k) = cursor {
                let node = &self.nodes[k];
                assert_eq!(Self::bucket_of(node.hash, capacity), index, "node in wrong bucket");
                reachable += 1;
                cursor = node.next;
            }
        }
        assert_eq!(reachable, self.nodes.len(), "every node reachable exactly once");
        assert!(!self.config.exceeds(self.len(), capacity), "load factor over cap");
    }
}

impl<K, V, S> AssociativeTable for ChainingTable<K, V, S>
where
    K: TableKey,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        ChainingTable::insert(self, key, value)
    }

    fn get<Q>(&self, key: &Q) -> Result<&V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        ChainingTable::get(self, key)
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        ChainingTable::contains_key(self, key)
    }

    fn update<Q>(&mut self, key: &Q, value: V) -> Result<(), TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        ChainingTable::update(self, key, value)
    }

    fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + TableKey,
    {
        ChainingTable::remove(self, key)
    }

    fn clear(&mut self) {
        ChainingTable::clear(self)
    }

    fn len(&self) -> usize {
        ChainingTable::len(self)
    }

    fn capacity(&self) -> usize {
        ChainingTable::capacity(self)
    }
}
