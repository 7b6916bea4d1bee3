// OpenAddressingTable suite.
//
// Collisions are engineered with an identity hasher: a u64 key k starts
// probing at slot k % capacity. Invariants exercised:
// - Tombstones do not terminate a probe run.
// - A fresh insert into a run reuses the first tombstone it passes.
// - Growth discards tombstones; a rebuild purges them when they alone push
//   occupancy over the cap, growing too if live load is above half the cap.
use assoc_table::{
    ConfigError, Incremental, OpenAddressingTable, TableConfig, TableError,
    DEFAULT_OPEN_ADDRESSING_CAPACITY,
};
use assoc_table::test_hashers::{ConstBuildHasher, IdentityBuildHasher};

fn identity_table() -> OpenAddressingTable<u64, &'static str, IdentityBuildHasher> {
    OpenAddressingTable::with_hasher(IdentityBuildHasher)
}

// Test: tombstone in the middle of a collision run.
// Assumes: 8 slots, so 1, 9 and 17 all start probing at slot 1.
// Verifies: k3 stays reachable past the tombstone; a new colliding key takes
// the tombstone over instead of extending the run.
#[test]
fn tombstone_between_colliding_keys() {
    let mut t = identity_table();
    assert_eq!(t.capacity(), DEFAULT_OPEN_ADDRESSING_CAPACITY);
    t.insert(1, "k1").unwrap();
    t.insert(9, "k2").unwrap();
    t.insert(17, "k3").unwrap();

    assert!(t.remove(&9));
    assert_eq!(t.tombstone_count(), 1);
    assert_eq!(t.get(&17), Ok(&"k3"));
    assert_eq!(t.get(&9), Err(TableError::KeyNotFound));

    t.insert(25, "k4").unwrap();
    assert_eq!(t.tombstone_count(), 0, "tombstone was reused");
    assert_eq!(t.get(&1), Ok(&"k1"));
    assert_eq!(t.get(&17), Ok(&"k3"));
    assert_eq!(t.get(&25), Ok(&"k4"));
    assert_eq!(t.len(), 3);
}

// Test: duplicate detection looks past tombstones.
// Verifies: a key stored after a tombstone cannot be inserted a second time
// into the tombstoned slot.
#[test]
fn duplicate_past_tombstone_rejected() {
    let mut t = identity_table();
    t.insert(2, "a").unwrap();
    t.insert(10, "b").unwrap();
    assert!(t.remove(&2));
    assert_eq!(t.insert(10, "dup"), Err(TableError::DuplicateKey));
    assert_eq!(t.get(&10), Ok(&"b"));
    assert_eq!(t.len(), 1);
}

// Test: growth trigger at the 0.6 default cap.
// Verifies: the fifth insert into 8 slots (5/8 > 0.6) doubles the array.
#[test]
fn fifth_insert_doubles_capacity() {
    let mut t = identity_table();
    for k in 0..4 {
        t.insert(k, "v").unwrap();
    }
    assert_eq!(t.capacity(), 8);
    t.insert(4, "v").unwrap();
    assert_eq!(t.capacity(), 16);
    assert!(t.load_factor() <= 0.6);
}

// Test: rebuilding drops tombstones.
// Verifies: once occupancy passes the cap the array is rebuilt without
// tombstones, and grown by the same rebuild because live load (4/8) is
// above half the cap.
#[test]
fn rebuild_discards_tombstones() {
    let mut t = identity_table();
    t.insert(0, "gone").unwrap();
    t.insert(1, "kept").unwrap();
    assert!(t.remove(&0));
    assert_eq!(t.tombstone_count(), 1);
    for k in 2..6 {
        t.insert(k, "v").unwrap();
    }
    assert_eq!(t.capacity(), 16);
    assert_eq!(t.tombstone_count(), 0);
    assert_eq!(t.get(&1), Ok(&"kept"));
    assert!(!t.contains_key(&0));
}

// Test: churn with few live keys does not grow the table.
// Verifies: repeated insert/remove of fresh keys purges tombstones in place.
#[test]
fn churn_purges_without_growing() {
    let mut t = identity_table();
    for k in 0..1000u64 {
        t.insert(k, "v").unwrap();
        assert!(t.remove(&k));
        assert!(t.tombstone_count() < t.capacity());
    }
    assert_eq!(t.capacity(), 8);
    assert!(t.is_empty());
}

// Test: total collision (every key hashes to 0) still resolves by equality.
#[test]
fn constant_hasher_single_run() {
    let mut t: OpenAddressingTable<String, usize, ConstBuildHasher> =
        OpenAddressingTable::with_hasher(ConstBuildHasher);
    for i in 0..40 {
        t.insert(format!("k{}", i), i).unwrap();
    }
    for i in (0..40).step_by(3) {
        assert!(t.remove(format!("k{}", i).as_str()));
    }
    for i in 0..40 {
        let k = format!("k{}", i);
        if i % 3 == 0 {
            assert!(!t.contains_key(k.as_str()));
        } else {
            assert_eq!(t.get(k.as_str()), Ok(&i));
        }
    }
}

#[test]
fn custom_growth_policy() {
    let config = TableConfig::open_addressing()
        .with_initial_capacity(3)
        .with_max_load_factor(0.5)
        .with_growth(Incremental::new(3));
    let mut t: OpenAddressingTable<u64, u64> = OpenAddressingTable::with_config(config).unwrap();
    for k in 0..10 {
        t.insert(k, k).unwrap();
        assert!(t.load_factor() <= 0.5);
        assert_eq!(t.capacity() % 3, 0);
    }
    assert_eq!(t.capacity(), 21);
}

#[test]
fn config_validation() {
    let zero: Result<OpenAddressingTable<u64, u64>, _> =
        OpenAddressingTable::with_config(TableConfig::open_addressing().with_initial_capacity(0));
    assert_eq!(zero.err(), Some(ConfigError::ZeroCapacity));

    let full: Result<OpenAddressingTable<u64, u64>, _> =
        OpenAddressingTable::with_config(TableConfig::open_addressing().with_max_load_factor(1.2));
    assert_eq!(full.err(), Some(ConfigError::LoadFactorTooHigh(1.2)));
}

#[test]
fn null_keys_rejected() {
    let mut t: OpenAddressingTable<Option<u64>, u64> = OpenAddressingTable::new();
    assert_eq!(t.insert(None, 0), Err(TableError::NullKey));
    assert_eq!(t.get(&None), Err(TableError::NullKey));
    assert!(!t.remove(&None));
    t.insert(Some(0), 0).unwrap();
    assert_eq!(t.get(&Some(0)), Ok(&0));
}

#[test]
fn iter_yields_live_entries_only() {
    let mut t = identity_table();
    t.insert(1, "a").unwrap();
    t.insert(2, "b").unwrap();
    t.insert(3, "c").unwrap();
    t.remove(&2);
    let mut seen: Vec<u64> = t.iter().map(|(k, _)| *k).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 3]);

    for (_k, v) in t.iter_mut() {
        *v = "z";
    }
    assert_eq!(t.get(&3), Ok(&"z"));
}
