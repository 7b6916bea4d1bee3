// ChainingTable suite.
//
// Invariants exercised:
// - Colliding keys share a chain and are told apart by equality alone.
// - Removing any node of a chain keeps the rest reachable.
// - Growth follows the configured policy and keeps the load factor capped.
use assoc_table::{
    ChainingTable, ConfigError, Doubling, Incremental, TableConfig, TableError,
    DEFAULT_CHAINING_CAPACITY,
};
use assoc_table::test_hashers::{ConstBuildHasher, IdentityBuildHasher};

// Test: every key in one chain.
// Assumes: constant hasher, so all keys land in bucket 0.
// Verifies: get/update/remove resolve by equality anywhere in the chain.
#[test]
fn single_chain_operations() {
    let mut t: ChainingTable<String, u32, ConstBuildHasher> =
        ChainingTable::with_hasher(ConstBuildHasher);
    for i in 0..30 {
        t.insert(format!("k{}", i), i).unwrap();
    }
    for i in (0..30).rev().step_by(4) {
        assert!(t.remove(format!("k{}", i).as_str()));
    }
    t.update("k0", 100).unwrap();
    assert_eq!(t.get("k0"), Ok(&100));
    assert_eq!(t.update("k29", 1), Err(TableError::KeyNotFound));
    assert_eq!(t.len(), 30 - 8);
}

// Test: growth trigger at the 0.75 default cap.
// Verifies: 3 entries in 4 buckets is allowed; the 4th doubles to 8.
#[test]
fn fourth_insert_doubles_capacity() {
    let mut t: ChainingTable<u64, (), IdentityBuildHasher> =
        ChainingTable::with_hasher(IdentityBuildHasher);
    assert_eq!(t.capacity(), DEFAULT_CHAINING_CAPACITY);
    for k in 0..3 {
        t.insert(k, ()).unwrap();
    }
    assert_eq!(t.capacity(), 4);
    assert_eq!(t.load_factor(), 0.75);
    t.insert(3, ()).unwrap();
    assert_eq!(t.capacity(), 8);
    assert_eq!(t.load_factor(), 0.5);
}

// Test: a duplicate insert never triggers growth.
#[test]
fn duplicate_does_not_grow() {
    let mut t: ChainingTable<u64, u64> = ChainingTable::new();
    for k in 0..3 {
        t.insert(k, k).unwrap();
    }
    assert_eq!(t.insert(2, 0), Err(TableError::DuplicateKey));
    assert_eq!(t.capacity(), 4);
    assert_eq!(t.get(&2), Ok(&2));
}

// Test: load factors above 1 are allowed for chaining.
#[test]
fn long_chains_with_high_load_factor() {
    let config = TableConfig::chaining()
        .with_initial_capacity(2)
        .with_max_load_factor(4.0)
        .with_growth(Doubling);
    let mut t: ChainingTable<u64, u64> = ChainingTable::with_config(config).unwrap();
    for k in 0..8 {
        t.insert(k, k).unwrap();
    }
    assert_eq!(t.capacity(), 2);
    assert_eq!(t.load_factor(), 4.0);
    t.insert(8, 8).unwrap();
    assert_eq!(t.capacity(), 4);
}

#[test]
fn incremental_and_closure_policies() {
    let config = TableConfig::chaining().with_growth(Incremental::new(4));
    let mut t: ChainingTable<u64, u64> = ChainingTable::with_config(config).unwrap();
    for k in 0..12 {
        t.insert(k, k).unwrap();
        assert!(t.load_factor() <= 0.75);
        assert_eq!(t.capacity() % 4, 0);
    }

    let config = TableConfig::chaining().with_growth(|c: usize| c * 4);
    let mut t: ChainingTable<u64, u64> = ChainingTable::with_config(config).unwrap();
    for k in 0..4 {
        t.insert(k, k).unwrap();
    }
    assert_eq!(t.capacity(), 16);
}

// Test: a policy that never grows is overridden rather than looping.
#[test]
fn stalled_policy_still_grows() {
    let config = TableConfig::chaining().with_growth(|c: usize| c / 2);
    let mut t: ChainingTable<u64, u64> = ChainingTable::with_config(config).unwrap();
    for k in 0..50 {
        t.insert(k, k).unwrap();
        assert!(t.load_factor() <= 0.75);
    }
    for k in 0..50 {
        assert_eq!(t.get(&k), Ok(&k));
    }
}

#[test]
fn config_validation() {
    let r: Result<ChainingTable<u64, u64>, _> =
        ChainingTable::with_config(TableConfig::chaining().with_max_load_factor(0.0));
    assert_eq!(r.err(), Some(ConfigError::InvalidLoadFactor(0.0)));
    let r: Result<ChainingTable<u64, u64>, _> =
        ChainingTable::with_config(TableConfig::chaining().with_max_load_factor(f64::INFINITY));
    assert!(matches!(r, Err(ConfigError::InvalidLoadFactor(_))));
}

#[test]
fn null_keys_rejected() {
    let mut t: ChainingTable<Option<&str>, u8> = ChainingTable::new();
    assert_eq!(t.insert(None, 0), Err(TableError::NullKey));
    assert_eq!(t.update(&None, 0), Err(TableError::NullKey));
    assert!(!t.contains_key(&None));
    t.insert(Some("x"), 1).unwrap();
    assert!(t.remove(&Some("x")));
}

// Test: borrowed lookups through Box<str> keys.
#[test]
fn boxed_str_keys_lookup_by_str() {
    let mut t: ChainingTable<Box<str>, usize> = ChainingTable::new();
    t.insert("alpha".into(), 1).unwrap();
    t.insert("beta".into(), 2).unwrap();
    assert_eq!(t.get("alpha"), Ok(&1));
    assert!(t.contains_key("beta"));
    assert!(!t.contains_key("gamma"));
}
