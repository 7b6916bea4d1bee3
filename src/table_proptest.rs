#![cfg(test)]

// Property tests for both table variants kept inside the crate so they can
// check private structural invariants after every operation.

use crate::chaining::ChainingTable;
use crate::config::TableConfig;
use crate::error::TableError;
use crate::growth::Incremental;
use crate::open_addressing::OpenAddressingTable;
use crate::table::AssociativeTable;
use crate::test_hashers::{ConstBuildHasher, IdentityBuildHasher};
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u64, i32),
    Get(u64),
    Contains(u64),
    Update(u64, i32),
    Remove(u64),
}

prop_compose! {
    fn arb_key()(k in 0u64..64) -> u64 { k }
}

prop_compose! {
    fn arb_ops()(ops in proptest::collection::vec(
        prop_oneof![
            6 => (arb_key(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            2 => arb_key().prop_map(Op::Get),
            1 => arb_key().prop_map(Op::Contains),
            2 => (arb_key(), any::<i32>()).prop_map(|(k, v)| Op::Update(k, v)),
            3 => arb_key().prop_map(Op::Remove),
        ], 1..200)) -> Vec<Op> { ops }
}

// State machine harness against a std::collections::HashMap model.
// `check` runs the table's structural invariant checks after every op.
fn run_against_model<T>(
    table: &mut T,
    ops: Vec<Op>,
    check: impl Fn(&T),
) -> Result<(), TestCaseError>
where
    T: AssociativeTable<Key = u64, Value = i32>,
{
    let mut model: HashMap<u64, i32> = HashMap::new();

    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let already = model.contains_key(&k);
                match table.insert(k, v) {
                    Ok(()) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        model.insert(k, v);
                    }
                    Err(TableError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                    }
                    Err(e) => prop_assert!(false, "unexpected insert error: {:?}", e),
                }
            }
            Op::Get(k) => match model.get(&k) {
                Some(v) => prop_assert_eq!(table.get(&k), Ok(v)),
                None => prop_assert_eq!(table.get(&k), Err(TableError::KeyNotFound)),
            },
            Op::Contains(k) => {
                prop_assert_eq!(table.contains_key(&k), model.contains_key(&k));
            }
            Op::Update(k, v) => {
                let res = table.update(&k, v);
                match model.get_mut(&k) {
                    Some(mv) => {
                        prop_assert_eq!(res, Ok(()));
                        *mv = v;
                    }
                    None => prop_assert_eq!(res, Err(TableError::KeyNotFound)),
                }
            }
            Op::Remove(k) => {
                prop_assert_eq!(table.remove(&k), model.remove(&k).is_some());
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(table.len(), model.len());
        prop_assert_eq!(table.is_empty(), model.is_empty());
        check(&*table);
    }

    // Every surviving key kept its latest value through all rehashes.
    for (k, v) in &model {
        prop_assert_eq!(table.get(k), Ok(v));
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_chaining_state_machine(ops in arb_ops()) {
        let mut t: ChainingTable<u64, i32> = ChainingTable::new();
        run_against_model(&mut t, ops, |t| t.check_invariants())?;
    }

    #[test]
    fn prop_chaining_state_machine_with_collisions(ops in arb_ops()) {
        let mut t: ChainingTable<u64, i32, ConstBuildHasher> =
            ChainingTable::with_hasher(ConstBuildHasher);
        run_against_model(&mut t, ops, |t| t.check_invariants())?;
    }

    #[test]
    fn prop_chaining_state_machine_incremental_growth(ops in arb_ops()) {
        let config = TableConfig::chaining()
            .with_initial_capacity(1)
            .with_growth(Incremental::new(1));
        let mut t: ChainingTable<u64, i32> = ChainingTable::with_config(config).unwrap();
        run_against_model(&mut t, ops, |t| t.check_invariants())?;
    }

    #[test]
    fn prop_open_addressing_state_machine(ops in arb_ops()) {
        let mut t: OpenAddressingTable<u64, i32> = OpenAddressingTable::new();
        run_against_model(&mut t, ops, |t| t.check_invariants())?;
    }

    // Identity hashing of small keys produces long contiguous runs that wrap.
    #[test]
    fn prop_open_addressing_state_machine_clustered(ops in arb_ops()) {
        let mut t: OpenAddressingTable<u64, i32, IdentityBuildHasher> =
            OpenAddressingTable::with_hasher(IdentityBuildHasher);
        run_against_model(&mut t, ops, |t| t.check_invariants())?;
    }

    #[test]
    fn prop_open_addressing_state_machine_with_collisions(ops in arb_ops()) {
        let mut t: OpenAddressingTable<u64, i32, ConstBuildHasher> =
            OpenAddressingTable::with_hasher(ConstBuildHasher);
        run_against_model(&mut t, ops, |t| t.check_invariants())?;
    }

    #[test]
    fn prop_open_addressing_state_machine_dense(ops in arb_ops()) {
        let config = TableConfig::open_addressing()
            .with_initial_capacity(1)
            .with_max_load_factor(0.9)
            .with_growth(Incremental::new(1));
        let mut t: OpenAddressingTable<u64, i32, IdentityBuildHasher> =
            OpenAddressingTable::with_config_and_hasher(config, IdentityBuildHasher).unwrap();
        run_against_model(&mut t, ops, |t| t.check_invariants())?;
    }
}
