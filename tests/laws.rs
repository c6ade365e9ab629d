//! Property-based checks of the merge laws for the built-in instances.
//!
//!  - Associativity: (a ⊕ b) ⊕ c = a ⊕ (b ⊕ c)
//!  - Identity: e ⊕ a = a = a ⊕ e
//!  - Grouping invariance: every tree shape reduces to the same value

use ironfold::derive::{OptionalLift, product2};
use ironfold::instances::{And, Append, Concat, Max, Mean, MeanOp, Min, Or, Sum, TopK, Union};
use ironfold::testing::*;
use ironfold::{ExecMode, MergeOp, Reducer, merge_fn};
use proptest::prelude::*;
use std::collections::HashSet;

fn topk_strategy(k: usize) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50i32..50, 0..12).prop_map(move |xs| TopK::new(k).of(xs))
}

fn mean_strategy() -> impl Strategy<Value = Mean> {
    (0u64..1000, -1000i32..1000).prop_map(|(count, total)| Mean {
        count,
        total: f64::from(total),
    })
}

proptest! {
    #[test]
    fn sum_is_associative(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000, c in -1_000_000i64..1_000_000) {
        prop_assert!(is_associative_on(&Sum::new(), &a, &b, &c));
    }

    #[test]
    fn min_max_are_monoids(a: i32, b: i32, c: i32) {
        assert_associative(&Min::new(), &a, &b, &c);
        assert_associative(&Max::new(), &a, &b, &c);
        assert_identity_laws(&Min::new(), &a);
        assert_identity_laws(&Max::new(), &a);
    }

    #[test]
    fn boolean_monoids(a: bool, b: bool, c: bool) {
        assert_associative(&And, &a, &b, &c);
        assert_associative(&Or, &a, &b, &c);
        assert_identity_laws(&And, &a);
        assert_identity_laws(&Or, &a);
    }

    #[test]
    fn concat_is_associative_but_not_commutative(a in "[a-z]{0,6}", b in "[a-z]{0,6}", c in "[a-z]{0,6}") {
        assert_associative(&Concat, &a, &b, &c);
        assert_identity_laws(&Concat, &a);
        if a != b && !a.is_empty() && !b.is_empty() {
            let ab = Concat.merge(a.clone(), b.clone());
            let ba = Concat.merge(b.clone(), a.clone());
            prop_assert!(ab != ba || a.repeat(b.len()) == b.repeat(a.len()));
        }
    }

    #[test]
    fn union_is_a_monoid(
        a in prop::collection::hash_set(0u8..20, 0..8),
        b in prop::collection::hash_set(0u8..20, 0..8),
        c in prop::collection::hash_set(0u8..20, 0..8),
    ) {
        let op = Union::<u8>::new();
        assert_associative(&op, &a, &b, &c);
        assert_identity_laws(&op, &a);
        let all: HashSet<u8> = a.iter().chain(&b).chain(&c).copied().collect();
        prop_assert_eq!(op.merge(op.merge(a, b), c), all);
    }

    #[test]
    fn topk_is_a_monoid(a in topk_strategy(4), b in topk_strategy(4), c in topk_strategy(4)) {
        let op = TopK::<i32>::new(4);
        assert_associative(&op, &a, &b, &c);
        assert_identity_laws(&op, &a);
    }

    #[test]
    fn mean_summary_is_a_monoid(a in mean_strategy(), b in mean_strategy(), c in mean_strategy()) {
        assert_associative(&MeanOp, &a, &b, &c);
        assert_identity_laws(&MeanOp, &a);
    }

    #[test]
    fn optional_product_is_a_monoid(
        a in prop::option::of((any::<i16>(), any::<i16>())),
        b in prop::option::of((any::<i16>(), any::<i16>())),
        c in prop::option::of((any::<i16>(), any::<i16>())),
    ) {
        let op = OptionalLift::new(product2(Min::<i16>::new(), Max::<i16>::new()));
        assert_associative(&op, &a, &b, &c);
        assert_identity_laws(&op, &a);
    }

    #[test]
    fn grouping_invariance_for_lists(items in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..3), 1..40)) {
        assert_grouping_invariant(&Append::<u8>::new(), &items);
    }

    #[test]
    fn parallel_reduce_matches_left_fold(
        items in prop::collection::vec(-10_000i64..10_000, 0..300),
        partitions in 1usize..20,
        fanout in 2usize..6,
    ) {
        let reducer = Reducer::new(ExecMode::Parallel { threads: None, partitions: Some(partitions) })
            .and_then(|r| r.with_fanout(fanout))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let expected: i64 = items.iter().sum();
        prop_assert_eq!(reducer.reduce_or_identity(items, &Sum::new()), expected);
    }

    #[test]
    fn rollup_equivalence_for_any_split(
        values in prop::collection::vec(0u32..10_000, 0..200),
        at in 0usize..200,
    ) {
        let agg = ironfold::PartialAggregator::new(
            |v: &u32| (u64::from(*v), *v),
            product2(Sum::<u64>::new(), Max::<u32>::new()),
        );
        let (g1, g2) = values.split_at(at.min(values.len()));
        assert_rollup_equivalence(&agg, g1, g2);
    }
}

#[test]
fn subtraction_is_rejected_by_the_law_check() {
    let minus = merge_fn(|a: i32, b: i32| a - b);
    assert!(!is_associative_on(&minus, &1, &2, &3));

    let halve = merge_fn(|a: f64, b: f64| (a + b) / 2.0);
    assert!(!is_associative_on(&halve, &0.0, &4.0, &8.0));
}

#[test]
#[should_panic(expected = "associativity violated")]
fn non_associative_op_fails_assertion() {
    let divide = merge_fn(|a: i64, b: i64| a / b);
    assert_associative(&divide, &100, &10, &5);
}

#[test]
#[should_panic(expected = "disagrees")]
fn non_associative_op_fails_grouping_check() {
    let minus = merge_fn(|a: i32, b: i32| a - b);
    assert_grouping_invariant(&minus, &[9, 5, 2, 1]);
}
