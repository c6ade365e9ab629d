//! Law checks for [`MergeOp`] / [`IdentityElement`] instances.
//!
//! The engine cannot verify associativity at runtime, so these helpers are
//! how an instance is vetted: run them in unit or property tests over
//! representative values. A failing associativity check means the operation
//! must not be registered as a `MergeOp`.

use crate::aggregate::PartialAggregator;
use crate::algebra::{IdentityElement, MergeOp};
use crate::reducer::{Grouping, reduce_grouped};
use std::fmt::Debug;

/// `merge(merge(a, b), c) == merge(a, merge(b, c))` for these three values.
pub fn is_associative_on<T, M>(op: &M, a: &T, b: &T, c: &T) -> bool
where
    T: Clone + PartialEq,
    M: MergeOp<T> + ?Sized,
{
    let left = op.merge(op.merge(a.clone(), b.clone()), c.clone());
    let right = op.merge(a.clone(), op.merge(b.clone(), c.clone()));
    left == right
}

/// Assert associativity for three values.
///
/// # Panics
///
/// Panics with both groupings if they differ.
pub fn assert_associative<T, M>(op: &M, a: &T, b: &T, c: &T)
where
    T: Clone + PartialEq + Debug,
    M: MergeOp<T> + ?Sized,
{
    let left = op.merge(op.merge(a.clone(), b.clone()), c.clone());
    let right = op.merge(a.clone(), op.merge(b.clone(), c.clone()));
    assert_eq!(
        left, right,
        "associativity violated:\n  (a ⊕ b) ⊕ c = {left:?}\n  a ⊕ (b ⊕ c) = {right:?}\n  a = {a:?}, b = {b:?}, c = {c:?}"
    );
}

/// # Panics
///
/// Panics if `merge(identity(), x) != x`.
pub fn assert_left_identity<T, M>(op: &M, x: &T)
where
    T: Clone + PartialEq + Debug,
    M: IdentityElement<T> + ?Sized,
{
    let got = op.merge(op.identity(), x.clone());
    assert_eq!(&got, x, "left identity violated for {x:?}");
}

/// # Panics
///
/// Panics if `merge(x, identity()) != x`.
pub fn assert_right_identity<T, M>(op: &M, x: &T)
where
    T: Clone + PartialEq + Debug,
    M: IdentityElement<T> + ?Sized,
{
    let got = op.merge(x.clone(), op.identity());
    assert_eq!(&got, x, "right identity violated for {x:?}");
}

/// Both identity laws for `x`.
pub fn assert_identity_laws<T, M>(op: &M, x: &T)
where
    T: Clone + PartialEq + Debug,
    M: IdentityElement<T> + ?Sized,
{
    assert_left_identity(op, x);
    assert_right_identity(op, x);
}

/// Reduce `items` under every shape in [`Grouping::shapes`].
///
/// Returns `None` for empty input.
pub fn grouping_results<T, M>(op: &M, items: &[T]) -> Option<Vec<(Grouping, T)>>
where
    T: Clone + Send,
    M: MergeOp<T> + ?Sized,
{
    Grouping::shapes()
        .into_iter()
        .map(|g| reduce_grouped(items.to_vec(), op, g).ok().map(|v| (g, v)))
        .collect()
}

/// Assert that every tree shape reduces `items` to the same value.
///
/// # Panics
///
/// Panics if `items` is empty or any two shapes disagree.
pub fn assert_grouping_invariant<T, M>(op: &M, items: &[T])
where
    T: Clone + Send + PartialEq + Debug,
    M: MergeOp<T> + ?Sized,
{
    let results =
        grouping_results(op, items).unwrap_or_else(|| panic!("grouping check needs a non-empty input"));
    let (first_shape, first) = &results[0];
    for (shape, value) in &results[1..] {
        assert_eq!(
            value, first,
            "grouping {shape:?} disagrees with {first_shape:?} over {items:?}"
        );
    }
}

/// Assert `summarize(g1 ++ g2) == merge_rollups(summarize(g1), summarize(g2))`.
///
/// # Panics
///
/// Panics if the whole-set summary differs from the merged partial summaries.
pub fn assert_rollup_equivalence<P, M, R, S>(agg: &PartialAggregator<P, M>, g1: &[R], g2: &[R])
where
    P: Fn(&R) -> S + Sync,
    M: IdentityElement<S>,
    R: Clone + Sync,
    S: Send + PartialEq + Debug,
{
    let whole: Vec<R> = g1.iter().chain(g2).cloned().collect();
    let direct = agg.summarize_or_identity(&whole);
    let merged = agg.merge_rollups(agg.summarize_or_identity(g1), agg.summarize_or_identity(g2));
    assert_eq!(
        merged, direct,
        "rollup of partial summaries differs from summary of the combined records"
    );
}
