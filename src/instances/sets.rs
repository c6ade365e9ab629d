//! Collection instances: `Union`, `TopK`.

use crate::algebra::{IdentityElement, MergeOp};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::hash::Hash;
use std::marker::PhantomData;

/* ===================== Union<T> ===================== */

/// Set union, identity `{}`. Commutative and idempotent.
///
/// The distinct count of a dataset is `len()` of its reduced union.
#[derive(Clone, Copy, Debug, Default)]
pub struct Union<T>(pub PhantomData<T>);
impl<T> Union<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> MergeOp<HashSet<T>> for Union<T>
where
    T: Eq + Hash + Send + Sync,
{
    fn merge(&self, mut left: HashSet<T>, mut right: HashSet<T>) -> HashSet<T> {
        // grow the larger set
        if left.len() < right.len() {
            std::mem::swap(&mut left, &mut right);
        }
        left.extend(right);
        left
    }
}

impl<T> IdentityElement<HashSet<T>> for Union<T>
where
    T: Eq + Hash + Send + Sync,
{
    fn identity(&self) -> HashSet<T> {
        HashSet::new()
    }
}

/* ===================== TopK<T> ===================== */

/// The largest **K** values, kept as a `Vec<T>` sorted descending with at most
/// `k` entries. Identity `vec![]`.
///
/// Both operands must already satisfy that shape; build leaves with
/// [`TopK::leaf`] or [`TopK::of`].
///
/// # Notes
/// - `k == 0` always produces an empty vector.
#[derive(Clone, Debug)]
pub struct TopK<T> {
    /// Number of largest elements to keep.
    pub k: usize,
    _m: PhantomData<T>,
}

impl<T> TopK<T> {
    /// Create a new `TopK` with the given `k`.
    #[must_use]
    pub const fn new(k: usize) -> Self {
        Self { k, _m: PhantomData }
    }

    /// A summary holding a single value.
    pub fn leaf(&self, value: T) -> Vec<T> {
        if self.k == 0 { Vec::new() } else { vec![value] }
    }
}

impl<T: Ord> TopK<T> {
    /// A summary of an arbitrary batch of values.
    pub fn of(&self, mut values: Vec<T>) -> Vec<T> {
        values.sort_unstable_by(|a, b| b.cmp(a));
        values.truncate(self.k);
        values
    }
}

impl<T> MergeOp<Vec<T>> for TopK<T>
where
    T: Ord + Send + Sync,
{
    fn merge(&self, left: Vec<T>, right: Vec<T>) -> Vec<T> {
        let mut out = Vec::with_capacity(self.k.min(left.len() + right.len()));
        let mut l = left.into_iter().peekable();
        let mut r = right.into_iter().peekable();
        while out.len() < self.k {
            let take_left = match (l.peek(), r.peek()) {
                (Some(a), Some(b)) => Reverse(a) <= Reverse(b),
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let next = if take_left { l.next() } else { r.next() };
            out.extend(next);
        }
        out
    }
}

impl<T> IdentityElement<Vec<T>> for TopK<T>
where
    T: Ord + Send + Sync,
{
    fn identity(&self) -> Vec<T> {
        Vec::new()
    }
}
