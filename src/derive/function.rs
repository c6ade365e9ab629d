//! `FunctionLift`: merge functions that share a domain by merging their results.

use crate::algebra::{IdentityElement, MergeOp};
use crate::reducer::fold_pairwise;
use std::fmt;
use std::sync::Arc;

/// A shareable, thread-safe function value. This is the value type that
/// [`FunctionLift`] merges.
pub type SharedFn<A, B> = Arc<dyn Fn(&A) -> B + Send + Sync>;

/// Wrap a closure as a [`SharedFn`].
pub fn shared_fn<A, B, F>(f: F) -> SharedFn<A, B>
where
    F: Fn(&A) -> B + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Lifts a [`MergeOp<B>`] to functions `A -> B`.
///
/// `merge(f, g)` is the function `a -> inner.merge(f(a), g(a))`. With an
/// inner identity, the identity is the constant function returning it.
///
/// Several independent classifiers over the same input can be folded into one
/// function that evaluates all of them and merges the outcomes:
///
/// ```
/// use ironfold::derive::{shared_fn, FunctionLift, SharedFn};
/// use ironfold::instances::Concat;
/// use ironfold::reduce_or_identity;
///
/// let rules: Vec<SharedFn<u32, String>> = vec![
///     shared_fn(|n: &u32| if n % 3 == 0 { "Fizz".into() } else { String::new() }),
///     shared_fn(|n: &u32| if n % 5 == 0 { "Buzz".into() } else { String::new() }),
/// ];
/// let classify = reduce_or_identity(rules, &FunctionLift::new(Concat));
/// assert_eq!(classify(&15), "FizzBuzz");
/// assert_eq!(classify(&7), "");
/// ```
pub struct FunctionLift<M> {
    inner: Arc<M>,
}

impl<M> FunctionLift<M> {
    pub fn new(inner: M) -> Self {
        Self { inner: Arc::new(inner) }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Wrap a closure as a [`SharedFn`] this lift can merge.
    pub fn lift<A, B, F>(&self, f: F) -> SharedFn<A, B>
    where
        F: Fn(&A) -> B + Send + Sync + 'static,
    {
        shared_fn(f)
    }

    /// Merge many functions into one; `None` if `fns` is empty.
    ///
    /// The result calls every function in order and merges the outputs in
    /// pairwise rounds. Unlike repeated [`MergeOp::merge`], its call depth does
    /// not grow with the number of functions.
    pub fn combine_all<A, B>(&self, fns: Vec<SharedFn<A, B>>) -> Option<SharedFn<A, B>>
    where
        A: 'static,
        B: 'static,
        M: MergeOp<B> + 'static,
    {
        let mut fns = fns.into_iter();
        let head = fns.next()?;
        let tail: Vec<SharedFn<A, B>> = fns.collect();
        if tail.is_empty() {
            return Some(head);
        }
        let op = Arc::clone(&self.inner);
        let combined: SharedFn<A, B> = Arc::new(move |a: &A| {
            let first = head(a);
            let rest: Vec<B> = tail.iter().map(|f| f(a)).collect();
            match fold_pairwise(rest, &*op) {
                Some(rest) => op.merge(first, rest),
                None => first,
            }
        });
        Some(combined)
    }
}

impl<M> Clone for FunctionLift<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for FunctionLift<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionLift").field("inner", &self.inner).finish()
    }
}

impl<A, B, M> MergeOp<SharedFn<A, B>> for FunctionLift<M>
where
    A: 'static,
    B: 'static,
    M: MergeOp<B> + 'static,
{
    fn merge(&self, left: SharedFn<A, B>, right: SharedFn<A, B>) -> SharedFn<A, B> {
        let op = Arc::clone(&self.inner);
        Arc::new(move |a: &A| op.merge(left(a), right(a)))
    }
}

impl<A, B, M> IdentityElement<SharedFn<A, B>> for FunctionLift<M>
where
    A: 'static,
    B: 'static,
    M: IdentityElement<B> + 'static,
{
    fn identity(&self) -> SharedFn<A, B> {
        let op = Arc::clone(&self.inner);
        Arc::new(move |_: &A| op.identity())
    }
}
