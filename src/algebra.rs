//! The merge contracts: [`MergeOp`] and [`IdentityElement`].
//!
//! A [`MergeOp<T>`] is a single binary operation `merge(left, right) -> T` on a
//! fixed value type. On its own it is the weaker (semigroup) capability and can
//! only reduce non-empty inputs. An [`IdentityElement<T>`] adds a neutral
//! value on top of the same operation (monoid), which makes empty inputs
//! reducible as well.
//!
//! # Implementer obligations
//!
//! Implementations **must** be associative:
//!
//! ```text
//! merge(merge(a, b), c) == merge(a, merge(b, c))
//! ```
//!
//! and, where an identity is provided, `merge(identity(), x) == x == merge(x, identity())`.
//! Neither law is checked at runtime. An operation that breaks them still
//! compiles and still reduces, but different groupings (partition counts,
//! fanouts, machines) will produce different answers. Use
//! [`crate::testing::laws`] to check an instance in tests.
//!
//! Binary operations that are not associative or not closed over the type must
//! not be exposed through this trait even though they look mergeable:
//! subtraction, division, and "average of two averages" are the usual offenders.
//!
//! Instances are ordinary values passed explicitly to the reducer and to the
//! derivation combinators in [`crate::derive`]; there is no registry.
//!
//! # Examples
//! ```
//! use ironfold::algebra::{merge_fn, with_identity, IdentityElement, MergeOp};
//!
//! let longest = merge_fn(|a: String, b: String| if b.len() > a.len() { b } else { a });
//! assert_eq!(longest.merge("ab".into(), "abc".into()), "abc");
//!
//! let longest = with_identity(longest, String::new());
//! assert_eq!(longest.merge(longest.identity(), "x".into()), "x");
//! ```

use std::fmt;
use std::sync::Arc;

/// An associative binary operation over `T`.
///
/// `Send + Sync` is required so a single instance can be shared by every
/// parallel branch of a reduction.
pub trait MergeOp<T>: Send + Sync {
    /// Combine two values into one. Must be associative.
    fn merge(&self, left: T, right: T) -> T;
}

/// A [`MergeOp`] that also has a neutral element.
pub trait IdentityElement<T>: MergeOp<T> {
    /// The neutral value: merging it with any `x` on either side yields `x`.
    fn identity(&self) -> T;
}

impl<T, M: MergeOp<T> + ?Sized> MergeOp<T> for &M {
    #[inline]
    fn merge(&self, left: T, right: T) -> T {
        (**self).merge(left, right)
    }
}

impl<T, M: IdentityElement<T> + ?Sized> IdentityElement<T> for &M {
    #[inline]
    fn identity(&self) -> T {
        (**self).identity()
    }
}

impl<T, M: MergeOp<T> + ?Sized> MergeOp<T> for Box<M> {
    #[inline]
    fn merge(&self, left: T, right: T) -> T {
        (**self).merge(left, right)
    }
}

impl<T, M: IdentityElement<T> + ?Sized> IdentityElement<T> for Box<M> {
    #[inline]
    fn identity(&self) -> T {
        (**self).identity()
    }
}

impl<T, M: MergeOp<T> + ?Sized> MergeOp<T> for Arc<M> {
    #[inline]
    fn merge(&self, left: T, right: T) -> T {
        (**self).merge(left, right)
    }
}

impl<T, M: IdentityElement<T> + ?Sized> IdentityElement<T> for Arc<M> {
    #[inline]
    fn identity(&self) -> T {
        (**self).identity()
    }
}

/* ===================== FnMerge ===================== */

/// A semigroup backed by a closure. Built with [`merge_fn`].
#[derive(Clone, Copy)]
pub struct FnMerge<F>(F);

impl<F> fmt::Debug for FnMerge<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnMerge(..)")
    }
}

impl<T, F> MergeOp<T> for FnMerge<F>
where
    F: Fn(T, T) -> T + Send + Sync,
{
    #[inline]
    fn merge(&self, left: T, right: T) -> T {
        (self.0)(left, right)
    }
}

/// Register a closure as a [`MergeOp`].
///
/// The closure is trusted to be associative.
pub fn merge_fn<T, F>(f: F) -> FnMerge<F>
where
    F: Fn(T, T) -> T + Send + Sync,
{
    FnMerge(f)
}

/* ===================== WithIdentity ===================== */

/// Any [`MergeOp`] paired with an explicit identity value. Built with [`with_identity`].
#[derive(Clone, Debug)]
pub struct WithIdentity<M, T> {
    op: M,
    identity: T,
}

impl<M, T> WithIdentity<M, T> {
    /// The wrapped operation.
    pub fn inner(&self) -> &M {
        &self.op
    }
}

impl<M, T> MergeOp<T> for WithIdentity<M, T>
where
    M: MergeOp<T>,
    T: Send + Sync,
{
    #[inline]
    fn merge(&self, left: T, right: T) -> T {
        self.op.merge(left, right)
    }
}

impl<M, T> IdentityElement<T> for WithIdentity<M, T>
where
    M: MergeOp<T>,
    T: Clone + Send + Sync,
{
    fn identity(&self) -> T {
        self.identity.clone()
    }
}

/// Upgrade a semigroup to a monoid by supplying its neutral value.
///
/// The caller guarantees that `identity` really is neutral for `op`.
pub fn with_identity<M, T>(op: M, identity: T) -> WithIdentity<M, T>
where
    M: MergeOp<T>,
{
    WithIdentity { op, identity }
}
