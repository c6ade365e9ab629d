//! Order-sensitive instances: `Concat`, `Append`, `First`, `Last`.
//!
//! None of these are commutative. The reducer never reorders its input, so
//! they are safe to reduce in parallel: partitions are contiguous and their
//! partial results are merged left to right.

use crate::algebra::{IdentityElement, MergeOp};
use std::marker::PhantomData;

/* ===================== Concat ===================== */

/// String concatenation, identity `""`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Concat;

impl MergeOp<String> for Concat {
    fn merge(&self, mut left: String, right: String) -> String {
        left.push_str(&right);
        left
    }
}

impl IdentityElement<String> for Concat {
    fn identity(&self) -> String {
        String::new()
    }
}

/* ===================== Append<T> ===================== */

/// List concatenation, identity `vec![]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Append<T>(pub PhantomData<T>);
impl<T> Append<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Send + Sync> MergeOp<Vec<T>> for Append<T> {
    fn merge(&self, mut left: Vec<T>, mut right: Vec<T>) -> Vec<T> {
        if left.is_empty() {
            return right;
        }
        left.append(&mut right);
        left
    }
}

impl<T: Send + Sync> IdentityElement<Vec<T>> for Append<T> {
    fn identity(&self) -> Vec<T> {
        Vec::new()
    }
}

/* ===================== First<T> / Last<T> ===================== */

/// Keeps the leftmost value. Has no identity; lift with
/// [`crate::derive::OptionalLift`] to get one.
#[derive(Clone, Copy, Debug, Default)]
pub struct First<T>(pub PhantomData<T>);
impl<T> First<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Send + Sync> MergeOp<T> for First<T> {
    #[inline]
    fn merge(&self, left: T, _right: T) -> T {
        left
    }
}

/// Keeps the rightmost value. Has no identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Last<T>(pub PhantomData<T>);
impl<T> Last<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Send + Sync> MergeOp<T> for Last<T> {
    #[inline]
    fn merge(&self, _left: T, right: T) -> T {
        right
    }
}
