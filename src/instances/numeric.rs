//! Numeric instances: `Sum`, `Times`, `Min`, `Max`.

use crate::algebra::{IdentityElement, MergeOp};
use ordered_float::OrderedFloat;
use std::marker::PhantomData;
use std::ops::{Add, Mul};

/// Neutral element for multiplication.
pub trait One {
    fn one() -> Self;
}

/// The extreme representable values of a type.
///
/// These are the identities of [`Min`] (`max_bound`) and [`Max`]
/// (`min_bound`). For integers they are `T::MAX` / `T::MIN`; for floats they
/// are `±infinity`.
///
/// An input equal to the bound is indistinguishable from "no input". Reach for
/// [`crate::derive::OptionalLift`] over `Min`/`Max` when that matters.
pub trait Bounded {
    fn min_bound() -> Self;
    fn max_bound() -> Self;
}

macro_rules! impl_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl One for $t {
                #[inline]
                fn one() -> Self { 1 }
            }

            impl Bounded for $t {
                #[inline]
                fn min_bound() -> Self { <$t>::MIN }
                #[inline]
                fn max_bound() -> Self { <$t>::MAX }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl One for $t {
                #[inline]
                fn one() -> Self { 1.0 }
            }

            impl Bounded for $t {
                #[inline]
                fn min_bound() -> Self { <$t>::NEG_INFINITY }
                #[inline]
                fn max_bound() -> Self { <$t>::INFINITY }
            }

            impl Bounded for OrderedFloat<$t> {
                #[inline]
                fn min_bound() -> Self { OrderedFloat(<$t>::NEG_INFINITY) }
                #[inline]
                fn max_bound() -> Self { OrderedFloat(<$t>::INFINITY) }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

/* ===================== Sum<T> ===================== */

/// Addition, with `T::default()` (zero) as identity.
///
/// Integer overflow follows the usual `+` semantics of the build profile.
/// Floating-point addition is only approximately associative.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum<T>(pub PhantomData<T>);
impl<T> Sum<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> MergeOp<T> for Sum<T>
where
    T: Add<Output = T> + Send + Sync,
{
    #[inline]
    fn merge(&self, left: T, right: T) -> T {
        left + right
    }
}

impl<T> IdentityElement<T> for Sum<T>
where
    T: Add<Output = T> + Default + Send + Sync,
{
    fn identity(&self) -> T {
        T::default()
    }
}

/* ===================== Times<T> ===================== */

/// Multiplication, with one as identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Times<T>(pub PhantomData<T>);
impl<T> Times<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> MergeOp<T> for Times<T>
where
    T: Mul<Output = T> + Send + Sync,
{
    #[inline]
    fn merge(&self, left: T, right: T) -> T {
        left * right
    }
}

impl<T> IdentityElement<T> for Times<T>
where
    T: Mul<Output = T> + One + Send + Sync,
{
    fn identity(&self) -> T {
        T::one()
    }
}

/* ===================== Min<T> ===================== */

/// Running minimum. Ties keep the left operand.
///
/// Identity is [`Bounded::max_bound`]. `NaN` is not ordered, so float inputs
/// containing `NaN` make the operation non-associative; wrap them in
/// [`OrderedFloat`] to get a total order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Min<T>(pub PhantomData<T>);
impl<T> Min<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> MergeOp<T> for Min<T>
where
    T: PartialOrd + Send + Sync,
{
    #[inline]
    fn merge(&self, left: T, right: T) -> T {
        if right < left { right } else { left }
    }
}

impl<T> IdentityElement<T> for Min<T>
where
    T: PartialOrd + Bounded + Send + Sync,
{
    fn identity(&self) -> T {
        T::max_bound()
    }
}

/* ===================== Max<T> ===================== */

/// Running maximum. Ties keep the left operand.
///
/// Identity is [`Bounded::min_bound`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Max<T>(pub PhantomData<T>);
impl<T> Max<T> {
    /// Convenience constructor (same as `Default`).
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> MergeOp<T> for Max<T>
where
    T: PartialOrd + Send + Sync,
{
    #[inline]
    fn merge(&self, left: T, right: T) -> T {
        if right > left { right } else { left }
    }
}

impl<T> IdentityElement<T> for Max<T>
where
    T: PartialOrd + Bounded + Send + Sync,
{
    fn identity(&self) -> T {
        T::min_bound()
    }
}
