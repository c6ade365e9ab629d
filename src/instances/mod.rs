//! Built-in [`MergeOp`] / [`IdentityElement`] instances.
//!
//! These are ready-made registrations for common value types. None of them
//! are special to the engine; anything here could equally be written by a
//! caller with [`crate::algebra::merge_fn`] and [`crate::algebra::with_identity`].
//!
//! - [`Sum<T>`] / [`Times<T>`] -- addition and multiplication.
//! - [`Min<T>`] / [`Max<T>`] -- running extremes, identities from [`Bounded`].
//! - [`And`] / [`Or`] -- boolean conjunction and disjunction.
//! - [`Concat`] / [`Append<T>`] -- string and list concatenation (order-sensitive).
//! - [`First<T>`] / [`Last<T>`] -- leftmost or rightmost value (no identity).
//! - [`Union<T>`] / [`TopK<T>`] -- set union and bounded top-K lists.
//! - [`MeanOp`] -- the `{count, total}` summary behind averages.
//!
//! # Examples
//! ```
//! use ironfold::instances::{And, Sum};
//! use ironfold::reduce_or_identity;
//!
//! assert_eq!(reduce_or_identity(vec![1, 2, 3, 4], &Sum::<i32>::new()), 10);
//! assert!(reduce_or_identity(Vec::<bool>::new(), &And));
//! ```
//!
//! [`MergeOp`]: crate::algebra::MergeOp
//! [`IdentityElement`]: crate::algebra::IdentityElement

mod logical;
mod numeric;
mod sequence;
mod sets;
mod statistical;

pub use logical::{And, Or};
pub use numeric::{Bounded, Max, Min, One, Sum, Times};
pub use sequence::{Append, Concat, First, Last};
pub use sets::{TopK, Union};
pub use statistical::{Mean, MeanOp};
