//! Derivation combinators: new [`MergeOp`] / [`IdentityElement`] instances
//! built from existing ones, without writing new merge logic.
//!
//! - [`OptionalLift`] -- `Option<T>` from `T`, with `None` as identity.
//! - [`FunctionLift`] -- functions `A -> B` from `B`, merged pointwise.
//! - [`Product2`]..[`Product5`] -- tuples, one operation per field.
//! - [`RecordLift`] -- structs, via a tuple of their fields.
//! - [`Fieldwise`] -- runtime-arity records, arity checked at construction.
//!
//! Every combinator takes its inner instances as explicit constructor
//! arguments and composes recursively: an `OptionalLift<Product2<Min<_>, Max<_>>>`
//! needs nothing beyond the two field operations.
//!
//! # Examples
//! ```
//! use ironfold::derive::{product2, OptionalLift};
//! use ironfold::instances::{Max, Min};
//! use ironfold::reduce_or_identity;
//!
//! let range = OptionalLift::new(product2(Min::<i32>::new(), Max::<i32>::new()));
//! let leaves = |xs: Vec<i32>| xs.into_iter().map(|x| Some((x, x))).collect::<Vec<_>>();
//!
//! assert_eq!(reduce_or_identity(leaves(vec![3, 7]), &range), Some((3, 7)));
//! assert_eq!(reduce_or_identity(leaves(vec![]), &range), None);
//! ```
//!
//! [`MergeOp`]: crate::algebra::MergeOp
//! [`IdentityElement`]: crate::algebra::IdentityElement

mod fieldwise;
mod function;
mod optional;
mod product;

pub use fieldwise::{FieldRecord, Fieldwise};
pub use function::{FunctionLift, SharedFn, shared_fn};
pub use optional::OptionalLift;
pub use product::{
    Product2, Product3, Product4, Product5, RecordLift, product2, product3, product4, product5,
};
