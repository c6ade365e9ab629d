//! # Ironfold
//!
//! A **generic associative-merge engine** for Rust. Ironfold lets you declare
//! how two values of a type combine, derives combination rules for richer
//! types from simpler ones, and reduces large collections in parallel
//! without depending on how the work is split.
//!
//! ## Key Features
//!
//! - **Capability traits** - [`MergeOp`] (semigroup) and [`IdentityElement`] (monoid)
//! - **Explicit instances** - operations are values you pass, never looked up globally
//! - **Derivation combinators** - lift to `Option<T>`, functions, tuples and records
//! - **Parallel tree reduction** - partitioned local folds plus order-preserving combine rounds
//! - **Partial aggregation** - project records into summaries, merge summaries of summaries
//! - **Law checks** - associativity and identity assertions for your own instances
//! - **Configurable** - sequential or parallel, thread count, partitions, fanout
//!
//! ## Quick Start
//!
//! ```
//! use ironfold::*;
//! use ironfold::instances::{Max, Sum};
//!
//! # fn main() -> Result<()> {
//! // Sum over a non-empty input
//! assert_eq!(reduce(vec![1, 2, 3, 4], &Sum::<i32>::new())?, 10);
//!
//! // Empty input needs an identity
//! assert_eq!(reduce_or_identity(Vec::<u64>::new(), &Sum::new()), 0);
//! assert!(reduce(Vec::<u64>::new(), &Max::<u64>::new()).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Merge operations
//!
//! A [`MergeOp<T>`] is a binary `merge(left, right) -> T` that must be
//! associative. An [`IdentityElement<T>`] additionally supplies a neutral
//! value. Associativity is the implementer's obligation; use
//! [`testing::assert_associative`] in your tests to check it.
//!
//! Subtraction, division and "average of two" are **not** associative and
//! must not be registered. Averages are computed from a mergeable
//! `{count, total}` summary ([`instances::Mean`]) and divided once at the end.
//!
//! ### Derivation
//!
//! The [`derive`] module builds new instances from existing ones:
//! - [`OptionalLift`](derive::OptionalLift) - `None` as identity, gives any semigroup an identity
//! - [`FunctionLift`](derive::FunctionLift) - merge functions pointwise
//! - [`product2`](derive::product2)..[`product5`](derive::product5) - merge tuples field by field
//! - [`RecordLift`](derive::RecordLift) / [`Fieldwise`](derive::Fieldwise) - structs and runtime records
//!
//! ```
//! use ironfold::derive::{OptionalLift, product2};
//! use ironfold::instances::{Max, Min};
//! use ironfold::reduce_or_identity;
//!
//! let range = OptionalLift::new(product2(Min::new(), Max::new()));
//! let readings = vec![Some((4, 4)), None, Some((9, 9)), Some((1, 1))];
//! assert_eq!(reduce_or_identity(readings, &range), Some((1, 9)));
//! ```
//!
//! ### Reduction
//!
//! A [`Reducer`] splits its input into contiguous partitions, folds each on
//! the rayon pool and merges the partial results in rounds of at most
//! `fanout` adjacent values. Item order is always preserved, so
//! non-commutative operations such as concatenation are safe.
//!
//! ```
//! use ironfold::*;
//! use ironfold::instances::Concat;
//!
//! # fn main() -> Result<()> {
//! let reducer = Reducer::new(ExecMode::Parallel { threads: Some(2), partitions: Some(3) })?;
//! let words = ["a", "b", "c", "d"].map(String::from).to_vec();
//! assert_eq!(reducer.reduce(words, &Concat)?, "abcd");
//! # Ok(())
//! # }
//! ```
//!
//! ### Partial aggregation
//!
//! A [`PartialAggregator`] projects raw records into summaries and reduces
//! them into a [`Rollup`]. Rollups from separate batches merge into the
//! rollup of the combined batch, and the final read-out is taken once with
//! [`Rollup::finish`].
//!
//! ## Configuration
//!
//! [`ReduceConfig`] carries the reducer settings and loads from JSON, a file
//! or `IRONFOLD_*` environment variables:
//!
//! ```
//! use ironfold::{ReduceConfig, Reducer};
//!
//! # fn main() -> ironfold::Result<()> {
//! let cfg = ReduceConfig::from_json_str(r#"{ "mode": "sequential" }"#)?;
//! let reducer = Reducer::from_config(&cfg)?;
//! # let _ = reducer;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `metrics` (default) - attach a [`metrics::MetricsCollector`] to a reducer
//!
//! ## Module Overview
//!
//! - [`algebra`] - the capability traits and closure-backed instances
//! - [`instances`] - built-in instances for numbers, booleans, strings, lists and sets
//! - [`derive`] - derivation combinators
//! - [`reducer`] - the parallel reducer and explicit tree shapes
//! - [`aggregate`] - projection-based partial aggregation
//! - [`config`] - serializable reducer settings
//! - [`testing`] - law checks and test data builders

pub mod aggregate;
pub mod algebra;
pub mod config;
pub mod derive;
pub mod error;
pub mod instances;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod reducer;
pub mod testing;
pub mod utils;

// General re-exports
pub use aggregate::{PartialAggregator, Rollup, RollupOp};
pub use algebra::{FnMerge, IdentityElement, MergeOp, WithIdentity, merge_fn, with_identity};
pub use config::ReduceConfig;
pub use error::{MergeError, Result};
pub use reducer::{ExecMode, Grouping, Reducer, reduce, reduce_grouped, reduce_or_identity, reduce_with};
