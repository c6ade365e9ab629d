//! Testing utilities for merge operations and reductions.
//!
//! Associativity and identity are obligations of whoever implements
//! [`MergeOp`](crate::MergeOp); nothing checks them at runtime. This module
//! gives instance authors the checks to put in their own test suites:
//!
//! - **Law checks**: associativity, left/right identity, grouping invariance
//!   across tree shapes, and rollup equivalence for partial aggregation
//! - **Test data builders**: assemble reduction inputs fluently
//! - **Float comparison**: the crate-root [`assert_approx_eq!`](crate::assert_approx_eq) macro
//!
//! # Quick Start
//!
//! ```
//! use ironfold::instances::{Append, Sum};
//! use ironfold::testing::*;
//!
//! let op = Sum::<i64>::new();
//! assert_associative(&op, &1, &-2, &3);
//! assert_identity_laws(&op, &7);
//!
//! let leaves = TestDataBuilder::<i32>::new().add_range(0..=20).map(|x: i32| vec![x]).build();
//! assert_grouping_invariant(&Append::new(), &leaves);
//! ```
//!
//! A non-associative operation fails the check:
//!
//! ```
//! use ironfold::merge_fn;
//! use ironfold::testing::is_associative_on;
//!
//! let minus = merge_fn(|a: i32, b: i32| a - b);
//! assert!(!is_associative_on(&minus, &10, &4, &3));
//! ```

mod approx;
pub mod builders;
pub mod laws;

pub use builders::*;
pub use laws::*;
