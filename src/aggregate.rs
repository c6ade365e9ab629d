//! Partial aggregation: project raw records into small mergeable summaries,
//! reduce them, and merge already-reduced summaries again later.
//!
//! The key property is incrementality. For any split of the raw records into
//! `g1` and `g2`:
//!
//! ```text
//! summarize(g1 ++ g2) == merge_rollups(summarize(g1), summarize(g2))
//! ```
//!
//! so summaries computed on separate workers, or yesterday, combine into the
//! summary of the whole without touching the raw records again.
//!
//! Derived read-outs such as an average are *not* mergeable. They are taken
//! exactly once, from the final [`Rollup`], through [`Rollup::finish`].
//!
//! # Examples
//! ```
//! use ironfold::aggregate::PartialAggregator;
//! use ironfold::instances::{Mean, MeanOp};
//!
//! struct Visit { minutes: f64 }
//!
//! let agg = PartialAggregator::new(|v: &Visit| Mean::of(v.minutes), MeanOp);
//! let monday = agg.summarize_or_identity(&[Visit { minutes: 10.0 }, Visit { minutes: 20.0 }]);
//! let tuesday = agg.summarize_or_identity(&[Visit { minutes: 60.0 }]);
//!
//! let week = agg.merge_rollups(monday, tuesday);
//! assert_eq!(week.records(), 3);
//! assert_eq!(week.finish(|m| m.average()), Some(30.0));
//! ```

use crate::algebra::{IdentityElement, MergeOp};
use crate::error::{MergeError, Result};
use crate::reducer::Reducer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use tracing::debug;

/// A reduced summary and the number of raw records it covers.
///
/// Rollups are only ever combined through their [`RollupOp`]; merging
/// consumes both inputs and produces a new rollup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rollup<S> {
    summary: S,
    records: u64,
}

impl<S> Rollup<S> {
    /// Rebuild a rollup from parts, e.g. a partial result received from another worker.
    pub const fn from_parts(summary: S, records: u64) -> Self {
        Self { summary, records }
    }

    pub const fn summary(&self) -> &S {
        &self.summary
    }

    pub const fn records(&self) -> u64 {
        self.records
    }

    pub fn into_parts(self) -> (S, u64) {
        (self.summary, self.records)
    }

    /// The final, non-mergeable read-out of a completed summary.
    pub fn finish<O>(self, extract: impl FnOnce(S) -> O) -> O {
        extract(self.summary)
    }
}

/// Lifts a summary operation to [`Rollup`]s, adding record counts.
#[derive(Clone, Copy, Debug, Default)]
pub struct RollupOp<M>(pub M);

impl<S, M: MergeOp<S>> MergeOp<Rollup<S>> for RollupOp<M> {
    fn merge(&self, left: Rollup<S>, right: Rollup<S>) -> Rollup<S> {
        Rollup {
            summary: self.0.merge(left.summary, right.summary),
            records: left.records + right.records,
        }
    }
}

impl<S, M: IdentityElement<S>> IdentityElement<Rollup<S>> for RollupOp<M> {
    fn identity(&self) -> Rollup<S> {
        Rollup {
            summary: self.0.identity(),
            records: 0,
        }
    }
}

/// Projection plus summary operation, reduced with a [`Reducer`].
pub struct PartialAggregator<P, M> {
    project: P,
    op: RollupOp<M>,
    reducer: Reducer,
}

impl<P, M: fmt::Debug> fmt::Debug for PartialAggregator<P, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialAggregator")
            .field("op", &self.op)
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

impl<P, M> PartialAggregator<P, M> {
    /// Aggregator using the default parallel [`Reducer`].
    pub fn new(project: P, op: M) -> Self {
        Self {
            project,
            op: RollupOp(op),
            reducer: Reducer::default(),
        }
    }

    #[must_use]
    pub fn with_reducer(mut self, reducer: Reducer) -> Self {
        self.reducer = reducer;
        self
    }

    /// The summary operation.
    pub const fn op(&self) -> &M {
        &self.op.0
    }

    pub const fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// Apply the projection to one record.
    pub fn project<R, S>(&self, record: &R) -> S
    where
        P: Fn(&R) -> S,
    {
        (self.project)(record)
    }

    fn leaves<R, S>(&self, records: &[R]) -> Vec<Rollup<S>>
    where
        P: Fn(&R) -> S + Sync,
        R: Sync,
        S: Send,
    {
        let project = &self.project;
        let leaf = |r: &R| Rollup::from_parts(project(r), 1);
        if self.reducer.is_parallel() {
            self.reducer
                .install(|| records.par_iter().map(leaf).collect())
        } else {
            records.iter().map(leaf).collect()
        }
    }

    /// Project and reduce a non-empty batch of records.
    ///
    /// # Errors
    /// [`MergeError::EmptyInputWithoutIdentity`] if `records` is empty.
    pub fn summarize<R, S>(&self, records: &[R]) -> Result<Rollup<S>>
    where
        P: Fn(&R) -> S + Sync,
        R: Sync,
        S: Send,
        M: MergeOp<S>,
    {
        debug!(records = records.len(), "summarize");
        self.reducer.reduce(self.leaves(records), &self.op)
    }

    /// Project and reduce a batch of any size; empty input yields the identity summary.
    pub fn summarize_or_identity<R, S>(&self, records: &[R]) -> Rollup<S>
    where
        P: Fn(&R) -> S + Sync,
        R: Sync,
        S: Send,
        M: IdentityElement<S>,
    {
        debug!(records = records.len(), "summarize");
        self.reducer
            .reduce_or_identity(self.leaves(records), &self.op)
    }

    /// Like [`PartialAggregator::summarize_or_identity`] for a fallible projection.
    ///
    /// Fails as a whole on the first projection error; no partial summary is
    /// returned.
    ///
    /// # Errors
    /// [`MergeError::Projection`] carrying the first error observed.
    pub fn try_summarize<R, S, E>(&self, records: &[R]) -> Result<Rollup<S>>
    where
        P: Fn(&R) -> std::result::Result<S, E> + Sync,
        R: Sync,
        S: Send,
        E: Display,
        M: IdentityElement<S>,
    {
        debug!(records = records.len(), "try_summarize");
        let project = &self.project;
        let leaf = |r: &R| {
            project(r)
                .map(|s| Rollup::from_parts(s, 1))
                .map_err(|e| MergeError::Projection(e.to_string()))
        };
        let leaves: Vec<Rollup<S>> = if self.reducer.is_parallel() {
            self.reducer
                .install(|| records.par_iter().map(leaf).collect::<Result<_>>())?
        } else {
            records.iter().map(leaf).collect::<Result<_>>()?
        };
        Ok(self.reducer.reduce_or_identity(leaves, &self.op))
    }

    /// Merge previously computed rollups (rollup of rollups).
    ///
    /// # Errors
    /// [`MergeError::EmptyInputWithoutIdentity`] if `rollups` is empty.
    pub fn rollup<S>(&self, rollups: Vec<Rollup<S>>) -> Result<Rollup<S>>
    where
        S: Send,
        M: MergeOp<S>,
    {
        debug!(rollups = rollups.len(), "rollup");
        self.reducer.reduce(rollups, &self.op)
    }

    /// Merge previously computed rollups; empty input yields the identity summary.
    pub fn rollup_or_identity<S>(&self, rollups: Vec<Rollup<S>>) -> Rollup<S>
    where
        S: Send,
        M: IdentityElement<S>,
    {
        debug!(rollups = rollups.len(), "rollup");
        self.reducer.reduce_or_identity(rollups, &self.op)
    }

    /// Merge two rollups.
    pub fn merge_rollups<S>(&self, left: Rollup<S>, right: Rollup<S>) -> Rollup<S>
    where
        M: MergeOp<S>,
    {
        self.op.merge(left, right)
    }
}
