//! The reducer: collapse a sequence into one value with a [`MergeOp`].
//!
//! Associativity means every parenthesization of `x1 ⊕ x2 ⊕ … ⊕ xn` gives the
//! same answer, so the reducer is free to pick one that runs well in parallel:
//!
//! 1. split the input into contiguous partitions,
//! 2. fold each partition locally on the rayon pool,
//! 3. merge the partial results in rounds of at most `fanout` adjacent values
//!    until one remains (a balanced tree for the default fanout of 2).
//!
//! All merges in a round are independent; each round is a join barrier. Items
//! are never reordered, so non-commutative operations such as concatenation
//! reduce correctly. If the operation is *not* associative, different
//! partition counts or fanouts give different answers; that is a defect of
//! the operation, not of the reducer.
//!
//! # Examples
//! ```
//! use ironfold::instances::Sum;
//! use ironfold::{reduce, reduce_or_identity, reduce_with, MergeError, Reducer};
//!
//! assert_eq!(reduce(vec![1, 2, 3, 4], &Sum::<i32>::new())?, 10);
//! assert_eq!(reduce_or_identity(Vec::<i32>::new(), &Sum::new()), 0);
//! assert!(matches!(
//!     reduce(Vec::<i32>::new(), &Sum::new()),
//!     Err(MergeError::EmptyInputWithoutIdentity)
//! ));
//! assert_eq!(reduce_with(vec![], &Sum::<i32>::new(), Some(0))?, 0);
//!
//! let sequential = Reducer::sequential();
//! assert_eq!(sequential.reduce((1..=100).collect(), &Sum::<u64>::new())?, 5050);
//! # Ok::<_, MergeError>(())
//! ```

use crate::algebra::{IdentityElement, MergeOp};
use crate::config::{DEFAULT_FANOUT, ReduceConfig};
use crate::error::{MergeError, Result};
use crate::utils::{chunks_of, split_contiguous};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, trace};

#[cfg(feature = "metrics")]
use crate::metrics::MetricsCollector;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    /// Pairwise merge rounds on the calling thread.
    Sequential,
    /// Partitioned local folds followed by parallel combine rounds.
    ///
    /// `threads` builds a dedicated pool; `None` uses the global rayon pool.
    /// `partitions` defaults to `2 * num_cpus`.
    Parallel {
        threads: Option<usize>,
        partitions: Option<usize>,
    },
}

/// An explicit combination-tree shape for [`reduce_grouped`].
///
/// Every shape keeps the original item order; for an associative operation
/// they all produce the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grouping {
    /// `((x1 ⊕ x2) ⊕ x3) ⊕ …`
    LeftFold,
    /// `… ⊕ (x(n-2) ⊕ (x(n-1) ⊕ xn))`
    RightFold,
    /// Recursive halving, both halves reduced concurrently via `rayon::join`.
    Balanced,
    /// Fold consecutive chunks of `size` items, then fold the chunk results.
    Chunked { size: usize },
    /// Merge rounds of at most `width` adjacent values until one remains.
    Fanout { width: usize },
}

impl Grouping {
    /// A spread of distinct tree shapes, used by the law checks.
    #[must_use]
    pub const fn shapes() -> [Self; 6] {
        [
            Self::LeftFold,
            Self::RightFold,
            Self::Balanced,
            Self::Chunked { size: 2 },
            Self::Chunked { size: 3 },
            Self::Fanout { width: 3 },
        ]
    }
}

/// A configured reduction executor.
#[derive(Clone)]
pub struct Reducer {
    mode: ExecMode,
    fanout: usize,
    default_partitions: usize,
    pool: Option<Arc<rayon::ThreadPool>>,
    #[cfg(feature = "metrics")]
    metrics: Option<MetricsCollector>,
}

impl std::fmt::Debug for Reducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reducer")
            .field("mode", &self.mode)
            .field("fanout", &self.fanout)
            .field("default_partitions", &self.default_partitions)
            .field("dedicated_pool", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Reducer {
    fn default() -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads: None,
                partitions: None,
            },
            fanout: DEFAULT_FANOUT,
            default_partitions: 2 * num_cpus::get().max(2),
            pool: None,
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }
}

impl Reducer {
    /// Build a reducer for `mode`, creating a dedicated pool if `threads` is set.
    ///
    /// # Errors
    /// [`MergeError::InvalidConfig`] for zero threads or partitions,
    /// [`MergeError::ThreadPool`] if the pool cannot be built.
    pub fn new(mode: ExecMode) -> Result<Self> {
        let mut reducer = Self {
            mode,
            ..Self::default()
        };
        if let ExecMode::Parallel { threads, partitions } = mode {
            if threads == Some(0) || partitions == Some(0) {
                return Err(MergeError::InvalidConfig(
                    "threads and partitions must be at least 1".into(),
                ));
            }
            if let Some(t) = threads {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(t).build()?;
                reducer.pool = Some(Arc::new(pool));
            }
        }
        Ok(reducer)
    }

    /// A reducer that never leaves the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            mode: ExecMode::Sequential,
            ..Self::default()
        }
    }

    /// # Errors
    /// As [`ReduceConfig::validate`] and [`Reducer::new`].
    pub fn from_config(cfg: &ReduceConfig) -> Result<Self> {
        cfg.validate()?;
        Self::new(cfg.exec_mode())?.with_fanout(cfg.fanout)
    }

    /// # Errors
    /// [`MergeError::InvalidConfig`] if `fanout < 2`.
    pub fn with_fanout(mut self, fanout: usize) -> Result<Self> {
        if fanout < 2 {
            return Err(MergeError::InvalidConfig(format!(
                "fanout must be at least 2, got {fanout}"
            )));
        }
        self.fanout = fanout;
        Ok(self)
    }

    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[cfg(feature = "metrics")]
    pub fn metrics(&self) -> Option<&MetricsCollector> {
        self.metrics.as_ref()
    }

    pub const fn mode(&self) -> ExecMode {
        self.mode
    }

    pub const fn fanout(&self) -> usize {
        self.fanout
    }

    pub(crate) const fn is_parallel(&self) -> bool {
        matches!(self.mode, ExecMode::Parallel { .. })
    }

    /// Run `f` inside this reducer's dedicated pool, if it has one.
    pub(crate) fn install<R: Send>(&self, f: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }

    /// Reduce a non-empty sequence.
    ///
    /// # Errors
    /// [`MergeError::EmptyInputWithoutIdentity`] if `items` is empty.
    pub fn reduce<T, M>(&self, items: Vec<T>, op: &M) -> Result<T>
    where
        T: Send,
        M: MergeOp<T> + ?Sized,
    {
        self.run(items, op).ok_or(MergeError::EmptyInputWithoutIdentity)
    }

    /// Reduce a sequence of any length; empty input yields `op.identity()`.
    pub fn reduce_or_identity<T, M>(&self, items: Vec<T>, op: &M) -> T
    where
        T: Send,
        M: IdentityElement<T> + ?Sized,
    {
        self.run(items, op).unwrap_or_else(|| op.identity())
    }

    /// Reduce with an optionally supplied identity value.
    ///
    /// With `Some(id)`, empty input returns `id` and non-empty input ignores
    /// it. With `None`, empty input is an error.
    ///
    /// # Errors
    /// [`MergeError::EmptyInputWithoutIdentity`] if `items` is empty and
    /// `identity` is `None`.
    pub fn reduce_with<T, M>(&self, items: Vec<T>, op: &M, identity: Option<T>) -> Result<T>
    where
        T: Send,
        M: MergeOp<T> + ?Sized,
    {
        self.run(items, op)
            .or(identity)
            .ok_or(MergeError::EmptyInputWithoutIdentity)
    }

    fn run<T, M>(&self, items: Vec<T>, op: &M) -> Option<T>
    where
        T: Send,
        M: MergeOp<T> + ?Sized,
    {
        let n = items.len();
        debug!(items = n, mode = ?self.mode, fanout = self.fanout, "reduce start");
        self.record_start();

        let (out, partitions, levels) = match self.mode {
            _ if n == 0 => (None, 0, 0),
            ExecMode::Sequential => (fold_pairwise(items, op), 1, 1),
            ExecMode::Parallel { partitions, .. } => {
                let parts = partitions.unwrap_or(self.default_partitions).clamp(1, n);
                let fanout = self.fanout;
                let (out, rounds) = self.install(|| {
                    let locals: Vec<T> = split_contiguous(items, parts)
                        .into_par_iter()
                        .map(|chunk| fold_pairwise(chunk, op))
                        .collect::<Vec<Option<T>>>()
                        .into_iter()
                        .flatten()
                        .collect();
                    combine_rounds(locals, op, fanout)
                });
                (out, parts, 1 + rounds)
            }
        };

        debug!(
            items = n,
            merges = n.saturating_sub(1),
            partitions,
            levels,
            "reduce done"
        );
        self.record_done(n, partitions, levels);
        out
    }

    #[cfg(feature = "metrics")]
    fn record_start(&self) {
        if let Some(m) = &self.metrics {
            m.record_start();
        }
    }

    #[cfg(feature = "metrics")]
    #[allow(clippy::cast_precision_loss)]
    fn record_done(&self, items: usize, partitions: usize, levels: usize) {
        let Some(m) = &self.metrics else { return };
        m.record_end();
        m.increment_counter("reduce_calls", 1);
        m.increment_counter("items_reduced", items as u64);
        m.increment_counter("merges", items.saturating_sub(1) as u64);
        m.increment_counter("partitions", partitions as u64);
        if items == 0 {
            m.increment_counter("empty_inputs", 1);
        }
        m.set_gauge("combine_levels", levels as f64);
    }

    #[cfg(not(feature = "metrics"))]
    fn record_start(&self) {}

    #[cfg(not(feature = "metrics"))]
    fn record_done(&self, _items: usize, _partitions: usize, _levels: usize) {}
}

/// Sequential left fold; `None` for empty input.
fn fold_left<T, M: MergeOp<T> + ?Sized>(items: Vec<T>, op: &M) -> Option<T> {
    let mut it = items.into_iter();
    let first = it.next()?;
    Some(it.fold(first, |acc, x| op.merge(acc, x)))
}

/// Merge adjacent pairs round by round on the current thread; `None` for
/// empty input. The resulting tree is about `log2(n)` deep, so values that
/// nest on merge (such as lifted functions) stay shallow.
pub(crate) fn fold_pairwise<T, M: MergeOp<T> + ?Sized>(mut level: Vec<T>, op: &M) -> Option<T> {
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        let mut it = level.into_iter();
        while let Some(left) = it.next() {
            next.push(match it.next() {
                Some(right) => op.merge(left, right),
                None => left,
            });
        }
        level = next;
    }
    level.pop()
}

fn fold_right<T, M: MergeOp<T> + ?Sized>(items: Vec<T>, op: &M) -> Option<T> {
    let mut it = items.into_iter().rev();
    let last = it.next()?;
    Some(it.fold(last, |acc, x| op.merge(x, acc)))
}

/// Recursive halving; `None` for empty input.
fn balanced<T, M>(mut items: Vec<T>, op: &M) -> Option<T>
where
    T: Send,
    M: MergeOp<T> + ?Sized,
{
    if items.len() <= 1 {
        return items.pop();
    }
    let right = items.split_off(items.len() / 2);
    let (l, r) = rayon::join(|| balanced(items, op), || balanced(right, op));
    match (l, r) {
        (Some(l), Some(r)) => Some(op.merge(l, r)),
        (l, r) => l.or(r),
    }
}

/// Merge adjacent groups of `width` values per round until one is left.
/// Returns the value and the number of rounds taken.
fn combine_rounds<T, M>(mut level: Vec<T>, op: &M, width: usize) -> (Option<T>, usize)
where
    T: Send,
    M: MergeOp<T> + ?Sized,
{
    let width = width.max(2);
    let mut rounds = 0;
    while level.len() > 1 {
        trace!(round = rounds, values = level.len(), width, "combine round");
        level = chunks_of(level, width)
            .into_par_iter()
            .map(|group| fold_left(group, op))
            .collect::<Vec<Option<T>>>()
            .into_iter()
            .flatten()
            .collect();
        rounds += 1;
    }
    (level.pop(), rounds)
}

/* ===================== free functions ===================== */

/// Reduce a non-empty sequence with the default parallel [`Reducer`].
///
/// # Errors
/// [`MergeError::EmptyInputWithoutIdentity`] if `items` is empty.
pub fn reduce<T, M>(items: Vec<T>, op: &M) -> Result<T>
where
    T: Send,
    M: MergeOp<T> + ?Sized,
{
    Reducer::default().reduce(items, op)
}

/// Reduce a sequence of any length with the default parallel [`Reducer`].
pub fn reduce_or_identity<T, M>(items: Vec<T>, op: &M) -> T
where
    T: Send,
    M: IdentityElement<T> + ?Sized,
{
    Reducer::default().reduce_or_identity(items, op)
}

/// Reduce with an optional identity value using the default parallel [`Reducer`].
///
/// # Errors
/// [`MergeError::EmptyInputWithoutIdentity`] if `items` is empty and
/// `identity` is `None`.
pub fn reduce_with<T, M>(items: Vec<T>, op: &M, identity: Option<T>) -> Result<T>
where
    T: Send,
    M: MergeOp<T> + ?Sized,
{
    Reducer::default().reduce_with(items, op, identity)
}

/// Reduce using an explicit tree shape.
///
/// # Errors
/// [`MergeError::EmptyInputWithoutIdentity`] if `items` is empty.
pub fn reduce_grouped<T, M>(items: Vec<T>, op: &M, grouping: Grouping) -> Result<T>
where
    T: Send,
    M: MergeOp<T> + ?Sized,
{
    trace!(items = items.len(), ?grouping, "grouped reduce");
    let out = match grouping {
        Grouping::LeftFold => fold_left(items, op),
        Grouping::RightFold => fold_right(items, op),
        Grouping::Balanced => balanced(items, op),
        Grouping::Chunked { size } => {
            let partials = chunks_of(items, size)
                .into_iter()
                .filter_map(|chunk| fold_left(chunk, op))
                .collect();
            fold_left(partials, op)
        }
        Grouping::Fanout { width } => combine_rounds(items, op, width).0,
    };
    out.ok_or(MergeError::EmptyInputWithoutIdentity)
}
