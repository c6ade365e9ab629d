//! Statistical summaries: `Mean` / `MeanOp`.

use crate::algebra::{IdentityElement, MergeOp};
use serde::{Deserialize, Serialize};

/// Count and running total of a set of observations.
///
/// Averages do not merge; this summary does. Merge summaries first and call
/// [`Mean::average`] once at the end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mean {
    pub count: u64,
    pub total: f64,
}

impl Mean {
    /// Summary of a single observation.
    #[must_use]
    pub const fn of(value: f64) -> Self {
        Self { count: 1, total: value }
    }

    /// `total / count`, or `None` for an empty summary.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total / self.count as f64)
    }
}

/// Field-wise sum of [`Mean`] summaries, identity `{0, 0.0}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeanOp;

impl MergeOp<Mean> for MeanOp {
    #[inline]
    fn merge(&self, left: Mean, right: Mean) -> Mean {
        Mean {
            count: left.count + right.count,
            total: left.total + right.total,
        }
    }
}

impl IdentityElement<Mean> for MeanOp {
    fn identity(&self) -> Mean {
        Mean::default()
    }
}
