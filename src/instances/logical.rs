//! Boolean instances: `And`, `Or`.

use crate::algebra::{IdentityElement, MergeOp};

/// Logical conjunction, identity `true`.
#[derive(Clone, Copy, Debug, Default)]
pub struct And;

impl MergeOp<bool> for And {
    #[inline]
    fn merge(&self, left: bool, right: bool) -> bool {
        left && right
    }
}

impl IdentityElement<bool> for And {
    fn identity(&self) -> bool {
        true
    }
}

/// Logical disjunction, identity `false`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Or;

impl MergeOp<bool> for Or {
    #[inline]
    fn merge(&self, left: bool, right: bool) -> bool {
        left || right
    }
}

impl IdentityElement<bool> for Or {
    fn identity(&self) -> bool {
        false
    }
}
