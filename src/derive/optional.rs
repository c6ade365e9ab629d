//! `OptionalLift`: a monoid over `Option<T>` from any semigroup over `T`.

use crate::algebra::{IdentityElement, MergeOp};

/// Lifts a [`MergeOp<T>`] to `Option<T>`, with `None` as identity.
///
/// - `Some(a) ⊕ Some(b) = Some(inner.merge(a, b))`
/// - `Some(a) ⊕ None = Some(a)` and `None ⊕ Some(b) = Some(b)`
/// - `None ⊕ None = None`
///
/// This is how a type without a natural identity gets one, and how bounded
/// identities such as `i64::MAX` for a running minimum can be avoided.
///
/// # Examples
/// ```
/// use ironfold::derive::OptionalLift;
/// use ironfold::instances::First;
/// use ironfold::algebra::{IdentityElement, MergeOp};
///
/// let first = OptionalLift::new(First::<&str>::new());
/// assert_eq!(first.merge(None, Some("a")), Some("a"));
/// assert_eq!(first.identity(), None);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct OptionalLift<M> {
    inner: M,
}

impl<M> OptionalLift<M> {
    pub const fn new(inner: M) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<T, M: MergeOp<T>> MergeOp<Option<T>> for OptionalLift<M> {
    fn merge(&self, left: Option<T>, right: Option<T>) -> Option<T> {
        match (left, right) {
            (Some(a), Some(b)) => Some(self.inner.merge(a, b)),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

impl<T, M: MergeOp<T>> IdentityElement<Option<T>> for OptionalLift<M> {
    fn identity(&self) -> Option<T> {
        None
    }
}
