//! `Fieldwise`: a product whose arity is only known at runtime.

use crate::algebra::{IdentityElement, MergeOp, WithIdentity, with_identity};
use crate::error::{MergeError, Result};

/// A record of field values whose arity was checked by the [`Fieldwise`]
/// operation that built it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldRecord<T>(Vec<T>);

impl<T> FieldRecord<T> {
    pub fn values(&self) -> &[T] {
        &self.0
    }

    pub fn into_values(self) -> Vec<T> {
        self.0
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }
}

/// Field-wise merge over [`FieldRecord`]s, one operation per field.
///
/// Arity is validated when the operation and its records are constructed, so
/// a mismatched composition fails before any reduction runs. Records must come
/// from [`Fieldwise::record`] on an operation of the same arity: `merge`
/// panics on a record of any other arity, and [`Fieldwise::try_merge`]
/// returns the mismatch as an error.
///
/// # Examples
/// ```
/// use ironfold::derive::Fieldwise;
/// use ironfold::algebra::MergeOp;
/// use ironfold::instances::{Max, Min, Sum};
///
/// # fn main() -> ironfold::Result<()> {
/// let ops: Vec<Box<dyn MergeOp<i64>>> =
///     vec![Box::new(Sum::<i64>::new()), Box::new(Min::<i64>::new()), Box::new(Max::<i64>::new())];
/// let op = Fieldwise::new(ops)?;
/// let merged = op.merge(op.record(vec![1, 4, 4])?, op.record(vec![2, 9, 9])?);
/// assert_eq!(merged.values(), &[3, 4, 9]);
/// assert!(op.record(vec![1, 2]).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Fieldwise<M> {
    ops: Vec<M>,
}

impl<M> Fieldwise<M> {
    /// Build from one operation per field.
    ///
    /// # Errors
    /// [`MergeError::DerivationTypeMismatch`] if `ops` is empty.
    pub fn new(ops: Vec<M>) -> Result<Self> {
        if ops.is_empty() {
            return Err(MergeError::mismatch("Fieldwise", "at least one field", "0 fields"));
        }
        Ok(Self { ops })
    }

    /// Build from one semigroup per field plus an explicit identity per field.
    ///
    /// # Errors
    /// [`MergeError::DerivationTypeMismatch`] if `ops` is empty or the number
    /// of identities differs from the number of operations.
    pub fn with_identities<T>(
        ops: Vec<M>,
        identities: Vec<T>,
    ) -> Result<WithIdentity<Self, FieldRecord<T>>>
    where
        M: MergeOp<T>,
        T: Send + Sync,
    {
        let op = Self::new(ops)?;
        let identity = op.record(identities)?;
        Ok(with_identity(op, identity))
    }

    pub fn arity(&self) -> usize {
        self.ops.len()
    }

    /// Wrap `values` as a record for this operation.
    ///
    /// # Errors
    /// [`MergeError::DerivationTypeMismatch`] if `values.len()` differs from
    /// [`Fieldwise::arity`].
    pub fn record<T>(&self, values: Vec<T>) -> Result<FieldRecord<T>> {
        if values.len() != self.ops.len() {
            return Err(MergeError::mismatch(
                "Fieldwise",
                format!("{} fields", self.ops.len()),
                format!("{} fields", values.len()),
            ));
        }
        Ok(FieldRecord(values))
    }
}

impl<M> Fieldwise<M> {
    /// Merge two records, refusing any whose arity differs from this operation's.
    ///
    /// # Errors
    /// [`MergeError::DerivationTypeMismatch`] naming the offending side.
    pub fn try_merge<T>(
        &self,
        left: FieldRecord<T>,
        right: FieldRecord<T>,
    ) -> Result<FieldRecord<T>>
    where
        M: MergeOp<T>,
    {
        for (side, found) in [("left", left.arity()), ("right", right.arity())] {
            if found != self.arity() {
                return Err(MergeError::mismatch(
                    "Fieldwise",
                    format!("{} fields", self.arity()),
                    format!("{found} fields on the {side} record"),
                ));
            }
        }
        Ok(FieldRecord(
            self.ops
                .iter()
                .zip(left.0.into_iter().zip(right.0))
                .map(|(op, (l, r))| op.merge(l, r))
                .collect(),
        ))
    }
}

impl<T, M: MergeOp<T>> MergeOp<FieldRecord<T>> for Fieldwise<M> {
    fn merge(&self, left: FieldRecord<T>, right: FieldRecord<T>) -> FieldRecord<T> {
        match self.try_merge(left, right) {
            Ok(merged) => merged,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, M: IdentityElement<T>> IdentityElement<FieldRecord<T>> for Fieldwise<M> {
    fn identity(&self) -> FieldRecord<T> {
        FieldRecord(self.ops.iter().map(|op| op.identity()).collect())
    }
}
