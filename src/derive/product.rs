//! Product combinators: tuples (`Product2`..`Product5`) and structs (`RecordLift`).
//!
//! A product merges each field with that field's own operation. It has an
//! identity exactly when every field operation has one.

use crate::algebra::{IdentityElement, MergeOp};
use std::fmt;

macro_rules! impl_product {
    ($n:literal; $($idx:tt => $m:ident : $t:ident),+) => {
        paste::paste! {
            #[doc = "Field-wise merge over " $n "-tuples; field `i` uses operation `i`."]
            #[derive(Clone, Copy, Debug, Default)]
            pub struct [<Product $n>]<$($m),+>($(pub $m),+);

            impl<$($t,)+ $($m),+> MergeOp<($($t,)+)> for [<Product $n>]<$($m),+>
            where
                $($m: MergeOp<$t>,)+
            {
                fn merge(&self, left: ($($t,)+), right: ($($t,)+)) -> ($($t,)+) {
                    ($(self.$idx.merge(left.$idx, right.$idx),)+)
                }
            }

            impl<$($t,)+ $($m),+> IdentityElement<($($t,)+)> for [<Product $n>]<$($m),+>
            where
                $($m: IdentityElement<$t>,)+
            {
                fn identity(&self) -> ($($t,)+) {
                    ($(self.$idx.identity(),)+)
                }
            }

            #[doc = "Build a [`Product" $n "`] from one operation per field."]
            pub const fn [<product $n>]<$($m),+>($([<$m:lower>]: $m),+) -> [<Product $n>]<$($m),+> {
                [<Product $n>]($([<$m:lower>]),+)
            }
        }
    };
}

impl_product!(2; 0 => M0: T0, 1 => M1: T1);
impl_product!(3; 0 => M0: T0, 1 => M1: T1, 2 => M2: T2);
impl_product!(4; 0 => M0: T0, 1 => M1: T1, 2 => M2: T2, 3 => M3: T3);
impl_product!(5; 0 => M0: T0, 1 => M1: T1, 2 => M2: T2, 3 => M3: T3, 4 => M4: T4);

/* ===================== RecordLift ===================== */

/// Product for a user-defined struct, via a tuple of its fields.
///
/// `into_fields` splits a record into a tuple, `fields` merges tuples (usually
/// a `ProductN`), and `from_fields` rebuilds the record. The pair of
/// conversions must be mutually inverse.
///
/// # Examples
/// ```
/// use ironfold::derive::{product2, RecordLift};
/// use ironfold::instances::{Max, Sum};
/// use ironfold::algebra::{IdentityElement, MergeOp};
///
/// #[derive(Debug, PartialEq)]
/// struct Visits { total: u64, peak: u32 }
///
/// let op = RecordLift::new(
///     product2(Sum::<u64>::new(), Max::<u32>::new()),
///     |v: Visits| (v.total, v.peak),
///     |(total, peak): (u64, u32)| Visits { total, peak },
/// );
/// let merged = op.merge(Visits { total: 3, peak: 9 }, Visits { total: 4, peak: 2 });
/// assert_eq!(merged, Visits { total: 7, peak: 9 });
/// assert_eq!(op.identity(), Visits { total: 0, peak: 0 });
/// ```
#[derive(Clone, Copy)]
pub struct RecordLift<M, I, F> {
    fields: M,
    into_fields: I,
    from_fields: F,
}

impl<M, I, F> RecordLift<M, I, F> {
    pub const fn new(fields: M, into_fields: I, from_fields: F) -> Self {
        Self {
            fields,
            into_fields,
            from_fields,
        }
    }

    /// The tuple operation the record delegates to.
    pub fn fields(&self) -> &M {
        &self.fields
    }
}

impl<M: fmt::Debug, I, F> fmt::Debug for RecordLift<M, I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordLift")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl<R, Tup, M, I, F> MergeOp<R> for RecordLift<M, I, F>
where
    M: MergeOp<Tup>,
    I: Fn(R) -> Tup + Send + Sync,
    F: Fn(Tup) -> R + Send + Sync,
{
    fn merge(&self, left: R, right: R) -> R {
        let merged = self
            .fields
            .merge((self.into_fields)(left), (self.into_fields)(right));
        (self.from_fields)(merged)
    }
}

impl<R, Tup, M, I, F> IdentityElement<R> for RecordLift<M, I, F>
where
    M: IdentityElement<Tup>,
    I: Fn(R) -> Tup + Send + Sync,
    F: Fn(Tup) -> R + Send + Sync,
{
    fn identity(&self) -> R {
        (self.from_fields)(self.fields.identity())
    }
}
