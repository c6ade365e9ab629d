//! Utility functions for ironfold.

/// Split `v` into consecutive chunks of at most `size` elements, moving the
/// elements (no `Clone` required). Order is preserved; only the last chunk
/// may be shorter. An empty input yields no chunks.
pub fn chunks_of<T>(v: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    let mut out = Vec::with_capacity(v.len().div_ceil(size));
    let mut it = v.into_iter();
    loop {
        let chunk: Vec<T> = it.by_ref().take(size).collect();
        if chunk.is_empty() {
            break;
        }
        out.push(chunk);
    }
    out
}

/// Split `v` into at most `n` contiguous, order-preserving partitions of
/// near-equal size.
///
/// # Examples
///
/// ```
/// use ironfold::utils::split_contiguous;
///
/// let parts = split_contiguous((1..=7).collect::<Vec<_>>(), 3);
/// assert_eq!(parts, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
/// ```
pub fn split_contiguous<T>(v: Vec<T>, n: usize) -> Vec<Vec<T>> {
    let len = v.len();
    if n <= 1 || len <= 1 {
        return if len == 0 { Vec::new() } else { vec![v] };
    }
    chunks_of(v, len.div_ceil(n))
}

/// Left-to-right function composition: `compose(f, g)(x) == g(f(x))`.
///
/// A plain stand-in for pipeline sugar when chaining a projection with a
/// post-processing step.
///
/// # Examples
///
/// ```
/// use ironfold::utils::compose;
///
/// let parse_then_double = compose(|s: &str| s.len(), |n: usize| n * 2);
/// assert_eq!(parse_then_double("abc"), 6);
/// ```
pub fn compose<A, B, C>(f: impl Fn(A) -> B, g: impl Fn(B) -> C) -> impl Fn(A) -> C {
    move |a| g(f(a))
}
