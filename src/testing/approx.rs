//! Float comparison for tests over averages and other float summaries.

/// Assert that two floats differ by at most `epsilon` (default `1e-10`).
///
/// ```
/// use ironfold::assert_approx_eq;
///
/// assert_approx_eq!(0.1 + 0.2, 0.3);
/// assert_approx_eq!(10.0 / 3.0, 3.333, 1e-3);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr $(,)?) => {
        $crate::assert_approx_eq!($actual, $expected, 1e-10)
    };
    ($actual:expr, $expected:expr, $epsilon:expr $(,)?) => {{
        let (actual, expected, epsilon): (f64, f64, f64) = ($actual, $expected, $epsilon);
        let diff = (actual - expected).abs();
        assert!(
            diff <= epsilon,
            "floats differ by {diff:e} (allowed {epsilon:e}): left {actual:?}, right {expected:?}",
        );
    }};
}
