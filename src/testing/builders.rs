//! Input builders for reduction tests.

use std::ops::RangeInclusive;

/// A fluent builder for reduction inputs.
///
/// # Example
///
/// ```
/// use ironfold::testing::TestDataBuilder;
///
/// let data = TestDataBuilder::new()
///     .add_range(1..=10)
///     .add_value(100)
///     .add_repeated(42, 5)
///     .build();
///
/// assert_eq!(data.len(), 16);
/// ```
#[derive(Debug, Default)]
pub struct TestDataBuilder<T> {
    data: Vec<T>,
}

impl<T> TestDataBuilder<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    #[must_use]
    pub fn add_value(mut self, value: T) -> Self {
        self.data.push(value);
        self
    }

    #[must_use]
    pub fn add_values(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.data.extend(values);
        self
    }

    #[must_use]
    pub fn add_repeated(mut self, value: T, count: usize) -> Self
    where
        T: Clone,
    {
        self.data.extend(std::iter::repeat_n(value, count));
        self
    }

    /// Append `count` values produced by `f(index)`.
    ///
    /// ```
    /// use ironfold::testing::TestDataBuilder;
    ///
    /// let words = TestDataBuilder::new()
    ///     .add_generated(3, |i| format!("w{i}"))
    ///     .build();
    /// assert_eq!(words, ["w0", "w1", "w2"]);
    /// ```
    #[must_use]
    pub fn add_generated(mut self, count: usize, f: impl FnMut(usize) -> T) -> Self {
        self.data.extend((0..count).map(f));
        self
    }

    /// Map every value, e.g. to wrap leaves as `Some(x)` or `vec![x]`.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> TestDataBuilder<U> {
        TestDataBuilder {
            data: self.data.into_iter().map(f).collect(),
        }
    }

    #[must_use]
    pub fn build(self) -> Vec<T> {
        self.data
    }

    /// Build and split at `at` (clamped to the length), for rollup tests.
    #[must_use]
    pub fn build_split(mut self, at: usize) -> (Vec<T>, Vec<T>) {
        let tail = self.data.split_off(at.min(self.data.len()));
        (self.data, tail)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: From<i32>> TestDataBuilder<T> {
    /// ```
    /// use ironfold::testing::TestDataBuilder;
    ///
    /// let data = TestDataBuilder::<i64>::new().add_range(1..=5).build();
    /// assert_eq!(data, vec![1, 2, 3, 4, 5]);
    /// ```
    #[must_use]
    pub fn add_range(mut self, range: RangeInclusive<i32>) -> Self {
        self.data.extend(range.map(T::from));
        self
    }
}

/// Deterministic pseudo-random integers in `[min, max)` from a fixed-seed LCG.
///
/// Reproducible across runs, so failing inputs can be replayed.
///
/// ```
/// use ironfold::testing::pseudo_random_data;
///
/// let data = pseudo_random_data(10, -50, 50);
/// assert_eq!(data.len(), 10);
/// assert!(data.iter().all(|v| (-50..50).contains(v)));
/// assert_eq!(data, pseudo_random_data(10, -50, 50));
/// ```
///
/// # Panics
///
/// Panics if `max <= min`.
#[must_use]
pub fn pseudo_random_data(count: usize, min: i32, max: i32) -> Vec<i32> {
    assert!(max > min, "empty range {min}..{max}");
    let range = max.abs_diff(min);
    let mut seed: u32 = 12345;
    (0..count)
        .map(|_| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let offset = (seed / 65536) % range;
            min.wrapping_add_unsigned(offset)
        })
        .collect()
}
