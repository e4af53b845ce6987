//! Running statistics (count, min, max, mean, standard deviation)
//!
//! Computes streaming statistics using Welford's numerically stable online algorithm.
//! Supports merging for distributed computation.

use core::fmt;

use crate::math;
use crate::traits::{StatsError, Summary};

/// Running statistics accumulator using Welford's algorithm
///
/// Tracks count, minimum, maximum, mean and standard deviation of a stream of
/// scalar observations in a single pass with O(1) memory. The centered second
/// moment is updated incrementally, which avoids the catastrophic cancellation
/// of a plain sum-of-squares.
///
/// Deviations are *population* deviations: the observed values are treated as
/// the complete set, so the second moment is divided by `count`. Use
/// [`sample_std_dev`](Self::sample_std_dev) for the Bessel-corrected variant.
///
/// Every derived statistic of an empty accumulator is an
/// [`EmptyAccumulator`](StatsError::EmptyAccumulator) error.
///
/// The second moment saturates at `f64::MAX`. Observations spread wider than
/// about `1e154` therefore report a deviation that is a lower bound of the
/// true one, identically whether they were folded or merged.
///
/// # Example
///
/// ```
/// use srcstats::statistics::Accumulator;
///
/// let mut acc = Accumulator::new();
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.fold(value).unwrap();
/// }
///
/// assert_eq!(acc.count(), 8);
/// assert_eq!(acc.minimum(), Ok(2.0));
/// assert_eq!(acc.maximum(), Ok(9.0));
/// assert!((acc.mean().unwrap() - 5.0).abs() < 0.001);
/// assert!((acc.std_dev().unwrap() - 2.0).abs() < 0.001);
/// ```
///
/// # Distributed Usage
///
/// ```
/// use srcstats::statistics::Accumulator;
///
/// let mut worker1 = Accumulator::new();
/// let mut worker2 = Accumulator::new();
///
/// worker1.fold_all([1.0, 2.0, 3.0]).unwrap();
/// worker2.fold_all([4.0, 5.0, 6.0]).unwrap();
///
/// worker1.merge(&worker2);
/// assert_eq!(worker1.count(), 6);
/// assert!((worker1.mean().unwrap() - 3.5).abs() < 0.001);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Accumulator {
    /// Number of values seen
    count: u64,
    /// Running mean
    mean: f64,
    /// Sum of squared differences from mean (M2 in Welford's algorithm)
    m2: f64,
    /// Minimum value
    min: f64,
    /// Maximum value
    max: f64,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    /// Create a new empty accumulator
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Fold one observation into the statistics
    ///
    /// Non-finite values are rejected and leave the accumulator untouched.
    pub fn fold(&mut self, value: f64) -> Result<(), StatsError> {
        if !value.is_finite() {
            tracing::debug!(value, count = self.count, "rejected observation");
            return Err(StatsError::InvalidObservation(value));
        }

        *self = self.advanced(value);
        Ok(())
    }

    /// Fold an integral length or count
    ///
    /// Any `u64` converts to a finite `f64`, so this never fails.
    #[allow(clippy::cast_precision_loss)]
    pub fn fold_length(&mut self, length: u64) {
        *self = self.advanced(length as f64);
    }

    /// Fold observations in order, stopping at the first rejected one
    ///
    /// Values before the rejected one stay folded in.
    pub fn fold_all<I>(&mut self, values: I) -> Result<(), StatsError>
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().try_for_each(|value| self.fold(value))
    }

    // Welford's update of a finite value
    #[allow(clippy::cast_precision_loss)]
    fn advanced(&self, value: f64) -> Self {
        let count = self.count + 1;
        let n = count as f64;
        let min = self.min.min(value);
        let max = self.max.max(value);

        let delta = value - self.mean;
        let mean = if delta.is_finite() {
            self.mean + delta / n
        } else {
            self.mean + (value / n - self.mean / n)
        };
        let mean = mean.clamp(min, max);

        Self {
            count,
            mean,
            m2: saturate(self.m2 + delta * (value - mean)),
            min,
            max,
        }
    }

    /// Merge another accumulator into this one
    ///
    /// Uses Chan et al.'s parallel algorithm for combining statistics, so the
    /// result matches folding both streams into a single accumulator up to
    /// rounding, regardless of merge order or grouping. Like
    /// [`fold`](Self::fold), the mean stays finite and the second moment
    /// saturates.
    #[allow(clippy::cast_precision_loss)]
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        if other.count == 0 {
            return self;
        }

        if self.count == 0 {
            *self = *other;
            return self;
        }

        let combined_count = self.count + other.count;
        let other_weight = other.count as f64 / combined_count as f64;
        let min = self.min.min(other.min);
        let max = self.max.max(other.max);

        let delta = other.mean - self.mean;
        let combined_mean = if delta.is_finite() {
            self.mean + delta * other_weight
        } else {
            let self_weight = self.count as f64 / combined_count as f64;
            self.mean * self_weight + other.mean * other_weight
        };

        let combined_m2 = self.m2 + other.m2 + delta * delta * (self.count as f64 * other_weight);

        self.count = combined_count;
        self.mean = combined_mean.clamp(min, max);
        self.m2 = saturate(combined_m2);
        self.min = min;
        self.max = max;
        self
    }

    /// Get the number of observations
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn require_data(&self) -> Result<(), StatsError> {
        if self.count == 0 {
            Err(StatsError::EmptyAccumulator)
        } else {
            Ok(())
        }
    }

    /// Get the smallest observation
    pub fn minimum(&self) -> Result<f64, StatsError> {
        self.require_data().map(|()| self.min)
    }

    /// Get the largest observation
    pub fn maximum(&self) -> Result<f64, StatsError> {
        self.require_data().map(|()| self.max)
    }

    /// Get the range (max - min)
    pub fn range(&self) -> Result<f64, StatsError> {
        self.require_data().map(|()| self.max - self.min)
    }

    /// Get the mean (average)
    ///
    /// Always lies within `[minimum, maximum]`, even after rounding.
    pub fn mean(&self) -> Result<f64, StatsError> {
        self.require_data().map(|()| self.mean)
    }

    /// Get the sum of all observations
    ///
    /// The sum of no observations is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn sum(&self) -> f64 {
        self.mean * self.count as f64
    }

    /// Get the population variance
    #[allow(clippy::cast_precision_loss)]
    pub fn variance(&self) -> Result<f64, StatsError> {
        self.require_data()
            .map(|()| (self.m2 / self.count as f64).max(0.0))
    }

    /// Get the population standard deviation
    pub fn std_dev(&self) -> Result<f64, StatsError> {
        self.variance().map(math::sqrt)
    }

    /// Get the sample variance
    ///
    /// Unbiased estimator (Bessel's correction). A single observation has
    /// zero sample variance.
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_variance(&self) -> Result<f64, StatsError> {
        match self.count {
            0 => Err(StatsError::EmptyAccumulator),
            1 => Ok(0.0),
            n => Ok((self.m2 / (n - 1) as f64).max(0.0)),
        }
    }

    /// Get the sample standard deviation
    pub fn sample_std_dev(&self) -> Result<f64, StatsError> {
        self.sample_variance().map(math::sqrt)
    }

    /// Take a read-only snapshot of the summary statistics
    pub fn snapshot(&self) -> Result<Snapshot, StatsError> {
        Ok(Snapshot {
            count: self.count,
            min: self.minimum()?,
            max: self.maximum()?,
            mean: self.mean()?,
            std_dev: self.std_dev()?,
        })
    }

    /// Write a labeled statistics block
    ///
    /// `count_noun` names what was counted and `value_noun` the unit of the
    /// observations, e.g. `("files", "lines")`:
    ///
    /// ```text
    /// 3 files
    ///   min  2 lines
    ///   max  10 lines
    ///   mean 5.000 lines
    ///   sd   3.559 lines
    /// ```
    ///
    /// An empty accumulator renders as `0 files: no data`.
    pub fn render<W>(&self, out: &mut W, count_noun: &str, value_noun: &str) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        let Ok(snapshot) = self.snapshot() else {
            return writeln!(out, "{} {count_noun}: no data", self.count);
        };

        writeln!(out, "{} {count_noun}", snapshot.count)?;
        writeln!(out, "  min  {} {value_noun}", snapshot.min)?;
        writeln!(out, "  max  {} {value_noun}", snapshot.max)?;
        writeln!(out, "  mean {:.3} {value_noun}", snapshot.mean)?;
        writeln!(out, "  sd   {:.3} {value_noun}", snapshot.std_dev)
    }
}

// Second moments too large for f64 pin to the largest finite value
fn saturate(m2: f64) -> f64 {
    m2.min(f64::MAX)
}

impl Summary for Accumulator {
    type Item = f64;

    fn update(&mut self, item: &Self::Item) -> Result<(), StatsError> {
        self.fold(*item)
    }

    fn merge(&mut self, other: &Self) {
        Accumulator::merge(self, other);
    }

    fn clear(&mut self) {
        Accumulator::clear(self);
    }

    fn count(&self) -> u64 {
        self.count
    }
}

/// Summary statistics of a non-empty accumulator
///
/// This is a plain value detached from the accumulator it was taken from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// The number of observations
    pub count: u64,
    /// Smallest observation
    pub min: f64,
    /// Largest observation
    pub max: f64,
    /// Mean, a.k.a. average
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.mean, f)?;
        f.write_str(" ± ")?;
        fmt::Display::fmt(&self.std_dev, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let mut acc = Accumulator::new();

        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            acc.fold(v).unwrap();
        }

        assert_eq!(acc.count(), 8);
        assert!((acc.mean().unwrap() - 5.0).abs() < 0.001);
        assert!((acc.variance().unwrap() - 4.0).abs() < 0.001);
        assert!((acc.std_dev().unwrap() - 2.0).abs() < 0.001);
        assert_eq!(acc.minimum(), Ok(2.0));
        assert_eq!(acc.maximum(), Ok(9.0));
    }

    #[test]
    fn test_known_distribution() {
        let mut acc = Accumulator::new();
        acc.fold_all([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert_eq!(acc.count(), 5);
        assert_eq!(acc.minimum(), Ok(1.0));
        assert_eq!(acc.maximum(), Ok(5.0));
        assert!((acc.mean().unwrap() - 3.0).abs() < 1e-12);
        assert!((acc.std_dev().unwrap() - core::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_single_value() {
        let mut acc = Accumulator::new();
        acc.fold(42.0).unwrap();

        assert_eq!(acc.count(), 1);
        assert_eq!(acc.minimum(), Ok(42.0));
        assert_eq!(acc.maximum(), Ok(42.0));
        assert_eq!(acc.mean(), Ok(42.0));
        assert_eq!(acc.std_dev(), Ok(0.0));
        assert_eq!(acc.sample_std_dev(), Ok(0.0));
    }

    #[test]
    fn test_empty() {
        let acc = Accumulator::new();

        assert!(acc.is_empty());
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.sum(), 0.0);
        assert_eq!(acc.minimum(), Err(StatsError::EmptyAccumulator));
        assert_eq!(acc.maximum(), Err(StatsError::EmptyAccumulator));
        assert_eq!(acc.mean(), Err(StatsError::EmptyAccumulator));
        assert_eq!(acc.variance(), Err(StatsError::EmptyAccumulator));
        assert_eq!(acc.std_dev(), Err(StatsError::EmptyAccumulator));
        assert_eq!(acc.sample_variance(), Err(StatsError::EmptyAccumulator));
        assert_eq!(acc.snapshot(), Err(StatsError::EmptyAccumulator));
    }

    #[test]
    fn test_merge() {
        let mut acc1 = Accumulator::new();
        let mut acc2 = Accumulator::new();

        // Split data: [1,2,3] and [4,5,6]
        acc1.fold_all([1.0, 2.0, 3.0]).unwrap();
        acc2.fold_all([4.0, 5.0, 6.0]).unwrap();

        acc1.merge(&acc2);

        assert_eq!(acc1.count(), 6);
        assert!((acc1.mean().unwrap() - 3.5).abs() < 0.001);
        assert_eq!(acc1.minimum(), Ok(1.0));
        assert_eq!(acc1.maximum(), Ok(6.0));
        assert!((acc1.sum() - 21.0).abs() < 0.001);
    }

    #[test]
    fn test_merge_empty() {
        let mut acc = Accumulator::new();
        acc.fold_all([1.0, 2.0]).unwrap();
        let before = acc;

        acc.merge(&Accumulator::new());

        assert_eq!(acc, before);
    }

    #[test]
    fn test_merge_into_empty_copies() {
        let mut source = Accumulator::new();
        source.fold_all([3.0, 1.0, 4.0]).unwrap();

        let mut acc = Accumulator::new();
        acc.merge(&source);

        assert_eq!(acc, source);
    }

    #[test]
    fn test_sample_variance() {
        let mut acc = Accumulator::new();

        // Population variance = 32/8 = 4.0
        // Sample variance = 32/7 ≈ 4.571 (Bessel's correction)
        acc.fold_all([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

        assert!((acc.variance().unwrap() - 4.0).abs() < 0.001);
        assert!((acc.sample_variance().unwrap() - 4.571).abs() < 0.01);
    }

    #[test]
    fn test_clear() {
        let mut acc = Accumulator::new();
        acc.fold_all([1.0, 2.0, 3.0]).unwrap();

        acc.clear();

        assert!(acc.is_empty());
        assert_eq!(acc, Accumulator::new());
    }

    #[test]
    fn test_numerical_stability() {
        // Large offset, small spread: naive sum-of-squares loses all precision here
        let mut acc = Accumulator::new();

        let base = 1e9;
        for i in 0..1000 {
            acc.fold_length(base as u64 + i);
        }

        let expected_mean = base + 499.5;
        let expected_variance = (1000.0 * 1000.0 - 1.0) / 12.0;
        assert!((acc.mean().unwrap() - expected_mean).abs() < 1e-6);
        assert!(
            (acc.variance().unwrap() - expected_variance).abs() / expected_variance < 1e-6,
            "variance: {} expected: {}",
            acc.variance().unwrap(),
            expected_variance
        );
    }

    #[test]
    fn test_nan_rejected() {
        let mut acc = Accumulator::new();
        acc.fold_all([1.0, 2.0, 3.0]).unwrap();
        let before = acc;

        assert!(matches!(
            acc.fold(f64::NAN),
            Err(StatsError::InvalidObservation(v)) if v.is_nan()
        ));
        assert_eq!(acc, before);
    }

    #[test]
    fn test_infinity_rejected() {
        let mut acc = Accumulator::new();
        acc.fold(1.0).unwrap();
        let before = acc;

        assert_eq!(
            acc.fold(f64::INFINITY),
            Err(StatsError::InvalidObservation(f64::INFINITY))
        );
        assert_eq!(
            acc.fold(f64::NEG_INFINITY),
            Err(StatsError::InvalidObservation(f64::NEG_INFINITY))
        );
        assert_eq!(acc, before);
    }

    #[test]
    fn test_extreme_spread_saturates() {
        let mut acc = Accumulator::new();
        acc.fold(-f64::MAX).unwrap();
        acc.fold(f64::MAX).unwrap();

        assert_eq!(acc.mean(), Ok(0.0));
        assert!(acc.std_dev().unwrap().is_finite());

        acc.fold(1.0).unwrap();
        assert_eq!(acc.count(), 3);
        assert!(acc.mean().unwrap().is_finite());
        assert!(acc.std_dev().unwrap().is_finite());
    }

    #[test]
    fn test_merge_extreme_partitions_stays_usable() {
        let mut a = Accumulator::new();
        let mut b = Accumulator::new();
        a.fold(-1e308).unwrap();
        b.fold(1e308).unwrap();

        a.merge(&b);

        assert_eq!(a.mean(), Ok(0.0));
        assert!(a.std_dev().unwrap().is_finite());

        a.fold(1.0).unwrap();
        assert_eq!(a.count(), 3);
        assert!((a.mean().unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert!(a.std_dev().unwrap().is_finite());
    }

    #[test]
    fn test_fold_and_merge_agree_at_large_magnitudes() {
        for magnitude in [1e200, 1e308] {
            let mut folded = Accumulator::new();
            folded.fold(-magnitude).unwrap();
            folded.fold(magnitude).unwrap();

            let mut left = Accumulator::new();
            let mut right = Accumulator::new();
            left.fold(-magnitude).unwrap();
            right.fold(magnitude).unwrap();
            left.merge(&right);

            assert_eq!(folded, left, "magnitude {magnitude}");
        }
    }

    #[test]
    fn test_fold_all_stops_at_first_rejection() {
        let mut acc = Accumulator::new();

        let result = acc.fold_all([1.0, 2.0, f64::NAN, 4.0]);

        assert!(result.is_err());
        assert_eq!(acc.count(), 2);
        assert_eq!(acc.maximum(), Ok(2.0));
    }

    #[test]
    fn test_mean_within_extrema() {
        let mut acc = Accumulator::new();
        for _ in 0..10 {
            acc.fold(0.1).unwrap();
        }

        let mean = acc.mean().unwrap();
        assert!(mean >= acc.minimum().unwrap());
        assert!(mean <= acc.maximum().unwrap());
        assert!(acc.variance().unwrap() >= 0.0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_render() {
        let mut acc = Accumulator::new();
        acc.fold_all([2.0, 3.0, 10.0]).unwrap();

        let mut out = String::new();
        acc.render(&mut out, "files", "lines").unwrap();

        assert_eq!(
            out,
            "3 files\n  min  2 lines\n  max  10 lines\n  mean 5.000 lines\n  sd   3.559 lines\n"
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_render_empty() {
        let mut out = String::new();
        Accumulator::new()
            .render(&mut out, "lines", "characters")
            .unwrap();

        assert_eq!(out, "0 lines: no data\n");
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_snapshot_display() {
        let mut acc = Accumulator::new();
        acc.fold_all([1.0, 3.0]).unwrap();

        assert_eq!(acc.snapshot().unwrap().to_string(), "2 ± 1");
    }
}
