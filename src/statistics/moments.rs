//! Running moments (count, mean, variance, min, max)
//!
//! Computes streaming statistics using Welford's numerically stable online algorithm.
//! Supports merging for sharded computation.

use crate::math;
use crate::quantiles::SampleConvention;
use crate::traits::{Accumulator, Sample};

/// Running moments calculator using Welford's algorithm
///
/// Tracks count, mean and `m2` (the variance times the count) in a single
/// pass with O(1) memory, avoiding the catastrophic cancellation of the
/// naive sum-of-squares formula.
///
/// # Example
///
/// ```
/// use trimstats::statistics::RunningMoments;
/// use trimstats::quantiles::SampleConvention;
///
/// let mut moments = RunningMoments::new();
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     moments.observe(value);
/// }
///
/// assert!((moments.mean() - 5.0).abs() < 1e-12);
/// assert!((moments.sigma(SampleConvention::Population) - 2.0).abs() < 1e-12);
/// assert_eq!(moments.min(), Some(2.0));
/// assert_eq!(moments.max(), Some(9.0));
/// ```
///
/// # Sharded Usage
///
/// ```
/// use trimstats::statistics::RunningMoments;
///
/// let mut left = RunningMoments::from_samples(&[1.0, 2.0, 3.0]);
/// let right = RunningMoments::from_samples(&[4.0, 5.0, 6.0]);
///
/// left.merge(&right);
/// assert!((left.mean() - 3.5).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunningMoments {
    /// Number of values seen
    count: u64,
    /// Running mean
    mean: f64,
    /// Sum of squared differences from the mean (variance times count)
    m2: f64,
    /// Running sum, kept apart from the mean so integer inputs sum exactly
    sum: f64,
    /// Minimum value
    min: f64,
    /// Maximum value
    max: f64,
}

impl Default for RunningMoments {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningMoments {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Sequential fold over a slice of samples
    pub fn from_samples<T: Sample>(values: &[T]) -> Self {
        let mut moments = Self::new();
        for value in values {
            moments.observe(value.to_f64());
        }
        moments
    }

    /// Parallel fold: every chunk is folded on its own, partial results
    /// are combined with [`merge`](Self::merge).
    ///
    /// Agrees with [`from_samples`](Self::from_samples) up to floating point
    /// reassociation.
    #[cfg(feature = "rayon")]
    pub fn par_from_samples<T: Sample>(values: &[T], chunk_len: usize) -> Self {
        use rayon::prelude::*;

        values
            .par_chunks(chunk_len.max(1))
            .map(Self::from_samples)
            .reduce(Self::new, |mut left, right| {
                left.merge(&right);
                left
            })
    }

    /// Observe one value
    ///
    /// NaN values are ignored to prevent poisoning the statistics.
    pub fn observe(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }

        let count = self.count as f64;
        let delta = value - self.mean;
        self.m2 += delta * delta * (count / (count + 1.0));
        self.mean += delta / (count + 1.0);
        self.sum += value;
        self.count += 1;
    }

    /// Merge with the accumulator of a disjoint subset
    ///
    /// The combined mean is the count-weighted mean of both parts; the
    /// combined `m2` adds the between-group term of each part.
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }

        let n1 = self.count as f64;
        let n2 = other.count as f64;
        let total = n1 + n2;
        let mean = self.mean * (n1 / total) + other.mean * (n2 / total);

        let d1 = self.mean - mean;
        let d2 = other.mean - mean;
        self.m2 += other.m2 + n1 * d1 * d1 + n2 * d2 * d2;
        self.mean = mean;
        self.sum += other.sum;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Get the number of values
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the mean, 0 if empty
    ///
    /// Falls back to `sum / count` once an infinite value has pushed the
    /// running mean to NaN.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else if self.mean.is_nan() {
            self.sum / self.count as f64
        } else {
            self.mean
        }
    }

    /// Get the variance
    ///
    /// Divides by `count` for a population and by `count - 1` for a sample.
    /// Returns 0 when there are too few values for the convention, and when
    /// an infinite value leaves the spread undefined.
    pub fn variance(&self, convention: SampleConvention) -> f64 {
        if !self.m2.is_finite() || !self.mean.is_finite() {
            return 0.0;
        }
        match convention {
            SampleConvention::Population if self.count > 0 => self.m2 / self.count as f64,
            SampleConvention::Sample if self.count > 1 => self.m2 / (self.count - 1) as f64,
            _ => 0.0,
        }
    }

    /// Get the standard deviation
    pub fn sigma(&self, convention: SampleConvention) -> f64 {
        math::sqrt(self.variance(convention))
    }

    /// Get the minimum value
    pub fn min(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.min)
        }
    }

    /// Get the maximum value
    pub fn max(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.max)
        }
    }

    /// Get the sum of all values
    pub fn sum(&self) -> f64 {
        self.sum
    }
}

impl Accumulator for RunningMoments {
    type Item = f64;

    fn update(&mut self, item: &Self::Item) {
        self.observe(*item);
    }

    fn merge(&mut self, other: &Self) {
        RunningMoments::merge(self, other);
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl Extend<f64> for RunningMoments {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.observe(value);
        }
    }
}

impl FromIterator<f64> for RunningMoments {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut moments = Self::new();
        moments.extend(iter);
        moments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: [f64; 8] = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

    #[test]
    fn test_basic() {
        let moments = RunningMoments::from_samples(&DATA);

        assert_eq!(moments.len(), 8);
        assert!((moments.mean() - 5.0).abs() < 1e-12);
        assert!((moments.variance(SampleConvention::Population) - 4.0).abs() < 1e-12);
        assert!((moments.sigma(SampleConvention::Population) - 2.0).abs() < 1e-12);
        assert_eq!(moments.min(), Some(2.0));
        assert_eq!(moments.max(), Some(9.0));
        assert!((moments.sum() - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_sample_variance() {
        // Population variance = 32/8 = 4.0, sample variance = 32/7
        let moments = RunningMoments::from_samples(&DATA);
        assert!((moments.variance(SampleConvention::Sample) - 32.0 / 7.0).abs() < 1e-12);
        assert!(
            (moments.sigma(SampleConvention::Sample) - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12
        );
    }

    #[test]
    fn test_integer_samples() {
        let moments = RunningMoments::from_samples(&[2_i32, 4, 4, 4, 5, 5, 7, 9]);
        assert!((moments.mean() - 5.0).abs() < 1e-12);
        assert!((moments.sigma(SampleConvention::Population) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty() {
        let moments = RunningMoments::new();

        assert!(moments.is_empty());
        assert_eq!(moments.mean(), 0.0);
        assert_eq!(moments.sigma(SampleConvention::Population), 0.0);
        assert_eq!(moments.sigma(SampleConvention::Sample), 0.0);
        assert_eq!(moments.min(), None);
        assert_eq!(moments.max(), None);
    }

    #[test]
    fn test_single_value() {
        let mut moments = RunningMoments::new();
        moments.observe(42.0);

        assert_eq!(moments.mean(), 42.0);
        assert_eq!(moments.sigma(SampleConvention::Population), 0.0);
        // one value carries no information about the spread of a sample
        assert_eq!(moments.sigma(SampleConvention::Sample), 0.0);
    }

    #[test]
    fn test_merge() {
        let mut left = RunningMoments::from_samples(&DATA[..3]);
        let right = RunningMoments::from_samples(&DATA[3..]);

        left.merge(&right);
        let whole = RunningMoments::from_samples(&DATA);

        assert_eq!(left.len(), 8);
        assert!((left.mean() - whole.mean()).abs() < 1e-12);
        assert!(
            (left.sigma(SampleConvention::Sample) - whole.sigma(SampleConvention::Sample)).abs()
                < 1e-12
        );
        assert_eq!(left.min(), Some(2.0));
        assert_eq!(left.max(), Some(9.0));
    }

    #[test]
    fn test_merge_empty() {
        let mut moments = RunningMoments::from_samples(&[1.0, 2.0]);
        moments.merge(&RunningMoments::new());
        assert_eq!(moments.len(), 2);
        assert!((moments.mean() - 1.5).abs() < 1e-12);

        let mut empty = RunningMoments::new();
        empty.merge(&moments);
        assert_eq!(empty, moments);
    }

    #[test]
    fn test_accumulator_clear() {
        let mut moments = RunningMoments::new();
        Accumulator::update(&mut moments, &3.0);
        assert_eq!(Accumulator::count(&moments), 1);

        moments.clear();
        assert!(Accumulator::is_empty(&moments));
        assert_eq!(moments.min(), None);
    }

    #[test]
    fn test_from_iterator() {
        let moments: RunningMoments = DATA.iter().copied().collect();
        assert_eq!(moments, RunningMoments::from_samples(&DATA));
    }

    #[test]
    fn test_numerical_stability() {
        let base = 1e12;
        let moments: RunningMoments = (0..1000).map(|i| base + i as f64).collect();

        assert!((moments.mean() - (base + 499.5)).abs() < 0.5);
        // variance of 0..1000 is (1000² - 1) / 12
        let expected = ((1000.0_f64 * 1000.0 - 1.0) / 12.0).sqrt();
        assert!(
            (moments.sigma(SampleConvention::Population) - expected).abs() < 1e-2,
            "sigma: {} expected: {}",
            moments.sigma(SampleConvention::Population),
            expected
        );
    }

    #[test]
    fn test_nan_ignored() {
        let moments: RunningMoments = [1.0, f64::NAN, 2.0, f64::NAN, 3.0].into_iter().collect();
        assert_eq!(moments.len(), 3);
        assert!((moments.mean() - 2.0).abs() < 1e-12);
        assert!(!moments.sigma(SampleConvention::Sample).is_nan());
    }

    #[test]
    fn test_infinite_values_have_no_spread() {
        let moments = RunningMoments::from_samples(&[1.0, 2.0, f64::INFINITY]);
        assert_eq!(moments.sigma(SampleConvention::Population), 0.0);
        assert_eq!(moments.sigma(SampleConvention::Sample), 0.0);
        assert_eq!(moments.mean(), f64::INFINITY);
        assert_eq!(moments.max(), Some(f64::INFINITY));

        let moments = RunningMoments::from_samples(&[f64::NEG_INFINITY, 1.0, 2.0]);
        assert_eq!(moments.variance(SampleConvention::Sample), 0.0);
        assert_eq!(moments.mean(), f64::NEG_INFINITY);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_integer_sum_is_exact() {
        let values: std::vec::Vec<i32> = (0..500_000_i64)
            .map(|i| ((i * 7919) % 200_000 - 50_000) as i32)
            .collect();
        let exact: i64 = values.iter().map(|&v| i64::from(v)).sum();

        let moments = RunningMoments::from_samples(&values);
        assert_eq!(moments.sum(), exact as f64);

        let mut merged = RunningMoments::from_samples(&values[..123_457]);
        merged.merge(&RunningMoments::from_samples(&values[123_457..]));
        assert_eq!(merged.sum(), exact as f64);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_matches_sequential() {
        let values: std::vec::Vec<f64> = (0..100_000).map(|i| ((i * 7919) % 1000) as f64 * 0.1).collect();
        let sequential = RunningMoments::from_samples(&values);
        let parallel = RunningMoments::par_from_samples(&values, 4096);

        assert_eq!(parallel.len(), sequential.len());
        assert!((parallel.mean() - sequential.mean()).abs() < 1e-9 * sequential.mean().abs());
        let (ps, ss) = (
            parallel.sigma(SampleConvention::Sample),
            sequential.sigma(SampleConvention::Sample),
        );
        assert!((ps - ss).abs() < 1e-9 * ss);
    }
}
