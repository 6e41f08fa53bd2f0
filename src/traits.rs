//! Core traits
//!
//! [`Sample`] describes a numeric domain a population can be built from,
//! [`Accumulator`] is the mergeable-state seam used for sharded reduction and
//! [`QuantileSource`] provides every order-statistic query on top of a sorted
//! slice.

use core::cmp::Ordering;
use core::fmt::Debug;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::QuantileError;
use crate::quantiles::{boxplot, rank, BoxPlot, SampleConvention};

/// A single measurement from one numeric domain
///
/// Integer implementations carry scaled values (e.g. millivolts stored as
/// `i32`), float implementations carry the measurement itself. A population
/// never mixes domains.
pub trait Sample: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// The zero placeholder some recorders write when no value was captured
    const ZERO: Self;
    /// Lower "no data" sentinel of the domain
    const SENTINEL_LOW: Self;
    /// Upper "no data" sentinel of the domain
    const SENTINEL_HIGH: Self;

    /// Widen to `f64` for all statistics
    fn to_f64(self) -> f64;

    /// Total order used for sorting; NaN sorts after every number
    fn sample_cmp(&self, other: &Self) -> Ordering;

    /// Whether the value is a NaN, which has no rank and never enters a population
    fn is_nan_value(self) -> bool {
        false
    }

    /// Whether the value is one of the domain's "no data" sentinels
    fn is_sentinel(self) -> bool {
        self == Self::SENTINEL_LOW || self == Self::SENTINEL_HIGH
    }
}

macro_rules! impl_integer_sample {
    ($($t:ty),*) => {$(
        impl Sample for $t {
            const ZERO: Self = 0;
            const SENTINEL_LOW: Self = <$t>::MIN;
            const SENTINEL_HIGH: Self = <$t>::MAX;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn sample_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        }
    )*};
}

macro_rules! impl_float_sample {
    ($($t:ty),*) => {$(
        impl Sample for $t {
            const ZERO: Self = 0.0;
            const SENTINEL_LOW: Self = -<$t>::MAX;
            const SENTINEL_HIGH: Self = <$t>::MAX;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn sample_cmp(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }

            #[inline]
            fn is_nan_value(self) -> bool {
                self.is_nan()
            }
        }
    )*};
}

impl_integer_sample!(i16, i32, i64);
impl_float_sample!(f32, f64);

/// Mergeable accumulator state
///
/// Implementors can be filled independently on disjoint shards of a
/// population and combined afterwards. `merge` must be associative and
/// commutative, and an empty accumulator must be its identity.
pub trait Accumulator: Clone + Debug + Default {
    /// The type of item this accumulator observes
    type Item;

    /// Observe one item
    fn update(&mut self, item: &Self::Item);

    /// Merge another accumulator covering a disjoint subset into this one
    fn merge(&mut self, other: &Self);

    /// Reset to the empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items observed
    fn count(&self) -> u64;

    /// Check if nothing was observed
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Order-statistic queries over an ascending, non-empty sequence
///
/// Implementors only expose their sorted values and statistical convention;
/// quantiles, quartiles, whiskers and box plots are provided on top.
pub trait QuantileSource {
    /// The value type of the sorted sequence
    type Value: Sample;

    /// The ascending, non-empty values
    fn sorted(&self) -> &[Self::Value];

    /// The convention selecting the quantile rule
    fn convention(&self) -> SampleConvention;

    /// Number of values
    fn len(&self) -> usize {
        self.sorted().len()
    }

    /// Always `false`: sources are non-empty by construction
    fn is_empty(&self) -> bool {
        self.sorted().is_empty()
    }

    /// Quantile at probability `p`
    ///
    /// Fails with [`QuantileError::InvalidProbability`] if `p` is NaN or
    /// outside `[0, 1]`.
    fn quantile(&self, p: f64) -> Result<f64, QuantileError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(QuantileError::InvalidProbability(p));
        }
        Ok(rank::quantile_sorted(self.sorted(), p, self.convention()))
    }

    /// Quantiles for several probabilities at once
    fn quantiles(&self, ps: &[f64]) -> Result<Vec<f64>, QuantileError> {
        ps.iter().map(|&p| self.quantile(p)).collect()
    }

    /// Smallest value
    fn quartile0(&self) -> f64 {
        rank::quantile_sorted(self.sorted(), 0.0, self.convention())
    }

    /// First quartile (p = 0.25)
    fn quartile1(&self) -> f64 {
        rank::quantile_sorted(self.sorted(), 0.25, self.convention())
    }

    /// Median (p = 0.5)
    fn quartile2(&self) -> f64 {
        rank::quantile_sorted(self.sorted(), 0.5, self.convention())
    }

    /// Third quartile (p = 0.75)
    fn quartile3(&self) -> f64 {
        rank::quantile_sorted(self.sorted(), 0.75, self.convention())
    }

    /// Largest value
    fn quartile4(&self) -> f64 {
        rank::quantile_sorted(self.sorted(), 1.0, self.convention())
    }

    /// Alias for [`quartile2`](Self::quartile2)
    fn median(&self) -> f64 {
        self.quartile2()
    }

    /// `quartile3 - quartile1`
    fn inter_quartile_range(&self) -> f64 {
        self.quartile3() - self.quartile1()
    }

    /// Tukey lower whisker, never below `Q1 - 1.5 * IQR`
    fn lower_whisker(&self) -> f64 {
        boxplot::lower_whisker(self.sorted(), self.convention())
    }

    /// Tukey upper whisker, never above `Q3 + 1.5 * IQR`
    fn upper_whisker(&self) -> f64 {
        boxplot::upper_whisker(self.sorted(), self.convention())
    }

    /// Five-number summary `[min, Q1, median, Q3, max]`
    fn tukey_box_plot(&self) -> [f64; 5] {
        [
            self.quartile0(),
            self.quartile1(),
            self.quartile2(),
            self.quartile3(),
            self.quartile4(),
        ]
    }

    /// Five-number summary plus both whiskers
    fn box_plot(&self) -> BoxPlot {
        BoxPlot::from_sorted(self.sorted(), self.convention())
    }
}
