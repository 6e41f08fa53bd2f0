//! Ordered, outlier-trimmed populations
//!
//! Construction copies the raw samples, drops NaN and the placeholder
//! entries named by the [`ExclusionPolicy`](crate::config::ExclusionPolicy),
//! sorts the survivors and, unless trimming is disabled, removes
//! statistical outliers from both tails.
//!
//! Points ([`Spot`]) are ranked by their value; the position travels with
//! the value so trimmed outliers can still be located.
//!
//! # Outlier Trimming
//!
//! With `p` the per-tail probability beyond `sigma` and
//! `range = (q(1 - p) - q(p)) * range_factor`, a pass repeatedly drops the
//! lowest element while it lies below `q(p) - range` and then the highest
//! element while it lies above `q(1 - p) + range`. The quantile bound is
//! re-evaluated on the shrinking sequence after every removal, the range is
//! fixed per pass. Passes repeat until one removes nothing, so trimming an
//! already trimmed population with the same parameters is a no-op.
//!
//! Only values strictly beyond a bound are removed, one at a time, from a
//! sorted sequence. A dense run of identical extreme values (a sensor
//! floor of 0 m altitude recorded thousands of times) therefore moves the
//! quantile bound onto itself and is kept as genuine data.

use crate::config::{OutlierTrim, QuantileConfig};
use crate::error::QuantileError;
use crate::quantiles::rank::{quantile_sorted, SampleConvention};
use crate::traits::{QuantileSource, Sample};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// A value observed at a position (a timestamp, a distance along a track)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spot<T> {
    pub x: f64,
    pub y: T,
}

impl<T> Spot<T> {
    pub fn new(x: f64, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> From<(f64, T)> for Spot<T> {
    fn from((x, y): (f64, T)) -> Self {
        Self { x, y }
    }
}

/// Sorted, filtered and trimmed samples of one numeric domain
///
/// Immutable once built. Never empty.
///
/// # Example
///
/// ```
/// use trimstats::config::{ExclusionPolicy, QuantileConfig};
/// use trimstats::quantiles::OrderedPopulation;
/// use trimstats::traits::QuantileSource;
///
/// let config = QuantileConfig::default()
///     .with_exclusion(ExclusionPolicy::none().remove_zeros());
/// let population = OrderedPopulation::new(&[0, 0, 5, 5, 5, 5, 5, 100], &config).unwrap();
///
/// assert_eq!(population.size(), 6);
/// assert_eq!(population.quartile2(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedPopulation<T: Sample> {
    /// Ascending trunk after exclusion and trimming
    values: Vec<T>,
    /// Trimmed values, low tail ascending followed by high tail ascending
    outliers: Vec<T>,
    /// Position of each outlier, index-aligned with `outliers`
    outlier_positions: Vec<f64>,
    /// Values dropped for matching an outcast, in input order
    outcasts: Vec<T>,
    convention: SampleConvention,
    first_figure: f64,
    last_figure: f64,
}

impl<T: Sample> OrderedPopulation<T> {
    /// Build a population from plain samples
    pub fn new(samples: &[T], config: &QuantileConfig) -> Result<Self, QuantileError> {
        Self::build(indexed(samples.iter().copied().map(Some)), samples.len(), &[], config)
    }

    /// Build a population from records that may lack a value
    ///
    /// `None` entries are dropped when the policy removes nulls and rejected
    /// with [`QuantileError::NullSample`] otherwise.
    pub fn from_optional(samples: &[Option<T>], config: &QuantileConfig) -> Result<Self, QuantileError> {
        Self::build(indexed(samples.iter().copied()), samples.len(), &[], config)
    }

    /// Build a population, additionally dropping every value equal to one of
    /// `outcasts` before sorting
    ///
    /// Dropped values are kept aside and still count towards
    /// [`population_min`](Self::population_min) and
    /// [`population_max`](Self::population_max).
    pub fn with_outcasts(
        samples: &[T],
        outcasts: &[T],
        config: &QuantileConfig,
    ) -> Result<Self, QuantileError> {
        Self::build(indexed(samples.iter().copied().map(Some)), samples.len(), outcasts, config)
    }

    /// Build a population from the values of positioned points
    ///
    /// Points are ranked by `y`. The first and last figures are the `y` of
    /// the first and last surviving point in input order, and trimmed
    /// points keep their `x` (see [`outlier_spots`](Self::outlier_spots)).
    pub fn from_points(points: &[Spot<T>], config: &QuantileConfig) -> Result<Self, QuantileError> {
        Self::build(points.iter().map(|spot| (spot.x, Some(spot.y))), points.len(), &[], config)
    }

    fn build<I>(
        samples: I,
        raw_len: usize,
        outcasts: &[T],
        config: &QuantileConfig,
    ) -> Result<Self, QuantileError>
    where
        I: Iterator<Item = (f64, Option<T>)>,
    {
        if let Some(trim) = &config.trim {
            trim.validate()?;
        }
        if raw_len == 0 {
            return Err(QuantileError::EmptyPopulation);
        }

        let policy = config.exclusion;
        let mut spots = Vec::with_capacity(raw_len);
        let mut dropped = Vec::new();
        for (index, (x, sample)) in samples.enumerate() {
            match sample {
                None if policy.remove_nulls => {}
                None => return Err(QuantileError::NullSample { index }),
                Some(value) if value.is_nan_value() || policy.excludes(value) => {}
                Some(value) if outcasts.contains(&value) => dropped.push(value),
                Some(value) => spots.push(Spot::new(x, value)),
            }
        }

        let (first_figure, last_figure) = match (spots.first(), spots.last()) {
            (Some(first), Some(last)) => (first.y.to_f64(), last.y.to_f64()),
            _ => return Err(QuantileError::EmptyPopulation),
        };

        spots.sort_unstable_by(|a, b| a.y.sample_cmp(&b.y));
        let mut values: Vec<T> = spots.iter().map(|spot| spot.y).collect();

        let (lo, hi) = match config.trim {
            Some(trim) => trimmed_window(&values, trim, config.convention),
            None => (0, values.len()),
        };
        let (outliers, outlier_positions): (Vec<T>, Vec<f64>) = spots[..lo]
            .iter()
            .chain(&spots[hi..])
            .map(|spot| (spot.y, spot.x))
            .unzip();
        values.truncate(hi);
        values.drain(..lo);

        debug_event!(
            raw = raw_len,
            filtered = spots.len(),
            trimmed = spots.len() - values.len(),
            outcasts = dropped.len(),
            "population built"
        );

        Ok(Self {
            values,
            outliers,
            outlier_positions,
            outcasts: dropped,
            convention: config.convention,
            first_figure,
            last_figure,
        })
    }

    /// Population size after exclusion and trimming
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// The ascending values
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// First value of the filtered input, before sorting and trimming
    pub fn first_figure(&self) -> f64 {
        self.first_figure
    }

    /// Last value of the filtered input, before sorting and trimming
    pub fn last_figure(&self) -> f64 {
        self.last_figure
    }

    /// Values removed by outlier trimming
    pub fn outliers(&self) -> &[T] {
        &self.outliers
    }

    /// Outliers together with their positions
    ///
    /// For plain samples the position is the index in the raw input.
    pub fn outlier_spots(&self) -> impl Iterator<Item = Spot<T>> + '_ {
        self.outliers
            .iter()
            .zip(&self.outlier_positions)
            .map(|(&y, &x)| Spot::new(x, y))
    }

    /// Values dropped for matching an outcast
    pub fn outcasts(&self) -> &[T] {
        &self.outcasts
    }

    /// Minimum including trimmed outliers and dropped outcasts
    pub fn population_min(&self) -> f64 {
        self.castaways().fold(self.values[0].to_f64(), f64::min)
    }

    /// Maximum including trimmed outliers and dropped outcasts
    pub fn population_max(&self) -> f64 {
        self.castaways()
            .fold(self.values[self.values.len() - 1].to_f64(), f64::max)
    }

    /// Consume the population, returning the ascending values
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    fn castaways(&self) -> impl Iterator<Item = f64> + '_ {
        self.outliers.iter().chain(&self.outcasts).map(|v| v.to_f64())
    }
}

impl<T: Sample> QuantileSource for OrderedPopulation<T> {
    type Value = T;

    fn sorted(&self) -> &[T] {
        &self.values
    }

    fn convention(&self) -> SampleConvention {
        self.convention
    }
}

/// Plain samples are positioned at their raw index
fn indexed<T>(samples: impl Iterator<Item = Option<T>>) -> impl Iterator<Item = (f64, Option<T>)> {
    samples.enumerate().map(|(index, sample)| (index as f64, sample))
}

/// Window `lo..hi` of an ascending slice that survives trimming both tails.
/// Never empties the window.
fn trimmed_window<T: Sample>(
    values: &[T],
    trim: OutlierTrim,
    convention: SampleConvention,
) -> (usize, usize) {
    let p = trim.tail_probability();
    let mut lo = 0;
    let mut hi = values.len();

    loop {
        let (start_lo, start_hi) = (lo, hi);
        let window = &values[lo..hi];
        let range = (quantile_sorted(window, 1.0 - p, convention)
            - quantile_sorted(window, p, convention))
            * trim.range_factor;

        while hi - lo > 1
            && values[lo].to_f64() < quantile_sorted(&values[lo..hi], p, convention) - range
        {
            lo += 1;
        }
        while hi - lo > 1
            && values[hi - 1].to_f64()
                > quantile_sorted(&values[lo..hi], 1.0 - p, convention) + range
        {
            hi -= 1;
        }

        trace_event!(
            low = lo - start_lo,
            high = start_hi - hi,
            range,
            "outlier trim pass"
        );

        if (lo, hi) == (start_lo, start_hi) {
            break;
        }
    }

    (lo, hi)
}
