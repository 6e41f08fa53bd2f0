//! Quantile and dispersion engine
//!
//! Wraps one [`OrderedPopulation`] and answers repeated queries against it.
//! Order statistics, min and max come straight from the sorted values; sum,
//! mean and sigma come from a [`RunningMoments`] fold over the trimmed
//! population. All of them are memoised on first use.
//!
//! # Thread Safety
//!
//! `QuantileEngine` is `Send` but **not `Sync`** because the memoised
//! aggregates live in `OnceCell`s. Build one engine per population snapshot
//! and query it from the owning thread.

use core::cell::OnceCell;

use crate::config::QuantileConfig;
use crate::error::QuantileError;
use crate::quantiles::population::{OrderedPopulation, Spot};
use crate::quantiles::rank::SampleConvention;
use crate::statistics::RunningMoments;
use crate::traits::{QuantileSource, Sample};

/// Populations at least this large are folded in parallel
#[cfg(feature = "rayon")]
const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Shard length of the parallel fold
#[cfg(feature = "rayon")]
const PARALLEL_CHUNK: usize = 1 << 14;

/// Lazily computed scalars; the population never changes, so nothing is
/// ever invalidated.
#[derive(Debug, Clone, Default)]
struct CachedAggregates {
    moments: OnceCell<RunningMoments>,
    min: OnceCell<f64>,
    max: OnceCell<f64>,
    sum: OnceCell<f64>,
    mean: OnceCell<f64>,
    sigma: OnceCell<f64>,
}

/// Outlier-trimmed quantile and dispersion statistics of one population
///
/// # Example
///
/// ```
/// use trimstats::config::QuantileConfig;
/// use trimstats::quantiles::{QuantileEngine, SampleConvention};
/// use trimstats::traits::QuantileSource;
///
/// let config = QuantileConfig::trimmed().with_convention(SampleConvention::Sample);
/// let engine = QuantileEngine::new(&[12.1, 11.8, 12.4, 12.0, 11.9, 12.2], &config).unwrap();
///
/// let [min, q1, median, q3, max] = engine.tukey_box_plot();
/// assert!(min <= q1 && q1 <= median && median <= q3 && q3 <= max);
/// assert!((engine.mean() - 12.066_666).abs() < 1e-5);
/// println!("sigma: {}", engine.sigma());
/// ```
#[derive(Debug, Clone)]
pub struct QuantileEngine<T: Sample> {
    population: OrderedPopulation<T>,
    cache: CachedAggregates,
}

impl<T: Sample> QuantileEngine<T> {
    /// Build an engine from plain samples
    pub fn new(samples: &[T], config: &QuantileConfig) -> Result<Self, QuantileError> {
        OrderedPopulation::new(samples, config).map(Self::from_population)
    }

    /// Build an engine from records that may lack a value
    pub fn from_optional(samples: &[Option<T>], config: &QuantileConfig) -> Result<Self, QuantileError> {
        OrderedPopulation::from_optional(samples, config).map(Self::from_population)
    }

    /// Build an engine, dropping every value equal to one of `outcasts`
    pub fn with_outcasts(
        samples: &[T],
        outcasts: &[T],
        config: &QuantileConfig,
    ) -> Result<Self, QuantileError> {
        OrderedPopulation::with_outcasts(samples, outcasts, config).map(Self::from_population)
    }

    /// Build an engine from positioned points, ranked by value
    pub fn from_points(points: &[Spot<T>], config: &QuantileConfig) -> Result<Self, QuantileError> {
        OrderedPopulation::from_points(points, config).map(Self::from_population)
    }

    /// Wrap an already built population
    pub fn from_population(population: OrderedPopulation<T>) -> Self {
        Self {
            population,
            cache: CachedAggregates::default(),
        }
    }

    /// The underlying population
    pub fn population(&self) -> &OrderedPopulation<T> {
        &self.population
    }

    /// Consume the engine, returning the population
    pub fn into_population(self) -> OrderedPopulation<T> {
        self.population
    }

    /// Running moments of the trimmed population
    pub fn moments(&self) -> &RunningMoments {
        self.cache
            .moments
            .get_or_init(|| fold_moments(self.population.as_slice()))
    }

    /// Smallest trimmed value, always equal to `quantile(0.0)`
    pub fn min(&self) -> f64 {
        *self.cache.min.get_or_init(|| self.quartile0())
    }

    /// Largest trimmed value, always equal to `quantile(1.0)`
    pub fn max(&self) -> f64 {
        *self.cache.max.get_or_init(|| self.quartile4())
    }

    /// Sum of the trimmed values
    pub fn sum(&self) -> f64 {
        *self.cache.sum.get_or_init(|| self.moments().sum())
    }

    /// Mean of the trimmed values
    pub fn mean(&self) -> f64 {
        *self.cache.mean.get_or_init(|| self.moments().mean())
    }

    /// Standard deviation under the engine's convention
    ///
    /// 0 when there are too few values (one value under the sample
    /// convention) and when an infinite value makes the spread undefined.
    pub fn sigma(&self) -> f64 {
        *self
            .cache
            .sigma
            .get_or_init(|| self.moments().sigma(self.population.convention()))
    }

    /// Population size after exclusion and trimming
    pub fn size(&self) -> usize {
        self.population.size()
    }

    /// First value of the filtered input, before sorting and trimming
    pub fn first_figure(&self) -> f64 {
        self.population.first_figure()
    }

    /// Last value of the filtered input, before sorting and trimming
    pub fn last_figure(&self) -> f64 {
        self.population.last_figure()
    }

    /// Values removed by outlier trimming
    pub fn outliers(&self) -> &[T] {
        self.population.outliers()
    }

    /// Outliers together with their positions
    pub fn outlier_spots(&self) -> impl Iterator<Item = Spot<T>> + '_ {
        self.population.outlier_spots()
    }

    /// Values dropped for matching an outcast
    pub fn outcasts(&self) -> &[T] {
        self.population.outcasts()
    }

    /// Minimum including trimmed outliers and dropped outcasts
    pub fn population_min(&self) -> f64 {
        self.population.population_min()
    }

    /// Maximum including trimmed outliers and dropped outcasts
    pub fn population_max(&self) -> f64 {
        self.population.population_max()
    }

    /// The ascending trimmed values
    pub fn as_slice(&self) -> &[T] {
        self.population.as_slice()
    }
}

impl<T: Sample> QuantileSource for QuantileEngine<T> {
    type Value = T;

    fn sorted(&self) -> &[T] {
        self.population.as_slice()
    }

    fn convention(&self) -> SampleConvention {
        self.population.convention()
    }
}

#[cfg(feature = "rayon")]
fn fold_moments<T: Sample>(values: &[T]) -> RunningMoments {
    if values.len() >= PARALLEL_THRESHOLD {
        RunningMoments::par_from_samples(values, PARALLEL_CHUNK)
    } else {
        RunningMoments::from_samples(values)
    }
}

#[cfg(not(feature = "rayon"))]
fn fold_moments<T: Sample>(values: &[T]) -> RunningMoments {
    RunningMoments::from_samples(values)
}
