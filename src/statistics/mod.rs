//! Dispersion statistics over populations
//!
//! This module provides single-pass accumulators for the mean and standard
//! deviation that can be filled shard by shard and merged afterwards.
//!
//! # Example
//!
//! ```
//! use trimstats::statistics::{merge_all, RunningMoments};
//! use trimstats::quantiles::SampleConvention;
//!
//! let values: Vec<f64> = (1..=100).map(f64::from).collect();
//! let shards = values.chunks(16).map(RunningMoments::from_samples);
//! let moments: RunningMoments = merge_all(shards);
//!
//! assert!((moments.mean() - 50.5).abs() < 1e-9);
//! println!("Sigma: {}", moments.sigma(SampleConvention::Sample));
//! ```

mod moments;

pub use moments::RunningMoments;

use crate::traits::Accumulator;

/// Reduce partial accumulators of disjoint shards into one
///
/// Starts from the empty accumulator, which is the identity of `merge`.
pub fn merge_all<A, I>(parts: I) -> A
where
    A: Accumulator,
    I: IntoIterator<Item = A>,
{
    parts.into_iter().fold(A::default(), |mut acc, part| {
        acc.merge(&part);
        acc
    })
}
