//! # Trimstats
//!
//! Outlier-trimmed quantiles, Tukey box plots and numerically stable
//! dispersion statistics for Rust.
//!
//! Trimstats builds an ordered population from raw measurements, drops
//! placeholder values and statistical outliers, and answers order-statistic
//! queries against what is left.
//!
//! ## Features
//!
//! - **Exclusion**: Drop null, zero and sentinel placeholders before sorting
//! - **Outlier Trimming**: Iterative, sigma-driven removal of extreme values
//! - **Quantiles**: Population (Hyndman-Fan type 2) and sample (type 6) rules
//! - **Box Plots**: Quartiles plus Tukey whiskers at 1.5 IQR
//! - **Moments**: Welford mean and standard deviation with shard merging
//! - **Error Function**: Gauss error function and normal tail probabilities
//!
//! ## Quick Start
//!
//! ```rust
//! use trimstats::prelude::*;
//!
//! let readings = [12.0, 11.5, 0.0, 12.5, 13.0, 12.25, 11.75];
//! let config = QuantileConfig::trimmed()
//!     .with_exclusion(ExclusionPolicy::none().remove_zeros());
//!
//! let engine = QuantileEngine::new(&readings, &config).unwrap();
//! println!("median: {}", engine.median());
//! println!("sigma:  {}", engine.sigma());
//! assert_eq!(engine.size(), 6);
//! ```
//!
//! ## Sharded Moments
//!
//! [`RunningMoments`] implements the [`Accumulator`](traits::Accumulator)
//! trait, so partial results from separate workers can be merged:
//!
//! ```rust
//! use trimstats::statistics::RunningMoments;
//! use trimstats::traits::Accumulator;
//!
//! let mut worker1 = RunningMoments::from_samples(&[1.0, 2.0, 3.0]);
//! let worker2 = RunningMoments::from_samples(&[4.0, 5.0]);
//!
//! Accumulator::merge(&mut worker1, &worker2);
//! assert!((worker1.mean() - 3.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support, `libm` is used otherwise
//! - `serde`: Serialization of configuration and results
//! - `rayon`: Parallel moment folds over large populations
//! - `tracing`: Debug and trace events from population construction
//! - `full`: Enable everything

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[macro_use]
mod macros;

pub mod config;
pub mod error;
pub mod quantiles;
pub mod special;
pub mod statistics;
pub mod traits;

mod math;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::config::{ExclusionPolicy, OutlierTrim, QuantileConfig};
    pub use crate::error::QuantileError;
    pub use crate::quantiles::{BoxPlot, BoxPlotItem, OrderedPopulation, QuantileEngine, SampleConvention, Spot};
    pub use crate::statistics::RunningMoments;
}

pub use config::{ExclusionPolicy, OutlierTrim, QuantileConfig};
pub use error::QuantileError;
pub use quantiles::{OrderedPopulation, QuantileEngine};
pub use statistics::RunningMoments;
