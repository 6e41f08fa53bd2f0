//! Order statistics over trimmed populations
//!
//! This module turns raw samples into an ascending, outlier-trimmed
//! population and answers quantile, quartile and box-plot queries on it.
//!
//! # Types
//!
//! - [`OrderedPopulation`]: filtered, sorted and trimmed samples
//! - [`QuantileEngine`]: a population plus memoised dispersion statistics
//! - [`BoxPlot`]: the seven box-plot figures of a population
//! - [`Spot`]: a value paired with its position, for point populations
//!
//! # Example
//!
//! ```
//! use trimstats::config::QuantileConfig;
//! use trimstats::quantiles::OrderedPopulation;
//! use trimstats::traits::QuantileSource;
//!
//! let population = OrderedPopulation::new(&[7, 3, 9, 1, 5], &QuantileConfig::default()).unwrap();
//!
//! assert_eq!(population.as_slice(), &[1, 3, 5, 7, 9]);
//! assert_eq!(population.median(), 5.0);
//! println!("IQR: {}", population.inter_quartile_range());
//! ```

pub mod boxplot;
pub mod rank;

mod engine;
mod population;

pub use boxplot::{BoxPlot, BoxPlotItem};
pub use engine::QuantileEngine;
pub use population::{OrderedPopulation, Spot};
pub use rank::SampleConvention;
