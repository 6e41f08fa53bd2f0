//! Error type shared by population construction and quantile queries

/// Errors raised while building a population or querying it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantileError {
    /// The raw input was empty, or exclusion removed every element
    EmptyPopulation,
    /// A probability outside `[0, 1]` (or NaN) was passed to a quantile query
    InvalidProbability(f64),
    /// A null entry was found while null removal was not requested
    NullSample {
        /// Position of the entry in the raw input
        index: usize,
    },
    /// Outlier trimming was configured with a negative or non-finite value
    InvalidTrim {
        sigma: f64,
        range_factor: f64,
    },
}

impl core::fmt::Display for QuantileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            QuantileError::EmptyPopulation => write!(f, "empty population"),
            QuantileError::InvalidProbability(p) => {
                write!(f, "invalid probability: {} is outside [0, 1]", p)
            }
            QuantileError::NullSample { index } => {
                write!(f, "null sample at index {} and null removal is off", index)
            }
            QuantileError::InvalidTrim {
                sigma,
                range_factor,
            } => write!(
                f,
                "invalid outlier trim: sigma {}, range factor {}",
                sigma, range_factor
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QuantileError {}
