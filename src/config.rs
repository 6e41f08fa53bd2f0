//! Construction settings for populations and engines
//!
//! A [`QuantileConfig`] bundles the three independent choices a caller makes
//! before building a population: which placeholder values to drop
//! ([`ExclusionPolicy`]), which statistical convention to apply
//! ([`SampleConvention`]) and whether to trim statistical outliers
//! ([`OutlierTrim`]).
//!
//! # Example
//!
//! ```
//! use trimstats::config::{ExclusionPolicy, OutlierTrim, QuantileConfig};
//! use trimstats::quantiles::SampleConvention;
//!
//! let config = QuantileConfig::default()
//!     .with_exclusion(ExclusionPolicy::none().remove_zeros())
//!     .with_convention(SampleConvention::Sample)
//!     .with_trim(OutlierTrim::new(2.5, 1.0).unwrap());
//!
//! assert!(config.exclusion.remove_zeros);
//! assert!(config.trim.is_some());
//! ```

use crate::error::QuantileError;
use crate::quantiles::SampleConvention;
use crate::special;
use crate::traits::Sample;

/// Which placeholder entries to drop before sorting
///
/// Flags are independent; the filter preserves input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExclusionPolicy {
    /// Drop missing entries instead of rejecting them
    pub remove_nulls: bool,
    /// Drop entries equal to zero
    pub remove_zeros: bool,
    /// Drop the domain's "no data" sentinels (`MIN`/`MAX`)
    pub remove_sentinels: bool,
}

impl ExclusionPolicy {
    /// Keep everything
    pub const fn none() -> Self {
        Self {
            remove_nulls: false,
            remove_zeros: false,
            remove_sentinels: false,
        }
    }

    /// Drop nulls, zeros and sentinels
    pub const fn all() -> Self {
        Self {
            remove_nulls: true,
            remove_zeros: true,
            remove_sentinels: true,
        }
    }

    pub fn remove_nulls(mut self) -> Self {
        self.remove_nulls = true;
        self
    }

    pub fn remove_zeros(mut self) -> Self {
        self.remove_zeros = true;
        self
    }

    pub fn remove_sentinels(mut self) -> Self {
        self.remove_sentinels = true;
        self
    }

    /// Whether a present value is dropped by this policy
    ///
    /// NaN is not covered here: it has no rank and every population drops
    /// it whatever the policy.
    pub fn excludes<T: Sample>(&self, value: T) -> bool {
        (self.remove_zeros && value == T::ZERO)
            || (self.remove_sentinels && value.is_sentinel())
    }
}

/// Outlier trimming parameters
///
/// `sigma` is converted into a per-tail probability `p` with the Gauss
/// error function. Values further than `range_factor` times the spread
/// between the `p` and `1 - p` quantiles beyond those quantiles are trimmed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutlierTrim {
    /// Tolerance interval in standard deviations, `z >= 0`
    pub sigma: f64,
    /// Multiplier on the extreme-quantile range, `>= 0`
    pub range_factor: f64,
}

impl Default for OutlierTrim {
    fn default() -> Self {
        Self {
            sigma: 3.0,
            range_factor: 2.0,
        }
    }
}

impl OutlierTrim {
    /// Create validated trimming parameters
    pub fn new(sigma: f64, range_factor: f64) -> Result<Self, QuantileError> {
        let trim = Self {
            sigma,
            range_factor,
        };
        trim.validate()?;
        Ok(trim)
    }

    /// Reject negative or non-finite values
    pub fn validate(&self) -> Result<(), QuantileError> {
        let valid = self.sigma.is_finite()
            && self.sigma >= 0.0
            && self.range_factor.is_finite()
            && self.range_factor >= 0.0;
        if valid {
            Ok(())
        } else {
            Err(QuantileError::InvalidTrim {
                sigma: self.sigma,
                range_factor: self.range_factor,
            })
        }
    }

    /// Probability mass of one tail beyond `sigma`
    pub fn tail_probability(&self) -> f64 {
        special::outlier_probability(self.sigma) / 2.0
    }
}

/// Everything needed to turn raw samples into an ordered population
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuantileConfig {
    pub exclusion: ExclusionPolicy,
    pub convention: SampleConvention,
    /// `None` keeps the sorted data untouched
    pub trim: Option<OutlierTrim>,
}

impl QuantileConfig {
    /// Population convention with default trimming and no exclusion
    pub fn trimmed() -> Self {
        Self::default().with_trim(OutlierTrim::default())
    }

    pub fn with_exclusion(mut self, exclusion: ExclusionPolicy) -> Self {
        self.exclusion = exclusion;
        self
    }

    pub fn with_convention(mut self, convention: SampleConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_trim(mut self, trim: OutlierTrim) -> Self {
        self.trim = Some(trim);
        self
    }

    /// Disable outlier trimming
    pub fn untrimmed(mut self) -> Self {
        self.trim = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusion_flags() {
        let policy = ExclusionPolicy::none().remove_zeros();
        assert!(policy.excludes(0_i32));
        assert!(policy.excludes(-0.0_f64));
        assert!(!policy.excludes(i32::MIN));
        assert!(!policy.excludes(f64::NAN));

        let policy = ExclusionPolicy::all();
        assert!(policy.excludes(i32::MAX));
        assert!(policy.excludes(-f64::MAX));
        assert!(!policy.excludes(f64::NAN));
        assert!(!policy.excludes(1.5_f64));
    }

    #[test]
    fn test_trim_validation() {
        assert!(OutlierTrim::new(3.0, 2.0).is_ok());
        assert!(OutlierTrim::new(0.0, 0.0).is_ok());
        assert_eq!(
            OutlierTrim::new(-1.0, 2.0),
            Err(QuantileError::InvalidTrim {
                sigma: -1.0,
                range_factor: 2.0
            })
        );
        assert!(OutlierTrim::new(3.0, f64::INFINITY).is_err());
        assert!(OutlierTrim::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_tail_probability() {
        let trim = OutlierTrim::default();
        assert!((trim.tail_probability() - 0.001_349_9).abs() < 1e-6);
    }

    #[test]
    fn test_config_builders() {
        let config = QuantileConfig::trimmed();
        assert_eq!(config.trim, Some(OutlierTrim::default()));
        assert_eq!(config.convention, SampleConvention::Population);
        assert_eq!(config.untrimmed().trim, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: QuantileConfig =
            serde_json::from_str(r#"{"convention":"sample","trim":{"sigma":2.5,"range_factor":1.0}}"#)
                .unwrap();
        assert_eq!(config.convention, SampleConvention::Sample);
        assert_eq!(config.exclusion, ExclusionPolicy::none());
        assert_eq!(config.trim, Some(OutlierTrim::new(2.5, 1.0).unwrap()));
    }
}
