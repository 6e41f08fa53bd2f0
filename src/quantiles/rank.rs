//! Quantile rules over an ascending slice
//!
//! Two estimators are supported, selected by [`SampleConvention`]:
//!
//! **Population** (Hyndman & Fan type 2, inverse empirical CDF with
//! averaging at discontinuities):
//! ```text
//! pos = n * p
//! q   = (x[pos - 1] + x[pos]) / 2     if pos is integral
//! q   = x[floor(pos)]                 otherwise
//! ```
//!
//! **Sample** (type 6, as used by SAS-4, SciPy-(0,0) and Maple-5; piecewise
//! linear and symmetric):
//! ```text
//! pos = (n + 1) * p,  k = floor(pos)
//! q   = x[k - 1] + (pos - k) * (x[k] - x[k - 1])   for 1/(n+1) <= p < n/(n+1)
//! ```
//! Below the interpolation band the minimum is returned, above it the
//! maximum. Both rules return the exact minimum at `p = 0` and the exact
//! maximum at `p = 1`.
//!
//! # Reference
//!
//! Hyndman, R. J. & Fan, Y. (1996). "Sample quantiles in statistical packages."
//! The American Statistician 50(4):361–365.

use crate::math;
use crate::traits::Sample;

/// Whether a population is the whole set of interest or a sample of it
///
/// Selects the quantile rule and Bessel's correction for the standard
/// deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SampleConvention {
    /// The values are the entire population (type 2 quantiles, divide by n)
    #[default]
    Population,
    /// The values are a sample (type 6 quantiles, divide by n - 1)
    Sample,
}

impl SampleConvention {
    /// `true` for [`SampleConvention::Sample`]
    pub fn is_sample(self) -> bool {
        matches!(self, SampleConvention::Sample)
    }
}

/// Unchecked quantile of an ascending, non-empty slice at probability `p`.
///
/// Does not validate `p`: values outside `[0, 1]` land on the extremes.
/// The public entry point is [`QuantileSource::quantile`](crate::traits::QuantileSource::quantile),
/// which rejects them.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub(crate) fn quantile_sorted<T: Sample>(sorted: &[T], p: f64, convention: SampleConvention) -> f64 {
    assert!(!sorted.is_empty(), "Cannot compute quantile of empty slice");

    let n = sorted.len();
    if n == 1 {
        return sorted[0].to_f64();
    }

    match convention {
        SampleConvention::Population => population_quantile(sorted, p),
        SampleConvention::Sample => sample_quantile(sorted, p),
    }
}

fn population_quantile<T: Sample>(sorted: &[T], p: f64) -> f64 {
    let n = sorted.len();
    if p <= 0.0 {
        return sorted[0].to_f64();
    }
    if p >= 1.0 {
        return sorted[n - 1].to_f64();
    }

    let pos = n as f64 * p;
    let lower = math::floor(pos);
    // 0 < pos < n, so both candidate indices stay in bounds
    let idx = (lower as usize).min(n - 1);

    if pos == lower && idx > 0 {
        (sorted[idx - 1].to_f64() + sorted[idx].to_f64()) / 2.0
    } else {
        sorted[idx].to_f64()
    }
}

fn sample_quantile<T: Sample>(sorted: &[T], p: f64) -> f64 {
    let n = sorted.len();
    let slots = (n + 1) as f64;

    if p < 1.0 / slots {
        return sorted[0].to_f64();
    }
    if p >= n as f64 / slots {
        return sorted[n - 1].to_f64();
    }

    let pos = slots * p;
    // Rounding at the band edges can push pos just outside [1, n)
    let k = (math::floor(pos) as usize).clamp(1, n - 1);
    let frac = (pos - k as f64).clamp(0.0, 1.0);
    let below = sorted[k - 1].to_f64();
    let above = sorted[k].to_f64();

    below + frac * (above - below)
}
