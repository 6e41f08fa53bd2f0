//! Tukey box plot elements
//!
//! Whiskers extend from the quartiles towards the most extreme values that
//! still lie within `1.5 * IQR` of the box. Instead of reporting the raw
//! element found at that position, the quantile at the element's rank is
//! used, which corrects the estimate for samples at non-round ranks. The
//! result is clamped so a whisker never crosses its Tukey limit nor reaches
//! into the box.

use crate::quantiles::rank::{quantile_sorted, SampleConvention};
use crate::special::BOXPLOT_OUTLIER_FACTOR;
use crate::traits::Sample;

/// The seven elements of a Tukey box plot, in drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BoxPlotItem {
    Quartile0,
    LowerWhisker,
    Quartile1,
    Quartile2,
    Quartile3,
    UpperWhisker,
    Quartile4,
}

impl BoxPlotItem {
    /// All items in drawing order
    pub const ALL: [BoxPlotItem; 7] = [
        BoxPlotItem::Quartile0,
        BoxPlotItem::LowerWhisker,
        BoxPlotItem::Quartile1,
        BoxPlotItem::Quartile2,
        BoxPlotItem::Quartile3,
        BoxPlotItem::UpperWhisker,
        BoxPlotItem::Quartile4,
    ];

    /// Position of the item in [`BoxPlot::to_array`]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Box plot figures of one population
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxPlot {
    pub quartile0: f64,
    pub lower_whisker: f64,
    pub quartile1: f64,
    pub quartile2: f64,
    pub quartile3: f64,
    pub upper_whisker: f64,
    pub quartile4: f64,
}

impl BoxPlot {
    /// Compute all figures from an ascending, non-empty slice
    pub fn from_sorted<T: Sample>(sorted: &[T], convention: SampleConvention) -> Self {
        Self {
            quartile0: quantile_sorted(sorted, 0.0, convention),
            lower_whisker: lower_whisker(sorted, convention),
            quartile1: quantile_sorted(sorted, 0.25, convention),
            quartile2: quantile_sorted(sorted, 0.5, convention),
            quartile3: quantile_sorted(sorted, 0.75, convention),
            upper_whisker: upper_whisker(sorted, convention),
            quartile4: quantile_sorted(sorted, 1.0, convention),
        }
    }

    /// Figures in drawing order, indexable by [`BoxPlotItem::index`]
    pub fn to_array(&self) -> [f64; 7] {
        [
            self.quartile0,
            self.lower_whisker,
            self.quartile1,
            self.quartile2,
            self.quartile3,
            self.upper_whisker,
            self.quartile4,
        ]
    }

    /// Value of a single item
    pub fn get(&self, item: BoxPlotItem) -> f64 {
        self.to_array()[item.index()]
    }

    /// `quartile3 - quartile1`
    pub fn inter_quartile_range(&self) -> f64 {
        self.quartile3 - self.quartile1
    }
}

/// Lower whisker of an ascending, non-empty slice
pub fn lower_whisker<T: Sample>(sorted: &[T], convention: SampleConvention) -> f64 {
    let q1 = quantile_sorted(sorted, 0.25, convention);
    let q3 = quantile_sorted(sorted, 0.75, convention);
    let limit = q1 - (q3 - q1) * BOXPLOT_OUTLIER_FACTOR;

    let n = sorted.len();
    let span = n as f64 * 0.25;
    let found = sorted
        .iter()
        .enumerate()
        .take_while(|(i, _)| (*i as f64) < span)
        .find(|(_, value)| value.to_f64() >= limit);

    match found {
        Some((i, _)) => {
            let rank = (i as f64 + 0.5) / n as f64;
            quantile_sorted(sorted, rank, convention).max(limit).min(q1)
        }
        None => q1,
    }
}

/// Upper whisker of an ascending, non-empty slice
pub fn upper_whisker<T: Sample>(sorted: &[T], convention: SampleConvention) -> f64 {
    let q1 = quantile_sorted(sorted, 0.25, convention);
    let q3 = quantile_sorted(sorted, 0.75, convention);
    let limit = q3 + (q3 - q1) * BOXPLOT_OUTLIER_FACTOR;

    let n = sorted.len();
    let span = n as f64 * 0.75;
    let found = sorted
        .iter()
        .enumerate()
        .rev()
        .take_while(|(i, _)| (*i as f64) > span)
        .find(|(_, value)| value.to_f64() <= limit);

    match found {
        Some((i, _)) => {
            let rank = (i as f64 + 0.5) / n as f64;
            quantile_sorted(sorted, rank, convention).min(limit).max(q3)
        }
        None => q3,
    }
}
