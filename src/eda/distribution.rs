//! Visualizations tab, first half: histograms with a box-plot margin.

use crate::dataset::Dataset;
use crate::pollutant::Pollutant;

use super::stats;

/// Equal-width histogram; the last bin is closed on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width buckets spanning their range.
    ///
    /// A single repeated value gets a range of half its magnitude (at least `0.5`) on each
    /// side, so it lands in the centre bin.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }
        let (mut min, mut max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        if !(min.is_finite() && max.is_finite()) {
            return None;
        }
        if min == max {
            let pad = min.abs().max(1.0) * 0.5;
            min = (min - pad).max(f64::MIN);
            max = (max + pad).min(f64::MAX);
        }
        // Halved so the span of two extreme finite values cannot overflow.
        let half_span = max / 2.0 - min / 2.0;
        let bin_width = half_span / bins as f64 * 2.0;
        let mut counts = vec![0usize; bins];
        for value in values {
            let position = (value / 2.0 - min / 2.0) / half_span;
            let index = ((position * bins as f64).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }
        Some(Self {
            min,
            max,
            bin_width,
            counts,
        })
    }

    /// Lower and upper edge of bin `index`.
    pub fn bin_range(&self, index: usize) -> (f64, f64) {
        let start = self.min + self.bin_width * index as f64;
        (start, start + self.bin_width)
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Tukey box-plot summary.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest value within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = stats::sorted(values);
        let q1 = stats::quantile(&sorted, 0.25)?;
        let median = stats::quantile(&sorted, 0.5)?;
        let q3 = stats::quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;
        let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted
            .iter()
            .partition(|v| **v >= low_fence && **v <= high_fence);
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);
        Some(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Histogram plus box margin for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub column: String,
    pub count: usize,
    pub histogram: Histogram,
    pub boxplot: BoxSummary,
}

/// Distributions for [`Pollutant::DISTRIBUTIONS`] followed by the target column.
///
/// Columns that are absent or have no finite values are left out.
pub fn distributions(dataset: &Dataset, bins: usize) -> Vec<Distribution> {
    let schema = dataset.schema();
    let mut indices: Vec<usize> = Pollutant::DISTRIBUTIONS
        .iter()
        .filter_map(|pollutant| schema.pollutant(*pollutant))
        .collect();
    if let Some((_, target)) = schema.target() {
        indices.push(target);
    }
    indices
        .into_iter()
        .filter_map(|index| {
            let column = dataset.column_at(index)?;
            let values = stats::finite(column.numeric()?);
            Some(Distribution {
                column: column.name().to_string(),
                count: values.len(),
                histogram: Histogram::from_values(&values, bins)?,
                boxplot: BoxSummary::from_values(&values)?,
            })
        })
        .collect()
}
