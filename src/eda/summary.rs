//! Overview tab: preview rows, describe-style statistics and per-column profiles.

use std::collections::HashSet;

use crate::dataset::{ColumnData, ColumnType, Dataset};

use super::stats;

/// First rows of the table rendered as text.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Summary statistics for one numeric column. Statistics are `None` when undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

/// Type, missing-value and cardinality facts for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: ColumnType,
    pub missing: usize,
    pub distinct: usize,
}

/// Everything the overview tab shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub row_count: usize,
    pub preview: Preview,
    pub summaries: Vec<ColumnSummary>,
    pub profiles: Vec<ColumnProfile>,
}

pub fn overview(dataset: &Dataset, preview_rows: usize) -> Overview {
    Overview {
        row_count: dataset.row_count(),
        preview: preview(dataset, preview_rows),
        summaries: describe(dataset),
        profiles: profiles(dataset),
    }
}

pub fn preview(dataset: &Dataset, rows: usize) -> Preview {
    let headers = dataset
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();
    let rows = (0..rows.min(dataset.row_count()))
        .map(|row| {
            dataset
                .columns()
                .iter()
                .map(|column| column.cell(row).to_string())
                .collect()
        })
        .collect();
    Preview { headers, rows }
}

/// Count, mean, std, min, quartiles and max for every numeric column.
pub fn describe(dataset: &Dataset) -> Vec<ColumnSummary> {
    dataset
        .numeric_columns()
        .filter_map(|column| {
            let values = stats::present(column.numeric()?);
            let sorted = stats::sorted(&values);
            Some(ColumnSummary {
                name: column.name().to_string(),
                count: values.len(),
                mean: stats::mean(&values),
                std: stats::sample_std(&values),
                min: sorted.first().copied(),
                q1: stats::quantile(&sorted, 0.25),
                median: stats::quantile(&sorted, 0.5),
                q3: stats::quantile(&sorted, 0.75),
                max: sorted.last().copied(),
            })
        })
        .collect()
}

pub fn profiles(dataset: &Dataset) -> Vec<ColumnProfile> {
    dataset
        .columns()
        .iter()
        .map(|column| {
            let (missing, distinct) = match column.data() {
                ColumnData::Numeric(values) => {
                    let missing = values.iter().filter(|v| v.is_none()).count();
                    let distinct = values
                        .iter()
                        .flatten()
                        .map(|value| normalized_bits(*value))
                        .collect::<HashSet<_>>()
                        .len();
                    (missing, distinct)
                }
                ColumnData::Text(values) => {
                    let missing = values.iter().filter(|v| v.is_none()).count();
                    let distinct = values
                        .iter()
                        .flatten()
                        .map(String::as_str)
                        .collect::<HashSet<_>>()
                        .len();
                    (missing, distinct)
                }
            };
            ColumnProfile {
                name: column.name().to_string(),
                dtype: column.dtype(),
                missing,
                distinct,
            }
        })
        .collect()
}

/// `0.0` and `-0.0` count as the same value.
fn normalized_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}
