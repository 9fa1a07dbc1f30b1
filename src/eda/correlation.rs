//! Correlation tab: pairwise Pearson correlation over all numeric columns.

use ndarray::Array2;

use crate::dataset::Dataset;

/// Symmetric correlation matrix; undefined cells are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Array2<f64>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied().filter(|v| !v.is_nan())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

pub fn correlation_matrix(dataset: &Dataset) -> CorrelationMatrix {
    let columns: Vec<(&str, &[Option<f64>])> = dataset
        .numeric_columns()
        .filter_map(|column| Some((column.name(), column.numeric()?)))
        .collect();
    let n = columns.len();
    let mut values = Array2::from_elem((n, n), f64::NAN);
    for i in 0..n {
        for j in i..n {
            let mut r = pearson(columns[i].1, columns[j].1);
            if i == j && !r.is_nan() {
                r = 1.0;
            }
            values[[i, j]] = r;
            values[[j, i]] = r;
        }
    }
    CorrelationMatrix {
        labels: columns.iter().map(|(name, _)| name.to_string()).collect(),
        values,
    }
}

/// Pearson correlation over rows where both values are present and finite.
///
/// `NaN` when fewer than two such rows exist or either side has zero variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}
