//! Visualizations tab, second half: pollutant-vs-target scatter plots with OLS trend lines.

use std::collections::HashMap;

use crate::dataset::Dataset;
use crate::pollutant::Pollutant;

/// Ordinary-least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl TrendLine {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through `points`; `None` below two points or when every `x` is equal.
pub fn fit_ols(points: &[(f64, f64)]) -> Option<TrendLine> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };
    Some(TrendLine {
        slope,
        intercept,
        r_squared,
    })
}

/// Points of one colour group and their own trend line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub key: String,
    pub points: Vec<(f64, f64)>,
    pub trend: Option<TrendLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub pollutant: Pollutant,
    pub target: String,
    /// Groups in order of first appearance.
    pub groups: Vec<ScatterGroup>,
}

impl ScatterPlot {
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|group| group.points.len()).sum()
    }
}

/// One scatter plot per present pollutant against the target column.
///
/// Without a grouping column every row falls in a single group named after the target. Rows
/// with a missing group, pollutant or target value are skipped.
pub fn scatter_plots(dataset: &Dataset) -> Vec<ScatterPlot> {
    let schema = dataset.schema();
    let Some((target_name, target_index)) = schema.target() else {
        return Vec::new();
    };
    let Some(target) = dataset.column_at(target_index).and_then(|c| c.numeric()) else {
        return Vec::new();
    };
    let group = schema.group().and_then(|(_, index)| dataset.column_at(index));
    let keys: Vec<Option<String>> = (0..dataset.row_count())
        .map(|row| match group {
            Some(column) => column.key(row),
            None => Some(target_name.to_string()),
        })
        .collect();

    schema
        .pollutants()
        .iter()
        .filter_map(|&(pollutant, index)| {
            let values = dataset.column_at(index)?.numeric()?;
            Some(ScatterPlot {
                pollutant,
                target: target_name.to_string(),
                groups: grouped_points(&keys, values, target),
            })
        })
        .collect()
}

fn grouped_points(
    keys: &[Option<String>],
    xs: &[Option<f64>],
    ys: &[Option<f64>],
) -> Vec<ScatterGroup> {
    let mut groups: Vec<ScatterGroup> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for ((key, x), y) in keys.iter().zip(xs).zip(ys) {
        let (Some(key), Some(x), Some(y)) = (key, x, y) else {
            continue;
        };
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        let index = *positions.entry(key.as_str()).or_insert_with(|| {
            groups.push(ScatterGroup {
                key: key.clone(),
                points: Vec::new(),
                trend: None,
            });
            groups.len() - 1
        });
        groups[index].points.push((*x, *y));
    }
    for group in &mut groups {
        group.trend = fit_ols(&group.points);
    }
    groups
}
