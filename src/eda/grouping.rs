//! City-wise tab: record counts and mean pollutant levels per group.

use std::collections::{BTreeMap, HashMap};

use crate::dataset::Dataset;
use crate::pollutant::Pollutant;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// Mean of one pollutant per group, groups sorted by key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMeans {
    pub pollutant: Pollutant,
    pub means: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityBreakdown {
    pub group_column: String,
    /// Records per group in order of first appearance.
    pub counts: Vec<GroupCount>,
    /// One entry per pollutant present in the table.
    pub means: Vec<GroupMeans>,
    /// Pollutants with no numeric column; their charts are omitted.
    pub skipped: Vec<Pollutant>,
}

/// Aggregate by the grouping column. Returns `None` when the table has no grouping column.
///
/// Rows whose group cell is missing are left out of every aggregate.
pub fn city_breakdown(dataset: &Dataset) -> Option<CityBreakdown> {
    let schema = dataset.schema();
    let (group_column, group_index) = schema.group()?;
    let group = dataset.column_at(group_index)?;
    let keys: Vec<Option<String>> = (0..dataset.row_count()).map(|row| group.key(row)).collect();

    let mut counts: Vec<GroupCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for key in keys.iter().flatten() {
        match positions.get(key.as_str()) {
            Some(&index) => counts[index].count += 1,
            None => {
                positions.insert(key.as_str(), counts.len());
                counts.push(GroupCount {
                    key: key.clone(),
                    count: 1,
                });
            }
        }
    }

    let means = schema
        .pollutants()
        .iter()
        .filter_map(|&(pollutant, index)| {
            let values = dataset.column_at(index)?.numeric()?;
            Some(GroupMeans {
                pollutant,
                means: group_means(&keys, values),
            })
        })
        .collect();

    Some(CityBreakdown {
        group_column: group_column.to_string(),
        counts,
        means,
        skipped: schema.absent_pollutants().to_vec(),
    })
}

fn group_means(keys: &[Option<String>], values: &[Option<f64>]) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (key, value) in keys.iter().zip(values) {
        let (Some(key), Some(value)) = (key, value) else {
            continue;
        };
        let entry = sums.entry(key.as_str()).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, n))| (key.to_string(), sum / n as f64))
        .collect()
}
