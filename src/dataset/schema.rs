use crate::pollutant::Pollutant;

use super::Column;

/// Names of the dataset's non-pollutant columns with a fixed meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoles {
    /// Categorical column the city-wise views group by.
    pub group_column: String,
    /// Measured AQI column.
    pub target_column: String,
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self {
            group_column: "City".to_string(),
            target_column: "AQI".to_string(),
        }
    }
}

/// Positions of the well-known columns, resolved once when the table is loaded.
///
/// Pollutant and target columns only count as present when they are numeric, matching how
/// numeric-only aggregations drop text columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSchema {
    pollutants: Vec<(Pollutant, usize)>,
    absent_pollutants: Vec<Pollutant>,
    group: Option<(String, usize)>,
    target: Option<(String, usize)>,
}

impl DatasetSchema {
    pub(crate) fn resolve(columns: &[Column], roles: &ColumnRoles) -> Self {
        let numeric_index = |name: &str| {
            columns
                .iter()
                .position(|column| column.name() == name && column.dtype().is_numeric())
        };
        let mut pollutants = Vec::new();
        let mut absent_pollutants = Vec::new();
        for pollutant in Pollutant::ALL {
            match numeric_index(pollutant.column_name()) {
                Some(index) => pollutants.push((pollutant, index)),
                None => absent_pollutants.push(pollutant),
            }
        }
        let group = columns
            .iter()
            .position(|column| column.name() == roles.group_column)
            .map(|index| (roles.group_column.clone(), index));
        let target =
            numeric_index(&roles.target_column).map(|index| (roles.target_column.clone(), index));
        Self {
            pollutants,
            absent_pollutants,
            group,
            target,
        }
    }

    /// Numeric pollutant columns present in the table, in [`Pollutant::ALL`] order.
    pub fn pollutants(&self) -> &[(Pollutant, usize)] {
        &self.pollutants
    }

    /// Column index for `pollutant` when it is present and numeric.
    pub fn pollutant(&self, pollutant: Pollutant) -> Option<usize> {
        self.pollutants
            .iter()
            .find(|(candidate, _)| *candidate == pollutant)
            .map(|(_, index)| *index)
    }

    /// Pollutants missing from the table (or present only as text).
    pub fn absent_pollutants(&self) -> &[Pollutant] {
        &self.absent_pollutants
    }

    /// Grouping column name and index.
    pub fn group(&self) -> Option<(&str, usize)> {
        self.group.as_ref().map(|(name, index)| (name.as_str(), *index))
    }

    /// Target column name and index.
    pub fn target(&self) -> Option<(&str, usize)> {
        self.target.as_ref().map(|(name, index)| (name.as_str(), *index))
    }
}
