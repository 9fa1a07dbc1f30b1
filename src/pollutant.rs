//! The seven pollutant readings shared by the model, the prediction form and the dataset views.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A pollutant column known at design time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "CO2")]
    Co2,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
}

impl Pollutant {
    /// Every pollutant, in form and chart order.
    pub const ALL: [Pollutant; 7] = [
        Pollutant::Co,
        Pollutant::Co2,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::O3,
        Pollutant::Pm25,
        Pollutant::Pm10,
    ];

    /// Pollutants with a distribution chart. CO2 is plotted only in the scatter and city views.
    pub const DISTRIBUTIONS: [Pollutant; 6] = [
        Pollutant::Co,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::O3,
        Pollutant::Pm25,
        Pollutant::Pm10,
    ];

    /// Column header used in datasets and model artifacts.
    pub const fn column_name(self) -> &'static str {
        match self {
            Pollutant::Co => "CO",
            Pollutant::Co2 => "CO2",
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::O3 => "O3",
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
        }
    }

    /// Look up a pollutant by its exact column header.
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|pollutant| pollutant.column_name() == name)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
