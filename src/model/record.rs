use crate::pollutant::Pollutant;

/// Single-row feature input: one reading per pollutant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    values: [f64; 7],
}

impl FeatureRecord {
    /// Readings pre-filled in the prediction form.
    pub const DEFAULTS: FeatureRecord = FeatureRecord {
        values: [258.0, 462.0, 22.0, 12.0, 60.0, 17.0, 35.0],
    };

    /// Build a record from values in [`Pollutant::ALL`] order.
    pub const fn new(values: [f64; 7]) -> Self {
        Self { values }
    }

    pub fn get(&self, pollutant: Pollutant) -> f64 {
        self.values[pollutant.index()]
    }

    pub fn set(&mut self, pollutant: Pollutant, value: f64) {
        self.values[pollutant.index()] = value;
    }

    pub fn get_mut(&mut self, pollutant: Pollutant) -> &mut f64 {
        &mut self.values[pollutant.index()]
    }

    /// Copy of the record with one reading replaced.
    pub fn with(mut self, pollutant: Pollutant, value: f64) -> Self {
        self.set(pollutant, value);
        self
    }

    /// First of `features` whose reading is NaN or infinite.
    pub fn first_non_finite(&self, features: &[Pollutant]) -> Option<Pollutant> {
        features
            .iter()
            .copied()
            .find(|pollutant| !self.get(*pollutant).is_finite())
    }
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self::DEFAULTS
    }
}
