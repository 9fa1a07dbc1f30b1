use std::path::{Path, PathBuf};

use airlens::model::{FeatureRecord, PredictionError, Predictor};
use airlens::pollutant::Pollutant;

/// Small table shaped like the real export: a date and a text bucket beside the readings.
pub const AIR_QUALITY_CSV: &str = "\
Date,City,CO,CO2,NO2,SO2,O3,PM2.5,PM10,AQI,AQI_Bucket
2024-01-01,Delhi,1.2,410,45,12,30,80.5,150,180,Unhealthy
2024-01-01,Mumbai,0.8,405,25,8,40,35.0,70,90,Moderate
2024-01-02,Delhi,1.6,415,55,14,28,95.0,170,210,Unhealthy
2024-01-02,Chennai,0.4,400,12,5,35,15.5,30,40,Good
2024-01-03,Mumbai,NA,402,27,9,42,38.0,75,95,Moderate
2024-01-03,Chennai,0.5,401,,6,33,14.0,28,38,Good
";

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

pub fn linear_model_json() -> String {
    serde_json::json!({
        "format_version": 1,
        "model_id": "aqi-linear-test",
        "features": ["CO", "CO2", "NO2", "SO2", "O3", "PM2.5", "PM10"],
        "model": {
            "kind": "linear",
            "intercept": 2.0,
            "coefficients": {
                "CO": 0.0, "CO2": 0.0, "NO2": 0.5, "SO2": 0.0,
                "O3": 0.25, "PM2.5": 1.0, "PM10": 0.0
            }
        }
    })
    .to_string()
}

pub fn forest_model_json() -> String {
    serde_json::json!({
        "format_version": 1,
        "features": ["PM2.5", "O3"],
        "model": {
            "kind": "tree_ensemble",
            "combine": "mean",
            "trees": [
                { "nodes": [
                    { "split": { "feature": "PM2.5", "threshold": 30.0, "left": 1, "right": 2 } },
                    { "leaf": { "value": 40.0 } },
                    { "leaf": { "value": 160.0 } }
                ]},
                { "nodes": [
                    { "split": { "feature": "O3", "threshold": 80.0, "left": 1, "right": 2 } },
                    { "leaf": { "value": 44.0 } },
                    { "leaf": { "value": 80.0 } }
                ]}
            ]
        }
    })
    .to_string()
}

/// Returns `42.0` while O3 keeps its default reading and `120.0` once it changes.
pub struct OzoneSensitive;

impl Predictor for OzoneSensitive {
    fn features(&self) -> &[Pollutant] {
        &Pollutant::ALL
    }

    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError> {
        if record.get(Pollutant::O3) == FeatureRecord::DEFAULTS.get(Pollutant::O3) {
            Ok(42.0)
        } else {
            Ok(120.0)
        }
    }
}
