use super::*;
use crate::dataset::load_dataset;
use crate::model::PredictionError;
use crate::pollutant::Pollutant;
use std::sync::Arc;
use std::sync::mpsc;
use tempfile::tempdir;

/// Returns `42.0` for the default O3 reading and `120.0` otherwise.
pub(super) struct OzoneStub;

impl Predictor for OzoneStub {
    fn features(&self) -> &[Pollutant] {
        &Pollutant::ALL
    }

    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError> {
        if record.get(Pollutant::O3) == FeatureRecord::default().get(Pollutant::O3) {
            Ok(42.0)
        } else {
            Ok(120.0)
        }
    }
}

pub(super) fn sample_dataset() -> Arc<Dataset> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Air_Quality.csv");
    std::fs::write(
        &path,
        "City,CO,NO2,PM2.5,AQI\nDelhi,1.0,20,30,120\nPune,0.5,10,12,45\nDelhi,1.5,30,40,150\n",
    )
    .unwrap();
    Arc::new(load_dataset(&path).unwrap())
}

pub(super) fn missing_dataset() -> DatasetError {
    DatasetError::DatasetNotFound {
        path: "missing.csv".into(),
    }
}

pub(super) fn dummy_controller() -> DashboardController {
    let resources = AppResources::from_parts(Ok(sample_dataset()), Ok(Arc::new(OzoneStub)));
    DashboardController::new(resources, EdaSettings::default())
}

pub(super) fn controller_without_model() -> DashboardController {
    let resources = AppResources::from_parts(
        Ok(sample_dataset()),
        Err(ModelLoadError::ArtifactNotFound {
            path: "air_quality_model.json".into(),
        }),
    );
    DashboardController::new(resources, EdaSettings::default())
}

pub(super) fn finished_fetch(result: AnimationResult) -> Receiver<AnimationResult> {
    let (tx, rx) = mpsc::channel();
    tx.send(result).unwrap();
    rx
}
