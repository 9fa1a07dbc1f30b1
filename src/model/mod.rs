//! Persisted AQI regression model and the [`Predictor`] contract the prediction view scores with.
//!
//! Artifacts are versioned JSON documents (see [`artifact`]). Loading validates the feature
//! names against the seven pollutant readings, so a loaded model can always score a
//! [`FeatureRecord`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::pollutant::Pollutant;

pub mod artifact;
mod record;
mod tree;

pub use artifact::{ARTIFACT_FORMAT_VERSION, AqiModel, ModelArtifact};
pub use record::FeatureRecord;

/// Errors raised while loading a model artifact.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Model artifact not found at {path}")]
    ArtifactNotFound { path: PathBuf },
    #[error("Failed to read model artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Model artifact {path} is corrupt: {reason}")]
    ArtifactCorrupt { path: PathBuf, reason: String },
    #[error("Model artifact {path} does not match the pollutant features: {reason}")]
    SchemaMismatch { path: PathBuf, reason: String },
}

/// Errors raised while scoring a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("{0} must be a finite number")]
    NonFiniteInput(Pollutant),
    #[error("Model produced a non-finite score")]
    NonFiniteScore,
}

/// Inference capability of a loaded model.
pub trait Predictor: Send + Sync {
    /// Features the model was trained on.
    fn features(&self) -> &[Pollutant];

    /// Score one record.
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictionError>;

    /// One-line summary shown beside the prediction inputs.
    fn describe(&self) -> String {
        format!("{} pollutant features", self.features().len())
    }
}

/// Read and validate a model artifact.
pub fn load_model(path: &Path) -> Result<AqiModel, ModelLoadError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ModelLoadError::ArtifactNotFound {
            path: path.to_path_buf(),
        },
        _ => ModelLoadError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let artifact: ModelArtifact =
        serde_json::from_slice(&bytes).map_err(|err| ModelLoadError::ArtifactCorrupt {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
    let model = AqiModel::compile(artifact).map_err(|err| err.at(path))?;
    tracing::info!(
        "Loaded model {} from {} ({} features)",
        model.model_id().unwrap_or("<unnamed>"),
        path.display(),
        model.features().len()
    );
    if model.features().len() < Pollutant::ALL.len() {
        tracing::warn!("Model uses {} of 7 pollutant features", model.features().len());
    }
    Ok(model)
}
