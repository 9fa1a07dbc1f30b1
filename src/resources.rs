//! Load-once handles for the dataset and predictor shared by every page.

use std::path::PathBuf;
use std::sync::Arc;

use crate::dataset::{ColumnRoles, Dataset, DatasetError, load_dataset_with};
use crate::model::{ModelLoadError, Predictor, load_model};
use crate::settings::{Settings, resolve_data_path};

/// Dataset and model, each either loaded or carrying the reason it is unavailable.
///
/// A failed load only disables the page that needs it; the other page keeps working.
pub struct AppResources {
    pub dataset: Result<Arc<Dataset>, DatasetError>,
    pub predictor: Result<Arc<dyn Predictor>, ModelLoadError>,
}

impl AppResources {
    /// Resolve the configured paths against `search_dirs` and load both artifacts.
    pub fn load(settings: &Settings, search_dirs: &[PathBuf]) -> Self {
        let roles = ColumnRoles {
            group_column: settings.data.group_column.clone(),
            target_column: settings.data.target_column.clone(),
        };
        let dataset_path = resolve_data_path(&settings.data.dataset_path, search_dirs);
        let model_path = resolve_data_path(&settings.data.model_path, search_dirs);

        let dataset = load_dataset_with(&dataset_path, &roles).map(Arc::new);
        if let Err(err) = &dataset {
            tracing::error!("{err}");
        }
        let predictor = load_model(&model_path).map(|model| Arc::new(model) as Arc<dyn Predictor>);
        if let Err(err) = &predictor {
            tracing::error!("{err}");
        }
        Self { dataset, predictor }
    }

    /// Wrap already-loaded handles.
    pub fn from_parts(
        dataset: Result<Arc<Dataset>, DatasetError>,
        predictor: Result<Arc<dyn Predictor>, ModelLoadError>,
    ) -> Self {
        Self { dataset, predictor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_files_are_reported_per_resource() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Air_Quality.csv"), "City,CO,AQI\nA,1,2\n").unwrap();

        let resources = AppResources::load(&Settings::default(), &[dir.path().to_path_buf()]);

        let dataset = resources.dataset.unwrap();
        assert_eq!(dataset.row_count(), 1);
        assert!(matches!(
            resources.predictor,
            Err(ModelLoadError::ArtifactNotFound { .. })
        ));
    }

    #[test]
    fn configured_columns_drive_the_schema() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("data.csv"), "Station,CO,Index\nA,1,2\n").unwrap();
        let mut settings = Settings::default();
        settings.data.dataset_path = "data.csv".into();
        settings.data.group_column = "Station".into();
        settings.data.target_column = "Index".into();

        let resources = AppResources::load(&settings, &[dir.path().to_path_buf()]);

        let dataset = resources.dataset.unwrap();
        assert_eq!(dataset.schema().group().map(|(name, _)| name), Some("Station"));
        assert_eq!(dataset.schema().target().map(|(name, _)| name), Some("Index"));
    }

    #[test]
    fn artifacts_are_found_beside_the_executable_from_any_working_directory() {
        let app_dir = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        std::fs::write(app_dir.path().join("Air_Quality.csv"), "City,CO,AQI\nA,1,2\n").unwrap();
        std::fs::write(
            app_dir.path().join("air_quality_model.json"),
            r#"{"format_version":1,"features":["CO"],"model":{"kind":"linear","intercept":1.0,"coefficients":{"CO":2.0}}}"#,
        )
        .unwrap();
        let search_dirs = [app_dir.path().to_path_buf(), elsewhere.path().to_path_buf()];

        let resources = AppResources::load(&Settings::default(), &search_dirs);

        assert_eq!(
            resources.dataset.unwrap().source(),
            app_dir.path().join("Air_Quality.csv")
        );
        assert_eq!(resources.predictor.unwrap().features().len(), 1);
    }
}
