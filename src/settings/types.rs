use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default Lottie payload shown in the navigation sidebar.
pub const DEFAULT_ANIMATION_URL: &str =
    "https://assets4.lottiefiles.com/packages/lf20_qp1q7mct.json";

const PREVIEW_ROWS_RANGE: (usize, usize) = (1, 100);
const HISTOGRAM_BINS_RANGE: (usize, usize) = (5, 200);
const TIMEOUT_SECS_RANGE: (u64, u64) = (1, 60);
const MIN_ANIMATION_BYTES: usize = 1024;

/// Aggregate settings read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub animation: AnimationSettings,
    #[serde(default)]
    pub eda: EdaSettings,
}

/// Locations of the model artifact and dataset, plus the dataset's well-known columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Categorical column used by the city-wise views and scatter colouring.
    #[serde(default = "default_group_column")]
    pub group_column: String,
    /// Column holding the measured AQI.
    #[serde(default = "default_target_column")]
    pub target_column: String,
}

/// Decorative sidebar animation fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_animation_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_animation_max_bytes")]
    pub max_bytes: usize,
}

/// Tuning for the exploratory views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaSettings {
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

impl Settings {
    /// Clamp numeric knobs into their supported ranges.
    pub fn normalized(mut self) -> Self {
        self.eda.preview_rows = self
            .eda
            .preview_rows
            .clamp(PREVIEW_ROWS_RANGE.0, PREVIEW_ROWS_RANGE.1);
        self.eda.histogram_bins = self
            .eda
            .histogram_bins
            .clamp(HISTOGRAM_BINS_RANGE.0, HISTOGRAM_BINS_RANGE.1);
        self.animation.timeout_secs = self
            .animation
            .timeout_secs
            .clamp(TIMEOUT_SECS_RANGE.0, TIMEOUT_SECS_RANGE.1);
        self.animation.max_bytes = self.animation.max_bytes.max(MIN_ANIMATION_BYTES);
        self
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            model_path: default_model_path(),
            group_column: default_group_column(),
            target_column: default_target_column(),
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_animation_url(),
            timeout_secs: default_timeout_secs(),
            max_bytes: default_animation_max_bytes(),
        }
    }
}

impl Default for EdaSettings {
    fn default() -> Self {
        Self {
            preview_rows: default_preview_rows(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("Air_Quality.csv")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("air_quality_model.json")
}

fn default_group_column() -> String {
    "City".to_string()
}

fn default_target_column() -> String {
    "AQI".to_string()
}

fn default_animation_url() -> String {
    DEFAULT_ANIMATION_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_animation_max_bytes() -> usize {
    4 * 1024 * 1024
}

fn default_preview_rows() -> usize {
    5
}

fn default_histogram_bins() -> usize {
    30
}
