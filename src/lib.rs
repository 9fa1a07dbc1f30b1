//! Library exports for reuse in benchmarks and tests.
/// Sidebar animation fetch.
pub mod animation;
/// Config and log directory resolution.
pub mod app_dirs;
/// CSV loading into a typed, immutable table.
pub mod dataset;
/// Exploratory analysis over a loaded dataset.
pub mod eda;
/// Shared egui UI modules.
pub mod egui_app;
pub(crate) mod http_client;
/// Tracing subscriber setup.
pub mod logging;
/// AQI model artifacts and inference.
pub mod model;
/// The seven pollutant readings.
pub mod pollutant;
/// Scoring and AQI buckets.
pub mod prediction;
/// Load-once dataset and model handles.
pub mod resources;
/// Persisted user settings.
pub mod settings;
