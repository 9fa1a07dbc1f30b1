//! Dashboard settings persisted as TOML under the `.airlens` root.
//!
//! Config keys: `[data]` (`dataset_path`, `model_path`, `group_column`, `target_column`),
//! `[animation]` (`enabled`, `url`, `timeout_secs`, `max_bytes`) and `[eda]`
//! (`preview_rows`, `histogram_bins`). Every key is optional.

mod errors;
mod io;
mod types;

pub use errors::SettingsError;
pub use io::{
    CONFIG_FILE_NAME, data_search_dirs, load_from_path, load_or_default, resolve_data_path,
    save_to_path, settings_path,
};
pub use types::{AnimationSettings, DataSettings, EdaSettings, Settings};
