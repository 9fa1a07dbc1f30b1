use std::path::{Path, PathBuf};

use crate::app_dirs;

use super::{Settings, SettingsError};

/// Default filename used to store the dashboard settings.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the settings file path, ensuring the parent directory exists.
pub fn settings_path() -> Result<PathBuf, SettingsError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load settings from the `.airlens` root, writing defaults when no file exists yet.
pub fn load_or_default() -> Result<Settings, SettingsError> {
    let path = settings_path()?;
    if path.exists() {
        let settings = load_from_path(&path)?;
        tracing::info!("Loaded settings from {}", path.display());
        return Ok(settings);
    }
    let settings = Settings::default();
    if let Err(err) = save_to_path(&settings, &path) {
        tracing::warn!("Could not write default settings: {err}");
    } else {
        tracing::info!("Wrote default settings to {}", path.display());
    }
    Ok(settings)
}

/// Parse a settings file, normalizing out-of-range values.
pub fn load_from_path(path: &Path) -> Result<Settings, SettingsError> {
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<Settings>(&text)
        .map(Settings::normalized)
        .map_err(|source| SettingsError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}

/// Write settings as TOML, replacing the file in one rename so readers never see a partial file.
pub fn save_to_path(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;
    let data = toml::to_string_pretty(settings).map_err(|source| SettingsError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp_path = parent.join(format!(".{CONFIG_FILE_NAME}.{}.tmp", std::process::id()));
    let write_err = |source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    };
    std::fs::write(&tmp_path, data.as_bytes()).map_err(write_err)?;
    if let Err(source) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }
    Ok(())
}

/// Directories searched for relative data paths: the executable's directory, then the working
/// directory.
pub fn data_search_dirs() -> Vec<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();
    let mut dirs: Vec<PathBuf> = Vec::new();
    for dir in exe_dir.into_iter().chain(cwd) {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// Resolve a configured data path.
///
/// Absolute paths are kept. A relative path resolves against the first of `bases` that contains
/// it; when none does, the first base is used so the not-found error names the primary location.
pub fn resolve_data_path(path: &Path, bases: &[PathBuf]) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let candidates: Vec<PathBuf> = bases.iter().map(|base| base.join(path)).collect();
    candidates
        .iter()
        .find(|candidate| candidate.exists())
        .or(candidates.first())
        .cloned()
        .unwrap_or_else(|| path.to_path_buf())
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> SettingsError {
    match error {
        app_dirs::AppDirError::NoBaseDir => SettingsError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            SettingsError::CreateDir { path, source }
        }
    }
}
