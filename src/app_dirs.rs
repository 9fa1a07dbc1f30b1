//! Application directory helpers anchored to a single `.airlens` folder.
//!
//! Settings and log files live under the OS config directory (e.g. `%APPDATA%` on Windows,
//! `~/.config` on Linux). `AIRLENS_CONFIG_HOME` relocates the root for tests or portable setups.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory that lives under the OS config root.
pub const APP_DIR_NAME: &str = ".airlens";
/// Environment variable that replaces the OS config root.
pub const CONFIG_HOME_ENV: &str = "AIRLENS_CONFIG_HOME";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the root `.airlens` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let platform = BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf());
    let base = config_base_dir(std::env::var_os(CONFIG_HOME_ENV), platform)
        .ok_or(AppDirError::NoBaseDir)?;
    root_under(&base)
}

/// Return the logs directory inside the `.airlens` root, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join("logs"))
}

/// A non-empty `AIRLENS_CONFIG_HOME` wins over the platform config directory.
fn config_base_dir(env_home: Option<OsString>, platform: Option<PathBuf>) -> Option<PathBuf> {
    env_home
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or(platform)
}

fn root_under(base: &Path) -> Result<PathBuf, AppDirError> {
    ensure_dir(base.join(APP_DIR_NAME))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
