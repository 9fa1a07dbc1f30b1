//! Logging setup for the dashboard.
//!
//! Installs a global tracing subscriber that writes to stdout and to a per-launch log file under
//! `.airlens/logs`. Files are named after the launch time and only the newest few are kept.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{self, AppDirError};

const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "airlens";
const LOG_EXTENSION: &str = "log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Log directory unavailable: {0}")]
    Dirs(#[from] AppDirError),
    #[error("Failed to format log filename time: {0}")]
    FormatTime(#[from] time::error::Format),
    #[error("Failed to open log file: {0}")]
    Appender(#[from] InitError),
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize tracing to write to stdout and a per-launch log file.
///
/// Subsequent calls are no-ops. Failing to prune old files only logs a warning.
pub fn init() -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = app_dirs::logs_dir()?;
    let stem = log_file_stem(now_local_or_utc())?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&stem)
        .filename_suffix(LOG_EXTENSION)
        .build(&log_dir)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let timer = build_timer();
    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(fmt::layer().with_timer(timer.clone()).with_writer(io::stdout))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(
        "Logging to {}",
        log_dir.join(format!("{stem}.{LOG_EXTENSION}")).display()
    );
    match prune_old_logs(&log_dir, MAX_LOG_FILES) {
        Ok(0) => {}
        Ok(removed) => tracing::debug!("Removed {removed} old log files"),
        Err(err) => tracing::warn!("Could not prune old logs in {}: {err}", log_dir.display()),
    }
    Ok(())
}

/// Delete the oldest `.log` files so at most `keep` remain. Returns how many were removed.
fn prune_old_logs(dir: &Path, keep: usize) -> io::Result<usize> {
    let mut logs: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some(LOG_EXTENSION)
        {
            continue;
        }
        let modified = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        logs.push((modified, path));
    }
    logs.sort();
    let excess = logs.len().saturating_sub(keep);
    for (_, path) in logs.iter().take(excess) {
        fs::remove_file(path)?;
    }
    Ok(excess)
}

fn log_file_stem(now: OffsetDateTime) -> Result<String, time::error::Format> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!("{LOG_FILE_PREFIX}_{}", now.format(NAME_FORMAT)?))
}

fn build_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};
    use tempfile::tempdir;

    #[test]
    fn log_stem_carries_prefix_and_launch_time() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(log_file_stem(fixed).unwrap(), "airlens_2023-11-14_22-13-20");
    }

    #[test]
    fn prune_keeps_newest_logs_and_ignores_other_files() {
        let dir = tempdir().unwrap();
        for idx in 0..5 {
            fs::write(dir.path().join(format!("airlens_{idx}.log")), "").unwrap();
            thread::sleep(Duration::from_millis(10));
        }
        fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        assert_eq!(prune_old_logs(dir.path(), 3).unwrap(), 2);

        let mut logs: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| name.ends_with(".log"))
            .collect();
        logs.sort();
        assert_eq!(logs, vec!["airlens_2.log", "airlens_3.log", "airlens_4.log"]);
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn prune_under_limit_removes_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("airlens_0.log"), "").unwrap();
        assert_eq!(prune_old_logs(dir.path(), 3).unwrap(), 0);
    }
}
