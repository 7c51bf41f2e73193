//! File-backed logging. The terminal is owned by the UI, so log records go to
//! `skyhop.log` in the platform data directory instead of stderr.

use crate::config::project_dirs;
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;

/// Filter variable, same syntax as `RUST_LOG`.
pub const LOG_ENV: &str = "SKYHOP_LOG";

const DEFAULT_FILTER: &str = "info";
const LOG_FILE: &str = "skyhop.log";

/// Where the log file lives, creating its directory if needed.
pub fn log_path() -> io::Result<PathBuf> {
    let dirs = project_dirs().map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    let dir = dirs.data_dir();
    fs::create_dir_all(dir)?;
    Ok(dir.join(LOG_FILE))
}

/// Install the global logger, appending to the log file.
pub fn init() -> io::Result<PathBuf> {
    let path = log_path()?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::from_env(Env::default().filter_or(LOG_ENV, DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(path)
}
