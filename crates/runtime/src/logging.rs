use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock},
};

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use thiserror::Error;

use crate::config::{PROGRAM_LOG_LEVEL, log_file_name};

/// Where the run's log records go.
#[derive(Debug, Clone)]
pub enum LogDestination {
    Stderr,
    /// Timestamped per-run file inside this directory.
    Directory(PathBuf),
}

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("cannot open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("logger already installed")]
    Install,
}

enum LogTarget {
    Stderr,
    File(Mutex<File>),
}

pub struct Logger {
    level: Level,
    target: LogTarget,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let msg = format!(
                "{} {} [{}] {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );

            match &self.target {
                LogTarget::Stderr => {
                    eprintln!("{msg}")
                }
                LogTarget::File(file) => {
                    if let Ok(mut file) = file.lock() {
                        let _ = writeln!(file, "{msg}");
                    }
                }
            }
        }
    }

    fn flush(&self) {
        if let LogTarget::File(file) = &self.target
            && let Ok(mut file) = file.lock()
        {
            let _ = file.flush();
        }
    }
}

fn get_level_from_env(default: Level) -> Level {
    std::env::var(PROGRAM_LOG_LEVEL)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(default)
}

/// Open (append) the per-run log file for the current hour inside `dir`.
pub fn open_log_file(dir: &Path) -> Result<(PathBuf, File), LogInitError> {
    let path = dir.join(log_file_name(&Local::now()));
    let open = || -> io::Result<File> {
        fs::create_dir_all(dir)?;
        OpenOptions::new().create(true).append(true).open(&path)
    };

    match open() {
        Ok(file) => Ok((path, file)),
        Err(source) => Err(LogInitError::Open { path, source }),
    }
}

/// Install the process logger. Returns the log file path for file destinations.
pub fn init(destination: &LogDestination) -> Result<Option<PathBuf>, LogInitError> {
    match destination {
        LogDestination::Stderr => {
            _init(Logger {
                level: get_level_from_env(Level::Warn),
                target: LogTarget::Stderr,
            })
            .map_err(|_| LogInitError::Install)?;
            Ok(None)
        }
        LogDestination::Directory(dir) => {
            let (path, file) = open_log_file(dir)?;
            _init(Logger {
                level: get_level_from_env(Level::Debug),
                target: LogTarget::File(Mutex::new(file)),
            })
            .map_err(|_| LogInitError::Install)?;
            Ok(Some(path))
        }
    }
}

fn _init(logger: Logger) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // Only the first logger is installed; later calls keep it and leave the
    // max level alone so the two never disagree.
    let init_call = LOGGER.get().is_none();
    let level = logger.level;
    let logger = LOGGER.get_or_init(|| logger);

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(level.to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
