use std::path::PathBuf;

use chrono::{DateTime, TimeZone};

pub const PROGRAM_NAME: &str = "logsweep";
pub const PROGRAM_LOG_LEVEL: &str = "LOGSWEEP_LOG_LEVEL";

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

pub const LOG_FILE_PREFIX: &str = "files-deleted";

/// Separator for the `directories` and `extensions` config fields.
pub const LIST_DELIMITER: char = '|';

pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Per-run log file name, bucketed by hour: `files-deleted.2024-03-01-14.log`.
pub fn log_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{}.{}.log", LOG_FILE_PREFIX, now.format("%Y-%m-%d-%H"))
}

/// Split a delimited config field, preserving order and empty pieces.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_DELIMITER).map(str::to_owned).collect()
}
