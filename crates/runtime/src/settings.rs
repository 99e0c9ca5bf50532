use std::{
    fmt, fs,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::config::split_list;

/// Errors that abort a run before any directory is swept.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk record. Field names follow the config file format.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    directories: String,
    extensions: String,
    pattern: String,
    days_of_expiration: u32,
    search_in_subdirectories: bool,
}

/// Validated sweep configuration, read once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Root directories, in config order.
    pub directories: Vec<PathBuf>,
    /// Case-insensitive filename suffixes. Blank entries never match.
    pub extensions: Vec<String>,
    /// Regular expression searched in the file name. Blank disables it; an
    /// invalid one is reported when the rules are built and then ignored.
    pub pattern: String,
    /// Inclusive age threshold in whole days.
    pub min_age_days: u32,
    pub recursive: bool,
}

impl SweepConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = serde_json::from_reader(BufReader::new(file))?;
        Self::from_raw(raw)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        // A blank piece would resolve to the working directory.
        let directories = split_list(&raw.directories)
            .into_iter()
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .collect();

        Ok(Self {
            directories,
            extensions: split_list(&raw.extensions),
            pattern: raw.pattern,
            min_age_days: raw.days_of_expiration,
            recursive: raw.search_in_subdirectories,
        })
    }
}

impl fmt::Display for SweepConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let directories: Vec<_> = self
            .directories
            .iter()
            .map(|d| d.display().to_string())
            .collect();

        write!(
            f,
            "{{Directories: {}, Extensions: {}, Pattern: {}, DaysOfExpiration: {}, SearchInSubdirectories: {}}}",
            directories.join("|"),
            self.extensions.join("|"),
            self.pattern,
            self.min_age_days,
            self.recursive
        )
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
