use std::{fmt, io, path::PathBuf, time::SystemTime};

use chrono::{DateTime, Local};
use humansize::{DECIMAL, format_size};
use log::{debug, error, info};

use crate::{matcher::MatchRule, sweeper::SweepResult};

/// Operation that failed without stopping the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOp {
    /// Existence check of a configured root
    Stat,
    List,
    Resolve,
    Inspect,
    Delete,
}

impl fmt::Display for SweepOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SweepOp::Stat => "stat",
            SweepOp::List => "list",
            SweepOp::Resolve => "resolve",
            SweepOp::Inspect => "inspect",
            SweepOp::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Decision points of a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepEvent {
    Matched {
        name: String,
        rule: String,
        by_pattern: bool,
    },
    Evaluated {
        name: String,
        modified: SystemTime,
        days_old: u64,
    },
    Deleted {
        path: PathBuf,
        size: u64,
    },
    WouldDelete {
        path: PathBuf,
        size: u64,
    },
    DirectorySwept {
        path: PathBuf,
        result: SweepResult,
    },
    Failed {
        path: PathBuf,
        op: SweepOp,
        error: String,
    },
}

impl SweepEvent {
    pub(crate) fn matched(name: &str, rule: MatchRule<'_>) -> Self {
        let (rule, by_pattern) = match rule {
            MatchRule::Pattern(p) => (p, true),
            MatchRule::Extension(e) => (e, false),
        };
        SweepEvent::Matched {
            name: name.to_owned(),
            rule: rule.to_owned(),
            by_pattern,
        }
    }

    pub fn failed(path: impl Into<PathBuf>, op: SweepOp, err: &io::Error) -> Self {
        SweepEvent::Failed {
            path: path.into(),
            op,
            error: err.to_string(),
        }
    }
}

/// Sink for sweep events, handed to the sweeper by the caller.
pub trait SweepReporter {
    fn report(&mut self, event: SweepEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogReporter;

impl SweepReporter for LogReporter {
    fn report(&mut self, event: SweepEvent) {
        match event {
            SweepEvent::Matched {
                name,
                rule,
                by_pattern: true,
            } => debug!("Word '{name}' match with string '{rule}'"),
            SweepEvent::Matched { name, rule, .. } => {
                debug!("Word '{name}' has suffix '{rule}'")
            }
            SweepEvent::Evaluated {
                name,
                modified,
                days_old,
            } => {
                let date = DateTime::<Local>::from(modified).format("%Y-%m-%d");
                info!("File: {name} - Last update: {date} - Days old: {days_old}");
            }
            SweepEvent::Deleted { path, size } => info!(
                "File deleted: {} - Size: {}",
                path.display(),
                format_size(size, DECIMAL)
            ),
            SweepEvent::WouldDelete { path, size } => info!(
                "File would be deleted: {} - Size: {}",
                path.display(),
                format_size(size, DECIMAL)
            ),
            SweepEvent::DirectorySwept { path, result } => info!(
                "Directory: {} - Files deleted: {} - Size deleted: {}",
                path.display(),
                result.files_deleted,
                format_size(result.bytes_deleted, DECIMAL)
            ),
            SweepEvent::Failed { path, op, error } => {
                error!("[{op}] {}: {error}", path.display())
            }
        }
    }
}

/// Keeps every event in memory, for tests.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Vec<SweepEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SweepEvent] {
        &self.events
    }

    pub fn deleted_paths(&self) -> Vec<PathBuf> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SweepEvent::Deleted { path, .. } | SweepEvent::WouldDelete { path, .. } => {
                    Some(path.clone())
                }
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, SweepOp)> {
        self.events.iter().filter_map(|e| match e {
            SweepEvent::Failed { path, op, .. } => Some((path, *op)),
            _ => None,
        })
    }
}

impl SweepReporter for RecordingReporter {
    fn report(&mut self, event: SweepEvent) {
        self.events.push(event);
    }
}
