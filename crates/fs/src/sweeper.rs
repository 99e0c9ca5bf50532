use std::{
    fs::{read_dir, remove_file},
    ops::AddAssign,
    path::{Path, PathBuf},
    time::SystemTime,
};

use log::debug;

use crate::{
    matcher::{SweepRules, days_old},
    record::FileCandidate,
    reporter::{SweepEvent, SweepOp, SweepReporter},
};

/// Totals of one sweep call, nested directories included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepResult {
    pub files_deleted: u64,
    pub bytes_deleted: u64,
    /// Recoverable failures met along the way. Never affects the counts above.
    pub failures: u64,
}

impl SweepResult {
    fn record_deletion(&mut self, size: u64) {
        self.files_deleted += 1;
        self.bytes_deleted += size;
    }
}

impl AddAssign for SweepResult {
    fn add_assign(&mut self, rhs: Self) {
        self.files_deleted += rhs.files_deleted;
        self.bytes_deleted += rhs.bytes_deleted;
        self.failures += rhs.failures;
    }
}

/// Depth-first, single-threaded retention sweep over one directory tree.
///
/// Files qualify by name (pattern or extension) and are removed once they
/// are at least `min_age_days` old. Listing, inspection and removal errors
/// are reported and skipped; they never abort the sweep.
pub struct Sweeper<'a> {
    rules: &'a SweepRules,
    reporter: &'a mut dyn SweepReporter,
    dry_run: bool,
}

impl<'a> Sweeper<'a> {
    pub fn new(rules: &'a SweepRules, reporter: &'a mut dyn SweepReporter) -> Self {
        Sweeper {
            rules,
            reporter,
            dry_run: false,
        }
    }

    /// Report what would be removed without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sweep `dir`. The caller checks that it exists; an unreadable
    /// directory yields zero counts.
    pub fn sweep(&mut self, dir: &Path) -> SweepResult {
        let mut result = SweepResult::default();

        let rd = match read_dir(dir) {
            Ok(rd) => rd,
            Err(e) => {
                self.fail(&mut result, dir, SweepOp::List, &e);
                return result;
            }
        };

        let parent = match std::path::absolute(dir) {
            Ok(p) => p,
            Err(e) => {
                self.fail(&mut result, dir, SweepOp::Resolve, &e);
                dir.to_path_buf()
            }
        };

        debug!("[sweep] scanning {}", parent.display());

        for entry_res in rd {
            let entry = match entry_res {
                Ok(e) => e,
                Err(e) => {
                    self.fail(&mut result, &parent, SweepOp::Inspect, &e);
                    continue;
                }
            };

            let candidate = match FileCandidate::inspect(&entry, &parent) {
                Ok(c) => c,
                Err(e) => {
                    let path = parent.join(entry.file_name());
                    self.fail(&mut result, path, SweepOp::Inspect, &e);
                    continue;
                }
            };

            if candidate.is_dir {
                if self.rules.recursive() {
                    let sub = self.sweep(&candidate.absolute_path);
                    result += sub;
                    self.reporter.report(SweepEvent::DirectorySwept {
                        path: candidate.absolute_path,
                        result: sub,
                    });
                }
                continue;
            }

            self.consider(candidate, &mut result);
        }

        result
    }

    fn consider(&mut self, candidate: FileCandidate, result: &mut SweepResult) {
        let Some(rule) = self.rules.qualifies(&candidate.name) else {
            return;
        };
        self.reporter.report(SweepEvent::matched(&candidate.name, rule));

        let age = days_old(candidate.modified, SystemTime::now());
        self.reporter.report(SweepEvent::Evaluated {
            name: candidate.name,
            modified: candidate.modified,
            days_old: age,
        });

        if !self.rules.is_expired(age) {
            return;
        }

        let FileCandidate {
            absolute_path: path,
            size,
            ..
        } = candidate;

        if self.dry_run {
            result.record_deletion(size);
            self.reporter.report(SweepEvent::WouldDelete { path, size });
            return;
        }

        match remove_file(&path) {
            Ok(()) => {
                result.record_deletion(size);
                self.reporter.report(SweepEvent::Deleted { path, size });
            }
            Err(e) => self.fail(result, path, SweepOp::Delete, &e),
        }
    }

    fn fail(
        &mut self,
        result: &mut SweepResult,
        path: impl Into<PathBuf>,
        op: SweepOp,
        err: &std::io::Error,
    ) {
        result.failures += 1;
        self.reporter.report(SweepEvent::failed(path, op, err));
    }
}

#[cfg(test)]
#[path = "sweeper_tests.rs"]
mod tests;
