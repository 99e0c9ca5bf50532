use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Args;
use humansize::{DECIMAL, format_size};
use log::{debug, error, warn};
use logsweep_fs::{
    LogReporter, SweepEvent, SweepOp, SweepReporter, SweepResult, SweepRules, Sweeper,
};
use logsweep_runtime::{
    SweepConfig, default_config_path,
    logging::{self, LogDestination},
};

#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Path to the JSON config file
    #[arg(long, short = 'c', default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Directory for the per-run log file
    #[arg(long, default_value = ".")]
    pub log_dir: PathBuf,

    /// Log to stderr instead of a file
    #[arg(long)]
    pub stderr: bool,

    /// Report what would be deleted without deleting anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

pub fn run(args: SweepArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("[sweep] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: SweepArgs) -> Result<ExitCode> {
    let config = SweepConfig::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;

    let destination = if args.stderr {
        LogDestination::Stderr
    } else {
        LogDestination::Directory(args.log_dir.clone())
    };
    let log_path = logging::init(&destination).context("failed to open log destination")?;
    if let Some(path) = log_path {
        debug!("Logging to {}", path.display());
    }

    debug!("Config: {config}");

    let rules = SweepRules::from_config(&config);
    let total = run_sweep(&config, &rules, &mut LogReporter, args.dry_run);

    warn!(
        "Files deleted: {} - Size deleted: {}",
        total.files_deleted,
        format_size(total.bytes_deleted, DECIMAL)
    );
    if total.failures > 0 {
        warn!("Recoverable failures: {}", total.failures);
    }

    Ok(ExitCode::SUCCESS)
}

/// Sweep every configured root in order and sum the results. Roots that are
/// missing or cannot be checked are reported and skipped.
pub fn run_sweep(
    config: &SweepConfig,
    rules: &SweepRules,
    reporter: &mut dyn SweepReporter,
    dry_run: bool,
) -> SweepResult {
    let mut total = SweepResult::default();

    for dir in &config.directories {
        if let Err(e) = fs::metadata(dir) {
            reporter.report(SweepEvent::failed(dir, SweepOp::Stat, &e));
            total.failures += 1;
            continue;
        }

        debug!("[sweep] root {}", dir.display());
        total += Sweeper::new(rules, &mut *reporter)
            .dry_run(dry_run)
            .sweep(dir);
    }

    total
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
