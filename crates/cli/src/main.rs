use std::process::ExitCode;

use clap::Parser;
use logsweep_runtime::PROGRAM_NAME;

mod commands;

use commands::SweepArgs;

#[derive(Debug, Parser)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "Delete files older than a retention threshold"
)]
pub struct Cli {
    #[command(flatten)]
    pub sweep: SweepArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    commands::sweep::run(cli.sweep)
}
