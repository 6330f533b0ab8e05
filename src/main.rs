//! Kgrade: static grading for kernel-module submissions.
//!
//! Entry point for the `kgrade` binary. A failing grade and a bad input both
//! surface as errors so the process exit code tells them apart.

mod cli;
mod commands;

use cli::Cli;
use kgrade::exit_codes;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
