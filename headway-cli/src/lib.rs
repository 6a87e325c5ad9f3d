//! Command-line interface for the Headway dispatch engine.
//!
//! `headway dispatch` runs the sequential dispatch loop over one route, or
//! over both halves of a route split between two start stops, prints a
//! report and writes the departure schedule as CSV. `headway check` loads
//! and validates a configuration document and can write it back out.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod check;
mod dispatch;
mod error;
mod export;
mod inputs;
mod report;

pub use crate::error::CliError;

use crate::check::{CheckArgs, run_check};
use crate::dispatch::{DispatchArgs, run_dispatch};

const ARG_PARAMS: &str = "params";
const ARG_FORECAST: &str = "forecast";
const ARG_ROUTE: &str = "route";
const ARG_DATE: &str = "date";
const ARG_START_POINT: &str = "start-point";
const ARG_OPTIMISE_START: &str = "optimise-start";
const ARG_SEED: &str = "seed";
const ARG_OUTPUT: &str = "output";
const ARG_WRITE: &str = "write";
const ENV_PARAMS: &str = "HEADWAY_CMDS_DISPATCH_PARAMS_PATH";
const ENV_FORECAST: &str = "HEADWAY_CMDS_DISPATCH_FORECAST";
const ENV_ROUTE: &str = "HEADWAY_CMDS_DISPATCH_ROUTE";
const ENV_DATE: &str = "HEADWAY_CMDS_DISPATCH_DATE";
const ENV_CHECK_PARAMS: &str = "HEADWAY_CMDS_CHECK_PARAMS_PATH";

/// Run the Headway CLI with the current process arguments and environment.
///
/// Reports go to standard output.
///
/// # Errors
///
/// Returns [`CliError`] for argument, configuration, input and dispatch
/// failures.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Dispatch(args) => run_dispatch(args, writer),
        Command::Check(args) => run_check(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "headway",
    about = "Demand-driven dispatch planning for fixed-route transit",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dispatch every available vehicle of a route.
    Dispatch(DispatchArgs),
    /// Validate a configuration document.
    Check(CheckArgs),
}

#[cfg(test)]
mod tests;
