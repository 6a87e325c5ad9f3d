//! Check command implementation for the Headway CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::inputs::{load_params, require_existing, save_params};
use crate::{ARG_PARAMS, ARG_WRITE, CliError, ENV_CHECK_PARAMS};

/// CLI arguments for the `check` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load a configuration document, check its cross references \
                 and value ranges, and optionally write it back out in \
                 canonical form.",
    about = "Validate a configuration document"
)]
#[ortho_config(prefix = "HEADWAY")]
pub(crate) struct CheckArgs {
    /// Path to the JSON configuration document.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) params_path: Option<Utf8PathBuf>,
    /// Write the loaded document to this path.
    #[arg(long = ARG_WRITE, value_name = "path")]
    #[serde(default)]
    pub(crate) write: Option<Utf8PathBuf>,
}

/// Resolved `check` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckConfig {
    /// Path to the configuration document.
    pub(crate) params_path: Utf8PathBuf,
    /// Optional re-save target.
    pub(crate) write: Option<Utf8PathBuf>,
}

impl TryFrom<CheckArgs> for CheckConfig {
    type Error = CliError;

    fn try_from(args: CheckArgs) -> Result<Self, Self::Error> {
        let params_path = args.params_path.ok_or(CliError::MissingArgument {
            field: ARG_PARAMS,
            env: ENV_CHECK_PARAMS,
        })?;
        Ok(Self {
            params_path,
            write: args.write,
        })
    }
}

pub(crate) fn run_check(args: CheckArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = CheckConfig::try_from(merged)?;
    require_existing(&config.params_path, ARG_PARAMS)?;
    run_check_with(&config, writer)
}

pub(crate) fn run_check_with(config: &CheckConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let params = load_params(&config.params_path)?;
    writeln!(
        writer,
        "{}: {} stops, {} routes, {} vehicles",
        config.params_path,
        params.stops.len(),
        params.routes.len(),
        params.vehicles.len()
    )
    .map_err(CliError::WriteReport)?;
    if let Some(target) = &config.write {
        save_params(target, &params)?;
        writeln!(writer, "wrote {target}").map_err(CliError::WriteReport)?;
    }
    Ok(())
}
