//! Dispatch command implementation for the Headway CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use headway_core::{Identifier, Params, RouteId, StopId};
use headway_dispatch::{DispatchOptions, TaskOutcome, dispatch_route, dispatch_split};
use headway_forecast::ForecastTable;
use jiff::civil::Date;
use log::error;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::export::write_schedule;
use crate::inputs::{load_forecast, load_params, require_existing};
use crate::report::write_report;
use crate::{
    ARG_DATE, ARG_FORECAST, ARG_OPTIMISE_START, ARG_OUTPUT, ARG_PARAMS, ARG_ROUTE,
    ARG_SEED, ARG_START_POINT, CliError, ENV_DATE, ENV_FORECAST, ENV_PARAMS, ENV_ROUTE,
};

/// Schedule file written when `--output` is not given.
const DEFAULT_OUTPUT: &str = "schedule.csv";

/// CLI arguments for the `dispatch` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Dispatch every available vehicle of a route, one decision \
                 at a time, against a passenger demand forecast. Passing two \
                 --start-point values splits the route between them and \
                 dispatches both halves concurrently.",
    about = "Plan the departures of a route"
)]
#[ortho_config(prefix = "HEADWAY")]
pub(crate) struct DispatchArgs {
    /// Path to the JSON configuration document.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) params_path: Option<Utf8PathBuf>,
    /// Path to the forecast CSV.
    #[arg(long = ARG_FORECAST, value_name = "path")]
    #[serde(default)]
    pub(crate) forecast: Option<Utf8PathBuf>,
    /// Route to dispatch.
    #[arg(long = ARG_ROUTE, value_name = "id")]
    #[serde(default)]
    pub(crate) route: Option<String>,
    /// Service day, `YYYY-MM-DD`.
    #[arg(long = ARG_DATE, value_name = "date")]
    #[serde(default)]
    pub(crate) date: Option<Date>,
    /// Start stop of a split run; give exactly two.
    #[arg(long = ARG_START_POINT, value_name = "stop")]
    #[serde(default)]
    pub(crate) start_point: Vec<String>,
    /// Also search over every stop as the departure point.
    #[arg(long = ARG_OPTIMISE_START)]
    #[serde(default)]
    pub(crate) optimise_start: bool,
    /// Seed of the first decision.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Where to write the schedule CSV.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl DispatchArgs {
    pub(crate) fn into_config(self) -> Result<DispatchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DispatchConfig::try_from(merged)
    }
}

/// Resolved `dispatch` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DispatchConfig {
    /// Path to the configuration document.
    pub(crate) params_path: Utf8PathBuf,
    /// Path to the forecast CSV.
    pub(crate) forecast_path: Utf8PathBuf,
    /// Route to dispatch.
    pub(crate) route: RouteId,
    /// Service day.
    pub(crate) date: Date,
    /// Start stops of a split run.
    pub(crate) start_points: Option<(StopId, StopId)>,
    /// Start-stop optimisation switch.
    pub(crate) optimise_start: bool,
    /// Seed of the first decision.
    pub(crate) seed: u64,
    /// Schedule CSV path.
    pub(crate) output: Utf8PathBuf,
}

impl DispatchConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.params_path, ARG_PARAMS)?;
        require_existing(&self.forecast_path, ARG_FORECAST)?;
        Ok(())
    }

    pub(crate) fn options(&self) -> DispatchOptions {
        DispatchOptions {
            optimise_start: self.optimise_start,
            ..DispatchOptions::new(self.date, self.seed)
        }
    }
}

impl TryFrom<DispatchArgs> for DispatchConfig {
    type Error = CliError;

    fn try_from(args: DispatchArgs) -> Result<Self, Self::Error> {
        let params_path = args.params_path.ok_or(CliError::MissingArgument {
            field: ARG_PARAMS,
            env: ENV_PARAMS,
        })?;
        let forecast_path = args.forecast.ok_or(CliError::MissingArgument {
            field: ARG_FORECAST,
            env: ENV_FORECAST,
        })?;
        let route = args.route.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE,
            env: ENV_ROUTE,
        })?;
        let date = args.date.ok_or(CliError::MissingArgument {
            field: ARG_DATE,
            env: ENV_DATE,
        })?;
        let start_points = match args.start_point.as_slice() {
            [] => None,
            [first, second] => Some((
                Identifier::parse_lenient(first),
                Identifier::parse_lenient(second),
            )),
            other => return Err(CliError::StartPointCount { count: other.len() }),
        };
        Ok(Self {
            params_path,
            forecast_path,
            route: Identifier::parse_lenient(&route),
            date,
            start_points,
            optimise_start: args.optimise_start,
            seed: args.seed.unwrap_or_default(),
            output: args
                .output
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT)),
        })
    }
}

pub(crate) fn run_dispatch(args: DispatchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    run_dispatch_with(&config, writer)
}

/// Run a resolved dispatch, report every successful task and write the
/// schedule. The first failed task is returned after the output is written.
pub(crate) fn run_dispatch_with(
    config: &DispatchConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut params = load_params(&config.params_path)?;
    let forecast = load_forecast(&config.forecast_path)?;
    let outcomes = execute(config, &mut params, &forecast)?;

    write_report(writer, &config.route, &outcomes).map_err(CliError::WriteReport)?;
    if outcomes.iter().any(|outcome| outcome.result.is_ok()) {
        write_schedule(&config.output, &params, &config.route, &outcomes)?;
    }

    let mut failures = outcomes
        .into_iter()
        .filter_map(|outcome| outcome.result.err().map(|err| (outcome.start_stop, err)));
    let first_failure = failures.next();
    for (start, err) in failures {
        error!("{}", CliError::dispatch(start.as_ref(), err));
    }
    first_failure.map_or(Ok(()), |(start, err)| {
        Err(CliError::dispatch(start.as_ref(), err))
    })
}

fn execute(
    config: &DispatchConfig,
    params: &mut Params,
    forecast: &ForecastTable,
) -> Result<Vec<TaskOutcome>, CliError> {
    let options = config.options();
    match &config.start_points {
        None => Ok(vec![TaskOutcome {
            start_stop: None,
            result: dispatch_route(params, forecast, &config.route, &options),
        }]),
        Some((first, second)) => {
            dispatch_split(params, forecast, &config.route, first, second, &options)
                .map(Vec::from)
                .map_err(|source| CliError::dispatch(None, source))
        }
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<DispatchConfig, CliError> {
    let merged = DispatchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    DispatchConfig::try_from(merged)
}
