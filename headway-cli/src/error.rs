//! Error types emitted by the Headway CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use headway_core::{ConfigError, DispatchError, StopId};
use headway_forecast::ForecastLoadError;
use thiserror::Error;

/// Errors emitted by the Headway CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable.
        env: &'static str,
    },
    /// Split runs take exactly two start stops.
    #[error("expected 0 or 2 --start-point values, found {count}")]
    StartPointCount {
        /// Number of start stops supplied.
        count: usize,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the input.
        field: &'static str,
        /// Missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the input.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the input.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Opening an input file failed.
    #[error("failed to open {path:?}: {source}")]
    OpenInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration document could not be decoded.
    #[error("failed to parse configuration JSON at {path:?}: {source}")]
    ParseParams {
        /// Configuration path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The configuration document failed validation.
    #[error("configuration in {path:?} failed validation: {source}")]
    InvalidParams {
        /// Configuration path.
        path: Utf8PathBuf,
        /// First problem found.
        #[source]
        source: ConfigError,
    },
    /// The forecast CSV could not be loaded.
    #[error("failed to load forecast {path:?}: {source}")]
    LoadForecast {
        /// Forecast path.
        path: Utf8PathBuf,
        /// Loader error.
        #[source]
        source: ForecastLoadError,
    },
    /// A dispatch run failed.
    #[error("dispatch from {start} failed: {source}")]
    Dispatch {
        /// Start stop of the failing task, or `first stop`.
        start: String,
        /// Underlying error.
        #[source]
        source: DispatchError,
    },
    /// Creating an output file failed.
    #[error("failed to create {path:?}: {source}")]
    CreateOutput {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Writing the schedule CSV failed.
    #[error("failed to write schedule to {path:?}: {source}")]
    WriteSchedule {
        /// Schedule path.
        path: Utf8PathBuf,
        /// Writer error.
        #[source]
        source: csv::Error,
    },
    /// Encoding the configuration document failed.
    #[error("failed to write configuration to {path:?}: {source}")]
    WriteParams {
        /// Output path.
        path: Utf8PathBuf,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    WriteReport(#[source] std::io::Error),
}

impl CliError {
    pub(crate) fn dispatch(start: Option<&StopId>, source: DispatchError) -> Self {
        Self::Dispatch {
            start: start.map_or_else(|| "first stop".to_owned(), ToString::to_string),
            source,
        }
    }
}
