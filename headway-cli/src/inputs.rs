//! Reading and writing the configuration document and forecast CSV.

use std::io::{BufReader, BufWriter, Write};

use camino::Utf8Path;
use headway_core::Params;
use headway_forecast::{ForecastTable, read_forecast};
use headway_fs::{create_utf8_file, open_utf8_file};
use log::debug;

use crate::CliError;

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match headway_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load and validate a JSON configuration document.
pub(crate) fn load_params(path: &Utf8Path) -> Result<Params, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    let params: Params = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        CliError::ParseParams {
            path: path.to_path_buf(),
            source,
        }
    })?;
    params
        .validate()
        .map_err(|source| CliError::InvalidParams {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        "loaded {path}: {} stops, {} routes, {} vehicles",
        params.stops.len(),
        params.routes.len(),
        params.vehicles.len()
    );
    Ok(params)
}

/// Load a forecast CSV.
pub(crate) fn load_forecast(path: &Utf8Path) -> Result<ForecastTable, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    read_forecast(BufReader::new(file)).map_err(|source| CliError::LoadForecast {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `params` as pretty-printed JSON. Visit history is never written.
pub(crate) fn save_params(path: &Utf8Path, params: &Params) -> Result<(), CliError> {
    let file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let encode_error = |source| CliError::WriteParams {
        path: path.to_path_buf(),
        source,
    };
    serde_json::to_writer_pretty(&mut writer, params).map_err(encode_error)?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|source| CliError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })
}
