//! CSV loading of forecast datasets.

use std::io::Read;
use std::num::ParseFloatError;

use headway_core::{ConfigError, Identifier};
use jiff::civil::DateTime;
use log::debug;
use thiserror::Error;

use crate::{DemandSample, ForecastTable};

/// Timestamp column, formatted `YYYY-MM-DD HH:MM:SS`.
pub const COLUMN_TIMESPAN: &str = "timespan";
/// Stop identifier column.
pub const COLUMN_STOP_ID: &str = "stop_id";
/// Passenger count column.
pub const COLUMN_PASSENGERS: &str = "passengers";

/// Errors raised while reading a forecast CSV.
#[derive(Debug, Error)]
pub enum ForecastLoadError {
    /// The header lacks a required column.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The CSV could not be read.
    #[error("failed to read forecast CSV: {0}")]
    Csv(#[from] csv::Error),
    /// A timestamp did not parse.
    #[error("invalid timestamp {value:?} on line {line}: {source}")]
    InvalidTimestamp {
        /// One-based line number.
        line: u64,
        /// Offending cell.
        value: String,
        /// Parser error.
        #[source]
        source: jiff::Error,
    },
    /// A passenger count did not parse.
    #[error("invalid passenger count {value:?} on line {line}: {source}")]
    InvalidPassengers {
        /// One-based line number.
        line: u64,
        /// Offending cell.
        value: String,
        /// Parser error.
        #[source]
        source: ParseFloatError,
    },
}

struct Columns {
    timespan: usize,
    stop_id: usize,
    passengers: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, ConfigError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or(ConfigError::MissingForecastColumn { column })
        };
        Ok(Self {
            timespan: find(COLUMN_TIMESPAN)?,
            stop_id: find(COLUMN_STOP_ID)?,
            passengers: find(COLUMN_PASSENGERS)?,
        })
    }
}

/// Read a forecast CSV into a [`ForecastTable`].
///
/// Extra columns are ignored and cells are trimmed. Stop identifiers that
/// look like integers become numeric identifiers, matching the
/// configuration's typing.
///
/// # Errors
///
/// Returns [`ForecastLoadError`] for missing columns, unreadable rows or
/// unparsable cells.
///
/// # Examples
/// ```
/// use headway_core::StopId;
/// use headway_forecast::read_forecast;
/// use jiff::civil::date;
///
/// let csv = "timespan,stop_id,passengers\n2024-03-23 06:00:00,4,12.5\n";
/// let table = read_forecast(csv.as_bytes())?;
/// let at = date(2024, 3, 23).at(6, 0, 0, 0);
/// assert_eq!(table.passengers_at(&StopId::Number(4), at), Some(12.5));
/// # Ok::<(), headway_forecast::ForecastLoadError>(())
/// ```
pub fn read_forecast<R: Read>(reader: R) -> Result<ForecastTable, ForecastLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let columns = Columns::locate(csv_reader.headers()?)?;

    let mut table = ForecastTable::new();
    for row in csv_reader.records() {
        let record = row?;
        let line = record.position().map_or(0, csv::Position::line);
        let cell = |index: usize| record.get(index).unwrap_or_default();

        let timespan = cell(columns.timespan);
        let at = timespan
            .parse::<DateTime>()
            .map_err(|source| ForecastLoadError::InvalidTimestamp {
                line,
                value: timespan.to_owned(),
                source,
            })?;
        let raw_passengers = cell(columns.passengers);
        let passengers =
            raw_passengers
                .parse::<f64>()
                .map_err(|source| ForecastLoadError::InvalidPassengers {
                    line,
                    value: raw_passengers.to_owned(),
                    source,
                })?;
        let stop = Identifier::parse_lenient(cell(columns.stop_id));
        table.insert(DemandSample::new(at, stop, passengers));
    }
    debug!("loaded {} forecast samples", table.len());
    Ok(table)
}
