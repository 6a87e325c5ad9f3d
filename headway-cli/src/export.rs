//! Schedule CSV export.
//!
//! The header is `unidad` followed by the route's stop names in route
//! order; each dispatched vehicle adds one row of `HH:MM` cells. Stops a
//! vehicle does not visit, such as the other half of a split route, stay
//! empty.

use std::io;

use camino::Utf8Path;
use headway_core::{Params, RouteId, StopId};
use headway_dispatch::TaskOutcome;
use headway_fs::create_utf8_file;
use log::info;

use crate::CliError;
use crate::report::CLOCK_FORMAT;

const UNIT_COLUMN: &str = "unidad";

/// Write the schedule of every successful task to `path`.
pub(crate) fn write_schedule(
    path: &Utf8Path,
    params: &Params,
    route: &RouteId,
    outcomes: &[TaskOutcome],
) -> Result<(), CliError> {
    let file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = write_rows(file, params, route, outcomes).map_err(|source| {
        CliError::WriteSchedule {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!("wrote {rows} departures to {path}");
    Ok(())
}

/// Write the header and rows; returns the number of rows.
pub(crate) fn write_rows<W: io::Write>(
    sink: W,
    params: &Params,
    route: &RouteId,
    outcomes: &[TaskOutcome],
) -> Result<usize, csv::Error> {
    let stops: Vec<&StopId> = params
        .route(route)
        .map(|found| found.stops.iter().collect())
        .unwrap_or_default();
    let mut writer = csv::Writer::from_writer(sink);

    let header = std::iter::once(UNIT_COLUMN.to_owned()).chain(stops.iter().map(|id| {
        params
            .stop(id)
            .map_or_else(|_| id.to_string(), |stop| stop.name.clone())
    }));
    writer.write_record(header)?;

    let mut rows = 0_usize;
    let solutions = outcomes
        .iter()
        .filter_map(|outcome| outcome.result.as_ref().ok())
        .flatten();
    for solution in solutions {
        let cells = stops.iter().map(|id| {
            solution
                .time_at(id)
                .map(|time| time.strftime(CLOCK_FORMAT).to_string())
                .unwrap_or_default()
        });
        writer.write_record(
            std::iter::once(solution.vehicle.unit_number.to_string()).chain(cells),
        )?;
        rows = rows.saturating_add(1);
    }
    writer.flush()?;
    Ok(rows)
}
