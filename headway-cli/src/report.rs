//! Plain-text dispatch report.

use std::io::{self, Write};

use headway_core::{RouteId, Solution};
use headway_dispatch::TaskOutcome;

/// Clock format of planned visits.
pub(crate) const CLOCK_FORMAT: &str = "%H:%M";

/// Write one block per successful task and one line per dispatch. Failed
/// tasks write nothing.
pub(crate) fn write_report(
    writer: &mut dyn Write,
    route: &RouteId,
    outcomes: &[TaskOutcome],
) -> io::Result<()> {
    for outcome in outcomes {
        let Ok(solutions) = &outcome.result else {
            continue;
        };
        match &outcome.start_stop {
            Some(stop) => writeln!(writer, "route {route} from stop {stop}")?,
            None => writeln!(writer, "route {route}")?,
        }
        for solution in solutions {
            write_dispatch(writer, solution)?;
        }
    }
    Ok(())
}

fn write_dispatch(writer: &mut dyn Write, solution: &Solution) -> io::Result<()> {
    writeln!(
        writer,
        "  unit {} departs stop {} after {} min (cost {:.3})",
        solution.vehicle.unit_number, solution.start_point, solution.delay_minutes, solution.cost
    )?;
    for visit in &solution.plan {
        writeln!(
            writer,
            "    {} {}",
            visit.time.strftime(CLOCK_FORMAT),
            visit.name
        )?;
    }
    Ok(())
}
