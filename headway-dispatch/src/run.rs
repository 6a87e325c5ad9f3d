//! Whole-route and split-route dispatch runs over a loaded configuration.

use std::{panic, thread};

use headway_core::{DispatchError, Params, RouteId, Solution, StopId};
use headway_forecast::ForecastTable;
use log::info;

use crate::{DispatchContext, DispatchOptions, Orchestrator, route_partition, split_route};

/// Result of one orchestration task of a split run.
#[derive(Debug)]
pub struct TaskOutcome {
    /// Start stop the task dispatched from.
    pub start_stop: Option<StopId>,
    /// The task's dispatches, or the error that stopped it.
    pub result: Result<Vec<Solution>, DispatchError>,
}

/// Dispatch every available vehicle of `route_id` from its first stop.
///
/// Availability flags and stop visits in `params` are updated in place.
///
/// # Errors
///
/// Returns [`DispatchError::Config`] for unknown routes, stops or empty
/// fleets, and [`DispatchError::DataExhausted`] when the forecast runs out
/// of samples.
///
/// # Examples
/// ```
/// use headway_core::test_support::three_stop_params;
/// use headway_core::RouteId;
/// use headway_dispatch::{DispatchOptions, dispatch_route};
/// use headway_forecast::test_support::spike_forecast;
/// use jiff::civil::date;
///
/// let mut params = three_stop_params();
/// let options = DispatchOptions::new(date(2024, 3, 23), 7);
/// let solutions = dispatch_route(&mut params, &spike_forecast(), &RouteId::from(30), &options)?;
/// assert_eq!(solutions.len(), 2);
/// # Ok::<(), headway_core::DispatchError>(())
/// ```
pub fn dispatch_route(
    params: &mut Params,
    forecast: &ForecastTable,
    route_id: &RouteId,
    options: &DispatchOptions,
) -> Result<Vec<Solution>, DispatchError> {
    let route = params.route(route_id)?.clone();
    let Params {
        stops,
        schedule,
        penalties,
        vehicles,
        ..
    } = params;
    let partition = route_partition(stops, vehicles, &route)?;
    info!(
        "dispatching route {route_id}: {} stops, {} vehicles available",
        partition.stops.len(),
        partition.available_count()
    );
    let context = DispatchContext {
        forecast,
        schedule: &*schedule,
        penalties: &*penalties,
        options: *options,
    };
    Orchestrator::new(partition, context)?.run()
}

/// Dispatch `route_id` from two start stops at once.
///
/// The route is split with [`split_route`]; each half runs its own
/// orchestrator on a scoped thread. A failure in one half is reported in
/// its [`TaskOutcome`] and does not stop the other.
///
/// # Errors
///
/// Returns [`DispatchError::Config`] when the route is unknown or cannot
/// be split between `first` and `second`.
pub fn dispatch_split(
    params: &mut Params,
    forecast: &ForecastTable,
    route_id: &RouteId,
    first: &StopId,
    second: &StopId,
    options: &DispatchOptions,
) -> Result<[TaskOutcome; 2], DispatchError> {
    let route = params.route(route_id)?.clone();
    let Params {
        stops,
        schedule,
        penalties,
        vehicles,
        ..
    } = params;
    let partition = route_partition(stops, vehicles, &route)?;
    let halves = split_route(partition, first, second)?;
    info!("dispatching route {route_id} from stops {first} and {second}");
    let context = DispatchContext {
        forecast,
        schedule: &*schedule,
        penalties: &*penalties,
        options: *options,
    };

    let outcomes = thread::scope(|scope| {
        let (one, two) = halves;
        [one, two]
            .map(|half| {
                let start_stop = half.start_stop.clone();
                let task = scope.spawn(move || {
                    Orchestrator::new(half, context)
                        .map_err(DispatchError::from)
                        .and_then(Orchestrator::run)
                });
                (start_stop, task)
            })
            .map(|(start_stop, task)| TaskOutcome {
                start_stop,
                result: task
                    .join()
                    .unwrap_or_else(|payload| panic::resume_unwind(payload)),
            })
    });
    Ok(outcomes)
}
