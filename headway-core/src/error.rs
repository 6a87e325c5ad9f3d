//! Error taxonomy shared by the dispatch crates.

use jiff::civil::DateTime;
use thiserror::Error;

use crate::{RouteId, StopId};

/// Fatal configuration problems, detected before or during a dispatch run.
///
/// None of these are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A stop identifier is not present in the configuration.
    #[error("unknown stop {id}")]
    UnknownStop {
        /// Missing stop identifier.
        id: StopId,
    },
    /// A route identifier is not present in the configuration.
    #[error("unknown route {id}")]
    UnknownRoute {
        /// Missing route identifier.
        id: RouteId,
    },
    /// A vehicle unit number is not present in the fleet.
    #[error("unknown vehicle unit {unit}")]
    UnknownVehicle {
        /// Missing unit number.
        unit: u32,
    },
    /// Two stops share the same identifier.
    #[error("stop {id} is defined more than once")]
    DuplicateStop {
        /// Repeated identifier.
        id: StopId,
    },
    /// Two vehicles share the same unit number.
    #[error("vehicle unit {unit} is defined more than once")]
    DuplicateVehicle {
        /// Repeated unit number.
        unit: u32,
    },
    /// Two routes share the same identifier.
    #[error("route {id} is defined more than once")]
    DuplicateRoute {
        /// Repeated identifier.
        id: RouteId,
    },
    /// A route lists the same stop twice.
    #[error("route {route} visits stop {stop} more than once")]
    RepeatedRouteStop {
        /// Route containing the repetition.
        route: RouteId,
        /// Stop listed twice.
        stop: StopId,
    },
    /// A route or partition contains no stops.
    #[error("route {route} has no stops")]
    EmptyRoute {
        /// Route without stops.
        route: RouteId,
    },
    /// A cost formula was built over no stops.
    #[error("dispatch scope contains no stops")]
    EmptyScope,
    /// No available vehicle matches the dispatch scope.
    #[error("no available vehicle for route {route}")]
    EmptyFleet {
        /// Route that was being dispatched.
        route: RouteId,
    },
    /// The solver was handed an empty vehicle list.
    #[error("solver invoked without any vehicle")]
    NoVehicles,
    /// The dispatch interval is shorter than one minute.
    #[error("dispatch interval must be at least one minute")]
    NonPositiveInterval,
    /// The delay horizon leaves no room for a single dispatch slot.
    #[error(
        "delay horizon of {time_max_minutes} min holds no {interval_minutes} min dispatch slot"
    )]
    EmptySearchSpace {
        /// Delay horizon in minutes.
        time_max_minutes: i64,
        /// Dispatch interval in minutes.
        interval_minutes: i64,
    },
    /// The annealing state space does not fit the step counter.
    #[error("search space is too large to enumerate")]
    SearchSpaceTooLarge,
    /// A `(min, max)` window is inverted or negative.
    #[error("schedule window `{field}` is invalid")]
    InvalidLimits {
        /// Configuration field holding the window.
        field: &'static str,
    },
    /// A vehicle's minimum capacity exceeds its maximum.
    #[error("vehicle unit {unit} has minimum capacity above maximum")]
    InvalidCapacity {
        /// Offending unit number.
        unit: u32,
    },
    /// A penalty weight is negative or not finite.
    #[error("penalty weight `{field}` must be finite and non-negative, found {value}")]
    InvalidPenalty {
        /// Configuration field of the weight.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A vehicle's configured start stop is not on its route.
    #[error("vehicle unit {unit} starts at stop {stop}, which is not on its route")]
    StartStopOffRoute {
        /// Offending unit number.
        unit: u32,
        /// Configured start stop.
        stop: StopId,
    },
    /// Both partitions of a split dispatch start at the same stop.
    #[error("partition start stops must differ, both are {stop}")]
    CoincidentStartStops {
        /// Shared start stop.
        stop: StopId,
    },
    /// A scoped stop has no forecast samples on the service day.
    #[error("forecast has no samples for stop {stop}")]
    StopWithoutForecast {
        /// Stop lacking samples.
        stop: StopId,
    },
    /// The forecast dataset lacks a required column.
    #[error("forecast is missing required column `{column}`")]
    MissingForecastColumn {
        /// Column name.
        column: &'static str,
    },
}

/// Errors that abort a dispatch run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The configuration cannot be dispatched.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The nearest-unused-sample search ran past the stop's forecast range.
    #[error("no unused forecast sample left for stop {stop} near {target}")]
    DataExhausted {
        /// Stop whose samples are exhausted.
        stop: StopId,
        /// Time the search was centred on.
        target: DateTime,
    },
}
