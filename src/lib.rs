//! Facade crate for the Headway dispatch engine.
//!
//! This crate re-exports the core domain types, the forecast and cost
//! layers, and exposes the annealing solver and the dispatch loop behind
//! feature flags.

#![forbid(unsafe_code)]

pub use headway_core::{
    ConfigError, DispatchError, DispatchSolver, Params, PenaltyProvider, Route, RouteId,
    ScheduleProvider, Solution, SolveRequest, Stop, StopId, StopProvider, StopTime, Vehicle,
    VehicleProvider,
};
pub use headway_forecast::{
    DemandAccessor, DemandCache, DemandSummary, ForecastLoadError, ForecastTable, read_forecast,
};
pub use headway_scorer::{CostBreakdown, CostFormula};

#[cfg(feature = "solver-anneal")]
pub use headway_solver_anneal::{AnnealConfig, AnnealSolver};

#[cfg(feature = "dispatch")]
pub use headway_dispatch::{
    DispatchOptions, DispatchPhase, Orchestrator, TaskOutcome, dispatch_route, dispatch_split,
};
