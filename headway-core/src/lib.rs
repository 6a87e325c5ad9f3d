//! Core domain types for the Headway dispatch engine.
//!
//! The configuration document describes stops, routes, a working schedule,
//! penalty weights and a vehicle fleet. These models keep the external
//! (Spanish) field names on the wire while exposing English names in Rust.
//!
//! Optimisation crates never touch the concrete structs directly; they work
//! against the capability traits in [`provider`], so another configuration
//! backend can be swapped in without changing the search.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod duration_format;
mod error;
mod id;
mod params;
mod penalty;
pub mod provider;
mod route;
mod schedule;
mod solution;
mod solver;
mod stop;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
mod vehicle;

pub use crate::error::{ConfigError, DispatchError};
pub use crate::id::{Identifier, RouteId, StopId};
pub use crate::params::Params;
pub use crate::penalty::PenaltyWeights;
pub use crate::provider::{
    LunchScheduleProvider, PenaltyProvider, RouteProvider, ScheduleLimitsProvider,
    ScheduleProvider, StopProvider, StopVisitLog, VehicleAvailability, VehicleProvider,
};
pub use crate::route::Route;
pub use crate::schedule::{LunchSchedule, Schedule, ScheduleLimits};
pub use crate::solution::{Solution, StopTime};
pub use crate::solver::{DispatchSolver, SolveRequest};
pub use crate::stop::Stop;
pub use crate::vehicle::Vehicle;
