//! Sequential dispatch orchestration for Headway.
//!
//! An [`Orchestrator`] repeatedly asks the annealing solver for the next
//! dispatch, retires the chosen vehicle, records the visits its plan implies
//! and advances the clock, until every vehicle of its [`Partition`] has been
//! dispatched.
//!
//! Partitions hold exclusive `&mut` borrows of their stops and vehicles.
//! [`split_route`] divides a route between two start stops, so the two
//! halves can be dispatched on separate threads by [`dispatch_split`]
//! without any locking.

#![forbid(unsafe_code)]

mod orchestrator;
mod partition;
mod run;

pub use orchestrator::{DispatchContext, DispatchOptions, DispatchPhase, Orchestrator};
pub use partition::{Partition, route_partition, split_route};
pub use run::{TaskOutcome, dispatch_route, dispatch_split};
