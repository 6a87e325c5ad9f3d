//! Simulated-annealing dispatch solver for Headway.
//!
//! This crate provides [`AnnealSolver`], the default implementation of the
//! [`DispatchSolver`](headway_core::DispatchSolver) trait. Candidate
//! dispatches are `(vehicle, delay, start stop)` triples enumerated in a
//! fixed round-robin order by [`DispatchCursor`]; the generic [`Annealer`]
//! walks that cycle with Metropolis acceptance, scoring each state with the
//! cost formula from `headway-scorer`.
//!
//! The step budget equals the cycle length, so every candidate is scored
//! once and the lowest-cost state observed is always returned. The random
//! source is seeded from the request, making runs reproducible.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod annealer;
mod cursor;
mod plan;
mod solver;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use annealer::{AnnealConfig, AnnealOutcome, AnnealProblem, Annealer, Temperatures};
pub use cursor::{DispatchCursor, DispatchState};
pub use plan::build_plan;
pub use solver::AnnealSolver;
