//! Dispatch cost scoring for the Headway engine.
//!
//! The crate provides two pieces:
//! - **Stop scoping** rotates a route's stop sequence to begin at a chosen
//!   start stop ([`rotate_to`]) and cuts the stops between two start stops
//!   ([`limit_stops`]), both with wrap-around.
//! - **The cost formula** ([`CostFormula`]) combines forecast demand with
//!   penalty weights into the scalar the annealing search minimises:
//!   `wait * q + capacity * |seats - p| + d`, where `p` is the forecast
//!   passenger total, `q` the minutes the busiest stop waits and `d` the
//!   low- or zero-demand penalty.

#![forbid(unsafe_code)]

mod formula;
mod scope;

pub use formula::{CostBreakdown, CostFormula};
pub use scope::{limit_indices, limit_stops, rotate_to, rotation_indices};
