//! Dispatch decisions.

use jiff::SignedDuration;
use jiff::civil::DateTime;

use crate::{StopId, Vehicle};

/// Predicted visit of one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    /// Stop identifier.
    pub stop: StopId,
    /// Stop display name.
    pub name: String,
    /// Predicted visit time.
    pub time: DateTime,
}

/// One dispatch decision.
///
/// The plan lists stops in route order starting at route index 0, even when
/// the vehicle departs from another stop; [`Solution::start_point`] records
/// where it actually starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Snapshot of the dispatched vehicle.
    pub vehicle: Vehicle,
    /// Predicted visit times in route order.
    pub plan: Vec<StopTime>,
    /// Stop the vehicle departs from.
    pub start_point: StopId,
    /// Minutes waited after the reference clock before departing.
    pub delay_minutes: i64,
    /// Cost of the chosen state.
    pub cost: f64,
}

impl Solution {
    /// Departure delay as a duration.
    #[must_use]
    pub const fn delay(&self) -> SignedDuration {
        SignedDuration::from_mins(self.delay_minutes)
    }

    /// Predicted visit of `stop`, if it is on the plan.
    #[must_use]
    pub fn time_at(&self, stop: &StopId) -> Option<DateTime> {
        self.plan
            .iter()
            .find(|entry| &entry.stop == stop)
            .map(|entry| entry.time)
    }
}
