//! Solver seam between the orchestrator and the search.

use std::num::NonZeroU32;

use jiff::SignedDuration;
use jiff::civil::DateTime;

use crate::provider::VehicleProvider;
use crate::{ConfigError, DispatchError, Solution, StopId};

/// Parameters of one dispatch decision.
///
/// # Examples
/// ```
/// use headway_core::SolveRequest;
/// use jiff::SignedDuration;
/// use jiff::civil::date;
///
/// let request = SolveRequest {
///     reference: date(2024, 3, 23).at(6, 0, 0, 0),
///     time_max: SignedDuration::from_mins(30),
///     interval: SignedDuration::from_mins(5),
///     start_stop: None,
///     optimise_start: false,
///     seed: 7,
/// };
/// assert_eq!(request.delay_slots().map(|slots| slots.get()), Ok(6));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveRequest {
    /// Reference clock; delays are measured from here.
    pub reference: DateTime,
    /// Delay horizon.
    pub time_max: SignedDuration,
    /// Delay quantisation step.
    pub interval: SignedDuration,
    /// Fixed start stop. `None` departs from the first scoped stop.
    pub start_stop: Option<StopId>,
    /// Also search over every scoped stop as start point.
    pub optimise_start: bool,
    /// Seed for the stochastic acceptance rule.
    pub seed: u64,
}

impl SolveRequest {
    /// Number of delay values the search visits:
    /// `⌊time_max / interval⌋`, counted in whole minutes.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NonPositiveInterval`] for intervals under one minute
    /// and [`ConfigError::EmptySearchSpace`] when no slot fits.
    pub fn delay_slots(&self) -> Result<NonZeroU32, ConfigError> {
        let interval_minutes = self.interval.as_mins();
        if interval_minutes < 1 {
            return Err(ConfigError::NonPositiveInterval);
        }
        let time_max_minutes = self.time_max.as_mins();
        let empty = || ConfigError::EmptySearchSpace {
            time_max_minutes,
            interval_minutes,
        };
        let slots = time_max_minutes
            .checked_div(interval_minutes)
            .filter(|slots| *slots > 0)
            .ok_or_else(empty)?;
        let count = u32::try_from(slots).map_err(|_| ConfigError::SearchSpaceTooLarge)?;
        NonZeroU32::new(count).ok_or_else(empty)
    }

    /// Delay of the given slot, in minutes.
    #[must_use]
    pub fn slot_delay_minutes(&self, slot: u32) -> i64 {
        self.interval.as_mins().saturating_mul(i64::from(slot))
    }
}

/// Choose the next vehicle to dispatch and its delay.
///
/// Implementations must only return vehicles taken from `vehicles`, and must
/// report an empty list as [`ConfigError::NoVehicles`] instead of searching.
pub trait DispatchSolver<V: VehicleProvider> {
    /// Solve one dispatch decision.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the configuration cannot be searched
    /// or the forecast runs out of samples.
    fn solve(&mut self, vehicles: &[V], request: &SolveRequest) -> Result<Solution, DispatchError>;
}
