//! Test-only utilities for `headway-solver-anneal`.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`).

use headway_core::SolveRequest;
use headway_forecast::test_support::at;
use jiff::SignedDuration;

/// Request matching the three-stop fixtures: reference 06:00, six delay
/// slots five minutes apart, departing from the first stop.
///
/// # Examples
/// ```rust
/// use headway_solver_anneal::test_support::spike_request;
///
/// let request = spike_request(7);
/// assert_eq!(request.delay_slots().map(|slots| slots.get()), Ok(6));
/// ```
#[must_use]
pub fn spike_request(seed: u64) -> SolveRequest {
    SolveRequest {
        reference: at(6, 0),
        time_max: SignedDuration::from_mins(30),
        interval: SignedDuration::from_mins(5),
        start_stop: None,
        optimise_start: false,
        seed,
    }
}
