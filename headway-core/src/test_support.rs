//! Test-only configuration builders shared by unit and behaviour tests.

use jiff::SignedDuration;

use crate::{LunchSchedule, Params, PenaltyWeights, Route, Schedule, ScheduleLimits, Stop, Vehicle};

/// Offset from midnight.
#[must_use]
pub const fn clock(hour: i64, minute: i64) -> SignedDuration {
    SignedDuration::from_mins(hour * 60 + minute)
}

/// Schedule whose shift starts between `start` and `latest_start`.
///
/// Rest and lunch windows are fixed, plausible values; the dispatch loop
/// only reads the shift start window and the interval.
#[must_use]
pub const fn schedule(
    start: SignedDuration,
    latest_start: SignedDuration,
    interval: SignedDuration,
) -> Schedule {
    Schedule {
        shift_start: ScheduleLimits::new(start, latest_start),
        shift_end: ScheduleLimits::new(clock(20, 0), clock(22, 0)),
        rest: ScheduleLimits::new(SignedDuration::from_mins(10), SignedDuration::from_mins(30)),
        lunch: LunchSchedule {
            duration: SignedDuration::from_mins(45),
            earliest: clock(12, 0),
            latest: clock(14, 0),
        },
        interval,
    }
}

/// Stops `1`, `2` and `3`, five minutes apart.
#[must_use]
pub fn three_stops() -> Vec<Stop> {
    [(1, "Terminal"), (2, "Centro"), (3, "Hospital")]
        .into_iter()
        .map(|(id, name)| Stop::new(id, name, SignedDuration::from_mins(5)))
        .collect()
}

/// Route `30` over [`three_stops`], served by unit 101 (40 seats) and unit
/// 102 (60 seats). Shifts start between 06:00 and 07:00, five minutes apart.
#[must_use]
pub fn three_stop_params() -> Params {
    Params {
        stops: three_stops(),
        routes: vec![Route::new(30, [1, 2, 3])],
        schedule: schedule(clock(6, 0), clock(7, 0), SignedDuration::from_mins(5)),
        penalties: PenaltyWeights::default(),
        vehicles: vec![Vehicle::new(101, 20, 40, 30), Vehicle::new(102, 30, 60, 30)],
    }
}

/// Route `40` over six stops `1..=6`, two minutes apart, with two vehicles
/// starting at stop `1` and two starting at stop `4`.
#[must_use]
pub fn split_route_params() -> Params {
    let stops = (1..=6)
        .map(|id| Stop::new(id, format!("Stop {id}"), SignedDuration::from_mins(2)))
        .collect();
    Params {
        stops,
        routes: vec![Route::new(40, [1, 2, 3, 4, 5, 6])],
        schedule: schedule(clock(6, 0), clock(7, 0), SignedDuration::from_mins(10)),
        penalties: PenaltyWeights::default(),
        vehicles: vec![
            Vehicle::new(201, 20, 40, 40).with_start_stop(1),
            Vehicle::new(202, 20, 50, 40).with_start_stop(1),
            Vehicle::new(203, 20, 40, 40).with_start_stop(4),
            Vehicle::new(204, 20, 50, 40).with_start_stop(4),
        ],
    }
}
