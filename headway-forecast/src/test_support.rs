//! Forecast fixtures for the three-stop test route.

use jiff::civil::{DateTime, date};

use crate::{DemandSample, ForecastTable};

/// Service day used throughout the fixtures.
pub const SERVICE_DAY: (i16, i8, i8) = (2024, 3, 23);

/// `hour:minute` on the service day.
#[must_use]
pub fn at(hour: i8, minute: i8) -> DateTime {
    let (year, month, day) = SERVICE_DAY;
    date(year, month, day).at(hour, minute, 0, 0)
}

/// Samples every ten minutes from 06:00 to 08:50 for stops `1..=stop_count`.
fn grid(stop_count: i64, mut passengers: impl FnMut(i64, DateTime) -> f64) -> ForecastTable {
    let mut table = ForecastTable::new();
    for stop in 1..=stop_count {
        for hour in 6..=8 {
            for minute in (0..60).step_by(10) {
                let instant = at(hour, minute);
                table.insert(DemandSample::new(instant, stop, passengers(stop, instant)));
            }
        }
    }
    table
}

/// Half a passenger everywhere, except 80 passengers at stop `2` at 06:10.
#[must_use]
pub fn spike_forecast() -> ForecastTable {
    grid(3, |stop, instant| {
        if stop == 2 && instant == at(6, 10) {
            80.0
        } else {
            0.5
        }
    })
}

/// The same passenger count at every stop and time, for stops `1..=3`.
#[must_use]
pub fn flat_forecast(passengers: f64) -> ForecastTable {
    grid(3, |_, _| passengers)
}

/// Demand rising by one passenger per stop index, for stops
/// `1..=stop_count`.
#[must_use]
pub fn ramp_forecast(stop_count: i64) -> ForecastTable {
    grid(stop_count, |stop, _| {
        i32::try_from(stop).map_or(0.0, f64::from)
    })
}
