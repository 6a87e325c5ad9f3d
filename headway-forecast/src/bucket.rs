//! 10-minute bucket arithmetic.
//!
//! Rounding saturates at the ends of the supported range: a floor that
//! would precede [`DateTime::MIN`] yields `DateTime::MIN` and a ceiling past
//! [`DateTime::MAX`] yields `DateTime::MAX`. Either way the bucket still
//! encloses the input.

use jiff::civil::{DateTime, DateTimeRound};
use jiff::{RoundMode, SignedDuration, Unit};

/// Cadence the forecast is sampled at.
pub const SAMPLE_CADENCE: SignedDuration = SignedDuration::from_mins(10);

const CADENCE_MINUTES: i64 = 10;

/// Round down to the enclosing bucket start.
///
/// # Examples
/// ```
/// use headway_forecast::floor_to_bucket;
/// use jiff::civil::date;
///
/// let day = date(2024, 3, 23);
/// assert_eq!(floor_to_bucket(day.at(6, 17, 30, 0)), day.at(6, 10, 0, 0));
/// ```
#[must_use]
pub fn floor_to_bucket(at: DateTime) -> DateTime {
    round(at, RoundMode::Floor, DateTime::MIN)
}

/// Round up to the enclosing bucket end; bucket boundaries stay put.
#[must_use]
pub fn ceil_to_bucket(at: DateTime) -> DateTime {
    round(at, RoundMode::Ceil, DateTime::MAX)
}

fn round(at: DateTime, mode: RoundMode, edge: DateTime) -> DateTime {
    let options = DateTimeRound::new()
        .smallest(Unit::Minute)
        .increment(CADENCE_MINUTES)
        .mode(mode);
    at.round(options).unwrap_or(edge)
}
