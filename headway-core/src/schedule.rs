//! Working schedule: shift windows, rests, lunch and dispatch interval.

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::provider::{LunchScheduleProvider, ScheduleLimitsProvider, ScheduleProvider};

/// A `(min, max)` window of offsets from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleLimits {
    /// Earliest offset.
    #[serde(with = "crate::duration_format")]
    pub min: SignedDuration,
    /// Latest offset.
    #[serde(with = "crate::duration_format")]
    pub max: SignedDuration,
}

impl ScheduleLimits {
    /// Create a window.
    #[must_use]
    pub const fn new(min: SignedDuration, max: SignedDuration) -> Self {
        Self { min, max }
    }

    /// Whether `min <= max` and neither bound is negative.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.min.is_negative() && self.min <= self.max
    }
}

impl ScheduleLimitsProvider for ScheduleLimits {
    fn earliest(&self) -> SignedDuration {
        self.min
    }

    fn latest(&self) -> SignedDuration {
        self.max
    }
}

/// Staggered lunch break rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchSchedule {
    /// Length of the break.
    #[serde(rename = "tiempo", with = "crate::duration_format")]
    pub duration: SignedDuration,
    /// Earliest break start.
    #[serde(rename = "inicio", with = "crate::duration_format")]
    pub earliest: SignedDuration,
    /// Latest break start.
    #[serde(rename = "fin", with = "crate::duration_format")]
    pub latest: SignedDuration,
}

impl LunchScheduleProvider for LunchSchedule {
    fn duration(&self) -> SignedDuration {
        self.duration
    }

    fn earliest(&self) -> SignedDuration {
        self.earliest
    }

    fn latest(&self) -> SignedDuration {
        self.latest
    }
}

/// Fleet schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Shift start window; dispatching begins at its minimum.
    #[serde(rename = "inicio")]
    pub shift_start: ScheduleLimits,
    /// Shift end window.
    #[serde(rename = "fin")]
    pub shift_end: ScheduleLimits,
    /// Rest window.
    #[serde(rename = "descanso")]
    pub rest: ScheduleLimits,
    /// Lunch rules.
    #[serde(rename = "almuerzo")]
    pub lunch: LunchSchedule,
    /// Minimum gap between consecutive dispatches.
    #[serde(rename = "intervalo", with = "crate::duration_format")]
    pub interval: SignedDuration,
}

impl ScheduleProvider for Schedule {
    type Limits = ScheduleLimits;
    type Lunch = LunchSchedule;

    fn shift_start(&self) -> &ScheduleLimits {
        &self.shift_start
    }

    fn shift_end(&self) -> &ScheduleLimits {
        &self.shift_end
    }

    fn rest(&self) -> &ScheduleLimits {
        &self.rest
    }

    fn lunch(&self) -> &LunchSchedule {
        &self.lunch
    }

    fn interval(&self) -> SignedDuration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::clock;
    use jiff::civil::date;
    use rstest::rstest;

    #[rstest]
    fn shift_windows_anchor_on_the_service_day() {
        let window = ScheduleLimits::new(clock(6, 0), clock(7, 0));
        let day = date(2024, 3, 23);
        assert_eq!(window.earliest_on(day), day.at(6, 0, 0, 0));
        assert_eq!(window.span(), SignedDuration::from_hours(1));
    }

    #[rstest]
    #[case(clock(7, 0), clock(6, 0), false)]
    #[case(clock(6, 0), clock(6, 0), true)]
    #[case(SignedDuration::from_mins(-5), clock(6, 0), false)]
    fn well_formed_windows_are_ordered_and_non_negative(
        #[case] min: SignedDuration,
        #[case] max: SignedDuration,
        #[case] expected: bool,
    ) {
        assert_eq!(ScheduleLimits::new(min, max).is_well_formed(), expected);
    }
}
