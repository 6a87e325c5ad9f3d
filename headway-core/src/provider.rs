//! Capability traits describing what the optimisation crates read and write.
//!
//! The cost formula, solver and orchestrator are generic over these traits.
//! [`Stop`](crate::Stop), [`Vehicle`](crate::Vehicle) and friends implement
//! them for the JSON configuration backend; references forward to the
//! referent, so `&Stop` and `&mut Stop` can be scoped and partitioned without
//! copying.

use jiff::SignedDuration;
use jiff::civil::{Date, DateTime, Time};

use crate::{RouteId, StopId};

/// Read access to a stop.
pub trait StopProvider {
    /// Stop identifier.
    fn id(&self) -> &StopId;

    /// Display name.
    fn name(&self) -> &str;

    /// Nominal travel time from the previous stop.
    fn travel_time(&self) -> SignedDuration;

    /// Extra travel time imposed by external events.
    fn event_delay(&self) -> SignedDuration;

    /// Recorded visits, ascending.
    fn visits(&self) -> &[DateTime];

    /// Latest recorded visit at or before `at`.
    fn served_until(&self, at: DateTime) -> Option<DateTime> {
        let visits = self.visits();
        let before = visits.partition_point(|visit| *visit <= at);
        before
            .checked_sub(1)
            .and_then(|index| visits.get(index))
            .copied()
    }

    /// Whether `at` is already recorded as a visit.
    fn was_visited_at(&self, at: DateTime) -> bool {
        self.visits().binary_search(&at).is_ok()
    }
}

/// Mutations the orchestrator applies to a stop.
pub trait StopVisitLog: StopProvider {
    /// Record a visit, keeping the history sorted.
    fn record_visit(&mut self, at: DateTime);

    /// Replace the externally supplied event delay.
    fn set_event_delay(&mut self, delay: SignedDuration);
}

/// Read access to a vehicle.
pub trait VehicleProvider {
    /// Unique unit number.
    fn unit_number(&self) -> u32;

    /// Minimum passenger capacity.
    fn min_capacity(&self) -> u32;

    /// Maximum passenger capacity.
    fn max_capacity(&self) -> u32;

    /// Whether the vehicle may still be dispatched.
    fn is_available(&self) -> bool;

    /// Route the vehicle serves.
    fn route_id(&self) -> &RouteId;

    /// Configured start stop for split dispatch, if any.
    fn start_stop(&self) -> Option<&StopId>;
}

/// Availability updates applied when a vehicle is dispatched.
pub trait VehicleAvailability: VehicleProvider {
    /// Set the availability flag.
    fn set_available(&mut self, available: bool);
}

/// Read access to a route.
pub trait RouteProvider {
    /// Route identifier.
    fn route_id(&self) -> &RouteId;

    /// Ordered stop identifiers.
    fn stop_ids(&self) -> &[StopId];
}

/// A `(min, max)` offset window from midnight.
pub trait ScheduleLimitsProvider {
    /// Earliest offset.
    fn earliest(&self) -> SignedDuration;

    /// Latest offset.
    fn latest(&self) -> SignedDuration;

    /// Width of the window.
    fn span(&self) -> SignedDuration {
        self.latest().saturating_sub(self.earliest())
    }

    /// The earliest instant of the window on `day`.
    fn earliest_on(&self, day: Date) -> DateTime {
        day.to_datetime(Time::midnight()).saturating_add(self.earliest())
    }
}

/// Lunch break rules.
pub trait LunchScheduleProvider {
    /// Length of the break.
    fn duration(&self) -> SignedDuration;

    /// Earliest break start.
    fn earliest(&self) -> SignedDuration;

    /// Latest break start.
    fn latest(&self) -> SignedDuration;
}

/// Working schedule of the fleet.
pub trait ScheduleProvider {
    /// Window type used for shifts and rests.
    type Limits: ScheduleLimitsProvider;
    /// Lunch rules type.
    type Lunch: LunchScheduleProvider;

    /// Shift start window.
    fn shift_start(&self) -> &Self::Limits;

    /// Shift end window.
    fn shift_end(&self) -> &Self::Limits;

    /// Rest window.
    fn rest(&self) -> &Self::Limits;

    /// Lunch rules.
    fn lunch(&self) -> &Self::Lunch;

    /// Minimum gap between consecutive dispatches.
    fn interval(&self) -> SignedDuration;
}

/// Cost coefficients. Larger values steer the search away from the
/// corresponding characteristic.
pub trait PenaltyProvider {
    /// Cost per minute the busiest stop waits.
    fn wait_per_minute(&self) -> f64;

    /// Cost per seat of capacity mismatch.
    fn capacity_mismatch(&self) -> f64;

    /// Numerator of the low-demand penalty.
    fn low_demand(&self) -> f64;

    /// Penalty applied when no demand is forecast.
    fn zero_demand(&self) -> f64;
}

macro_rules! forward_stop_provider {
    ($($ty:ty),*) => {$(
        impl<T: StopProvider + ?Sized> StopProvider for $ty {
            fn id(&self) -> &StopId {
                (**self).id()
            }

            fn name(&self) -> &str {
                (**self).name()
            }

            fn travel_time(&self) -> SignedDuration {
                (**self).travel_time()
            }

            fn event_delay(&self) -> SignedDuration {
                (**self).event_delay()
            }

            fn visits(&self) -> &[DateTime] {
                (**self).visits()
            }
        }
    )*};
}

macro_rules! forward_vehicle_provider {
    ($($ty:ty),*) => {$(
        impl<T: VehicleProvider + ?Sized> VehicleProvider for $ty {
            fn unit_number(&self) -> u32 {
                (**self).unit_number()
            }

            fn min_capacity(&self) -> u32 {
                (**self).min_capacity()
            }

            fn max_capacity(&self) -> u32 {
                (**self).max_capacity()
            }

            fn is_available(&self) -> bool {
                (**self).is_available()
            }

            fn route_id(&self) -> &RouteId {
                (**self).route_id()
            }

            fn start_stop(&self) -> Option<&StopId> {
                (**self).start_stop()
            }
        }
    )*};
}

forward_stop_provider!(&T, &mut T);
forward_vehicle_provider!(&T, &mut T);

impl<T: StopVisitLog + ?Sized> StopVisitLog for &mut T {
    fn record_visit(&mut self, at: DateTime) {
        (**self).record_visit(at);
    }

    fn set_event_delay(&mut self, delay: SignedDuration) {
        (**self).set_event_delay(delay);
    }
}

impl<T: VehicleAvailability + ?Sized> VehicleAvailability for &mut T {
    fn set_available(&mut self, available: bool) {
        (**self).set_available(available);
    }
}
