//! The dispatch cost formula.

use headway_core::{ConfigError, DispatchError, PenaltyProvider, StopId, StopProvider};
use headway_forecast::{DemandAccessor, DemandCache, ForecastTable};
use jiff::SignedDuration;
use jiff::civil::DateTime;
use log::trace;

use crate::rotate_to;

/// Terms of a single cost evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    /// Forecast passengers over the scoped stops.
    pub passengers: f64,
    /// Minutes the busiest stop waits.
    pub wait_minutes: i64,
    /// Wait weight times wait minutes.
    pub wait: f64,
    /// Capacity weight times the seat mismatch.
    pub capacity: f64,
    /// Low-demand or zero-demand penalty.
    pub demand: f64,
}

impl CostBreakdown {
    /// Sum of all terms.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "cost terms are summed")]
    pub fn total(&self) -> f64 {
        self.wait + self.capacity + self.demand
    }
}

/// Scores a candidate dispatch over a fixed stop scope.
///
/// The scope is the stop sequence a vehicle will serve, in route order. The
/// formula borrows the stops, so callers rebuild it whenever stop state
/// changes; the [`DemandCache`] is borrowed too and survives rebuilds.
#[derive(Debug)]
pub struct CostFormula<'a, S, P> {
    stops: &'a [S],
    accessor: DemandAccessor<'a>,
    penalties: &'a P,
    cache: &'a mut DemandCache,
}

impl<'a, S, P> CostFormula<'a, S, P>
where
    S: StopProvider,
    P: PenaltyProvider,
{
    /// Build a formula over `stops`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyScope`] for an empty scope and
    /// [`ConfigError::StopWithoutForecast`] when a scoped stop has no
    /// samples in `forecast`.
    pub fn new(
        stops: &'a [S],
        forecast: &'a ForecastTable,
        penalties: &'a P,
        cache: &'a mut DemandCache,
    ) -> Result<Self, ConfigError> {
        if stops.is_empty() {
            return Err(ConfigError::EmptyScope);
        }
        if let Some(uncovered) = stops.iter().find(|stop| !forecast.covers(stop.id())) {
            return Err(ConfigError::StopWithoutForecast {
                stop: uncovered.id().clone(),
            });
        }
        Ok(Self {
            stops,
            accessor: DemandAccessor::new(forecast),
            penalties,
            cache,
        })
    }

    /// Scoped stops in route order.
    #[must_use]
    pub const fn stops(&self) -> &'a [S] {
        self.stops
    }

    /// Cost of departing `delay` after `reference` from `start_stop` with
    /// `capacity` seats.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownStop`] if `start_stop` is outside the
    /// scope and [`DispatchError::DataExhausted`] when the forecast runs out.
    pub fn cost(
        &mut self,
        reference: DateTime,
        start_stop: &StopId,
        delay: SignedDuration,
        capacity: u32,
    ) -> Result<f64, DispatchError> {
        self.breakdown(reference, start_stop, delay, capacity)
            .map(|terms| terms.total())
    }

    /// Like [`cost`](Self::cost), returning each term separately.
    ///
    /// # Errors
    ///
    /// As for [`cost`](Self::cost).
    #[expect(
        clippy::float_arithmetic,
        reason = "the formula weighs passenger counts"
    )]
    pub fn breakdown(
        &mut self,
        reference: DateTime,
        start_stop: &StopId,
        delay: SignedDuration,
        capacity: u32,
    ) -> Result<CostBreakdown, DispatchError> {
        let rotated = rotate_to(self.stops, start_stop)?;
        let summary = self
            .accessor
            .demand(&rotated, reference, delay, self.cache)?;

        let passengers = summary.passengers;
        let wait_minutes = summary.peak_offset_minutes();
        let demand = if passengers > 0.0 {
            self.penalties.low_demand() / passengers
        } else {
            self.penalties.zero_demand()
        };
        let terms = CostBreakdown {
            passengers,
            wait_minutes,
            wait: self.penalties.wait_per_minute() * minutes_as_f64(wait_minutes),
            capacity: self.penalties.capacity_mismatch()
                * (f64::from(capacity) - passengers).abs(),
            demand,
        };
        trace!(
            "cost from {start_stop} delayed {} min at {capacity} seats: {terms:?}",
            delay.as_mins()
        );
        Ok(terms)
    }
}

fn minutes_as_f64(minutes: i64) -> f64 {
    i32::try_from(minutes).map_or(f64::from(i32::MAX), f64::from)
}
