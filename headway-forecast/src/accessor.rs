//! Demand queries over a scoped stop sequence.

use headway_core::{DispatchError, StopProvider};
use jiff::SignedDuration;
use jiff::civil::DateTime;

use crate::{DemandCache, DemandKey, ForecastTable};

/// Demand a dispatch would meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandSummary {
    /// Passengers summed over every scoped stop.
    pub passengers: f64,
    /// Time from the reference start to the busiest sample, whole minutes.
    pub peak_offset: SignedDuration,
}

impl DemandSummary {
    /// No passengers, no wait.
    pub const EMPTY: Self = Self {
        passengers: 0.0,
        peak_offset: SignedDuration::ZERO,
    };

    /// Peak offset in minutes.
    #[must_use]
    pub fn peak_offset_minutes(&self) -> i64 {
        self.peak_offset.as_mins()
    }
}

/// Reads a [`ForecastTable`] on behalf of the cost formula.
///
/// For each stop of the scoped sequence the vehicle's arrival is found by
/// walking from `start + delay` through every stop's travel time and event
/// delay. Demand is counted from the later of `start` and the stop's last
/// visit at or before that arrival, up to the arrival. Both ends are matched to
/// the nearest unused sample, so sparse or gappy series still line up.
#[derive(Debug, Clone, Copy)]
pub struct DemandAccessor<'f> {
    table: &'f ForecastTable,
}

impl<'f> DemandAccessor<'f> {
    /// Wrap a forecast table.
    #[must_use]
    pub const fn new(table: &'f ForecastTable) -> Self {
        Self { table }
    }

    /// Underlying table.
    #[must_use]
    pub const fn table(&self) -> &'f ForecastTable {
        self.table
    }

    /// Demand for `stops` when departing `delay` after `start`.
    ///
    /// Consults `cache` first and refreshes it on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DataExhausted`] when a stop has no usable
    /// sample left.
    pub fn demand<S: StopProvider>(
        &self,
        stops: &[S],
        start: DateTime,
        delay: SignedDuration,
        cache: &mut DemandCache,
    ) -> Result<DemandSummary, DispatchError> {
        let key = DemandKey::new(stops, start, delay);
        if let Some(summary) = cache.get(&key) {
            return Ok(summary);
        }
        let summary = self.compute(stops, start, delay)?;
        cache.store(key, summary);
        Ok(summary)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "passenger counts are summed across samples"
    )]
    fn compute<S: StopProvider>(
        &self,
        stops: &[S],
        start: DateTime,
        delay: SignedDuration,
    ) -> Result<DemandSummary, DispatchError> {
        let mut arrival = start.saturating_add(delay);
        let mut passengers = 0.0;
        let mut peak: Option<(f64, DateTime)> = None;

        for stop in stops {
            arrival = arrival
                .saturating_add(stop.travel_time())
                .saturating_add(stop.event_delay());
            let served_until = stop.served_until(arrival);
            let window_start = served_until.map_or(start, |served| served.max(start));

            let visits = stop.visits();
            let lower = self
                .table
                .nearest_unused_sample(stop.id(), window_start, visits)?;
            let upper = self.table.nearest_unused_sample(stop.id(), arrival, visits)?;

            let counted = self
                .table
                .samples_between(stop.id(), lower, upper)
                .filter(|(at, _)| !stop.was_visited_at(*at))
                .filter(|(at, _)| served_until.is_none_or(|served| *at > served));
            for (at, count) in counted {
                passengers += count;
                if peak.is_none_or(|(busiest, _)| count >= busiest) {
                    peak = Some((count, at));
                }
            }
        }

        let peak_offset = peak.map_or(SignedDuration::ZERO, |(_, at)| {
            let offset = at.duration_since(start).max(SignedDuration::ZERO);
            SignedDuration::from_mins(offset.as_mins())
        });
        Ok(DemandSummary {
            passengers,
            peak_offset,
        })
    }
}
