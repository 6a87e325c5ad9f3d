//! In-memory forecast time series.

use std::collections::BTreeMap;

use headway_core::{DispatchError, StopId};
use jiff::civil::{Date, DateTime, Time};

use crate::bucket::{SAMPLE_CADENCE, ceil_to_bucket, floor_to_bucket};

/// One forecast row.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandSample {
    /// Sample time.
    pub at: DateTime,
    /// Stop the sample belongs to.
    pub stop: StopId,
    /// Expected passengers.
    pub passengers: f64,
}

impl DemandSample {
    /// Create a sample.
    pub fn new(at: DateTime, stop: impl Into<StopId>, passengers: f64) -> Self {
        Self {
            at,
            stop: stop.into(),
            passengers,
        }
    }
}

/// Forecast passengers per stop, indexed by time.
///
/// Series are time-ordered by construction. Repeated `(stop, time)` rows are
/// summed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastTable {
    series: BTreeMap<StopId, BTreeMap<DateTime, f64>>,
}

impl ForecastTable {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            series: BTreeMap::new(),
        }
    }

    /// Add a sample, summing with any existing sample at the same time.
    #[expect(
        clippy::float_arithmetic,
        reason = "duplicate forecast rows accumulate passenger counts"
    )]
    pub fn insert(&mut self, sample: DemandSample) {
        *self
            .series
            .entry(sample.stop)
            .or_default()
            .entry(sample.at)
            .or_insert(0.0) += sample.passengers;
    }

    /// Samples taken on `day`, from its midnight up to the next one.
    ///
    /// Stops without samples on `day` are dropped, so
    /// [`covers`](Self::covers) reports them as uncovered.
    ///
    /// # Examples
    /// ```
    /// use headway_forecast::{DemandSample, ForecastTable};
    /// use jiff::civil::date;
    ///
    /// let table: ForecastTable = [
    ///     DemandSample::new(date(2024, 3, 23).at(6, 0, 0, 0), 1, 4.0),
    ///     DemandSample::new(date(2024, 3, 24).at(6, 0, 0, 0), 1, 9.0),
    /// ]
    /// .into_iter()
    /// .collect();
    /// assert_eq!(table.for_day(date(2024, 3, 24)).len(), 1);
    /// assert!(table.for_day(date(2024, 3, 25)).is_empty());
    /// ```
    #[must_use]
    pub fn for_day(&self, day: Date) -> Self {
        let start = day.to_datetime(Time::midnight());
        let end = day.tomorrow().ok().map(|next| next.to_datetime(Time::midnight()));
        let series = self
            .series
            .iter()
            .filter_map(|(stop, samples)| {
                let kept: BTreeMap<DateTime, f64> = samples
                    .range(start..)
                    .take_while(|(at, _)| end.is_none_or(|limit| **at < limit))
                    .map(|(at, passengers)| (*at, *passengers))
                    .collect();
                (!kept.is_empty()).then(|| (stop.clone(), kept))
            })
            .collect();
        Self { series }
    }

    /// Whether any sample exists for `stop`.
    #[must_use]
    pub fn covers(&self, stop: &StopId) -> bool {
        self.series.get(stop).is_some_and(|series| !series.is_empty())
    }

    /// Number of stored samples across all stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.values().map(BTreeMap::len).sum()
    }

    /// Whether the table holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stops with at least one sample.
    pub fn stops(&self) -> impl Iterator<Item = &StopId> {
        self.series.keys()
    }

    /// Passengers at exactly `at`, if sampled.
    #[must_use]
    pub fn passengers_at(&self, stop: &StopId, at: DateTime) -> Option<f64> {
        self.series.get(stop)?.get(&at).copied()
    }

    /// First and last sample time of `stop`.
    #[must_use]
    pub fn time_range(&self, stop: &StopId) -> Option<(DateTime, DateTime)> {
        let series = self.series.get(stop)?;
        let (first, _) = series.first_key_value()?;
        let (last, _) = series.last_key_value()?;
        Some((*first, *last))
    }

    /// Samples of `stop` within `[from, to]`, ascending.
    pub fn samples_between(
        &self,
        stop: &StopId,
        from: DateTime,
        to: DateTime,
    ) -> impl Iterator<Item = (DateTime, f64)> + '_ {
        let (low, high) = if from <= to { (from, to) } else { (to, from) };
        self.series
            .get(stop)
            .into_iter()
            .flat_map(move |series| series.range(low..=high))
            .map(|(at, passengers)| (*at, *passengers))
    }

    /// Closest sample of `stop` to `target` that is not in `visits`.
    ///
    /// The search starts in the 10-minute bucket enclosing `target` and
    /// widens by one bucket on each side until a candidate appears. Ties
    /// resolve to the earlier sample. `visits` must be ascending.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DataExhausted`] once the window covers the
    /// stop's whole sample range without a candidate, or when the stop has
    /// no samples at all.
    pub fn nearest_unused_sample(
        &self,
        stop: &StopId,
        target: DateTime,
        visits: &[DateTime],
    ) -> Result<DateTime, DispatchError> {
        let exhausted = || DispatchError::DataExhausted {
            stop: stop.clone(),
            target,
        };
        let series = self.series.get(stop).ok_or_else(exhausted)?;
        let (first, last) = self.time_range(stop).ok_or_else(exhausted)?;

        let mut low = floor_to_bucket(target);
        let mut high = ceil_to_bucket(target);
        loop {
            let nearest = series
                .range(low..=high)
                .map(|(at, _)| *at)
                .filter(|at| visits.binary_search(at).is_err())
                .min_by_key(|at| (at.duration_since(target).abs(), *at));
            if let Some(at) = nearest {
                return Ok(at);
            }
            if low <= first && high >= last {
                return Err(exhausted());
            }
            low = low.saturating_sub(SAMPLE_CADENCE);
            high = high.saturating_add(SAMPLE_CADENCE);
        }
    }
}

impl FromIterator<DemandSample> for ForecastTable {
    fn from_iter<I: IntoIterator<Item = DemandSample>>(iter: I) -> Self {
        let mut table = Self::new();
        for sample in iter {
            table.insert(sample);
        }
        table
    }
}

impl Extend<DemandSample> for ForecastTable {
    fn extend<I: IntoIterator<Item = DemandSample>>(&mut self, iter: I) {
        for sample in iter {
            self.insert(sample);
        }
    }
}
