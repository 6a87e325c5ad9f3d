//! Stops along a route.

use jiff::SignedDuration;
use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::provider::{StopProvider, StopVisitLog};
use crate::StopId;

/// A stop with its travel time and runtime visit history.
///
/// The visit history is runtime-only: it starts empty when loaded and is
/// never serialised.
///
/// # Examples
/// ```
/// use headway_core::{Stop, StopProvider, StopVisitLog};
/// use jiff::SignedDuration;
/// use jiff::civil::date;
///
/// let mut stop = Stop::new(1, "Plaza", SignedDuration::from_mins(4));
/// stop.record_visit(date(2024, 3, 23).at(6, 20, 0, 0));
/// stop.record_visit(date(2024, 3, 23).at(6, 10, 0, 0));
/// assert_eq!(stop.visits().len(), 2);
/// assert!(stop.visits().is_sorted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Stop identifier.
    pub id: StopId,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Nominal travel time from the previous stop.
    #[serde(rename = "tiempo", with = "crate::duration_format")]
    pub travel_time: SignedDuration,
    #[serde(
        rename = "retrasoPorEvento",
        with = "crate::duration_format",
        default
    )]
    event_delay: SignedDuration,
    #[serde(skip)]
    visits: Vec<DateTime>,
}

impl Stop {
    /// Create a stop without event delay or visits.
    pub fn new(id: impl Into<StopId>, name: impl Into<String>, travel_time: SignedDuration) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            travel_time,
            event_delay: SignedDuration::ZERO,
            visits: Vec::new(),
        }
    }

    /// Set the event delay, builder style.
    #[must_use]
    pub const fn with_event_delay(mut self, delay: SignedDuration) -> Self {
        self.event_delay = delay;
        self
    }

    /// Forget every recorded visit.
    pub fn clear_visits(&mut self) {
        self.visits.clear();
    }
}

impl StopProvider for Stop {
    fn id(&self) -> &StopId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn travel_time(&self) -> SignedDuration {
        self.travel_time
    }

    fn event_delay(&self) -> SignedDuration {
        self.event_delay
    }

    fn visits(&self) -> &[DateTime] {
        &self.visits
    }
}

impl StopVisitLog for Stop {
    fn record_visit(&mut self, at: DateTime) {
        let position = self.visits.partition_point(|visit| *visit <= at);
        self.visits.insert(position, at);
    }

    fn set_event_delay(&mut self, delay: SignedDuration) {
        self.event_delay = delay;
    }
}
