//! Single-slot memo of the last demand query.

use headway_core::{StopId, StopProvider};
use jiff::SignedDuration;
use jiff::civil::DateTime;

use crate::DemandSummary;

/// Identity of a demand query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandKey {
    stops: Vec<StopId>,
    start: DateTime,
    delay: SignedDuration,
}

impl DemandKey {
    /// Key for a scoped stop sequence, reference start and delay.
    pub fn new<S: StopProvider>(stops: &[S], start: DateTime, delay: SignedDuration) -> Self {
        Self {
            stops: stops.iter().map(|stop| stop.id().clone()).collect(),
            start,
            delay,
        }
    }
}

/// Remembers the most recent demand query.
///
/// The key omits stop state (visits and event delays), so the owner must
/// [`clear`](Self::clear) the cache whenever that state changes. Each
/// orchestration task owns its own cache.
#[derive(Debug, Default)]
pub struct DemandCache {
    slot: Option<(DemandKey, DemandSummary)>,
    hits: u64,
}

impl DemandCache {
    /// Create an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: None,
            hits: 0,
        }
    }

    /// Cached summary for `key`, counting the hit.
    pub fn get(&mut self, key: &DemandKey) -> Option<DemandSummary> {
        let summary = self
            .slot
            .as_ref()
            .filter(|(cached, _)| cached == key)
            .map(|(_, summary)| *summary)?;
        self.hits = self.hits.saturating_add(1);
        Some(summary)
    }

    /// Replace the slot.
    pub fn store(&mut self, key: DemandKey, summary: DemandSummary) {
        self.slot = Some((key, summary));
    }

    /// Drop the slot.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Number of queries answered from the slot.
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }
}
