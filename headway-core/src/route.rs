//! Routes as ordered stop sequences.

use serde::{Deserialize, Serialize};

use crate::provider::RouteProvider;
use crate::{RouteId, StopId};

/// An ordered sequence of stops. Reversing the order gives a different route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Route identifier.
    pub id: RouteId,
    /// Stop identifiers in travel order.
    #[serde(rename = "paradas")]
    pub stops: Vec<StopId>,
}

impl Route {
    /// Create a route from its identifier and ordered stops.
    pub fn new<I, S>(id: impl Into<RouteId>, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StopId>,
    {
        Self {
            id: id.into(),
            stops: stops.into_iter().map(Into::into).collect(),
        }
    }

    /// Position of `stop` along the route.
    #[must_use]
    pub fn position(&self, stop: &StopId) -> Option<usize> {
        self.stops.iter().position(|candidate| candidate == stop)
    }
}

impl RouteProvider for Route {
    fn route_id(&self) -> &RouteId {
        &self.id
    }

    fn stop_ids(&self) -> &[StopId] {
        &self.stops
    }
}
