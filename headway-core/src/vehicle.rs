//! Fleet vehicles.

use serde::{Deserialize, Serialize};

use crate::provider::{VehicleAvailability, VehicleProvider};
use crate::{RouteId, StopId};

/// A vehicle assigned to a route.
///
/// Only the orchestrator flips availability, through
/// [`VehicleAvailability`].
///
/// # Examples
/// ```
/// use headway_core::{Vehicle, VehicleProvider};
///
/// let bus = Vehicle::new(12, 20, 60, 30);
/// assert!(bus.is_available());
/// assert_eq!(bus.max_capacity(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique unit number.
    #[serde(rename = "unidad")]
    pub unit_number: u32,
    /// Minimum passenger capacity.
    #[serde(rename = "min")]
    pub min_capacity: u32,
    /// Maximum passenger capacity.
    #[serde(rename = "max")]
    pub max_capacity: u32,
    #[serde(rename = "disponible")]
    available: bool,
    /// Route the vehicle serves.
    #[serde(rename = "ruta")]
    pub route: RouteId,
    /// Start stop used when a route is dispatched in two directions.
    #[serde(
        rename = "paradaInicial",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub start_stop: Option<StopId>,
}

impl Vehicle {
    /// Create an available vehicle without a configured start stop.
    pub fn new(
        unit_number: u32,
        min_capacity: u32,
        max_capacity: u32,
        route: impl Into<RouteId>,
    ) -> Self {
        Self {
            unit_number,
            min_capacity,
            max_capacity,
            available: true,
            route: route.into(),
            start_stop: None,
        }
    }

    /// Set the start stop, builder style.
    #[must_use]
    pub fn with_start_stop(mut self, stop: impl Into<StopId>) -> Self {
        self.start_stop = Some(stop.into());
        self
    }

    /// Copy any vehicle provider into an owned value.
    pub fn snapshot<V: VehicleProvider + ?Sized>(vehicle: &V) -> Self {
        Self {
            unit_number: vehicle.unit_number(),
            min_capacity: vehicle.min_capacity(),
            max_capacity: vehicle.max_capacity(),
            available: vehicle.is_available(),
            route: vehicle.route_id().clone(),
            start_stop: vehicle.start_stop().cloned(),
        }
    }
}

impl VehicleProvider for Vehicle {
    fn unit_number(&self) -> u32 {
        self.unit_number
    }

    fn min_capacity(&self) -> u32 {
        self.min_capacity
    }

    fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn route_id(&self) -> &RouteId {
        &self.route
    }

    fn start_stop(&self) -> Option<&StopId> {
        self.start_stop.as_ref()
    }
}

impl VehicleAvailability for Vehicle {
    fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_spanish_field_names() {
        let vehicle: Vehicle = serde_json::from_str(
            r#"{"unidad": 7, "min": 10, "max": 40, "disponible": false, "ruta": "30"}"#,
        )
        .expect("decode vehicle");
        assert_eq!(vehicle.unit_number, 7);
        assert!(!vehicle.is_available());
        assert_eq!(vehicle.route, RouteId::Text("30".into()));
        assert!(vehicle.start_stop.is_none());
    }

    #[rstest]
    fn start_stop_is_omitted_when_unset() {
        let encoded = serde_json::to_value(Vehicle::new(1, 10, 40, 3)).expect("encode");
        assert!(encoded.get("paradaInicial").is_none());
        let split = serde_json::to_value(Vehicle::new(1, 10, 40, 3).with_start_stop(5))
            .expect("encode");
        assert_eq!(split["paradaInicial"], 5);
    }
}
