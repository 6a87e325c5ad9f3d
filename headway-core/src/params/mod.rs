//! The complete configuration document.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, PenaltyWeights, Route, RouteId, Schedule, Stop, StopId, Vehicle};

/// Stops, routes, schedule, penalty weights and fleet.
///
/// The serialised form keeps the configuration's field names (`paradas`,
/// `rutas`, `horario`, `penalizaciones`, `buses`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Every stop of the network.
    #[serde(rename = "paradas")]
    pub stops: Vec<Stop>,
    /// Routes over those stops.
    #[serde(rename = "rutas")]
    pub routes: Vec<Route>,
    /// Fleet schedule.
    #[serde(rename = "horario")]
    pub schedule: Schedule,
    /// Cost coefficients.
    #[serde(rename = "penalizaciones", default)]
    pub penalties: PenaltyWeights,
    /// Fleet.
    #[serde(rename = "buses")]
    pub vehicles: Vec<Vehicle>,
}

impl Params {
    /// Check cross references and value ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let stop_ids = self.unique_stop_ids()?;
        self.validate_routes(&stop_ids)?;
        self.validate_vehicles()?;
        self.validate_schedule()?;
        self.penalties.validate()
    }

    /// Look up a route.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRoute`] when absent.
    pub fn route(&self, id: &RouteId) -> Result<&Route, ConfigError> {
        self.routes
            .iter()
            .find(|route| &route.id == id)
            .ok_or_else(|| ConfigError::UnknownRoute { id: id.clone() })
    }

    /// Look up a stop.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownStop`] when absent.
    pub fn stop(&self, id: &StopId) -> Result<&Stop, ConfigError> {
        self.stops
            .iter()
            .find(|stop| &stop.id == id)
            .ok_or_else(|| ConfigError::UnknownStop { id: id.clone() })
    }

    /// Look up a vehicle by unit number.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownVehicle`] when absent.
    pub fn vehicle(&self, unit: u32) -> Result<&Vehicle, ConfigError> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.unit_number == unit)
            .ok_or(ConfigError::UnknownVehicle { unit })
    }

    fn unique_stop_ids(&self) -> Result<BTreeSet<&StopId>, ConfigError> {
        let mut seen = BTreeSet::new();
        for stop in &self.stops {
            if !seen.insert(&stop.id) {
                return Err(ConfigError::DuplicateStop {
                    id: stop.id.clone(),
                });
            }
        }
        Ok(seen)
    }

    fn validate_routes(&self, stop_ids: &BTreeSet<&StopId>) -> Result<(), ConfigError> {
        let mut route_ids = BTreeSet::new();
        for route in &self.routes {
            if !route_ids.insert(&route.id) {
                return Err(ConfigError::DuplicateRoute {
                    id: route.id.clone(),
                });
            }
            if route.stops.is_empty() {
                return Err(ConfigError::EmptyRoute {
                    route: route.id.clone(),
                });
            }
            let mut on_route = BTreeSet::new();
            for stop in &route.stops {
                if !stop_ids.contains(stop) {
                    return Err(ConfigError::UnknownStop { id: stop.clone() });
                }
                if !on_route.insert(stop) {
                    return Err(ConfigError::RepeatedRouteStop {
                        route: route.id.clone(),
                        stop: stop.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_vehicles(&self) -> Result<(), ConfigError> {
        let mut units = BTreeSet::new();
        for vehicle in &self.vehicles {
            if !units.insert(vehicle.unit_number) {
                return Err(ConfigError::DuplicateVehicle {
                    unit: vehicle.unit_number,
                });
            }
            if vehicle.min_capacity > vehicle.max_capacity {
                return Err(ConfigError::InvalidCapacity {
                    unit: vehicle.unit_number,
                });
            }
            let route = self.route(&vehicle.route)?;
            if let Some(stop) = &vehicle.start_stop
                && route.position(stop).is_none()
            {
                return Err(ConfigError::StartStopOffRoute {
                    unit: vehicle.unit_number,
                    stop: stop.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_schedule(&self) -> Result<(), ConfigError> {
        let schedule = &self.schedule;
        let windows = [
            ("inicio", &schedule.shift_start),
            ("fin", &schedule.shift_end),
            ("descanso", &schedule.rest),
        ];
        for (field, window) in windows {
            if !window.is_well_formed() {
                return Err(ConfigError::InvalidLimits { field });
            }
        }
        let lunch = &schedule.lunch;
        if lunch.earliest > lunch.latest || lunch.duration.is_negative() {
            return Err(ConfigError::InvalidLimits { field: "almuerzo" });
        }
        if schedule.interval.as_mins() < 1 {
            return Err(ConfigError::NonPositiveInterval);
        }
        Ok(())
    }
}
