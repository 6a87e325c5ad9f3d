//! Exclusive slices of a route's stops and vehicles.

use std::collections::BTreeMap;

use headway_core::{ConfigError, RouteId, RouteProvider, StopId, StopProvider, VehicleProvider};
use headway_scorer::limit_indices;
use log::warn;

/// The stops and vehicles one orchestration task owns.
#[derive(Debug)]
pub struct Partition<S, V> {
    /// Route being dispatched.
    pub route: RouteId,
    /// Fixed start stop; `None` departs from the first stop.
    pub start_stop: Option<StopId>,
    /// Stops in travel order.
    pub stops: Vec<S>,
    /// Vehicles assigned to the route.
    pub vehicles: Vec<V>,
}

impl<S: StopProvider, V: VehicleProvider> Partition<S, V> {
    /// Vehicles still available for dispatch.
    pub fn available(&self) -> impl Iterator<Item = &V> {
        self.vehicles.iter().filter(|vehicle| vehicle.is_available())
    }

    /// Number of vehicles still available.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.available().count()
    }

    /// Position of `stop` in the partition.
    #[must_use]
    pub fn position(&self, stop: &StopId) -> Option<usize> {
        self.stops.iter().position(|candidate| candidate.id() == stop)
    }
}

/// Borrow the stops of `route`, in route order, and every vehicle assigned
/// to it.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownStop`] when the route names a stop missing
/// from `stops`, and [`ConfigError::EmptyRoute`] for routes without stops.
pub fn route_partition<'p, S, V, R>(
    stops: &'p mut [S],
    vehicles: &'p mut [V],
    route: &R,
) -> Result<Partition<&'p mut S, &'p mut V>, ConfigError>
where
    S: StopProvider,
    V: VehicleProvider,
    R: RouteProvider,
{
    let route_id = route.route_id();
    if route.stop_ids().is_empty() {
        return Err(ConfigError::EmptyRoute {
            route: route_id.clone(),
        });
    }
    let mut by_id: BTreeMap<StopId, &'p mut S> = stops
        .iter_mut()
        .map(|stop| (stop.id().clone(), stop))
        .collect();
    let ordered = route
        .stop_ids()
        .iter()
        .map(|id| {
            by_id
                .remove(id)
                .ok_or_else(|| ConfigError::UnknownStop { id: id.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let assigned = vehicles
        .iter_mut()
        .filter(|vehicle| vehicle.route_id() == route_id)
        .collect();
    Ok(Partition {
        route: route_id.clone(),
        start_stop: None,
        stops: ordered,
        vehicles: assigned,
    })
}

/// Split a route partition between two start stops.
///
/// The first half runs from `first` up to `second`, the other from
/// `second` around to `first`, each listed from its own start stop. Every
/// stop lands in exactly one half. Vehicles follow their configured start
/// stop; vehicles starting elsewhere are left out with a warning.
///
/// # Errors
///
/// [`ConfigError::CoincidentStartStops`] when both start stops are equal and
/// [`ConfigError::UnknownStop`] when either is not on the route.
pub fn split_route<S, V>(
    partition: Partition<S, V>,
    first: &StopId,
    second: &StopId,
) -> Result<(Partition<S, V>, Partition<S, V>), ConfigError>
where
    S: StopProvider,
    V: VehicleProvider,
{
    if first == second {
        return Err(ConfigError::CoincidentStartStops {
            stop: first.clone(),
        });
    }
    let locate = |stop: &StopId| {
        partition
            .position(stop)
            .ok_or_else(|| ConfigError::UnknownStop { id: stop.clone() })
    };
    let first_at = locate(first)?;
    let second_at = locate(second)?;
    let len = partition.stops.len();

    let Partition {
        route,
        stops,
        vehicles,
        ..
    } = partition;
    let mut slots: Vec<Option<S>> = stops.into_iter().map(Some).collect();
    let mut take = |indices: Vec<usize>| -> Vec<S> {
        indices
            .into_iter()
            .filter_map(|index| slots.get_mut(index).and_then(Option::take))
            .collect()
    };
    let first_stops = take(limit_indices(len, first_at, second_at));
    let second_stops = take(limit_indices(len, second_at, first_at));

    let mut first_vehicles = Vec::new();
    let mut second_vehicles = Vec::new();
    for vehicle in vehicles {
        match vehicle.start_stop() {
            Some(stop) if stop == first => first_vehicles.push(vehicle),
            Some(stop) if stop == second => second_vehicles.push(vehicle),
            other => warn!(
                "unit {} starts at {}, outside both partitions of route {route}",
                vehicle.unit_number(),
                other.map_or_else(|| "no configured stop".to_owned(), ToString::to_string)
            ),
        }
    }

    Ok((
        Partition {
            route: route.clone(),
            start_stop: Some(first.clone()),
            stops: first_stops,
            vehicles: first_vehicles,
        },
        Partition {
            route,
            start_stop: Some(second.clone()),
            stops: second_stops,
            vehicles: second_vehicles,
        },
    ))
}
