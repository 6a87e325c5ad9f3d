//! Behavioural tests for the dispatch runs using rstest-bdd.

use std::cell::RefCell;

use headway_core::test_support::{split_route_params, three_stop_params};
use headway_core::{ConfigError, DispatchError, Params, RouteId, Solution, StopId, VehicleProvider};
use headway_dispatch::{DispatchOptions, TaskOutcome, dispatch_route, dispatch_split};
use headway_forecast::ForecastTable;
use headway_forecast::test_support::{SERVICE_DAY, ramp_forecast, spike_forecast};
use jiff::civil::{DateTime, date};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct DispatchWorld {
    params: RefCell<Option<Params>>,
    table: RefCell<ForecastTable>,
    solutions: RefCell<Option<Result<Vec<Solution>, DispatchError>>>,
    halves: RefCell<Option<Result<[TaskOutcome; 2], DispatchError>>>,
}

impl DispatchWorld {
    fn options() -> DispatchOptions {
        let (year, month, day) = SERVICE_DAY;
        DispatchOptions::new(date(year, month, day), 3)
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn dispatch(&self) {
        let table = self.table.borrow();
        let mut guard = self.params.borrow_mut();
        let params = guard.as_mut().expect("params should be configured");
        let route = params.routes.first().map(|route| route.id.clone()).expect("route");
        let outcome = dispatch_route(params, &table, &route, &Self::options());
        self.solutions.replace(Some(outcome));
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn split(&self, first: i64, second: i64) {
        let table = self.table.borrow();
        let mut guard = self.params.borrow_mut();
        let params = guard.as_mut().expect("params should be configured");
        let outcome = dispatch_split(
            params,
            &table,
            &RouteId::from(40),
            &StopId::from(first),
            &StopId::from(second),
            &Self::options(),
        );
        self.halves.replace(Some(outcome));
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_solutions(&self) -> Vec<Solution> {
        self.solutions
            .borrow()
            .clone()
            .expect("dispatch should run before assertions")
            .expect("dispatch should succeed")
    }

    fn departures(&self) -> Vec<DateTime> {
        self.expect_solutions()
            .iter()
            .filter_map(|solution| solution.time_at(&solution.start_point))
            .collect()
    }
}

#[fixture]
fn world() -> DispatchWorld {
    DispatchWorld::default()
}

#[given("the three stop route with its two vehicles")]
fn given_three_stops(world: &DispatchWorld) {
    world.params.replace(Some(three_stop_params()));
}

#[given("the six stop route with vehicles at stops 1 and 4")]
fn given_six_stops(world: &DispatchWorld) {
    world.params.replace(Some(split_route_params()));
}

#[given("the spike forecast")]
fn given_spike(world: &DispatchWorld) {
    world.table.replace(spike_forecast());
}

#[given("a forecast ramping with the stop number")]
fn given_ramp(world: &DispatchWorld) {
    world.table.replace(ramp_forecast(6));
}

#[when("the route is dispatched")]
fn when_dispatched(world: &DispatchWorld) {
    world.dispatch();
}

#[when("the route is split between stops 1 and 4")]
fn when_split(world: &DispatchWorld) {
    world.split(1, 4);
}

#[when("the route is split between stops 3 and 3")]
fn when_split_coincident(world: &DispatchWorld) {
    world.split(3, 3);
}

#[then("2 dispatches are committed")]
fn then_two_dispatches(world: &DispatchWorld) {
    assert_eq!(world.expect_solutions().len(), 2);
}

#[then("unit 102 is dispatched first")]
fn then_large_first(world: &DispatchWorld) {
    let first = world.expect_solutions().first().map(|solution| solution.vehicle.unit_number);
    assert_eq!(first, Some(102));
}

#[then("no vehicle remains available")]
fn then_none_available(world: &DispatchWorld) {
    let params = world.params.borrow();
    assert!(
        params
            .iter()
            .flat_map(|loaded| loaded.vehicles.iter())
            .all(|vehicle| !vehicle.is_available())
    );
}

#[then("each dispatch departs no earlier than the one before")]
fn then_ordered(world: &DispatchWorld) {
    let departures = world.departures();
    assert_eq!(departures.len(), 2);
    assert!(departures.windows(2).all(|pair| pair.first() <= pair.last()));
}

#[then("both halves commit 2 dispatches")]
fn then_both_halves(world: &DispatchWorld) {
    let halves = world.halves.borrow();
    let counts: Vec<_> = halves
        .iter()
        .flatten()
        .flatten()
        .map(|outcome| outcome.result.as_ref().map(Vec::len).ok())
        .collect();
    assert_eq!(counts, [Some(2), Some(2)]);
}

#[then("the split fails with coincident start stops")]
fn then_coincident(world: &DispatchWorld) {
    let halves = world.halves.borrow();
    assert!(matches!(
        halves.as_ref(),
        Some(Err(DispatchError::Config(
            ConfigError::CoincidentStartStops { .. }
        )))
    ));
}

#[scenario(path = "tests/features/orchestrator.feature", index = 0)]
fn every_vehicle_dispatched(world: DispatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/orchestrator.feature", index = 1)]
fn departures_are_ordered(world: DispatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/orchestrator.feature", index = 2)]
fn split_route_dispatch(world: DispatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/orchestrator.feature", index = 3)]
fn coincident_split(world: DispatchWorld) {
    let _ = world;
}
