//! Behavioural tests for loading, saving and validating configuration.

use std::cell::RefCell;

use headway_core::test_support::three_stop_params;
use headway_core::{ConfigError, Params, RouteId, StopProvider, StopVisitLog, Vehicle};
use jiff::SignedDuration;
use jiff::civil::date;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug)]
struct ParamsWorld {
    params: RefCell<Params>,
    reloaded: RefCell<Option<Params>>,
    validation: RefCell<Option<Result<(), ConfigError>>>,
}

impl ParamsWorld {
    fn new() -> Self {
        Self {
            params: RefCell::new(three_stop_params()),
            reloaded: RefCell::new(None),
            validation: RefCell::new(None),
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_validation(&self) -> Result<(), ConfigError> {
        self.validation
            .borrow()
            .clone()
            .expect("validation should run before assertions")
    }
}

#[fixture]
fn world() -> ParamsWorld {
    ParamsWorld::new()
}

#[given("the three stop configuration")]
fn given_three_stops(world: &ParamsWorld) {
    world.params.replace(three_stop_params());
}

#[given("every stop has recorded visits")]
fn given_recorded_visits(world: &ParamsWorld) {
    let visit = date(2024, 3, 23).at(6, 20, 0, 0);
    for stop in &mut world.params.borrow_mut().stops {
        stop.record_visit(visit);
    }
}

#[given("the dispatch interval is zero")]
fn given_zero_interval(world: &ParamsWorld) {
    world.params.borrow_mut().schedule.interval = SignedDuration::ZERO;
}

#[given("a vehicle assigned to route 99")]
fn given_unknown_route(world: &ParamsWorld) {
    world
        .params
        .borrow_mut()
        .vehicles
        .push(Vehicle::new(150, 10, 30, 99));
}

#[when("the configuration is saved and reloaded")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_round_tripped(world: &ParamsWorld) {
    let payload = serde_json::to_string_pretty(&*world.params.borrow()).expect("encode params");
    let decoded: Params = serde_json::from_str(&payload).expect("decode params");
    world.reloaded.replace(Some(decoded));
}

#[when("the configuration is validated")]
fn when_validated(world: &ParamsWorld) {
    let outcome = world.params.borrow().validate();
    world.validation.replace(Some(outcome));
}

#[then("every configured field is preserved")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_fields_preserved(world: &ParamsWorld) {
    let reloaded = world.reloaded.borrow().clone().expect("reloaded params");
    let original = world.params.borrow();
    assert_eq!(reloaded.routes, original.routes);
    assert_eq!(reloaded.vehicles, original.vehicles);
    assert_eq!(reloaded.schedule, original.schedule);
    assert_eq!(reloaded.penalties, original.penalties);
    for (loaded, source) in reloaded.stops.iter().zip(&original.stops) {
        assert_eq!(loaded.id(), source.id());
        assert_eq!(loaded.name(), source.name());
        assert_eq!(loaded.travel_time(), source.travel_time());
        assert_eq!(loaded.event_delay(), source.event_delay());
    }
}

#[then("no stop carries visit history")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_no_visits(world: &ParamsWorld) {
    let reloaded = world.reloaded.borrow().clone().expect("reloaded params");
    assert!(reloaded.stops.iter().all(|stop| stop.visits().is_empty()));
}

#[then("validation fails with a non-positive interval")]
fn then_interval_rejected(world: &ParamsWorld) {
    assert_eq!(
        world.expect_validation(),
        Err(ConfigError::NonPositiveInterval)
    );
}

#[then("validation fails naming route 99")]
fn then_route_rejected(world: &ParamsWorld) {
    assert_eq!(
        world.expect_validation(),
        Err(ConfigError::UnknownRoute {
            id: RouteId::Number(99)
        })
    );
}

#[scenario(path = "tests/features/params.feature", index = 0)]
fn round_trip(world: ParamsWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/params.feature", index = 1)]
fn zero_interval(world: ParamsWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/params.feature", index = 2)]
fn unknown_route(world: ParamsWorld) {
    let _ = world;
}
