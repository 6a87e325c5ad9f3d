//! Behavioural tests for `AnnealSolver` using rstest-bdd.

use std::cell::RefCell;

use headway_core::test_support::three_stop_params;
use headway_core::{
    ConfigError, DispatchError, DispatchSolver, Params, Solution, StopId, Vehicle,
    VehicleProvider,
};
use headway_forecast::test_support::{at, spike_forecast};
use headway_forecast::{DemandCache, ForecastTable};
use headway_scorer::CostFormula;
use headway_solver_anneal::AnnealSolver;
use headway_solver_anneal::test_support::spike_request;
use jiff::SignedDuration;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct SolverWorld {
    params: RefCell<Option<Params>>,
    fleet: RefCell<Vec<Vehicle>>,
    table: RefCell<ForecastTable>,
    outcome: RefCell<Option<Result<Solution, DispatchError>>>,
}

impl SolverWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> Result<Solution, DispatchError> {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_solution(&self) -> Solution {
        self.expect_outcome().expect("solve should succeed")
    }

    fn with_fleet(&self, keep: impl Fn(&Vehicle) -> bool) {
        let params = three_stop_params();
        let fleet = params.vehicles.iter().filter(|vehicle| keep(*vehicle)).cloned().collect();
        self.fleet.replace(fleet);
        self.params.replace(Some(params));
    }

    /// Cost of dispatching `unit` from stop 1 after `delay_minutes`.
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn cost_of(&self, unit: u32, delay_minutes: i64) -> f64 {
        let guard = self.params.borrow();
        let params = guard.as_ref().expect("params should be set");
        let table = self.table.borrow();
        let mut cache = DemandCache::new();
        let capacity = params
            .vehicle(unit)
            .map(VehicleProvider::max_capacity)
            .expect("unit should exist");
        CostFormula::new(&params.stops, &table, &params.penalties, &mut cache)
            .expect("formula")
            .cost(
                at(6, 0),
                &StopId::from(1),
                SignedDuration::from_mins(delay_minutes),
                capacity,
            )
            .expect("cost")
    }
}

#[fixture]
fn world() -> SolverWorld {
    SolverWorld::default()
}

#[given("the three stop route with units 101 and 102")]
fn given_full_fleet(world: &SolverWorld) {
    world.with_fleet(|_| true);
}

#[given("the three stop route with only unit 101 available")]
fn given_small_fleet(world: &SolverWorld) {
    world.with_fleet(|vehicle| vehicle.unit_number() == 101);
}

#[given("the three stop route with no vehicles")]
fn given_no_fleet(world: &SolverWorld) {
    world.with_fleet(|_| false);
}

#[given("the spike forecast")]
fn given_spike(world: &SolverWorld) {
    world.table.replace(spike_forecast());
}

#[when("the solver runs with seed 7")]
fn when_solving(world: &SolverWorld) {
    let params = world.params.borrow();
    let table = world.table.borrow();
    let fleet = world.fleet.borrow();
    let mut cache = DemandCache::new();
    let outcome = params
        .as_ref()
        .ok_or(DispatchError::Config(ConfigError::NoVehicles))
        .and_then(|params| {
            let formula =
                CostFormula::new(&params.stops, &table, &params.penalties, &mut cache)?;
            AnnealSolver::new(formula).solve(fleet.as_slice(), &spike_request(7))
        });
    world.outcome.replace(Some(outcome));
}

#[then("unit 102 is dispatched")]
fn then_unit_102(world: &SolverWorld) {
    assert_eq!(world.expect_solution().vehicle.unit_number(), 102);
}

#[then("unit 101 is dispatched")]
fn then_unit_101(world: &SolverWorld) {
    assert_eq!(world.expect_solution().vehicle.unit_number(), 101);
}

#[then("it departs without delay")]
fn then_no_delay(world: &SolverWorld) {
    assert_eq!(world.expect_solution().delay_minutes, 0);
}

#[then("the chosen dispatch is cheaper than a 25 minute delay")]
fn then_cheaper_than_late(world: &SolverWorld) {
    let solution = world.expect_solution();
    assert!(solution.cost < world.cost_of(102, 25));
}

#[then("the solver reports that no vehicle was supplied")]
fn then_no_vehicles(world: &SolverWorld) {
    assert_eq!(
        world.expect_outcome(),
        Err(DispatchError::Config(ConfigError::NoVehicles))
    );
}

#[scenario(path = "tests/features/anneal_solver.feature", index = 0)]
fn spike_dispatch(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/anneal_solver.feature", index = 1)]
fn supplied_vehicles_only(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/anneal_solver.feature", index = 2)]
fn no_vehicles(world: SolverWorld) {
    let _ = world;
}
