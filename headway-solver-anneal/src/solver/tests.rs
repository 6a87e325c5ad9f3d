//! Tests for the `AnnealSolver`.

use super::*;
use headway_core::test_support::three_stop_params;
use headway_core::{Params, PenaltyWeights, Stop, StopVisitLog};
use headway_forecast::test_support::{at, spike_forecast};
use headway_forecast::{DemandCache, ForecastTable};
use rstest::{fixture, rstest};

use crate::test_support::spike_request;

#[fixture]
fn params() -> Params {
    three_stop_params()
}

fn solve_with(
    params: &Params,
    vehicles: &[Vehicle],
    request: &SolveRequest,
) -> Result<Solution, DispatchError> {
    let table = spike_forecast();
    let mut cache = DemandCache::new();
    let formula = CostFormula::new(&params.stops, &table, &params.penalties, &mut cache)?;
    AnnealSolver::new(formula).solve(vehicles, request)
}

#[rstest]
fn spike_goes_to_the_larger_vehicle_without_delay(params: Params) {
    let solution =
        solve_with(&params, &params.vehicles, &spike_request(1)).expect("solve should succeed");
    assert_eq!(solution.vehicle.unit_number(), 102);
    assert_eq!(solution.delay_minutes, 0);
    assert_eq!(solution.start_point, StopId::from(1));
    assert!((solution.cost - (10.0 + 22.0 + 0.5 / 82.0)).abs() < 1e-9);
    let times: Vec<_> = solution.plan.iter().map(|visit| visit.time).collect();
    assert_eq!(times, [at(6, 5), at(6, 10), at(6, 15)]);
}

#[rstest]
#[case(1)]
#[case(42)]
#[case(u64::MAX)]
fn seeds_do_not_change_the_best_state(params: Params, #[case] seed: u64) {
    let solution =
        solve_with(&params, &params.vehicles, &spike_request(seed)).expect("solve should succeed");
    assert_eq!(solution.vehicle.unit_number(), 102);
    assert_eq!(solution.delay_minutes, 0);
}

#[rstest]
fn only_supplied_vehicles_are_chosen(params: Params) {
    let small_only: Vec<Vehicle> = params
        .vehicles
        .iter()
        .filter(|vehicle| vehicle.unit_number() == 101)
        .cloned()
        .collect();
    let solution =
        solve_with(&params, &small_only, &spike_request(3)).expect("solve should succeed");
    assert_eq!(solution.vehicle.unit_number(), 101);
}

#[rstest]
fn empty_fleets_are_configuration_errors(params: Params) {
    let err = solve_with(&params, &[], &spike_request(1)).expect_err("no vehicles");
    assert_eq!(err, DispatchError::Config(ConfigError::NoVehicles));
}

#[rstest]
fn fixed_mid_route_start_reorders_the_plan(params: Params) {
    let mut request = spike_request(5);
    request.start_stop = Some(StopId::from(2));
    let solution = solve_with(&params, &params.vehicles, &request).expect("solve should succeed");

    // Leaving stop 2 five minutes late puts it on the 06:10 spike.
    assert_eq!(solution.start_point, StopId::from(2));
    assert_eq!(solution.delay_minutes, 5);
    let stops: Vec<_> = solution.plan.iter().map(|visit| visit.stop.clone()).collect();
    assert_eq!(stops, [StopId::from(1), StopId::from(2), StopId::from(3)]);
    assert_eq!(solution.time_at(&StopId::from(2)), Some(at(6, 10)));
    assert_eq!(solution.time_at(&StopId::from(1)), Some(at(6, 20)));
}

#[rstest]
fn start_optimisation_never_does_worse(params: Params) {
    let fixed = solve_with(&params, &params.vehicles, &spike_request(9)).expect("fixed start");
    let mut request = spike_request(9);
    request.optimise_start = true;
    let free = solve_with(&params, &params.vehicles, &request).expect("optimised start");
    assert!(free.cost <= fixed.cost);
    assert_eq!(free.vehicle.unit_number(), 102);
}

#[rstest]
fn short_horizons_are_rejected(params: Params) {
    let mut request = spike_request(1);
    request.time_max = SignedDuration::from_mins(3);
    let err = solve_with(&params, &params.vehicles, &request).expect_err("no delay slot");
    assert!(matches!(
        err,
        DispatchError::Config(ConfigError::EmptySearchSpace { .. })
    ));
}

#[rstest]
fn exhausted_forecasts_abort_the_search() {
    let mut terminal = Stop::new(1, "Terminal", SignedDuration::from_mins(5));
    terminal.record_visit(at(6, 0));
    let stops = vec![terminal];
    let mut table = ForecastTable::new();
    table.insert(headway_forecast::DemandSample::new(at(6, 0), 1, 4.0));
    let penalties = PenaltyWeights::default();
    let mut cache = DemandCache::new();
    let formula = CostFormula::new(&stops, &table, &penalties, &mut cache).expect("formula");
    let fleet = [Vehicle::new(7, 10, 20, 1)];
    let mut request = spike_request(1);
    request.time_max = SignedDuration::from_hours(2);

    let result = AnnealSolver::new(formula).solve(&fleet, &request);
    assert!(matches!(result, Err(DispatchError::DataExhausted { .. })));
}
