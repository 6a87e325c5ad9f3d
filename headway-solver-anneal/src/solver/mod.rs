//! `AnnealSolver` implementation over the dispatch cost formula.

use headway_core::{
    ConfigError, DispatchError, DispatchSolver, PenaltyProvider, Solution, SolveRequest, StopId,
    StopProvider, Vehicle, VehicleProvider,
};
use headway_scorer::CostFormula;
use jiff::SignedDuration;
use log::debug;

use crate::{AnnealConfig, AnnealProblem, Annealer, DispatchCursor, DispatchState, build_plan};

/// Dispatch solver that anneals over every `(vehicle, delay, start)`
/// candidate.
///
/// The solver owns the cost formula for one dispatch decision; build a new
/// one whenever stop state changes.
pub struct AnnealSolver<'f, S, P>
where
    S: StopProvider,
    P: PenaltyProvider,
{
    formula: CostFormula<'f, S, P>,
    config: AnnealConfig,
}

impl<'f, S, P> AnnealSolver<'f, S, P>
where
    S: StopProvider,
    P: PenaltyProvider,
{
    /// Construct a solver using default calibration settings.
    pub fn new(formula: CostFormula<'f, S, P>) -> Self {
        Self::with_config(formula, AnnealConfig::default())
    }

    /// Construct a solver with explicit calibration settings.
    pub const fn with_config(formula: CostFormula<'f, S, P>, config: AnnealConfig) -> Self {
        Self { formula, config }
    }

    fn start_candidates(&self, request: &SolveRequest) -> Result<Vec<StopId>, ConfigError> {
        let scope = self.formula.stops();
        if request.optimise_start {
            return Ok(scope.iter().map(|stop| stop.id().clone()).collect());
        }
        request
            .start_stop
            .clone()
            .or_else(|| scope.first().map(|stop| stop.id().clone()))
            .map(|start| vec![start])
            .ok_or(ConfigError::EmptyScope)
    }
}

impl<S, P, V> DispatchSolver<V> for AnnealSolver<'_, S, P>
where
    S: StopProvider,
    P: PenaltyProvider,
    V: VehicleProvider,
{
    fn solve(&mut self, vehicles: &[V], request: &SolveRequest) -> Result<Solution, DispatchError> {
        if vehicles.is_empty() {
            return Err(ConfigError::NoVehicles.into());
        }
        let starts = self.start_candidates(request)?;
        let cursor = DispatchCursor::new(vehicles.len(), request.delay_slots()?, starts.len())?;
        let steps = cursor.cycle_len()?;

        let mut problem = DispatchProblem {
            formula: &mut self.formula,
            vehicles,
            starts: &starts,
            request,
            cursor,
        };
        let outcome = Annealer::with_config(request.seed, self.config).run(&mut problem, steps)?;
        debug!(
            "annealed {steps} candidates in {} evaluations",
            outcome.evaluations
        );

        let DispatchState {
            vehicle,
            delay_slot,
            start,
        } = outcome.state;
        let chosen = vehicles.get(vehicle).ok_or(ConfigError::NoVehicles)?;
        let start_point = starts.get(start).ok_or(ConfigError::EmptyScope)?.clone();
        let delay_minutes = request.slot_delay_minutes(delay_slot);
        let departure = request
            .reference
            .saturating_add(SignedDuration::from_mins(delay_minutes));
        let plan = build_plan(self.formula.stops(), &start_point, departure)?;

        debug!(
            "unit {} leaves {start_point} after {delay_minutes} min at cost {:.3}",
            chosen.unit_number(),
            outcome.energy
        );
        Ok(Solution {
            vehicle: Vehicle::snapshot(chosen),
            plan,
            start_point,
            delay_minutes,
            cost: outcome.energy,
        })
    }
}

/// Adapts one dispatch decision to the generic annealer.
struct DispatchProblem<'p, 'f, S, P, V> {
    formula: &'p mut CostFormula<'f, S, P>,
    vehicles: &'p [V],
    starts: &'p [StopId],
    request: &'p SolveRequest,
    cursor: DispatchCursor,
}

impl<S, P, V> AnnealProblem for DispatchProblem<'_, '_, S, P, V>
where
    S: StopProvider,
    P: PenaltyProvider,
    V: VehicleProvider,
{
    type State = DispatchState;
    type Error = DispatchError;

    fn initial(&mut self) -> DispatchState {
        self.cursor.rewind()
    }

    fn next_state(&mut self) -> DispatchState {
        self.cursor.advance()
    }

    fn energy(&mut self, state: &DispatchState) -> Result<f64, DispatchError> {
        let vehicle = self
            .vehicles
            .get(state.vehicle)
            .ok_or(ConfigError::NoVehicles)?;
        let start = self.starts.get(state.start).ok_or(ConfigError::EmptyScope)?;
        let delay = SignedDuration::from_mins(self.request.slot_delay_minutes(state.delay_slot));
        self.formula.cost(
            self.request.reference,
            start,
            delay,
            vehicle.max_capacity(),
        )
    }
}

#[cfg(test)]
mod tests;
