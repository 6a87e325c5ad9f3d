//! The SELECTING, COMMITTING, ADVANCING dispatch loop.

use headway_core::{
    ConfigError, DispatchError, DispatchSolver, PenaltyProvider, ScheduleLimitsProvider,
    ScheduleProvider, Solution, SolveRequest, StopProvider, StopVisitLog, VehicleAvailability,
    VehicleProvider,
};
use headway_forecast::{DemandCache, ForecastTable};
use headway_scorer::CostFormula;
use headway_solver_anneal::{AnnealConfig, AnnealSolver};
use jiff::SignedDuration;
use jiff::civil::{Date, DateTime};
use log::{debug, info};

use crate::Partition;

/// Switches of a dispatch run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchOptions {
    /// Service day; the clock starts at the earliest shift start on it.
    pub date: Date,
    /// Also search over every partition stop as start point.
    pub optimise_start: bool,
    /// Seed of the first decision; later decisions add their iteration.
    pub seed: u64,
    /// Annealing calibration settings.
    pub anneal: AnnealConfig,
}

impl DispatchOptions {
    /// Options for `date` with a fixed start stop and default annealing.
    #[must_use]
    pub fn new(date: Date, seed: u64) -> Self {
        Self {
            date,
            optimise_start: false,
            seed,
            anneal: AnnealConfig::default(),
        }
    }
}

/// Read-only inputs shared by every orchestration task.
#[derive(Debug)]
pub struct DispatchContext<'c, Sch, P> {
    /// Demand forecast; each run only reads the service day's samples.
    pub forecast: &'c ForecastTable,
    /// Working schedule.
    pub schedule: &'c Sch,
    /// Cost weights.
    pub penalties: &'c P,
    /// Run switches.
    pub options: DispatchOptions,
}

impl<Sch, P> Clone for DispatchContext<'_, Sch, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Sch, P> Copy for DispatchContext<'_, Sch, P> {}

/// Externally visible state of an [`Orchestrator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    /// About to search for the next dispatch.
    Selecting,
    /// A dispatch was chosen and is about to be recorded.
    Committing,
    /// About to advance the clock and record visits.
    Advancing,
    /// Every vehicle has been dispatched.
    Done,
}

#[derive(Debug)]
enum Stage {
    Selecting,
    Committing(Solution),
    Advancing,
    Done,
}

/// Dispatches every available vehicle of a partition, one at a time.
///
/// Each decision sees the stop visits recorded by the previous ones, so the
/// loop is strictly sequential. The delay horizon is fixed up front as the
/// shift-start window divided by the number of available vehicles. Demand
/// is read from the service day's forecast only.
#[derive(Debug)]
pub struct Orchestrator<'c, S, V, Sch, P> {
    context: DispatchContext<'c, Sch, P>,
    partition: Partition<S, V>,
    forecast: ForecastTable,
    cache: DemandCache,
    clock: DateTime,
    time_max: SignedDuration,
    iteration: u64,
    stage: Stage,
    solutions: Vec<Solution>,
}

impl<'c, S, V, Sch, P> Orchestrator<'c, S, V, Sch, P>
where
    S: StopVisitLog,
    V: VehicleAvailability,
    Sch: ScheduleProvider,
    P: PenaltyProvider,
{
    /// Prepare a run over `partition`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyRoute`] for a partition without stops,
    /// [`ConfigError::EmptyFleet`] when no vehicle is available,
    /// [`ConfigError::StopWithoutForecast`] when a stop has no samples on
    /// the service day and [`ConfigError::SearchSpaceTooLarge`] for fleets
    /// beyond `i32::MAX`.
    pub fn new(
        partition: Partition<S, V>,
        context: DispatchContext<'c, Sch, P>,
    ) -> Result<Self, ConfigError> {
        if partition.stops.is_empty() {
            return Err(ConfigError::EmptyRoute {
                route: partition.route.clone(),
            });
        }
        let available = partition.available_count();
        if available == 0 {
            return Err(ConfigError::EmptyFleet {
                route: partition.route.clone(),
            });
        }
        let forecast = context.forecast.for_day(context.options.date);
        if let Some(uncovered) = partition
            .stops
            .iter()
            .find(|stop| !forecast.covers(stop.id()))
        {
            return Err(ConfigError::StopWithoutForecast {
                stop: uncovered.id().clone(),
            });
        }
        let window = context.schedule.shift_start();
        let divisor = i32::try_from(available).map_err(|_| ConfigError::SearchSpaceTooLarge)?;
        let time_max = window
            .span()
            .checked_div(divisor)
            .ok_or(ConfigError::SearchSpaceTooLarge)?;
        let clock = window.earliest_on(context.options.date);
        debug!(
            "route {} starts at {clock} with {available} vehicles and a {} min horizon",
            partition.route,
            time_max.as_mins()
        );
        Ok(Self {
            context,
            partition,
            forecast,
            cache: DemandCache::new(),
            clock,
            time_max,
            iteration: 0,
            stage: Stage::Selecting,
            solutions: Vec::new(),
        })
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> DispatchPhase {
        match self.stage {
            Stage::Selecting => DispatchPhase::Selecting,
            Stage::Committing(_) => DispatchPhase::Committing,
            Stage::Advancing => DispatchPhase::Advancing,
            Stage::Done => DispatchPhase::Done,
        }
    }

    /// Reference clock of the next decision.
    #[must_use]
    pub const fn clock(&self) -> DateTime {
        self.clock
    }

    /// Delay horizon of every decision.
    #[must_use]
    pub const fn time_max(&self) -> SignedDuration {
        self.time_max
    }

    /// Committed dispatches, in order.
    #[must_use]
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// The partition, with availability and visits as updated so far.
    #[must_use]
    pub const fn partition(&self) -> &Partition<S, V> {
        &self.partition
    }

    /// Perform one state transition and report the phase reached.
    ///
    /// A failed transition leaves the orchestrator [`DispatchPhase::Done`].
    ///
    /// # Errors
    ///
    /// Returns the solver's or the forecast's [`DispatchError`].
    pub fn step(&mut self) -> Result<DispatchPhase, DispatchError> {
        self.stage = match std::mem::replace(&mut self.stage, Stage::Done) {
            Stage::Selecting => Stage::Committing(self.select()?),
            Stage::Committing(solution) => {
                self.commit(solution)?;
                Stage::Advancing
            }
            Stage::Advancing => self.advance()?,
            Stage::Done => Stage::Done,
        };
        Ok(self.phase())
    }

    /// Step until every vehicle has been dispatched.
    ///
    /// # Errors
    ///
    /// Returns the first [`DispatchError`]; no partial results are kept.
    pub fn run(mut self) -> Result<Vec<Solution>, DispatchError> {
        while self.step()? != DispatchPhase::Done {}
        Ok(self.solutions)
    }

    fn select(&mut self) -> Result<Solution, DispatchError> {
        let available: Vec<&V> = self.partition.available().collect();
        let formula = CostFormula::new(
            &self.partition.stops,
            &self.forecast,
            self.context.penalties,
            &mut self.cache,
        )?;
        let request = SolveRequest {
            reference: self.clock,
            time_max: self.time_max,
            interval: self.context.schedule.interval(),
            start_stop: self.partition.start_stop.clone(),
            optimise_start: self.context.options.optimise_start,
            seed: self.context.options.seed.wrapping_add(self.iteration),
        };
        debug!(
            "iteration {} at {}: {} vehicles available",
            self.iteration,
            self.clock,
            available.len()
        );
        AnnealSolver::with_config(formula, self.context.options.anneal).solve(&available, &request)
    }

    fn commit(&mut self, solution: Solution) -> Result<(), ConfigError> {
        let unit = solution.vehicle.unit_number;
        let vehicle = self
            .partition
            .vehicles
            .iter_mut()
            .find(|vehicle| vehicle.unit_number() == unit)
            .ok_or(ConfigError::UnknownVehicle { unit })?;
        vehicle.set_available(false);
        self.cache.clear();
        info!(
            "route {}: unit {unit} leaves {} at {} (delay {} min, cost {:.3})",
            self.partition.route,
            solution.start_point,
            self.clock.saturating_add(solution.delay()),
            solution.delay_minutes,
            solution.cost
        );
        self.solutions.push(solution);
        self.iteration = self.iteration.saturating_add(1);
        Ok(())
    }

    fn advance(&mut self) -> Result<Stage, DispatchError> {
        let Some(solution) = self.solutions.last() else {
            return Ok(Stage::Done);
        };
        self.clock = self
            .clock
            .saturating_add(solution.delay())
            .saturating_add(self.context.schedule.interval());
        for visit in &solution.plan {
            let stop = self
                .partition
                .stops
                .iter_mut()
                .find(|stop| stop.id() == &visit.stop)
                .ok_or_else(|| ConfigError::UnknownStop {
                    id: visit.stop.clone(),
                })?;
            let sample = self
                .forecast
                .nearest_unused_sample(&visit.stop, visit.time, stop.visits())?;
            stop.record_visit(sample);
        }
        if self.partition.available_count() == 0 {
            Ok(Stage::Done)
        } else {
            Ok(Stage::Selecting)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headway_core::test_support::three_stop_params;
    use headway_core::{Params, PenaltyWeights, Schedule, StopId};
    use headway_forecast::test_support::{SERVICE_DAY, at, spike_forecast};
    use jiff::civil::date;
    use rstest::{fixture, rstest};

    use crate::route_partition;

    #[fixture]
    fn params() -> Params {
        three_stop_params()
    }

    fn options(seed: u64) -> DispatchOptions {
        let (year, month, day) = SERVICE_DAY;
        DispatchOptions::new(date(year, month, day), seed)
    }

    fn context<'c>(
        forecast: &'c ForecastTable,
        schedule: &'c Schedule,
        penalties: &'c PenaltyWeights,
    ) -> DispatchContext<'c, Schedule, PenaltyWeights> {
        DispatchContext {
            forecast,
            schedule,
            penalties,
            options: options(1),
        }
    }

    #[rstest]
    fn horizon_divides_the_shift_window(params: Params) {
        let Params {
            mut stops,
            routes,
            schedule,
            penalties,
            mut vehicles,
        } = params;
        let table = spike_forecast();
        let route = routes.first().expect("route");
        let partition = route_partition(&mut stops, &mut vehicles, route).expect("partition");
        let orchestrator = Orchestrator::new(partition, context(&table, &schedule, &penalties))
            .expect("orchestrator");
        assert_eq!(orchestrator.time_max(), SignedDuration::from_mins(30));
        assert_eq!(orchestrator.clock(), at(6, 0));
        assert_eq!(orchestrator.phase(), DispatchPhase::Selecting);
    }

    #[rstest]
    fn steps_walk_the_phases_in_order(params: Params) {
        let Params {
            mut stops,
            routes,
            schedule,
            penalties,
            mut vehicles,
        } = params;
        let table = spike_forecast();
        let route = routes.first().expect("route");
        let partition = route_partition(&mut stops, &mut vehicles, route).expect("partition");
        let mut orchestrator =
            Orchestrator::new(partition, context(&table, &schedule, &penalties))
                .expect("orchestrator");

        let phases: Vec<_> = (0..6)
            .map(|_| orchestrator.step().expect("step"))
            .collect();
        assert_eq!(
            phases,
            [
                DispatchPhase::Committing,
                DispatchPhase::Advancing,
                DispatchPhase::Selecting,
                DispatchPhase::Committing,
                DispatchPhase::Advancing,
                DispatchPhase::Done,
            ]
        );
        assert_eq!(orchestrator.solutions().len(), 2);
        assert_eq!(orchestrator.partition().available_count(), 0);
    }

    #[rstest]
    fn first_dispatch_serves_the_spike_and_records_visits(params: Params) {
        let Params {
            mut stops,
            routes,
            schedule,
            penalties,
            mut vehicles,
        } = params;
        let table = spike_forecast();
        let route = routes.first().expect("route");
        let partition = route_partition(&mut stops, &mut vehicles, route).expect("partition");
        let mut orchestrator =
            Orchestrator::new(partition, context(&table, &schedule, &penalties))
                .expect("orchestrator");
        for _ in 0..3 {
            orchestrator.step().expect("step");
        }

        let first = orchestrator.solutions().first().expect("first dispatch");
        assert_eq!(first.vehicle.unit_number(), 102);
        assert_eq!(orchestrator.clock(), at(6, 5));
        let centro = orchestrator
            .partition()
            .stops
            .iter()
            .find(|stop| stop.id() == &StopId::from(2))
            .expect("stop 2");
        assert_eq!(centro.visits(), [at(6, 10)]);
    }

    #[rstest]
    fn unavailable_vehicles_are_never_dispatched(params: Params) {
        let Params {
            mut stops,
            routes,
            schedule,
            penalties,
            mut vehicles,
        } = params;
        if let Some(large) = vehicles.iter_mut().find(|vehicle| vehicle.unit_number == 102) {
            large.set_available(false);
        }
        let table = spike_forecast();
        let route = routes.first().expect("route");
        let partition = route_partition(&mut stops, &mut vehicles, route).expect("partition");
        let solutions = Orchestrator::new(partition, context(&table, &schedule, &penalties))
            .expect("orchestrator")
            .run()
            .expect("run");
        let units: Vec<_> = solutions
            .iter()
            .map(|solution| solution.vehicle.unit_number())
            .collect();
        assert_eq!(units, [101]);
    }

    #[rstest]
    fn days_without_forecast_are_rejected(params: Params) {
        let Params {
            mut stops,
            routes,
            schedule,
            penalties,
            mut vehicles,
        } = params;
        let table = spike_forecast();
        let route = routes.first().expect("route");
        let partition = route_partition(&mut stops, &mut vehicles, route).expect("partition");
        let context = DispatchContext {
            options: DispatchOptions::new(date(2024, 3, 30), 1),
            ..context(&table, &schedule, &penalties)
        };
        let err = Orchestrator::new(partition, context)
            .map(|_| ())
            .expect_err("no forecast on that day");
        assert_eq!(
            err,
            ConfigError::StopWithoutForecast {
                stop: StopId::from(1)
            }
        );
    }

    #[rstest]
    fn fleets_without_available_vehicles_are_rejected(params: Params) {
        let Params {
            mut stops,
            routes,
            schedule,
            penalties,
            mut vehicles,
        } = params;
        for vehicle in &mut vehicles {
            vehicle.set_available(false);
        }
        let table = spike_forecast();
        let route = routes.first().expect("route");
        let partition = route_partition(&mut stops, &mut vehicles, route).expect("partition");
        let err = Orchestrator::new(partition, context(&table, &schedule, &penalties))
            .map(|_| ())
            .expect_err("empty fleet");
        assert_eq!(
            err,
            ConfigError::EmptyFleet {
                route: route.id.clone()
            }
        );
    }
}
