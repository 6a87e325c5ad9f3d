//! Generic simulated annealing with automatic temperature calibration.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A search problem the [`Annealer`] can walk.
///
/// States are produced by the problem itself, so the move rule may be a
/// deterministic enumeration as well as a random jump.
pub trait AnnealProblem {
    /// Search state.
    type State: Clone;
    /// Failure raised while evaluating a state.
    type Error;

    /// Rewind the move rule and return its first state.
    fn initial(&mut self) -> Self::State;

    /// Advance the move rule and return the new state.
    fn next_state(&mut self) -> Self::State;

    /// Energy of `state`; lower is better.
    ///
    /// # Errors
    ///
    /// Propagated unchanged by the annealer.
    fn energy(&mut self, state: &Self::State) -> Result<f64, Self::Error>;
}

/// Tuning knobs of the calibration runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealConfig {
    /// Acceptance ratio that defines the maximum temperature.
    pub target_acceptance: f64,
    /// Factor applied to the temperature between calibration runs.
    pub cooling_factor: f64,
    /// Upper bound on calibration runs per search phase.
    pub max_calibration_rounds: u32,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            target_acceptance: 0.98,
            cooling_factor: 1.5,
            max_calibration_rounds: 32,
        }
    }
}

/// Exponential cooling schedule between two temperatures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperatures {
    max: f64,
    min: f64,
}

impl Temperatures {
    /// Schedule cooling from `max` to `min`.
    ///
    /// Non-positive or non-finite bounds collapse to a constant schedule.
    #[must_use]
    pub fn new(max: f64, min: f64) -> Self {
        let hottest = if max.is_finite() && max > 0.0 { max } else { 1.0 };
        let coldest = if min.is_finite() && min > 0.0 {
            min.min(hottest)
        } else {
            hottest
        };
        Self {
            max: hottest,
            min: coldest,
        }
    }

    /// Starting temperature.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Final temperature.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Temperature after `step` of `steps`:
    /// `max * exp(-ln(max / min) * step / steps)`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "cooling is exponential")]
    pub fn at(&self, step: u32, steps: u32) -> f64 {
        if steps == 0 {
            return self.max;
        }
        let progress = f64::from(step) / f64::from(steps);
        self.max * (-(self.max / self.min).ln() * progress).exp()
    }
}

/// Result of an annealing run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealOutcome<S> {
    /// Lowest-energy state observed.
    pub state: S,
    /// Its energy.
    pub energy: f64,
    /// Schedule the run cooled along.
    pub temperatures: Temperatures,
    /// Energy evaluations spent, calibration included.
    pub evaluations: u64,
}

#[derive(Debug, Clone, Copy)]
struct Trial {
    acceptance: f64,
    improvement: f64,
}

/// Metropolis walker with a seeded random source.
///
/// Two annealers built from the same seed and fed the same problem make the
/// same decisions.
#[derive(Debug, Clone)]
pub struct Annealer {
    rng: ChaCha8Rng,
    config: AnnealConfig,
    evaluations: u64,
}

impl Annealer {
    /// Create an annealer with default calibration settings.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, AnnealConfig::default())
    }

    /// Create an annealer with explicit calibration settings.
    #[must_use]
    pub fn with_config(seed: u64, config: AnnealConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            evaluations: 0,
        }
    }

    /// Calibrate a schedule, then anneal for `steps` moves.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`AnnealProblem::energy`].
    pub fn run<P: AnnealProblem>(
        &mut self,
        problem: &mut P,
        steps: u32,
    ) -> Result<AnnealOutcome<P::State>, P::Error> {
        let temperatures = self.calibrate(problem, steps)?;
        self.anneal(problem, temperatures, steps)
    }

    /// Find a schedule whose hot end accepts nearly every move and whose
    /// cold end no longer improves, using `steps` moves per trial run.
    ///
    /// A landscape where no move changes the energy gets a constant
    /// schedule of `1.0`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`AnnealProblem::energy`].
    pub fn calibrate<P: AnnealProblem>(
        &mut self,
        problem: &mut P,
        steps: u32,
    ) -> Result<Temperatures, P::Error> {
        let initial = problem.initial();
        let reference = self.evaluate(problem, &initial)?;
        let mut current = reference;
        let mut temperature = None;
        for _ in 0..steps {
            let state = problem.next_state();
            current = self.evaluate(problem, &state)?;
            let spread = energy_spread(current, reference);
            if spread > 0.0 {
                temperature = Some(spread);
                break;
            }
        }
        let Some(guess) = temperature else {
            debug!("flat energy landscape, using a constant schedule");
            return Ok(Temperatures::new(1.0, 1.0));
        };

        let target = self.config.target_acceptance;
        let cool = self.config.cooling_factor.recip();
        let heat = self.config.cooling_factor;

        let first = self.trial(problem, &mut current, guess, steps)?;
        let (hotter, cooled) = self.adjust(
            problem,
            &mut current,
            (guess, first),
            cool,
            steps,
            |probe| probe.acceptance > target,
        )?;
        let (hottest, heated) = self.adjust(
            problem,
            &mut current,
            (hotter, cooled),
            heat,
            steps,
            |probe| probe.acceptance < target,
        )?;
        let (coldest, _) = self.adjust(
            problem,
            &mut current,
            (hottest, heated),
            cool,
            steps,
            |probe| probe.improvement > 0.0,
        )?;

        let temperatures = Temperatures::new(hottest, coldest);
        debug!(
            "calibrated schedule {:.4} -> {:.4}",
            temperatures.max(),
            temperatures.min()
        );
        Ok(temperatures)
    }

    /// Anneal along `temperatures` for `steps` moves after the initial
    /// state, tracking the lowest energy seen.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`AnnealProblem::energy`].
    pub fn anneal<P: AnnealProblem>(
        &mut self,
        problem: &mut P,
        temperatures: Temperatures,
        steps: u32,
    ) -> Result<AnnealOutcome<P::State>, P::Error> {
        let initial = problem.initial();
        let mut current = self.evaluate(problem, &initial)?;
        let mut best = (initial, current);

        for step in 1..=steps {
            let temperature = temperatures.at(step, steps);
            let state = problem.next_state();
            let energy = self.evaluate(problem, &state)?;
            if self.accepts(energy_delta(energy, current), temperature) {
                current = energy;
                if energy < best.1 {
                    best = (state, energy);
                }
            }
        }

        let (state, energy) = best;
        Ok(AnnealOutcome {
            state,
            energy,
            temperatures,
            evaluations: self.evaluations,
        })
    }

    fn adjust<P: AnnealProblem>(
        &mut self,
        problem: &mut P,
        current: &mut f64,
        (start, first): (f64, Trial),
        factor: f64,
        steps: u32,
        keep_going: impl Fn(&Trial) -> bool,
    ) -> Result<(f64, Trial), P::Error> {
        let mut temperature = start;
        let mut trial = first;
        let mut rounds = 0;
        while keep_going(&trial) && rounds < self.config.max_calibration_rounds {
            temperature = round_figures(scale(temperature, factor), 2);
            trial = self.trial(problem, current, temperature, steps)?;
            rounds += 1;
        }
        Ok((temperature, trial))
    }

    fn trial<P: AnnealProblem>(
        &mut self,
        problem: &mut P,
        current: &mut f64,
        temperature: f64,
        steps: u32,
    ) -> Result<Trial, P::Error> {
        let mut accepted = 0_u32;
        let mut improved = 0_u32;
        for _ in 0..steps {
            let state = problem.next_state();
            let energy = self.evaluate(problem, &state)?;
            let delta = energy_delta(energy, *current);
            if self.accepts(delta, temperature) {
                accepted += 1;
                if delta < 0.0 {
                    improved += 1;
                }
                *current = energy;
            }
        }
        Ok(Trial {
            acceptance: ratio(accepted, steps),
            improvement: ratio(improved, steps),
        })
    }

    fn evaluate<P: AnnealProblem>(
        &mut self,
        problem: &mut P,
        state: &P::State,
    ) -> Result<f64, P::Error> {
        self.evaluations = self.evaluations.saturating_add(1);
        problem.energy(state)
    }

    #[expect(clippy::float_arithmetic, reason = "Metropolis acceptance")]
    fn accepts(&mut self, delta: f64, temperature: f64) -> bool {
        if delta <= 0.0 {
            return true;
        }
        let threshold = (-delta / temperature).exp();
        threshold >= self.rng.gen_range(0.0..1.0)
    }
}

#[expect(clippy::float_arithmetic, reason = "energy differences")]
fn energy_delta(energy: f64, current: f64) -> f64 {
    energy - current
}

#[expect(clippy::float_arithmetic, reason = "energy differences")]
fn energy_spread(energy: f64, reference: f64) -> f64 {
    (energy - reference).abs()
}

#[expect(clippy::float_arithmetic, reason = "temperature scaling")]
fn scale(temperature: f64, factor: f64) -> f64 {
    temperature * factor
}

#[expect(clippy::float_arithmetic, reason = "acceptance ratios")]
fn ratio(count: u32, steps: u32) -> f64 {
    if steps == 0 {
        return 0.0;
    }
    f64::from(count) / f64::from(steps)
}

/// Round `value` to `figures` significant figures.
#[expect(
    clippy::float_arithmetic,
    reason = "significant-figure rounding works on logarithms"
)]
#[expect(
    clippy::cast_possible_truncation,
    reason = "decimal exponents of finite f64 values fit in i32"
)]
fn round_figures(value: f64, figures: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().ceil() as i32;
    let factor = 10_f64.powi(figures.saturating_sub(magnitude));
    (value * factor).round() / factor
}
