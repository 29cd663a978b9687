use rand::rngs::StdRng;

use crate::{
    dataset::Dataset,
    error::SwarmError,
    polynomial::Polynomial,
    random::{RandomSource, RngSource},
};

use self::{
    config::{NonFinitePolicy, SwarmConfig},
    objective::FitObjective,
    observer::{StepStatus, SwarmObserver},
    particle::{Best, BestSoFar, Particle},
    schedule::Weights,
};

pub mod config;
pub mod objective;
pub mod observer;
pub mod particle;
pub mod schedule;
pub mod update;

#[cfg(test)]
mod tests;

/// A particle swarm fitting a polynomial to a noisy sample of a hidden target.
///
/// The swarm is advanced one step (or one substep) at a time by an external
/// driver. Once `step` reaches `n_steps` further advances do nothing.
///
/// Type parameters:
/// - `S`: the random source every draw goes through. Defaults to an OS-seeded
///   `StdRng`; inject a seeded or replaying source for reproducible runs.
pub struct Swarm<S: RandomSource = RngSource<StdRng>> {
    config: SwarmConfig,
    /// The polynomial the dataset was sampled from. Never seen by the particles.
    target: Polynomial,
    dataset: Dataset,
    particles: Vec<Particle>,
    global_best: BestSoFar,
    r_squared: Option<f64>,
    step: usize,
    substep: usize,
    rng: S,
    observers: Vec<Box<dyn SwarmObserver>>,
}

impl Swarm<RngSource<StdRng>> {
    /// Builds a run from an OS-seeded generator.
    pub fn new(config: SwarmConfig) -> Result<Self, SwarmError> {
        Self::with_source(config, RngSource::from_os_rng())
    }

    pub fn seeded(config: SwarmConfig, seed: u64) -> Result<Self, SwarmError> {
        Self::with_source(config, RngSource::seeded(seed))
    }
}

impl<S: RandomSource> Swarm<S> {
    /// Draws the target, then the dataset, then every particle from `rng`.
    pub fn with_source(config: SwarmConfig, mut rng: S) -> Result<Self, SwarmError> {
        config.validate()?;
        let (target, dataset, particles) = initial_state(&config, &mut rng);
        Ok(Swarm {
            config,
            target,
            dataset,
            particles,
            global_best: BestSoFar::NotYetEvaluated,
            r_squared: None,
            step: 0,
            substep: 0,
            rng,
            observers: Vec::new(),
        })
    }

    /// Builds a run around an explicit target, dataset and particle set.
    ///
    /// `n_datapoints` and `n_particles` in `config` are overwritten to match.
    pub fn from_parts(
        mut config: SwarmConfig,
        target: Polynomial,
        dataset: Dataset,
        particles: Vec<Particle>,
        rng: S,
    ) -> Result<Self, SwarmError> {
        config.n_datapoints = dataset.len();
        config.n_particles = particles.len();
        config.validate()?;

        if target.len() != config.n_coefficients {
            return Err(SwarmError::invalid(
                "target",
                format!(
                    "has {} coefficients, expected {}",
                    target.len(),
                    config.n_coefficients
                ),
            ));
        }
        if let Some(i) = particles.iter().position(|p| {
            p.position.len() != config.n_coefficients || p.velocity.len() != config.n_coefficients
        }) {
            return Err(SwarmError::invalid(
                "particles",
                format!(
                    "particle {i} does not have {} coefficients",
                    config.n_coefficients
                ),
            ));
        }

        Ok(Swarm {
            config,
            target,
            dataset,
            particles,
            global_best: BestSoFar::NotYetEvaluated,
            r_squared: None,
            step: 0,
            substep: 0,
            rng,
            observers: Vec::new(),
        })
    }

    pub fn with_observer(mut self, observer: impl SwarmObserver + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    pub fn add_observer(&mut self, observer: impl SwarmObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Throws away the current run and draws a fresh one from the same config.
    /// Observers stay registered.
    pub fn restart(&mut self) {
        let (target, dataset, particles) = initial_state(&self.config, &mut self.rng);
        self.target = target;
        self.dataset = dataset;
        self.particles = particles;
        self.global_best = BestSoFar::NotYetEvaluated;
        self.r_squared = None;
        self.step = 0;
        self.substep = 0;
    }

    /// Performs one state transition and returns whether the run is done.
    ///
    /// At the start of every step this evaluates all particles, refreshes the
    /// personal and global bests and recomputes velocities. Every call then moves
    /// particles by `velocity / substeps_per_step` and advances the counters.
    pub fn advance(&mut self) -> Result<bool, SwarmError> {
        if self.is_done() {
            return Ok(true);
        }

        if self.substep == 0 {
            self.evaluate()?;

            let weights = self.current_weights();
            if let Some(global_best) = self.global_best.position() {
                update::update_velocities(
                    &mut self.particles,
                    global_best,
                    &weights,
                    self.config.randomness,
                    &mut self.rng,
                );
            }
        }

        update::apply_velocities(&mut self.particles, self.config.substeps_per_step);

        self.substep = (self.substep + 1) % self.config.substeps_per_step;
        if self.substep == 0 {
            self.step += 1;
        }

        Ok(self.is_done())
    }

    /// Advances until done.
    pub fn run_to_completion(&mut self) -> Result<RunSummary, SwarmError> {
        while !self.advance()? {}
        Ok(self.summary())
    }

    fn evaluate(&mut self) -> Result<(), SwarmError> {
        let objective = FitObjective::new(
            &self.dataset,
            self.config.cost_metric,
            self.config.n_coefficients,
        );

        for particle in self.particles.iter_mut() {
            particle.update_lbest(&objective)?;
            if let BestSoFar::Evaluated(best) = particle.personal_best() {
                self.global_best.offer(&best.position, best.cost);
            }
        }

        self.r_squared = self.global_best.cost().and_then(|cost| {
            self.config
                .cost_metric
                .r_squared(cost, self.dataset.baseline_error())
        });

        if let (NonFinitePolicy::FailFast, Some(cost)) =
            (self.config.non_finite, self.global_best.cost())
        {
            if !cost.is_finite() {
                return Err(SwarmError::NonFiniteCost {
                    step: self.step,
                    cost,
                });
            }
        }

        let status = self.status();
        for observer in self.observers.iter_mut() {
            observer.observe_step(&status);
        }
        Ok(())
    }

    pub fn is_done(&self) -> bool {
        self.step >= self.config.n_steps
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn substep(&self) -> usize {
        self.substep
    }

    pub fn n_steps(&self) -> usize {
        self.config.n_steps
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn target(&self) -> &Polynomial {
        &self.target
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn global_best(&self) -> Option<&Polynomial> {
        self.global_best.position()
    }

    pub fn global_best_cost(&self) -> Option<f64> {
        self.global_best.cost()
    }

    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }

    pub fn random_source(&self) -> &S {
        &self.rng
    }

    /// Schedule weights for the current step.
    pub fn current_weights(&self) -> Weights {
        self.config.schedule.at(self.step, self.config.n_steps)
    }

    pub fn status(&self) -> StepStatus {
        StepStatus {
            step: self.step,
            substep: self.substep,
            global_best_cost: self.global_best.cost(),
            r_squared: self.r_squared,
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            steps: self.step,
            n_steps: self.config.n_steps,
            done: self.is_done(),
            target: self.target.clone(),
            best: self.global_best.as_best().cloned(),
            r_squared: self.r_squared,
        }
    }

    pub fn print_status(&self) {
        let cost = self
            .global_best
            .cost()
            .map_or_else(|| "-".to_string(), |c| format!("{c:.6e}"));
        let r_squared = self
            .r_squared
            .map_or_else(|| "-".to_string(), |r| format!("{r:.4}"));
        println!(
            "Step #{} (substep {}/{}): best cost {}, R² {}",
            self.step, self.substep, self.config.substeps_per_step, cost, r_squared
        );
    }

    pub fn print_summary(&self) {
        println!("------- swarm run ({} / {} steps) -------", self.step, self.config.n_steps);
        println!("  random source: {}", tynm::type_name::<S>());
        println!(
            "  particles: {}, coefficients: {}, datapoints: {}",
            self.particles.len(),
            self.config.n_coefficients,
            self.dataset.len()
        );
        println!(
            "  cost metric: {}, randomness: {}, non-finite costs: {}",
            self.config.cost_metric, self.config.randomness, self.config.non_finite
        );
        println!("Target:      {}", self.target);
        match self.global_best.as_best() {
            Some(best) => {
                println!("Global best: {}", best.position);
                println!("Best cost: {:.6e}", best.cost);
            }
            None => println!("Global best: not yet evaluated"),
        }
        if let Some(r_squared) = self.r_squared {
            println!("R²: {r_squared:.6}");
        }
    }
}

/// Snapshot of a run for reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub n_steps: usize,
    pub done: bool,
    pub target: Polynomial,
    pub best: Option<Best>,
    pub r_squared: Option<f64>,
}

fn initial_state<S: RandomSource + ?Sized>(
    config: &SwarmConfig,
    rng: &mut S,
) -> (Polynomial, Dataset, Vec<Particle>) {
    let target = Polynomial::random(config.n_coefficients, config.coef_factor, rng);
    let dataset = Dataset::generate(
        &target,
        config.n_datapoints,
        config.x_scale,
        config.noise_factor,
        rng,
    );
    let spread = config.coef_factor * config.particle_spread;
    let particles = (0..config.n_particles)
        .map(|_| Particle::random(config.n_coefficients, spread, rng))
        .collect();
    (target, dataset, particles)
}
