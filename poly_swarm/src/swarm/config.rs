use derive_more::Display;

use crate::{
    error::SwarmError,
    swarm::{objective::CostMetric, schedule::Schedule, update::RandomnessPolicy},
};

/// What `advance` does when the global best cost stops being finite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum NonFinitePolicy {
    /// Let NaN/inf costs flow through the run untouched.
    #[default]
    #[display("propagate")]
    Propagate,
    /// Return [`SwarmError::NonFiniteCost`] from `advance`.
    #[display("fail-fast")]
    FailFast,
}

/// Configuration for one swarm run.
#[derive(Clone, Debug, PartialEq)]
pub struct SwarmConfig {
    /// Coefficients per polynomial (degree + 1).
    pub n_coefficients: usize,
    /// Target coefficients are drawn from `Signed(coef_factor)`.
    pub coef_factor: f64,
    pub n_datapoints: usize,
    /// Sample `x` values are drawn from `Signed(x_scale)`.
    pub x_scale: f64,
    /// Additive noise on `y` is drawn from `Signed(noise_factor)`.
    pub noise_factor: f64,
    pub n_particles: usize,
    pub n_steps: usize,
    /// Initial particle coefficients are drawn from `Signed(coef_factor * particle_spread)`.
    pub particle_spread: f64,
    /// Number of `advance` calls that make up one step. Positions move by
    /// `velocity / substeps_per_step` on each of them.
    pub substeps_per_step: usize,
    pub schedule: Schedule,
    pub randomness: RandomnessPolicy,
    pub cost_metric: CostMetric,
    pub non_finite: NonFinitePolicy,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            n_coefficients: 3,
            coef_factor: 200.0,
            n_datapoints: 12,
            x_scale: 10.0,
            noise_factor: 350.0,
            n_particles: 10,
            n_steps: 100,
            particle_spread: 1.0,
            substeps_per_step: 1,
            schedule: Schedule::default(),
            randomness: RandomnessPolicy::default(),
            cost_metric: CostMetric::default(),
            non_finite: NonFinitePolicy::default(),
        }
    }
}

impl SwarmConfig {
    pub fn new(
        coef_factor: f64,
        n_datapoints: usize,
        x_scale: f64,
        noise_factor: f64,
        n_particles: usize,
        n_steps: usize,
    ) -> Self {
        Self {
            coef_factor,
            n_datapoints,
            x_scale,
            noise_factor,
            n_particles,
            n_steps,
            ..Default::default()
        }
    }

    /// The fixed-weight quadratic fit: unit inertia, 0.3 pulls, shared draws and
    /// plain sum-of-squares cost.
    pub fn classic(n_steps: usize) -> Self {
        Self {
            n_steps,
            schedule: Schedule::classic(),
            randomness: RandomnessPolicy::Shared,
            cost_metric: CostMetric::SumOfSquares,
            ..Default::default()
        }
    }

    pub fn with_coefficients(mut self, n_coefficients: usize) -> Self {
        self.n_coefficients = n_coefficients;
        self
    }

    pub fn with_particle_spread(mut self, particle_spread: f64) -> Self {
        self.particle_spread = particle_spread;
        self
    }

    pub fn with_substeps(mut self, substeps_per_step: usize) -> Self {
        self.substeps_per_step = substeps_per_step;
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_randomness(mut self, randomness: RandomnessPolicy) -> Self {
        self.randomness = randomness;
        self
    }

    pub fn with_cost_metric(mut self, cost_metric: CostMetric) -> Self {
        self.cost_metric = cost_metric;
        self
    }

    pub fn with_non_finite_policy(mut self, non_finite: NonFinitePolicy) -> Self {
        self.non_finite = non_finite;
        self
    }

    pub fn validate(&self) -> Result<(), SwarmError> {
        let counts = [
            ("n_coefficients", self.n_coefficients),
            ("n_particles", self.n_particles),
            ("n_steps", self.n_steps),
            ("substeps_per_step", self.substeps_per_step),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(SwarmError::invalid(field, "must be at least 1"));
            }
        }

        let scales = [
            ("coef_factor", self.coef_factor),
            ("x_scale", self.x_scale),
            ("noise_factor", self.noise_factor),
            ("particle_spread", self.particle_spread),
        ];
        for (field, value) in scales {
            if !value.is_finite() || value < 0.0 {
                return Err(SwarmError::invalid(
                    field,
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }

        if !self.schedule.is_finite() {
            return Err(SwarmError::invalid(
                "schedule",
                format!("ramp endpoints must be finite, got {:?}", self.schedule),
            ));
        }
        Ok(())
    }
}
