use derive_more::Display;
use nalgebra::DVector;

use crate::{
    polynomial::Polynomial,
    random::RandomSource,
    swarm::{particle::Particle, schedule::Weights},
};

/// How the `r1, r2` factors of the velocity update are drawn each step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum RandomnessPolicy {
    /// One `r1, r2` pair per coefficient, shared by every particle.
    #[display("shared")]
    Shared,
    /// A fresh `r1, r2` pair for every particle and coefficient.
    #[default]
    #[display("per-particle")]
    PerParticle,
}

/// `w·v + c1·r1·(lbest − x) + c2·r2·(gbest − x)` for a single coefficient.
#[inline]
pub fn next_velocity(
    weights: &Weights,
    r1: f64,
    r2: f64,
    velocity: f64,
    position: f64,
    local_best: f64,
    global_best: f64,
) -> f64 {
    weights.inertia * velocity
        + weights.local * r1 * (local_best - position)
        + weights.global * r2 * (global_best - position)
}

/// Recomputes every particle's velocity.
///
/// Draw order: `Shared` takes `r1, r2` per coefficient up front; `PerParticle`
/// walks particles in order and takes `r1, r2` per coefficient.
pub fn update_velocities<S: RandomSource + ?Sized>(
    particles: &mut [Particle],
    global_best: &Polynomial,
    weights: &Weights,
    policy: RandomnessPolicy,
    rng: &mut S,
) {
    let n = global_best.len();
    let shared: Vec<(f64, f64)> = match policy {
        RandomnessPolicy::Shared => (0..n).map(|_| (rng.next_unit(), rng.next_unit())).collect(),
        RandomnessPolicy::PerParticle => Vec::new(),
    };

    for particle in particles.iter_mut() {
        let new_velocity = {
            // a particle that was never evaluated is not pulled toward itself
            let local_best = particle
                .personal_best()
                .position()
                .unwrap_or(&particle.position);
            DVector::from_fn(n, |i, _| {
                let (r1, r2) = match policy {
                    RandomnessPolicy::Shared => shared[i],
                    RandomnessPolicy::PerParticle => (rng.next_unit(), rng.next_unit()),
                };
                next_velocity(
                    weights,
                    r1,
                    r2,
                    particle.velocity[i],
                    particle.position[i],
                    local_best[i],
                    global_best[i],
                )
            })
        };
        *particle.velocity.coefficients_mut() = new_velocity;
    }
}

/// Moves every particle by `velocity / substeps`.
pub fn apply_velocities(particles: &mut [Particle], substeps: usize) {
    let fraction = 1.0 / substeps as f64;
    for particle in particles.iter_mut() {
        particle
            .position
            .coefficients_mut()
            .axpy(fraction, particle.velocity.coefficients(), 1.0);
    }
}
