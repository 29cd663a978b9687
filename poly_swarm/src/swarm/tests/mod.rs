mod advance;

use crate::prelude::*;

/// Target `2x²` sampled without noise at x = 0, 1, 2.
pub(super) fn quadratic_points() -> Dataset {
    Dataset::from_points(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 2.0),
        Point::new(2.0, 8.0),
    ])
}

pub(super) fn positions<S: RandomSource>(swarm: &Swarm<S>) -> Vec<Polynomial> {
    swarm.particles().iter().map(|p| p.position.clone()).collect()
}

pub(super) fn lbest_costs<S: RandomSource>(swarm: &Swarm<S>) -> Vec<Option<f64>> {
    swarm
        .particles()
        .iter()
        .map(|p| p.personal_best().cost())
        .collect()
}
