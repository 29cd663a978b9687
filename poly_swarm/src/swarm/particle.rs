use argmin::core::{CostFunction, Error as ArgminError};

use crate::{polynomial::Polynomial, random::RandomSource};

/// A position together with the cost it was evaluated at.
#[derive(Clone, Debug, PartialEq)]
pub struct Best {
    pub position: Polynomial,
    pub cost: f64,
}

/// Best result seen so far, by a particle or by the whole swarm.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum BestSoFar {
    #[default]
    NotYetEvaluated,
    Evaluated(Best),
}

impl BestSoFar {
    pub fn cost(&self) -> Option<f64> {
        match self {
            BestSoFar::NotYetEvaluated => None,
            BestSoFar::Evaluated(best) => Some(best.cost),
        }
    }

    pub fn position(&self) -> Option<&Polynomial> {
        match self {
            BestSoFar::NotYetEvaluated => None,
            BestSoFar::Evaluated(best) => Some(&best.position),
        }
    }

    pub fn as_best(&self) -> Option<&Best> {
        match self {
            BestSoFar::NotYetEvaluated => None,
            BestSoFar::Evaluated(best) => Some(best),
        }
    }

    /// True when `cost` would replace the current best. Ties never replace.
    pub fn is_improved_by(&self, cost: f64) -> bool {
        match self {
            BestSoFar::NotYetEvaluated => true,
            BestSoFar::Evaluated(best) => cost < best.cost,
        }
    }

    /// Replaces the best with a copy of `position` if `cost` is strictly lower.
    /// Returns whether it was replaced.
    pub fn offer(&mut self, position: &Polynomial, cost: f64) -> bool {
        if !self.is_improved_by(cost) {
            return false;
        }
        *self = BestSoFar::Evaluated(Best {
            position: position.clone(),
            cost,
        });
        true
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Polynomial,
    pub velocity: Polynomial,
    best: BestSoFar,
}

impl Particle {
    /// A particle at `position` with zero velocity and no personal best.
    pub fn new(position: Polynomial) -> Self {
        let velocity = Polynomial::zeros(position.len());
        Self {
            position,
            velocity,
            best: BestSoFar::NotYetEvaluated,
        }
    }

    pub fn random<S: RandomSource + ?Sized>(n_coefficients: usize, factor: f64, rng: &mut S) -> Self {
        Self::new(Polynomial::random(n_coefficients, factor, rng))
    }

    pub fn personal_best(&self) -> &BestSoFar {
        &self.best
    }

    /// Evaluates the current position and keeps it as the personal best if it
    /// beats the stored one. Returns whether the personal best changed.
    pub fn update_lbest<C>(&mut self, objective: &C) -> Result<bool, ArgminError>
    where
        C: CostFunction<Param = Polynomial, Output = f64>,
    {
        let cost = objective.cost(&self.position)?;
        Ok(self.best.offer(&self.position, cost))
    }
}
