/// A value linearly interpolated from `start` (step 0) to `end` (step `n_steps`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ramp {
    pub start: f64,
    pub end: f64,
}

impl Ramp {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn at(&self, step: usize, n_steps: usize) -> f64 {
        if n_steps == 0 {
            return self.start;
        }
        let t = step as f64 / n_steps as f64;
        self.start + (self.end - self.start) * t
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

/// Weights for one velocity update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    /// Fraction of the previous velocity retained.
    pub inertia: f64,
    /// Pull toward the particle's own best.
    pub local: f64,
    /// Pull toward the swarm's best.
    pub global: f64,
}

/// Step-indexed inertia and acceleration weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Schedule {
    pub inertia: Ramp,
    pub local: Ramp,
    pub global: Ramp,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            inertia: Ramp::new(0.8, 0.4),
            // explore around personal bests early, converge on the global best late
            local: Ramp::new(1.5, 0.5),
            global: Ramp::new(0.5, 1.5),
        }
    }
}

impl Schedule {
    pub fn constant(inertia: f64, local: f64, global: f64) -> Self {
        Self {
            inertia: Ramp::constant(inertia),
            local: Ramp::constant(local),
            global: Ramp::constant(global),
        }
    }

    /// Unit inertia with fixed 0.3 pulls: the velocity accumulates every step.
    pub fn classic() -> Self {
        Self::constant(1.0, 0.3, 0.3)
    }

    pub fn at(&self, step: usize, n_steps: usize) -> Weights {
        Weights {
            inertia: self.inertia.at(step, n_steps),
            local: self.local.at(step, n_steps),
            global: self.global.at(step, n_steps),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.inertia.is_finite() && self.local.is_finite() && self.global.is_finite()
    }
}
