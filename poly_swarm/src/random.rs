use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_core::RngCore;

/// Source of the uniform draws the swarm consumes.
///
/// Every random number the engine uses goes through `next_unit`, so injecting a
/// deterministic implementor makes whole runs reproducible.
pub trait RandomSource {
    /// A uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// A uniform draw in `[0, factor)`.
    fn uniform(&mut self, factor: f64) -> f64 {
        self.next_unit() * factor
    }

    /// A uniform draw in `(-factor, factor)`.
    fn signed(&mut self, factor: f64) -> f64 {
        self.uniform(2.0 * factor) - factor
    }
}

/// Adapts any `rand` generator into a [`RandomSource`].
#[derive(Clone, Debug)]
pub struct RngSource<R: RngCore> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed sequence of unit draws, wrapping around at the end.
///
/// An empty sequence always yields `0.0`.
#[derive(Clone, Debug, Default)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Total number of draws taken so far (not wrapped).
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
