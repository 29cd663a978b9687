use std::fmt;

use derive_more::{Deref, From};
use nalgebra::DVector;

use crate::random::RandomSource;

/// A polynomial stored highest-degree coefficient first.
///
/// `[c0, c1, ..., c_{n-1}]` represents `c0·x^{n-1} + c1·x^{n-2} + ... + c_{n-1}`.
/// The coefficient count is fixed for a run; particles also use this type for
/// their velocity, where it is only ever treated as a displacement vector.
#[derive(Clone, Debug, PartialEq, From, Deref)]
pub struct Polynomial {
    coefficients: DVector<f64>,
}

impl Polynomial {
    pub fn new(coefficients: impl Into<Vec<f64>>) -> Self {
        Self {
            coefficients: DVector::from_vec(coefficients.into()),
        }
    }

    pub fn zeros(n_coefficients: usize) -> Self {
        Self {
            coefficients: DVector::zeros(n_coefficients),
        }
    }

    /// Draws every coefficient independently from `Signed(factor)`.
    pub fn random<S: RandomSource + ?Sized>(n_coefficients: usize, factor: f64, rng: &mut S) -> Self {
        Self {
            coefficients: DVector::from_fn(n_coefficients, |_, _| rng.signed(factor)),
        }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn coefficients(&self) -> &DVector<f64> {
        &self.coefficients
    }

    pub fn coefficients_mut(&mut self) -> &mut DVector<f64> {
        &mut self.coefficients
    }

    pub fn value_at(&self, x: f64) -> f64 {
        let degree = self.degree() as i32;
        self.coefficients
            .iter()
            .enumerate()
            .map(|(i, c)| c * x.powi(degree - i as i32))
            .sum()
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        let degree = self.degree();

        if self.coefficients.is_empty() {
            return write!(f, "{:.*}", precision, 0.0);
        }

        for (i, &c) in self.coefficients.iter().enumerate() {
            let power = degree - i;
            if i == 0 {
                if c < 0.0 {
                    write!(f, "-")?;
                }
            } else if c < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            write!(f, "{:.*}", precision, c.abs())?;
            match power {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{power}")?,
            }
        }
        Ok(())
    }
}
