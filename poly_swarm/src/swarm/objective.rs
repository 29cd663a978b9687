use anyhow::bail;
use argmin::core::{CostFunction, Error as ArgminError};
use derive_more::Display;

use crate::{dataset::Dataset, polynomial::Polynomial};

/// How residuals against the dataset are folded into a single cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum CostMetric {
    /// `sqrt(Σ r²)`
    #[default]
    #[display("root-sum-of-squares")]
    RootSumOfSquares,
    /// `Σ r²`
    #[display("sum-of-squares")]
    SumOfSquares,
}

impl CostMetric {
    pub fn from_sum_of_squares(self, sse: f64) -> f64 {
        match self {
            CostMetric::RootSumOfSquares => sse.sqrt(),
            CostMetric::SumOfSquares => sse,
        }
    }

    /// Recovers the sum of squared residuals from a cost produced by this metric.
    pub fn sum_of_squares(self, cost: f64) -> f64 {
        match self {
            CostMetric::RootSumOfSquares => cost * cost,
            CostMetric::SumOfSquares => cost,
        }
    }

    /// `1 - SSE / baseline`, or `None` when the baseline is zero.
    pub fn r_squared(self, cost: f64, baseline_error: f64) -> Option<f64> {
        if baseline_error == 0.0 {
            return None;
        }
        Some(1.0 - self.sum_of_squares(cost) / baseline_error)
    }
}

/// Fitness of candidate polynomials against a dataset.
#[derive(Clone, Copy, Debug)]
pub struct FitObjective<'a> {
    dataset: &'a Dataset,
    metric: CostMetric,
    n_coefficients: usize,
}

impl<'a> FitObjective<'a> {
    pub fn new(dataset: &'a Dataset, metric: CostMetric, n_coefficients: usize) -> Self {
        Self {
            dataset,
            metric,
            n_coefficients,
        }
    }

    pub fn metric(&self) -> CostMetric {
        self.metric
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }
}

impl CostFunction for FitObjective<'_> {
    type Param = Polynomial;
    type Output = f64;

    fn cost(&self, p: &Self::Param) -> Result<Self::Output, ArgminError> {
        if p.len() != self.n_coefficients {
            bail!(
                "Polynomial coefficient count ({}) did not match the run's coefficient count ({})",
                p.len(),
                self.n_coefficients
            );
        }
        Ok(self
            .metric
            .from_sum_of_squares(self.dataset.sum_of_squares(p)))
    }
}
