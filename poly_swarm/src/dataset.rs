use crate::{polynomial::Polynomial, random::RandomSource};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Sampled points the swarm is fitted against. Fixed once built.
#[derive(Clone, Debug)]
pub struct Dataset {
    points: Vec<Point>,
    /// Sum of squared residuals of `y` around its mean, the denominator of R².
    baseline_error: f64,
}

impl Dataset {
    /// Samples `n_points` points from `target` with `x ~ Signed(x_scale)` and
    /// additive noise `~ Signed(noise_factor)`. Each point draws `x` then its noise.
    pub fn generate<S: RandomSource + ?Sized>(
        target: &Polynomial,
        n_points: usize,
        x_scale: f64,
        noise_factor: f64,
        rng: &mut S,
    ) -> Self {
        let points = (0..n_points)
            .map(|_| {
                let x = rng.signed(x_scale);
                let noise = rng.signed(noise_factor);
                Point::new(x, target.value_at(x) + noise)
            })
            .collect();
        Self::from_points(points)
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        let baseline_error = baseline_error(&points);
        Self {
            points,
            baseline_error,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn baseline_error(&self) -> f64 {
        self.baseline_error
    }

    pub fn mean_y(&self) -> f64 {
        mean_y(&self.points)
    }

    /// Sum of squared residuals of `poly` against every point.
    pub fn sum_of_squares(&self, poly: &Polynomial) -> f64 {
        self.points
            .iter()
            .map(|p| {
                let r = poly.value_at(p.x) - p.y;
                r * r
            })
            .sum()
    }
}

fn mean_y(points: &[Point]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.y).sum::<f64>() / points.len() as f64
}

fn baseline_error(points: &[Point]) -> f64 {
    let mean = mean_y(points);
    points
        .iter()
        .map(|p| {
            let d = p.y - mean;
            d * d
        })
        .sum()
}
