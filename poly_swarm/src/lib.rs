#[cfg(test)]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr) => {
        assert_approx_eq!($a, $b, 1e-12)
    };
    ($a:expr, $b:expr, $tol:expr) => {{
        let (a, b): (f64, f64) = ($a, $b);
        assert!((a - b).abs() <= $tol, "{} != {} (tol {})", a, b, $tol);
    }};
}

pub mod dataset;
pub mod error;
pub mod polynomial;
pub mod random;
pub mod swarm;

pub mod prelude {
    pub use crate::{
        dataset::*,
        error::*,
        polynomial::*,
        random::*,
        swarm::{
            RunSummary, Swarm,
            config::*,
            objective::*,
            observer::*,
            particle::*,
            schedule::*,
            update::{self, RandomnessPolicy},
        },
    };

    pub use nalgebra;
}
