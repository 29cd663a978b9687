use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwarmError {
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("Objective error: {0}")]
    Objective(#[from] argmin::core::Error),

    #[error("Non-finite global best cost {cost} at step {step}")]
    NonFiniteCost { step: usize, cost: f64 },
}

impl SwarmError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SwarmError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}
