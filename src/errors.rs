use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BallisticsError {
    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Convergence error: {0}")]
    ConvergenceError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BallisticsError {
    pub fn domain(message: impl Into<String>) -> Self {
        BallisticsError::DomainError(message.into())
    }

    pub fn convergence(message: impl Into<String>) -> Self {
        BallisticsError::ConvergenceError(message.into())
    }
}

// Rejects zero, negative, NaN and infinite values.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), BallisticsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BallisticsError::domain(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}
