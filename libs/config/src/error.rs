//! Configuration errors

use thiserror::Error;

/// Raised before any curve is built from a configuration that fails validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Configuration violates a range, balance or price invariant
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl ConfigError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
