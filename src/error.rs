//! Configuration error types
//!
//! The simulation itself never fails; only loading settings or a balance
//! table from JSON can.

use thiserror::Error;

/// Errors raised while parsing or validating settings and tuning data
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field parsed but holds an unusable value
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
