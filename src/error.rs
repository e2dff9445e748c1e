use crate::options::ValidationError;
use crate::origin::PatternError;
use thiserror::Error;

/// Startup failures. A gatekeeper that cannot be built must not serve traffic.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid wildcard origin pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error("invalid CORS policy: {0}")]
    Policy(#[from] ValidationError),
    #[error("allowed origin entries must not be empty")]
    EmptyOrigin,
    #[error("'{0}' is not a valid origin (expected scheme://host[:port])")]
    InvalidOrigin(String),
    #[error("origin '{0}' is listed more than once")]
    DuplicateOrigin(String),
}
