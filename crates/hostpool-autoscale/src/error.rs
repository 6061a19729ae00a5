//! Error types for rule resolution.

use hostpool_state::StateError;
use thiserror::Error;

/// Result type alias for repository operations.
pub type RuleResult<T> = Result<T, RuleError>;

/// A rule that fails normalization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid rule, scale down ratio must be greater than 1.0, got {0}")]
    ScaleDownRatio(f64),

    #[error("invalid rule, max memory ratio must be a finite number, got {0}")]
    MaxMemoryRatio(f64),

    #[error("invalid rule, either memory information or max container count must be set")]
    MissingCapacity,
}

/// Errors returned by [`RuleRepository`](crate::RuleRepository) operations.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("auto scale rule not found: {0}")]
    NotFound(String),

    #[error("rule store error: {0}")]
    Store(#[from] StateError),
}

impl RuleError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RuleError::NotFound(_))
    }
}
