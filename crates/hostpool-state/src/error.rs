//! Error types for the auto-scale rule store.

use thiserror::Error;

/// Result type alias for rule store operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors raised by a [`RuleStore`](crate::RuleStore).
///
/// Everything except `NotFound` is a storage failure that callers pass on
/// unchanged.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to open rule database: {0}")]
    Open(String),

    #[error("rule store transaction failed: {0}")]
    Transaction(String),

    #[error("rule table unavailable: {0}")]
    Table(String),

    #[error("failed to read auto scale rule: {0}")]
    Read(String),

    #[error("failed to write auto scale rule: {0}")]
    Write(String),

    #[error("failed to encode auto scale rule: {0}")]
    Serialize(String),

    #[error("stored auto scale rule is corrupt: {0}")]
    Deserialize(String),

    #[error("no stored auto scale rule for {0:?}")]
    NotFound(String),
}

impl StateError {
    /// Whether this error means the requested key does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StateError::NotFound(_))
    }
}
