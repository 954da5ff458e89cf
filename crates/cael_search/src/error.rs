//! Error types for the event locator.

use thiserror::Error;

use crate::oracle::{BodySpec, OracleError};

/// Errors from a search call.
///
/// Running out of events is not an error: window searches return an empty
/// list and elapsed-degree searches report why they stopped through
/// [`crate::Termination`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// A configuration value failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// A call argument was rejected before any sampling happened.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The oracle does not recognize this body/centricity/frame combination.
    #[error("unsupported body: {0}")]
    UnsupportedBody(BodySpec),
    /// The oracle failed while sampling; propagated unchanged.
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),
    /// The caller's cancellation token was triggered.
    #[error("search cancelled")]
    Cancelled,
}

impl SearchError {
    /// Whether this error came from validating the caller's arguments.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_) | Self::InvalidInput(_) | Self::UnsupportedBody(_)
        )
    }
}
