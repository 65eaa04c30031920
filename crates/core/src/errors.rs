//! Core error types for the simulation dashboard.
//!
//! This module defines transport-agnostic error types. Failures from the
//! external generation service are converted to [`Error::Simulation`] by the
//! crate that talks to it.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the dashboard core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A whole simulation run failed (service unavailable, transport error).
    #[error("Simulation failed: {0}")]
    Simulation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Create a new batch-level simulation error.
    pub fn simulation(msg: impl Into<String>) -> Self {
        Self::Simulation(msg.into())
    }
}

/// Validation errors for user input parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Error::Unexpected(format!("State lock poisoned: {}", err))
    }
}
