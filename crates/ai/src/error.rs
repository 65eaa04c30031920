//! Simulation requester error types.

use thiserror::Error;

/// Errors raised while talking to the generation service.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key configured for the provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// A configuration value could not be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Transport failure (connection, TLS).
    #[error("Network error: {0}")]
    Http(String),

    /// The call did not finish within the configured timeout.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// Provider error (from rig-core or the API).
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider reply envelope could not be read.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// A simulated payload did not match the expected schema.
    #[error("Failed to decode simulation payload: {0}")]
    Decode(String),
}

impl AiError {
    /// Create a new provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a new decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::InvalidConfig(_) => "INVALID_CONFIG",
            AiError::Http(_) => "NETWORK_ERROR",
            AiError::Timeout(_) => "TIMEOUT",
            AiError::Provider(_) => "PROVIDER_ERROR",
            AiError::InvalidResponse(_) => "INVALID_RESPONSE",
            AiError::Decode(_) => "DECODE_ERROR",
        }
    }
}

impl From<AiError> for simfolio_core::Error {
    fn from(err: AiError) -> Self {
        simfolio_core::Error::Simulation(err.to_string())
    }
}
