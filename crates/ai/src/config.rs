//! Configuration for the Gemini generation service and the requester.
//!
//! Values come from the process environment (and a `.env` file when
//! present):
//!
//! - `SIMFOLIO_GEMINI_API_KEY`, falling back to `GEMINI_API_KEY` then `API_KEY`
//! - `SIMFOLIO_GEMINI_MODEL`
//! - `SIMFOLIO_GEMINI_BASE_URL`
//! - `SIMFOLIO_REQUEST_TIMEOUT_MS`

use std::time::Duration;

use crate::error::AiError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
/// API host; the client appends the versioned `models/{model}:generateContent` path.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;
pub const DEFAULT_MAX_CONCURRENCY: usize = 3;

const API_KEY_VARS: &[&str] = &["SIMFOLIO_GEMINI_API_KEY", "GEMINI_API_KEY", "API_KEY"];
const PROVIDER_ID: &str = "gemini";

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl GeminiConfig {
    /// Config with the given key and default model, endpoint and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }

    pub fn from_env() -> Result<Self, AiError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|&key| read(key))
            .ok_or_else(|| AiError::MissingApiKey(PROVIDER_ID.to_string()))?;

        let mut config = Self::new(api_key);
        if let Some(model) = read("SIMFOLIO_GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = read("SIMFOLIO_GEMINI_BASE_URL") {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(AiError::InvalidConfig(format!(
                    "SIMFOLIO_GEMINI_BASE_URL must be an http(s) URL, got '{}'",
                    base_url
                )));
            }
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        let timeout_ms = read("SIMFOLIO_REQUEST_TIMEOUT_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        config.request_timeout = Duration::from_millis(timeout_ms);

        Ok(config)
    }
}

/// Requester tuning.
#[derive(Debug, Clone)]
pub struct SimulationRequesterConfig {
    /// Per-asset calls allowed in flight at once. Values below 1 act as 1.
    pub max_concurrency: usize,
}

impl Default for SimulationRequesterConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GeminiConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "abc")])).unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS));
    }

    #[test]
    fn test_api_key_precedence() {
        let config = GeminiConfig::from_lookup(lookup_from(&[
            ("API_KEY", "generic"),
            ("GEMINI_API_KEY", "gemini"),
            ("SIMFOLIO_GEMINI_API_KEY", "  "),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "gemini");
    }

    #[test]
    fn test_missing_api_key() {
        let err = GeminiConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey(ref p) if p == "gemini"));
    }

    #[test]
    fn test_overrides() {
        let config = GeminiConfig::from_lookup(lookup_from(&[
            ("API_KEY", "k"),
            ("SIMFOLIO_GEMINI_MODEL", "gemini-2.5-flash"),
            ("SIMFOLIO_GEMINI_BASE_URL", "http://localhost:8089/"),
            ("SIMFOLIO_REQUEST_TIMEOUT_MS", "5000"),
        ]))
        .unwrap();

        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.base_url, "http://localhost:8089");
        assert_eq!(config.request_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_unparsable_timeout_falls_back() {
        let config = GeminiConfig::from_lookup(lookup_from(&[
            ("API_KEY", "k"),
            ("SIMFOLIO_REQUEST_TIMEOUT_MS", "soon"),
        ]))
        .unwrap();

        assert_eq!(config.request_timeout, Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = GeminiConfig::from_lookup(lookup_from(&[
            ("API_KEY", "k"),
            ("SIMFOLIO_GEMINI_BASE_URL", "localhost:8089"),
        ]))
        .unwrap_err();

        assert_eq!(err.code(), "INVALID_CONFIG");
    }
}
