//! Structured text generation against Gemini through rig-core.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use rig::{
    client::CompletionClient,
    completion::{CompletionError, Prompt, PromptError},
    providers::gemini,
};
use serde_json::{json, Value};

use crate::config::GeminiConfig;
use crate::error::AiError;

const JSON_MIME_TYPE: &str = "application/json";

/// One structured generation request: a prompt plus the JSON schema the
/// reply must follow.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub response_schema: Value,
}

/// Text generation seam. Implementations return the raw reply text; an empty
/// string means the service produced nothing.
#[async_trait]
pub trait GenerationServiceTrait: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError>;
}

// ============================================================================
// Gemini Client
// ============================================================================

/// `generationConfig` asking for a JSON reply that follows `schema`.
fn structured_output_params(schema: &Value) -> Value {
    json!({
        "generationConfig": {
            "responseMimeType": JSON_MIME_TYPE,
            "responseSchema": schema
        }
    })
}

/// Maps a rig failure onto the requester's error kinds.
///
/// A reply without any candidate content is not a failure of the call: it
/// yields empty text, which the requester drops for that asset only.
fn map_prompt_error(err: PromptError) -> Result<String, AiError> {
    match err {
        PromptError::CompletionError(CompletionError::ResponseError(message)) => {
            debug!("Gemini reply carried no content: {}", message);
            Ok(String::new())
        }
        PromptError::CompletionError(CompletionError::ProviderError(message)) => {
            Err(AiError::Provider(message))
        }
        PromptError::CompletionError(CompletionError::JsonError(e)) => {
            Err(AiError::InvalidResponse(e.to_string()))
        }
        PromptError::CompletionError(CompletionError::HttpError(e)) => {
            Err(AiError::Http(e.to_string()))
        }
        other => Err(AiError::provider(other.to_string())),
    }
}

/// Gemini client for structured single-turn generation.
pub struct GeminiClient {
    client: gemini::Client<HttpClient>,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let client = gemini::Client::<HttpClient>::builder()
            .api_key(&config.api_key)
            .base_url(&config.base_url)
            .build()
            .map_err(|e| AiError::InvalidConfig(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, AiError> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl GenerationServiceTrait for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        debug!("Sending generateContent request to model {}", self.config.model);

        let agent = self
            .client
            .agent(&self.config.model)
            .additional_params(structured_output_params(&request.response_schema))
            .build();

        let timeout = self.config.request_timeout;
        match tokio::time::timeout(timeout, agent.prompt(&request.prompt)).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => map_prompt_error(e),
            Err(_) => Err(AiError::Timeout(timeout.as_millis() as u64)),
        }
    }
}

// ============================================================================
// Fake Provider for Testing
// ============================================================================

/// Canned reply for [`FakeGenerationService`].
#[derive(Debug, Clone)]
pub enum FakeReply {
    Text(String),
    Failure(String),
}

/// A fake generation service that answers per ticker with canned replies.
///
/// Prompts are matched on the `stock {TICKER} (` fragment the simulation
/// prompt contains. Tickers without a canned reply get an empty string.
#[derive(Debug, Default)]
pub struct FakeGenerationService {
    replies: Vec<(String, FakeReply)>,
    calls: AtomicUsize,
}

impl FakeGenerationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer prompts for `ticker` with the given text.
    pub fn with_text(mut self, ticker: &str, text: impl Into<String>) -> Self {
        self.replies
            .push((ticker.to_string(), FakeReply::Text(text.into())));
        self
    }

    /// Fail prompts for `ticker` with a provider error.
    pub fn with_failure(mut self, ticker: &str, message: &str) -> Self {
        self.replies
            .push((ticker.to_string(), FakeReply::Failure(message.to_string())));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationServiceTrait for FakeGenerationService {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let reply = self
            .replies
            .iter()
            .find(|(ticker, _)| request.prompt.contains(&format!("stock {} (", ticker)))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(FakeReply::Text(text)) => Ok(text),
            Some(FakeReply::Failure(message)) => Err(AiError::Provider(message)),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const TEST_KEY: &str = "test-key-123";
    const TEST_MODEL: &str = "gemini-test-model";

    /// Reads one HTTP request (headers plus `Content-Length` body) as text.
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&data).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.trim()
                            .eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).to_string()
    }

    /// Serves a single canned response and hands back the raw request.
    async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (base_url, handle)
    }

    fn client_for(base_url: &str, timeout: Duration) -> GeminiClient {
        let mut config = GeminiConfig::new(TEST_KEY);
        config.model = TEST_MODEL.to_string();
        config.base_url = base_url.to_string();
        config.request_timeout = timeout;
        GeminiClient::new(config).unwrap()
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            prompt: "Simulate monthly historical data for the stock PETR4 (Brazil)".to_string(),
            response_schema: json!({
                "type": "OBJECT",
                "properties": { "history": { "type": "ARRAY", "items": { "type": "STRING" } } },
                "required": ["history"]
            }),
        }
    }

    #[test]
    fn test_structured_output_params_shape() {
        let params = structured_output_params(&json!({ "type": "OBJECT" }));

        assert_eq!(
            params,
            json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "OBJECT" }
                }
            })
        );
    }

    #[tokio::test]
    async fn test_generate_sends_key_model_and_schema() {
        let reply = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "{\"history\":[]}" }] },
                "finishReason": "STOP",
                "index": 0
            }],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 5,
                "totalTokenCount": 17
            },
            "modelVersion": TEST_MODEL,
            "responseId": "resp-1"
        });
        let (base_url, server) = serve_once("200 OK", reply.to_string()).await;
        let client = client_for(&base_url, Duration::from_secs(10));

        let text = client.generate(&request()).await.unwrap();
        let raw_request = server.await.unwrap();

        assert_eq!(text, "{\"history\":[]}");
        assert!(raw_request.contains(TEST_KEY));
        assert!(raw_request.contains(&format!("models/{}:generateContent", TEST_MODEL)));
        assert!(raw_request.contains("responseMimeType"));
        assert!(raw_request.contains("application/json"));
        assert!(raw_request.contains("PETR4"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_provider_error() {
        let body = json!({
            "error": { "code": 503, "message": "The model is overloaded", "status": "UNAVAILABLE" }
        });
        let (base_url, server) = serve_once("503 Service Unavailable", body.to_string()).await;
        let client = client_for(&base_url, Duration::from_secs(10));

        let err = client.generate(&request()).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, AiError::Provider(ref message) if message.contains("overloaded")));
        let core: simfolio_core::Error = err.into();
        assert!(matches!(core, simfolio_core::Error::Simulation(_)));
    }

    #[tokio::test]
    async fn test_unreadable_success_body_is_invalid_response() {
        let (base_url, server) = serve_once("200 OK", "<html>gateway</html>".to_string()).await;
        let client = client_for(&base_url, Duration::from_secs(10));

        let err = client.generate(&request()).await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.code(), "INVALID_RESPONSE");
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            tokio::time::sleep(Duration::from_secs(5)).await;
        });
        let client = client_for(&base_url, Duration::from_millis(200));

        let err = client.generate(&request()).await.unwrap_err();
        server.abort();

        assert!(matches!(err, AiError::Timeout(200)));
    }

    #[tokio::test]
    async fn test_fake_matches_ticker_in_prompt() {
        let fake = FakeGenerationService::new()
            .with_text("VALE3", "{}")
            .with_failure("PETR4", "unavailable");
        let request = |prompt: &str| GenerationRequest {
            prompt: prompt.to_string(),
            response_schema: json!({}),
        };

        assert_eq!(
            fake.generate(&request("Simulate ... stock VALE3 (Brazil)"))
                .await
                .unwrap(),
            "{}"
        );
        let err = fake
            .generate(&request("Simulate ... stock PETR4 (Brazil)"))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::Provider(_)));
        assert_eq!(fake.generate(&request("stock ITUB4 (Brazil)")).await.unwrap(), "");
        assert_eq!(fake.call_count(), 3);
    }

    #[test]
    fn test_client_uses_configured_model() {
        let client = GeminiClient::new(GeminiConfig::new("key")).unwrap();
        assert_eq!(client.model(), crate::config::DEFAULT_GEMINI_MODEL);
    }
}
