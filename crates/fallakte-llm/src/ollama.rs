//! Ollama client implementation
//!
//! Talks to a local or remote Ollama instance over its generate API. The
//! pipeline makes exactly one attempt per task invocation; there is no
//! retry loop, because a failed document is reported as a per-document
//! failure rather than re-queued.

use async_trait::async_trait;
use fallakte_domain::{Completion, CompletionError, TextCompletion};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default request timeout; completion latency is model-dependent and can
/// reach minutes on CPU-only hosts
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Ollama-backed [`TextCompletion`] implementation
pub struct OllamaClient {
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

/// Request body for the Ollama generate API
#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

/// Response from the Ollama generate API
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Response from the Ollama tags API, used for health probing
#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<serde_json::Value>,
}

impl OllamaClient {
    /// Create a client for an endpoint and model
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, CompletionError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Unreachable(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
        })
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Probe the tags endpoint; `true` means Ollama answered
    pub async fn health(&self) -> bool {
        let url = format!("{}/api/tags", self.endpoint);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                response.json::<TagsResponse>().await.is_ok()
            }
            _ => false,
        }
    }

    fn map_transport_error(e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout
        } else {
            CompletionError::Unreachable(e.to_string())
        }
    }
}

#[async_trait]
impl TextCompletion for OllamaClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<Completion, CompletionError> {
        let url = format!("{}/api/generate", self.endpoint);
        let body = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                num_predict: max_tokens,
            },
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "calling completion service");
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let elapsed = start.elapsed();
        debug!(
            elapsed_ms = elapsed.as_millis() as u64,
            response_chars = parsed.response.len(),
            "completion received"
        );

        Ok(Completion {
            text: parsed.response,
            elapsed,
        })
    }

    async fn healthy(&self) -> bool {
        self.health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.2:3b").unwrap();
        assert_eq!(client.endpoint, "http://localhost:11434");
        assert_eq!(client.model(), "llama3.2:3b");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        // Port 1 is reliably closed
        let client =
            OllamaClient::with_timeout("http://127.0.0.1:1", "llama3.2:3b", Duration::from_secs(2))
                .unwrap();
        let err = client.complete("test", 10).await.unwrap_err();
        assert!(matches!(
            err,
            CompletionError::Unreachable(_) | CompletionError::Timeout
        ));
    }

    #[tokio::test]
    async fn test_health_offline() {
        let client =
            OllamaClient::with_timeout("http://127.0.0.1:1", "llama3.2:3b", Duration::from_secs(2))
                .unwrap();
        assert!(!client.health().await);
    }
}
