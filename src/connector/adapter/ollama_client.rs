use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Serialize;
use tracing::{debug, warn};

use super::generate_stream::{error_message, GenerateStreamDecoder};
use crate::application::ChatClient;
use crate::domain::DomainError;

/// Default target: Ollama running locally on its standard port.
pub const DEFAULT_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "llama3.2:1b";
/// Upper bound for the whole exchange, including reading the stream.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Where and how to reach the generation server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
    pub timeout: Duration,
}

impl OllamaConfig {
    /// Construct from environment variables with local defaults:
    ///
    /// | Variable       | Default                               |
    /// |----------------|---------------------------------------|
    /// | `OLLAMA_URL`   | `http://localhost:11434/api/generate` |
    /// | `OLLAMA_MODEL` | `llama3.2:1b`                         |
    pub fn from_env() -> Self {
        let url = std::env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self {
            url,
            model,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the Ollama generate endpoint.
///
/// Sends one streamed request per prompt and concatenates the `response`
/// deltas of the newline-delimited JSON reply. There is no retry; every
/// transport fault, timeout or non-success status is a
/// [`DomainError::RequestFailed`].
pub struct OllamaClient {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: true,
        };

        debug!("POST {} (model {})", self.config.url, self.config.model);

        let response = self
            .client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Ollama returned {status}: {body}");
            let message = match error_message(&body) {
                Some(error) => format!("server returned {status}: {error}"),
                None => format!("server returned {status}"),
            };
            return Err(DomainError::request_failed(message));
        }

        let mut decoder = GenerateStreamDecoder::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(request_failed)?;
            decoder.push(&chunk);
        }

        Ok(decoder.finish())
    }
}

/// Flatten a reqwest error and its causes into one line, so that e.g. a
/// refused connection is visible and not just "error sending request".
fn request_failed(err: reqwest::Error) -> DomainError {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    DomainError::request_failed(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_local_ollama() {
        let config = OllamaConfig::default();
        assert_eq!(config.url, "http://localhost:11434/api/generate");
        assert_eq!(config.model, "llama3.2:1b");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn builder_overrides() {
        let config = OllamaConfig::default()
            .with_url("http://127.0.0.1:9/api/generate")
            .with_model("mistral")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.url, "http://127.0.0.1:9/api/generate");
        assert_eq!(config.model, "mistral");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn request_body_asks_for_stream() {
        let body = serde_json::to_value(GenerateRequest {
            model: "llama3.2:1b",
            prompt: "hi",
            stream: true,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"model": "llama3.2:1b", "prompt": "hi", "stream": true})
        );
    }
}
