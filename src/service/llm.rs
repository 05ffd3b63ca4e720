//! Shared LLM client and interaction utilities
//!
//! Provides the text-generation seam used by the verdict service and its
//! Gemini implementation on rig-core.

use std::env;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::gemini;

/// Environment variable holding the Gemini API key
const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Environment variable for the screening model
const ENV_SCREENING_MODEL: &str = "SCREENING_MODEL";

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Missing API credential ({0})")]
    MissingCredential(&'static str),

    #[error("Failed to create Gemini client: {0}")]
    ClientInit(String),

    #[error("Request to model failed: {0}")]
    Transport(String),

    #[error("Model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Empty response from model")]
    EmptyResponse,
}

/// A text-generation endpoint that answers a prompt with a JSON document
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the raw JSON text of the answer
    async fn generate_json(&self, prompt: &str) -> Result<String, LlmError>;

    /// Model identifier, for logging
    fn model(&self) -> &str;

    /// Whether a credential is available for the endpoint
    fn has_credential(&self) -> bool {
        true
    }
}

/// Await `call`, bounded by `timeout` when one is set
async fn bounded<F>(timeout: Option<Duration>, call: F) -> Result<String, LlmError>
where
    F: Future<Output = Result<String, LlmError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| LlmError::Timeout(limit))?,
        None => call.await,
    }
}

/// Gemini client answering in JSON mode
pub struct GeminiClient {
    client: Option<gemini::Client>,
    model: String,
    timeout: Option<Duration>,
}

impl GeminiClient {
    /// Create a client. A missing or blank key yields a client whose every
    /// call fails with [`LlmError::MissingCredential`].
    pub fn new(
        api_key: Option<&str>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let client = match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => Some(
                gemini::Client::builder(key).build().map_err(|e| LlmError::ClientInit(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            client,
            model: model.into(),
            timeout,
        })
    }

    /// Create a client from the environment
    pub fn from_env(timeout: Option<Duration>) -> Result<Self, LlmError> {
        let api_key = env::var(ENV_GEMINI_API_KEY).ok();
        if api_key.is_none() {
            tracing::warn!(
                "{} not set, automated screening will fall back to manual review",
                ENV_GEMINI_API_KEY
            );
        }

        let model = env::var(ENV_SCREENING_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(model = %model, timeout = ?timeout, "Gemini client initialized");

        Self::new(api_key.as_deref(), model, timeout)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_json(&self, prompt: &str) -> Result<String, LlmError> {
        let client = self
            .client
            .as_ref()
            .ok_or(LlmError::MissingCredential(ENV_GEMINI_API_KEY))?;

        // JSON mode; the verdict schema is checked by the caller
        let agent = client
            .agent(&self.model)
            .additional_params(serde_json::json!({
                "generationConfig": {
                    "responseMimeType": "application/json"
                }
            }))
            .build();

        tracing::debug!(model = %self.model, prompt_length = prompt.len(), "Calling Gemini");

        let text = bounded(self.timeout, async {
            agent
                .prompt(prompt)
                .await
                .map_err(|e| LlmError::Transport(e.to_string()))
        })
        .await?;

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn has_credential(&self) -> bool {
        self.client.is_some()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credential_fails_without_request() {
        let client = GeminiClient::new(None, DEFAULT_MODEL, None).unwrap();
        assert!(!client.has_credential());

        let result = client.generate_json("prompt").await;
        assert!(matches!(result, Err(LlmError::MissingCredential(_))));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let client = GeminiClient::new(Some("  "), DEFAULT_MODEL, None).unwrap();
        assert!(!client.has_credential());
    }

    #[test]
    fn test_client_with_key() {
        let client = GeminiClient::new(Some("key"), "gemini-2.5-pro", None).unwrap();
        assert!(client.has_credential());
        assert_eq!(client.model(), "gemini-2.5-pro");
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let result = bounded(Some(Duration::from_millis(10)), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("{}".to_string())
        })
        .await;
        assert!(matches!(result, Err(LlmError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_unbounded_call_passes_through() {
        let result = bounded(None, async { Err(LlmError::Transport("refused".into())) }).await;
        assert!(matches!(result, Err(LlmError::Transport(_))));

        let result = bounded(Some(Duration::from_secs(5)), async { Ok("{}".to_string()) }).await;
        assert_eq!(result.unwrap(), "{}");
    }

    #[tokio::test]
    #[ignore] // Requires network access and GEMINI_API_KEY
    async fn test_live_generation() {
        let client = GeminiClient::from_env(None).unwrap();
        let result = client
            .generate_json(r#"Return ONLY a JSON object: { "status": "Approved", "reason": "ok" }"#)
            .await;
        assert!(result.is_ok());
    }
}
