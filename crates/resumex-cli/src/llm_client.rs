//! HTTP client for the LLM record extractor.
//!
//! Request and response shapes live in `resumex_core::llm`; this module only
//! moves them over the wire.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use resumex_core::llm::{build_request, parse_response};
use resumex_core::models::config::LlmConfig;
use resumex_core::{CollaboratorError, ExtractedRecord, LlmInput, ResumexError};

const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Delay before retry number `attempt` (1-based): 1s, 2s, 4s... up to a minute.
fn backoff(attempt: u32) -> Duration {
    let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
    Duration::from_millis(1000u64.saturating_mul(factor)).min(MAX_BACKOFF)
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self, CollaboratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CollaboratorError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            config: config.clone(),
        })
    }

    /// Build a client with the API key taken from the configured variable.
    pub fn from_env(config: &LlmConfig) -> anyhow::Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            anyhow::anyhow!(
                "Set {} to use the llm engine",
                config.api_key_env
            )
        })?;
        Ok(Self::new(config, api_key)?)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }

    /// Send the input to the model and return the raw response body.
    ///
    /// Retries on 429 and 5xx with exponential backoff: 1s, 2s, 4s...
    pub async fn call(&self, input: &LlmInput) -> Result<String, CollaboratorError> {
        let request = build_request(&self.config, input);
        let attempts = self.config.max_retries.max(1);
        let mut last_error: Option<CollaboratorError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = backoff(attempt);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(self.endpoint())
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(CollaboratorError::Transport(e.to_string()));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(CollaboratorError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(CollaboratorError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response
                .text()
                .await
                .map_err(|e| CollaboratorError::Transport(e.to_string()))?;
            debug!("LLM call succeeded with {} byte response", body.len());
            return Ok(body);
        }

        Err(last_error.unwrap_or(CollaboratorError::EmptyResponse))
    }

    /// Extract a record through the model.
    pub async fn extract(&self, input: &LlmInput) -> Result<ExtractedRecord, ResumexError> {
        let model = if input.is_image() {
            &self.config.vision_model
        } else {
            &self.config.text_model
        };
        debug!("Extracting with {}", model);

        let body = self.call(input).await?;
        parse_response(&body)
    }
}
