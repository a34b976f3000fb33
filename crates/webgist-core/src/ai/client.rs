use std::sync::Arc;
use std::time::Duration;

use super::providers::{ChatMessage, InferenceProvider, OpenAiProvider};
use super::retry::RetryPolicy;
use super::sanitize::sanitize_completion;
use crate::config::AppConfig;
use crate::{Error, Result};

/// One-shot prompt completion against the configured inference provider.
///
/// Wraps a provider with the rate-limit retry policy and output
/// sanitization. Rate limiting never escapes this type; every other failure
/// is returned to the caller, who decides whether it is fatal.
pub struct CompletionClient {
    provider: Arc<dyn InferenceProvider>,
    retry: RetryPolicy,
    max_tokens: u32,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn InferenceProvider>, retry: RetryPolicy, max_tokens: u32) -> Self {
        Self {
            provider,
            retry,
            max_tokens: max_tokens.max(1),
        }
    }

    /// Create a client backed by the OpenAI provider from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config
            .ai
            .api_key
            .as_ref()
            .ok_or_else(|| Error::Config("OpenAI API key not configured".to_string()))?;
        let provider = Arc::new(OpenAiProvider::new(api_key, &config.ai.model));

        let retry = RetryPolicy {
            max_attempts: config.ai.max_retries,
            base_delay: Duration::from_millis(config.ai.base_delay_ms.max(1)),
            multiplier: 2,
        };

        Ok(Self::new(provider, retry, config.ai.max_tokens))
    }

    /// Complete a prompt, retrying rate limits and sanitizing the output
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let raw = self
            .retry
            .retry(
                || self.provider.generate(messages, self.max_tokens),
                |e| matches!(e, Error::RateLimited),
            )
            .await?;

        sanitize_completion(&raw)
    }
}
