use async_openai::{
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};

use super::{ChatMessage, InferenceProvider, Role};
use crate::{Error, Result};

/// Classify rate-limit signals so the retry loop can tell them apart from
/// fatal provider errors
fn is_rate_limited(error: &OpenAIError) -> bool {
    let text = error.to_string().to_lowercase();
    text.contains("rate limit") || text.contains("rate_limit") || text.contains("429")
}

fn map_error(error: OpenAIError) -> Error {
    if is_rate_limited(&error) {
        Error::RateLimited
    } else {
        Error::Completion(error.to_string())
    }
}

/// OpenAI chat-completion provider
pub struct OpenAiProvider {
    client: Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str) -> Self {
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        let client = Client::with_config(config);

        Self {
            client,
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl InferenceProvider for OpenAiProvider {
    async fn generate(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String> {
        let mut request_messages = Vec::with_capacity(messages.len());
        for message in messages {
            let converted = match message.role {
                Role::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(message.content.clone())
                        .build()
                        .map_err(map_error)?,
                ),
                Role::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(message.content.clone())
                        .build()
                        .map_err(map_error)?,
                ),
            };
            request_messages.push(converted);
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(request_messages)
            .max_tokens(max_tokens)
            .build()
            .map_err(map_error)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(Error::Completion("provider returned an empty completion".to_string()));
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_errors_are_classified() {
        let error = OpenAIError::InvalidArgument("Rate limit reached for requests".to_string());
        assert!(is_rate_limited(&error));
        assert!(matches!(map_error(error), Error::RateLimited));

        let error = OpenAIError::InvalidArgument("model not found".to_string());
        assert!(!is_rate_limited(&error));
        assert!(matches!(map_error(error), Error::Completion(_)));
    }
}
