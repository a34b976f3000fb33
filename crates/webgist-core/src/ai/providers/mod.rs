mod openai;

pub use openai::OpenAiProvider;

use crate::Result;

/// Role of a prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

/// One prompt message handed to the inference provider
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Trait for text-generation providers
///
/// Exactly three outcomes: generated text, `Error::RateLimited` (transient,
/// the caller backs off and retries), or any other error (fatal for the
/// request).
#[async_trait::async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Generate text for the given messages
    async fn generate(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String>;
}
