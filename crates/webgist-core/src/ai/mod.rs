mod client;
pub mod providers;
mod retry;
mod sanitize;

pub use client::CompletionClient;
pub use providers::{ChatMessage, InferenceProvider, OpenAiProvider, Role};
pub use retry::RetryPolicy;
pub use sanitize::sanitize_completion;
