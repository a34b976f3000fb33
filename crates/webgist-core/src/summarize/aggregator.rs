use crate::ai::{ChatMessage, CompletionClient};
use crate::{Error, Result};

use super::format::OutputFormat;

/// Caller-supplied guidance applied uniformly to every chunk
#[derive(Debug, Clone)]
pub struct SummarizationPolicy {
    /// Free-text focus for the summary (audience, angle, emphasis)
    pub reasoning: String,
    /// Shape the model is asked to produce
    pub output_format: OutputFormat,
}

/// Drives per-chunk summarization and joins the partial results.
///
/// Chunks are processed strictly in sequence; a chunk whose completion fails
/// is logged and contributes nothing, and the remaining chunks still run.
pub struct SummaryAggregator {
    client: CompletionClient,
}

impl SummaryAggregator {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    fn build_messages(chunk: &str, policy: &SummarizationPolicy) -> Vec<ChatMessage> {
        let system = format!(
            "You are an advanced AI language model designed to assist users in \
             extracting expert summarization from web content. Your goal is to \
             distill complex information, identify key insights according to the \
             following guidance: {}, and generate a concise and informative \
             summary of the content.",
            policy.reasoning
        );
        let user = format!(
            "Write an expert summarization of the following article:\n{}\n\
             Consider relevant {} and nuances in the content. Give the \
             summarization results in the form of a {}.",
            chunk, policy.reasoning, policy.output_format
        );

        vec![ChatMessage::system(system), ChatMessage::user(user)]
    }

    /// Summarize every chunk in order and join the successful partial
    /// summaries with a single space.
    ///
    /// Returns `Error::NoSummary` when not a single chunk produced text.
    pub async fn summarize_chunks(
        &self,
        chunks: &[String],
        policy: &SummarizationPolicy,
    ) -> Result<String> {
        let mut partials: Vec<Option<String>> = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            let messages = Self::build_messages(chunk, policy);
            match self.client.complete(&messages).await {
                Ok(summary) => partials.push(Some(summary)),
                Err(e) => {
                    tracing::warn!(
                        chunk = index + 1,
                        total = chunks.len(),
                        error = %e,
                        "Chunk summarization failed, skipping"
                    );
                    partials.push(None);
                }
            }
        }

        let summaries: Vec<String> = partials.into_iter().flatten().collect();
        if summaries.is_empty() {
            return Err(Error::NoSummary);
        }

        Ok(summaries.join(" "))
    }

    /// One completion over the whole article asking for 3-5 bullet points,
    /// with `•` markers normalized onto their own lines.
    pub async fn bullet_points(&self, chunks: &[String]) -> Result<String> {
        if chunks.is_empty() {
            return Err(Error::NoSummary);
        }

        let prompt = format!(
            "Please provide 3-5 bullet points summarizing the main points and \
             key takeaways of the following article, ensuring they are concise \
             and informative:\n\n{}",
            chunks.join("\n\n")
        );
        let raw = self
            .client
            .complete(&[ChatMessage::system(prompt)])
            .await?;

        Ok(raw.replace('•', "\n•").trim().to_string())
    }
}
