mod aggregator;
mod chunker;
mod format;

pub use aggregator::{SummarizationPolicy, SummaryAggregator};
pub use chunker::chunk_text;
pub use format::{format_summary, split_sentences, OutputFormat};

use std::sync::Arc;

use crate::ai::CompletionClient;
use crate::article::{ArticleFetcher, HttpArticleFetcher};
use crate::config::AppConfig;
use crate::{Error, Result};

/// The pipeline's terminal artifact before optional formatting
#[derive(Debug, Clone)]
pub struct ArticleSummary {
    pub title: String,
    pub summary: String,
}

/// End-to-end article summarization: fetch, chunk, summarize.
///
/// Formatting is deliberately not part of the pipeline; the caller applies
/// [`format_summary`] if and when it wants a different shape, and keeps the
/// plain summary either way.
pub struct ArticleSummarizer {
    fetcher: Arc<dyn ArticleFetcher>,
    aggregator: SummaryAggregator,
    chunk_size: usize,
}

impl ArticleSummarizer {
    /// Create a summarizer wired to the HTTP fetcher and the configured
    /// inference provider
    pub fn new(config: &AppConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpArticleFetcher::new(config)?);
        let client = CompletionClient::from_config(config)?;

        Ok(Self::with_parts(
            fetcher,
            SummaryAggregator::new(client),
            config.chunk_size(),
        ))
    }

    /// Assemble a summarizer from explicit parts
    pub fn with_parts(
        fetcher: Arc<dyn ArticleFetcher>,
        aggregator: SummaryAggregator,
        chunk_size: usize,
    ) -> Self {
        Self {
            fetcher,
            aggregator,
            chunk_size: chunk_size.max(1),
        }
    }

    async fn fetch_chunks(&self, url: &str) -> Result<(String, Vec<String>)> {
        let article = self.fetcher.fetch(url).await?;
        if !article.has_body() {
            return Err(Error::Fetch(format!("no readable body text at {}", url)));
        }

        tracing::info!(title = %article.title, "Fetched article");

        let chunks = chunk_text(&article.body, self.chunk_size);
        tracing::info!("Number of chunks: {}", chunks.len());

        Ok((article.title, chunks))
    }

    /// Summarise the article at `url` under the given policy.
    ///
    /// A fetch failure (or a page with no readable body) aborts before any
    /// model call; per-chunk completion failures shorten the summary but do
    /// not abort it.
    pub async fn summarise(
        &self,
        url: &str,
        policy: &SummarizationPolicy,
    ) -> Result<ArticleSummary> {
        let (title, chunks) = self.fetch_chunks(url).await?;
        let summary = self.aggregator.summarize_chunks(&chunks, policy).await?;

        Ok(ArticleSummary { title, summary })
    }

    /// Produce 3-5 bullet points for the article at `url`
    pub async fn bullet_points(&self, url: &str) -> Result<String> {
        let (_, chunks) = self.fetch_chunks(url).await?;
        self.aggregator.bullet_points(&chunks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ChatMessage, InferenceProvider, RetryPolicy};
    use crate::article::Article;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct StaticFetcher {
        article: Article,
    }

    #[async_trait::async_trait]
    impl ArticleFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<Article> {
            Ok(self.article.clone())
        }
    }

    struct FailingFetcher;

    #[async_trait::async_trait]
    impl ArticleFetcher for FailingFetcher {
        async fn fetch(&self, url: &str) -> Result<Article> {
            Err(Error::Fetch(format!("connection refused for {}", url)))
        }
    }

    struct CountingProvider {
        calls: AtomicU32,
    }

    #[async_trait::async_trait]
    impl InferenceProvider for CountingProvider {
        async fn generate(&self, _messages: &[ChatMessage], _max_tokens: u32) -> Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("Summary {}", n + 1))
        }
    }

    fn summarizer(
        fetcher: Arc<dyn ArticleFetcher>,
        provider: Arc<CountingProvider>,
        chunk_size: usize,
    ) -> ArticleSummarizer {
        let client = CompletionClient::new(provider, RetryPolicy::default(), 100);
        ArticleSummarizer::with_parts(fetcher, SummaryAggregator::new(client), chunk_size)
    }

    fn policy() -> SummarizationPolicy {
        SummarizationPolicy {
            reasoning: "key points".to_string(),
            output_format: OutputFormat::Text,
        }
    }

    #[tokio::test]
    async fn fetch_failure_short_circuits_without_model_calls() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicU32::new(0),
        });
        let pipeline = summarizer(Arc::new(FailingFetcher), provider.clone(), 10);

        let result = pipeline.summarise("https://example.com", &policy()).await;

        assert!(matches!(result, Err(Error::Fetch(_))));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_body_is_reported_as_fetch_failure() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicU32::new(0),
        });
        let fetcher = Arc::new(StaticFetcher {
            article: Article {
                title: "Empty".to_string(),
                body: "   ".to_string(),
            },
        });
        let pipeline = summarizer(fetcher, provider.clone(), 10);

        let result = pipeline.summarise("https://example.com", &policy()).await;

        assert!(matches!(result, Err(Error::Fetch(_))));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn summarises_each_chunk_in_order() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicU32::new(0),
        });
        let fetcher = Arc::new(StaticFetcher {
            article: Article {
                title: "Ten chars twice".to_string(),
                body: "aaaaabbbbb".to_string(),
            },
        });
        let pipeline = summarizer(fetcher, provider.clone(), 5);

        let result = pipeline
            .summarise("https://example.com", &policy())
            .await
            .unwrap();

        assert_eq!(result.title, "Ten chars twice");
        assert_eq!(result.summary, "Summary 1 Summary 2");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
