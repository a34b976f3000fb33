use anyhow::Result;

use webgist_core::summarize::{
    format_summary, ArticleSummarizer, OutputFormat, SummarizationPolicy,
};
use webgist_core::AppConfig;

pub async fn run(
    config: &AppConfig,
    url: &str,
    reasoning: &str,
    format: &str,
    bullets: bool,
) -> Result<()> {
    let output_format: OutputFormat = format.parse()?;
    let summarizer = ArticleSummarizer::new(config)?;

    if bullets {
        let points = summarizer.bullet_points(url).await?;
        println!("{}", points);
        return Ok(());
    }

    let policy = SummarizationPolicy {
        reasoning: reasoning.to_string(),
        output_format,
    };

    println!("Generating summary...\n");

    let result = summarizer.summarise(url, &policy).await?;

    println!("Title of the article: {}\n", result.title);

    // A formatting failure must not lose the summary itself
    match format_summary(&result.summary, output_format) {
        Ok(formatted) => println!("{}", formatted),
        Err(e) => {
            tracing::warn!("Formatting failed ({}), printing the plain summary", e);
            println!("{}", result.summary);
        }
    }

    Ok(())
}
