use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webgist_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "webgist")]
#[command(author, version, about = "A command-line web article summarizer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Summarize an article URL (shorthand for `summarize`)
    #[arg(short = 'u', long = "url")]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch an article and print its summary
    Summarize {
        /// Article URL
        url: String,
        /// Guidance for what the summary should focus on
        #[arg(
            short,
            long,
            default_value = "Extract the key points of the article."
        )]
        reasoning: String,
        /// Output format: "table" or "text"
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Produce 3-5 bullet points instead of a running summary
        #[arg(long)]
        bullets: bool,
    },
    /// Write a default configuration file
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Handle shorthand summarization (-u flag)
    if let Some(url) = cli.url {
        return commands::summarize::run(
            &config,
            &url,
            "Extract the key points of the article.",
            "text",
            false,
        )
        .await;
    }

    // Handle commands
    match cli.command {
        Some(Commands::Summarize {
            url,
            reasoning,
            format,
            bullets,
        }) => commands::summarize::run(&config, &url, &reasoning, &format, bullets).await,
        Some(Commands::InitConfig) => commands::init_config::run(),
        None => {
            anyhow::bail!("no URL given; try `webgist summarize <url>` or `webgist --help`")
        }
    }
}
