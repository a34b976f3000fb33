use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Article fetch error: {0}")]
    Fetch(String),

    #[error("Rate limited by inference provider")]
    RateLimited,

    #[error("Rate limit retries exhausted after {0} attempts")]
    RetryExhausted(u32),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Formatting error: {0}")]
    Formatting(String),

    #[error("No summary could be produced")]
    NoSummary,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
