mod extract;
mod fetcher;
mod models;

pub use extract::{extract_title, html_to_text};
pub use fetcher::{ArticleFetcher, HttpArticleFetcher};
pub use models::Article;
