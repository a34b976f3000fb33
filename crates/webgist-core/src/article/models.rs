use serde::{Deserialize, Serialize};

/// A fetched web article, reduced to its readable text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub body: String,
}

impl Article {
    /// Check whether any readable body text was extracted
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }
}
