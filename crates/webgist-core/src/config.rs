use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            fetch: FetchConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Retry attempts for transient HTTP failures (429/503)
    #[serde(default = "default_fetch_retries")]
    pub max_retries: u32,
    /// Maximum article size in bytes
    #[serde(default = "default_max_article_bytes")]
    pub max_article_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            max_retries: default_fetch_retries(),
            max_article_bytes: default_max_article_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key; OPENAI_API_KEY overrides at load time
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Max tokens per completion; also used as the chunk size in characters
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Rate-limit retry attempts; omit to retry indefinitely
    #[serde(default)]
    pub max_retries: Option<u32>,
    /// Base backoff delay in milliseconds, doubling per attempt
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            max_retries: None,
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_fetch_retries() -> u32 {
    3
}

fn default_max_article_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_base_delay_ms() -> u64 {
    500
}

impl AppConfig {
    /// Load configuration from file or return defaults.
    ///
    /// The OPENAI_API_KEY environment variable is consulted once here, at
    /// construction; nothing downstream reads the environment.
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.trim().is_empty() {
                config.ai.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/webgist/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("webgist")
            .join("config.toml")
    }

    /// Chunk size in characters, clamped to at least 1
    pub fn chunk_size(&self) -> usize {
        self.ai.max_tokens.max(1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.ai.max_tokens, 2000);
        assert_eq!(config.ai.max_retries, None);
        assert_eq!(config.fetch.request_timeout_secs, 30);
    }

    #[test]
    fn chunk_size_clamps_to_one() {
        let mut config = AppConfig::default();
        config.ai.max_tokens = 0;
        assert_eq!(config.chunk_size(), 1);
    }

    #[test]
    fn parses_partial_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [ai]
            model = "gpt-4o"
            max_tokens = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.ai.model, "gpt-4o");
        assert_eq!(config.chunk_size(), 1000);
        assert_eq!(config.general.log_level, "info");
    }
}
