use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scraping::ContentExtractor;

/// Configuration for a transcript analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sitemap listing the transcript pages
    pub sitemap_url: String,

    /// Substring a sitemap address must contain to count as a transcript page
    pub url_filter: String,

    /// CSS selector of the page's primary content container
    pub content_selector: String,

    /// Speaker whose lines are searched
    pub speaker: String,

    /// Word to count
    pub word: String,

    /// HTTP request timeout in seconds
    pub request_timeout_seconds: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Honour proxy settings from the environment
    pub use_system_proxy: bool,

    /// Number of most frequent speakers to report (0 = off)
    pub top_speakers: usize,
}

impl Config {
    /// Load configuration from an explicit TOML file.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.as_ref().display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.sitemap_url.starts_with("http://") && !self.sitemap_url.starts_with("https://") {
            return Err(anyhow!("sitemap_url must be an http(s) URL: {}", self.sitemap_url));
        }

        if self.speaker.trim().is_empty() {
            return Err(anyhow!("speaker must not be empty"));
        }

        if self.word.is_empty() {
            return Err(anyhow!("word must not be empty"));
        }

        if self.url_filter.is_empty() {
            return Err(anyhow!("url_filter must not be empty"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }

        ContentExtractor::new(&self.content_selector)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Transcript Analyzer Configuration:\n\
            - Sitemap: {}\n\
            - URL filter: {}\n\
            - Content selector: {}\n\
            - Query: speaker={:?} word={:?}\n\
            - Request timeout: {}s",
            self.sitemap_url,
            self.url_filter,
            self.content_selector,
            self.speaker,
            self.word,
            self.request_timeout_seconds
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sitemap_url: "https://bigbangtrans.wordpress.com/sitemap.xml".to_string(),
            url_filter: "series-".to_string(),
            content_selector: "#content".to_string(),
            speaker: "sheldon".to_string(),
            word: "penny".to_string(),
            request_timeout_seconds: 30,
            user_agent: concat!("transcript-analyzer/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
            top_speakers: 0,
        }
    }
}

/// Builder for configuration
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn with_sitemap_url(mut self, url: impl Into<String>) -> Self {
        self.config.sitemap_url = url.into();
        self
    }

    pub fn with_url_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.url_filter = filter.into();
        self
    }

    pub fn with_content_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.content_selector = selector.into();
        self
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.config.speaker = speaker.into();
        self
    }

    pub fn with_word(mut self, word: impl Into<String>) -> Self {
        self.config.word = word.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config.request_timeout_seconds = seconds;
        self
    }

    pub fn use_system_proxy(mut self, enabled: bool) -> Self {
        self.config.use_system_proxy = enabled;
        self
    }

    pub fn with_top_speakers(mut self, n: usize) -> Self {
        self.config.top_speakers = n;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.speaker, "sheldon");
        assert_eq!(config.word, "penny");
        assert_eq!(config.url_filter, "series-");
        assert_eq!(config.content_selector, "#content");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_speaker("leonard")
            .with_word("sheldon")
            .with_timeout(5)
            .with_top_speakers(10)
            .use_system_proxy(false)
            .build();

        assert_eq!(config.speaker, "leonard");
        assert_eq!(config.word, "sheldon");
        assert_eq!(config.request_timeout_seconds, 5);
        assert_eq!(config.top_speakers, 10);
        assert!(!config.use_system_proxy);
    }

    #[test]
    fn test_config_validation() {
        assert!(ConfigBuilder::new().with_word("").build().validate().is_err());
        assert!(ConfigBuilder::new().with_speaker("  ").build().validate().is_err());
        assert!(ConfigBuilder::new().with_timeout(0).build().validate().is_err());
        assert!(ConfigBuilder::new().with_sitemap_url("ftp://x").build().validate().is_err());
        assert!(ConfigBuilder::new().with_content_selector("##").build().validate().is_err());
    }

    #[test]
    fn test_config_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transcript-analyzer.toml");

        let config = ConfigBuilder::new().with_speaker("penny").with_word("sheldon").build();
        config.save(&path).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("partial.toml");
        std::fs::write(&path, "word = \"bazinga\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.word, "bazinga");
        assert_eq!(config.speaker, "sheldon");
    }

    #[test]
    fn test_missing_config_file() {
        assert!(Config::from_file("/nonexistent/transcript-analyzer.toml").is_err());
    }
}
