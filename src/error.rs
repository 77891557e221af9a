/// Result type for transcript scraping and parsing operations
pub type Result<T> = std::result::Result<T, TranscriptError>;

/// Error types for the transcript pipeline
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("Fetch error for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Sitemap parse error: {0}")]
    Parse(String),

    #[error("Cannot parse season/episode metadata from {url}: {reason}")]
    MetadataParse { url: String, reason: String },

    #[error("Extraction error: no element matches `{selector}`")]
    Extraction { selector: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TranscriptError {
    pub(crate) fn fetch(url: &str, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn metadata(url: &str, reason: impl ToString) -> Self {
        Self::MetadataParse {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
