use thiserror::Error;

/// Top-level error type for the BeanScan backend.
#[derive(Debug, Error)]
pub enum BeanScanError {
    #[error("vision provider error ({provider}): {message}")]
    VisionError { provider: String, message: String },

    #[error("vision provider not configured")]
    VisionNotConfigured,

    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    #[error("product search failed: {0}")]
    SearchFailed(String),

    #[error("scrape failed for {url}: {message}")]
    ScrapeFailed { url: String, message: String },

    #[error("browser error: {0}")]
    BrowserError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
