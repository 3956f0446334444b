//! BeanScan runtime configuration, loaded from environment variables.

pub mod redact;

use serde::Serialize;

/// BeanScan runtime configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// OpenAI API key for the vision call
    pub openai_api_key: Option<String>,
    /// Vision model name
    pub openai_model: String,
    /// Gemini API key (alternate vision provider)
    pub gemini_api_key: Option<String>,
    /// Google Custom Search key for product-page discovery
    pub google_search_api_key: Option<String>,
    /// Google Custom Search engine id
    pub google_search_engine_id: Option<String>,
    /// Public base URL the frontend is served from
    pub base_url: Option<String>,
    /// Headless Chromium binary for scraping; auto-detected when unset
    pub chrome_bin: Option<String>,
    /// Timeout applied to every outbound HTTP request, seconds
    pub http_timeout_secs: u64,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            openai_api_key: None,
            openai_model: "gpt-4o".to_string(),
            gemini_api_key: None,
            google_search_api_key: None,
            google_search_engine_id: None,
            base_url: None,
            chrome_bin: None,
            http_timeout_secs: 20,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("BEANSCAN_BIND")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("BEANSCAN_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: std::env::var("OPENAI_VISION_MODEL")
                .unwrap_or_else(|_| "gpt-4o".to_string()),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            google_search_api_key: std::env::var("GOOGLE_SEARCH_API_KEY").ok(),
            google_search_engine_id: std::env::var("GOOGLE_SEARCH_ENGINE_ID").ok(),
            // BASE_URL wins; NEXT_PUBLIC_BASE_URL kept for frontend-contract compatibility.
            base_url: std::env::var("BASE_URL")
                .ok()
                .or_else(|| std::env::var("NEXT_PUBLIC_BASE_URL").ok()),
            chrome_bin: std::env::var("CHROME_BIN").ok(),
            http_timeout_secs: std::env::var("BEANSCAN_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Whether product-page discovery via the search API is possible.
    pub fn search_configured(&self) -> bool {
        self.google_search_api_key.is_some() && self.google_search_engine_id.is_some()
    }

    /// A snapshot safe to log: secrets masked.
    pub fn to_redacted_json(&self) -> serde_json::Value {
        let v = serde_json::to_value(self).unwrap_or_default();
        redact::redact(&v)
    }
}
