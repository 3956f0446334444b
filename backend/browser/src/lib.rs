//! Headless-browser page rendering for the review scraper.
//!
//! Renders review pages with headless Chromium over the DevTools Protocol
//! when a browser binary is available, and degrades to a plain HTTP fetch
//! (browser User-Agent, no JS) when it is not. Scraping is best-effort
//! either way.

pub mod cdp;
pub mod launcher;
pub mod page;

use anyhow::Result;
use tracing::{info, warn};

use launcher::BrowserHandle;

/// Sent on plain fetches so retail sites serve the full page.
const BROWSER_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36";

/// Renders URLs to HTML, with or without a real browser behind it.
pub struct PageRenderer {
    http: reqwest::Client,
    browser: Option<BrowserHandle>,
}

impl PageRenderer {
    /// Detect and launch a browser if one is installed; otherwise run in
    /// fetch-only mode.
    pub async fn detect(http: reqwest::Client, chrome_bin: Option<&str>) -> Self {
        let browser = match launcher::find_chrome(chrome_bin) {
            Some(binary) => match BrowserHandle::launch(&binary, &http).await {
                Ok(handle) => {
                    info!("review scraping will use headless browser rendering");
                    Some(handle)
                }
                Err(e) => {
                    warn!(error = %e, "browser launch failed, falling back to plain fetch");
                    None
                }
            },
            None => {
                info!("no browser binary found, review scraping uses plain fetch");
                None
            }
        };
        Self { http, browser }
    }

    /// Fetch-only renderer (used in tests and browserless deployments).
    pub fn fetch_only(http: reqwest::Client) -> Self {
        Self { http, browser: None }
    }

    /// Render a URL to HTML.
    pub async fn render(&self, url: &str) -> Result<String> {
        if let Some(browser) = &self.browser {
            match self.render_via_cdp(browser, url).await {
                Ok(html) => return Ok(html),
                Err(e) => {
                    warn!(url, error = %e, "CDP render failed, retrying as plain fetch");
                }
            }
        }
        self.plain_fetch(url).await
    }

    async fn render_via_cdp(&self, browser: &BrowserHandle, url: &str) -> Result<String> {
        let mut page = page::Page::open(&browser.devtools_base, &self.http).await?;
        page.navigate(url).await?;
        let html = page.outer_html().await;
        page.close().await;
        html
    }

    async fn plain_fetch(&self, url: &str) -> Result<String> {
        let resp = self
            .http
            .get(url)
            .header("User-Agent", BROWSER_UA)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.text().await?)
    }
}
