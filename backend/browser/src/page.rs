//! Page-level operations over a CDP session: open a tab, navigate, wait for
//! load, read the rendered DOM.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde_json::json;
use tracing::debug;

use crate::cdp::CdpClient;

pub struct Page {
    client: CdpClient,
    target_id: String,
    devtools_base: String,
    http: reqwest::Client,
}

impl Page {
    /// Create a fresh tab and attach to it.
    pub async fn open(devtools_base: &str, http: &reqwest::Client) -> Result<Self> {
        // Newer Chromium requires PUT for /json/new.
        let info: serde_json::Value = http
            .put(format!("{devtools_base}/json/new?url=about:blank"))
            .send()
            .await?
            .json()
            .await
            .context("creating a new browser tab")?;
        let ws_url = info["webSocketDebuggerUrl"]
            .as_str()
            .ok_or_else(|| anyhow!("tab info missing webSocketDebuggerUrl"))?;
        let target_id = info["id"].as_str().unwrap_or_default().to_string();

        let client = CdpClient::connect(ws_url).await?;
        Ok(Self {
            client,
            target_id,
            devtools_base: devtools_base.to_string(),
            http: http.clone(),
        })
    }

    /// Navigate and wait until `document.readyState` is complete (bounded).
    pub async fn navigate(&mut self, url: &str) -> Result<()> {
        debug!(url, "navigating tab");
        self.client
            .send_command("Page.navigate", json!({ "url": url }))
            .await?;

        for _ in 0..40u32 {
            tokio::time::sleep(Duration::from_millis(250)).await;
            if self.ready_state().await.as_deref() == Some("complete") {
                return Ok(());
            }
        }
        // Best-effort: scrape whatever rendered.
        Ok(())
    }

    async fn ready_state(&mut self) -> Option<String> {
        let result = self
            .client
            .send_command(
                "Runtime.evaluate",
                json!({ "expression": "document.readyState", "returnByValue": true }),
            )
            .await
            .ok()?;
        result["result"]["value"].as_str().map(|s| s.to_string())
    }

    /// The rendered DOM as HTML.
    pub async fn outer_html(&mut self) -> Result<String> {
        let result = self
            .client
            .send_command(
                "Runtime.evaluate",
                json!({
                    "expression": "document.documentElement.outerHTML",
                    "returnByValue": true
                }),
            )
            .await?;
        result["result"]["value"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("page returned no HTML"))
    }

    /// Close the tab; errors ignored, the browser reaps orphans.
    pub async fn close(self) {
        if !self.target_id.is_empty() {
            let _ = self
                .http
                .get(format!("{}/json/close/{}", self.devtools_base, self.target_id))
                .send()
                .await;
        }
    }
}
