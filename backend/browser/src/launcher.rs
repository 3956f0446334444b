//! Headless Chromium launcher.
//!
//! Finds a Chromium binary, starts it with a DevTools port, and waits for
//! the DevTools HTTP endpoint to come up.

use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

/// Locations tried when `CHROME_BIN` is not set.
const WELL_KNOWN_PATHS: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
];

/// Find a usable Chromium binary, preferring the configured path.
pub fn find_chrome(configured: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = configured {
        let p = PathBuf::from(path);
        if p.exists() {
            return Some(p);
        }
        warn!(path, "configured CHROME_BIN does not exist, trying well-known paths");
    }
    WELL_KNOWN_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// A running headless browser. The process is killed on drop.
pub struct BrowserHandle {
    child: Mutex<Child>,
    /// DevTools HTTP endpoint, e.g. `http://127.0.0.1:9222`.
    pub devtools_base: String,
}

impl BrowserHandle {
    /// Launch Chromium headless and wait for DevTools to answer.
    pub async fn launch(binary: &PathBuf, http: &reqwest::Client) -> Result<Self> {
        let port = pick_free_port()?;
        let devtools_base = format!("http://127.0.0.1:{port}");

        info!(binary = %binary.display(), port, "launching headless browser");
        let child = Command::new(binary)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-first-run")
            .arg(format!("--remote-debugging-port={port}"))
            .arg("about:blank")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to spawn browser process")?;

        let handle = Self { child: Mutex::new(child), devtools_base };

        // DevTools needs a moment; poll /json/version before handing out.
        for attempt in 0..25u32 {
            tokio::time::sleep(Duration::from_millis(200)).await;
            let url = format!("{}/json/version", handle.devtools_base);
            if let Ok(resp) = http.get(&url).send().await {
                if resp.status().is_success() {
                    debug!(attempt, "devtools endpoint is up");
                    return Ok(handle);
                }
            }
        }
        bail!("browser devtools endpoint never came up on port {port}")
    }
}

impl Drop for BrowserHandle {
    fn drop(&mut self) {
        if let Ok(mut child) = self.child.lock() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

fn pick_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_port_is_nonzero() {
        assert!(pick_free_port().unwrap() > 0);
    }

    #[test]
    fn missing_configured_path_falls_through() {
        // With a bogus configured path the result depends only on the host
        // having a well-known binary, never on the bogus path itself.
        let found = find_chrome(Some("/nonexistent/chrome-binary"));
        if let Some(p) = found {
            assert!(p.exists());
        }
    }
}
