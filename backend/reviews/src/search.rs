//! Product-page discovery via the Google Custom Search JSON API.

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info};

/// Hosts we trust to carry real review widgets.
pub const KNOWN_RETAIL_DOMAINS: &[&str] = &[
    "amazon.com",
    "tradecoffee.com",
    "coffeereview.com",
    "seattlecoffeegear.com",
    "roastratings.com",
];

/// Query the search API and pick the most promising product page.
pub async fn find_product_page(
    client: &reqwest::Client,
    api_key: &str,
    engine_id: &str,
    roaster: &str,
    product_name: &str,
) -> Result<Option<String>> {
    let query = format!("{roaster} {product_name} coffee reviews");
    info!(query, "searching for product page");

    let resp = client
        .get("https://www.googleapis.com/customsearch/v1")
        .query(&[("key", api_key), ("cx", engine_id), ("q", &query), ("num", "10")])
        .send()
        .await?
        .error_for_status()?;
    let body: Value = resp.json().await?;

    let page = pick_result(&body);
    debug!(?page, "search completed");
    Ok(page)
}

/// Prefer the first result on a known retail domain; otherwise take the
/// first result at all.
pub fn pick_result(body: &Value) -> Option<String> {
    let items = body["items"].as_array()?;
    let links: Vec<&str> = items
        .iter()
        .filter_map(|item| item["link"].as_str())
        .collect();

    links
        .iter()
        .find(|link| {
            let host = host_of(link);
            KNOWN_RETAIL_DOMAINS
                .iter()
                .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
        })
        .or_else(|| links.first())
        .map(|s| s.to_string())
}

fn host_of(url: &str) -> String {
    url.split("//")
        .nth(1)
        .unwrap_or(url)
        .split('/')
        .next()
        .unwrap_or("")
        .trim_start_matches("www.")
        .to_string()
}
