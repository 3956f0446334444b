//! Review aggregation: discover a product page, scrape up to three sources
//! concurrently, and summarize whatever succeeded — or fabricate a
//! plausible summary when nothing did.
//!
//! This path never fails a request; every error degrades to invented data
//! by design.

pub mod aggregate;
pub mod fallback;
pub mod scrape;
pub mod search;
pub mod sources;

use std::sync::Arc;

use beanscan_browser::PageRenderer;
use beanscan_core::ReviewSummary;
use futures::future::join_all;
use tracing::{info, warn};

pub use scrape::ScrapedRating;

/// Fetches and aggregates review data for one product.
pub struct ReviewFetcher {
    http: reqwest::Client,
    renderer: Arc<PageRenderer>,
    /// `(api_key, engine_id)` when product-page search is configured.
    search: Option<(String, String)>,
}

impl ReviewFetcher {
    pub fn new(
        http: reqwest::Client,
        renderer: Arc<PageRenderer>,
        search: Option<(String, String)>,
    ) -> Self {
        Self { http, renderer, search }
    }

    /// The full review pipeline. Infallible: scrape failures degrade to
    /// fabricated content.
    pub async fn fetch(&self, roaster: &str, product_name: &str) -> ReviewSummary {
        let product_page = self.discover_product_page(roaster, product_name).await;

        let source_urls = sources::build_sources(product_page.as_deref(), roaster, product_name);
        info!(roaster, product_name, sources = source_urls.len(), "scraping review sources");

        // Fire all sources at once and keep whichever succeed.
        let results = join_all(
            source_urls
                .iter()
                .map(|url| scrape::scrape_source(&self.renderer, url)),
        )
        .await;

        let mut scraped = Vec::new();
        for result in results {
            match result {
                Ok(rating) => scraped.push(rating),
                Err(e) => warn!(error = %e, "scrape source dropped"),
            }
        }

        if scraped.is_empty() {
            info!(roaster, product_name, "no review data scraped, fabricating summary");
            let mut summary = fallback::fabricate_summary(roaster, product_name);
            summary.product_page = product_page;
            summary
        } else {
            info!(sources = scraped.len(), "aggregating scraped review data");
            aggregate::aggregate(&scraped, product_page)
        }
    }

    async fn discover_product_page(&self, roaster: &str, product_name: &str) -> Option<String> {
        let (api_key, engine_id) = self.search.as_ref()?;
        match search::find_product_page(&self.http, api_key, engine_id, roaster, product_name)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, "product search failed, relying on URL guesses");
                None
            }
        }
    }
}
