//! Main HTTP gateway server: router assembly and shared state.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use beanscan_browser::PageRenderer;
use beanscan_catalog::ScanStore;
use beanscan_config::Config;
use beanscan_reviews::ReviewFetcher;
use beanscan_vision::VisionProvider;

use crate::{health_api, reviews_api, scan_api};

/// Room for the image part plus form overhead.
const BODY_LIMIT_BYTES: usize = 12 * 1024 * 1024;

/// Application state shared across routes.
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
    pub vision: Option<VisionProvider>,
    pub reviews: ReviewFetcher,
    pub store: ScanStore,
    pub started_at: Instant,
}

impl AppState {
    /// Wire up state from config: shared HTTP client (process-wide request
    /// timeout lives here), vision provider, renderer, review fetcher.
    pub async fn from_config(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let vision = match (&config.openai_api_key, &config.gemini_api_key) {
            (Some(key), _) => Some(VisionProvider::openai(key, &config.openai_model)),
            (None, Some(key)) => Some(VisionProvider::gemini(key)),
            (None, None) => None,
        };
        if vision.is_none() {
            tracing::warn!("no vision API key configured, /api/scan will return 500");
        }

        let renderer =
            Arc::new(PageRenderer::detect(http.clone(), config.chrome_bin.as_deref()).await);

        let search = config
            .google_search_api_key
            .clone()
            .zip(config.google_search_engine_id.clone());
        let reviews = ReviewFetcher::new(http.clone(), renderer, search);

        Ok(Self {
            config,
            http,
            vision,
            reviews,
            store: ScanStore::new(),
            started_at: Instant::now(),
        })
    }
}

/// Pin CORS to the configured frontend origin when one is set.
fn cors_layer(base_url: Option<&str>) -> CorsLayer {
    match base_url.and_then(|u| u.parse::<HeaderValue>().ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}

/// Build the Axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.base_url.as_deref());
    Router::new()
        .route("/api/scan", post(scan_api::scan))
        .route(
            "/api/reviews",
            get(reviews_api::get_reviews).post(reviews_api::post_reviews),
        )
        .route("/api/health", get(health_api::get_health))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start_server(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);
    info!("gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
