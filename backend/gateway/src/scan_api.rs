//! `POST /api/scan` — the core scan endpoint.
//!
//! Multipart form: an `image` file part, optional `includeReviews` text
//! part. A failed vision call is a 500; a failed parse degrades to partial
//! or placeholder data and still succeeds.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{error, info, warn};
use uuid::Uuid;

use beanscan_catalog::{brew_recommendations, RoasterMatcher};
use beanscan_core::{ProcessingMethod, ScanData, ScanRecord, ScanResponse};
use beanscan_media::validate_upload;
use beanscan_vision::confidence;

use crate::server::AppState;

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "success": false, "error": message.into() })))
}

/// Handler for `POST /api/scan`.
pub async fn scan(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ScanResponse>, ApiError> {
    let started = Instant::now();

    let mut image: Option<(Bytes, Option<String>)> = None;
    let mut include_reviews = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("malformed multipart: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().map(|s| s.to_string());
                let data = field.bytes().await.map_err(|e| {
                    api_error(StatusCode::BAD_REQUEST, format!("could not read image: {e}"))
                })?;
                image = Some((data, filename));
            }
            "includeReviews" => {
                include_reviews = field
                    .text()
                    .await
                    .map(|t| parse_flag(&t))
                    .unwrap_or(false);
            }
            _ => {}
        }
    }

    let (data, filename) = image
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "missing image field"))?;
    let upload = validate_upload(data, filename.as_deref())
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let provider = state.vision.as_ref().ok_or_else(|| {
        error!("scan requested but no vision provider is configured");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "vision provider not configured")
    })?;

    let (mut extraction, method) = beanscan_vision::extract_from_image(
        provider,
        &state.http,
        &upload.data,
        upload.mime,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "vision call failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    // Confidence reflects what the model read; score before any mock
    // enrichment below pads fields.
    let confidence = confidence::score(&extraction, method);

    if let Some(roaster) = extraction.roaster.clone() {
        let matched = RoasterMatcher::match_name(&roaster);
        if matched.match_confidence > 0.9 {
            extraction.roaster = Some(matched.canonical_name);
        }
    }
    if extraction.brew_recommendations.is_empty() && method != ProcessingMethod::Failed {
        extraction.brew_recommendations =
            brew_recommendations(extraction.roast_level.as_deref());
    }

    let id = Uuid::new_v4();
    if let Err(e) = state.store.insert(ScanRecord {
        id,
        created_at: Utc::now(),
        extraction: extraction.clone(),
        confidence,
        processing_method: method,
    }) {
        warn!(error = %e, "failed to record scan");
    }

    let reviews = if include_reviews {
        match &extraction.roaster {
            Some(roaster) => Some(
                state
                    .reviews
                    .fetch(roaster, extraction.product_name.as_deref().unwrap_or(""))
                    .await,
            ),
            None => {
                warn!("includeReviews set but no roaster extracted, skipping reviews");
                None
            }
        }
    } else {
        None
    };

    let processing_time = started.elapsed().as_millis() as u64;
    info!(%id, ?method, confidence, processing_time, "scan complete");

    Ok(Json(ScanResponse {
        success: true,
        data: ScanData {
            id,
            extraction,
            confidence,
            processing_method: method,
            processing_time,
            reviews,
        },
    }))
}

fn parse_flag(text: &str) -> bool {
    matches!(text.trim(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use beanscan_browser::PageRenderer;
    use beanscan_catalog::ScanStore;
    use beanscan_config::Config;
    use beanscan_reviews::ReviewFetcher;

    fn test_state() -> Arc<AppState> {
        let http = reqwest::Client::new();
        let renderer = Arc::new(PageRenderer::fetch_only(http.clone()));
        Arc::new(AppState {
            config: Config::default(),
            http: http.clone(),
            vision: None,
            reviews: ReviewFetcher::new(http, renderer, None),
            store: ScanStore::new(),
            started_at: Instant::now(),
        })
    }

    fn multipart_request(body: String, boundary: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/scan")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_image_part_is_a_400() {
        let app = crate::server::build_router(test_state());
        let boundary = "scan-test-boundary";
        // A form with only the flag part and no image.
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"includeReviews\"\r\n\r\n\
             true\r\n\
             --{boundary}--\r\n"
        );

        let response = app.oneshot(multipart_request(body, boundary)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let v: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["error"], "missing image field");
    }

    #[tokio::test]
    async fn empty_image_part_is_a_400() {
        let app = crate::server::build_router(test_state());
        let boundary = "scan-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"image\"; filename=\"bag.jpg\"\r\n\
             Content-Type: image/jpeg\r\n\r\n\
             \r\n\
             --{boundary}--\r\n"
        );

        let response = app.oneshot(multipart_request(body, boundary)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let v: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["success"], false);
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" 1 "));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("TRUE"));
    }

    #[test]
    fn api_error_shape() {
        let (status, body) = api_error(StatusCode::BAD_REQUEST, "missing image field");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0["success"], false);
        assert_eq!(body.0["error"], "missing image field");
    }
}
