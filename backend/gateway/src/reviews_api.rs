//! `GET|POST /api/reviews` — standalone review lookup for a product.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use beanscan_core::ReviewSummary;

use crate::server::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewsParams {
    pub roaster: Option<String>,
    pub product_name: Option<String>,
}

type ApiError = (StatusCode, Json<Value>);

/// `roaster` is required; `productName` is optional.
fn validate_params(params: &ReviewsParams) -> Result<(String, String), ApiError> {
    let roaster = params
        .roaster
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": "roaster is required" })),
            )
        })?;
    let product_name = params
        .product_name
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .to_string();
    Ok((roaster.to_string(), product_name))
}

async fn handle(
    state: Arc<AppState>,
    params: ReviewsParams,
) -> Result<Json<ReviewSummary>, ApiError> {
    let (roaster, product_name) = validate_params(&params)?;
    info!(roaster, product_name, "review lookup");
    let summary = state.reviews.fetch(&roaster, &product_name).await;
    Ok(Json(summary))
}

/// Handler for `GET /api/reviews?roaster=...&productName=...`.
pub async fn get_reviews(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReviewsParams>,
) -> Result<Json<ReviewSummary>, ApiError> {
    handle(state, params).await
}

/// Handler for `POST /api/reviews` with a JSON body.
pub async fn post_reviews(
    State(state): State<Arc<AppState>>,
    Json(params): Json<ReviewsParams>,
) -> Result<Json<ReviewSummary>, ApiError> {
    handle(state, params).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_roaster_is_rejected() {
        let err = validate_params(&ReviewsParams::default()).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn blank_roaster_is_rejected() {
        let params = ReviewsParams { roaster: Some("   ".into()), product_name: None };
        assert!(validate_params(&params).is_err());
    }

    #[test]
    fn product_name_defaults_to_empty() {
        let params = ReviewsParams { roaster: Some("Heart".into()), product_name: None };
        let (roaster, product) = validate_params(&params).unwrap();
        assert_eq!(roaster, "Heart");
        assert_eq!(product, "");
    }
}
