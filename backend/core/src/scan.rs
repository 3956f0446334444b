//! Scan request lifecycle types: how an extraction was produced and the
//! envelope returned by `POST /api/scan`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extraction::CoffeeExtraction;
use crate::review::ReviewSummary;

/// How the extraction record was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingMethod {
    /// The model's response parsed cleanly as JSON.
    #[serde(rename = "vision-llm")]
    VisionLlm,
    /// JSON parse failed; regex fallback substituted partial data.
    #[serde(rename = "regex-fallback")]
    RegexFallback,
    /// Nothing could be extracted; the fixed placeholder record was used.
    #[serde(rename = "failed")]
    Failed,
}

/// Payload of a successful scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanData {
    pub id: Uuid,
    pub extraction: CoffeeExtraction,
    /// Always clamped to [0, 1].
    pub confidence: f32,
    pub processing_method: ProcessingMethod,
    /// Wall-clock milliseconds spent handling the request.
    pub processing_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<ReviewSummary>,
}

/// Envelope for `POST /api/scan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    pub success: bool,
    pub data: ScanData,
}

/// What the (in-memory) store keeps per scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub extraction: CoffeeExtraction,
    pub confidence: f32,
    pub processing_method: ProcessingMethod,
}
