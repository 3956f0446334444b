//! Vision extraction pipeline: one vision-LLM call plus response cleanup.
//!
//! The model is asked for a single JSON object of coffee-bag attributes;
//! its reply is fence-stripped and parsed, with regex fallback extraction
//! when the JSON is malformed. A failed parse never fails the request —
//! only a failed provider call does.

pub mod confidence;
pub mod ocr;
pub mod parse;
pub mod prompt;
pub mod provider;

use beanscan_core::{BeanScanError, CoffeeExtraction, ProcessingMethod};
use tracing::{info, warn};

pub use provider::VisionProvider;

/// Run the full extraction pipeline on one uploaded image.
pub async fn extract_from_image(
    provider: &VisionProvider,
    client: &reqwest::Client,
    image_bytes: &[u8],
    mime_type: &str,
) -> Result<(CoffeeExtraction, ProcessingMethod), BeanScanError> {
    let raw = provider::describe_image(
        provider,
        client,
        image_bytes,
        mime_type,
        prompt::EXTRACTION_PROMPT,
    )
    .await?;

    let (extraction, method) = parse::parse_response(&raw);

    // Last resort before giving up: the OCR pre-pass (still a stub) may
    // surface label text the model reply did not.
    if method == ProcessingMethod::Failed {
        if let Ok(label_text) = ocr::OcrService::extract_text(image_bytes).await {
            let rescued = parse::fallback_extract(&label_text);
            if !rescued.is_empty() {
                warn!("rescued partial extraction from OCR text");
                return Ok((rescued, ProcessingMethod::RegexFallback));
            }
        }
    }

    match method {
        ProcessingMethod::VisionLlm => {
            info!(fields = extraction.populated_field_count(), "vision extraction parsed cleanly");
        }
        ProcessingMethod::RegexFallback => {
            warn!(fields = extraction.populated_field_count(), "model reply was not valid JSON, used regex fallback");
        }
        ProcessingMethod::Failed => {
            warn!("nothing extractable in model reply, substituting placeholder record");
        }
    }
    Ok((extraction, method))
}
