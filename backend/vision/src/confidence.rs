//! Extraction confidence: populated-field fraction scaled by how the
//! record was produced. Always in [0, 1].

use beanscan_core::{extraction::FIELD_COUNT, CoffeeExtraction, ProcessingMethod};

/// Scale factor per processing method.
fn method_factor(method: ProcessingMethod) -> f32 {
    match method {
        ProcessingMethod::VisionLlm => 1.0,
        ProcessingMethod::RegexFallback => 0.6,
        ProcessingMethod::Failed => 0.0,
    }
}

/// Score an extraction.
pub fn score(extraction: &CoffeeExtraction, method: ProcessingMethod) -> f32 {
    let coverage = extraction.populated_field_count() as f32 / FIELD_COUNT as f32;
    (coverage * method_factor(method)).clamp(0.0, 1.0)
}
