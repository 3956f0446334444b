//! Optical Character Recognition (OCR)
//!
//! Local text extraction from bag photos, intended as a cheaper pre-pass
//! before the vision-LLM call.

use anyhow::Result;
use tracing::info;

pub struct OcrService;

impl OcrService {
    /// Read dense label text from an image.
    pub async fn extract_text(image_bytes: &[u8]) -> Result<String> {
        info!(size = image_bytes.len(), "running OCR pre-pass on bag photo");

        // MOCK: bridge to local Tesseract once wired; the vision call carries
        // extraction on its own for now.
        Ok("SINGLE ORIGIN COFFEE mock label text".into())
    }
}
