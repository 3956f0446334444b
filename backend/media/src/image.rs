//! Upload validation for the scan endpoint.

use bytes::Bytes;
use tracing::debug;

use beanscan_core::BeanScanError;

use crate::mime_detect::{detect_mime_type, is_image, sniff_mime};

/// Uploads above this are rejected before any processing.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// An upload that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedImage {
    pub data: Bytes,
    pub mime: &'static str,
    pub filename: String,
}

/// Validate an uploaded image part: non-empty, within the size cap, and
/// actually image bytes (magic sniff first, extension as a fallback).
pub fn validate_upload(
    data: Bytes,
    filename: Option<&str>,
) -> Result<ValidatedImage, BeanScanError> {
    if data.is_empty() {
        return Err(BeanScanError::InvalidUpload("empty image upload".into()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(BeanScanError::InvalidUpload(format!(
            "image too large: {} bytes (max {})",
            data.len(),
            MAX_UPLOAD_BYTES
        )));
    }

    let filename = filename.unwrap_or("upload.jpg").to_string();
    let mime = match sniff_mime(&data) {
        Some(m) => m,
        None => {
            let by_ext = detect_mime_type(&filename);
            if !is_image(by_ext) {
                return Err(BeanScanError::InvalidUpload(format!(
                    "unsupported upload type for {filename}"
                )));
            }
            by_ext
        }
    };

    debug!(mime, size = data.len(), "validated image upload");
    Ok(ValidatedImage { data, mime, filename })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg_bytes() -> Bytes {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
        data.extend_from_slice(&[0u8; 64]);
        Bytes::from(data)
    }

    #[test]
    fn accepts_jpeg_upload() {
        let v = validate_upload(jpeg_bytes(), Some("bag.jpg")).unwrap();
        assert_eq!(v.mime, "image/jpeg");
    }

    #[test]
    fn rejects_empty_upload() {
        let err = validate_upload(Bytes::new(), Some("bag.jpg")).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rejects_oversized_upload() {
        let data = Bytes::from(vec![0xFF; MAX_UPLOAD_BYTES + 1]);
        let err = validate_upload(data, None).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn rejects_text_with_non_image_name() {
        let err = validate_upload(Bytes::from_static(b"not an image"), Some("notes.txt"))
            .unwrap_err();
        assert!(matches!(err, BeanScanError::InvalidUpload(_)));
    }

    #[test]
    fn falls_back_to_extension_for_unknown_magic() {
        // Bytes we cannot sniff but a trusted image extension.
        let v = validate_upload(Bytes::from_static(&[0x00, 0x01, 0x02, 0x03]), Some("x.png"))
            .unwrap();
        assert_eq!(v.mime, "image/png");
    }
}
