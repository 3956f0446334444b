//! Upload handling: MIME detection and image validation for scanned photos.

pub mod image;
pub mod mime_detect;

pub use image::{validate_upload, ValidatedImage, MAX_UPLOAD_BYTES};
pub use mime_detect::{detect_mime_type, is_image, sniff_mime};
