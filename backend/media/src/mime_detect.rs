//! MIME type detection for uploaded bag photos.

/// Detect MIME type by file extension.
pub fn detect_mime_type(filename: &str) -> &'static str {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "heic" | "heif" => "image/heic",
        "bmp"          => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        _              => "application/octet-stream",
    }
}

/// Sniff MIME type from magic bytes. Phone cameras lie about extensions
/// often enough that the bytes are the authority.
pub fn sniff_mime(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    // HEIC/HEIF: ISO BMFF `ftyp` box with an image brand. MP4 video shares
    // the container, so the brand bytes decide.
    if data.len() >= 12 && &data[4..8] == b"ftyp" {
        let brand: [u8; 4] = data[8..12].try_into().ok()?;
        if matches!(&brand, b"heic" | b"heix" | b"heif" | b"mif1" | b"msf1") {
            return Some("image/heic");
        }
    }
    None
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}
