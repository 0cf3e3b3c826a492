/// Media type checks and inline `data:` URI encoding
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;

use crate::error::ReportError;

/// Declared type for files whose extension does not name an image format
pub const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Fail with `InvalidMediaType` unless the declared type is in the `image/` family
pub fn ensure_image_media_type(media_type: &str) -> Result<(), ReportError> {
    let is_image = media_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"));

    if is_image {
        Ok(())
    } else {
        Err(ReportError::InvalidMediaType {
            media_type: media_type.to_string(),
        })
    }
}

/// Declared media type of a file on disk, derived from its extension
pub fn media_type_for_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MEDIA_TYPE)
}

/// Wrap encoded bytes in a self-describing `data:<type>;base64,<payload>` URI
pub fn data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}
