/// Photo normalization: decode, cover-fit, composite on white, re-encode
///
/// `normalize` is a pure function of (bytes, geometry). The async wrappers
/// move the CPU-heavy part onto tokio's blocking pool so the UI stays responsive.

use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, imageops::FilterType, DynamicImage, Rgba, RgbaImage};

use super::geometry::{CoverFit, ThumbnailGeometry};
use super::inline::{data_uri, ensure_image_media_type, media_type_for_path};
use crate::error::ReportError;

/// Media type of every normalized thumbnail
pub const THUMBNAIL_MEDIA_TYPE: &str = "image/jpeg";

/// A user-selected image before normalization
#[derive(Debug, Clone)]
pub struct RawImage {
    pub bytes: Vec<u8>,
    /// Declared media type, e.g. `image/png`
    pub media_type: String,
}

impl RawImage {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
        }
    }
}

/// Fixed-size JPEG thumbnail ready to embed in a report
///
/// Cloning is cheap: the encoded bytes and the data URI are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct NormalizedThumbnail {
    width: u32,
    height: u32,
    jpeg: Arc<[u8]>,
    data_uri: Arc<str>,
}

impl NormalizedThumbnail {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded JPEG bytes
    pub fn bytes(&self) -> &[u8] {
        &self.jpeg
    }

    /// `data:image/jpeg;base64,...` form for inline embedding
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }
}

// Keep the (potentially large) payload out of debug output
impl fmt::Debug for NormalizedThumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedThumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.jpeg.len())
            .finish()
    }
}

/// Normalize a raw image into a thumbnail of exactly `geometry.pixel_size()`
///
/// # Errors
/// * `InvalidMediaType` - declared type is not `image/*` (nothing is decoded)
/// * `DecodeFailure` - bytes are unreadable, the image is empty, or re-encoding failed
pub fn normalize(raw: &RawImage, geometry: &ThumbnailGeometry) -> Result<NormalizedThumbnail, ReportError> {
    ensure_image_media_type(&raw.media_type)?;

    let img = image::load_from_memory(&raw.bytes)
        .map_err(|e| ReportError::DecodeFailure(e.to_string()))?;

    let (target_width, target_height) = geometry.pixel_size();
    let fit = CoverFit::plan(img.width(), img.height(), target_width, target_height).ok_or_else(|| {
        ReportError::DecodeFailure(format!("image has no pixels ({}x{})", img.width(), img.height()))
    })?;

    tracing::debug!(
        src_width = img.width(),
        src_height = img.height(),
        ?fit,
        "normalizing image"
    );

    // Crop in source coordinates first so the work is bounded by source and target size
    let cropped = img
        .crop_imm(fit.src_x, fit.src_y, fit.src_width, fit.src_height)
        .resize_exact(target_width, target_height, FilterType::Lanczos3)
        .to_rgba8();

    // White first so transparent sources never leave gaps
    let mut canvas = RgbaImage::from_pixel(target_width, target_height, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &cropped, 0, 0);
    let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut jpeg), geometry.quality)
        .encode_image(&rgb)
        .map_err(|e| ReportError::DecodeFailure(format!("failed to encode thumbnail: {}", e)))?;

    let data_uri = data_uri(THUMBNAIL_MEDIA_TYPE, &jpeg);

    Ok(NormalizedThumbnail {
        width: target_width,
        height: target_height,
        jpeg: jpeg.into(),
        data_uri: data_uri.into(),
    })
}

/// Run `normalize` on the blocking pool; one suspension point per image
pub async fn normalize_async(
    raw: RawImage,
    geometry: ThumbnailGeometry,
) -> Result<NormalizedThumbnail, ReportError> {
    tokio::task::spawn_blocking(move || normalize(&raw, &geometry))
        .await
        .map_err(|e| ReportError::DecodeFailure(format!("Task join error: {}", e)))?
}

/// Read a picked file, declaring its media type from the extension
pub async fn load_image_file(path: &Path) -> Result<RawImage, ReportError> {
    let media_type = media_type_for_path(path);
    ensure_image_media_type(media_type)?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ReportError::DecodeFailure(format!("{}: {}", path.display(), e)))?;

    Ok(RawImage::new(bytes, media_type))
}
