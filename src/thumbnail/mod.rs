/// Photo ingestion module
///
/// This module handles:
/// - Checking the declared media type of a picked file
/// - Cover-fit scaling and centered cropping to a fixed thumbnail size
/// - Re-encoding to low-quality JPEG and wrapping it in a data URI

pub mod geometry;
pub mod inline;
pub mod normalize;

#[cfg(test)]
pub(crate) mod fixtures;

pub use geometry::{CoverFit, ThumbnailGeometry};
pub use normalize::{load_image_file, normalize, normalize_async, NormalizedThumbnail, RawImage};
