/// Synthetic test images encoded in memory

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use super::{normalize, NormalizedThumbnail, RawImage, ThumbnailGeometry};

/// Uncompressed BMP keeps large fixtures cheap to build and decode
pub(crate) fn solid_bmp(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)));
    encode(&img, ImageFormat::Bmp)
}

pub(crate) fn solid_png_with_alpha(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)));
    encode(&img, ImageFormat::Png)
}

/// Thumbnail of a solid photo with the given source dimensions
pub(crate) fn thumbnail_of(width: u32, height: u32) -> NormalizedThumbnail {
    let raw = RawImage::new(solid_bmp(width, height, [120, 90, 60]), "image/bmp");
    normalize(&raw, &ThumbnailGeometry::default()).unwrap()
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}
