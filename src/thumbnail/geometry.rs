/// Thumbnail geometry and the cover-fit placement policy
///
/// The physical size (inches) is the single source of truth: pixel
/// dimensions are derived from it here, and the report stylesheet
/// declares the same inches, so cells and images line up exactly.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Physical thumbnail size plus the JPEG quality used to encode it
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ThumbnailGeometry {
    /// Width in inches
    pub width_in: f64,
    /// Height in inches
    pub height_in: f64,
    /// Reference resolution used to convert inches to pixels
    pub dpi: f64,
    /// JPEG quality (1-100); kept low because a report embeds many photos
    pub quality: u8,
}

impl Default for ThumbnailGeometry {
    fn default() -> Self {
        Self {
            width_in: 1.62,
            height_in: 1.215,
            dpi: 96.0,
            quality: 30,
        }
    }
}

impl ThumbnailGeometry {
    /// Target pixel size: `round(inches * dpi)` on each axis
    ///
    /// Only meaningful for geometry that passed `validate`.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round() as u32,
            (self.height_in * self.dpi).round() as u32,
        )
    }

    /// Reject geometry that would produce an empty canvas or an invalid encoder
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;
        if !finite_positive(self.width_in) || !finite_positive(self.height_in) {
            return Err(ConfigError::Invalid(format!(
                "thumbnail size must be positive, got {}in x {}in",
                self.width_in, self.height_in
            )));
        }
        if !finite_positive(self.dpi) {
            return Err(ConfigError::Invalid(format!("dpi must be positive, got {}", self.dpi)));
        }
        let (w, h) = ((self.width_in * self.dpi).round(), (self.height_in * self.dpi).round());
        if w < 1.0 || h < 1.0 {
            return Err(ConfigError::Invalid(format!("thumbnail rounds to {}x{} pixels", w, h)));
        }
        let max_side = MAX_THUMBNAIL_SIDE as f64;
        if w > max_side || h > max_side {
            return Err(ConfigError::Invalid(format!(
                "thumbnail of {}x{} pixels exceeds {} pixels per side",
                w, h, MAX_THUMBNAIL_SIDE
            )));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Invalid(format!(
                "quality must be between 1 and 100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

/// Largest thumbnail side accepted from configuration
pub const MAX_THUMBNAIL_SIDE: u32 = 4096;

/// Where a source image lands when scaled to cover the target canvas
///
/// The source is scaled to `draw_width x draw_height` (at least as large
/// as the target on both axes, equal on the constraining one), then the
/// target-sized window starting at `(crop_x, crop_y)` is kept.
///
/// The same result in source coordinates is the centered window
/// `(src_x, src_y, src_width, src_height)` with the target aspect ratio;
/// cropping that first keeps the pixel work bounded by source and target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverFit {
    pub draw_width: u32,
    pub draw_height: u32,
    pub crop_x: u32,
    pub crop_y: u32,
    pub src_x: u32,
    pub src_y: u32,
    pub src_width: u32,
    pub src_height: u32,
}

impl CoverFit {
    /// Plan the scale and centered crop; `None` when either side is empty
    pub fn plan(src_width: u32, src_height: u32, target_width: u32, target_height: u32) -> Option<Self> {
        if src_width == 0 || src_height == 0 || target_width == 0 || target_height == 0 {
            return None;
        }

        let source_aspect = src_width as f64 / src_height as f64;
        let target_aspect = target_width as f64 / target_height as f64;

        let (draw_width, draw_height, src_window_width, src_window_height) = if source_aspect > target_aspect {
            // Wider than the target: match height, overflow horizontally
            let w = (target_height as f64 * source_aspect).round() as u32;
            let window = (src_height as f64 * target_aspect).round() as u32;
            (w.max(target_width), target_height, window.clamp(1, src_width), src_height)
        } else {
            // Taller (or equal): match width, overflow vertically
            let h = (target_width as f64 / source_aspect).round() as u32;
            let window = (src_width as f64 / target_aspect).round() as u32;
            (target_width, h.max(target_height), src_width, window.clamp(1, src_height))
        };

        Some(Self {
            draw_width,
            draw_height,
            crop_x: (draw_width - target_width) / 2,
            crop_y: (draw_height - target_height) / 2,
            src_x: (src_width - src_window_width) / 2,
            src_y: (src_height - src_window_height) / 2,
            src_width: src_window_width,
            src_height: src_window_height,
        })
    }
}
