//! Resampling to an exact output size using the `image` crate's filters.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;

/// Interpolation filter used when scaling the cropped region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Nearest => image::imageops::FilterType::Nearest,
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }

    /// Map a numeric code (0 = nearest, 1 = bilinear, 2 = lanczos3).
    /// Unknown codes fall back to the default.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => ResampleFilter::Nearest,
            1 => ResampleFilter::Bilinear,
            2 => ResampleFilter::Lanczos3,
            _ => ResampleFilter::default(),
        }
    }
}

/// Resample `image` to exactly `width` x `height`.
///
/// Returns `None` when a target dimension is zero or the source buffer is
/// inconsistent.
pub fn resample(
    image: PixelBuffer,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Option<PixelBuffer> {
    if width == 0 || height == 0 || image.is_empty() {
        return None;
    }

    // Fast path: already the right size
    if image.width == width && image.height == height {
        return image.is_consistent().then_some(image);
    }

    let rgb = image::RgbImage::from_raw(image.width, image.height, image.pixels)?;
    let resized = image::imageops::resize(&rgb, width, height, filter.to_image_filter());
    Some(PixelBuffer::from_rgb_image(resized))
}
