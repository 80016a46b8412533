//! Final crop: viewport state + requirements -> fixed-resolution photo.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::buffer::PixelBuffer;
use crate::catalog::DocumentRequirements;
use crate::viewport::ViewportState;

use super::extract::extract;
use super::region::{source_region, REFERENCE_VIEWPORT_WIDTH};
use super::resample::{resample, ResampleFilter};

/// Fixed output width; height follows the document aspect ratio.
pub const BASE_OUTPUT_WIDTH: u32 = 600;

/// Fill color used when there are no source pixels to sample.
pub const BLANK_RGB: [u8; 3] = [255, 255, 255];

/// Knobs for [`commit_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Output width in pixels.
    pub base_width: u32,
    /// Width of the editor's reference viewport.
    pub reference_viewport_width: f64,
    pub filter: ResampleFilter,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            base_width: BASE_OUTPUT_WIDTH,
            reference_viewport_width: REFERENCE_VIEWPORT_WIDTH,
            filter: ResampleFilter::default(),
        }
    }
}

/// The committed single photo. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalPhoto {
    buffer: PixelBuffer,
}

impl FinalPhoto {
    /// Wrap an already-cropped buffer, e.g. one handed back by a UI layer.
    ///
    /// Returns `None` for an empty or inconsistent buffer.
    pub fn from_buffer(buffer: PixelBuffer) -> Option<Self> {
        (!buffer.is_empty() && buffer.is_consistent()).then_some(Self { buffer })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width
    }

    pub fn height(&self) -> u32 {
        self.buffer.height
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }
}

/// Crop `image` as framed by `viewport` with the default configuration.
pub fn commit(
    image: &PixelBuffer,
    requirements: &DocumentRequirements,
    viewport: &ViewportState,
) -> FinalPhoto {
    commit_with(&TransformConfig::default(), image, requirements, viewport)
}

/// Crop `image` as framed by `viewport`.
///
/// Never fails: an out-of-range viewport is clamped to the image bounds, and
/// an empty or malformed source yields a blank photo. The output size depends
/// only on `requirements` and `config.base_width`.
pub fn commit_with(
    config: &TransformConfig,
    image: &PixelBuffer,
    requirements: &DocumentRequirements,
    viewport: &ViewportState,
) -> FinalPhoto {
    let (out_width, out_height) = requirements.output_dimensions(config.base_width);
    let blank = || FinalPhoto {
        buffer: PixelBuffer::filled(out_width, out_height, BLANK_RGB),
    };

    if image.is_empty() || !image.is_consistent() {
        warn!(
            width = image.width,
            height = image.height,
            "source image has no usable pixels; committing blank photo"
        );
        return blank();
    }

    let region = source_region(
        image.width,
        image.height,
        requirements,
        viewport,
        config.reference_viewport_width,
    );
    if region.clamped {
        debug!(
            requested = ?region.requested,
            sampled = ?region.pixels,
            "crop rectangle clamped to image bounds"
        );
    }

    let Some(cropped) = extract(image, &region.pixels) else {
        return blank();
    };
    match resample(cropped, out_width, out_height, config.filter) {
        Some(buffer) => FinalPhoto { buffer },
        None => blank(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::lookup;
    use crate::viewport::Pan;

    /// Left half black, right half white.
    fn split_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..height {
            for x in 0..width {
                let v = if x < width / 2 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_output_size_square_document() {
        let req = lookup("US", "passport_visa").unwrap();
        let img = PixelBuffer::filled(1200, 900, [10, 20, 30]);
        let photo = commit(&img, req, &ViewportState::default());
        assert_eq!((photo.width(), photo.height()), (600, 600));
        assert!(photo.buffer().is_consistent());
    }

    #[test]
    fn test_output_size_portrait_document() {
        let req = lookup("GB", "passport").unwrap();
        let img = PixelBuffer::filled(64, 64, [0, 0, 0]);
        let photo = commit(&img, req, &ViewportState::new(2.0, Pan::new(30.0, 30.0)));
        assert_eq!((photo.width(), photo.height()), (600, 771));
    }

    #[test]
    fn test_output_independent_of_viewport() {
        let req = lookup("CA", "passport").unwrap();
        let img = PixelBuffer::filled(300, 400, [1, 2, 3]);
        let a = commit(&img, req, &ViewportState::new(1.0, Pan::default()));
        let b = commit(&img, req, &ViewportState::new(3.0, Pan::new(-400.0, 900.0)));
        assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    }

    fn nearest() -> TransformConfig {
        TransformConfig {
            filter: ResampleFilter::Nearest,
            ..Default::default()
        }
    }

    #[test]
    fn test_zoom_three_samples_left_of_center() {
        // scale = 400 / 1500; region x spans [67, 200): the black half.
        let req = lookup("US", "passport_visa").unwrap();
        let img = split_image(400, 400);
        let photo = commit_with(&nearest(), &img, req, &ViewportState::new(3.0, Pan::default()));
        assert_eq!(photo.buffer().pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(photo.buffer().pixel(599, 599), Some([0, 0, 0]));
    }

    #[test]
    fn test_negative_pan_moves_region_right() {
        // Pan of -500 moves the origin to x = 200: the white half.
        let req = lookup("US", "passport_visa").unwrap();
        let img = split_image(400, 400);
        let vp = ViewportState::new(3.0, Pan::new(-500.0, 0.0));
        let photo = commit_with(&nearest(), &img, req, &vp);
        assert_eq!(photo.buffer().pixel(0, 0), Some([255, 255, 255]));
        assert_eq!(photo.buffer().pixel(599, 300), Some([255, 255, 255]));
    }

    #[test]
    fn test_empty_source_gives_blank_photo() {
        let req = lookup("JP", "passport_visa").unwrap();
        let img = PixelBuffer::new(0, 0, vec![]);
        let photo = commit(&img, req, &ViewportState::default());
        assert_eq!((photo.width(), photo.height()), (600, 771));
        assert_eq!(photo.buffer().pixel(0, 0), Some(BLANK_RGB));
    }

    #[test]
    fn test_custom_base_width() {
        let req = lookup("CN", "passport").unwrap();
        let img = PixelBuffer::filled(50, 50, [9, 9, 9]);
        let config = TransformConfig {
            base_width: 330,
            ..Default::default()
        };
        let photo = commit_with(&config, &img, req, &ViewportState::default());
        assert_eq!((photo.width(), photo.height()), (330, 480));
    }

    #[test]
    fn test_commit_is_deterministic() {
        let req = lookup("DE", "passport_visa").unwrap();
        let img = split_image(123, 77);
        let vp = ViewportState::new(1.37, Pan::new(-12.5, 40.25));
        assert_eq!(commit(&img, req, &vp), commit(&img, req, &vp));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::countries;
    use crate::viewport::Pan;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        /// Property: commit never fails and always has the exact document size.
        #[test]
        fn prop_commit_exact_resolution(
            (w, h) in (1u32..=64, 1u32..=64),
            zoom in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), -5.0f64..8.0],
            (px, py) in (
                prop_oneof![Just(f64::NAN), Just(f64::NEG_INFINITY), -1.0e7f64..1.0e7],
                -1.0e7f64..1.0e7,
            ),
            doc_idx in 0usize..10,
        ) {
            let docs: Vec<_> = countries().iter().flat_map(|c| c.document_types()).collect();
            let req = &docs[doc_idx % docs.len()].requirements;
            let img = PixelBuffer::filled(w, h, [40, 80, 120]);

            let mut vp = ViewportState::default();
            vp.set_zoom(zoom);
            vp.pan_by(px, py);

            let config = TransformConfig { filter: ResampleFilter::Nearest, ..Default::default() };
            let photo = commit_with(&config, &img, req, &vp);
            let (ew, eh) = req.output_dimensions(BASE_OUTPUT_WIDTH);

            prop_assert_eq!(photo.width(), ew);
            prop_assert_eq!(photo.height(), eh);
            prop_assert!(photo.buffer().is_consistent());
        }
    }
}
