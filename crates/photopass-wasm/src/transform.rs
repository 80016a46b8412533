//! Commit and print sheet bindings.
//!
//! Both run synchronously on the calling thread; call them from a Web Worker
//! for full-size images.

use photopass_core::sheet::{self, compose};
use photopass_core::transform::{commit_with, FinalPhoto, ResampleFilter, TransformConfig};
use wasm_bindgen::prelude::*;

use crate::catalog::JsRequirements;
use crate::types::{js_error, JsPixelBuffer};
use crate::viewport::JsViewport;

const INCONSISTENT_IMAGE: &str = "pixel data length does not match image dimensions";

/// Crop `image` as framed by `viewport` into the document's fixed
/// resolution.
///
/// `filter`: 0 = nearest, 1 = bilinear, 2 = lanczos3 (default).
///
/// ```typescript
/// const photo = commit_photo(normalized, viewport, 2);
/// ```
#[wasm_bindgen]
pub fn commit_photo(
    image: &JsPixelBuffer,
    viewport: &JsViewport,
    filter: u8,
) -> Result<JsPixelBuffer, JsValue> {
    let source = image.to_buffer().ok_or_else(|| js_error(INCONSISTENT_IMAGE))?;
    let config = TransformConfig {
        filter: ResampleFilter::from_code(filter),
        ..TransformConfig::default()
    };
    let photo = commit_with(
        &config,
        &source,
        viewport.requirements().requirements(),
        viewport.state(),
    );
    Ok(JsPixelBuffer::from_buffer(photo.into_buffer()))
}

/// Tile a committed photo onto a white `sheet_width` x `sheet_height` sheet.
///
/// A photo larger than the sheet yields a blank sheet.
#[wasm_bindgen]
pub fn compose_sheet(
    photo: &JsPixelBuffer,
    sheet_width: u32,
    sheet_height: u32,
) -> Result<JsPixelBuffer, JsValue> {
    let buffer = photo.to_buffer().ok_or_else(|| js_error(INCONSISTENT_IMAGE))?;
    let photo = FinalPhoto::from_buffer(buffer).ok_or_else(|| js_error("photo is empty"))?;
    let sheet = compose(&photo, sheet_width, sheet_height);
    Ok(JsPixelBuffer::from_buffer(sheet.into_buffer()))
}

/// Number of whole tiles of the committed photo that fit on the default sheet.
#[wasm_bindgen]
pub fn sheet_tile_count(requirements: &JsRequirements) -> u32 {
    sheet::layout(
        requirements.output_width(),
        requirements.output_height(),
        sheet::SHEET_WIDTH,
        sheet::SHEET_HEIGHT,
    )
    .tile_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find;
    use photopass_core::buffer::PixelBuffer;

    fn viewport(country: &str, doc: &str) -> JsViewport {
        let mut vp = JsViewport::with_requirements(find(country, doc).unwrap());
        vp.set_zoom(2.0);
        vp
    }

    #[test]
    fn test_commit_photo_size() {
        let image = JsPixelBuffer::from_buffer(PixelBuffer::filled(120, 160, [5, 6, 7]));
        let photo = commit_photo(&image, &viewport("CA", "passport"), 0).unwrap();
        assert_eq!((photo.width(), photo.height()), (600, 840));
    }

    #[test]
    fn test_compose_sheet_size() {
        let photo = JsPixelBuffer::from_buffer(PixelBuffer::filled(600, 600, [0, 0, 0]));
        let sheet = compose_sheet(&photo, 1800, 1200).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (1800, 1200));
        assert_eq!(sheet.pixels()[0], 0);
    }

    #[test]
    fn test_sheet_tile_count() {
        assert_eq!(sheet_tile_count(&find("US", "passport_visa").unwrap()), 6);
        assert_eq!(sheet_tile_count(&find("GB", "passport").unwrap()), 3);
    }
}
