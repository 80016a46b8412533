//! Image encoding bindings for download and print.

use photopass_core::encode::{self, OutputFormat};
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsPixelBuffer};

/// Encode RGB pixel data to JPEG bytes. `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(js_error)
}

/// Encode an image to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsPixelBuffer, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode_jpeg(&image.pixels(), image.width(), image.height(), quality)
}

/// Encode an image to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&image.pixels(), image.width(), image.height()).map_err(js_error)
}

/// MIME type for a format name (`"jpeg"` or `"png"`); JPEG otherwise.
#[wasm_bindgen]
pub fn mime_type_for(format: &str) -> String {
    let format = if format.eq_ignore_ascii_case("png") {
        OutputFormat::Png
    } else {
        OutputFormat::default()
    };
    format.mime_type().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use photopass_core::buffer::PixelBuffer;

    #[test]
    fn test_encode_jpeg_from_image() {
        let image = JsPixelBuffer::from_buffer(PixelBuffer::filled(16, 16, [128, 64, 32]));
        let jpeg = encode_jpeg_from_image(&image, 95).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_png_from_image() {
        let image = JsPixelBuffer::from_buffer(PixelBuffer::filled(3, 3, [1, 1, 1]));
        let png = encode_png_from_image(&image).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for("PNG"), "image/png");
        assert_eq!(mime_type_for("jpeg"), "image/jpeg");
        assert_eq!(mime_type_for("webp"), "image/jpeg");
    }
}
