//! WASM-compatible wrapper types for image data.

use photopass_core::buffer::PixelBuffer;
use wasm_bindgen::prelude::*;

/// An RGB image held in WASM memory.
///
/// `pixels()` copies the data out to a JavaScript `Uint8Array`; keep images
/// in WASM memory between calls where possible.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create an image from dimensions and RGB pixel data
    /// (3 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Build an image from canvas `ImageData` bytes (RGBA), dropping alpha.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> JsPixelBuffer {
        let pixels = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        JsPixelBuffer {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// RGB pixel data as a `Uint8Array` (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// RGBA pixel data (alpha 255) for `ImageData` / canvas display.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            pixels: buffer.pixels,
        }
    }

    /// Copy into a core buffer. `None` if the data does not match the
    /// dimensions.
    pub(crate) fn to_buffer(&self) -> Option<PixelBuffer> {
        let buffer = PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        };
        buffer.is_consistent().then_some(buffer)
    }
}

/// Map any displayable error to a JavaScript string value.
pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_round_trip() {
        let core = PixelBuffer::filled(4, 3, [1, 2, 3]);
        let js = JsPixelBuffer::from_buffer(core.clone());
        assert_eq!((js.width(), js.height()), (4, 3));
        assert_eq!(js.byte_length(), 36);
        assert_eq!(js.to_buffer(), Some(core));
    }

    #[test]
    fn test_inconsistent_buffer_rejected() {
        let js = JsPixelBuffer::new(10, 10, vec![0; 7]);
        assert!(js.to_buffer().is_none());
    }

    #[test]
    fn test_rgba_conversion() {
        let js = JsPixelBuffer::from_rgba(2, 1, &[10, 20, 30, 0, 40, 50, 60, 128]);
        assert_eq!(js.pixels(), vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(js.to_rgba(), vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }
}
