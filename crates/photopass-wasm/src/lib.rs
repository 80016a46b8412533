//! Photopass WASM - WebAssembly bindings for the document photo engine
//!
//! Exposes the synchronous engine to the browser editor: catalog lookup,
//! the interactive viewport with live feedback, commit, print sheet
//! composition and the image codecs. Oracle calls are made by the host
//! through the service crate, not from WASM.
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsViewport, commit_photo, compose_sheet } from '@photopass/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const viewport = new JsViewport('GB', 'passport');
//! const feedback = viewport.set_zoom(1.8);
//! console.log(feedback.head_size_message);
//!
//! const photo = commit_photo(image, viewport, 2);
//! const sheet = compose_sheet(photo, 1800, 1200);
//! ```

use wasm_bindgen::prelude::*;

mod catalog;
mod decode;
mod encode;
mod transform;
mod types;
mod viewport;

pub use catalog::{list_countries, lookup_requirements, JsRequirements};
pub use decode::{decode_image, image_orientation};
pub use encode::{encode_jpeg, encode_jpeg_from_image, encode_png_from_image, mime_type_for};
pub use transform::{commit_photo, compose_sheet, sheet_tile_count};
pub use types::JsPixelBuffer;
pub use viewport::{estimate_feedback, JsFeedback, JsViewport};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&JsValue::from_str("photopass wasm initialized"));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
