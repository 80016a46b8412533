//! Requirements catalog bindings.

use photopass_core::catalog::{self, DocumentRequirements};
use photopass_core::transform::BASE_OUTPUT_WIDTH;
use wasm_bindgen::prelude::*;

use crate::types::js_error;

/// Requirements for one document type, as seen by the editor.
#[wasm_bindgen]
pub struct JsRequirements {
    inner: &'static DocumentRequirements,
}

#[wasm_bindgen]
impl JsRequirements {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.inner.name.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn width_mm(&self) -> u32 {
        self.inner.width_mm
    }

    #[wasm_bindgen(getter)]
    pub fn height_mm(&self) -> u32 {
        self.inner.height_mm
    }

    /// Width / height; the editor frames its viewport with this.
    #[wasm_bindgen(getter)]
    pub fn aspect_ratio(&self) -> f64 {
        self.inner.aspect_ratio()
    }

    #[wasm_bindgen(getter)]
    pub fn head_min_percent(&self) -> f64 {
        self.inner.head_height_percent.min
    }

    #[wasm_bindgen(getter)]
    pub fn head_max_percent(&self) -> f64 {
        self.inner.head_height_percent.max
    }

    #[wasm_bindgen(getter)]
    pub fn background_color(&self) -> String {
        self.inner.background_color.to_string()
    }

    /// Ordered rule list.
    pub fn rules(&self) -> Vec<String> {
        self.inner.rules.iter().map(|r| r.to_string()).collect()
    }

    /// Pixel width of the committed photo.
    #[wasm_bindgen(getter)]
    pub fn output_width(&self) -> u32 {
        self.inner.output_dimensions(BASE_OUTPUT_WIDTH).0
    }

    /// Pixel height of the committed photo.
    #[wasm_bindgen(getter)]
    pub fn output_height(&self) -> u32 {
        self.inner.output_dimensions(BASE_OUTPUT_WIDTH).1
    }
}

impl JsRequirements {
    pub(crate) fn requirements(&self) -> &'static DocumentRequirements {
        self.inner
    }
}

pub(crate) fn find(country: &str, document_type: &str) -> Result<JsRequirements, catalog::CatalogError> {
    catalog::lookup(country, document_type).map(|inner| JsRequirements { inner })
}

/// Look up the requirements for a country and document type.
///
/// ```typescript
/// const req = lookup_requirements('GB', 'passport');
/// console.log(`${req.name}: ${req.output_width}x${req.output_height}`);
/// ```
#[wasm_bindgen]
pub fn lookup_requirements(country: &str, document_type: &str) -> Result<JsRequirements, JsValue> {
    find(country, document_type).map_err(js_error)
}

/// The whole catalog as a plain JavaScript object tree.
#[wasm_bindgen]
pub fn list_countries() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(catalog::countries()).map_err(js_error)
}
