//! Interactive viewport and live feedback bindings.
//!
//! The editor owns one [`JsViewport`] per session and calls `set_zoom` /
//! `pan_by` from its gesture handlers; each call returns fresh feedback.

use photopass_core::feedback::{estimate, Feedback, SignalStatus};
use photopass_core::viewport::{Pan, ViewportState, MAX_ZOOM, MIN_ZOOM};
use wasm_bindgen::prelude::*;

use crate::catalog::{find, JsRequirements};
use crate::types::js_error;

/// Live compliance estimate.
#[wasm_bindgen]
pub struct JsFeedback {
    inner: Feedback,
}

#[wasm_bindgen]
impl JsFeedback {
    #[wasm_bindgen(getter)]
    pub fn head_percent(&self) -> f64 {
        self.inner.head_percent
    }

    #[wasm_bindgen(getter)]
    pub fn head_size_pass(&self) -> bool {
        self.inner.head_size.passed()
    }

    #[wasm_bindgen(getter)]
    pub fn head_size_message(&self) -> String {
        self.inner.head_size.message.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn centering_pass(&self) -> bool {
        self.inner.centering.passed()
    }

    #[wasm_bindgen(getter)]
    pub fn centering_message(&self) -> String {
        self.inner.centering.message.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn overall_pass(&self) -> bool {
        self.inner.overall() == SignalStatus::Pass
    }
}

/// Zoom and pan state for one edit session.
#[wasm_bindgen]
pub struct JsViewport {
    state: ViewportState,
    requirements: JsRequirements,
}

#[wasm_bindgen]
impl JsViewport {
    #[wasm_bindgen(constructor)]
    pub fn new(country: &str, document_type: &str) -> Result<JsViewport, JsValue> {
        let requirements = find(country, document_type).map_err(js_error)?;
        Ok(JsViewport::with_requirements(requirements))
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.state.zoom()
    }

    #[wasm_bindgen(getter)]
    pub fn pan_x(&self) -> f64 {
        self.state.pan().x
    }

    #[wasm_bindgen(getter)]
    pub fn pan_y(&self) -> f64 {
        self.state.pan().y
    }

    pub fn min_zoom() -> f64 {
        MIN_ZOOM
    }

    pub fn max_zoom() -> f64 {
        MAX_ZOOM
    }

    pub fn set_zoom(&mut self, zoom: f64) -> JsFeedback {
        self.state.set_zoom(zoom);
        self.feedback()
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> JsFeedback {
        self.state.pan_by(dx, dy);
        self.feedback()
    }

    pub fn reset(&mut self) -> JsFeedback {
        self.state.reset();
        self.feedback()
    }

    pub fn feedback(&self) -> JsFeedback {
        JsFeedback {
            inner: estimate(
                self.state.zoom(),
                self.state.pan(),
                self.requirements.requirements(),
            ),
        }
    }
}

impl JsViewport {
    pub(crate) fn with_requirements(requirements: JsRequirements) -> Self {
        Self {
            state: ViewportState::default(),
            requirements,
        }
    }

    pub(crate) fn state(&self) -> &ViewportState {
        &self.state
    }

    pub(crate) fn requirements(&self) -> &JsRequirements {
        &self.requirements
    }
}

/// One-shot estimate without a viewport object.
#[wasm_bindgen]
pub fn estimate_feedback(
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    requirements: &JsRequirements,
) -> JsFeedback {
    JsFeedback {
        inner: estimate(zoom, Pan::new(pan_x, pan_y), requirements.requirements()),
    }
}
