//! Interactive pan/zoom state for one edit session.
//!
//! The state is a plain value mutated through discrete commands
//! ([`ViewportState::set_zoom`], [`ViewportState::pan_by`]). Pointer capture
//! and drag tracking belong to whatever UI drives it, so both the estimator
//! and the transform engine can be exercised without a rendering surface.

use serde::{Deserialize, Serialize};

/// Smallest permitted zoom (no magnification).
pub const MIN_ZOOM: f64 = 1.0;
/// Largest permitted zoom.
pub const MAX_ZOOM: f64 = 3.0;

/// Pan offset in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pan {
    pub x: f64,
    pub y: f64,
}

impl Pan {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Replace non-finite components with 0.
    pub fn sanitized(self) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            x: finite(self.x),
            y: finite(self.y),
        }
    }
}

/// Zoom and pan of the crop preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportState {
    zoom: f64,
    pan: Pan,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            pan: Pan::default(),
        }
    }
}

impl ViewportState {
    /// Create a state, clamping zoom into `[MIN_ZOOM, MAX_ZOOM]` and
    /// zeroing non-finite pan components.
    pub fn new(zoom: f64, pan: Pan) -> Self {
        let mut state = Self::default();
        state.set_zoom(zoom);
        state.pan = pan.sanitized();
        state
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Pan {
        self.pan
    }

    /// Set the zoom, clamped into `[MIN_ZOOM, MAX_ZOOM]`. NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Move the pan offset by `(dx, dy)`. Non-finite deltas are ignored.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() {
            self.pan.x += dx;
        }
        if dy.is_finite() {
            self.pan.y += dy;
        }
    }

    /// Return to zoom 1 and no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Crop description as sent by the upstream editor:
/// `{"zoom": 1.4, "position": {"x": 0, "y": -20}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropData {
    pub zoom: f64,
    pub position: Pan,
}

impl From<CropData> for ViewportState {
    fn from(crop: CropData) -> Self {
        ViewportState::new(crop.zoom, crop.position)
    }
}

impl From<ViewportState> for CropData {
    fn from(state: ViewportState) -> Self {
        CropData {
            zoom: state.zoom,
            position: state.pan,
        }
    }
}
