//! Viewport-to-source region mapping.
//!
//! The editor shows the normalized photo inside a reference viewport whose
//! width is fixed ([`REFERENCE_VIEWPORT_WIDTH`]) and whose height follows the
//! document's aspect ratio. For each axis:
//!
//! ```text
//! scale  = image_dim / (viewport_dim * zoom)
//! origin = (viewport_dim / 2 - pan) * scale
//! extent = viewport_dim * scale
//! ```
//!
//! A rectangle that leaves the image is clamped: the extent is limited to the
//! image size and the origin is shifted back inside. The result is always a
//! valid, non-empty pixel rectangle, even for out-of-range pan or zoom.

use crate::catalog::DocumentRequirements;
use crate::viewport::{Pan, ViewportState, MAX_ZOOM, MIN_ZOOM};

/// Width of the on-screen reference viewport, in viewport pixels.
pub const REFERENCE_VIEWPORT_WIDTH: f64 = 500.0;

/// A rectangle in source-image pixel space, fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A whole-pixel rectangle inside the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The source area a commit samples from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRegion {
    /// Rectangle implied by the viewport, before clamping.
    pub requested: CropRect,
    /// Rectangle actually sampled.
    pub pixels: PixelRect,
    /// True when `requested` had to be moved or shrunk to fit the image.
    pub clamped: bool,
}

/// Reference viewport size `(width, height)` for a document.
pub fn viewport_size(requirements: &DocumentRequirements, reference_width: f64) -> (f64, f64) {
    let width = if reference_width.is_finite() && reference_width > 0.0 {
        reference_width
    } else {
        REFERENCE_VIEWPORT_WIDTH
    };
    (width, width / requirements.aspect_ratio())
}

/// Compute the source rectangle for an image of `image_width` x
/// `image_height` pixels.
///
/// Both image dimensions must be non-zero.
pub fn source_region(
    image_width: u32,
    image_height: u32,
    requirements: &DocumentRequirements,
    viewport: &ViewportState,
    reference_width: f64,
) -> SourceRegion {
    let (vw, vh) = viewport_size(requirements, reference_width);
    let zoom = sanitize_zoom(viewport.zoom());
    let pan = viewport.pan().sanitized();

    let requested = requested_rect(image_width as f64, image_height as f64, vw, vh, zoom, pan);
    let pixels = clamp_to_image(&requested, image_width, image_height);

    let clamped = requested.x < 0.0
        || requested.y < 0.0
        || requested.x + requested.width > image_width as f64
        || requested.y + requested.height > image_height as f64;

    SourceRegion {
        requested,
        pixels,
        clamped,
    }
}

fn sanitize_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        MIN_ZOOM
    } else {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

fn requested_rect(img_w: f64, img_h: f64, vw: f64, vh: f64, zoom: f64, pan: Pan) -> CropRect {
    let scale_x = img_w / (vw * zoom);
    let scale_y = img_h / (vh * zoom);

    CropRect {
        x: (vw / 2.0 - pan.x) * scale_x,
        y: (vh / 2.0 - pan.y) * scale_y,
        width: vw * scale_x,
        height: vh * scale_y,
    }
}

/// Shrink then shift `rect` so it lies inside the image, rounding to whole
/// pixels. Minimum size is 1x1.
fn clamp_to_image(rect: &CropRect, image_width: u32, image_height: u32) -> PixelRect {
    let (x, width) = clamp_axis(rect.x, rect.width, image_width);
    let (y, height) = clamp_axis(rect.y, rect.height, image_height);
    PixelRect {
        x,
        y,
        width,
        height,
    }
}

fn clamp_axis(origin: f64, extent: f64, limit: u32) -> (u32, u32) {
    let limit = limit.max(1);
    let extent = if extent.is_finite() {
        (extent.round().max(1.0) as u32).min(limit)
    } else {
        limit
    };
    let max_origin = limit - extent;
    let origin = if origin.is_finite() {
        origin.round().clamp(0.0, max_origin as f64) as u32
    } else {
        0
    };
    (origin, extent)
}
