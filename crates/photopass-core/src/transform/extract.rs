//! Whole-pixel extraction of a source rectangle.
//!
//! Copies a [`PixelRect`] out of a [`PixelBuffer`] row by row. The rectangle
//! is clipped against the buffer first, so callers may pass any rectangle;
//! the result is at least 1x1 for a non-empty source.

use crate::buffer::{PixelBuffer, CHANNELS};

use super::region::PixelRect;

/// Copy `rect` out of `image`.
///
/// Returns `None` if `image` is empty or its pixel data does not match its
/// dimensions.
pub fn extract(image: &PixelBuffer, rect: &PixelRect) -> Option<PixelBuffer> {
    if image.is_empty() || !image.is_consistent() {
        return None;
    }

    let left = rect.x.min(image.width - 1);
    let top = rect.y.min(image.height - 1);
    let right = left.saturating_add(rect.width).min(image.width);
    let bottom = top.saturating_add(rect.height).min(image.height);

    let out_width = right.saturating_sub(left).max(1);
    let out_height = bottom.saturating_sub(top).max(1);

    // Full-frame fast path
    if left == 0 && top == 0 && out_width == image.width && out_height == image.height {
        return Some(image.clone());
    }

    let src_stride = image.stride();
    let row_len = out_width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_len * out_height as usize);

    for y in top..top + out_height {
        let start = y as usize * src_stride + left as usize * CHANNELS;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Some(PixelBuffer::new(out_width, out_height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
