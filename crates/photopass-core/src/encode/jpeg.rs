//! JPEG encoding at a configurable quality.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate, EncodeError};

/// Quality used for generated photos and print sheets.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Encode RGB pixel data to JPEG bytes.
///
/// `quality` is clamped to 1-100.
///
/// # Example
///
/// ```ignore
/// use photopass_core::encode::encode_jpeg;
///
/// let pixels = vec![128u8; 100 * 100 * 3];
/// let jpeg = encode_jpeg(&pixels, 100, 100, 95).unwrap();
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32) -> Vec<u8> {
        vec![128u8; (width * height * 3) as usize]
    }

    #[test]
    fn test_jpeg_markers() {
        let jpeg = encode_jpeg(&gray(600, 771), 600, 771, DEFAULT_JPEG_QUALITY).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_quality_is_clamped() {
        assert!(encode_jpeg(&gray(10, 10), 10, 10, 0).is_ok());
        assert!(encode_jpeg(&gray(10, 10), 10, 10, 255).is_ok());
    }

    #[test]
    fn test_short_pixel_data() {
        let result = encode_jpeg(&gray(99, 100), 100, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_zero_width() {
        let result = encode_jpeg(&[], 0, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_decodes_back_to_same_size() {
        let jpeg = encode_jpeg(&gray(31, 17), 31, 17, 80).unwrap();
        let decoded = crate::decode::decode_image(&jpeg).unwrap();
        assert_eq!((decoded.width, decoded.height), (31, 17));
    }
}
