//! Output encoding for the final photo and the print sheet.
//!
//! Both artifacts leave the engine as encoded bytes with a MIME type so the
//! service layer can wrap them as inline payloads.
//!
//! ```ignore
//! use photopass_core::encode::{encode, OutputFormat};
//!
//! let encoded = encode(photo.buffer(), OutputFormat::default())?;
//! assert_eq!(encoded.mime_type, "image/jpeg");
//! ```

mod jpeg;
mod png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{expected_len, PixelBuffer};

pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Target container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum OutputFormat {
    /// Baseline JPEG; quality is clamped to 1-100.
    Jpeg { quality: u8 },
    Png,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

/// Encoded bytes plus the MIME type they were written as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// Encode `buffer` in the requested format.
pub fn encode(buffer: &PixelBuffer, format: OutputFormat) -> Result<EncodedImage, EncodeError> {
    let bytes = match format {
        OutputFormat::Jpeg { quality } => {
            encode_jpeg(&buffer.pixels, buffer.width, buffer.height, quality)?
        }
        OutputFormat::Png => encode_png(&buffer.pixels, buffer.width, buffer.height)?,
    };
    Ok(EncodedImage {
        bytes,
        mime_type: format.mime_type(),
    })
}

/// Shared dimension and length checks for every codec.
fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = expected_len(width, height);
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_is_jpeg_95() {
        assert_eq!(OutputFormat::default(), OutputFormat::Jpeg { quality: 95 });
    }

    #[test]
    fn test_encode_jpeg_mime() {
        let buf = PixelBuffer::filled(8, 8, [12, 34, 56]);
        let out = encode(&buf, OutputFormat::default()).unwrap();
        assert_eq!(out.mime_type, "image/jpeg");
        assert_eq!(&out.bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_png_mime() {
        let buf = PixelBuffer::filled(8, 8, [12, 34, 56]);
        let out = encode(&buf, OutputFormat::Png).unwrap();
        assert_eq!(out.mime_type, "image/png");
        assert_eq!(&out.bytes[1..4], b"PNG");
    }

    #[test]
    fn test_encode_rejects_mismatched_buffer() {
        let buf = PixelBuffer {
            width: 4,
            height: 4,
            pixels: vec![0; 10],
        };
        assert_eq!(
            encode(&buf, OutputFormat::Png),
            Err(EncodeError::InvalidPixelData {
                expected: 48,
                actual: 10
            })
        );
    }

    #[test]
    fn test_encode_rejects_empty_buffer() {
        let buf = PixelBuffer::new(0, 0, vec![]);
        assert!(matches!(
            encode(&buf, OutputFormat::default()),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_output_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Jpeg { quality: 80 }).unwrap();
        assert_eq!(json, r#"{"format":"jpeg","quality":80}"#);
        let png: OutputFormat = serde_json::from_str(r#"{"format":"png"}"#).unwrap();
        assert_eq!(png, OutputFormat::Png);
    }

    #[test]
    fn test_png_round_trip_through_decoder() {
        let buf = PixelBuffer::filled(5, 3, [200, 10, 90]);
        let out = encode(&buf, OutputFormat::Png).unwrap();
        let decoded = crate::decode::decode_image(&out.bytes).unwrap();
        assert_eq!(decoded, buf);
    }
}
