//! Source image decoding.
//!
//! Accepts the encoded bytes of an uploaded photo (JPEG or PNG, detected from
//! the content), applies the EXIF orientation so the pixels are upright, and
//! returns an RGB [`PixelBuffer`](crate::buffer::PixelBuffer).
//!
//! # Examples
//!
//! ```ignore
//! use photopass_core::decode::decode_image;
//!
//! let bytes = std::fs::read("portrait.jpg")?;
//! let image = decode_image(&bytes)?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, get_orientation};
pub use types::{DecodeError, Orientation};
