//! RGB pixel buffer shared by the transform engine, the sheet composer and
//! the codecs.

/// Bytes per RGB8 pixel.
pub const CHANNELS: usize = 3;

/// An owned RGB image in row-major order (3 bytes per pixel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB pixel data. Length is `width * height * 3`.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            expected_len(width, height),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer of the given size filled with one color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(expected_len(width, height))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Borrow the buffer as an `image::RgbImage` view for the `image` crate's
    /// operations. Returns `None` if the pixel data length is inconsistent.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// RGB value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = self.pixels.get(idx..idx + CHANNELS)?;
        Some([px[0], px[1], px[2]])
    }

    /// Byte length of one row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Check if this buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// True when the pixel data length matches the dimensions.
    pub fn is_consistent(&self) -> bool {
        self.pixels.len() == expected_len(self.width, self.height)
    }
}

pub(crate) fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_buffer() {
        let buf = PixelBuffer::filled(4, 2, [10, 20, 30]);
        assert_eq!(buf.pixels.len(), 4 * 2 * 3);
        assert_eq!(buf.pixel(3, 1), Some([10, 20, 30]));
        assert!(buf.is_consistent());
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let buf = PixelBuffer::filled(2, 2, [0, 0, 0]);
        assert_eq!(buf.pixel(2, 0), None);
        assert_eq!(buf.pixel(0, 2), None);
    }

    #[test]
    fn test_rgb_image_round_trip_dimensions() {
        let buf = PixelBuffer::filled(7, 3, [1, 2, 3]);
        let img = buf.to_rgb_image().unwrap();
        assert_eq!(img.dimensions(), (7, 3));
        let back = PixelBuffer::from_rgb_image(img);
        assert_eq!(back, buf);
    }

    #[test]
    fn test_inconsistent_buffer_has_no_rgb_view() {
        let buf = PixelBuffer {
            width: 10,
            height: 10,
            pixels: vec![0; 12],
        };
        assert!(!buf.is_consistent());
        assert!(buf.to_rgb_image().is_none());
    }

    #[test]
    fn test_empty_buffer() {
        assert!(PixelBuffer::filled(0, 5, [0, 0, 0]).is_empty());
        assert!(!PixelBuffer::filled(1, 1, [0, 0, 0]).is_empty());
    }
}
