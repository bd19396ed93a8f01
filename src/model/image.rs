//! Extracted image resources.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// An image extracted from the source document, in media order.
///
/// The flow engine only reads the natural dimensions to compute a draw
/// size; it never touches the bytes. Images are borrowed for the duration
/// of one conversion and do not outlive it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// Raw image bytes
    #[serde(default, skip_serializing)]
    pub data: Vec<u8>,

    /// Natural width in pixels
    pub width: u32,

    /// Natural height in pixels
    pub height: u32,

    /// MIME type (e.g. "image/png")
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl Image {
    /// Create an image with known dimensions.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        let mime_type = Self::detect_mime_type(&data).map(str::to_string);
        Self {
            data,
            width,
            height,
            mime_type,
        }
    }

    /// Create an image by probing raw bytes for their dimensions.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let reader = image::ImageReader::new(Cursor::new(&data))
            .with_guessed_format()
            .map_err(|e| Error::ImageDecode(e.to_string()))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| Error::ImageDecode(e.to_string()))?;
        Ok(Self::new(data, width, height))
    }

    /// Detect MIME type from magic bytes.
    pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
        if data.len() < 8 {
            return None;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some("image/jpeg");
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some("image/png");
        }

        // GIF: GIF87a or GIF89a
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some("image/gif");
        }

        None
    }

    /// Compute the draw size fitting within the given bounds.
    ///
    /// `scale = min(max_width / natural_width, max_height / natural_height, 1.0)`:
    /// images are only ever shrunk, never upscaled, and aspect ratio is
    /// preserved. Degenerate (zero-dimension) images map to a zero draw
    /// size; the interleaver skips them.
    pub fn scaled_to_fit(&self, max_width: f32, max_height: f32) -> (f32, f32) {
        if self.width == 0 || self.height == 0 {
            return (0.0, 0.0);
        }
        let scale = (max_width / self.width as f32)
            .min(max_height / self.height as f32)
            .min(1.0);
        (self.width as f32 * scale, self.height as f32 * scale)
    }

    /// Get the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mime_type() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(Image::detect_mime_type(&jpeg), Some("image/jpeg"));

        let png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(Image::detect_mime_type(&png), Some("image/png"));

        let unknown = vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        assert_eq!(Image::detect_mime_type(&unknown), None);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = Image::from_bytes(vec![0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(Error::ImageDecode(_))));
    }

    #[test]
    fn test_scaled_to_fit_shrinks() {
        let img = Image::new(Vec::new(), 1600, 1200);
        let (w, h) = img.scaled_to_fit(288.0, 216.0);
        assert!(w <= 288.0 && h <= 216.0);

        // Aspect ratio preserved within rounding tolerance.
        let input_ratio = 1600.0 / 1200.0;
        assert!((w / h - input_ratio).abs() < 0.01);
    }

    #[test]
    fn test_scaled_to_fit_never_upscales() {
        let img = Image::new(Vec::new(), 100, 50);
        assert_eq!(img.scaled_to_fit(288.0, 216.0), (100.0, 50.0));
    }

    #[test]
    fn test_scaled_to_fit_degenerate() {
        let img = Image::new(Vec::new(), 0, 50);
        assert_eq!(img.scaled_to_fit(288.0, 216.0), (0.0, 0.0));
    }
}
