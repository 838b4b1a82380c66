//! Embedded pictures.
//!
//! A `\pict` group carries its payload either as hex digit pairs or as a
//! `\bin` block, plus a handful of sizing keywords. The payload is kept
//! as raw bytes; nothing here decodes the image itself.

use serde::{Deserialize, Serialize};

/// Image format of a picture payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageType {
    /// Enhanced Metafile
    Emf,
    /// Windows Metafile
    Wmf,
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
    /// DIB (Device Independent Bitmap)
    Dib,
    /// Mac PICT format
    Pict,
    /// Unknown or unsupported format
    #[default]
    Unknown,
}

impl ImageType {
    /// Decode the byte value stored by the blip keywords (`\pngblip`, ...).
    #[inline]
    pub fn from_byte(value: u8) -> Self {
        match value {
            1 => Self::Emf,
            2 => Self::Png,
            3 => Self::Jpeg,
            4 => Self::Pict,
            5 => Self::Wmf,
            6 => Self::Dib,
            _ => Self::Unknown,
        }
    }
}

/// Picture found in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    /// Format declared by the blip keyword, or sniffed from the payload
    pub image_type: ImageType,
    /// Payload bytes
    pub data: Vec<u8>,
    /// Picture width (in pixels or metafile units, `\picw`)
    pub width: Option<i32>,
    /// Picture height (`\pich`)
    pub height: Option<i32>,
    /// Goal width (desired width in twips)
    pub goal_width: Option<i32>,
    /// Goal height (desired height in twips)
    pub goal_height: Option<i32>,
    /// Horizontal scaling percentage
    pub scale_x: Option<i32>,
    /// Vertical scaling percentage
    pub scale_y: Option<i32>,
    /// Character offset in the decoded text where the picture closed
    pub position: usize,
}

impl Picture {
    /// Get the computed width in twips, considering scaling.
    #[inline]
    pub fn computed_width(&self) -> Option<i32> {
        self.goal_width.or(self.width).map(|w| match self.scale_x {
            Some(scale) => w.saturating_mul(scale) / 100,
            None => w,
        })
    }

    /// Get the computed height in twips, considering scaling.
    #[inline]
    pub fn computed_height(&self) -> Option<i32> {
        self.goal_height.or(self.height).map(|h| match self.scale_y {
            Some(scale) => h.saturating_mul(scale) / 100,
            None => h,
        })
    }

    /// Convert width from twips to pixels at given DPI.
    ///
    /// # Arguments
    ///
    /// * `dpi` - Dots per inch (typically 96 for screen, 72 for print)
    #[inline]
    pub fn width_pixels(&self, dpi: u32) -> Option<u32> {
        self.computed_width()
            .and_then(|tw| u32::try_from(tw).ok())
            .map(|tw| tw.saturating_mul(dpi) / 1440)
    }

    /// Convert height from twips to pixels at given DPI.
    #[inline]
    pub fn height_pixels(&self, dpi: u32) -> Option<u32> {
        self.computed_height()
            .and_then(|tw| u32::try_from(tw).ok())
            .map(|tw| tw.saturating_mul(dpi) / 1440)
    }
}

/// Detect image type from binary signature.
pub fn detect_image_type(data: &[u8]) -> ImageType {
    if data.starts_with(&[0xFF, 0xD8]) {
        return ImageType::Jpeg;
    }
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return ImageType::Png;
    }
    // EMF header record with " EMF" at offset 40
    if data.len() >= 44 && data[0..4] == [0x01, 0x00, 0x00, 0x00] && data[40..44] == *b" EMF" {
        return ImageType::Emf;
    }
    // Aldus placeable metafile
    if data.starts_with(&[0xD7, 0xCD, 0xC6, 0x9A]) {
        return ImageType::Wmf;
    }
    if data.starts_with(b"BM") {
        return ImageType::Dib;
    }
    ImageType::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let png_sig = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect_image_type(&png_sig), ImageType::Png);
    }

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(detect_image_type(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageType::Jpeg);
        assert_eq!(detect_image_type(&[]), ImageType::Unknown);
        assert_eq!(detect_image_type(&[0xFF]), ImageType::Unknown);
    }

    #[test]
    fn test_blip_bytes() {
        assert_eq!(ImageType::from_byte(2), ImageType::Png);
        assert_eq!(ImageType::from_byte(5), ImageType::Wmf);
        assert_eq!(ImageType::from_byte(0), ImageType::Unknown);
    }

    #[test]
    fn test_picture_dimensions() {
        let pic = Picture {
            image_type: ImageType::Png,
            width: Some(1440), // 1 inch
            height: Some(1440),
            scale_x: Some(200),
            scale_y: Some(200),
            ..Picture::default()
        };

        assert_eq!(pic.computed_width(), Some(2880));
        assert_eq!(pic.width_pixels(96), Some(192));
        assert_eq!(pic.height_pixels(72), Some(144));
    }
}
