//! Shared test utilities for the imgkit unit tests.
//!
//! Synthetic images are generated in memory so no fixture files are needed.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let bytes = png_bytes(&gradient(200, 100));
//! let wiz = ImageWiz::from_bytes(&bytes);
//! assert_eq!(wiz.dimensions(), Some((200, 100)));
//! ```

use image::{ImageEncoder, Rgba, RgbaImage};
use std::path::Path;

// =========================================================================
// Synthetic buffers
// =========================================================================

/// Opaque buffer whose red/green channels encode the pixel position.
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    })
}

/// Buffer filled with a single colour.
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

// =========================================================================
// Encoded fixtures
// =========================================================================

/// Encode a buffer as PNG bytes.
pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
    out
}

/// Write a buffer to `path` as PNG.
pub fn write_png(path: &Path, img: &RgbaImage) {
    std::fs::write(path, png_bytes(img)).unwrap();
}
