//! Parameter types for image operations.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between the [`ImageWiz`](crate::ImageWiz) facade, the
//! [`operations`](super::operations) pipeline, and the
//! [`backend`](super::backend) that does the decoding and encoding.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (0–100). Out-of-range values are rejected.
//! - [`SizeRequest`] — Which size a constructor should land on after decoding.
//! - [`DecodeOptions`] — Integer downsample factor handed to the decoder.
//! - [`OutputFormat`] — PNG or JPEG-with-quality.
//! - [`CompositingStyle`] — Filter and antialiasing used by every scale/crop/copy.
//! - [`ExportSettings`] — PNG compression and the default JPEG quality.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Quality setting for lossy image encoding (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    /// Accept a quality level, rejecting anything above 100.
    pub fn checked(value: u8) -> Option<Self> {
        (value <= 100).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Quality as the JPEG encoder understands it. The encoder's scale
    /// starts at 1, so 0 is treated as the lowest setting.
    pub(crate) fn encoder_value(self) -> u8 {
        self.0.max(1)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Target size for a decode. Zero on an axis means "derive from the aspect ratio".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeRequest {
    /// Keep the decoded size.
    #[default]
    Original,
    /// Scale so the shorter side equals this many pixels.
    ShorterSide(u32),
    /// Scale to this width and height; a zero axis is derived.
    Bounded { width: u32, height: u32 },
}

/// Options passed to [`ImageBackend::decode`](super::ImageBackend::decode).
///
/// Decoding always produces a full-fidelity RGBA8 buffer and never upscales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Integer divisor applied to both axes; 1 keeps the source size.
    pub sample_size: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { sample_size: 1 }
    }
}

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg(Quality),
}

/// Resampling filter used when compositing one buffer into another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Filter> for FilterType {
    fn from(f: Filter) -> Self {
        match f {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Rendering configuration shared by every draw a wrapper performs.
///
/// The default is bilinear filtering with antialiased edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositingStyle {
    pub filter: Filter,
    pub antialias: bool,
}

impl Default for CompositingStyle {
    fn default() -> Self {
        Self {
            filter: Filter::Triangle,
            antialias: true,
        }
    }
}

/// Zlib effort for PNG export. Output is lossless at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PngCompression {
    Fast,
    Default,
    #[default]
    Best,
}

impl From<PngCompression> for image::codecs::png::CompressionType {
    fn from(c: PngCompression) -> Self {
        use image::codecs::png::CompressionType;
        match c {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        }
    }
}

/// Encoder settings applied by the export methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSettings {
    pub png_compression: PngCompression,
    pub jpeg_quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_rejects_above_100() {
        assert_eq!(Quality::checked(0).map(Quality::value), Some(0));
        assert_eq!(Quality::checked(100).map(Quality::value), Some(100));
        assert_eq!(Quality::checked(101), None);
    }

    #[test]
    fn quality_default_is_90() {
        assert_eq!(Quality::default().value(), 90);
    }

    #[test]
    fn quality_zero_encodes_as_lowest() {
        assert_eq!(Quality::checked(0).unwrap().encoder_value(), 1);
        assert_eq!(Quality::checked(75).unwrap().encoder_value(), 75);
    }

    #[test]
    fn compositing_default_is_filtered_and_antialiased() {
        let style = CompositingStyle::default();
        assert_eq!(style.filter, Filter::Triangle);
        assert!(style.antialias);
    }

    #[test]
    fn decode_options_default_keeps_size() {
        assert_eq!(DecodeOptions::default().sample_size, 1);
    }
}
