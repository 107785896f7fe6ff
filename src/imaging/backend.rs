//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify (bounds-only probe), decode, and encode. Compositing
//! (scale, crop, copy) is pixel work done by [`operations`](super::operations)
//! and does not go through the backend.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) built on the `image`
//! crate. Tests swap in a mock to assert the decode options a pipeline chose.

use super::calculations::fits_buffer_limit;
use super::params::{DecodeOptions, OutputFormat, PngCompression};
use super::resources::Resources;
use image::RgbaImage;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("JPEG quality {0} is not in 0-100")]
    InvalidQuality(u8),
    #[error("Invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("No resource named '{0}'")]
    MissingResource(String),
    #[error("No image loaded")]
    NoBuffer,
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reject sizes whose RGBA8 buffer would exceed
    /// [`MAX_BUFFER_BYTES`](super::calculations::MAX_BUFFER_BYTES).
    pub fn ensure_allocatable(self) -> Result<Self, BackendError> {
        if fits_buffer_limit(self.as_tuple()) {
            Ok(self)
        } else {
            Err(BackendError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Where encoded image bytes come from.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    /// Encoded bytes already in memory.
    Bytes(&'a [u8]),
    /// A file on disk.
    Path(&'a Path),
    /// A named entry in a resource table.
    Resource {
        name: &'a str,
        resources: &'a Resources,
    },
}

impl ImageSource<'_> {
    /// Human-readable origin for log and error messages.
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Bytes(b) => format!("<{} bytes in memory>", b.len()),
            ImageSource::Path(p) => p.display().to_string(),
            ImageSource::Resource { name, .. } => format!("resource '{name}'"),
        }
    }
}

/// Trait for image codec backends.
///
/// Every backend must implement all three operations so the decode pipeline
/// and the export methods stay backend-agnostic.
pub trait ImageBackend {
    /// Read the image dimensions without materialising any pixels.
    fn identify(&self, source: &ImageSource<'_>) -> Result<Dimensions, BackendError>;

    /// Decode into an RGBA8 buffer, shrinking by `options.sample_size`.
    fn decode(
        &self,
        source: &ImageSource<'_>,
        options: &DecodeOptions,
    ) -> Result<RgbaImage, BackendError>;

    /// Encode `image` into `out`.
    fn encode(
        &self,
        image: &RgbaImage,
        format: OutputFormat,
        png_compression: PngCompression,
        out: &mut dyn Write,
    ) -> Result<(), BackendError>;
}
