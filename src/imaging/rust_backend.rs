//! Pure Rust codec backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::into_dimensions` (header only, no pixels) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `ImageReader::decode` → `into_rgba8` |
//! | Downsample on decode | `image::imageops::thumbnail` (area average) |
//! | Encode → PNG | `PngEncoder::new_with_quality`, adaptive row filters |
//! | Encode → JPEG | `JpegEncoder::new_with_quality`, alpha dropped |
//!
//! Formats are always sniffed from content, so a mislabelled extension still
//! decodes.
//!
//! The `image` crate has no subsampled decode: sources are decoded at full
//! size and then area-averaged by the sample factor. The factor sets the
//! size and quality of the intermediate buffer, not peak memory. Peak memory
//! is bounded instead by the reader's allocation limit and the
//! [`MAX_BUFFER_BYTES`](super::calculations::MAX_BUFFER_BYTES) check on the
//! decoded size.

use super::backend::{BackendError, Dimensions, ImageBackend, ImageSource};
use super::calculations::{MAX_BUFFER_BYTES, downsampled_dimensions};
use super::params::{DecodeOptions, OutputFormat, PngCompression};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{self, PngEncoder};
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, ImageError, ImageReader, Limits, RgbaImage,
};
use std::io::{BufRead, Cursor, Seek, Write};

/// `image`-crate backend.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

trait BufReadSeek: BufRead + Seek {}
impl<T: BufRead + Seek> BufReadSeek for T {}

fn decode_error(source: &ImageSource<'_>, e: ImageError) -> BackendError {
    match e {
        ImageError::IoError(io) => BackendError::Io(io),
        other => BackendError::Decode(format!("{}: {}", source.describe(), other)),
    }
}

fn encode_error(e: ImageError) -> BackendError {
    match e {
        ImageError::IoError(io) => BackendError::Io(io),
        other => BackendError::Encode(other.to_string()),
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, source: &ImageSource<'_>) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(source)?
            .into_dimensions()
            .map_err(|e| decode_error(source, e))?;
        Ok(Dimensions { width, height })
    }

    fn decode(
        &self,
        source: &ImageSource<'_>,
        options: &DecodeOptions,
    ) -> Result<RgbaImage, BackendError> {
        let decoded = open_reader(source)?
            .decode()
            .map_err(|e| decode_error(source, e))?;
        Dimensions {
            width: decoded.width(),
            height: decoded.height(),
        }
        .ensure_allocatable()?;
        let decoded = decoded.into_rgba8();

        if options.sample_size <= 1 {
            return Ok(decoded);
        }
        let (w, h) = downsampled_dimensions(decoded.dimensions(), options.sample_size);
        Ok(image::imageops::thumbnail(&decoded, w, h))
    }

    fn encode(
        &self,
        image: &RgbaImage,
        format: OutputFormat,
        png_compression: PngCompression,
        out: &mut dyn Write,
    ) -> Result<(), BackendError> {
        let (width, height) = image.dimensions();
        match format {
            OutputFormat::Png => PngEncoder::new_with_quality(
                out,
                png_compression.into(),
                png::FilterType::Adaptive,
            )
            .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(encode_error),
            OutputFormat::Jpeg(quality) => {
                // JPEG has no alpha channel; the colour channels are kept as-is.
                let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
                JpegEncoder::new_with_quality(out, quality.encoder_value())
                    .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                    .map_err(encode_error)
            }
        }
    }
}

/// Open a reader over the source with its format guessed from content.
fn open_reader<'a>(
    source: &ImageSource<'a>,
) -> Result<ImageReader<Box<dyn BufReadSeek + 'a>>, BackendError> {
    let reader: Box<dyn BufReadSeek + 'a> = match *source {
        ImageSource::Bytes(bytes) => Box::new(Cursor::new(bytes)),
        ImageSource::Path(path) => {
            Box::new(std::io::BufReader::new(std::fs::File::open(path)?))
        }
        ImageSource::Resource { name, resources } => {
            Box::new(Cursor::new(resources.require(name)?))
        }
    };
    let mut reader = ImageReader::new(reader).with_guessed_format()?;
    let mut limits = Limits::default();
    limits.max_alloc = Some(MAX_BUFFER_BYTES);
    reader.limits(limits);
    Ok(reader)
}
