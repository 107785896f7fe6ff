//! High-level image operations.
//!
//! These functions combine calculations with backend execution: the
//! constrained decode pipeline, the compositing operations that replace or
//! rewrite a buffer, and encoding into the supported sinks.

use super::backend::{BackendError, Dimensions, ImageBackend, ImageSource};
use super::calculations::{
    bounded_sample_size, circle_geometry, resolve_scale, shorter_side_sample_size,
    square_crop_rect, width_is_shorter,
};
use super::params::{CompositingStyle, DecodeOptions, OutputFormat, PngCompression, SizeRequest};
use image::{Rgba, RgbaImage, imageops};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Decode `source` and land on the size described by `request`.
///
/// Constrained requests probe the bounds first, decode with a coarse integer
/// sample size (never growing the image), then finish with an exact
/// [`scale_buffer`]. The finishing scale is skipped when it would be a no-op.
pub fn load(
    backend: &impl ImageBackend,
    source: &ImageSource<'_>,
    request: SizeRequest,
    style: &CompositingStyle,
) -> Result<RgbaImage> {
    let (sample_size, finish) = match request {
        SizeRequest::Original => (1, (0, 0)),
        SizeRequest::ShorterSide(side) => {
            let dims = backend.identify(source)?.as_tuple();
            let finish = if width_is_shorter(dims) {
                (side, 0)
            } else {
                (0, side)
            };
            (shorter_side_sample_size(dims, side), finish)
        }
        SizeRequest::Bounded { width, height } => {
            let dims = backend.identify(source)?.as_tuple();
            (bounded_sample_size(dims, width, height), (width, height))
        }
    };

    log::debug!(
        "decoding {} with sample size {sample_size}",
        source.describe()
    );
    let decoded = backend.decode(source, &DecodeOptions { sample_size })?;

    Ok(scale_buffer(&decoded, finish.0, finish.1, style)?.unwrap_or(decoded))
}

/// Stretch the whole of `buf` into a new buffer of the requested size.
///
/// Returns `Ok(None)` for no-op requests (see
/// [`resolve_scale`](super::calculations::resolve_scale)) and
/// [`BackendError::InvalidDimensions`] when the target buffer would exceed
/// [`MAX_BUFFER_BYTES`](super::calculations::MAX_BUFFER_BYTES).
pub fn scale_buffer(
    buf: &RgbaImage,
    width: u32,
    height: u32,
    style: &CompositingStyle,
) -> Result<Option<RgbaImage>> {
    let Some((w, h)) = resolve_scale(buf.dimensions(), width, height) else {
        log::debug!(
            "scale {}x{} -> {width}x{height} is a no-op",
            buf.width(),
            buf.height()
        );
        return Ok(None);
    };
    Dimensions {
        width: w,
        height: h,
    }
    .ensure_allocatable()?;
    Ok(Some(imageops::resize(buf, w, h, style.filter.into())))
}

/// Copy the largest centred square of `buf` into a new buffer.
pub fn square_crop_buffer(buf: &RgbaImage) -> RgbaImage {
    let rect = square_crop_rect(buf.dimensions());
    imageops::crop_imm(buf, rect.x, rect.y, rect.side, rect.side).to_image()
}

/// Clear everything outside the inscribed circle, in place.
///
/// Equivalent to filling the inverted circle with opaque white in
/// destination-out mode: each pixel's alpha is multiplied by the share of it
/// covered by the circle. Coverage is sampled at pixel centres and ramps over
/// one pixel when the style is antialiased. Fully cleared pixels become
/// transparent black.
pub fn circle_crop_in_place(buf: &mut RgbaImage, style: &CompositingStyle) {
    let circle = circle_geometry(buf.dimensions());

    for (x, y, pixel) in buf.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - circle.cx;
        let dy = y as f32 + 0.5 - circle.cy;
        let distance = (dx * dx + dy * dy).sqrt();

        let coverage = if style.antialias {
            (circle.radius - distance + 0.5).clamp(0.0, 1.0)
        } else if distance <= circle.radius {
            1.0
        } else {
            0.0
        };

        if coverage >= 1.0 {
            continue;
        }
        let alpha = (pixel[3] as f32 * coverage).round() as u8;
        *pixel = if alpha == 0 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([pixel[0], pixel[1], pixel[2], alpha])
        };
    }
}

/// Independent copy of `buf` drawn onto a freshly allocated buffer.
pub fn composite_copy(buf: &RgbaImage) -> RgbaImage {
    let mut copy = RgbaImage::new(buf.width(), buf.height());
    imageops::replace(&mut copy, buf, 0, 0);
    copy
}

/// Encode into any writer.
pub fn encode_to_writer(
    backend: &impl ImageBackend,
    buf: &RgbaImage,
    format: OutputFormat,
    png_compression: PngCompression,
    out: &mut dyn Write,
) -> Result<()> {
    backend.encode(buf, format, png_compression, out)?;
    out.flush()?;
    Ok(())
}

/// Encode into a file, creating or truncating it.
pub fn encode_to_path(
    backend: &impl ImageBackend,
    buf: &RgbaImage,
    format: OutputFormat,
    png_compression: PngCompression,
    path: &Path,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode_to_writer(backend, buf, format, png_compression, &mut writer)
}

/// Encode into a new byte vector.
pub fn encode_to_vec(
    backend: &impl ImageBackend,
    buf: &RgbaImage,
    format: OutputFormat,
    png_compression: PngCompression,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    backend.encode(buf, format, png_compression, &mut out)?;
    Ok(out)
}
