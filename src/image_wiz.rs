//! The [`ImageWiz`] wrapper: one owned RGBA buffer plus fluent edits.
//!
//! Nothing here returns an error or panics. A failed construction leaves the
//! wrapper empty, every edit on an empty wrapper is a no-op, and every export
//! reports `false` or `None`. Causes are logged with `log::warn!`; callers that
//! need them can use the `try_*` methods, which return [`BackendError`].
//!
//! ```no_run
//! use imgkit::ImageWiz;
//!
//! let ok = ImageWiz::from_path_with_side("photo.jpg", 256)
//!     .square_crop()
//!     .circle_crop()
//!     .save_png("avatar.png");
//! ```

use crate::config::WizConfig;
use crate::imaging::operations::{self, Result};
use crate::imaging::{
    BackendError, CompositingStyle, ExportSettings, ImageBackend, ImageSource, OutputFormat,
    Quality, Resources, RustBackend, SizeRequest,
};
use image::RgbaImage;
use std::io::Write;
use std::path::Path;

/// Owns at most one decoded RGBA8 buffer.
#[derive(Debug, Default)]
pub struct ImageWiz {
    buffer: Option<RgbaImage>,
    style: CompositingStyle,
    export: ExportSettings,
}

impl Clone for ImageWiz {
    /// The clone draws its own buffer, so the two wrappers never share pixels.
    fn clone(&self) -> Self {
        Self {
            buffer: self.mutable_bitmap(),
            style: self.style,
            export: self.export,
        }
    }
}

impl From<RgbaImage> for ImageWiz {
    fn from(buffer: RgbaImage) -> Self {
        Self {
            buffer: Some(buffer),
            ..Self::default()
        }
    }
}

impl ImageWiz {
    /// An empty wrapper with the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty wrapper styled by `config`.
    pub fn with_config(config: &WizConfig) -> Self {
        Self::new().config(config)
    }

    /// Restyle this wrapper. The held buffer is untouched.
    pub fn config(mut self, config: &WizConfig) -> Self {
        self.style = config.compositing_style();
        self.export = config.export_settings();
        self
    }

    /// Decode through any backend. Errors leave the wrapper empty.
    pub fn load_with(
        backend: &impl ImageBackend,
        source: ImageSource<'_>,
        request: SizeRequest,
    ) -> Self {
        let mut wiz = Self::new();
        wiz.buffer = match operations::load(backend, &source, request, &wiz.style) {
            Ok(buf) => Some(buf),
            Err(e) => {
                log::warn!("failed to load {}: {e}", source.describe());
                None
            }
        };
        wiz
    }

    fn load(source: ImageSource<'_>, request: SizeRequest) -> Self {
        Self::load_with(&RustBackend, source, request)
    }

    /// Decode encoded bytes held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::load(ImageSource::Bytes(bytes), SizeRequest::Original)
    }

    /// Decode bytes and scale the shorter side to `side`, keeping the aspect ratio.
    pub fn from_bytes_with_side(bytes: &[u8], side: u32) -> Self {
        Self::load(ImageSource::Bytes(bytes), SizeRequest::ShorterSide(side))
    }

    /// Decode bytes and scale to `width` x `height`; a zero axis is derived.
    pub fn from_bytes_with_size(bytes: &[u8], width: u32, height: u32) -> Self {
        Self::load(
            ImageSource::Bytes(bytes),
            SizeRequest::Bounded { width, height },
        )
    }

    /// Load an image file.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::load(ImageSource::Path(path.as_ref()), SizeRequest::Original)
    }

    /// Load an image file and scale the shorter side to `side`.
    pub fn from_path_with_side(path: impl AsRef<Path>, side: u32) -> Self {
        Self::load(
            ImageSource::Path(path.as_ref()),
            SizeRequest::ShorterSide(side),
        )
    }

    /// Load an image file and scale to `width` x `height`; a zero axis is derived.
    pub fn from_path_with_size(path: impl AsRef<Path>, width: u32, height: u32) -> Self {
        Self::load(
            ImageSource::Path(path.as_ref()),
            SizeRequest::Bounded { width, height },
        )
    }

    /// Decode a named resource.
    pub fn from_resource(name: &str, resources: &Resources) -> Self {
        Self::load(
            ImageSource::Resource { name, resources },
            SizeRequest::Original,
        )
    }

    /// Decode a named resource and scale the shorter side to `side`.
    pub fn from_resource_with_side(name: &str, resources: &Resources, side: u32) -> Self {
        Self::load(
            ImageSource::Resource { name, resources },
            SizeRequest::ShorterSide(side),
        )
    }

    /// Decode a named resource and scale to `width` x `height`.
    pub fn from_resource_with_size(
        name: &str,
        resources: &Resources,
        width: u32,
        height: u32,
    ) -> Self {
        Self::load(
            ImageSource::Resource { name, resources },
            SizeRequest::Bounded { width, height },
        )
    }

    pub fn has_bitmap(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.buffer.as_ref().map(RgbaImage::dimensions)
    }

    pub fn style(&self) -> CompositingStyle {
        self.style
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Scale to `width` x `height`. A zero axis is derived from the aspect
    /// ratio; zero on both axes, or the current size, is a no-op. A target
    /// too large to allocate leaves the buffer unchanged.
    pub fn scale(&mut self, width: u32, height: u32) -> &mut Self {
        if let Some(buf) = &self.buffer {
            match operations::scale_buffer(buf, width, height, &self.style) {
                Ok(Some(scaled)) => self.buffer = Some(scaled),
                Ok(None) => {}
                Err(e) => log::warn!("scale to {width}x{height} skipped: {e}"),
            }
        }
        self
    }

    /// Replace the buffer with its largest centred square.
    pub fn square_crop(&mut self) -> &mut Self {
        if let Some(buf) = &self.buffer {
            self.buffer = Some(operations::square_crop_buffer(buf));
        }
        self
    }

    /// Clear everything outside the inscribed circle, editing the buffer in place.
    pub fn circle_crop(&mut self) -> &mut Self {
        if let Some(buf) = &mut self.buffer {
            operations::circle_crop_in_place(buf, &self.style);
        }
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// An independent copy of the buffer.
    pub fn bitmap(&self) -> Option<RgbaImage> {
        self.buffer.clone()
    }

    /// An independent copy drawn onto a freshly allocated buffer.
    pub fn mutable_bitmap(&self) -> Option<RgbaImage> {
        self.buffer.as_ref().map(operations::composite_copy)
    }

    /// Hand the buffer over, leaving nothing behind.
    pub fn into_bitmap(self) -> Option<RgbaImage> {
        self.buffer
    }

    // =========================================================================
    // Export
    // =========================================================================

    fn held(&self) -> Result<&RgbaImage> {
        self.buffer.as_ref().ok_or(BackendError::NoBuffer)
    }

    fn jpeg(quality: u8) -> Result<OutputFormat> {
        Quality::checked(quality)
            .map(OutputFormat::Jpeg)
            .ok_or(BackendError::InvalidQuality(quality))
    }

    pub fn try_save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.try_save(path.as_ref(), OutputFormat::Png)
    }

    pub fn try_write_png(&self, out: &mut impl Write) -> Result<()> {
        self.try_write(out, OutputFormat::Png)
    }

    pub fn try_png_bytes(&self) -> Result<Vec<u8>> {
        self.try_bytes(OutputFormat::Png)
    }

    pub fn try_save_jpeg(&self, path: impl AsRef<Path>, quality: u8) -> Result<()> {
        self.try_save(path.as_ref(), Self::jpeg(quality)?)
    }

    pub fn try_write_jpeg(&self, out: &mut impl Write, quality: u8) -> Result<()> {
        self.try_write(out, Self::jpeg(quality)?)
    }

    pub fn try_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        self.try_bytes(Self::jpeg(quality)?)
    }

    fn try_save(&self, path: &Path, format: OutputFormat) -> Result<()> {
        operations::encode_to_path(
            &RustBackend,
            self.held()?,
            format,
            self.export.png_compression,
            path,
        )
    }

    fn try_write(&self, out: &mut impl Write, format: OutputFormat) -> Result<()> {
        operations::encode_to_writer(
            &RustBackend,
            self.held()?,
            format,
            self.export.png_compression,
            out,
        )
    }

    fn try_bytes(&self, format: OutputFormat) -> Result<Vec<u8>> {
        operations::encode_to_vec(
            &RustBackend,
            self.held()?,
            format,
            self.export.png_compression,
        )
    }

    /// Write a lossless PNG to `path`. Returns `false` on any failure.
    pub fn save_png(&self, path: impl AsRef<Path>) -> bool {
        report("save PNG", self.try_save_png(path)).is_some()
    }

    /// Write a lossless PNG to an open file or stream.
    pub fn write_png(&self, out: &mut impl Write) -> bool {
        report("write PNG", self.try_write_png(out)).is_some()
    }

    /// Encode as PNG in memory.
    pub fn png_bytes(&self) -> Option<Vec<u8>> {
        report("encode PNG", self.try_png_bytes())
    }

    /// Write a JPEG at `quality` (0-100) to `path`.
    pub fn save_jpeg(&self, path: impl AsRef<Path>, quality: u8) -> bool {
        report("save JPEG", self.try_save_jpeg(path, quality)).is_some()
    }

    /// Write a JPEG at `quality` to an open file or stream.
    pub fn write_jpeg(&self, out: &mut impl Write, quality: u8) -> bool {
        report("write JPEG", self.try_write_jpeg(out, quality)).is_some()
    }

    /// Encode as JPEG in memory.
    pub fn jpeg_bytes(&self, quality: u8) -> Option<Vec<u8>> {
        report("encode JPEG", self.try_jpeg_bytes(quality))
    }

    /// [`save_jpeg`](Self::save_jpeg) at the configured default quality.
    pub fn save_jpeg_default_quality(&self, path: impl AsRef<Path>) -> bool {
        self.save_jpeg(path, self.export.jpeg_quality.value())
    }

    /// [`jpeg_bytes`](Self::jpeg_bytes) at the configured default quality.
    pub fn jpeg_bytes_default_quality(&self) -> Option<Vec<u8>> {
        self.jpeg_bytes(self.export.jpeg_quality.value())
    }
}

/// Log and drop an export error.
fn report<T>(what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(BackendError::NoBuffer) => {
            log::debug!("{what}: no image loaded");
            None
        }
        Err(e) => {
            log::warn!("{what} failed: {e}");
            None
        }
    }
}
