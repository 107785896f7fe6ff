//! Image decoding, compositing, and encoding.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Decode + downsample** | `ImageReader::decode` + `imageops::thumbnail` |
//! | **Scale** | `imageops::resize` with the configured filter |
//! | **Square crop** | `imageops::crop_imm` |
//! | **Circle crop** | per-pixel destination-out coverage |
//! | **Export** | `PngEncoder` / `JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Resources**: Named embedded image bytes
//! - **Operations**: Functions combining calculations + backend

pub mod backend;
pub mod calculations;
pub mod operations;
mod params;
mod resources;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, ImageSource};
pub use params::{
    CompositingStyle, DecodeOptions, ExportSettings, Filter, OutputFormat, PngCompression,
    Quality, SizeRequest,
};
pub use resources::Resources;
pub use rust_backend::RustBackend;
