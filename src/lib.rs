//! # imgkit
//!
//! Two small, independent UI helpers:
//!
//! - [`ImageWiz`]: owns one decoded RGBA image and offers the handful of
//!   edits an app needs for avatars and thumbnails: size-constrained decoding,
//!   scaling, square and circle crops, and PNG/JPEG export.
//! - [`ViewListAdapter`](adapter::ViewListAdapter): feeds a list of ready-made
//!   views to a pull-based list widget and tells it when to refresh.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`image_wiz`] | The [`ImageWiz`] facade: constructors, fluent edits, copies, export |
//! | [`imaging`] | Decode pipeline, dimension math, codec backend, embedded resources |
//! | [`adapter`] | [`ListAdapter`](adapter::ListAdapter) contract and the view list adapter |
//! | [`config`] | Optional TOML configuration for compositing and export |
//!
//! # Design Decisions
//!
//! ## Never Raise at the Boundary
//!
//! Image helpers run on UI paths where a bad file should produce an empty
//! placeholder, not a crash. Constructors therefore always return an
//! [`ImageWiz`]; a failed decode simply leaves it without a buffer, and every
//! later edit or export on it is a no-op that reports failure. The typed
//! [`BackendError`](imaging::BackendError) is still available through the
//! `try_*` export methods and is logged through the `log` facade.
//!
//! ## Coarse Decode, Exact Finish
//!
//! Size-constrained constructors read only the image header first, pick an
//! integer downsample factor (rounded, never enlarging), decode at that
//! factor, and then scale to the exact requested size. The rounding rules
//! live in [`imaging::calculations`] and are pinned by tests.
//!
//! ## Pluggable Codec
//!
//! Decoding and encoding go through the [`ImageBackend`](imaging::ImageBackend)
//! trait. [`RustBackend`](imaging::RustBackend) uses the pure-Rust `image`
//! crate; tests use a recording mock to assert the decode options chosen.

pub mod adapter;
pub mod config;
pub mod image_wiz;
pub mod imaging;

pub use image_wiz::ImageWiz;

#[cfg(test)]
pub(crate) mod test_helpers;
