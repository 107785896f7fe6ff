//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images. The
//! rounding and truncation rules are load-bearing: constrained decodes and
//! crops must land on exactly the same pixel sizes every time.

/// Integer downsample factor for shrinking `source` towards `target`.
///
/// Rounds half up in single precision: `(0.5 + source / target)` truncated.
/// Callers only use this when `source > target > 0`.
///
/// # Examples
/// ```
/// # use imgkit::imaging::calculations::sample_factor;
/// assert_eq!(sample_factor(1000, 300), 3); // 3.33 → 3
/// assert_eq!(sample_factor(1000, 400), 3); // 2.5 → 3
/// assert_eq!(sample_factor(1000, 600), 2); // 1.67 → 2
/// ```
pub fn sample_factor(source: u32, target: u32) -> u32 {
    (0.5f32 + source as f32 / target as f32) as u32
}

/// Sample size for a shorter-side request.
///
/// The shorter side is the width when `width < height`, otherwise the height
/// (square images use the height). Only shrinks: returns 1 unless `side > 0`
/// and the shorter side exceeds it.
pub fn shorter_side_sample_size(dims: (u32, u32), side: u32) -> u32 {
    let shorter = shorter_side(dims);
    if side > 0 && shorter > side {
        sample_factor(shorter, side)
    } else {
        1
    }
}

/// The side a shorter-side request resizes: `true` when the width is shorter.
pub fn width_is_shorter(dims: (u32, u32)) -> bool {
    dims.0 < dims.1
}

fn shorter_side(dims: (u32, u32)) -> u32 {
    if width_is_shorter(dims) { dims.0 } else { dims.1 }
}

/// Sample size for a width/height request where 0 means "derive from aspect".
///
/// Each positive target that the source exceeds yields its own factor, any
/// other axis counts as 1. The width factor is used only when the width is
/// constrained and its factor is strictly smaller; otherwise the height
/// factor is used. A width-only request therefore decodes at sample 1.
pub fn bounded_sample_size(dims: (u32, u32), width: u32, height: u32) -> u32 {
    let factor = |source: u32, target: u32| {
        if target > 0 && source > target {
            sample_factor(source, target)
        } else {
            1
        }
    };
    let width_factor = factor(dims.0, width);
    let height_factor = factor(dims.1, height);

    if width > 0 && width_factor < height_factor {
        width_factor
    } else {
        height_factor
    }
}

/// Largest RGBA8 buffer, in bytes, that decoding or scaling will allocate.
pub const MAX_BUFFER_BYTES: u64 = 1 << 30;

/// Bytes needed for an RGBA8 buffer of `dims`, `None` on overflow.
pub fn rgba_buffer_len(dims: (u32, u32)) -> Option<u64> {
    (dims.0 as u64).checked_mul(dims.1 as u64)?.checked_mul(4)
}

/// Whether an RGBA8 buffer of `dims` stays within [`MAX_BUFFER_BYTES`].
///
/// # Examples
/// ```
/// # use imgkit::imaging::calculations::fits_buffer_limit;
/// assert!(fits_buffer_limit((4000, 3000)));
/// assert!(!fits_buffer_limit((u32::MAX, u32::MAX)));
/// ```
pub fn fits_buffer_limit(dims: (u32, u32)) -> bool {
    rgba_buffer_len(dims).is_some_and(|len| len <= MAX_BUFFER_BYTES)
}

/// Dimensions after decoding with an integer sample size. Never below 1x1.
pub fn downsampled_dimensions(dims: (u32, u32), sample: u32) -> (u32, u32) {
    let sample = sample.max(1);
    ((dims.0 / sample).max(1), (dims.1 / sample).max(1))
}

/// Resolve a scale request against the current buffer size.
///
/// A target of 0 on one axis derives it from the other, preserving the
/// aspect ratio with single-precision truncation. Returns `None` when the
/// request is a no-op:
/// - both targets are 0
/// - the request matches the current size exactly
/// - one axis matches while the other is derived
///
/// Also returns `None` when a derived axis truncates to zero pixels.
///
/// # Examples
/// ```
/// # use imgkit::imaging::calculations::resolve_scale;
/// assert_eq!(resolve_scale((800, 600), 400, 0), Some((400, 300)));
/// assert_eq!(resolve_scale((800, 600), 0, 0), None);
/// assert_eq!(resolve_scale((800, 600), 800, 0), None);
/// ```
pub fn resolve_scale(current: (u32, u32), width: u32, height: u32) -> Option<(u32, u32)> {
    let (cur_w, cur_h) = current;

    if width == 0 && height == 0 {
        return None;
    }
    if (width == cur_w && height == cur_h)
        || (width == cur_w && height == 0)
        || (width == 0 && height == cur_h)
    {
        return None;
    }

    let (w, h) = if width == 0 {
        ((height as f32 * cur_w as f32 / cur_h as f32) as u32, height)
    } else if height == 0 {
        (width, (width as f32 * cur_h as f32 / cur_w as f32) as u32)
    } else {
        (width, height)
    };

    (w > 0 && h > 0).then_some((w, h))
}

/// A source rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

/// Largest centred square inside `dims`.
///
/// The offset along the longer axis is `(longer - side) >> 1`. Portrait
/// images crop vertically; landscape and square images crop horizontally.
pub fn square_crop_rect(dims: (u32, u32)) -> CropRect {
    let (w, h) = dims;
    if w < h {
        CropRect {
            x: 0,
            y: (h - w) >> 1,
            side: w,
        }
    } else {
        CropRect {
            x: (w - h) >> 1,
            y: 0,
            side: h,
        }
    }
}

/// Centre and radius of the circle kept by a circle crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

/// Inscribed circle for a circle crop.
///
/// The centre is `(w >> 1, h >> 1)`. The radius is the centre's y when the
/// image is wider than tall, otherwise the centre's x (square images take
/// the x branch).
pub fn circle_geometry(dims: (u32, u32)) -> Circle {
    let cx = (dims.0 >> 1) as f32;
    let cy = (dims.1 >> 1) as f32;
    let radius = if dims.0 > dims.1 { cy } else { cx };
    Circle { cx, cy, radius }
}
