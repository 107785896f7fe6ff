//! End-to-end checks of the image wrapper through its public API.
//!
//! Source images are synthesised in memory and written into a temp dir, so
//! the tests need no fixture files.

use image::{ImageEncoder, Rgba, RgbaImage};
use imgkit::imaging::Resources;
use imgkit::ImageWiz;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn pattern(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7 % 256) as u8, (y * 3 % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

fn encode_png(img: &RgbaImage) -> Vec<u8> {
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

fn fixture(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_png(&pattern(width, height))).unwrap();
    path
}

// =========================================================================
// Constrained decoding
// =========================================================================

#[test]
fn shorter_side_lands_exactly_and_keeps_aspect() {
    let tmp = TempDir::new().unwrap();
    let cases = [(640, 480, 100), (480, 640, 100), (1000, 250, 64), (333, 777, 50)];

    for (w, h, side) in cases {
        let path = fixture(tmp.path(), &format!("{w}x{h}.png"), w, h);
        let (out_w, out_h) = ImageWiz::from_path_with_side(&path, side)
            .dimensions()
            .unwrap();

        assert_eq!(out_w.min(out_h), side, "{w}x{h} → side {side}");
        let expected_long = (w.max(h) as f32 * side as f32 / w.min(h) as f32).round();
        let actual_long = out_w.max(out_h) as f32;
        assert!(
            (expected_long - actual_long).abs() <= 1.0 + expected_long * 0.02,
            "{w}x{h}: long side {actual_long}, expected about {expected_long}"
        );
    }
}

#[test]
fn bounded_size_is_exact() {
    let tmp = TempDir::new().unwrap();
    let path = fixture(tmp.path(), "src.png", 900, 600);

    for (w, h) in [(300, 300), (90, 60), (450, 100), (1200, 800)] {
        let wiz = ImageWiz::from_path_with_size(&path, w, h);
        assert_eq!(wiz.dimensions(), Some((w, h)));
    }
}

#[test]
fn bounded_with_zero_axis_derives_it() {
    let tmp = TempDir::new().unwrap();
    let path = fixture(tmp.path(), "src.png", 900, 600);

    assert_eq!(
        ImageWiz::from_path_with_size(&path, 450, 0).dimensions(),
        Some((450, 300))
    );
    assert_eq!(
        ImageWiz::from_path_with_size(&path, 0, 0).dimensions(),
        Some((900, 600))
    );
}

#[test]
fn resources_loaded_from_directory() {
    let tmp = TempDir::new().unwrap();
    fixture(tmp.path(), "placeholder.png", 120, 90);

    let res = Resources::from_dir(tmp.path()).unwrap();
    let wiz = ImageWiz::from_resource_with_side("placeholder", &res, 45);
    assert_eq!(wiz.dimensions(), Some((60, 45)));
}

// =========================================================================
// Edits
// =========================================================================

#[test]
fn square_crop_side_is_min_dimension() {
    for (w, h) in [(50, 80), (80, 50), (31, 31), (1, 9)] {
        let mut wiz = ImageWiz::from(pattern(w, h));
        wiz.square_crop();
        assert_eq!(wiz.dimensions(), Some((w.min(h), w.min(h))));
    }
}

#[test]
fn circle_crop_clears_outside_keeps_inside() {
    let src = pattern(64, 48);
    let mut wiz = ImageWiz::from(src.clone());
    wiz.circle_crop();
    let out = wiz.bitmap().unwrap();

    // Centre (32, 24), radius 24.
    for (x, y, px) in out.enumerate_pixels() {
        let dx = x as f32 + 0.5 - 32.0;
        let dy = y as f32 + 0.5 - 24.0;
        let d = (dx * dx + dy * dy).sqrt();
        if d > 25.0 {
            assert_eq!(px[3], 0, "pixel ({x},{y}) should be cleared");
        } else if d < 23.0 {
            assert_eq!(px, src.get_pixel(x, y), "pixel ({x},{y}) should be kept");
        }
    }
}

// =========================================================================
// Export
// =========================================================================

#[test]
fn png_round_trip_is_pixel_identical() {
    let tmp = TempDir::new().unwrap();
    let mut wiz = ImageWiz::from(pattern(70, 40));
    wiz.circle_crop();
    let expected = wiz.bitmap().unwrap();

    let path = tmp.path().join("out.png");
    assert!(wiz.save_png(&path));
    assert_eq!(ImageWiz::from_path(&path).bitmap(), Some(expected.clone()));

    let bytes = wiz.png_bytes().unwrap();
    assert_eq!(ImageWiz::from_bytes(&bytes).bitmap(), Some(expected));
}

#[test]
fn export_to_open_file_handles() {
    let tmp = TempDir::new().unwrap();
    let wiz = ImageWiz::from(pattern(20, 20));

    let png_path = tmp.path().join("handle.png");
    let mut file = File::create(&png_path).unwrap();
    assert!(wiz.write_png(&mut file));
    drop(file);
    assert_eq!(ImageWiz::from_path(&png_path).dimensions(), Some((20, 20)));

    let jpg_path = tmp.path().join("handle.jpg");
    let mut file = File::create(&jpg_path).unwrap();
    assert!(wiz.write_jpeg(&mut file, 80));
    drop(file);
    assert_eq!(ImageWiz::from_path(&jpg_path).dimensions(), Some((20, 20)));
}

#[test]
fn jpeg_to_path_and_memory() {
    let tmp = TempDir::new().unwrap();
    let wiz = ImageWiz::from(pattern(32, 16));

    let path = tmp.path().join("out.jpg");
    assert!(wiz.save_jpeg(&path, 60));
    assert!(std::fs::metadata(&path).unwrap().len() > 0);

    let bytes = wiz.jpeg_bytes(60).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert!(wiz.jpeg_bytes(200).is_none());
}

// =========================================================================
// Failure safety
// =========================================================================

#[test]
fn broken_sources_give_safe_empty_wrappers() {
    let tmp = TempDir::new().unwrap();
    let corrupt = tmp.path().join("corrupt.png");
    std::fs::write(&corrupt, b"\x89PNG\r\n\x1a\nnot really").unwrap();

    let wrappers = [
        ImageWiz::from_path(tmp.path().join("missing.png")),
        ImageWiz::from_path(&corrupt),
        ImageWiz::from_path_with_side(&corrupt, 10),
        ImageWiz::from_bytes(&[]),
        ImageWiz::from_bytes_with_size(b"nope", 5, 5),
        ImageWiz::from_resource("absent", &Resources::new()),
    ];

    for mut wiz in wrappers {
        assert!(!wiz.has_bitmap());
        wiz.scale(10, 10).square_crop().circle_crop();
        assert!(!wiz.has_bitmap());
        assert_eq!(wiz.bitmap(), None);
        assert_eq!(wiz.mutable_bitmap(), None);
        assert!(!wiz.save_png(tmp.path().join("never.png")));
        assert!(!wiz.save_jpeg(tmp.path().join("never.jpg"), 90));
        assert_eq!(wiz.jpeg_bytes(90), None);
        assert_eq!(wiz.png_bytes(), None);
    }
    assert!(!tmp.path().join("never.png").exists());
}

#[test]
fn oversized_targets_fail_quietly() {
    let bytes = encode_png(&pattern(4, 4));

    assert!(!ImageWiz::from_bytes_with_size(&bytes, u32::MAX, u32::MAX).has_bitmap());

    let mut wiz = ImageWiz::from_bytes(&bytes);
    wiz.scale(u32::MAX, u32::MAX);
    assert_eq!(wiz.dimensions(), Some((4, 4)));
    assert_eq!(wiz.bitmap(), Some(pattern(4, 4)));
}
