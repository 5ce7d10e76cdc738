use std::io::Cursor;

use image::{Rgb, RgbImage, Rgba};

use super::*;

fn encode_png(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_keeps_rgba_samples() {
    let src = RgbaImage::from_raw(2, 1, vec![100, 50, 200, 128, 1, 2, 3, 4]).unwrap();
    let bytes = encode_png(image::DynamicImage::ImageRgba8(src.clone()));

    let decoded = SourceImage::decode(&bytes).unwrap();
    assert_eq!(decoded.image(), &src);
    assert_eq!(decoded.canvas(), Canvas { width: 2, height: 1 });
    assert!(decoded.path().is_none());
}

#[test]
fn missing_alpha_is_synthesized_opaque() {
    let rgb = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
    let bytes = encode_png(image::DynamicImage::ImageRgb8(rgb));

    let decoded = SourceImage::decode(&bytes).unwrap();
    assert!(decoded.image().pixels().all(|p| p.0 == [10, 20, 30, 255]));
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = SourceImage::decode(b"definitely not an image").unwrap_err();
    assert!(matches!(err, HueloopError::Decode(_)));
}

#[test]
fn missing_file_is_a_decode_error_naming_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.png");
    let err = SourceImage::open(&path).unwrap_err();
    assert!(matches!(err, HueloopError::Decode(_)));
    assert!(err.to_string().contains("nope.png"));
}

#[test]
fn open_reads_from_disk_regardless_of_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.bin");
    let img = RgbaImage::from_pixel(4, 4, Rgba([9, 8, 7, 6]));
    std::fs::write(&path, encode_png(image::DynamicImage::ImageRgba8(img))).unwrap();

    let src = SourceImage::open(&path).unwrap();
    assert_eq!(src.path(), Some(path.as_path()));
    assert_eq!(src.image().get_pixel(3, 3).0, [9, 8, 7, 6]);
}

#[test]
fn empty_raster_is_rejected() {
    assert!(SourceImage::from_rgba(RgbaImage::new(0, 0)).is_err());
}

#[test]
fn baseline_is_red_only_with_source_alpha() {
    let img = RgbaImage::from_fn(3, 3, |x, y| Rgba([(x * 80) as u8, 200, (y * 90) as u8, 77]));
    let src = SourceImage::from_rgba(img).unwrap();
    let base = src.baseline();
    assert_eq!(base.canvas(), src.canvas());
    for (s, b) in src.image().pixels().zip(base.image().pixels()) {
        assert_eq!(b.0, [s.0[0], 0, 0, s.0[3]]);
    }
}
