#![allow(dead_code)]

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Big-endian TIFF block with a single Orientation (0x0112) entry of 6,
/// i.e. "rotate 90 degrees clockwise to display".
pub const EXIF_ORIENTATION_6: &[u8] = b"MM\0\x2a\0\0\0\x08\0\x01\x01\x12\0\x03\0\0\0\x01\0\x06\0\0\0\0\0\0";

/// Smooth gradient with some noise so encoders have real work to do.
pub fn photo_like(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let noise = ((x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)) % 23) as u8;
        Rgb([
            ((x * 255 / width.max(1)) as u8).saturating_add(noise),
            ((y * 255 / height.max(1)) as u8).saturating_add(noise),
            (((x + y) * 127 / (width + height).max(1)) as u8).saturating_add(noise),
        ])
    })
}

pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    photo_like(width, height)
        .save_with_format(&path, ImageFormat::Jpeg)
        .unwrap();
    path
}

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    photo_like(width, height)
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

/// PNG whose left half is fully transparent.
pub fn write_png_with_alpha(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_fn(width, height, |x, y| {
        let alpha = if x < width / 2 { 0 } else { 255 };
        Rgba([(x % 256) as u8, (y % 256) as u8, 90, alpha])
    })
    .save_with_format(&path, ImageFormat::Png)
    .unwrap();
    path
}

/// JPEG stored landscape (`width` x `height`) with EXIF orientation 6.
pub fn write_jpeg_with_orientation(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = photo_like(width, height);
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, 90)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    let mut jpeg = Jpeg::from_bytes(Bytes::from(encoded)).unwrap();
    jpeg.set_exif(Some(Bytes::from_static(EXIF_ORIENTATION_6)));

    let path = dir.join(name);
    let mut file = fs::File::create(&path).unwrap();
    jpeg.encoder().write_to(&mut file).unwrap();
    path
}

pub fn write_text(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"not an image").unwrap();
    path
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}
