use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use img_shrink::formats::resolve_output_format;
use img_shrink::processing::{downscale, new_dimensions, ImageAsset};
use img_shrink::{CompressionMode, Compressor, FormatChoice, LogLevel, Logger};
use std::path::PathBuf;
use tempfile::TempDir;

fn create_test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    }))
}

fn create_test_file(width: u32, height: u32) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("bench.jpg");
    create_test_image(width, height)
        .save_with_format(&test_file, ImageFormat::Jpeg)
        .unwrap();
    (test_file, temp_dir)
}

fn bench_new_dimensions(c: &mut Criterion) {
    c.bench_function("new_dimensions", |b| {
        b.iter(|| new_dimensions(black_box(4032), black_box(3024), black_box(0.6)))
    });
}

fn bench_resolve_output_format(c: &mut Criterion) {
    let mapping = CompressionMode::Aggressive.profile().format_mapping;
    c.bench_function("resolve_output_format", |b| {
        b.iter(|| resolve_output_format(black_box("jpeg"), FormatChoice::Auto, mapping))
    });
}

fn bench_downscale(c: &mut Criterion) {
    let mut group = c.benchmark_group("downscale");
    for (width, height) in [(640, 480), (1920, 1080)] {
        let img = create_test_image(width, height);
        group.bench_with_input(
            BenchmarkId::new("lanczos3", format!("{}x{}", width, height)),
            &img,
            |b, img| {
                b.iter(|| {
                    let mut asset = ImageAsset::from_image(img.clone());
                    downscale(&mut asset, black_box(0.6))
                })
            },
        );
    }
    group.finish();
}

fn bench_compress_image(c: &mut Criterion) {
    let (input, temp_dir) = create_test_file(800, 600);
    let output_dir = temp_dir.path().join("out");
    let logger = Logger::capture(LogLevel::Error);

    let mut group = c.benchmark_group("compress_image");
    group.sample_size(10);
    for mode in [
        CompressionMode::Light,
        CompressionMode::Moderate,
        CompressionMode::Aggressive,
    ] {
        let compressor = Compressor::new(mode.into(), &logger);
        group.bench_with_input(BenchmarkId::from_parameter(mode), &input, |b, input| {
            b.iter(|| compressor.compress_image(input, Some(&output_dir)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_new_dimensions,
    bench_resolve_output_format,
    bench_downscale,
    bench_compress_image
);
criterion_main!(benches);
