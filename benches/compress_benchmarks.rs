//! Benchmarks for single-scan compression
//!
//! Measures decode, resize and progressive encode of synthetic scans at
//! typical phone-scanner resolutions.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use docsite::compress::image::target_dimensions;
use docsite::compress::{compress_image, EncodeSettings};
use image::{Rgb, RgbImage};
use std::hint::black_box;
use tempfile::TempDir;

fn write_scan(dir: &TempDir, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.path().join(format!("scan_{width}x{height}.png"));
    RgbImage::from_fn(width, height, |x, y| {
        let ink = if (x / 7 + y / 11) % 9 == 0 { 30 } else { 235 };
        Rgb([ink, ink, (ink as u32 * 9 / 10) as u8])
    })
    .save(&path)
    .expect("Failed to write scan");
    path
}

fn bench_compress_image(c: &mut Criterion) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let settings = EncodeSettings {
        quality: 85,
        max_width: 1200,
    };

    let mut group = c.benchmark_group("compress_image");
    group.sample_size(10);

    for (width, height) in [(1000, 1400), (2480, 3508)] {
        let input = write_scan(&temp_dir, width, height);
        let output = temp_dir.path().join(format!("scan_{width}x{height}.jpg"));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &input,
            |b, input| {
                b.iter(|| {
                    compress_image(black_box(input), &output, &settings)
                        .expect("Compression failed")
                })
            },
        );
    }

    group.finish();
}

fn bench_target_dimensions(c: &mut Criterion) {
    c.bench_function("target_dimensions", |b| {
        b.iter(|| target_dimensions(black_box(2480), black_box(3508), black_box(1200)))
    });
}

criterion_group!(benches, bench_compress_image, bench_target_dimensions);
criterion_main!(benches);
