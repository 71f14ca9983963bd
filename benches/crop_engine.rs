// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use image_rs::{DynamicImage, Rgba, RgbaImage};
use std::hint::black_box;
use wallcrop::domain::{BackgroundColor, DesktopTarget, Point};
use wallcrop::engine::CropFrameEngine;

fn loaded_engine() -> CropFrameEngine {
    let mut engine = CropFrameEngine::new(DesktopTarget::default(), BackgroundColor::default());
    let image = RgbaImage::from_pixel(2400, 1800, Rgba([90, 140, 200, 255]));
    engine
        .set_image(DynamicImage::ImageRgba8(image))
        .expect("non-empty image");
    engine
}

fn crop_engine_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_engine");

    group.bench_function("set_image_2400x1800", |b| {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2400,
            1800,
            Rgba([90, 140, 200, 255]),
        ));
        let mut engine = CropFrameEngine::default();
        b.iter(|| engine.set_image(black_box(image.clone())).expect("non-empty image"));
    });

    group.bench_function("display_image_800x600", |b| {
        let mut engine = loaded_engine();
        b.iter(|| black_box(engine.display_image(800, 600)));
    });

    group.bench_function("drag_step", |b| {
        let mut engine = loaded_engine();
        let _ = engine.display_image(800, 600);
        engine.begin_drag(Point::new(400.0, 300.0));
        let mut x = 400.0;
        b.iter(|| {
            x = if x > 600.0 { 200.0 } else { x + 1.0 };
            engine.drag_to(black_box(Point::new(x, 300.0)));
        });
    });

    group.bench_function("extract_crop", |b| {
        let engine = loaded_engine();
        b.iter(|| black_box(engine.extract_crop().expect("image loaded")));
    });

    group.finish();
}

criterion_group!(benches, crop_engine_benchmark);
criterion_main!(benches);
