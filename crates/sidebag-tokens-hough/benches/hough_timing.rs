use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{GrayImage, Luma};
use sidebag_tokens_core::blur_gray;
use sidebag_tokens_hough::{detect_circles, HoughCircleParams};

fn synthetic_sheet() -> GrayImage {
    let mut centers = Vec::new();
    for row in 0..8 {
        for col in 0..4 {
            let x = 100.0 + col as f32 * 120.0 + if col >= 2 { 400.0 } else { 0.0 };
            let y = 80.0 + row as f32 * 100.0;
            centers.push((x, y));
        }
    }
    let img = GrayImage::from_fn(1275, 900, |x, y| {
        let inside = centers.iter().any(|&(cx, cy)| {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            dx * dx + dy * dy <= 34.0 * 34.0
        });
        Luma([if inside { 50 } else { 240 }])
    });
    blur_gray(&img, 2.0)
}

fn bench_detect(c: &mut Criterion) {
    let img = synthetic_sheet();
    let params = HoughCircleParams::default();
    c.bench_function("detect_circles_1275x900_32_tokens", |b| {
        b.iter(|| detect_circles(black_box(&img), black_box(&params)))
    });
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
