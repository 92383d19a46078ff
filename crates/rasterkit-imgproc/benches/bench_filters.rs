use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use rasterkit_image::{PixelBuffer, Rgb};
use rasterkit_imgproc::{filter::gaussian_blur_with, parallel::ExecutionStrategy};

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Blur");

    for (width, height) in [(256, 224), (512, 448)].iter() {
        for radius in [1, 2, 3, 5].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * (2 * *radius + 1)) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, radius);

            let pixels = (0..width * height)
                .map(|i| {
                    let v = (i % 256) as u16;
                    Rgb::new(v, 255 - v, v / 2)
                })
                .collect();
            let image = PixelBuffer::new([*width, *height].into(), 255, pixels).unwrap();

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_serial", &parameter_string),
                &image,
                |b, src| {
                    b.iter(|| {
                        black_box(gaussian_blur_with(
                            black_box(src),
                            *radius,
                            1.5,
                            ExecutionStrategy::Serial,
                        ))
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_parallel_rows", &parameter_string),
                &image,
                |b, src| {
                    b.iter(|| {
                        black_box(gaussian_blur_with(
                            black_box(src),
                            *radius,
                            1.5,
                            ExecutionStrategy::ParallelRows,
                        ))
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
