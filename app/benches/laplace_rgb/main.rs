use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pic_laplace::{Backend, ImageStore, LaplaceFilter, ThreadCount};

fn synthetic_image(width: usize, height: usize, stride: usize) -> Vec<u8> {
    let mut data = vec![0u8; stride * height];
    for (y, row) in data.chunks_exact_mut(stride).enumerate() {
        for (x, px) in row[..width * 3].iter_mut().enumerate() {
            *px = ((x * 7) ^ (y * 13)) as u8;
        }
    }
    data
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let (width, height) = (1920usize, 1080usize);
    let stride = (width * 3 + 3) & !3;
    let src_bytes = synthetic_image(width, height, stride);
    let store = ImageStore::from_slice(&src_bytes, width, height, stride).unwrap();

    let mut group = c.benchmark_group("Laplace RGB 1920x1080");
    for backend in [Backend::Accelerated, Backend::Native] {
        for threads in [ThreadCount::One, ThreadCount::Four, ThreadCount::Sixteen] {
            let mut filter = LaplaceFilter::new(backend);
            filter.set_thread_count(threads);
            group.bench_with_input(
                BenchmarkId::new(format!("{backend:?}"), threads.count()),
                &filter,
                |b, filter| {
                    b.iter(|| {
                        filter.apply(&store).unwrap();
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
