//! Benchmark: joining many readiness signals

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use futures::executor::block_on;
use slideshow_assets::{AssetPreloader, AssetRequest, MockHost, MockSpawner, NullDisplay};

fn preload_barrier_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("preload_barrier");

    for count in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let requests: Vec<AssetRequest> = (0..count)
                .map(|i| AssetRequest::new(format!("track{i}"), format!("audio/track{i}")))
                .collect();
            let preloader = AssetPreloader::new(MockSpawner::blocking());

            b.iter(|| {
                let mut host = MockHost::new();
                let session = preloader.begin(&mut host, requests.clone()).unwrap();
                host.signal_all();
                black_box(block_on(session.run(&NullDisplay, || {})).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, preload_barrier_benchmark);
criterion_main!(benches);
