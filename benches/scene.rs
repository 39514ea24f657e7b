use criterion::{criterion_group, Criterion};

use pathtracer::progress::Progress;
use pathtracer::*;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("scene/10x10x4", |b| {
        let settings = RenderSettings {
            width: 10,
            height: 10,
            samples_per_pixel: 4,
            max_depth: 50,
            threads: 4,
            seed: 0xDEADBEEF,
        };

        let world = scene::random_scene(&mut Sampler::new(settings.seed));
        let camera = scene::demo_camera(settings.aspect());
        let progress = Progress::hidden();

        b.iter(|| render(&settings, &camera, &world, &progress).unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion::criterion_main!(benches);
